//! The title-bar geometry coordinator and its hook set.
//!
//! [`TitleBarChrome`] is the single source of truth for every dimension
//! derived from the native window-control reservation: the activity-bar
//! offset, the sidebar title height, the tab-strip left padding, and the
//! inline title padding. `install` wires a fixed set of overrides into the
//! workbench classes; each override either consults the coordinator
//! synchronously or, for the lifecycle methods, re-enters [`update`] after
//! the host's own mutation so geometry is re-derived strictly afterwards.
//!
//! [`update`]: TitleBarChrome::update

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{self, ActivityBarMode, Side, StatusBarPosition, TitleBarMode};
use crate::defer::DeferQueue;
use crate::element::{Element, ElementRef, EventKind, MouseButton, WeakElement};
use crate::geometry::{
    DEFAULT_TITLE_PADDING, NARROW_ACTIVITY_BAR_WIDTH, TITLE_BASE_PADDING, TrafficLightBox,
};
use crate::hooks::{HookError, OriginalFn, ScopedSwap};
use crate::host::{self, HostServices};
use crate::style::StyleInjector;
use crate::workbench::part::{Part, PartSize};
use crate::workbench::tabs::TabStrip;
use crate::workbench::{EditorConstants, Layout, PartId, WorkbenchClasses};

/// Synthetic element appended after the tabs; forwards drag-and-drop to the
/// real container and supports native double-click semantics.
pub const DRAG_REGION_CLASS: &str = "tabs-drag-region";
/// Marker for the drag region of the topmost group in its column, for
/// distinct hover styling.
pub const DRAG_REGION_TOP_CLASS: &str = "tabs-drag-region-top";
/// Placeholder inserted before the first tab to keep tabs clear of the
/// native control cluster.
pub const LEFT_PADDING_CLASS: &str = "tabs-left-padding";

pub struct TitleBarChrome {
    host: HostServices,
    editor: Rc<EditorConstants>,
    style: StyleInjector,
    defer: Rc<DeferQueue>,
    inline_title: bool,
    /// Captured the first time the host's `init_layout` fires; absent means
    /// customization is not yet active.
    layout: RefCell<Option<Weak<Layout>>>,
    padding_elements: RefCell<Vec<WeakElement>>,
    padding_done: Cell<bool>,
    padding_done_single: Cell<bool>,
}

impl TitleBarChrome {
    /// Activate title-bar customization against the given workbench classes.
    ///
    /// Returns `Ok(None)` when the configured title-bar mode leaves the host
    /// untouched. Inline-only hooks additionally require that the status bar
    /// is not on top. Fails fast when any hook target is missing, since a
    /// silently absent hook would mean padding, color, or the drag region
    /// quietly stop applying.
    pub fn install(
        services: HostServices,
        classes: &WorkbenchClasses,
        defer: Rc<DeferQueue>,
    ) -> Result<Option<Rc<Self>>, HookError> {
        let mode = config::title_bar_mode(services.config.as_ref());
        if mode == TitleBarMode::Native {
            tracing::debug!("native title bar configured; leaving host untouched");
            return Ok(None);
        }
        let inline_title = mode == TitleBarMode::Inline
            && config::status_bar_position(services.config.as_ref()) != StatusBarPosition::Top;

        let chrome = Rc::new(Self {
            host: services,
            editor: Rc::clone(&classes.editor),
            style: StyleInjector::new(),
            defer,
            inline_title,
            layout: RefCell::new(None),
            padding_elements: RefCell::new(Vec::new()),
            padding_done: Cell::new(false),
            padding_done_single: Cell::new(false),
        });

        chrome.host.colors.register_token(host::INLINE_TITLE_BAR_BACKGROUND);

        let weak = Rc::downgrade(&chrome);
        chrome.host.display.on_zoom_changed(Rc::new(move || {
            if let Some(chrome) = weak.upgrade() {
                chrome.update();
            }
        }));
        let weak = Rc::downgrade(&chrome);
        chrome.host.display.on_fullscreen_changed(Rc::new(move || {
            if let Some(chrome) = weak.upgrade() {
                chrome.update();
            }
        }));

        chrome.update();
        chrome.install_hooks(classes)?;
        tracing::debug!(?mode, inline_title, "title-bar chrome installed");
        Ok(Some(chrome))
    }

    // Derived geometry. All of these read live host state; nothing here is
    // cached across calls.

    pub fn traffic_light_dimensions(&self) -> TrafficLightBox {
        TrafficLightBox::at_zoom(self.host.display.zoom_factor())
    }

    pub fn is_full_screen(&self) -> bool {
        self.host.display.is_fullscreen()
    }

    pub fn activity_bar_is_vertical(&self) -> bool {
        config::activity_bar_mode(self.host.config.as_ref()) != ActivityBarMode::Bottom
    }

    pub fn activity_bar_is_wide(&self) -> bool {
        config::activity_bar_mode(self.host.config.as_ref()) == ActivityBarMode::Wide
    }

    pub fn status_bar_on_top(&self) -> bool {
        config::status_bar_position(self.host.config.as_ref()) == StatusBarPosition::Top
    }

    /// Visible only when the host reports the region visible and the bar is
    /// vertical; a bottom-placed bar never occupies the vertical budget.
    pub fn activity_bar_is_visible(&self) -> bool {
        self.layout_ref()
            .is_some_and(|layout| layout.is_visible(PartId::ActivityBar))
            && self.activity_bar_is_vertical()
    }

    /// Wide mode reuses the traffic-light width so the bar aligns with the
    /// native control cluster.
    pub fn activity_bar_width(&self) -> f64 {
        if self.activity_bar_is_wide() {
            self.traffic_light_dimensions().width
        } else {
            NARROW_ACTIVITY_BAR_WIDTH
        }
    }

    /// `None` until the host layout has been captured.
    pub fn side_bar_hidden(&self) -> Option<bool> {
        self.layout_ref().map(|layout| layout.side_bar_hidden())
    }

    pub fn side_bar_position(&self) -> Option<Side> {
        self.layout_ref().map(|layout| layout.side_bar_position())
    }

    pub fn inline_title(&self) -> bool {
        self.inline_title
    }

    pub fn style_text(&self) -> Option<String> {
        self.style.text()
    }

    pub fn defer_queue(&self) -> &Rc<DeferQueue> {
        &self.defer
    }

    fn layout_ref(&self) -> Option<Rc<Layout>> {
        self.layout.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Recompute everything derived from native-control reservation and
    /// current display state. Step order matters: the editor title height
    /// must land before the relayout pass reads it, and the relayout must
    /// run before padding is re-derived from the resulting part state.
    pub fn update(&self) {
        let dims = self.traffic_light_dimensions();
        self.editor.title_height.set(dims.height);
        self.style.render(dims);

        let Some(layout) = self.layout_ref() else {
            return;
        };

        // The grid can compute a layout while the full-screen flag is still
        // stale; force a pass with current state.
        if layout.grid_active() {
            layout.layout();
        }

        if !layout.side_bar_hidden()
            && let Some(sidebar) = layout.part(PartId::Sidebar)
            && sidebar.container().is_some()
        {
            sidebar.update_styles();
        }

        let mounted: Vec<ElementRef> = {
            let mut slots = self.padding_elements.borrow_mut();
            slots.retain(|weak| weak.upgrade().is_some_and(|el| el.is_attached()));
            slots.iter().filter_map(Weak::upgrade).collect()
        };
        for (index, element) in mounted.iter().enumerate() {
            self.update_tabs_left_padding(element, index);
        }
    }

    /// Width of one tab-strip left-padding placeholder. Only the leftmost
    /// placeholder of a non-full-screen window whose sidebar cannot absorb
    /// the native control cluster (hidden, or on the right) reserves space.
    pub fn update_tabs_left_padding(&self, element: &ElementRef, index: usize) {
        let (Some(hidden), Some(position)) = (self.side_bar_hidden(), self.side_bar_position())
        else {
            element.set_width(0.0);
            return;
        };
        if index == 0 && !self.is_full_screen() && (hidden || position == Side::Right) {
            let mut width = self.traffic_light_dimensions().width;
            // The activity bar only sits between the native controls and the
            // tab strip when the sidebar is not on the right.
            if self.activity_bar_is_visible() && position != Side::Right {
                width -= self.activity_bar_width();
            }
            element.set_width(width.max(0.0));
        } else {
            element.set_width(0.0);
        }
    }

    // Hook installation. Registration order is significant: later wraps run
    // outermost on shared methods.

    fn install_hooks(self: &Rc<Self>, classes: &WorkbenchClasses) -> Result<(), HookError> {
        self.install_part_hooks(classes)?;
        self.install_layout_hooks(classes)?;
        self.install_tab_hooks(classes)?;
        Ok(())
    }

    fn install_part_hooks(self: &Rc<Self>, classes: &WorkbenchClasses) -> Result<(), HookError> {
        // The native control cluster and the activity bar share vertical
        // space only when the bar is vertical, visible, not full-screen, and
        // the sidebar is on the left.
        let chrome = Rc::clone(self);
        classes.part.table().wrap(
            "layout",
            move |part: &Part, original: &OriginalFn<Part, PartSize, ()>, size: &mut PartSize| {
                if part.id() == PartId::ActivityBar
                    && chrome.activity_bar_is_visible()
                    && !chrome.is_full_screen()
                    && chrome.side_bar_position() == Some(Side::Left)
                {
                    size.height -= chrome.traffic_light_dimensions().height;
                }
                original(part, size)
            },
        )?;

        if self.inline_title {
            // Placeholder behind the traffic lights, used purely as a paint
            // target. Wide mode aligns the bar itself with the cluster, so
            // no placeholder is mounted there.
            let chrome = Rc::clone(self);
            classes.part.table().wrap(
                "create_content_area",
                move |part: &Part,
                      original: &OriginalFn<Part, ElementRef, ElementRef>,
                      parent: &mut ElementRef| {
                    let content = original(part, parent);
                    if part.id() == PartId::ActivityBar {
                        let placeholder = Element::new("activity-bar-placeholder");
                        if !chrome.activity_bar_is_wide() {
                            parent.append_child(&placeholder);
                        }
                        part.set_placeholder(placeholder);
                    }
                    content
                },
            )?;

            let chrome = Rc::clone(self);
            classes.part.table().wrap(
                "update_styles",
                move |part: &Part, original: &OriginalFn<Part, (), ()>, args: &mut ()| {
                    original(part, args);
                    if part.id() == PartId::ActivityBar
                        && let Some(placeholder) = part.placeholder()
                    {
                        let color = chrome
                            .host
                            .colors
                            .resolve(host::INLINE_TITLE_BAR_BACKGROUND)
                            .or_else(|| chrome.host.colors.resolve(host::SIDE_BAR_BACKGROUND));
                        placeholder.set_background(color);
                    }
                },
            )?;
        }

        let chrome = Rc::clone(self);
        classes.part.table().wrap(
            "layout_contents",
            move |part: &Part, original: &OriginalFn<Part, (), ()>, args: &mut ()| {
                if chrome.status_bar_on_top()
                    && part.id() == PartId::StatusBar
                    && !part.dblclick_wired()
                    && let Some(container) = part.container()
                {
                    let native = Rc::clone(&chrome.host.native);
                    container.add_listener(EventKind::DoubleClick, move |_| {
                        native.handle_title_double_click();
                    });
                    part.mark_dblclick_wired();
                }

                if part.id() == PartId::Sidebar {
                    // Substitute the composite title constant for exactly one
                    // call; the guard restores it on every exit path.
                    let _title_height = ScopedSwap::install(
                        &part.class().title_height,
                        chrome.traffic_light_dimensions().height,
                    );
                    original(part, args)
                } else {
                    original(part, args)
                }
            },
        )?;

        let chrome = Rc::clone(self);
        classes.part.table().wrap(
            "create_title_area",
            move |part: &Part,
                  original: &OriginalFn<Part, ElementRef, ElementRef>,
                  parent: &mut ElementRef| {
                let title = original(part, parent);
                if part.id() == PartId::Sidebar {
                    part.set_title_area(Rc::clone(&title));
                    let native = Rc::clone(&chrome.host.native);
                    title.add_listener(EventKind::DoubleClick, move |_| {
                        native.handle_title_double_click();
                    });
                }
                title
            },
        )?;

        if self.inline_title {
            // Paint the captured sidebar title and pad it clear of the
            // native controls.
            let chrome = Rc::clone(self);
            classes.part.table().wrap(
                "update_styles",
                move |part: &Part, original: &OriginalFn<Part, (), ()>, args: &mut ()| {
                    original(part, args);
                    if let Some(title) = part.title_area() {
                        title.set_background(
                            chrome.host.colors.resolve(host::INLINE_TITLE_BAR_BACKGROUND),
                        );
                        let padding = if chrome.is_full_screen()
                            || chrome.side_bar_position() == Some(Side::Right)
                        {
                            DEFAULT_TITLE_PADDING
                        } else if chrome.activity_bar_is_visible() {
                            (chrome.traffic_light_dimensions().width
                                - chrome.activity_bar_width()
                                - TITLE_BASE_PADDING)
                                .max(0.0)
                        } else {
                            chrome.traffic_light_dimensions().width - TITLE_BASE_PADDING
                        };
                        title.set_padding_left(padding);
                    }
                },
            )?;
        }

        Ok(())
    }

    fn install_layout_hooks(self: &Rc<Self>, classes: &WorkbenchClasses) -> Result<(), HookError> {
        let chrome = Rc::clone(self);
        classes.layout.table().wrap(
            "init_layout",
            move |layout: &Layout, original: &OriginalFn<Layout, (), ()>, args: &mut ()| {
                original(layout, args);
                *chrome.layout.borrow_mut() = Some(layout.weak());
                chrome.update();
            },
        )?;

        // Propagation edges: geometry is re-derived strictly after the
        // host's own state mutation, never before.
        for method in [
            "set_activity_bar_hidden",
            "set_side_bar_hidden",
        ] {
            let chrome = Rc::clone(self);
            classes.layout.table().wrap(
                method,
                move |layout: &Layout, original: &OriginalFn<Layout, bool, ()>, args: &mut bool| {
                    original(layout, args);
                    chrome.update();
                },
            )?;
        }

        let chrome = Rc::clone(self);
        classes.layout.table().wrap(
            "set_side_bar_position",
            move |layout: &Layout, original: &OriginalFn<Layout, Side, ()>, args: &mut Side| {
                original(layout, args);
                chrome.update();
            },
        )?;

        let chrome = Rc::clone(self);
        classes.layout.table().wrap(
            "center_editor_layout",
            move |layout: &Layout, original: &OriginalFn<Layout, bool, ()>, args: &mut bool| {
                original(layout, args);
                chrome.update();
            },
        )?;

        Ok(())
    }

    fn install_tab_hooks(self: &Rc<Self>, classes: &WorkbenchClasses) -> Result<(), HookError> {
        classes
            .tabs
            .table()
            .wrap::<TabStrip, String, (), _>("open_editor", self.drag_region_policy::<String>())?;
        classes
            .tabs
            .table()
            .wrap::<TabStrip, (), (), _>("handle_closed_editors", self.drag_region_policy::<()>())?;

        if self.inline_title {
            let chrome = Rc::clone(self);
            classes.tabs.table().wrap(
                "create",
                move |strip: &TabStrip, original: &OriginalFn<TabStrip, (), ()>, args: &mut ()| {
                    original(strip, args);
                    chrome.attach_left_padding(strip, false);
                },
            )?;

            let chrome = Rc::clone(self);
            classes.single_title.table().wrap(
                "create",
                move |strip: &TabStrip, original: &OriginalFn<TabStrip, (), ()>, args: &mut ()| {
                    original(strip, args);
                    if let Some(row) = strip.title_container().child_at(0) {
                        row.add_class("no-tabs");
                    }
                    chrome.attach_left_padding(strip, true);
                },
            )?;
        }

        Ok(())
    }

    /// Policy shared by `open_editor` and `handle_closed_editors`: drop the
    /// stale trailing drag region, let the host reconcile tab nodes, then
    /// append a fresh region wired for drag forwarding and native
    /// double-click.
    fn drag_region_policy<A: 'static>(
        self: &Rc<Self>,
    ) -> impl Fn(&TabStrip, &OriginalFn<TabStrip, A, ()>, &mut A) + 'static {
        let chrome = Rc::clone(self);
        move |strip: &TabStrip, original: &OriginalFn<TabStrip, A, ()>, args: &mut A| {
            let container = Rc::clone(strip.tabs_container());
            if let Some(last) = container.last_child()
                && last.has_class(DRAG_REGION_CLASS)
            {
                container.remove_child(&last);
            }

            original(strip, args);

            let region = Element::new(DRAG_REGION_CLASS);
            // Primary-button presses are swallowed so the region never
            // becomes a drag/selection source of its own.
            region.add_listener(EventKind::MouseDown, |event| {
                if event.button() == Some(MouseButton::Primary) {
                    event.prevent_default();
                }
            });
            for kind in [
                EventKind::DragEnter,
                EventKind::DragLeave,
                EventKind::DragOver,
                EventKind::DragEnd,
                EventKind::Drop,
            ] {
                let target = Rc::clone(&container);
                region.add_listener(kind, move |event| {
                    event.stop_propagation();
                    event.prevent_default();
                    target.dispatch(&event.redispatch());
                });
            }
            let native = Rc::clone(&chrome.host.native);
            region.add_listener(EventKind::DoubleClick, move |_| {
                native.handle_title_double_click();
            });
            container.append_child(&region);

            // The grid may still be mounting (editor restore); check for a
            // group above on the next turn, and only if the region is still
            // in the document by then.
            let accessor = strip.accessor();
            let group = strip.group();
            let tagged = Rc::clone(&region);
            chrome.defer.defer_guarded(&region, move || {
                if accessor.group_above(group).is_none() {
                    tagged.add_class(DRAG_REGION_TOP_CLASS);
                }
            });
        }
    }

    /// Insert the left-padding placeholder before the first child of the
    /// title row, and compute its initial width once per control kind.
    fn attach_left_padding(&self, strip: &TabStrip, single_title: bool) {
        let Some(row) = strip.title_container().child_at(0) else {
            tracing::warn!(
                kind = strip.kind().class_name(),
                "title row missing; skipping left padding"
            );
            return;
        };
        let padding = Element::new(LEFT_PADDING_CLASS);
        row.insert_first(&padding);
        self.padding_elements.borrow_mut().push(Rc::downgrade(&padding));

        let done = if single_title {
            &self.padding_done_single
        } else {
            &self.padding_done
        };
        if !done.get() {
            self.update_tabs_left_padding(&padding, 0);
            done.set(true);
        }
    }
}
