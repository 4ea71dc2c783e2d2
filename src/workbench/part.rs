//! Workbench parts: the activity bar, sidebar, status bar and friends.
//!
//! One `Part` struct covers every part; behavior that was subclass-specific
//! in the host dispatches on [`PartId`] inside the override policies instead.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::element::{Element, ElementRef};
use crate::geometry::DEFAULT_PART_TITLE_HEIGHT;
use crate::hooks::{Hook, HookTable};
use crate::host::{self, ColorResolver};
use crate::workbench::PartId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartSize {
    pub width: f64,
    pub height: f64,
}

/// Shared class object for all parts. `title_height` is the class-level
/// composite title constant the sidebar hook substitutes for the duration of
/// a single layout call.
pub struct PartClass {
    table: HookTable,
    pub title_height: Cell<f64>,
    pub(crate) layout: Rc<Hook<Part, PartSize, ()>>,
    pub(crate) layout_contents: Rc<Hook<Part, (), ()>>,
    pub(crate) create_content_area: Rc<Hook<Part, ElementRef, ElementRef>>,
    pub(crate) create_title_area: Rc<Hook<Part, ElementRef, ElementRef>>,
    pub(crate) update_styles: Rc<Hook<Part, (), ()>>,
}

impl PartClass {
    pub fn new() -> Rc<Self> {
        let mut table = HookTable::new("Part");
        let layout = table.declare("layout", |part: &Part, size: &mut PartSize| {
            part.layout_original(*size);
        });
        let layout_contents = table.declare("layout_contents", |part: &Part, _: &mut ()| {
            part.layout_contents_original();
        });
        let create_content_area =
            table.declare("create_content_area", |part: &Part, parent: &mut ElementRef| {
                part.create_content_area_original(parent)
            });
        let create_title_area =
            table.declare("create_title_area", |part: &Part, parent: &mut ElementRef| {
                part.create_title_area_original(parent)
            });
        let update_styles = table.declare("update_styles", |part: &Part, _: &mut ()| {
            part.update_styles_original();
        });
        Rc::new(Self {
            table,
            title_height: Cell::new(DEFAULT_PART_TITLE_HEIGHT),
            layout,
            layout_contents,
            create_content_area,
            create_title_area,
            update_styles,
        })
    }

    pub fn table(&self) -> &HookTable {
        &self.table
    }
}

pub struct Part {
    id: PartId,
    class: Rc<PartClass>,
    colors: Rc<dyn ColorResolver>,
    container: RefCell<Option<ElementRef>>,
    title_area: RefCell<Option<ElementRef>>,
    placeholder: RefCell<Option<ElementRef>>,
    dblclick_wired: Cell<bool>,
    size: Cell<PartSize>,
    applied_title_height: Cell<f64>,
}

impl Part {
    pub fn new(id: PartId, class: &Rc<PartClass>, colors: &Rc<dyn ColorResolver>) -> Rc<Self> {
        Rc::new(Self {
            id,
            class: Rc::clone(class),
            colors: Rc::clone(colors),
            container: RefCell::new(None),
            title_area: RefCell::new(None),
            placeholder: RefCell::new(None),
            dblclick_wired: Cell::new(false),
            size: Cell::new(PartSize::default()),
            applied_title_height: Cell::new(DEFAULT_PART_TITLE_HEIGHT),
        })
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn class(&self) -> &Rc<PartClass> {
        &self.class
    }

    // Hookable dispatch. Every public method goes through the class slot so
    // installed overrides see host-driven invocations too.

    pub fn layout(&self, width: f64, height: f64) {
        let mut size = PartSize { width, height };
        self.class.layout.call(self, &mut size);
    }

    pub fn layout_contents(&self) {
        self.class.layout_contents.call(self, &mut ());
    }

    pub fn create_content_area(&self, parent: &ElementRef) -> ElementRef {
        let mut parent = Rc::clone(parent);
        self.class.create_content_area.call(self, &mut parent)
    }

    pub fn create_title_area(&self, parent: &ElementRef) -> ElementRef {
        let mut parent = Rc::clone(parent);
        self.class.create_title_area.call(self, &mut parent)
    }

    pub fn update_styles(&self) {
        self.class.update_styles.call(self, &mut ());
    }

    // Original implementations, reachable only through the hook chain.

    fn layout_original(&self, size: PartSize) {
        self.size.set(size);
    }

    fn layout_contents_original(&self) {
        // The host splits the part between title and content using the
        // class-level constant; recording which value was in effect is all
        // the chrome layer needs to observe.
        self.applied_title_height.set(self.class.title_height.get());
    }

    fn create_content_area_original(&self, parent: &ElementRef) -> ElementRef {
        let content = Element::new("part-content");
        content.add_class(self.id.as_str());
        parent.append_child(&content);
        *self.container.borrow_mut() = Some(Rc::clone(parent));
        content
    }

    fn create_title_area_original(&self, parent: &ElementRef) -> ElementRef {
        let title = Element::new("composite-title");
        parent.append_child(&title);
        title
    }

    fn update_styles_original(&self) {
        if let Some(container) = self.container() {
            container.set_background(self.colors.resolve(self.background_token()));
        }
    }

    fn background_token(&self) -> &'static str {
        match self.id {
            PartId::ActivityBar => host::ACTIVITY_BAR_BACKGROUND,
            PartId::StatusBar => host::STATUS_BAR_BACKGROUND,
            _ => host::SIDE_BAR_BACKGROUND,
        }
    }

    pub fn container(&self) -> Option<ElementRef> {
        self.container.borrow().clone()
    }

    pub fn title_area(&self) -> Option<ElementRef> {
        self.title_area.borrow().clone()
    }

    pub fn placeholder(&self) -> Option<ElementRef> {
        self.placeholder.borrow().clone()
    }

    pub fn size(&self) -> PartSize {
        self.size.get()
    }

    /// Title height the most recent `layout_contents` pass used.
    pub fn applied_title_height(&self) -> f64 {
        self.applied_title_height.get()
    }

    pub(crate) fn set_placeholder(&self, element: ElementRef) {
        *self.placeholder.borrow_mut() = Some(element);
    }

    pub(crate) fn set_title_area(&self, element: ElementRef) {
        *self.title_area.borrow_mut() = Some(element);
    }

    pub(crate) fn dblclick_wired(&self) -> bool {
        self.dblclick_wired.get()
    }

    pub(crate) fn mark_dblclick_wired(&self) {
        self.dblclick_wired.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Rgb;

    struct FixedColors;

    impl ColorResolver for FixedColors {
        fn resolve(&self, token: &str) -> Option<Rgb> {
            (token == host::SIDE_BAR_BACKGROUND).then_some(Rgb(40, 40, 40))
        }
    }

    fn sidebar() -> Rc<Part> {
        let class = PartClass::new();
        let colors: Rc<dyn ColorResolver> = Rc::new(FixedColors);
        Part::new(PartId::Sidebar, &class, &colors)
    }

    #[test]
    fn layout_records_the_size() {
        let part = sidebar();
        part.layout(300.0, 800.0);
        assert_eq!(part.size(), PartSize { width: 300.0, height: 800.0 });
    }

    #[test]
    fn layout_contents_applies_the_class_constant() {
        let part = sidebar();
        part.layout_contents();
        assert_eq!(part.applied_title_height(), DEFAULT_PART_TITLE_HEIGHT);
        part.class().title_height.set(20.0);
        part.layout_contents();
        assert_eq!(part.applied_title_height(), 20.0);
    }

    #[test]
    fn content_and_title_areas_mount_under_the_parent() {
        let part = sidebar();
        let parent = Element::root();
        let content = part.create_content_area(&parent);
        let title = part.create_title_area(&parent);
        assert!(content.is_attached());
        assert!(content.has_class("parts.sidebar"));
        assert!(title.is_attached());
        assert!(part.container().is_some());
    }

    #[test]
    fn update_styles_paints_the_container() {
        let part = sidebar();
        let parent = Element::root();
        part.create_content_area(&parent);
        part.update_styles();
        assert_eq!(part.container().unwrap().background(), Some(Rgb(40, 40, 40)));
    }
}
