//! The workbench layout root: lifecycle methods, runtime state, relayout.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::config::Side;
use crate::geometry::NARROW_ACTIVITY_BAR_WIDTH;
use crate::hooks::{Hook, HookTable};
use crate::workbench::part::{Part, PartSize};
use crate::workbench::{EditorGroupsAccessor, GroupId, PartId};

/// Nominal sidebar width the stand-in relayout pass hands to the sidebar
/// part.
const SIDE_BAR_DEFAULT_WIDTH: f64 = 300.0;
const STATUS_BAR_HEIGHT: f64 = 22.0;

pub struct LayoutClass {
    table: HookTable,
    pub(crate) init_layout: Rc<Hook<Layout, (), ()>>,
    pub(crate) set_activity_bar_hidden: Rc<Hook<Layout, bool, ()>>,
    pub(crate) set_side_bar_hidden: Rc<Hook<Layout, bool, ()>>,
    pub(crate) set_side_bar_position: Rc<Hook<Layout, Side, ()>>,
    pub(crate) center_editor_layout: Rc<Hook<Layout, bool, ()>>,
}

impl LayoutClass {
    pub fn new() -> Rc<Self> {
        let mut table = HookTable::new("Layout");
        let init_layout = table.declare("init_layout", |layout: &Layout, _: &mut ()| {
            layout.init_layout_original();
        });
        let set_activity_bar_hidden =
            table.declare("set_activity_bar_hidden", |layout: &Layout, hidden: &mut bool| {
                layout.set_activity_bar_hidden_original(*hidden);
            });
        let set_side_bar_hidden =
            table.declare("set_side_bar_hidden", |layout: &Layout, hidden: &mut bool| {
                layout.set_side_bar_hidden_original(*hidden);
            });
        let set_side_bar_position =
            table.declare("set_side_bar_position", |layout: &Layout, side: &mut Side| {
                layout.set_side_bar_position_original(*side);
            });
        let center_editor_layout =
            table.declare("center_editor_layout", |layout: &Layout, active: &mut bool| {
                layout.center_editor_layout_original(*active);
            });
        Rc::new(Self {
            table,
            init_layout,
            set_activity_bar_hidden,
            set_side_bar_hidden,
            set_side_bar_position,
            center_editor_layout,
        })
    }

    pub fn table(&self) -> &HookTable {
        &self.table
    }
}

pub struct Layout {
    class: Rc<LayoutClass>,
    weak_self: Weak<Layout>,
    parts: RefCell<BTreeMap<PartId, Rc<Part>>>,
    /// Editor groups in the single grid column, top to bottom.
    groups: RefCell<Vec<GroupId>>,
    grid_active: Cell<bool>,
    side_bar_hidden: Cell<bool>,
    side_bar_position: Cell<Side>,
    activity_bar_hidden: Cell<bool>,
    centered_editor: Cell<bool>,
    bounds: Cell<PartSize>,
    relayouts: Cell<u64>,
}

impl Layout {
    pub fn new(class: &Rc<LayoutClass>, bounds: PartSize) -> Rc<Self> {
        let class = Rc::clone(class);
        Rc::new_cyclic(|weak_self| Self {
            class,
            weak_self: weak_self.clone(),
            parts: RefCell::new(BTreeMap::new()),
            groups: RefCell::new(Vec::new()),
            grid_active: Cell::new(false),
            side_bar_hidden: Cell::new(false),
            side_bar_position: Cell::new(Side::Left),
            activity_bar_hidden: Cell::new(false),
            centered_editor: Cell::new(false),
            bounds: Cell::new(bounds),
            relayouts: Cell::new(0),
        })
    }

    pub fn register_part(&self, part: Rc<Part>) {
        self.parts.borrow_mut().insert(part.id(), part);
    }

    pub fn part(&self, id: PartId) -> Option<Rc<Part>> {
        self.parts.borrow().get(&id).cloned()
    }

    pub fn is_visible(&self, id: PartId) -> bool {
        match id {
            PartId::ActivityBar => !self.activity_bar_hidden.get(),
            PartId::Sidebar => !self.side_bar_hidden.get(),
            _ => true,
        }
    }

    pub fn side_bar_hidden(&self) -> bool {
        self.side_bar_hidden.get()
    }

    pub fn side_bar_position(&self) -> Side {
        self.side_bar_position.get()
    }

    pub fn centered_editor(&self) -> bool {
        self.centered_editor.get()
    }

    /// Whether the workbench grid finished mounting (`init_layout` ran).
    pub fn grid_active(&self) -> bool {
        self.grid_active.get()
    }

    pub fn bounds(&self) -> PartSize {
        self.bounds.get()
    }

    pub fn set_bounds(&self, bounds: PartSize) {
        self.bounds.set(bounds);
    }

    pub fn relayout_count(&self) -> u64 {
        self.relayouts.get()
    }

    pub(crate) fn weak(&self) -> Weak<Layout> {
        self.weak_self.clone()
    }

    pub fn add_group(&self, group: GroupId) {
        self.groups.borrow_mut().push(group);
    }

    // Hookable lifecycle dispatch.

    pub fn init_layout(&self) {
        self.class.init_layout.call(self, &mut ());
    }

    pub fn set_activity_bar_hidden(&self, hidden: bool) {
        let mut hidden = hidden;
        self.class.set_activity_bar_hidden.call(self, &mut hidden);
    }

    pub fn set_side_bar_hidden(&self, hidden: bool) {
        let mut hidden = hidden;
        self.class.set_side_bar_hidden.call(self, &mut hidden);
    }

    pub fn set_side_bar_position(&self, side: Side) {
        let mut side = side;
        self.class.set_side_bar_position.call(self, &mut side);
    }

    pub fn center_editor_layout(&self, active: bool) {
        let mut active = active;
        self.class.center_editor_layout.call(self, &mut active);
    }

    /// One relayout pass over the registered parts. Not hookable itself; the
    /// coordinator forces it when geometry may have been computed against a
    /// stale full-screen flag.
    pub fn layout(&self) {
        self.relayouts.set(self.relayouts.get() + 1);
        let bounds = self.bounds.get();
        if let Some(bar) = self.part(PartId::ActivityBar)
            && self.is_visible(PartId::ActivityBar)
        {
            bar.layout(NARROW_ACTIVITY_BAR_WIDTH, bounds.height);
        }
        if let Some(sidebar) = self.part(PartId::Sidebar)
            && self.is_visible(PartId::Sidebar)
        {
            sidebar.layout(SIDE_BAR_DEFAULT_WIDTH, bounds.height);
            sidebar.layout_contents();
        }
        if let Some(status) = self.part(PartId::StatusBar) {
            status.layout(bounds.width, STATUS_BAR_HEIGHT);
            status.layout_contents();
        }
    }

    // Original implementations.

    fn init_layout_original(&self) {
        self.grid_active.set(true);
        self.layout();
    }

    fn set_activity_bar_hidden_original(&self, hidden: bool) {
        self.activity_bar_hidden.set(hidden);
        if self.grid_active.get() {
            self.layout();
        }
    }

    fn set_side_bar_hidden_original(&self, hidden: bool) {
        self.side_bar_hidden.set(hidden);
        if self.grid_active.get() {
            self.layout();
        }
    }

    fn set_side_bar_position_original(&self, side: Side) {
        self.side_bar_position.set(side);
        if self.grid_active.get() {
            self.layout();
        }
    }

    fn center_editor_layout_original(&self, active: bool) {
        self.centered_editor.set(active);
    }
}

impl EditorGroupsAccessor for Layout {
    fn group_above(&self, group: GroupId) -> Option<GroupId> {
        let groups = self.groups.borrow();
        let index = groups.iter().position(|g| *g == group)?;
        if index == 0 {
            None
        } else {
            Some(groups[index - 1])
        }
    }
}
