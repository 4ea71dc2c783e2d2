//! The hookable slice of the host workbench's object model.
//!
//! Class-level state (hook tables, the substitutable composite title
//! constant) lives on shared class objects so overrides behave like
//! prototype patches: one registration affects every instance. The structs
//! here model only what the chrome layer touches; the host's real layout
//! engine stays outside this crate.

pub mod layout;
pub mod part;
pub mod tabs;

use std::cell::Cell;
use std::rc::Rc;

pub use layout::{Layout, LayoutClass};
pub use part::{Part, PartClass, PartSize};
pub use tabs::{TabStrip, TabStripClass, TabStripKind};

use crate::geometry::DEFAULT_PART_TITLE_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartId {
    ActivityBar,
    Sidebar,
    Editor,
    Panel,
    StatusBar,
}

impl PartId {
    pub fn as_str(self) -> &'static str {
        match self {
            PartId::ActivityBar => "parts.activity-bar",
            PartId::Sidebar => "parts.sidebar",
            PartId::Editor => "parts.editor",
            PartId::Panel => "parts.panel",
            PartId::StatusBar => "parts.status-bar",
        }
    }
}

/// An editor group in the grid. Groups within one column are ordered top to
/// bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(pub usize);

/// Lookup of vertical neighbors in the editor grid, used by the drag-region
/// topmost check.
pub trait EditorGroupsAccessor {
    fn group_above(&self, group: GroupId) -> Option<GroupId>;
}

/// Module-level constants of the host editor area that the coordinator
/// pushes derived values into.
pub struct EditorConstants {
    pub title_height: Cell<f64>,
}

impl EditorConstants {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            title_height: Cell::new(DEFAULT_PART_TITLE_HEIGHT),
        })
    }
}

/// The full set of hookable classes plus shared constants, as handed to
/// [`crate::chrome::TitleBarChrome::install`].
pub struct WorkbenchClasses {
    pub part: Rc<PartClass>,
    pub layout: Rc<LayoutClass>,
    pub tabs: Rc<TabStripClass>,
    pub single_title: Rc<TabStripClass>,
    pub editor: Rc<EditorConstants>,
}

impl WorkbenchClasses {
    pub fn new() -> Self {
        Self {
            part: PartClass::new(),
            layout: LayoutClass::new(),
            tabs: TabStripClass::new(TabStripKind::Tabs),
            single_title: TabStripClass::new(TabStripKind::SingleTitle),
            editor: EditorConstants::new(),
        }
    }
}

impl Default for WorkbenchClasses {
    fn default() -> Self {
        Self::new()
    }
}
