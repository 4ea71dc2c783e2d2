//! Tab-strip title controls for editor groups.
//!
//! Two kinds mirror the host's two title-control classes: the multi-tab
//! strip and the single-title ("no tabs") variant. Each kind gets its own
//! class object so overrides and one-shot flags stay per kind.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{Element, ElementRef};
use crate::hooks::{Hook, HookTable};
use crate::workbench::{EditorGroupsAccessor, GroupId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStripKind {
    Tabs,
    SingleTitle,
}

impl TabStripKind {
    pub fn class_name(self) -> &'static str {
        match self {
            TabStripKind::Tabs => "TabStrip",
            TabStripKind::SingleTitle => "SingleTitleStrip",
        }
    }
}

pub struct TabStripClass {
    kind: TabStripKind,
    table: HookTable,
    pub(crate) create: Rc<Hook<TabStrip, (), ()>>,
    pub(crate) open_editor: Rc<Hook<TabStrip, String, ()>>,
    pub(crate) handle_closed_editors: Rc<Hook<TabStrip, (), ()>>,
}

impl TabStripClass {
    pub fn new(kind: TabStripKind) -> Rc<Self> {
        let mut table = HookTable::new(kind.class_name());
        let create = table.declare("create", |strip: &TabStrip, _: &mut ()| {
            strip.create_original();
        });
        let open_editor = table.declare("open_editor", |strip: &TabStrip, editor: &mut String| {
            strip.open_editor_original(editor);
        });
        let handle_closed_editors =
            table.declare("handle_closed_editors", |strip: &TabStrip, _: &mut ()| {
                strip.handle_closed_editors_original();
            });
        Rc::new(Self {
            kind,
            table,
            create,
            open_editor,
            handle_closed_editors,
        })
    }

    pub fn kind(&self) -> TabStripKind {
        self.kind
    }

    pub fn table(&self) -> &HookTable {
        &self.table
    }
}

pub struct TabStrip {
    class: Rc<TabStripClass>,
    group: GroupId,
    accessor: Rc<dyn EditorGroupsAccessor>,
    title_container: ElementRef,
    tabs_container: ElementRef,
    editors: RefCell<Vec<String>>,
}

impl TabStrip {
    pub fn new(
        class: &Rc<TabStripClass>,
        group: GroupId,
        accessor: Rc<dyn EditorGroupsAccessor>,
        parent: &ElementRef,
    ) -> Rc<Self> {
        let title_container = Element::new("title");
        parent.append_child(&title_container);
        Rc::new(Self {
            class: Rc::clone(class),
            group,
            accessor,
            title_container,
            tabs_container: Element::new("tabs-container"),
            editors: RefCell::new(Vec::new()),
        })
    }

    pub fn kind(&self) -> TabStripKind {
        self.class.kind
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn title_container(&self) -> &ElementRef {
        &self.title_container
    }

    pub fn tabs_container(&self) -> &ElementRef {
        &self.tabs_container
    }

    pub fn editors(&self) -> Vec<String> {
        self.editors.borrow().clone()
    }

    pub(crate) fn accessor(&self) -> Rc<dyn EditorGroupsAccessor> {
        Rc::clone(&self.accessor)
    }

    // Hookable dispatch.

    pub fn create(&self) {
        self.class.create.call(self, &mut ());
    }

    pub fn open_editor(&self, editor: &str) {
        let mut editor = editor.to_string();
        self.class.open_editor.call(self, &mut editor);
    }

    pub fn handle_closed_editors(&self) {
        self.class.handle_closed_editors.call(self, &mut ());
    }

    /// Host-side convenience: drop an editor then reconcile the tab nodes.
    pub fn close_editor(&self, editor: &str) {
        self.editors.borrow_mut().retain(|e| e != editor);
        self.handle_closed_editors();
    }

    // Original implementations.

    fn create_original(&self) {
        let row = Element::new("tabs-and-actions");
        self.title_container.append_child(&row);
        row.append_child(&self.tabs_container);
    }

    fn open_editor_original(&self, editor: &str) {
        let mut editors = self.editors.borrow_mut();
        if !editors.iter().any(|e| e == editor) {
            editors.push(editor.to_string());
        }
        drop(editors);
        self.reconcile_tabs();
    }

    fn handle_closed_editors_original(&self) {
        self.reconcile_tabs();
    }

    /// Rebuild tab nodes from the editor list, leaving non-tab children
    /// (such as an appended drag region) where they are.
    fn reconcile_tabs(&self) {
        let stale: Vec<ElementRef> = (0..self.tabs_container.child_count())
            .filter_map(|i| self.tabs_container.child_at(i))
            .filter(|child| child.has_class("tab"))
            .collect();
        for tab in stale {
            self.tabs_container.remove_child(&tab);
        }
        for _ in self.editors.borrow().iter() {
            self.tabs_container.append_child(&Element::new("tab"));
        }
    }
}
