//! A minimal retained element tree.
//!
//! This is the slice of the host's element API the hook set actually touches:
//! parent/child structure, class markers, a few style properties, and
//! re-dispatchable events. Attachment is computed by walking to a root node,
//! which is what deferred actions check before touching a captured reference.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::host::Rgb;

pub type ElementRef = Rc<Element>;
pub type WeakElement = Weak<Element>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MouseDown,
    DoubleClick,
    DragEnter,
    DragLeave,
    DragOver,
    DragEnd,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// A dispatched UI event. Flags use interior mutability so listeners can
/// cancel default handling or stop propagation through a shared reference.
pub struct UiEvent {
    kind: EventKind,
    button: Option<MouseButton>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl UiEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            button: None,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn mouse_down(button: MouseButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(EventKind::MouseDown)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn button(&self) -> Option<MouseButton> {
        self.button
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// A fresh copy of this event with clean flags, suitable for re-dispatch
    /// on another target.
    pub fn redispatch(&self) -> UiEvent {
        UiEvent {
            kind: self.kind,
            button: self.button,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub width: Option<f64>,
    pub padding_left: Option<f64>,
    pub background: Option<Rgb>,
}

type Listener = Rc<dyn Fn(&UiEvent)>;

pub struct Element {
    root: bool,
    classes: RefCell<Vec<String>>,
    parent: RefCell<WeakElement>,
    children: RefCell<Vec<ElementRef>>,
    style: RefCell<ElementStyle>,
    listeners: RefCell<Vec<(EventKind, Listener)>>,
}

impl Element {
    pub fn new(class: &str) -> ElementRef {
        Rc::new(Self {
            root: false,
            classes: RefCell::new(vec![class.to_string()]),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            style: RefCell::new(ElementStyle::default()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// The document root; descendants of a root count as attached.
    pub fn root() -> ElementRef {
        Rc::new(Self {
            root: true,
            classes: RefCell::new(vec!["root".to_string()]),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            style: RefCell::new(ElementStyle::default()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn append_child(self: &Rc<Self>, child: &ElementRef) {
        child.detach();
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(Rc::clone(child));
    }

    pub fn insert_first(self: &Rc<Self>, child: &ElementRef) {
        child.detach();
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().insert(0, Rc::clone(child));
    }

    /// Remove `child` from this element. Returns false when it was not a
    /// child.
    pub fn remove_child(&self, child: &ElementRef) -> bool {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !Rc::ptr_eq(c, child));
        if children.len() != before {
            *child.parent.borrow_mut() = Weak::new();
            true
        } else {
            false
        }
    }

    fn detach(self: &Rc<Self>) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    pub fn parent(&self) -> Option<ElementRef> {
        self.parent.borrow().upgrade()
    }

    pub fn child_at(&self, index: usize) -> Option<ElementRef> {
        self.children.borrow().get(index).cloned()
    }

    pub fn last_child(&self) -> Option<ElementRef> {
        self.children.borrow().last().cloned()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// True when the ancestor chain reaches a root node.
    pub fn is_attached(&self) -> bool {
        if self.root {
            return true;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if node.root {
                return true;
            }
            current = node.parent();
        }
        false
    }

    pub fn set_width(&self, width: f64) {
        self.style.borrow_mut().width = Some(width);
    }

    pub fn width(&self) -> Option<f64> {
        self.style.borrow().width
    }

    pub fn set_padding_left(&self, padding: f64) {
        self.style.borrow_mut().padding_left = Some(padding);
    }

    pub fn padding_left(&self) -> Option<f64> {
        self.style.borrow().padding_left
    }

    pub fn set_background(&self, color: Option<Rgb>) {
        self.style.borrow_mut().background = color;
    }

    pub fn background(&self) -> Option<Rgb> {
        self.style.borrow().background
    }

    pub fn add_listener(&self, kind: EventKind, listener: impl Fn(&UiEvent) + 'static) {
        self.listeners.borrow_mut().push((kind, Rc::new(listener)));
    }

    /// Run listeners registered for the event's kind. Returns false when a
    /// listener prevented default handling, mirroring the host's dispatch
    /// contract. Listeners are snapshotted first so one may mutate the
    /// listener list or re-dispatch without re-entering the borrow.
    pub fn dispatch(&self, event: &UiEvent) -> bool {
        let matching: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in matching {
            listener(event);
        }
        !event.default_prevented()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("classes", &self.classes.borrow())
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_tracks_the_root_chain() {
        let root = Element::root();
        let row = Element::new("row");
        let cell = Element::new("cell");
        row.append_child(&cell);
        assert!(!cell.is_attached());
        root.append_child(&row);
        assert!(cell.is_attached());
        root.remove_child(&row);
        assert!(!cell.is_attached());
    }

    #[test]
    fn append_reparents_instead_of_duplicating() {
        let a = Element::new("a");
        let b = Element::new("b");
        let child = Element::new("child");
        a.append_child(&child);
        b.append_child(&child);
        assert_eq!(a.child_count(), 0);
        assert_eq!(b.child_count(), 1);
        assert!(Rc::ptr_eq(&child.parent().unwrap(), &b));
    }

    #[test]
    fn insert_first_places_before_existing_children() {
        let row = Element::new("row");
        let tab = Element::new("tab");
        let pad = Element::new("pad");
        row.append_child(&tab);
        row.insert_first(&pad);
        assert!(Rc::ptr_eq(&row.child_at(0).unwrap(), &pad));
        assert!(Rc::ptr_eq(&row.last_child().unwrap(), &tab));
    }

    #[test]
    fn dispatch_reports_prevented_default() {
        let node = Element::new("node");
        node.add_listener(EventKind::MouseDown, |event| {
            if event.button() == Some(MouseButton::Primary) {
                event.prevent_default();
            }
        });
        assert!(!node.dispatch(&UiEvent::mouse_down(MouseButton::Primary)));
        assert!(node.dispatch(&UiEvent::mouse_down(MouseButton::Secondary)));
    }

    #[test]
    fn redispatch_starts_with_clean_flags() {
        let original = UiEvent::new(EventKind::DragOver);
        original.prevent_default();
        original.stop_propagation();
        let copy = original.redispatch();
        assert_eq!(copy.kind(), EventKind::DragOver);
        assert!(!copy.default_prevented());
        assert!(!copy.propagation_stopped());
    }
}
