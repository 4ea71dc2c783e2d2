//! Hand-built fakes for the host collaborator traits, shared by the
//! integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::Level;
use wb_chrome::chrome::TitleBarChrome;
use wb_chrome::defer::DeferQueue;
use wb_chrome::element::{Element, ElementRef};
use wb_chrome::host::{
    ColorResolver, ConfigurationStore, DisplayInfo, HostServices, NativeHostBridge, Rgb,
};
use wb_chrome::workbench::part::{Part, PartSize};
use wb_chrome::workbench::{Layout, PartId, WorkbenchClasses};

pub struct FakeConfig {
    values: RefCell<BTreeMap<String, String>>,
}

impl FakeConfig {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            values: RefCell::new(BTreeMap::new()),
        })
    }

    pub fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl ConfigurationStore for FakeConfig {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

pub struct FakeDisplay {
    zoom: Cell<f64>,
    fullscreen: Cell<bool>,
    zoom_observers: RefCell<Vec<Rc<dyn Fn()>>>,
    fullscreen_observers: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl FakeDisplay {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            zoom: Cell::new(1.0),
            fullscreen: Cell::new(false),
            zoom_observers: RefCell::new(Vec::new()),
            fullscreen_observers: RefCell::new(Vec::new()),
        })
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.zoom.set(zoom);
        let observers: Vec<_> = self.zoom_observers.borrow().clone();
        for observer in observers {
            observer();
        }
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.fullscreen.set(fullscreen);
        let observers: Vec<_> = self.fullscreen_observers.borrow().clone();
        for observer in observers {
            observer();
        }
    }
}

impl DisplayInfo for FakeDisplay {
    fn zoom_factor(&self) -> f64 {
        self.zoom.get()
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    fn on_zoom_changed(&self, observer: Rc<dyn Fn()>) {
        self.zoom_observers.borrow_mut().push(observer);
    }

    fn on_fullscreen_changed(&self, observer: Rc<dyn Fn()>) {
        self.fullscreen_observers.borrow_mut().push(observer);
    }
}

#[derive(Default)]
pub struct FakeNative {
    clicks: Cell<usize>,
}

impl FakeNative {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn double_clicks(&self) -> usize {
        self.clicks.get()
    }
}

impl NativeHostBridge for FakeNative {
    fn handle_title_double_click(&self) {
        self.clicks.set(self.clicks.get() + 1);
    }
}

#[derive(Default)]
pub struct FakeColors {
    values: RefCell<BTreeMap<String, Rgb>>,
    registered: RefCell<Vec<String>>,
}

impl FakeColors {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set(&self, token: &str, color: Rgb) {
        self.values.borrow_mut().insert(token.to_string(), color);
    }

    pub fn registered(&self) -> Vec<String> {
        self.registered.borrow().clone()
    }
}

impl ColorResolver for FakeColors {
    fn resolve(&self, token: &str) -> Option<Rgb> {
        self.values.borrow().get(token).copied()
    }

    fn register_token(&self, token: &str) {
        self.registered.borrow_mut().push(token.to_string());
    }
}

/// A small workbench wired to the fakes: a layout with activity bar,
/// sidebar, and status bar parts, mounted under a document root.
pub struct Harness {
    pub config: Rc<FakeConfig>,
    pub display: Rc<FakeDisplay>,
    pub native: Rc<FakeNative>,
    pub colors: Rc<FakeColors>,
    pub classes: WorkbenchClasses,
    pub defer: Rc<DeferQueue>,
    pub root: ElementRef,
    pub layout: Rc<Layout>,
}

/// Route the crate's install/update debug lines to the captured test output.
/// Safe to call from every harness; only the first call installs the global
/// subscriber.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        let config = FakeConfig::new();
        let display = FakeDisplay::new();
        let native = FakeNative::new();
        let colors = FakeColors::new();
        let classes = WorkbenchClasses::new();
        let root = Element::root();
        let layout = Layout::new(
            &classes.layout,
            PartSize {
                width: 1440.0,
                height: 900.0,
            },
        );
        let resolver: Rc<dyn ColorResolver> = colors.clone();
        for id in [PartId::ActivityBar, PartId::Sidebar, PartId::StatusBar] {
            layout.register_part(Part::new(id, &classes.part, &resolver));
        }
        Self {
            config,
            display,
            native,
            colors,
            classes,
            defer: Rc::new(DeferQueue::new()),
            root,
            layout,
        }
    }

    pub fn services(&self) -> HostServices {
        HostServices {
            config: self.config.clone(),
            display: self.display.clone(),
            native: self.native.clone(),
            colors: self.colors.clone(),
        }
    }

    pub fn install(&self) -> Option<Rc<TitleBarChrome>> {
        TitleBarChrome::install(self.services(), &self.classes, self.defer.clone())
            .expect("hook targets present")
    }

    /// Mount each part's content area (and the sidebar title area) under the
    /// root, the way the host does during startup.
    pub fn mount_parts(&self) {
        for id in [PartId::ActivityBar, PartId::Sidebar, PartId::StatusBar] {
            let part = self.layout.part(id).expect("part registered");
            let shell = Element::new("part-shell");
            self.root.append_child(&shell);
            part.create_content_area(&shell);
            if id == PartId::Sidebar {
                part.create_title_area(&shell);
            }
        }
    }

    pub fn part(&self, id: PartId) -> Rc<Part> {
        self.layout.part(id).expect("part registered")
    }
}
