//! The single live stylesheet carrying the derived dimension properties.
//!
//! No diffing: the payload is two numeric declarations, so every render
//! replaces the whole text. The sheet is created lazily on first render and
//! there is never more than one.

use std::cell::RefCell;

use indoc::formatdoc;

use crate::geometry::TrafficLightBox;

#[derive(Default)]
pub struct StyleInjector {
    text: RefCell<Option<String>>,
}

impl StyleInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite the stylesheet for the given traffic-light box.
    pub fn render(&self, dims: TrafficLightBox) {
        let sheet = formatdoc! {r#"
            :root {{
                --traffic-lights-width: {width}px;
                --traffic-lights-height: {height}px;
            }}
        "#, width = dims.width, height = dims.height};
        *self.text.borrow_mut() = Some(sheet);
    }

    /// The current stylesheet text; `None` until the first render.
    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazily_created_on_first_render() {
        let injector = StyleInjector::new();
        assert!(injector.text().is_none());
        injector.render(TrafficLightBox::at_zoom(1.0));
        let text = injector.text().unwrap();
        assert!(text.contains("--traffic-lights-width: 77px"));
        assert!(text.contains("--traffic-lights-height: 37px"));
    }

    #[test]
    fn rerender_with_same_state_is_byte_identical() {
        let injector = StyleInjector::new();
        injector.render(TrafficLightBox::at_zoom(1.5));
        let first = injector.text().unwrap();
        injector.render(TrafficLightBox::at_zoom(1.5));
        assert_eq!(injector.text().unwrap(), first);
    }

    #[test]
    fn rerender_replaces_the_whole_text() {
        let injector = StyleInjector::new();
        injector.render(TrafficLightBox::at_zoom(1.0));
        injector.render(TrafficLightBox::at_zoom(2.0));
        let text = injector.text().unwrap();
        assert!(text.contains("--traffic-lights-width: 38.5px"));
        assert!(!text.contains("77px"));
    }
}
