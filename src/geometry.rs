//! Design-unit constants and the traffic-light reservation box.

/// Width of the native window-control ("traffic light") cluster, in design
/// units at zoom factor 1.
pub const TRAFFIC_LIGHTS_WIDTH: f64 = 77.0;

/// Height of the native window-control cluster, in design units at zoom
/// factor 1.
pub const TRAFFIC_LIGHTS_HEIGHT: f64 = 37.0;

/// Reserved width of the narrow (icon-only) vertical activity bar.
pub const NARROW_ACTIVITY_BAR_WIDTH: f64 = 50.0;

/// Left padding already baked into the composite title element; subtracted
/// when computing the extra inline-title reservation.
pub const TITLE_BASE_PADDING: f64 = 14.0;

/// Composite-title left padding used when no reservation is needed
/// (full-screen, or the sidebar sits on the right).
pub const DEFAULT_TITLE_PADDING: f64 = 8.0;

/// Host default title height for both editor groups and composite parts,
/// before customization pushes the traffic-light height instead.
pub const DEFAULT_PART_TITLE_HEIGHT: f64 = 35.0;

/// Lower clamp applied to the host-reported zoom factor before dividing.
pub const MIN_ZOOM_FACTOR: f64 = 0.25;

/// The reserved native window-control region, adjusted for zoom. Always
/// computed from the live zoom factor; never cache one of these across a
/// zoom or full-screen change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficLightBox {
    pub width: f64,
    pub height: f64,
}

impl TrafficLightBox {
    pub fn at_zoom(zoom: f64) -> Self {
        let zoom = if zoom.is_finite() {
            zoom.max(MIN_ZOOM_FACTOR)
        } else {
            1.0
        };
        Self {
            width: TRAFFIC_LIGHTS_WIDTH / zoom,
            height: TRAFFIC_LIGHTS_HEIGHT / zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_design_box_by_zoom() {
        for zoom in [0.5, 1.0, 1.25, 2.0, 3.0] {
            let b = TrafficLightBox::at_zoom(zoom);
            assert!((b.width - TRAFFIC_LIGHTS_WIDTH / zoom).abs() < 1e-9);
            assert!((b.height - TRAFFIC_LIGHTS_HEIGHT / zoom).abs() < 1e-9);
        }
    }

    #[test]
    fn clamps_tiny_and_non_finite_zoom() {
        let clamped = TrafficLightBox::at_zoom(0.0);
        assert_eq!(clamped, TrafficLightBox::at_zoom(MIN_ZOOM_FACTOR));
        let fallback = TrafficLightBox::at_zoom(f64::NAN);
        assert_eq!(fallback, TrafficLightBox::at_zoom(1.0));
    }
}
