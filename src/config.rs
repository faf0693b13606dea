use bon::Builder;

use crate::color::Rgba;

/// Appearance of the arc gauge.
///
/// Every field defaults to the stock look: a thin light-grey track under a
/// purple fill, gradient off.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ArcConfiguration {
    /// Stroke width of the filled arc.
    #[builder(default = 5.0)]
    pub arc_width: f64,
    /// Stroke width of the background track.
    #[builder(default = 3.0)]
    pub track_width: f64,

    #[builder(default = Rgba::rgb(0.5, 0.0, 0.5))]
    pub fill_color: Rgba,
    #[builder(default = Rgba::from_hex(0xe8e8e8))]
    pub track_color: Rgba,

    /// Paint the fill arc with the gradient instead of `fill_color`.
    #[builder(default = false)]
    pub use_gradient: bool,
    #[builder(default = Rgba::from_hex(0xfa6e8c).with_alpha(0.5))]
    pub gradient_start: Rgba,
    #[builder(default = Rgba::from_hex(0xbe1c94).with_alpha(0.5))]
    pub gradient_end: Rgba,
    /// Alpha shared by both gradient stops.
    #[builder(default = 0.5)]
    pub gradient_alpha: f64,

    /// Shrinks the radius: `radius = (width - 2.5 * horizontal_padding) / 2`.
    #[builder(default = 10.0)]
    pub horizontal_padding: f64,
    /// Distance of the arc centre above the bottom edge.
    #[builder(default = 5.0)]
    pub bottom_padding: f64,
}

impl Default for ArcConfiguration {
    fn default() -> Self {
        Self::builder().build().normalized()
    }
}

impl ArcConfiguration {
    /// Stores `alpha` and reapplies it to both gradient stops.
    pub fn set_gradient_alpha(&mut self, alpha: f64) {
        self.gradient_alpha = alpha.clamp(0.0, 1.0);
        self.gradient_start = self.gradient_start.with_alpha(self.gradient_alpha);
        self.gradient_end = self.gradient_end.with_alpha(self.gradient_alpha);
    }

    /// Brings the gradient stops in line with `gradient_alpha`.
    pub fn normalized(mut self) -> Self {
        self.set_gradient_alpha(self.gradient_alpha);
        self
    }
}

/// Configuration for the demo window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub max_framerate: f64,
    /// Seconds between random retargets when nothing is piped on stdin.
    pub retarget_interval: f64,
    /// Duration in seconds of the ambient transition.
    pub transition_duration: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 180,
            max_framerate: 60.0,
            retarget_interval: 2.0,
            transition_duration: 0.6,
        }
    }
}
