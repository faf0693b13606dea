// ============================================================================
// ARC WIDGET
// ============================================================================

use tracing::{debug, warn};

use crate::animation::TransitionTiming;
use crate::color::{LinearGradient, Rgba};
use crate::config::ArcConfiguration;
use crate::context::{DrawingContext, StateGuard};
use crate::error::{ArcError, Result};
use crate::geometry::{ArcGeometry, Bounds, LineCap};
use crate::layer::{ArcRenderLayer, LayerFrame};

pub const MIN_PERCENTAGE: f64 = 0.0;
pub const MAX_PERCENTAGE: f64 = 100.0;
pub const DEFAULT_PERCENTAGE: f64 = 50.0;

/// How `set_percentage` treated its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentageInput {
    InRange(f64),
    /// The request fell outside `[0, 100]` and was clamped.
    Clamped { requested: f64, applied: f64 },
}

impl PercentageInput {
    pub fn applied(self) -> f64 {
        match self {
            PercentageInput::InRange(value) => value,
            PercentageInput::Clamped { applied, .. } => applied,
        }
    }
}

/// What a call to [`ArcWidget::render_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing to paint.
    Idle,
    /// Painted a static frame for a pending redraw.
    Redrawn,
    /// Painted an interpolated frame; more will follow.
    Animating,
    /// Painted the final frame of a transition.
    Finished,
}

#[derive(Debug, Clone)]
struct CachedGeometry {
    bounds: Bounds,
    percentage: f64,
    geometry: ArcGeometry,
}

/// Semicircular progress gauge: a fixed track arc under a fill arc whose
/// sweep follows the percentage.
#[derive(Debug)]
pub struct ArcWidget {
    config: ArcConfiguration,
    percentage: f64,
    layer: Option<ArcRenderLayer>,
    default_transition: Option<TransitionTiming>,
    animating: bool,
    needs_display: bool,
    cached: Option<CachedGeometry>,
}

impl Default for ArcWidget {
    fn default() -> Self {
        Self::new(ArcConfiguration::default())
    }
}

impl ArcWidget {
    pub fn new(config: ArcConfiguration) -> Self {
        Self {
            config,
            percentage: DEFAULT_PERCENTAGE,
            layer: None,
            default_transition: None,
            animating: false,
            needs_display: true,
            cached: None,
        }
    }

    // ------------------------------------------------------------------------
    // Render layer
    // ------------------------------------------------------------------------

    /// Backs the widget with a live render layer covering `bounds`.
    pub fn attach_layer(&mut self, bounds: Bounds) {
        self.layer = Some(ArcRenderLayer::new(bounds, self.percentage));
        self.needs_display = true;
    }

    /// Removes the render layer, cancelling any running transition.
    pub fn detach_layer(&mut self) -> Option<ArcRenderLayer> {
        let mut layer = self.layer.take()?;
        layer.cancel();
        self.animating = false;
        Some(layer)
    }

    pub fn layer(&self) -> Option<&ArcRenderLayer> {
        self.layer.as_ref()
    }

    pub fn set_layer_bounds(&mut self, bounds: Bounds) {
        if let Some(layer) = &mut self.layer {
            layer.set_bounds(bounds);
        }
    }

    /// Ambient timing for implicit percentage transitions. `None` disables them.
    ///
    /// Timings that could never finish (non-positive or non-finite speed,
    /// negative or non-finite duration) are rejected.
    pub fn set_default_transition(&mut self, timing: Option<TransitionTiming>) -> Result<()> {
        if let Some(timing) = &timing {
            timing.validate()?;
        }
        self.default_transition = timing;
        Ok(())
    }

    pub fn default_transition(&self) -> Option<&TransitionTiming> {
        self.default_transition.as_ref()
    }

    // ------------------------------------------------------------------------
    // Percentage
    // ------------------------------------------------------------------------

    /// Logical percentage: the target, even while a transition is catching up.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Percentage currently on screen.
    pub fn presented_percentage(&self) -> f64 {
        self.layer
            .as_ref()
            .map_or(self.percentage, ArcRenderLayer::presented_percentage)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display || self.layer.as_ref().is_some_and(ArcRenderLayer::needs_display)
    }

    /// Sets the logical percentage, clamped to `[0, 100]`.
    ///
    /// With a live layer the change is handed to it (animated when an ambient
    /// transition is set, `now` being the host clock in seconds); otherwise
    /// the widget is marked for a synchronous redraw.
    pub fn set_percentage(&mut self, value: f64, now: f64) -> Result<PercentageInput> {
        if !value.is_finite() {
            return Err(ArcError::NonFinitePercentage(value));
        }
        let applied = value.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE);
        let input = if applied == value {
            PercentageInput::InRange(value)
        } else {
            warn!(requested = value, applied, "percentage clamped to 0..=100");
            PercentageInput::Clamped {
                requested: value,
                applied,
            }
        };

        if applied == self.percentage {
            return Ok(input);
        }
        self.percentage = applied;

        match &mut self.layer {
            Some(layer) => {
                let animated =
                    layer.set_percentage(applied, self.default_transition.as_ref(), now);
                debug!(percentage = applied, animated, "percentage changed");
                // The layer owns painting from here until the final frame.
                self.animating = animated;
            }
            None => {
                self.needs_display = true;
            }
        }
        Ok(input)
    }

    /// Stops a running transition and shows the logical value.
    pub fn cancel_animation(&mut self) -> bool {
        let cancelled = self.layer.as_mut().is_some_and(ArcRenderLayer::cancel);
        if cancelled {
            self.animating = false;
        }
        cancelled
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &ArcConfiguration {
        &self.config
    }

    /// Replaces the whole configuration as given. Gradient stops keep their
    /// own alpha; only [`set_gradient_alpha`](Self::set_gradient_alpha)
    /// rewrites it. Does not request a redraw.
    pub fn configure(&mut self, config: ArcConfiguration) {
        self.config = config;
        self.cached = None;
    }

    fn update_config(&mut self, update: impl FnOnce(&mut ArcConfiguration)) {
        update(&mut self.config);
        self.cached = None;
        self.needs_display = true;
    }

    pub fn set_arc_width(&mut self, width: f64) {
        self.update_config(|c| c.arc_width = width);
    }

    pub fn set_track_width(&mut self, width: f64) {
        self.update_config(|c| c.track_width = width);
    }

    pub fn set_fill_color(&mut self, color: Rgba) {
        self.update_config(|c| c.fill_color = color);
    }

    pub fn set_track_color(&mut self, color: Rgba) {
        self.update_config(|c| c.track_color = color);
    }

    pub fn set_use_gradient(&mut self, enabled: bool) {
        self.update_config(|c| c.use_gradient = enabled);
    }

    pub fn set_gradient_start(&mut self, color: Rgba) {
        self.update_config(|c| c.gradient_start = color);
    }

    pub fn set_gradient_end(&mut self, color: Rgba) {
        self.update_config(|c| c.gradient_end = color);
    }

    /// Reapplies `alpha` to both gradient stops.
    pub fn set_gradient_alpha(&mut self, alpha: f64) {
        self.update_config(|c| c.set_gradient_alpha(alpha));
    }

    pub fn set_horizontal_padding(&mut self, padding: f64) {
        self.update_config(|c| c.horizontal_padding = padding);
    }

    pub fn set_bottom_padding(&mut self, padding: f64) {
        self.update_config(|c| c.bottom_padding = padding);
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Track and fill paths for `percentage` inside `bounds`.
    pub fn geometry(&mut self, bounds: Bounds, percentage: f64) -> ArcGeometry {
        if let Some(cached) = &self.cached {
            if cached.bounds == bounds && cached.percentage == percentage {
                return cached.geometry;
            }
        }
        let geometry = ArcGeometry::build(bounds, &self.config, percentage);
        self.cached = Some(CachedGeometry {
            bounds,
            percentage,
            geometry,
        });
        geometry
    }

    /// Paints the logical value into `bounds`. A no-op while a transition
    /// owns painting; returns whether anything was drawn.
    pub fn draw<C: DrawingContext + ?Sized>(&mut self, ctx: &mut C, bounds: Bounds) -> bool {
        if self.animating {
            return false;
        }
        let geometry = self.geometry(bounds, self.percentage);
        paint_arc(ctx, &geometry, bounds, &self.config);
        self.needs_display = false;
        if let Some(layer) = &mut self.layer {
            layer.mark_displayed();
        }
        true
    }

    /// Advances the layer to `now` without painting, for frames with no
    /// drawing context available.
    pub fn advance(&mut self, now: f64) -> LayerFrame {
        let frame = match &mut self.layer {
            Some(layer) => layer.tick(now),
            None => LayerFrame::Idle,
        };
        self.animating = frame == LayerFrame::Animating;
        frame
    }

    /// Per-frame callback: advances the layer and paints the presented value
    /// at the layer's bounds when something changed.
    pub fn render_frame<C: DrawingContext + ?Sized>(&mut self, ctx: &mut C, now: f64) -> FrameStatus {
        let frame = self.advance(now);
        let Some(layer) = &self.layer else {
            return FrameStatus::Idle;
        };
        let status = match frame {
            LayerFrame::Animating => FrameStatus::Animating,
            LayerFrame::Finished => FrameStatus::Finished,
            LayerFrame::Idle if layer.needs_display() || self.needs_display => FrameStatus::Redrawn,
            LayerFrame::Idle => return FrameStatus::Idle,
        };

        let bounds = layer.bounds();
        let presented = layer.presented_percentage();
        let geometry = self.geometry(bounds, presented);
        paint_arc(ctx, &geometry, bounds, &self.config);

        self.needs_display = false;
        if let Some(layer) = &mut self.layer {
            layer.mark_displayed();
        }
        status
    }
}

/// Strokes the track, then the fill, then the gradient overlay clipped to the
/// fill's outline. Every state change is undone before returning.
pub fn paint_arc<C: DrawingContext + ?Sized>(
    ctx: &mut C,
    geometry: &ArcGeometry,
    bounds: Bounds,
    config: &ArcConfiguration,
) {
    let mut ctx = StateGuard::new(ctx);
    ctx.set_stroke_color(config.track_color);
    ctx.stroke_path(&geometry.track);
    ctx.set_stroke_color(config.fill_color);
    ctx.stroke_path(&geometry.fill);

    if config.use_gradient && !geometry.fill.is_empty() {
        let mut clipped = StateGuard::new(&mut *ctx);
        clipped.set_line_width(config.arc_width);
        clipped.set_line_cap(LineCap::Round);
        clipped.clip_to_stroked_path(&geometry.fill);
        clipped.draw_linear_gradient(
            &LinearGradient::new(config.gradient_start, config.gradient_end),
            bounds.origin(),
            bounds.max_point(),
        );
    }
}
