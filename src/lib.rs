// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Semicircular arc progress gauge.
//!
//! [`ArcWidget`] owns the configuration and the logical percentage. When backed
//! by an [`ArcRenderLayer`] a percentage change becomes a [`Transition`] that
//! the host samples once per frame through [`ArcWidget::render_frame`]; the
//! widget then paints the interpolated value into any [`DrawingContext`], such
//! as the software [`Canvas`] over a `pixels` frame buffer.
//!
//! ```no_run
//! use arc_gauge::{ArcWidget, Bounds, Canvas, TransitionTiming};
//!
//! let mut widget = ArcWidget::default();
//! widget.attach_layer(Bounds::from_size(200.0, 100.0));
//! widget.set_default_transition(Some(TransitionTiming::default()))?;
//! widget.set_percentage(80.0, 0.0)?;
//!
//! let mut frame = vec![0xff; 200 * 100 * 4];
//! let mut canvas = Canvas::new(&mut frame, 200, 100)?;
//! widget.render_frame(&mut canvas, 0.1);
//! # Ok::<(), arc_gauge::ArcError>(())
//! ```

pub mod animation;
pub mod canvas;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod widget;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub use animation::{
    interpolate, FillMode, PropertyKey, TimingCurve, Transition, TransitionDelegate,
    TransitionPhase, TransitionSample, TransitionTiming,
};
pub use canvas::Canvas;
pub use color::{LinearGradient, Rgba};
pub use config::{ArcConfiguration, WindowConfig};
pub use context::{DrawingContext, StateGuard};
pub use error::{ArcError, Result};
pub use geometry::{
    build_arc_path, compute_fill_end_angle, to_radians, ArcGeometry, ArcPath, Bounds, LineCap,
    Point,
};
pub use layer::{ArcRenderLayer, LayerFrame};
pub use widget::{paint_arc, ArcWidget, FrameStatus, PercentageInput};
