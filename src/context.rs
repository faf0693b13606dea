//! The drawing surface the gauge paints into.
//!
//! Contexts are passed explicitly to every paint call. State changes (stroke
//! color, line width, line cap, clip) stay bracketed by [`StateGuard`], which
//! restores on drop so nothing leaks into the host's next draw.

use std::ops::{Deref, DerefMut};

use crate::color::{LinearGradient, Rgba};
use crate::geometry::{ArcPath, LineCap, Point};

pub trait DrawingContext {
    /// Pushes the current graphics state.
    fn save_state(&mut self);

    /// Pops the graphics state pushed by the matching [`save_state`](Self::save_state).
    fn restore_state(&mut self);

    fn set_stroke_color(&mut self, color: Rgba);

    fn set_line_width(&mut self, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);

    /// Strokes `path` with its own width and cap in the current stroke color.
    fn stroke_path(&mut self, path: &ArcPath);

    /// Narrows the clip to the outline of `path` stroked at the current line
    /// width and cap.
    fn clip_to_stroked_path(&mut self, path: &ArcPath);

    /// Paints `gradient` along `start..end` inside the current clip. Nothing is
    /// painted beyond either end.
    fn draw_linear_gradient(&mut self, gradient: &LinearGradient, start: Point, end: Point);
}

/// Saves the context state on creation and restores it on drop.
pub struct StateGuard<'a, C: DrawingContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawingContext + ?Sized> StateGuard<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save_state();
        Self { ctx }
    }
}

impl<C: DrawingContext + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: DrawingContext + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: DrawingContext + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore_state();
    }
}
