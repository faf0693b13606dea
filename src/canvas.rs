// ============================================================================
// SOFTWARE CANVAS
// ============================================================================
//
// Rasterizes into an RGBA8 frame buffer, such as the one `pixels` hands out
// each frame. Coverage is computed per pixel centre with a one pixel
// anti-aliasing ramp.

use tracing::warn;

use crate::color::{LinearGradient, Rgba};
use crate::context::DrawingContext;
use crate::error::{ArcError, Result};
use crate::geometry::{ArcPath, Bounds, LineCap, Point};

#[derive(Debug, Clone)]
struct GraphicsState {
    stroke_color: Rgba,
    line_width: f64,
    line_cap: LineCap,
    /// Per-pixel coverage in `[0, 1]`; `None` means unclipped.
    clip: Option<Vec<f32>>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::rgb(0.0, 0.0, 0.0),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            clip: None,
        }
    }
}

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(ArcError::FrameSizeMismatch {
                expected: usize::MAX,
                actual: frame.len(),
            })?;
        if frame.len() != expected {
            return Err(ArcError::FrameSizeMismatch {
                expected,
                actual: frame.len(),
            });
        }
        Ok(Self {
            frame,
            width,
            height,
            state: GraphicsState::default(),
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width as f64, self.height as f64)
    }

    /// Number of states currently saved.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_rgba8();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    fn clip_coverage(&self, x: usize, y: usize) -> f64 {
        match &self.state.clip {
            Some(mask) => mask[y * self.width + x] as f64,
            None => 1.0,
        }
    }

    /// Source-over blend of `color` at `coverage`, attenuated by the clip.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba, coverage: f64) {
        let alpha = (color.a * coverage * self.clip_coverage(x, y)).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let src = [color.r * 255.0, color.g * 255.0, color.b * 255.0];
        let dst_alpha = self.frame[idx + 3] as f64 / 255.0;
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f64;
            self.frame[idx + channel] = (value * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        self.frame[idx + 3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Integer pixel ranges covering `bounds`, clipped to the canvas.
    fn pixel_span(&self, bounds: Bounds) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let area = bounds.intersect(&self.bounds());
        if area.is_empty() {
            return (0..0, 0..0);
        }
        let x0 = area.x.floor() as usize;
        let y0 = area.y.floor() as usize;
        let x1 = ((area.x + area.width).ceil() as usize).min(self.width);
        let y1 = ((area.y + area.height).ceil() as usize).min(self.height);
        (x0..x1, y0..y1)
    }
}

fn pixel_centre(x: usize, y: usize) -> Point {
    Point::new(x as f64 + 0.5, y as f64 + 0.5)
}

impl DrawingContext for Canvas<'_> {
    fn save_state(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore_state(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => warn!("restore_state called with no saved state"),
        }
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.state.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn stroke_path(&mut self, path: &ArcPath) {
        if path.is_empty() {
            return;
        }
        let color = self.state.stroke_color;
        let (xs, ys) = self.pixel_span(path.stroke_bounds(path.line_width));
        for y in ys {
            for x in xs.clone() {
                let coverage =
                    path.stroke_coverage(pixel_centre(x, y), path.line_width, path.line_cap);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn clip_to_stroked_path(&mut self, path: &ArcPath) {
        let (line_width, line_cap) = (self.state.line_width, self.state.line_cap);
        let mut mask = vec![0.0_f32; self.width * self.height];
        if !path.is_empty() {
            let (xs, ys) = self.pixel_span(path.stroke_bounds(line_width));
            for y in ys {
                for x in xs.clone() {
                    mask[y * self.width + x] =
                        path.stroke_coverage(pixel_centre(x, y), line_width, line_cap) as f32;
                }
            }
        }
        if let Some(previous) = &self.state.clip {
            for (value, old) in mask.iter_mut().zip(previous) {
                *value *= old;
            }
        }
        self.state.clip = Some(mask);
    }

    fn draw_linear_gradient(&mut self, gradient: &LinearGradient, start: Point, end: Point) {
        let axis = Point::new(end.x - start.x, end.y - start.y);
        let length_sq = axis.x * axis.x + axis.y * axis.y;
        if length_sq <= 0.0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if self.clip_coverage(x, y) <= 0.0 {
                    continue;
                }
                let p = pixel_centre(x, y);
                let t = ((p.x - start.x) * axis.x + (p.y - start.y) * axis.y) / length_sq;
                if (0.0..=1.0).contains(&t) {
                    self.blend_pixel(x, y, gradient.color_at(t), 1.0);
                }
            }
        }
    }
}
