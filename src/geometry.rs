// ============================================================================
// ARC GEOMETRY
// ============================================================================
//
// Paths are plain values: building one never touches a drawing context, so
// geometry can be checked without rasterizing anything. All coordinates are
// y-down; a clockwise arc walks towards increasing angles.

use std::f64::consts::{PI, TAU};

use crate::config::ArcConfiguration;

/// Where the track and fill arcs start, in degrees (the left end of the half circle).
pub const ARC_START_DEGREES: f64 = 180.0;
/// Where the track arc ends, in degrees (the right end of the half circle).
pub const TRACK_END_DEGREES: f64 = 0.0;
/// Horizontal padding is scaled by this before it shrinks the diameter.
pub const RADIUS_PADDING_FACTOR: f64 = 2.5;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// End angle of the fill arc in degrees. Not clamped: 150% yields 450°.
pub fn compute_fill_end_angle(percentage: f64) -> f64 {
    ARC_START_DEGREES + (180.0 / 100.0 * percentage)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner opposite the origin.
    pub fn max_point(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        Bounds::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

/// A stroked circular arc segment together with its stroke style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    /// Radians.
    pub start_angle: f64,
    /// Radians.
    pub end_angle: f64,
    pub clockwise: bool,
    pub line_width: f64,
    pub line_cap: LineCap,
}

impl ArcPath {
    /// A path with nothing to paint.
    pub fn empty() -> Self {
        Self {
            center: Point::default(),
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 0.0,
            clockwise: true,
            line_width: 0.0,
            line_cap: LineCap::Round,
        }
    }

    /// Angular length actually traversed, in `[0, 2π]`.
    pub fn sweep(&self) -> f64 {
        let delta = if self.clockwise {
            self.end_angle - self.start_angle
        } else {
            self.start_angle - self.end_angle
        };
        if (0.0..=TAU).contains(&delta) {
            delta
        } else {
            delta.rem_euclid(TAU)
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.radius > 0.0 && self.line_width > 0.0 && self.sweep() > 0.0)
    }

    fn direction(&self) -> f64 {
        if self.clockwise {
            1.0
        } else {
            -1.0
        }
    }

    pub fn point_at_angle(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.start_angle + self.direction() * self.sweep())
    }

    /// Evenly spaced points along the arc, both ends included.
    pub fn sample_points(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        let step = self.direction() * self.sweep() / segments as f64;
        (0..=segments)
            .map(|i| self.point_at_angle(self.start_angle + step * i as f64))
            .collect()
    }

    /// Shortest distance from `point` to the centre line of the arc.
    pub fn distance_to(&self, point: Point) -> f64 {
        let sweep = self.sweep();
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        let offset = (self.direction() * (dy.atan2(dx) - self.start_angle)).rem_euclid(TAU);
        if offset <= sweep {
            (dx.hypot(dy) - self.radius).abs()
        } else {
            point
                .distance(self.start_point())
                .min(point.distance(self.end_point()))
        }
    }

    /// Anti-aliased coverage in `[0, 1]` of the stroke outline at a pixel centre.
    pub fn stroke_coverage(&self, point: Point, line_width: f64, line_cap: LineCap) -> f64 {
        if self.is_empty() || line_width <= 0.0 {
            return 0.0;
        }
        let half = line_width / 2.0;
        let distance = match line_cap {
            LineCap::Round => self.distance_to(point),
            LineCap::Butt => {
                let dx = point.x - self.center.x;
                let dy = point.y - self.center.y;
                let offset =
                    (self.direction() * (dy.atan2(dx) - self.start_angle)).rem_euclid(TAU);
                if offset > self.sweep() {
                    return 0.0;
                }
                (dx.hypot(dy) - self.radius).abs()
            }
        };
        (half + 0.5 - distance).clamp(0.0, 1.0)
    }

    /// Rectangle enclosing the full circle plus stroke, padded by a pixel.
    pub fn stroke_bounds(&self, line_width: f64) -> Bounds {
        let extent = self.radius + line_width / 2.0 + 1.0;
        Bounds::new(
            self.center.x - extent,
            self.center.y - extent,
            extent * 2.0,
            extent * 2.0,
        )
    }
}

/// Builds a round-capped clockwise arc centred horizontally in `bounds`,
/// `center_y_offset` above its bottom edge, with radius
/// `(width - 2.5 * radius_padding) / 2`. Degenerate inputs yield an empty path.
pub fn build_arc_path(
    bounds: Bounds,
    center_y_offset: f64,
    radius_padding: f64,
    start_angle_deg: f64,
    end_angle_deg: f64,
    stroke_width: f64,
) -> ArcPath {
    let radius = (bounds.width - radius_padding * RADIUS_PADDING_FACTOR) / 2.0;
    if bounds.is_empty() || !(radius > 0.0) {
        return ArcPath::empty();
    }
    ArcPath {
        center: Point::new(
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height - center_y_offset,
        ),
        radius,
        start_angle: to_radians(start_angle_deg),
        end_angle: to_radians(end_angle_deg),
        clockwise: true,
        line_width: stroke_width,
        line_cap: LineCap::Round,
    }
}

/// Track and fill paths for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub track: ArcPath,
    pub fill: ArcPath,
}

impl ArcGeometry {
    pub fn build(bounds: Bounds, config: &ArcConfiguration, percentage: f64) -> Self {
        let track = build_arc_path(
            bounds,
            config.bottom_padding,
            config.horizontal_padding,
            ARC_START_DEGREES,
            TRACK_END_DEGREES,
            config.track_width,
        );
        let fill = build_arc_path(
            bounds,
            config.bottom_padding,
            config.horizontal_padding,
            ARC_START_DEGREES,
            compute_fill_end_angle(percentage),
            config.arc_width,
        );
        Self { track, fill }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_fill_end_angle_endpoints() {
        assert!(approx(compute_fill_end_angle(0.0), 180.0));
        assert!(approx(compute_fill_end_angle(50.0), 270.0));
        assert!(approx(compute_fill_end_angle(100.0), 360.0));
    }

    #[test]
    fn test_fill_end_angle_is_monotonic_in_range() {
        let mut previous = compute_fill_end_angle(0.0);
        for step in 1..=1000 {
            let angle = compute_fill_end_angle(step as f64 / 10.0);
            assert!(angle >= previous);
            assert!((180.0..=360.0 + EPS).contains(&angle));
            previous = angle;
        }
    }

    #[test]
    fn test_fill_end_angle_is_not_clamped() {
        assert!(approx(compute_fill_end_angle(150.0), 450.0));
    }

    #[test]
    fn test_radius_formula() {
        for width in [60.0, 120.0, 200.0, 333.0] {
            let path = build_arc_path(Bounds::from_size(width, 50.0), 5.0, 10.0, 180.0, 0.0, 3.0);
            assert!(approx(path.radius, (width - 25.0) / 2.0));
        }
    }

    #[test]
    fn test_half_width_scenario() {
        let config = ArcConfiguration::builder()
            .horizontal_padding(10.0)
            .bottom_padding(5.0)
            .build();
        let geometry = ArcGeometry::build(Bounds::from_size(200.0, 100.0), &config, 50.0);

        assert_eq!(geometry.fill.center, Point::new(100.0, 95.0));
        assert!(approx(geometry.fill.radius, 87.5));
        assert!(approx(geometry.fill.end_angle, to_radians(270.0)));
        assert!(approx(geometry.track.end_angle, to_radians(0.0)));
        assert!(approx(geometry.track.start_angle, PI));

        // Half of the half circle: the fill ends straight above the centre.
        let end = geometry.fill.end_point();
        assert!(approx(end.x, 100.0));
        assert!(approx(end.y, 95.0 - 87.5));
    }

    #[test]
    fn test_track_sweep_ignores_percentage() {
        let config = ArcConfiguration::default();
        let bounds = Bounds::from_size(200.0, 100.0);
        for percentage in [0.0, 12.5, 50.0, 99.0, 100.0] {
            let geometry = ArcGeometry::build(bounds, &config, percentage);
            assert!(approx(geometry.track.sweep(), PI));
            assert!(approx(geometry.fill.sweep(), PI * percentage / 100.0));
        }
    }

    #[test]
    fn test_zero_percent_is_degenerate() {
        let geometry = ArcGeometry::build(Bounds::from_size(200.0, 100.0), &ArcConfiguration::default(), 0.0);
        assert_eq!(geometry.fill.sweep(), 0.0);
        assert!(geometry.fill.is_empty());
        assert!(!geometry.track.is_empty());
    }

    #[test]
    fn test_out_of_range_wraps_past_half_circle() {
        let path = build_arc_path(
            Bounds::from_size(200.0, 100.0),
            5.0,
            10.0,
            180.0,
            compute_fill_end_angle(150.0),
            5.0,
        );
        assert!(approx(path.sweep(), 1.5 * PI));
    }

    #[test]
    fn test_builder_is_pure() {
        let bounds = Bounds::new(4.0, 8.0, 150.0, 90.0);
        let a = build_arc_path(bounds, 5.0, 10.0, 180.0, 300.0, 5.0);
        let b = build_arc_path(bounds, 5.0, 10.0, 180.0, 300.0, 5.0);
        assert_eq!(a, b);
        assert_eq!(a.sample_points(32), b.sample_points(32));
    }

    #[test]
    fn test_degenerate_bounds_yield_empty_paths() {
        assert!(build_arc_path(Bounds::default(), 5.0, 10.0, 180.0, 0.0, 3.0).is_empty());
        // Padding eats the whole width.
        assert!(build_arc_path(Bounds::from_size(20.0, 40.0), 5.0, 10.0, 180.0, 0.0, 3.0).is_empty());
    }

    #[test]
    fn test_distance_uses_end_caps_outside_sweep() {
        let path = build_arc_path(Bounds::from_size(200.0, 100.0), 5.0, 10.0, 180.0, 270.0, 5.0);
        // On the arc at the top.
        assert!(approx(path.distance_to(Point::new(100.0, 7.5)), 0.0));
        // Below the centre, nearest to the start cap at (12.5, 95).
        let below = Point::new(12.5, 105.0);
        assert!(approx(path.distance_to(below), 10.0));
        assert_eq!(path.stroke_coverage(below, 5.0, LineCap::Butt), 0.0);
    }

    #[test]
    fn test_intersect_clips_to_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Bounds::new(5.0, 0.0, 5.0, 5.0));
        assert!(a.intersect(&Bounds::new(20.0, 20.0, 1.0, 1.0)).is_empty());
    }
}
