//! Time-based interpolation for the presented percentage.
//!
//! A [`Transition`] is synthesized whenever the percentage changes under an
//! ambient [`TransitionTiming`]. The host samples it once per frame with its
//! own clock (seconds, monotonic) and the render layer paints the value it gets
//! back. Timing follows the usual media-timing model: local time is
//! `(now - begin) * speed + time_offset`, and the active span is stretched by
//! repeats and autoreversal.

use std::fmt;
use std::rc::Rc;

use bon::Builder;

use crate::error::{ArcError, Result};

// ============================================================================
// TIMING CURVES
// ============================================================================

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimingCurve {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInEaseOut,
    /// The platform's default curve for implicit transitions.
    Default,
    /// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl TimingCurve {
    fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            TimingCurve::Linear => None,
            TimingCurve::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            TimingCurve::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            TimingCurve::EaseInEaseOut => Some((0.42, 0.0, 0.58, 1.0)),
            TimingCurve::Default => Some((0.25, 0.1, 0.25, 1.0)),
            TimingCurve::CubicBezier { x1, y1, x2, y2 } => {
                Some((x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2))
            }
        }
    }

    pub fn apply(self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => UnitBezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            ax: 1.0 - cx - bx,
            bx,
            cx,
            ay: 1.0 - cy - by,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Parameter whose x equals `x`: Newton first, bisection if that stalls.
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let error = self.sample_x(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.sample_dx(t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let value = self.sample_x(t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) / 2.0;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    fn solve(&self, x: f64) -> f64 {
        self.sample_y(self.solve_t(x))
    }
}

/// One interpolation step: the value `t` of the way from `from` to `to` along `curve`.
pub fn interpolate(t: f64, from: f64, to: f64, curve: TimingCurve) -> f64 {
    from + (to - from) * curve.apply(t)
}

// ============================================================================
// TRANSITION TIMING
// ============================================================================

/// What the layer shows outside a transition's active span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    #[default]
    Removed,
    Forwards,
    /// Show the from-value while waiting for a future begin time.
    Backwards,
    Both,
}

impl FillMode {
    pub fn fills_backwards(self) -> bool {
        matches!(self, FillMode::Backwards | FillMode::Both)
    }
}

/// Receives lifecycle callbacks for transitions.
pub trait TransitionDelegate: fmt::Debug {
    fn started(&self, _transition: &Transition) {}

    /// `finished` is false when the transition was interrupted or cancelled.
    fn stopped(&self, _transition: &Transition, _finished: bool) {}
}

/// Ambient timing applied to implicit percentage transitions.
#[derive(Debug, Clone, Builder)]
pub struct TransitionTiming {
    /// Absolute start on the host clock; `None` starts at the change.
    pub begin_time: Option<f64>,
    #[builder(default = 0.25)]
    pub duration: f64,
    #[builder(default = 1.0)]
    pub speed: f64,
    #[builder(default = 0.0)]
    pub time_offset: f64,
    /// Number of cycles; `0` plays once, `f64::INFINITY` loops until retargeted.
    #[builder(default = 0.0)]
    pub repeat_count: f64,
    /// Total repeating time in seconds; overrides `repeat_count` when positive.
    #[builder(default = 0.0)]
    pub repeat_duration: f64,
    #[builder(default = false)]
    pub autoreverses: bool,
    #[builder(default)]
    pub fill_mode: FillMode,
    #[builder(default)]
    pub curve: TimingCurve,
    pub delegate: Option<Rc<dyn TransitionDelegate>>,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TransitionTiming {
    /// Rejects timings whose local clock never reaches the end of the active
    /// span: a speed that is not positive and finite, or a duration that is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let speed_ok = self.speed.is_finite() && self.speed > 0.0;
        let duration_ok = self.duration.is_finite() && self.duration >= 0.0;
        if speed_ok && duration_ok {
            Ok(())
        } else {
            Err(ArcError::UnfinishableTiming {
                speed: self.speed,
                duration: self.duration,
            })
        }
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Animatable property of the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Percentage,
}

impl PropertyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Percentage => "percentage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Waiting for the begin time.
    Pending,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSample {
    pub phase: TransitionPhase,
    pub value: f64,
}

/// An explicit from/to transition of one property.
#[derive(Debug, Clone)]
pub struct Transition {
    pub key: PropertyKey,
    pub from: f64,
    pub to: f64,
    pub timing: TransitionTiming,
    begin: f64,
}

impl Transition {
    /// Copies the ambient timing and resolves its begin time against `now`.
    pub fn synthesize(
        key: PropertyKey,
        from: f64,
        to: f64,
        ambient: &TransitionTiming,
        now: f64,
    ) -> Self {
        Self {
            key,
            from,
            to,
            timing: ambient.clone(),
            begin: ambient.begin_time.unwrap_or(now),
        }
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    fn cycle_duration(&self) -> f64 {
        if self.timing.autoreverses {
            self.timing.duration * 2.0
        } else {
            self.timing.duration
        }
    }

    /// Local time the transition stays active for; may be infinite.
    pub fn active_duration(&self) -> f64 {
        let timing = &self.timing;
        if timing.repeat_duration > 0.0 {
            timing.repeat_duration
        } else if timing.repeat_count > 0.0 {
            self.cycle_duration() * timing.repeat_count
        } else {
            self.cycle_duration()
        }
    }

    pub fn sample(&self, now: f64) -> TransitionSample {
        let timing = &self.timing;

        if now < self.begin {
            let value = if timing.fill_mode.fills_backwards() {
                self.from
            } else {
                self.to
            };
            return TransitionSample {
                phase: TransitionPhase::Pending,
                value,
            };
        }

        let local = ((now - self.begin) * timing.speed + timing.time_offset).max(0.0);
        if timing.duration <= 0.0 || local >= self.active_duration() {
            return TransitionSample {
                phase: TransitionPhase::Finished,
                value: self.to,
            };
        }

        let cycle = self.cycle_duration();
        let position = local.rem_euclid(cycle);
        let progress = if timing.autoreverses && position >= timing.duration {
            (cycle - position) / timing.duration
        } else {
            position / timing.duration
        };

        TransitionSample {
            phase: TransitionPhase::Active,
            value: interpolate(progress, self.from, self.to, timing.curve),
        }
    }

    pub(crate) fn notify_started(&self) {
        if let Some(delegate) = &self.timing.delegate {
            delegate.started(self);
        }
    }

    pub(crate) fn notify_stopped(&self, finished: bool) {
        if let Some(delegate) = &self.timing.delegate {
            delegate.stopped(self, finished);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    fn linear(duration: f64) -> TransitionTiming {
        TransitionTiming::builder()
            .duration(duration)
            .curve(TimingCurve::Linear)
            .build()
    }

    #[test]
    fn test_curves_pin_endpoints() {
        for curve in [
            TimingCurve::Linear,
            TimingCurve::EaseIn,
            TimingCurve::EaseOut,
            TimingCurve::EaseInEaseOut,
            TimingCurve::Default,
        ] {
            assert!(approx(curve.apply(0.0), 0.0), "{curve:?}");
            assert!(approx(curve.apply(1.0), 1.0), "{curve:?}");
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = TimingCurve::EaseInEaseOut;
        assert!(approx(curve.apply(0.5), 0.5));
        assert!(approx(curve.apply(0.25) + curve.apply(0.75), 1.0));
        assert!(curve.apply(0.25) < 0.25);
    }

    #[test]
    fn test_ease_curves_are_monotonic() {
        for curve in [TimingCurve::EaseIn, TimingCurve::EaseOut, TimingCurve::Default] {
            let mut previous = 0.0;
            for step in 0..=100 {
                let value = curve.apply(step as f64 / 100.0);
                assert!(value + 1e-6 >= previous, "{curve:?} at {step}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_interpolate_clamps_progress() {
        assert_eq!(interpolate(0.5, 20.0, 60.0, TimingCurve::Linear), 40.0);
        assert_eq!(interpolate(-1.0, 20.0, 60.0, TimingCurve::Linear), 20.0);
        assert_eq!(interpolate(3.0, 20.0, 60.0, TimingCurve::Linear), 60.0);
        // Works downwards too.
        assert_eq!(interpolate(0.25, 80.0, 0.0, TimingCurve::Linear), 60.0);
    }

    #[test]
    fn test_sample_runs_from_begin_to_end() {
        let transition = Transition::synthesize(PropertyKey::Percentage, 0.0, 100.0, &linear(1.0), 10.0);

        assert_eq!(transition.begin(), 10.0);
        assert_eq!(transition.sample(10.0).value, 0.0);
        let mid = transition.sample(10.5);
        assert_eq!(mid.phase, TransitionPhase::Active);
        assert!(approx(mid.value, 50.0));
        let done = transition.sample(11.0);
        assert_eq!(done.phase, TransitionPhase::Finished);
        assert_eq!(done.value, 100.0);
    }

    #[test]
    fn test_speed_and_offset_scale_local_time() {
        let timing = TransitionTiming::builder()
            .duration(1.0)
            .speed(2.0)
            .time_offset(0.2)
            .curve(TimingCurve::Linear)
            .build();
        let transition = Transition::synthesize(PropertyKey::Percentage, 0.0, 100.0, &timing, 0.0);

        // local = 0.1 * 2 + 0.2
        assert!(approx(transition.sample(0.1).value, 40.0));
        assert_eq!(transition.sample(0.4).phase, TransitionPhase::Finished);
    }

    #[test]
    fn test_validate_rejects_stalled_clocks() {
        assert!(linear(0.0).validate().is_ok());
        assert!(TransitionTiming::default().validate().is_ok());

        let stalled = TransitionTiming::builder().speed(0.0).build();
        assert_eq!(
            stalled.validate(),
            Err(ArcError::UnfinishableTiming {
                speed: 0.0,
                duration: 0.25
            })
        );
        assert!(TransitionTiming::builder().speed(-0.5).build().validate().is_err());
        assert!(linear(f64::INFINITY).validate().is_err());
        assert!(linear(-1.0).validate().is_err());
    }

    #[test]
    fn test_autoreverse_returns_to_start_mid_span() {
        let timing = TransitionTiming::builder()
            .duration(1.0)
            .autoreverses(true)
            .curve(TimingCurve::Linear)
            .build();
        let transition = Transition::synthesize(PropertyKey::Percentage, 0.0, 100.0, &timing, 0.0);

        assert_eq!(transition.active_duration(), 2.0);
        assert!(approx(transition.sample(1.5).value, 50.0));
        assert!(approx(transition.sample(1.9).value, 10.0));
    }

    #[test]
    fn test_repeat_count_and_duration() {
        let mut timing = linear(0.5);
        timing.repeat_count = 3.0;
        let repeated = Transition::synthesize(PropertyKey::Percentage, 0.0, 10.0, &timing, 0.0);
        assert_eq!(repeated.active_duration(), 1.5);
        assert!(approx(repeated.sample(1.25).value, 5.0));

        timing.repeat_duration = 0.75;
        let capped = Transition::synthesize(PropertyKey::Percentage, 0.0, 10.0, &timing, 0.0);
        assert_eq!(capped.active_duration(), 0.75);
        assert_eq!(capped.sample(0.8).phase, TransitionPhase::Finished);

        timing.repeat_duration = 0.0;
        timing.repeat_count = f64::INFINITY;
        let forever = Transition::synthesize(PropertyKey::Percentage, 0.0, 10.0, &timing, 0.0);
        assert_eq!(forever.sample(1_000.25).phase, TransitionPhase::Active);
    }

    #[test]
    fn test_future_begin_respects_backwards_fill() {
        let mut timing = linear(1.0);
        timing.begin_time = Some(5.0);
        let plain = Transition::synthesize(PropertyKey::Percentage, 20.0, 80.0, &timing, 0.0);
        let pending = plain.sample(1.0);
        assert_eq!(pending.phase, TransitionPhase::Pending);
        assert_eq!(pending.value, 80.0);

        timing.fill_mode = FillMode::Both;
        let filled = Transition::synthesize(PropertyKey::Percentage, 20.0, 80.0, &timing, 0.0);
        assert_eq!(filled.sample(1.0).value, 20.0);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let transition = Transition::synthesize(PropertyKey::Percentage, 0.0, 30.0, &linear(0.0), 0.0);
        assert_eq!(transition.sample(0.0).phase, TransitionPhase::Finished);
    }

    #[test]
    fn test_property_key_name() {
        assert_eq!(PropertyKey::Percentage.as_str(), "percentage");
    }
}
