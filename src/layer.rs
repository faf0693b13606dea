//! Backing render layer for [`ArcWidget`](crate::widget::ArcWidget).
//!
//! The layer keeps two values: the model (target) percentage, which always
//! matches the widget's logical value, and the presented percentage, which is
//! what gets painted on the current frame. While a transition is running the
//! presented value is re-sampled on every [`tick`](ArcRenderLayer::tick).

use tracing::{debug, trace};

use crate::animation::{PropertyKey, Transition, TransitionPhase, TransitionTiming};
use crate::geometry::Bounds;

/// Outcome of advancing the layer by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFrame {
    /// No transition; nothing changed.
    Idle,
    /// A transition is running (or waiting for its begin time).
    Animating,
    /// The transition completed on this frame; presented equals the model value.
    Finished,
}

#[derive(Debug)]
pub struct ArcRenderLayer {
    bounds: Bounds,
    model: f64,
    presented: f64,
    transition: Option<Transition>,
    started: bool,
    needs_display: bool,
}

impl ArcRenderLayer {
    pub fn new(bounds: Bounds, percentage: f64) -> Self {
        Self {
            bounds,
            model: percentage,
            presented: percentage,
            transition: None,
            started: false,
            needs_display: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.needs_display = true;
        }
    }

    /// Target the layer is heading for.
    pub fn model_percentage(&self) -> f64 {
        self.model
    }

    /// Value painted on the most recent frame.
    pub fn presented_percentage(&self) -> f64 {
        self.presented
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    pub(crate) fn mark_displayed(&mut self) {
        self.needs_display = false;
    }

    /// Presented value at `now`, without advancing the layer.
    pub fn presentation_at(&self, now: f64) -> f64 {
        match &self.transition {
            Some(transition) => transition.sample(now).value,
            None => self.presented,
        }
    }

    /// Moves the model value to `target`.
    ///
    /// With an ambient `timing` a transition is synthesized from whatever is
    /// on screen at `now` to `target`, interrupting any running one. Without
    /// it the presented value jumps straight to `target`. Returns whether a
    /// transition was started.
    pub fn set_percentage(
        &mut self,
        target: f64,
        timing: Option<&TransitionTiming>,
        now: f64,
    ) -> bool {
        let from = self.presentation_at(now);

        if let Some(previous) = self.transition.take() {
            debug!(
                from = previous.from,
                to = previous.to,
                presented = from,
                retarget = target,
                "interrupting percentage transition"
            );
            previous.notify_stopped(false);
        }

        self.model = target;
        self.needs_display = true;

        match timing {
            Some(timing) if from != target => {
                let transition =
                    Transition::synthesize(PropertyKey::Percentage, from, target, timing, now);
                debug!(
                    key = transition.key.as_str(),
                    from,
                    to = target,
                    duration = timing.duration,
                    "starting percentage transition"
                );
                self.presented = from;
                self.started = false;
                self.transition = Some(transition);
                true
            }
            _ => {
                self.presented = target;
                false
            }
        }
    }

    /// Advances the running transition to `now` and updates the presented value.
    pub fn tick(&mut self, now: f64) -> LayerFrame {
        let Some(transition) = &self.transition else {
            return LayerFrame::Idle;
        };

        let sample = transition.sample(now);
        if !self.started && sample.phase != TransitionPhase::Pending {
            self.started = true;
            transition.notify_started();
        }
        self.presented = sample.value;
        self.needs_display = true;
        trace!(presented = sample.value, phase = ?sample.phase, "percentage frame");

        if sample.phase != TransitionPhase::Finished {
            return LayerFrame::Animating;
        }

        if let Some(finished) = self.transition.take() {
            debug!(to = finished.to, "percentage transition finished");
            finished.notify_stopped(true);
        }
        self.presented = self.model;
        LayerFrame::Finished
    }

    /// Drops the running transition and snaps to the model value.
    pub fn cancel(&mut self) -> bool {
        let Some(transition) = self.transition.take() else {
            return false;
        };
        debug!(
            to = transition.to,
            presented = self.presented,
            "cancelling percentage transition"
        );
        transition.notify_stopped(false);
        self.presented = self.model;
        self.needs_display = true;
        true
    }
}
