use eframe::egui::{Rect, Vec2};

use crate::state::{Transition, TransitionToken};

/// Length of a zoom transition in seconds.
const TRANSITION_SECS: f64 = 0.75;
const FIT_PADDING: f32 = 1.08;

/// The world region shown in the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Viewport {
    pub center: Vec2,
    pub span: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            span: 1.0,
        }
    }
}

impl Viewport {
    pub fn fit(bounds: Rect) -> Self {
        Self {
            center: bounds.center().to_vec2(),
            span: (bounds.width().max(bounds.height()) * FIT_PADDING).max(f32::EPSILON),
        }
    }

    pub fn scale(&self, screen: Rect) -> f32 {
        screen.width().min(screen.height()).max(1.0) / self.span
    }

    /// Screen offset from the chart centre, for `world_to_screen`.
    pub fn pan(&self, screen: Rect) -> Vec2 {
        -self.center * self.scale(screen)
    }

    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            center: self.center + (target.center - self.center) * t,
            span: self.span + (target.span - self.span) * t,
        }
    }
}

fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Tracks when the store's pending transition started on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(in crate::app) struct TransitionClock {
    running: Option<(TransitionToken, f64)>,
}

impl TransitionClock {
    /// Progress of `pending` in `0..=1`, or `None` when nothing is pending.
    pub fn progress(
        &mut self,
        pending: Option<Transition>,
        now: f64,
    ) -> Option<(TransitionToken, f32)> {
        let Some(pending) = pending else {
            self.running = None;
            return None;
        };

        let started = match self.running {
            Some((token, started)) if token == pending.token => started,
            _ => {
                self.running = Some((pending.token, now));
                now
            }
        };

        let progress = ((now - started) / TRANSITION_SECS).clamp(0.0, 1.0) as f32;
        Some((pending.token, progress))
    }
}

/// Moves the viewport toward its target and reports the token of a
/// transition that has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(in crate::app) struct Camera {
    current: Viewport,
    from: Option<(TransitionToken, Viewport)>,
    clock: TransitionClock,
}

impl Camera {
    pub fn viewport(&self) -> Viewport {
        self.current
    }

    pub fn update(
        &mut self,
        pending: Option<Transition>,
        target: Viewport,
        now: f64,
    ) -> Option<TransitionToken> {
        let Some((token, progress)) = self.clock.progress(pending, now) else {
            self.from = None;
            self.current = target;
            return None;
        };

        let from = match self.from {
            Some((running, from)) if running == token => from,
            _ => {
                self.from = Some((token, self.current));
                self.current
            }
        };

        self.current = from.lerp(target, ease_in_out(progress));
        (progress >= 1.0).then_some(token)
    }
}
