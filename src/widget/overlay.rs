//! Dimming overlay shown behind the modal
//!
//! At most one overlay exists at a time. It is created on the first open,
//! reused by later opens while it is still up, and removed together with
//! the modal.

use super::modal::Phase;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub phase: Phase,
}

impl Overlay {
    /// New overlay, fading in from `now`
    pub fn new(now: Instant) -> Self {
        Self {
            phase: Phase::Opening { since: now },
        }
    }

    /// Shown and not on its way out
    pub fn is_visible(&self) -> bool {
        !self.phase.is_closing()
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        self.phase.opacity(now)
    }

    pub fn fade_out(&mut self, now: Instant) {
        if !self.phase.is_closing() {
            self.phase = Phase::Closing { since: now };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::modal::FADE_OUT;

    #[test]
    fn test_fade_out_hides_immediately() {
        let now = Instant::now();
        let mut overlay = Overlay::new(now);
        assert!(overlay.is_visible());
        overlay.fade_out(now);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_fade_out_does_not_restart() {
        let now = Instant::now();
        let mut overlay = Overlay::new(now);
        overlay.fade_out(now);
        overlay.fade_out(now + FADE_OUT);
        assert_eq!(overlay.phase, Phase::Closing { since: now });
    }
}
