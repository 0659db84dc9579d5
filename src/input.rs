//! Per-frame input intent
//!
//! The host samples its devices once per display refresh and hands the
//! simulation a `FrameInput`. Movement intents are level-triggered; the
//! `*_pressed` intents are edge-triggered (true only on the frame the control
//! went from released to pressed).

use serde::{Deserialize, Serialize};

/// Normalized input intents for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
    pub fire_pressed: bool,
    pub pause_pressed: bool,
    pub confirm_pressed: bool,
}

impl FrameInput {
    /// Horizontal intent: -1, 0 or +1 (both held cancels out)
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Raw held state of each control, as reported by the device layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
    pub pause: bool,
    pub confirm: bool,
}

/// Turns held-control snapshots into edge-triggered `FrameInput`s
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: HeldControls,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce this frame's intents and remember `held` for the next call
    pub fn sample(&mut self, held: HeldControls) -> FrameInput {
        let prev = self.previous;
        self.previous = held;
        FrameInput {
            move_left: held.left,
            move_right: held.right,
            jump_pressed: held.jump && !prev.jump,
            fire_pressed: held.fire && !prev.fire,
            pause_pressed: held.pause && !prev.pause,
            confirm_pressed: held.confirm && !prev.confirm,
        }
    }

    /// Forget held state (e.g. after focus loss)
    pub fn reset(&mut self) {
        self.previous = HeldControls::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_fires_once_while_held() {
        let mut edges = EdgeDetector::new();
        let held = HeldControls {
            jump: true,
            ..Default::default()
        };

        assert!(edges.sample(held).jump_pressed);
        assert!(!edges.sample(held).jump_pressed);
        assert!(!edges.sample(held).jump_pressed);

        // Release then press again
        edges.sample(HeldControls::default());
        assert!(edges.sample(held).jump_pressed);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut edges = EdgeDetector::new();
        let held = HeldControls {
            right: true,
            ..Default::default()
        };
        for _ in 0..3 {
            let input = edges.sample(held);
            assert!(input.move_right);
            assert_eq!(input.horizontal(), 1.0);
        }
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let input = FrameInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_reset_rearms_edges() {
        let mut edges = EdgeDetector::new();
        let held = HeldControls {
            confirm: true,
            ..Default::default()
        };
        assert!(edges.sample(held).confirm_pressed);
        edges.reset();
        assert!(edges.sample(held).confirm_pressed);
    }
}
