//! Horizontal camera
//!
//! Derived every frame from the player and the mode; never integrated.

/// Center on `player_center_x`, clamped so the view never leaves the level
pub fn follow(player_center_x: f32, viewport_width: f32, level_width: f32) -> f32 {
    let max = (level_width - viewport_width).max(0.0);
    (player_center_x - viewport_width * 0.5).clamp(0.0, max)
}

/// Camera offset for this frame. The boss arena pins the view to its left edge.
pub fn camera_x(
    boss_locked: bool,
    player_center_x: f32,
    viewport_width: f32,
    level_width: f32,
    boss_arena_x: f32,
) -> f32 {
    if boss_locked {
        boss_arena_x
    } else {
        follow(player_center_x, viewport_width, level_width)
    }
}
