//! Time-driven cosmetic effects
//!
//! Every function here is pure: it takes the time elapsed since some moment
//! the renderer remembers and returns how the effect should look right now.
//! Nothing in this module can see or touch game state.

use std::time::Duration;

/// Length of the "+1" pop-up after eating
pub const SCORE_POPUP: Duration = Duration::from_millis(830);
/// Rows the "+1" pop-up climbs over its lifetime
pub const SCORE_POPUP_RISE: f64 = 2.5;
/// Time for freshly placed food to grow to full size
pub const FOOD_APPEAR: Duration = Duration::from_millis(170);
/// Time for the game-over overlay to fade in
pub const GAME_OVER_FADE: Duration = Duration::from_millis(830);
/// Fade progress after which the final score is shown
pub const GAME_OVER_SCORE_DELAY: f64 = 0.3;

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn progress(elapsed: Duration, total: Duration) -> f64 {
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

fn snake_phase(elapsed: Duration) -> f64 {
    millis(elapsed) * 0.002
}

/// Size factor in `[0.9, 1.0]` for the snake segment at `index`
pub fn breath(elapsed: Duration, index: usize) -> f64 {
    (snake_phase(elapsed) + index as f64 * 0.2).sin() * 0.05 + 0.95
}

/// Hue in degrees for a body segment, cycling every five segments
pub fn body_hue(elapsed: Duration, index: usize) -> f64 {
    let position = (index % 5) as f64 / 5.0 + snake_phase(elapsed).sin() * 0.1;
    120.0 + position * 30.0
}

/// Whether the head's eyes are shut on this frame
pub fn blinking(elapsed: Duration) -> bool {
    (snake_phase(elapsed) * 5.0).sin() > 0.95
}

/// Size factor in `[1.0, 1.2]` for the pulsing food
pub fn food_pulse(elapsed: Duration) -> f64 {
    (millis(elapsed) * 0.006).sin() * 0.1 + 1.1
}

/// Growth of newly placed food, 0 when just placed and 1 once settled
pub fn food_appear(since_placed: Duration) -> f64 {
    progress(since_placed, FOOD_APPEAR)
}

/// Opacity and rise of the "+1" pop-up, or `None` once it has faded
pub fn score_popup(since_scored: Duration) -> Option<(f64, f64)> {
    if since_scored >= SCORE_POPUP {
        return None;
    }
    let p = progress(since_scored, SCORE_POPUP);
    Some((1.0 - p, p * SCORE_POPUP_RISE))
}

/// Fade-in of the game-over overlay
pub fn game_over_fade(since_over: Duration) -> f64 {
    progress(since_over, GAME_OVER_FADE)
}
