//! The classic four-pad panel configuration.
//!
//! Red carries the lowest tone and blue the highest, rising in 100 Hz steps.

use crate::game::RecallGame;
use crate::types::Pad;
use palette::Srgb;

/// Signal color of the red pad.
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);

/// Signal color of the yellow pad.
pub const YELLOW: Srgb = Srgb::new(1.0, 1.0, 0.0);

/// Signal color of the green pad.
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);

/// Signal color of the blue pad.
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);

/// The classic panel: red, yellow, green and blue pads with tones from
/// 300 Hz to 600 Hz.
pub const CLASSIC_PADS: [Pad; 4] = [
    Pad::new(RED, 300),
    Pad::new(YELLOW, 400),
    Pad::new(GREEN, 500),
    Pad::new(BLUE, 600),
];

/// Maximum level of the classic game.
pub const CLASSIC_MAX_LEVEL: usize = 15;

/// A [`RecallGame`] over the classic four pads, capped at fifteen levels.
pub type ClassicGame<'t, I, T, P, B, V, R> =
    RecallGame<'t, I, T, P, B, V, R, 4, CLASSIC_MAX_LEVEL>;
