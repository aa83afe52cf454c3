#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`RecallGame`**: Runs one complete game: machine playback, player input, animations
//! - **`Pad`**: One panel pad's signal color and tone frequency
//! - **`Choice`**: Index of a pad, as stored in the issued sequence
//! - **`GameSequence`**: The growing sequence the player has to echo back
//! - **`GamePhase`**: Which part of the turn cycle the game is in
//! - **`PressOutcome`**: What a submitted press did
//! - **`Cue`**: One timed lamp/tone step; the fixed animations are tables of these
//! - **`GamePanel` / `Buzzer` / `LevelDisplay`**: Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! The library uses `Srgb<f32>` (0.0-1.0 range) for pad colors. When
//! implementing `GamePanel` for your hardware, convert these values to your
//! device's native format (e.g., 8-bit integers, PWM duty cycles).

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod game;
pub mod pads;
pub mod sequence;
pub mod signal;
pub mod time;
pub mod types;

pub use game::{
    FANFARE_GAP_MS, FANFARE_LEAD_IN_MS, FANFARE_SIGNAL_MS, FEEDBACK_MS, LEAD_IN_MS,
    LevelDisplay, MISMATCH_PAUSE_MS, RecallGame, SIGNAL_GAP_MS, SIGNAL_MS,
};
pub use pads::{BLUE, CLASSIC_MAX_LEVEL, CLASSIC_PADS, ClassicGame, GREEN, RED, YELLOW};
pub use sequence::GameSequence;
pub use signal::{Buzzer, Cue, GAME_OVER_FLASH, GamePanel, Lamp, SUCCESS_FLOURISH, Tone};
pub use time::{TimeDuration, TimeInstant, TimeSource, Wait};
pub use types::{Choice, GameError, GamePhase, Pad, PressOutcome, ServiceTiming};

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
