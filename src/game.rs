//! Turn controller for the memory game.
//!
//! Provides [`RecallGame`] which runs the full turn cycle of a single game:
//! replaying the growing sequence, validating player presses, and pacing the
//! timed animations in between. Also defines the [`LevelDisplay`] trait for
//! the level readout.

use crate::sequence::GameSequence;
use crate::signal::{Buzzer, Cue, GAME_OVER_FLASH, GamePanel, SUCCESS_FLOURISH};
use crate::time::{TimeDuration, TimeInstant, TimeSource, Wait};
use crate::types::{Choice, GameError, GamePhase, Pad, PressOutcome, ServiceTiming};
use rand::RngCore;

/// Duration of one sequence signal during machine playback.
pub const SIGNAL_MS: u32 = 400;

/// Dark gap between machine playback signals, including after the last one.
pub const SIGNAL_GAP_MS: u32 = 200;

/// Pause between announcing a level and replaying the sequence.
pub const LEAD_IN_MS: u32 = 1000;

/// Duration of the feedback signal confirming a correct press.
pub const FEEDBACK_MS: u32 = 150;

/// Dark pause between a wrong press and the restart flash.
pub const MISMATCH_PAUSE_MS: u32 = 500;

/// Pause between the winning press and the first fanfare signal.
pub const FANFARE_LEAD_IN_MS: u32 = 500;

/// Duration of each signal in the win fanfare sweep.
pub const FANFARE_SIGNAL_MS: u32 = 150;

/// Dark gap between win fanfare signals.
pub const FANFARE_GAP_MS: u32 = 50;

/// Trait for abstracting the level readout.
///
/// Implement this for whatever announces the level: a seven-segment display,
/// a character LCD, a log line. Called once per level change, including the
/// reset to zero when a new game opens. Handle any hardware errors
/// internally - this method cannot fail.
pub trait LevelDisplay {
    /// Shows the current level.
    fn show_level(&mut self, level: usize);
}

/// A signal currently lit, waiting for its clear deadline.
#[derive(Debug, Clone, Copy)]
struct ActiveSignal<I: TimeInstant> {
    wait: Wait<I>,
    /// Machine-paced signals chain the next playback step when they clear.
    /// Press feedback does not.
    streamed: bool,
}

/// Progress through one of the fixed animation tables.
#[derive(Debug, Clone, Copy)]
struct AnimationCursor {
    steps: &'static [Cue],
    position: usize,
}

/// Runs a Simon-style memory game over a set of pads.
///
/// The game owns its output collaborators and draws time from a shared time
/// source. It never blocks: every pause in the turn cycle is held as a
/// pending [`Wait`] and resolved by [`service`](RecallGame::service), so the
/// controller can share a thread with the rest of the firmware.
///
/// Two deadlines can be pending at once: the clear deadline of a lit signal
/// and the next turn step. They resolve independently, which is what lets a
/// press feedback flash finish while the success flourish is already playing.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `P` - Panel implementation type
/// * `B` - Buzzer implementation type
/// * `V` - Level display implementation type
/// * `R` - Random number generator type
/// * `C` - Number of pads on the panel
/// * `N` - Maximum level; capacity of the sequence store
pub struct RecallGame<
    't,
    I: TimeInstant,
    T: TimeSource<I>,
    P: GamePanel,
    B: Buzzer,
    V: LevelDisplay,
    R: RngCore,
    const C: usize,
    const N: usize,
> {
    pads: [Pad; C],
    panel: P,
    buzzer: B,
    display: V,
    time_source: &'t T,
    rng: R,
    phase: GamePhase,
    sequence: GameSequence<N>,
    level: usize,
    step: usize,
    input_enabled: bool,
    turn_wait: Option<Wait<I>>,
    active_signal: Option<ActiveSignal<I>>,
    animation: Option<AnimationCursor>,
    playback_pos: usize,
}

impl<
    't,
    I: TimeInstant,
    T: TimeSource<I>,
    P: GamePanel,
    B: Buzzer,
    V: LevelDisplay,
    R: RngCore,
    const C: usize,
    const N: usize,
> RecallGame<'t, I, T, P, B, V, R, C, N>
{
    /// Creates a new idle game with the panel darkened, the input gate closed
    /// and the level readout zeroed.
    pub fn new(
        pads: [Pad; C],
        mut panel: P,
        buzzer: B,
        mut display: V,
        time_source: &'t T,
        rng: R,
    ) -> Self {
        panel.clear_signal();
        panel.set_input_enabled(false);
        display.show_level(0);

        Self {
            pads,
            panel,
            buzzer,
            display,
            time_source,
            rng,
            phase: GamePhase::AwaitingStart,
            sequence: GameSequence::new(),
            level: 0,
            step: 0,
            input_enabled: false,
            turn_wait: None,
            active_signal: None,
            animation: None,
            playback_pos: 0,
        }
    }

    /// Starts a new game.
    ///
    /// Resets the counters, plays the restart flash and then issues level one.
    /// Must be called from `AwaitingStart`; a start request arriving while a
    /// game is in progress is rejected rather than restarting mid-turn.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming)` - When to service next
    /// * `Err` - A game is already in progress
    pub fn start(&mut self) -> Result<ServiceTiming<I::Duration>, GameError> {
        if self.phase != GamePhase::AwaitingStart {
            return Err(GameError::InvalidPhase {
                expected: "AwaitingStart",
                actual: self.phase,
            });
        }

        let now = self.time_source.now();
        self.begin_opening(now);
        Ok(self.timing_hint(now))
    }

    /// Submits a player choice.
    ///
    /// Presses are only processed while the input gate is open during the
    /// player's turn; at any other point they are discarded as `Ignored`.
    /// A correct press relights the chosen signal briefly as feedback. A
    /// wrong press ends the game: the sequence is cleared on the spot and a
    /// new game opens after a short pause.
    ///
    /// Several presses may arrive within one signal's duration; each replaces
    /// the previous feedback signal, so timers never stack.
    pub fn press(&mut self, choice: Choice) -> PressOutcome {
        if self.phase != GamePhase::PlayerTurn || !self.input_enabled {
            return PressOutcome::Ignored;
        }

        debug_assert!(choice.index() < C, "choice outside the pad table");

        let Some(expected) = self.sequence.get(self.step) else {
            // The gate is only open while step < level. Treat a violation as
            // spurious input rather than reading past the sequence.
            return PressOutcome::Ignored;
        };

        let now = self.time_source.now();

        if choice != expected {
            self.set_input_gate(false);
            self.sequence.clear();
            self.phase = GamePhase::MismatchPause;
            self.turn_wait = Some(Wait::new(now, MISMATCH_PAUSE_MS as u64));
            return PressOutcome::Mismatched;
        }

        self.show_feedback(choice, now);
        self.step += 1;

        if self.step < self.level {
            return PressOutcome::Matched;
        }

        // Level cleared. The gate closes until the next player turn.
        self.set_input_gate(false);

        if self.sequence.is_full() {
            self.phase = GamePhase::WinFanfare;
            self.playback_pos = 0;
            self.turn_wait = Some(Wait::new(now, FANFARE_LEAD_IN_MS as u64));
            PressOutcome::Won
        } else {
            self.phase = GamePhase::LevelComplete;
            self.begin_animation(&SUCCESS_FLOURISH, now);
            PressOutcome::LevelCleared
        }
    }

    /// Services the game, resolving every deadline that has elapsed.
    ///
    /// Safe to call at any time from any phase; a call with nothing pending
    /// does nothing. If servicing ran late the game catches up, applying the
    /// missed transitions in order.
    ///
    /// # Returns
    /// * `ServiceTiming::Delay(d)` - A deadline is pending; service again after at most `d`
    /// * `ServiceTiming::Idle` - Nothing scheduled; service again after the next `start` or `press`
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        let now = self.time_source.now();

        loop {
            let mut progressed = false;

            if let Some(signal) = self.active_signal {
                if signal.wait.is_elapsed(now) {
                    self.active_signal = None;
                    self.on_signal_cleared(signal);
                    progressed = true;
                }
            }

            if let Some(wait) = self.turn_wait {
                if wait.is_elapsed(now) {
                    self.turn_wait = None;
                    self.on_wait_elapsed(wait);
                    progressed = true;
                }
            }

            if !progressed {
                break;
            }
        }

        self.timing_hint(now)
    }

    /// Abandons whatever is in progress and returns to `AwaitingStart`.
    ///
    /// Clears the sequence and counters, darkens the panel, closes the input
    /// gate and zeroes the level readout. Can be called from any phase.
    pub fn reset(&mut self) {
        self.phase = GamePhase::AwaitingStart;
        self.sequence.clear();
        self.level = 0;
        self.step = 0;
        self.playback_pos = 0;
        self.turn_wait = None;
        self.active_signal = None;
        self.animation = None;

        self.set_input_gate(false);
        self.panel.clear_signal();
        self.display.show_level(0);
    }

    /// Returns the current phase of the game.
    pub fn get_phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the current level.
    ///
    /// This is the length of the issued sequence. It holds its value through
    /// the mismatch pause and resets when the restart flash begins.
    pub fn current_level(&self) -> usize {
        self.level
    }

    /// Returns the player's progress through the current level.
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Returns the issued sequence, oldest choice first.
    pub fn sequence(&self) -> &[Choice] {
        self.sequence.as_slice()
    }

    /// Returns the pad table the game was built with.
    pub fn pads(&self) -> &[Pad; C] {
        &self.pads
    }

    /// Returns the maximum level of this game.
    pub fn max_level(&self) -> usize {
        N
    }

    /// Returns true while presses are accepted.
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Returns true while the game waits for the player to echo the sequence.
    pub fn is_player_turn(&self) -> bool {
        self.phase == GamePhase::PlayerTurn
    }

    /// Returns true while the game is idle and `start` would be accepted.
    pub fn is_awaiting_start(&self) -> bool {
        self.phase == GamePhase::AwaitingStart
    }

    /// Opens a new game: counters zeroed, restart flash scheduled.
    fn begin_opening(&mut self, anchor: I) {
        self.sequence.clear();
        self.level = 0;
        self.step = 0;
        self.playback_pos = 0;
        self.display.show_level(0);
        self.phase = GamePhase::GameOverAnimation;
        self.begin_animation(&GAME_OVER_FLASH, anchor);
    }

    /// Issues the next level and schedules the machine turn.
    fn advance_level(&mut self, anchor: I) {
        self.set_input_gate(false);

        if self.sequence.append_random(&mut self.rng, C).is_err() {
            // Store at capacity. Normal play never gets here: clearing the
            // final level goes through the win fanfare instead.
            self.phase = GamePhase::AwaitingStart;
            return;
        }

        self.level = self.sequence.len();
        self.display.show_level(self.level);
        self.phase = GamePhase::MachineTurn;
        self.playback_pos = 0;
        self.turn_wait = Some(Wait::new(anchor, LEAD_IN_MS as u64));
    }

    /// Applies the first cue of an animation table and schedules the rest.
    fn begin_animation(&mut self, steps: &'static [Cue], anchor: I) {
        steps[0].apply(&self.pads, &mut self.panel, &mut self.buzzer);
        self.animation = Some(AnimationCursor { steps, position: 0 });
        self.turn_wait = Some(Wait::new(anchor, steps[0].millis as u64));
    }

    /// Moves to the next cue, or past the end of the animation.
    fn advance_animation(&mut self, anchor: I) {
        let Some(mut cursor) = self.animation.take() else {
            return;
        };

        cursor.position += 1;
        if let Some(cue) = cursor.steps.get(cursor.position) {
            cue.apply(&self.pads, &mut self.panel, &mut self.buzzer);
            self.turn_wait = Some(Wait::new(anchor, cue.millis as u64));
            self.animation = Some(cursor);
            return;
        }

        // Both animations end the same way: the next level is issued. For the
        // restart flash that is level one; for the flourish, the one after.
        self.advance_level(anchor);
    }

    /// Lights a machine-paced signal whose clear chains the next step.
    fn begin_stream_signal(&mut self, choice: Choice, millis: u32, anchor: I) {
        Cue::signal(choice, millis).apply(&self.pads, &mut self.panel, &mut self.buzzer);
        self.active_signal = Some(ActiveSignal {
            wait: Wait::new(anchor, millis as u64),
            streamed: true,
        });
    }

    /// Lights the press feedback signal.
    fn show_feedback(&mut self, choice: Choice, anchor: I) {
        Cue::signal(choice, FEEDBACK_MS).apply(&self.pads, &mut self.panel, &mut self.buzzer);
        self.active_signal = Some(ActiveSignal {
            wait: Wait::new(anchor, FEEDBACK_MS as u64),
            streamed: false,
        });
    }

    /// Hands the turn to the player.
    fn begin_player_turn(&mut self) {
        self.step = 0;
        self.phase = GamePhase::PlayerTurn;
        self.set_input_gate(true);
    }

    /// Opens or closes the input gate, notifying the panel only on change.
    fn set_input_gate(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            self.input_enabled = enabled;
            self.panel.set_input_enabled(enabled);
        }
    }

    /// Resolves an elapsed turn wait according to the current phase.
    fn on_wait_elapsed(&mut self, finished: Wait<I>) {
        let anchor = finished.deadline();

        match self.phase {
            GamePhase::GameOverAnimation | GamePhase::LevelComplete => {
                self.advance_animation(anchor);
            }
            GamePhase::MachineTurn => match self.sequence.get(self.playback_pos) {
                Some(choice) => self.begin_stream_signal(choice, SIGNAL_MS, anchor),
                None => self.begin_player_turn(),
            },
            GamePhase::WinFanfare => {
                if self.playback_pos < C {
                    let choice = Choice(self.playback_pos as u8);
                    self.begin_stream_signal(choice, FANFARE_SIGNAL_MS, anchor);
                } else {
                    self.phase = GamePhase::AwaitingStart;
                }
            }
            GamePhase::MismatchPause => self.begin_opening(anchor),
            // No turn waits are scheduled in these phases.
            GamePhase::AwaitingStart | GamePhase::PlayerTurn => {}
        }
    }

    /// Clears an expired signal and, for machine-paced signals, schedules the
    /// gap before the next step.
    fn on_signal_cleared(&mut self, signal: ActiveSignal<I>) {
        self.panel.clear_signal();

        if !signal.streamed {
            return;
        }

        let anchor = signal.wait.deadline();
        match self.phase {
            GamePhase::MachineTurn => {
                self.playback_pos += 1;
                self.turn_wait = Some(Wait::new(anchor, SIGNAL_GAP_MS as u64));
            }
            GamePhase::WinFanfare => {
                self.playback_pos += 1;
                self.turn_wait = Some(Wait::new(anchor, FANFARE_GAP_MS as u64));
            }
            _ => {}
        }
    }

    /// The earlier of the two pending deadlines, as a service delay.
    fn timing_hint(&self, now: I) -> ServiceTiming<I::Duration> {
        let signal = self.active_signal.map(|s| s.wait.remaining(now));
        let wait = self.turn_wait.map(|w| w.remaining(now));

        match (signal, wait) {
            (Some(a), Some(b)) => {
                if a.as_millis() <= b.as_millis() {
                    ServiceTiming::Delay(a)
                } else {
                    ServiceTiming::Delay(b)
                }
            }
            (Some(a), None) => ServiceTiming::Delay(a),
            (None, Some(b)) => ServiceTiming::Delay(b),
            (None, None) => ServiceTiming::Idle,
        }
    }
}
