//! Shared test infrastructure for sequence-recall integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sequence_recall::{
    Buzzer, CLASSIC_PADS, Choice, GamePanel, LevelDisplay, PressOutcome, RecallGame,
    ServiceTiming, TimeDuration, TimeInstant, TimeSource,
};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Recording Output Mocks
// ============================================================================
//
// The game takes ownership of its collaborators, so each mock shares its
// recording with the test through an Rc handle taken before construction.

/// One observable panel action, in the order the game performed them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    /// `show_signal(choice, color)`
    Signal(Choice, Srgb),
    /// `clear_signal()`
    Clear,
    /// `set_input_enabled(enabled)`
    Gate(bool),
}

/// Mock panel that records every call
pub struct MockPanel {
    events: Rc<RefCell<Vec<PanelEvent>>>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<Vec<PanelEvent>>> {
        Rc::clone(&self.events)
    }
}

impl GamePanel for MockPanel {
    fn show_signal(&mut self, choice: Choice, color: Srgb) {
        self.events.borrow_mut().push(PanelEvent::Signal(choice, color));
    }

    fn clear_signal(&mut self) {
        self.events.borrow_mut().push(PanelEvent::Clear);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.events.borrow_mut().push(PanelEvent::Gate(enabled));
    }
}

/// Mock buzzer that records `(frequency_hz, duration_ms)` pairs
pub struct MockBuzzer {
    tones: Rc<RefCell<Vec<(u16, u32)>>>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self {
            tones: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<Vec<(u16, u32)>>> {
        Rc::clone(&self.tones)
    }
}

impl Buzzer for MockBuzzer {
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32) {
        self.tones.borrow_mut().push((frequency_hz, duration_ms));
    }
}

/// Mock level readout that records every shown level
pub struct MockDisplay {
    levels: Rc<RefCell<Vec<usize>>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            levels: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<Vec<usize>>> {
        Rc::clone(&self.levels)
    }
}

impl LevelDisplay for MockDisplay {
    fn show_level(&mut self, level: usize) {
        self.levels.borrow_mut().push(level);
    }
}

// ============================================================================
// Game Construction
// ============================================================================

/// The game type every integration test drives: classic pads, mock outputs,
/// seeded RNG. `N` stays a parameter so win tests can use short games.
pub type TestGame<'t, const N: usize> = RecallGame<
    't,
    TestInstant,
    MockTimeSource,
    MockPanel,
    MockBuzzer,
    MockDisplay,
    ChaCha8Rng,
    4,
    N,
>;

/// Handles onto the recordings of all three output mocks.
pub struct GameLogs {
    pub panel: Rc<RefCell<Vec<PanelEvent>>>,
    pub tones: Rc<RefCell<Vec<(u16, u32)>>>,
    pub levels: Rc<RefCell<Vec<usize>>>,
}

impl GameLogs {
    pub fn panel_events(&self) -> Vec<PanelEvent> {
        self.panel.borrow().clone()
    }

    /// The choices lit so far, in order, ignoring clears and gate changes.
    pub fn signal_choices(&self) -> Vec<Choice> {
        self.panel
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PanelEvent::Signal(choice, _) => Some(*choice),
                _ => None,
            })
            .collect()
    }

    /// The gate changes seen so far, in order.
    pub fn gate_changes(&self) -> Vec<bool> {
        self.panel
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PanelEvent::Gate(enabled) => Some(*enabled),
                _ => None,
            })
            .collect()
    }

    pub fn tones(&self) -> Vec<(u16, u32)> {
        self.tones.borrow().clone()
    }

    pub fn levels(&self) -> Vec<usize> {
        self.levels.borrow().clone()
    }

    /// Forgets everything recorded so far, scoping later assertions to the
    /// part of the game that follows.
    pub fn forget(&self) {
        self.panel.borrow_mut().clear();
        self.tones.borrow_mut().clear();
        self.levels.borrow_mut().clear();
    }
}

/// Builds a game over the classic pads with a deterministic RNG.
pub fn classic_game<const N: usize>(
    timer: &MockTimeSource,
    seed: u64,
) -> (TestGame<'_, N>, GameLogs) {
    let panel = MockPanel::new();
    let buzzer = MockBuzzer::new();
    let display = MockDisplay::new();
    let logs = GameLogs {
        panel: panel.log(),
        tones: buzzer.log(),
        levels: display.log(),
    };

    let game = RecallGame::new(
        CLASSIC_PADS,
        panel,
        buzzer,
        display,
        timer,
        ChaCha8Rng::seed_from_u64(seed),
    );

    (game, logs)
}

// ============================================================================
// Drivers
// ============================================================================

/// Follows the game's own timing hints until it reports `Idle`.
///
/// Ends in `PlayerTurn` (waiting on input) or `AwaitingStart`.
pub fn run_until_idle<const N: usize>(game: &mut TestGame<'_, N>, timer: &MockTimeSource) {
    while let ServiceTiming::Delay(delay) = game.service() {
        timer.advance(delay);
    }
}

/// Advances the clock by `millis` and services once.
pub fn tick<const N: usize>(game: &mut TestGame<'_, N>, timer: &MockTimeSource, millis: u64) {
    timer.advance(TestDuration(millis));
    game.service();
}

/// Presses the whole issued sequence, correctly and back to back.
///
/// Returns the outcome of the final press.
pub fn echo_sequence<const N: usize>(game: &mut TestGame<'_, N>) -> PressOutcome {
    let sequence: Vec<Choice> = game.sequence().to_vec();
    let mut last = PressOutcome::Ignored;
    for choice in sequence {
        last = game.press(choice);
    }
    last
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use sequence_recall::{BLUE, GREEN, RED, YELLOW};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
