// Shared constants and the types that cross layer boundaries: semantic input
// events (resolved by the TUI), the per-frame display snapshot, and the step
// events the machine publishes to subscribers.
//
// The idea of the rendering process: only the machine layer holds sequencer
// and parameter state. Each frame the TUI calls `machine.display_state()` and
// draws whatever that says — grid cells, playhead column, BPM, effect flags.
// The TUI never reaches into the pattern itself.

pub const NUM_STEPS: usize = 16;
pub const NUM_TRACKS: usize = 5;

pub const MIN_BPM: u32 = 40;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 120;

pub const DEFAULT_MASTER_VOLUME: f32 = 0.7;

/// Semantic input events. The TUI resolves raw key presses (plus its own
/// selected-track cursor) into these; the machine never sees key codes.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // transport
    TogglePlay,
    AdjustBpm(i32),

    // grid / per-track edits
    ToggleStep { track: usize, step: usize },
    AdjustVolume { track: usize, delta: i32 },
    AdjustPitch { track: usize, delta: i32 },

    // whole-pattern operations
    Clear,
    Randomize,
    CyclePreset,

    // mixer / effects
    AdjustMasterVolume(f32),
    ToggleEffect(EffectKind),

    // handled by main, not the machine
    CycleTheme,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Reverb,
    Distortion,
    Delay,
}

impl EffectKind {
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Reverb => "Reverb",
            EffectKind::Distortion => "Dist",
            EffectKind::Delay => "Delay",
        }
    }
}

/// Published on every step advance and on stop. Subscribers get these over a
/// crossbeam channel; the TUI just polls `DisplayState` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Advanced(usize),
    Stopped,
}

/// Read-only snapshot of one track for rendering.
#[derive(Clone, Debug)]
pub struct TrackView {
    pub label: String,
    pub steps: [u8; NUM_STEPS],
    pub volume: u8,
    pub pitch: u8,
}

/// Everything the TUI needs to draw a frame.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub tracks: Vec<TrackView>,
    /// `None` while stopped (and between play and the first tick).
    pub current_step: Option<usize>,
    pub playing: bool,
    pub bpm: u32,
    pub master_volume: f32,
    pub reverb_on: bool,
    pub distortion_on: bool,
    pub delay_on: bool,
    /// Name of the most recently applied preset, if any.
    pub preset_name: Option<&'static str>,
}
