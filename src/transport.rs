// The step clock. Owns the playing/stopped state and the cyclic 0..15
// position; the machine drives it with elapsed wall time from the event loop
// and forwards the triggers it emits to the audio engine.
//
// Timing model: an accumulator crosses step boundaries every
// (60 / bpm) / 4 seconds. BPM is read fresh at every boundary, so a tempo
// change takes effect on the next boundary at the latest and can never
// double-fire or skip a step. A stalled loop iteration just crosses several
// boundaries in one call — steps are never dropped.

use crate::audio_api::TriggerParams;
use crate::model::{Track, pitch_rate, sound_name};
use crate::shared::{DEFAULT_BPM, MAX_BPM, MIN_BPM, NUM_STEPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Stopped,
    Running,
}

/// One crossed step boundary: the step that just became current, plus the
/// triggers for every track active at that step (in track order).
#[derive(Clone, Debug)]
pub struct StepTick {
    pub step: usize,
    pub triggers: Vec<TriggerParams>,
}

pub struct Transport {
    bpm: u32,
    state: State,
    /// Published position. None while stopped, and between play and the
    /// first tick.
    position: Option<usize>,
    /// Seconds accumulated toward the next boundary.
    accumulator: f64,
    /// Set by play(); makes the first tick fire step 0 without waiting a
    /// full interval, matching how the transport audibly starts at once.
    start_pending: bool,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            state: State::Stopped,
            position: None,
            accumulator: 0.0,
            start_pending: false,
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Out-of-range values are clamped; takes effect on the next boundary.
    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
    }

    pub fn is_playing(&self) -> bool {
        self.state == State::Running
    }

    pub fn current_step(&self) -> Option<usize> {
        self.position
    }

    /// Sixteenth-note duration at the current tempo.
    pub fn step_interval(&self) -> f64 {
        (60.0 / self.bpm as f64) / 4.0
    }

    /// Start (or restart) from step 0. Any schedule already in flight is
    /// cancelled first so two schedules can never overlap.
    pub fn play(&mut self) {
        self.stop();
        self.state = State::Running;
        self.start_pending = true;
    }

    /// Idempotent. After this returns, no further tick can fire.
    pub fn stop(&mut self) {
        self.state = State::Stopped;
        self.position = None;
        self.accumulator = 0.0;
        self.start_pending = false;
    }

    /// Advance by `elapsed` seconds of wall time. Reads the pattern live, so
    /// edits made since the previous call affect the very next boundary.
    pub fn tick(&mut self, elapsed: f64, pattern: &[Track]) -> Vec<StepTick> {
        if self.state != State::Running {
            return Vec::new();
        }

        let mut ticks = Vec::new();
        if self.start_pending {
            self.start_pending = false;
            ticks.push(self.advance(pattern));
        }

        self.accumulator += elapsed;
        loop {
            let interval = self.step_interval();
            if self.accumulator < interval {
                break;
            }
            self.accumulator -= interval;
            ticks.push(self.advance(pattern));
        }
        ticks
    }

    fn advance(&mut self, pattern: &[Track]) -> StepTick {
        let step = match self.position {
            Some(p) => (p + 1) % NUM_STEPS,
            None => 0,
        };
        self.position = Some(step);

        let triggers = pattern
            .iter()
            .filter(|t| t.steps[step] != 0)
            .map(|t| TriggerParams {
                sound: sound_name(&t.id),
                gain: t.volume.min(100) as f32 / 100.0,
                rate: pitch_rate(t.pitch),
            })
            .collect();

        StepTick { step, triggers }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
