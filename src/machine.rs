// The machine layer: owns the pattern store, the transport, and the mixer /
// effect flags. The TUI feeds it semantic InputEvents and reads DisplayState
// back; everything audible leaves here as AudioCommands for the engine.

use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::{AudioCommand, EffectParam};
use crate::model::{PRESETS, Track, default_tracks, find_preset, random_preset};
use crate::shared::{DisplayState, EffectKind, InputEvent, StepEvent, TrackView};
use crate::transport::Transport;

/// Probability that randomize() flips any given step of the base pattern.
const STEP_FLIP_PROB: f32 = 0.10;
/// Randomize() jitters volume and pitch by a signed amount in this range.
const JITTER: i32 = 5;

// Effect settings pushed to the engine when an effect is switched on.
const REVERB_DECAY: f32 = 1.5;
const DISTORTION_AMOUNT: f32 = 0.3;
const DELAY_TIME: f32 = 0.5;
const DELAY_FEEDBACK: f32 = 0.5;

pub struct DrumMachine {
    tracks: Vec<Track>,
    transport: Transport,
    master_volume: f32,
    reverb_on: bool,
    distortion_on: bool,
    delay_on: bool,
    preset_cursor: usize,
    last_preset: Option<&'static str>,
    subscribers: Vec<Sender<StepEvent>>,
}

impl DrumMachine {
    pub fn new() -> Self {
        Self {
            tracks: default_tracks(),
            transport: Transport::new(),
            master_volume: crate::shared::DEFAULT_MASTER_VOLUME,
            reverb_on: false,
            distortion_on: false,
            delay_on: false,
            preset_cursor: 0,
            last_preset: None,
            subscribers: Vec::new(),
        }
    }

    /// Commands that bring a fresh engine in line with this machine's state.
    pub fn initial_commands(&self) -> Vec<AudioCommand> {
        vec![AudioCommand::SetMasterVolume(self.master_volume)]
    }

    /// Register a step observer. Events arrive on every advance and on stop;
    /// a dropped receiver unsubscribes itself.
    pub fn subscribe(&mut self) -> Receiver<StepEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: StepEvent) {
        self.subscribers.retain(|s| s.send(event).is_ok());
    }

    /// Advance the clock by `elapsed` seconds and collect the triggers due.
    pub fn tick(&mut self, elapsed: f64) -> Vec<AudioCommand> {
        let ticks = self.transport.tick(elapsed, &self.tracks);
        let mut cmds = Vec::new();
        for tick in ticks {
            self.notify(StepEvent::Advanced(tick.step));
            cmds.extend(tick.triggers.into_iter().map(AudioCommand::Trigger));
        }
        cmds
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        match event {
            InputEvent::TogglePlay => {
                if self.transport.is_playing() {
                    self.transport.stop();
                    self.notify(StepEvent::Stopped);
                } else {
                    self.transport.play();
                }
                Vec::new()
            }
            InputEvent::AdjustBpm(delta) => {
                let bpm = self.transport.bpm() as i32 + delta;
                self.transport.set_bpm(bpm.max(0) as u32);
                Vec::new()
            }
            InputEvent::ToggleStep { track, step } => {
                if let Some(t) = self.tracks.get_mut(track) {
                    if let Some(s) = t.steps.get_mut(step) {
                        *s ^= 1;
                    }
                }
                Vec::new()
            }
            InputEvent::AdjustVolume { track, delta } => {
                if let Some(t) = self.tracks.get_mut(track) {
                    t.volume = (t.volume as i32 + delta).clamp(0, 100) as u8;
                }
                Vec::new()
            }
            InputEvent::AdjustPitch { track, delta } => {
                if let Some(t) = self.tracks.get_mut(track) {
                    t.pitch = (t.pitch as i32 + delta).clamp(0, 100) as u8;
                }
                Vec::new()
            }
            InputEvent::Clear => {
                self.clear();
                Vec::new()
            }
            InputEvent::Randomize => {
                self.randomize();
                Vec::new()
            }
            InputEvent::CyclePreset => {
                let name = PRESETS[self.preset_cursor].name;
                self.preset_cursor = (self.preset_cursor + 1) % PRESETS.len();
                self.apply_preset(name);
                Vec::new()
            }
            InputEvent::AdjustMasterVolume(delta) => {
                self.master_volume = (self.master_volume + delta).clamp(0.0, 1.0);
                vec![AudioCommand::SetMasterVolume(self.master_volume)]
            }
            InputEvent::ToggleEffect(kind) => {
                let flag = match kind {
                    EffectKind::Reverb => &mut self.reverb_on,
                    EffectKind::Distortion => &mut self.distortion_on,
                    EffectKind::Delay => &mut self.delay_on,
                };
                *flag = !*flag;
                let mut cmds = Vec::new();
                if *flag {
                    // push the panel settings with the enable, so the engine
                    // node comes up configured
                    cmds.extend(match kind {
                        EffectKind::Reverb => vec![AudioCommand::SetEffectParam(
                            kind,
                            EffectParam::Decay,
                            REVERB_DECAY,
                        )],
                        EffectKind::Distortion => vec![AudioCommand::SetEffectParam(
                            kind,
                            EffectParam::Amount,
                            DISTORTION_AMOUNT,
                        )],
                        EffectKind::Delay => vec![
                            AudioCommand::SetEffectParam(kind, EffectParam::Time, DELAY_TIME),
                            AudioCommand::SetEffectParam(
                                kind,
                                EffectParam::Feedback,
                                DELAY_FEEDBACK,
                            ),
                        ],
                    });
                }
                cmds.push(AudioCommand::SetEffectEnabled(kind, *flag));
                cmds
            }
            // main's concern, not ours
            InputEvent::CycleTheme | InputEvent::Quit => Vec::new(),
        }
    }

    /// Replace the live pattern with a value-copy of the named preset; a
    /// preset with a tempo also sets BPM. Unknown names clear the grid and
    /// leave the tempo alone.
    pub fn apply_preset(&mut self, name: &str) {
        match find_preset(name) {
            Some(preset) => {
                for (track, row) in self.tracks.iter_mut().zip(preset.rows.iter()) {
                    track.steps = *row;
                }
                if let Some(bpm) = preset.bpm {
                    self.transport.set_bpm(bpm);
                }
                self.last_preset = Some(preset.name);
            }
            None => {
                for track in &mut self.tracks {
                    track.clear_steps();
                }
                self.last_preset = None;
            }
        }
    }

    /// Start from a random preset, flip ~10% of its steps, and jitter each
    /// track's volume/pitch by up to ±5. Live tracks beyond the preset's
    /// rows are left alone, and the preset table itself is never touched.
    pub fn randomize(&mut self) {
        let base = random_preset();
        for (track, row) in self.tracks.iter_mut().zip(base.rows.iter()) {
            track.steps = *row;
            for step in &mut track.steps {
                if fastrand::f32() < STEP_FLIP_PROB {
                    *step ^= 1;
                }
            }
            track.volume =
                (track.volume as i32 + fastrand::i32(-JITTER..=JITTER)).clamp(0, 100) as u8;
            track.pitch =
                (track.pitch as i32 + fastrand::i32(-JITTER..=JITTER)).clamp(0, 100) as u8;
        }
        self.last_preset = Some(base.name);
    }

    pub fn clear(&mut self) {
        for track in &mut self.tracks {
            track.clear_steps();
        }
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            tracks: self
                .tracks
                .iter()
                .map(|t| TrackView {
                    label: t.label.clone(),
                    steps: t.steps,
                    volume: t.volume,
                    pitch: t.pitch,
                })
                .collect(),
            current_step: self.transport.current_step(),
            playing: self.transport.is_playing(),
            bpm: self.transport.bpm(),
            master_volume: self.master_volume,
            reverb_on: self.reverb_on,
            distortion_on: self.distortion_on,
            delay_on: self.delay_on,
            preset_name: self.last_preset,
        }
    }
}

impl Default for DrumMachine {
    fn default() -> Self {
        Self::new()
    }
}
