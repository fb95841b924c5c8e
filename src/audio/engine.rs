use log::warn;

use crate::audio_api::{AudioCommand, EffectParam, TriggerParams};
use crate::shared::{DEFAULT_MASTER_VOLUME, EffectKind};

use super::effect::{Distortion, FeedbackDelay, Reverb};
use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;

// Hard cap so triggering never allocates in the audio callback; when every
// slot is busy the oldest voice is stolen.
const MAX_VOICES: usize = 16;

/// The sample playback engine. Lives inside the cpal output callback: drains
/// the command channel, renders the voice pool, runs the effect chain, and
/// applies master gain.
pub struct Engine {
    sounds: Vec<(String, SampleBuffer)>,
    voices: [Voice; MAX_VOICES],
    next_age: u64,
    master_volume: f32,
    reverb: Reverb,
    distortion: Distortion,
    delay: FeedbackDelay,
}

impl Engine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sounds: Vec::new(),
            voices: [Voice::idle(); MAX_VOICES],
            next_age: 0,
            master_volume: DEFAULT_MASTER_VOLUME,
            reverb: Reverb::new(sample_rate),
            distortion: Distortion::new(),
            delay: FeedbackDelay::new(sample_rate),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { name, buffer } => self.register(name, buffer),
            AudioCommand::Trigger(t) => self.trigger(t),
            AudioCommand::SetMasterVolume(v) => self.master_volume = v.clamp(0.0, 1.0),
            AudioCommand::SetEffectEnabled(kind, enabled) => match kind {
                EffectKind::Reverb => self.reverb.enabled = enabled,
                EffectKind::Distortion => self.distortion.enabled = enabled,
                EffectKind::Delay => self.delay.enabled = enabled,
            },
            AudioCommand::SetEffectParam(kind, param, value) => {
                self.set_effect_param(kind, param, value)
            }
        }
    }

    // Re-registering a name swaps the buffer in place so voice indices into
    // the table stay valid.
    fn register(&mut self, name: String, buffer: SampleBuffer) {
        match self.sounds.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = buffer,
            None => self.sounds.push((name, buffer)),
        }
    }

    fn trigger(&mut self, t: TriggerParams) {
        let Some(sound) = self.sounds.iter().position(|(n, _)| *n == t.sound) else {
            warn!("trigger for unloaded sound '{}'", t.sound);
            return;
        };

        let slot = self
            .voices
            .iter()
            .position(|v| !v.active)
            .unwrap_or_else(|| {
                // steal the oldest
                let mut oldest = 0;
                for (i, v) in self.voices.iter().enumerate() {
                    if v.age < self.voices[oldest].age {
                        oldest = i;
                    }
                }
                oldest
            });

        self.voices[slot] = Voice::start(sound, t.gain, t.rate, self.next_age);
        self.next_age += 1;
    }

    fn set_effect_param(&mut self, kind: EffectKind, param: EffectParam, value: f32) {
        match (kind, param) {
            (EffectKind::Reverb, EffectParam::Decay) => self.reverb.set_decay(value),
            (EffectKind::Distortion, EffectParam::Amount) => self.distortion.set_amount(value),
            (EffectKind::Delay, EffectParam::Time) => self.delay.set_time(value),
            (EffectKind::Delay, EffectParam::Feedback) => self.delay.set_feedback(value),
            (kind, param) => warn!("ignoring {param:?} for {}", kind.label()),
        }
    }

    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        for f in out.iter_mut() {
            *f = StereoFrame::zero();
        }

        for voice in self.voices.iter_mut().filter(|v| v.active) {
            let (_, buffer) = &self.sounds[voice.sound];
            voice.render_into(buffer, out);
        }

        self.distortion.process(out);
        self.delay.process(out);
        self.reverb.process(out);

        for f in out.iter_mut() {
            f.left *= self.master_volume;
            f.right *= self.master_volume;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_click() -> Engine {
        let mut engine = Engine::new(44100.0);
        let buffer = SampleBuffer {
            data: vec![StereoFrame::splat(1.0); 64],
        };
        engine.handle_cmd(AudioCommand::RegisterSample { name: "kick".into(), buffer });
        engine
    }

    fn render(engine: &mut Engine, frames: usize) -> Vec<StereoFrame> {
        let mut out = vec![StereoFrame::zero(); frames];
        engine.render_block(&mut out);
        out
    }

    #[test]
    fn trigger_plays_registered_sound() {
        let mut engine = engine_with_click();
        engine.handle_cmd(AudioCommand::Trigger(TriggerParams {
            sound: "kick".into(),
            gain: 1.0,
            rate: 1.0,
        }));
        let out = render(&mut engine, 16);
        assert!(out[0].left > 0.0);
    }

    #[test]
    fn unknown_sound_is_a_silent_noop() {
        let mut engine = engine_with_click();
        engine.handle_cmd(AudioCommand::Trigger(TriggerParams {
            sound: "bongo".into(),
            gain: 1.0,
            rate: 1.0,
        }));
        let out = render(&mut engine, 16);
        assert!(out.iter().all(|f| f.left == 0.0));
    }

    #[test]
    fn master_volume_scales_the_mix() {
        let mut engine = engine_with_click();
        engine.handle_cmd(AudioCommand::SetMasterVolume(0.5));
        engine.handle_cmd(AudioCommand::Trigger(TriggerParams {
            sound: "kick".into(),
            gain: 1.0,
            rate: 1.0,
        }));
        let out = render(&mut engine, 4);
        assert_eq!(out[0].left, 0.5);
    }

    #[test]
    fn voice_pool_steals_oldest_when_full() {
        let mut engine = engine_with_click();
        for _ in 0..(MAX_VOICES + 4) {
            engine.handle_cmd(AudioCommand::Trigger(TriggerParams {
                sound: "kick".into(),
                gain: 1.0,
                rate: 1.0,
            }));
        }
        // all voices mix without panicking, clamped to the pool size
        let active = engine.voices.iter().filter(|v| v.active).count();
        assert_eq!(active, MAX_VOICES);
        render(&mut engine, 16);
    }

    #[test]
    fn reregistering_swaps_buffer_in_place() {
        let mut engine = engine_with_click();
        engine.handle_cmd(AudioCommand::RegisterSample {
            name: "kick".into(),
            buffer: SampleBuffer { data: vec![StereoFrame::splat(0.25); 8] },
        });
        assert_eq!(engine.sounds.len(), 1);
        assert_eq!(engine.sounds[0].1.len(), 8);
    }

    #[test]
    fn effect_toggles_route_through_commands() {
        let mut engine = engine_with_click();
        engine.handle_cmd(AudioCommand::SetEffectEnabled(EffectKind::Distortion, true));
        engine.handle_cmd(AudioCommand::SetEffectParam(
            EffectKind::Distortion,
            EffectParam::Amount,
            1.0,
        ));
        engine.handle_cmd(AudioCommand::Trigger(TriggerParams {
            sound: "kick".into(),
            gain: 0.1,
            rate: 1.0,
        }));
        let out = render(&mut engine, 4);
        // heavy drive pushes a 0.1 input well above linear
        assert!(out[0].left > 0.2);
    }
}
