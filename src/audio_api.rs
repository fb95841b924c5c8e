pub use crate::audio::SampleBuffer;
use crate::shared::EffectKind;

/// Parameters for one fire-and-forget trigger. `gain` is 0..1, `rate` is the
/// playback-rate multiplier (0.5..2.0 from the UI pitch range).
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerParams {
    pub sound: String,
    pub gain: f32,
    pub rate: f32,
}

/// Per-effect parameter selectors for `SetEffectParam`. Which ones apply to
/// which effect: Decay → reverb, Amount → distortion, Time/Feedback → delay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectParam {
    Decay,
    Amount,
    Time,
    Feedback,
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't load files (that would block the audio thread), so
    // buffers are decoded on the control thread and registered by name.
    RegisterSample { name: String, buffer: SampleBuffer },

    // The engine then plays registered buffers by name. Unknown names are a
    // warned no-op, never an error.
    Trigger(TriggerParams),

    SetMasterVolume(f32),
    SetEffectEnabled(EffectKind, bool),
    SetEffectParam(EffectKind, EffectParam, f32),
}
