mod preset;
mod track;

pub use preset::{PRESETS, Preset, find_preset, random_preset};
pub use track::{Track, default_tracks, pitch_rate, sound_name};
