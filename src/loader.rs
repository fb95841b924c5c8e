// Kit loading. A kit is a directory of five one-shot WAVs under the samples
// root; each decodes on this thread and ships to the engine as a
// RegisterSample. A sound that fails to decode is logged and skipped — the
// rest of the kit still loads, that one pad just stays silent.

use std::path::Path;

use log::{info, warn};

use crate::audio::SampleBuffer;
use crate::audio_api::AudioCommand;

/// Registered sound name → file name inside the kit directory.
pub const KIT_SOUNDS: [(&str, &str); 5] = [
    ("kick", "kick.wav"),
    ("snare", "snare.wav"),
    ("open-hat", "openhat.wav"),
    ("closed-hat", "closedhat.wav"),
    ("cowbell", "cowbell.wav"),
];

pub fn load_kit(samples_root: &Path, kit: &str, target_rate: u32) -> Vec<AudioCommand> {
    let kit_dir = samples_root.join(kit);
    let mut cmds = Vec::with_capacity(KIT_SOUNDS.len());

    for (name, file) in KIT_SOUNDS {
        let path = kit_dir.join(file);
        match SampleBuffer::load_wav(&path, target_rate) {
            Ok(buffer) => {
                info!("loaded {} from {}", name, path.display());
                cmds.push(AudioCommand::RegisterSample { name: name.to_string(), buffer });
            }
            Err(e) => {
                warn!("skipping {}: {e:#}", path.display());
            }
        }
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..32 {
            writer.write_sample(1000i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn partial_kit_loads_what_it_can() {
        let dir = tempfile::tempdir().unwrap();
        let kit_dir = dir.path().join("demo");
        std::fs::create_dir(&kit_dir).unwrap();
        write_wav(&kit_dir.join("kick.wav"));
        write_wav(&kit_dir.join("cowbell.wav"));
        // snare/openhat/closedhat missing on purpose

        let cmds = load_kit(dir.path(), "demo", 44100);
        let names: Vec<&str> = cmds
            .iter()
            .map(|c| match c {
                AudioCommand::RegisterSample { name, .. } => name.as_str(),
                _ => panic!("unexpected command"),
            })
            .collect();
        assert_eq!(names, vec!["kick", "cowbell"]);
    }

    #[test]
    fn missing_kit_dir_yields_no_commands() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_kit(dir.path(), "nope", 44100).is_empty());
    }
}
