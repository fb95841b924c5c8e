use std::path::Path;

use super::frame::StereoFrame;

/// A decoded drum sample, already converted to stereo f32 at the output
/// device's rate so the voice code never has to think about formats.
#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decode a WAV file into a stereo buffer at `target_rate`.
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                // scale whatever bit depth we got into -1..1
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let channels = spec.channels as usize;
        let mut frames: Vec<StereoFrame> = match channels {
            0 => anyhow::bail!("{}: zero-channel wav", path.display()),
            1 => samples.into_iter().map(StereoFrame::splat).collect(),
            // take the first two channels of anything wider than stereo
            n => samples
                .chunks_exact(n)
                .map(|c| StereoFrame { left: c[0], right: c[1] })
                .collect(),
        };

        if spec.sample_rate != target_rate {
            frames = resample_linear(&frames, spec.sample_rate, target_rate);
        }

        Ok(Self { data: frames })
    }
}

// Plain linear resampler. Good enough for one-shot drum hits; anything
// fancier belongs in a real SRC crate.
fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx + 1 >= frames.len() {
            out.push(*frames.last().unwrap());
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, frames: usize) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..frames * channels as usize {
            writer.write_sample((i as i16) << 6).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn mono_is_duplicated_to_both_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 48000, 1, 100);

        let buf = SampleBuffer::load_wav(&path, 48000).unwrap();
        assert_eq!(buf.len(), 100);
        for f in &buf.data {
            assert_eq!(f.left, f.right);
        }
    }

    #[test]
    fn resampling_scales_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, 22050, 2, 220);

        let buf = SampleBuffer::load_wav(&path, 44100).unwrap();
        // 220 frames at 22.05k ≈ 440 at 44.1k
        assert!((buf.len() as i64 - 440).abs() <= 1, "got {}", buf.len());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(SampleBuffer::load_wav(Path::new("/nope/kick.wav"), 44100).is_err());
    }
}
