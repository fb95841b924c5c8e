use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// One playing sample. Fractional read position plus a rate multiplier gives
/// us the pitch control; the fraction is linearly interpolated on read.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pos: f32,
    rate: f32,
    gain: f32,
    pub active: bool,
    /// Monotonic trigger ordinal, used to steal the oldest voice when the
    /// pool is full.
    pub age: u64,
    /// Index into the engine's sound table.
    pub sound: usize,
}

impl Voice {
    pub fn idle() -> Self {
        Self { pos: 0.0, rate: 1.0, gain: 0.0, active: false, age: 0, sound: 0 }
    }

    pub fn start(sound: usize, gain: f32, rate: f32, age: u64) -> Self {
        Self {
            pos: 0.0,
            rate: rate.clamp(0.05, 8.0),
            gain: gain.clamp(0.0, 1.0),
            active: true,
            age,
            sound,
        }
    }

    /// Mix this voice into `out`, reading from `buffer`. Deactivates itself
    /// when it runs off the end of the sample.
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        if !self.active {
            return;
        }
        let data = &buffer.data;
        if data.is_empty() {
            self.active = false;
            return;
        }

        for frame in out.iter_mut() {
            let i = self.pos as usize;
            if i + 1 >= data.len() {
                self.active = false;
                break;
            }
            let frac = self.pos - i as f32;
            let s0 = data[i];
            let s1 = data[i + 1];

            frame.left += lerp(s0.left, s1.left, frac) * self.gain;
            frame.right += lerp(s0.right, s1.right, frac) * self.gain;

            self.pos += self.rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_buffer(len: usize) -> SampleBuffer {
        SampleBuffer {
            data: (0..len).map(|i| StereoFrame::splat(i as f32)).collect(),
        }
    }

    #[test]
    fn renders_and_finishes() {
        let buf = ramp_buffer(8);
        let mut voice = Voice::start(0, 1.0, 1.0, 0);
        let mut out = [StereoFrame::zero(); 16];
        voice.render_into(&buf, &mut out);

        assert!(!voice.active);
        assert_eq!(out[0].left, 0.0);
        assert_eq!(out[3].left, 3.0);
        // past the sample end nothing is written
        assert_eq!(out[8].left, 0.0);
    }

    #[test]
    fn double_rate_reads_twice_as_fast() {
        let buf = ramp_buffer(8);
        let mut voice = Voice::start(0, 1.0, 2.0, 0);
        let mut out = [StereoFrame::zero(); 4];
        voice.render_into(&buf, &mut out);

        assert_eq!(out[0].left, 0.0);
        assert_eq!(out[1].left, 2.0);
        assert_eq!(out[2].left, 4.0);
    }

    #[test]
    fn gain_scales_output() {
        let buf = ramp_buffer(8);
        let mut voice = Voice::start(0, 0.5, 1.0, 0);
        let mut out = [StereoFrame::zero(); 2];
        voice.render_into(&buf, &mut out);
        assert_eq!(out[1].left, 0.5);
    }

    #[test]
    fn empty_buffer_deactivates_immediately() {
        let buf = SampleBuffer::default();
        let mut voice = Voice::start(0, 1.0, 1.0, 0);
        let mut out = [StereoFrame::zero(); 4];
        voice.render_into(&buf, &mut out);
        assert!(!voice.active);
        assert_eq!(out[0], StereoFrame::zero());
    }
}
