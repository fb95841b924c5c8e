// The three bus effects behind the toggle/parameter pass-through interface:
// reverb (decay), distortion (amount), delay (time + feedback). They process
// the mixed block in place, before master gain. All buffers are allocated up
// front; the audio callback never allocates here.

use super::frame::StereoFrame;

// ── Distortion ────────────────────────────────────────────────────

pub struct Distortion {
    pub enabled: bool,
    amount: f32,
}

impl Distortion {
    pub const DEFAULT_AMOUNT: f32 = 0.3;

    pub fn new() -> Self {
        Self { enabled: false, amount: Self::DEFAULT_AMOUNT }
    }

    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(0.0, 1.0);
    }

    pub fn process(&mut self, buf: &mut [StereoFrame]) {
        if !self.enabled {
            return;
        }
        let pre_gain = 1.0 + self.amount * 10.0;
        for f in buf.iter_mut() {
            f.left = (pre_gain * f.left.clamp(-1.0, 1.0)).tanh();
            f.right = (pre_gain * f.right.clamp(-1.0, 1.0)).tanh();
        }
    }
}

// ── Feedback delay ────────────────────────────────────────────────

const MAX_DELAY_SECS: f32 = 2.0;
const DELAY_MIX: f32 = 0.35;

pub struct FeedbackDelay {
    pub enabled: bool,
    time_secs: f32,
    feedback: f32,
    sample_rate: f32,
    buffer: Vec<StereoFrame>,
    write: usize,
}

impl FeedbackDelay {
    pub const DEFAULT_TIME: f32 = 0.5;
    pub const DEFAULT_FEEDBACK: f32 = 0.5;

    pub fn new(sample_rate: f32) -> Self {
        let capacity = (sample_rate * MAX_DELAY_SECS) as usize + 1;
        Self {
            enabled: false,
            time_secs: Self::DEFAULT_TIME,
            feedback: Self::DEFAULT_FEEDBACK,
            sample_rate,
            buffer: vec![StereoFrame::zero(); capacity],
            write: 0,
        }
    }

    pub fn set_time(&mut self, secs: f32) {
        self.time_secs = secs.clamp(0.1, MAX_DELAY_SECS);
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.9);
    }

    pub fn process(&mut self, buf: &mut [StereoFrame]) {
        if !self.enabled {
            return;
        }
        let len = self.buffer.len();
        let delay_frames = ((self.time_secs * self.sample_rate) as usize).clamp(1, len - 1);
        for f in buf.iter_mut() {
            let read = (self.write + len - delay_frames) % len;
            let echo = self.buffer[read];
            self.buffer[self.write] = StereoFrame {
                left: f.left + echo.left * self.feedback,
                right: f.right + echo.right * self.feedback,
            };
            self.write = (self.write + 1) % len;
            f.left += echo.left * DELAY_MIX;
            f.right += echo.right * DELAY_MIX;
        }
    }
}

// ── Reverb ────────────────────────────────────────────────────────

// Comb delay lengths in samples at 44.1kHz (scaled to the device rate);
// the right channel is offset for stereo spread.
const COMB_TUNINGS: [usize; 4] = [1116, 1188, 1277, 1356];
const STEREO_SPREAD: usize = 23;
const REVERB_MIX: f32 = 0.3;
const COMB_DAMP: f32 = 0.25;

struct Comb {
    buffer: Vec<f32>,
    index: usize,
    filter_state: f32,
}

impl Comb {
    fn new(len: usize) -> Self {
        Self { buffer: vec![0.0; len.max(1)], index: 0, filter_state: 0.0 }
    }

    fn process(&mut self, input: f32, feedback: f32) -> f32 {
        let out = self.buffer[self.index];
        self.filter_state = out * (1.0 - COMB_DAMP) + self.filter_state * COMB_DAMP;
        self.buffer[self.index] = input + self.filter_state * feedback;
        self.index = (self.index + 1) % self.buffer.len();
        out
    }
}

/// Parallel-comb reverb. `decay` is the audible tail length in seconds;
/// per-comb feedback follows the RT60 relation 10^(-3·d/decay) for a comb
/// of delay d.
pub struct Reverb {
    pub enabled: bool,
    decay_secs: f32,
    sample_rate: f32,
    left: [Comb; 4],
    right: [Comb; 4],
}

impl Reverb {
    pub const DEFAULT_DECAY: f32 = 1.5;

    pub fn new(sample_rate: f32) -> Self {
        let scale = sample_rate / 44100.0;
        let scaled = |n: usize| ((n as f32 * scale) as usize).max(1);
        Self {
            enabled: false,
            decay_secs: Self::DEFAULT_DECAY,
            sample_rate,
            left: COMB_TUNINGS.map(|n| Comb::new(scaled(n))),
            right: COMB_TUNINGS.map(|n| Comb::new(scaled(n + STEREO_SPREAD))),
        }
    }

    pub fn set_decay(&mut self, secs: f32) {
        self.decay_secs = secs.clamp(0.1, 5.0);
    }

    fn comb_feedback(&self, delay_samples: usize) -> f32 {
        let delay_secs = delay_samples as f32 / self.sample_rate;
        10.0f32.powf(-3.0 * delay_secs / self.decay_secs).min(0.98)
    }

    pub fn process(&mut self, buf: &mut [StereoFrame]) {
        if !self.enabled {
            return;
        }
        let fb_left: [f32; 4] =
            std::array::from_fn(|i| self.comb_feedback(self.left[i].buffer.len()));
        let fb_right: [f32; 4] =
            std::array::from_fn(|i| self.comb_feedback(self.right[i].buffer.len()));

        for f in buf.iter_mut() {
            let mut wet_l = 0.0;
            let mut wet_r = 0.0;
            for i in 0..4 {
                wet_l += self.left[i].process(f.left, fb_left[i]);
                wet_r += self.right[i].process(f.right, fb_right[i]);
            }
            f.left += wet_l * REVERB_MIX * 0.25;
            f.right += wet_r * REVERB_MIX * 0.25;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize) -> Vec<StereoFrame> {
        let mut buf = vec![StereoFrame::zero(); len];
        buf[0] = StereoFrame::splat(1.0);
        buf
    }

    #[test]
    fn disabled_effects_pass_through_untouched() {
        let mut buf = impulse(64);
        let original = buf.clone();
        Distortion::new().process(&mut buf);
        FeedbackDelay::new(44100.0).process(&mut buf);
        Reverb::new(44100.0).process(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn distortion_saturates_peaks() {
        let mut dist = Distortion::new();
        dist.enabled = true;
        dist.set_amount(1.0);
        let mut buf = vec![StereoFrame::splat(1.0); 4];
        dist.process(&mut buf);
        for f in &buf {
            assert!(f.left < 1.001 && f.left > 0.9);
        }
    }

    #[test]
    fn delay_produces_an_echo_at_the_set_time() {
        let mut delay = FeedbackDelay::new(1000.0);
        delay.enabled = true;
        delay.set_time(0.1); // 100 frames at 1kHz
        delay.set_feedback(0.0);

        let mut buf = impulse(250);
        delay.process(&mut buf);
        assert_eq!(buf[0].left, 1.0);
        assert!(buf[100].left > 0.0, "echo expected at frame 100");
        assert_eq!(buf[50].left, 0.0);
    }

    #[test]
    fn reverb_leaves_a_tail() {
        let mut reverb = Reverb::new(44100.0);
        reverb.enabled = true;
        let mut buf = impulse(4096);
        reverb.process(&mut buf);
        let tail_energy: f32 = buf[1200..].iter().map(|f| f.left.abs()).sum();
        assert!(tail_energy > 0.0);
    }

    #[test]
    fn param_setters_clamp() {
        let mut delay = FeedbackDelay::new(44100.0);
        delay.set_feedback(5.0);
        assert_eq!(delay.feedback, 0.9);
        delay.set_time(100.0);
        assert_eq!(delay.time_secs, MAX_DELAY_SECS);

        let mut reverb = Reverb::new(44100.0);
        reverb.set_decay(0.0);
        assert_eq!(reverb.decay_secs, 0.1);
    }
}
