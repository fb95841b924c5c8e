// One interleaved stereo frame; the unit everything downstream mixes in.
// repr(C) so a cpal f32 buffer can be viewed as a frame slice.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn splat(sample: f32) -> Self {
        Self { left: sample, right: sample }
    }
}
