use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;

mod effect;
mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;

use engine::Engine;

/// Owns the output stream and the command channel into it. Dropping the
/// handle tears the stream down, which is the whole dispose story — there is
/// no global audio state anywhere.
pub struct AudioService {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream,
}

impl AudioService {
    /// Fire-and-forget; a full queue just drops the command rather than
    /// blocking the caller.
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    /// The device rate sample buffers must be decoded at.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioService> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;
    if channels != 2 {
        anyhow::bail!("only stereo output is supported (device has {channels} channels)");
    }

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, sample_rate, channels)?;
            output_stream.play().context("failed to play output stream")?;

            Ok(AudioService { tx, sample_rate, _output_stream: output_stream })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    sample_rate: u32,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new(sample_rate as f32);

    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels;
            // channels == 2 was checked at startup; StereoFrame is repr(C)
            // over two f32s, so the device buffer is a frame slice.
            let frames: &mut [StereoFrame] = unsafe {
                std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut StereoFrame, n_frames)
            };
            engine.render_block(frames);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
