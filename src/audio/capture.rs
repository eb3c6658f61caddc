use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use crate::audio::queue::ChunkSender;
use crate::config::PipelineConfig;
use crate::error::DeviceError;

/// Source of audio chunks. Opening it starts delivery into the given
/// sender until the returned stream is paused or dropped.
pub trait AudioInput {
    fn open(
        &mut self,
        chunks: ChunkSender,
        config: &PipelineConfig,
    ) -> Result<Box<dyn CaptureStream>, DeviceError>;
}

/// Handle to a running capture. Dropping it releases the device.
pub trait CaptureStream {
    fn pause(&mut self) -> Result<(), DeviceError>;
}

/// Default microphone via cpal.
pub struct MicInput;

struct MicStream {
    stream: cpal::Stream,
}

impl CaptureStream for MicStream {
    fn pause(&mut self) -> Result<(), DeviceError> {
        self.stream.pause()?;
        Ok(())
    }
}

impl AudioInput for MicInput {
    fn open(
        &mut self,
        chunks: ChunkSender,
        config: &PipelineConfig,
    ) -> Result<Box<dyn CaptureStream>, DeviceError> {
        let rate = config.sample_rate;
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(DeviceError::NoInputDevice)?;

        info!("Audio Input Device: {}", device.name().unwrap_or_default());

        // Look for a config range covering the target rate. f32 input saves
        // a conversion, so try that first, then fall back to i16.
        let mut selected = None;
        for format in [cpal::SampleFormat::F32, cpal::SampleFormat::I16] {
            for range in device.supported_input_configs()? {
                if range.sample_format() == format
                    && range.min_sample_rate().0 <= rate
                    && range.max_sample_rate().0 >= rate
                {
                    selected = Some(range.with_sample_rate(cpal::SampleRate(rate)));
                    break;
                }
            }
            if selected.is_some() {
                break;
            }
        }
        let supported = selected.ok_or(DeviceError::UnsupportedRate(rate))?;

        let sample_format = supported.sample_format();
        let channels = supported.channels() as usize;
        info!("Audio Config Selected: Rate={}Hz, Channels={}", rate, channels);

        let stream_config: cpal::StreamConfig = supported.into();
        let err_fn = |err| error!("an error occurred on stream: {}", err);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                let sink = chunks.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[f32], _: &_| {
                        sink.enqueue(downmix(data, channels));
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let sink = chunks.clone();
                device.build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &_| {
                        let samples: Vec<f32> =
                            data.iter().map(|&s| s as f32 / i16::MAX as f32).collect();
                        sink.enqueue(downmix(&samples, channels));
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(DeviceError::UnsupportedFormat(format!("{:?}", other))),
        };

        stream.play()?;

        Ok(Box::new(MicStream { stream }))
    }
}

/// Interleaved multi-channel input is averaged down to mono. The callback
/// copies out of the device buffer either way.
fn downmix(input: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return input.to_vec();
    }
    input
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_passes_mono_through() {
        let input = [0.1, 0.2, 0.3];
        assert_eq!(downmix(&input, 1), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn downmix_averages_stereo_frames() {
        let input = [0.0, 1.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix(&input, 2), vec![0.5, 0.5, 0.0]);
    }
}
