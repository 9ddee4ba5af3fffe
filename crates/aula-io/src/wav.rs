//! WAV file reading and writing for impulse responses.

use crate::{Error, Result};
use aula_core::Signal;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: match spec.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// Read a WAV file as a mono [`Signal`].
///
/// Integer samples are scaled to `[-1, 1)`; multi-channel files are mixed
/// down to mono by averaging channels.
///
/// # Errors
///
/// [`Error::EmptyFile`] when the file holds no frames.
pub fn read_signal<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let full_scale = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / full_scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if samples.len() < channels {
        return Err(Error::EmptyFile);
    }

    let mono = if channels > 1 {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        path = %path.display(),
        channels,
        sample_rate = spec.sample_rate,
        frames = mono.len(),
        "loaded impulse response"
    );

    Ok(Signal::new(mono, spec.sample_rate)?)
}

/// Write a [`Signal`] as a mono WAV file.
///
/// `bits_per_sample` of 16 or 24 writes integer PCM; 32 writes IEEE float.
/// Integer output is clamped to full scale.
pub fn write_signal<P: AsRef<Path>>(path: P, signal: &Signal, bits_per_sample: u16) -> Result<()> {
    let sample_format = match bits_per_sample {
        16 | 24 => SampleFormat::Int,
        32 => SampleFormat::Float,
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit output (use 16, 24 or 32)",
                other
            )));
        }
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample,
        sample_format,
    };
    let mut writer = WavWriter::create(path, spec)?;

    match sample_format {
        SampleFormat::Float => {
            for &sample in signal.samples() {
                writer.write_sample(sample as f32)?;
            }
        }
        SampleFormat::Int => {
            let full_scale = f64::from(1u32 << (bits_per_sample - 1));
            for &sample in signal.samples() {
                let value = (sample * full_scale).round().clamp(-full_scale, full_scale - 1.0);
                writer.write_sample(value as i32)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
