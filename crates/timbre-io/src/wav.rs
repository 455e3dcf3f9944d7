//! Stereo WAV reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use tracing::debug;

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
    /// Number of audio channels (1 = mono, 2 = stereo).
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
    if spec.channels == 0 {
        return Err(Error::NoChannels);
    }
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);

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

/// WAV file specification for writing.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32; 32 writes IEEE float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            bits_per_sample: 32,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: 2,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// A deinterleaved stereo buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Build from equal-length channel buffers.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len());
        Self { left, right }
    }

    /// Duplicate a mono buffer onto both channels.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            right: samples.clone(),
            left: samples,
        }
    }

    /// Deinterleave an L/R interleaved buffer.
    pub fn from_interleaved(samples: &[f32]) -> Self {
        let frames = samples.len() / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for frame in samples.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        Self { left, right }
    }

    /// Interleave back to an L/R sample stream.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.left.len() * 2);
        for (l, r) in self.left.iter().zip(&self.right) {
            out.push(*l);
            out.push(*r);
        }
        out
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

fn decode_samples<R: std::io::Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    match spec.sample_format {
        SampleFormat::Float => Ok(reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?),
        SampleFormat::Int => {
            // i64 so the 32-bit shift does not wrap to i32::MIN.
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            Ok(reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?)
        }
    }
}

/// Read a WAV file as stereo samples plus its spec.
///
/// Mono files are duplicated onto both channels; files with more than
/// two channels keep only the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoSamples, WavSpec)> {
    let reader = WavReader::open(&path)?;
    let file_spec = reader.spec();
    if file_spec.channels == 0 {
        return Err(Error::NoChannels);
    }
    let channels = file_spec.channels as usize;
    let spec = WavSpec {
        sample_rate: file_spec.sample_rate,
        bits_per_sample: file_spec.bits_per_sample,
    };

    let all_samples = decode_samples(reader)?;

    let stereo = match channels {
        1 => StereoSamples::from_mono(all_samples),
        2 => StereoSamples::from_interleaved(&all_samples),
        _ => {
            let frames = all_samples.len() / channels;
            let mut left = Vec::with_capacity(frames);
            let mut right = Vec::with_capacity(frames);
            for frame in all_samples.chunks_exact(channels) {
                left.push(frame[0]);
                right.push(frame[1]);
            }
            StereoSamples { left, right }
        }
    };

    debug!(
        path = %path.as_ref().display(),
        frames = stereo.len(),
        sample_rate = spec.sample_rate,
        source_channels = channels,
        "loaded WAV"
    );
    Ok((stereo, spec))
}

/// Write stereo samples to a WAV file.
///
/// 32-bit output is IEEE float; 16 and 24 bit are PCM with clamping.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let mut writer = WavWriter::create(&path, spec.into())?;

    if spec.bits_per_sample == 32 {
        for (l, r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample(*l)?;
            writer.write_sample(*r)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for (l, r) in samples.left.iter().zip(&samples.right) {
            writer.write_sample((*l * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
            writer.write_sample((*r * max_val).clamp(-max_val, max_val - 1.0) as i32)?;
        }
    }

    writer.finalize()?;
    debug!(
        path = %path.as_ref().display(),
        frames = samples.len(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32 / len as f32 - 0.5).collect()
    }

    #[test]
    fn stereo_roundtrip_f32() {
        let samples = StereoSamples::new(ramp(1000), ramp(1000).iter().map(|s| -s).collect());
        let spec = WavSpec {
            sample_rate: 48_000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 48_000);
        assert_eq!(loaded.len(), samples.len());
        for (a, b) in samples.left.iter().zip(&loaded.left) {
            assert!((a - b).abs() < 1e-6);
        }
        for (a, b) in samples.right.iter().zip(&loaded.right) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn stereo_roundtrip_i16() {
        let samples = StereoSamples::new(ramp(500), ramp(500));
        let spec = WavSpec {
            sample_rate: 44_100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44_100);
        // 16-bit has less precision.
        for (a, b) in samples.left.iter().zip(&loaded.left) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn int32_pcm_decodes_with_correct_polarity() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Int,
        };

        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        // +half and -quarter full scale on 32-bit int.
        for _ in 0..16 {
            writer.write_sample(1_073_741_824i32).unwrap();
            writer.write_sample(-536_870_912i32).unwrap();
        }
        writer.finalize().unwrap();

        let (stereo, _) = read_wav_stereo(file.path()).unwrap();
        for s in &stereo.left {
            assert!((s - 0.5).abs() < 1e-6, "expected +0.5, got {s}");
        }
        for s in &stereo.right {
            assert!((s + 0.25).abs() < 1e-6, "expected -0.25, got {s}");
        }
    }

    #[test]
    fn interleave_roundtrip() {
        let stereo = StereoSamples::new(vec![1.0, 3.0], vec![2.0, 4.0]);
        let interleaved = stereo.to_interleaved();
        assert_eq!(interleaved, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(StereoSamples::from_interleaved(&interleaved), stereo);
    }

    #[test]
    fn mono_expands_to_both_channels() {
        let mono = ramp(100);
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), spec).unwrap();
        for s in &mono {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();

        let (stereo, _) = read_wav_stereo(file.path()).unwrap();
        assert_eq!(stereo.left, mono);
        assert_eq!(stereo.right, mono);
    }

    #[test]
    fn info_reports_frames_and_format() {
        let samples = StereoSamples::new(ramp(2400), ramp(2400));
        let spec = WavSpec {
            sample_rate: 24_000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav_stereo(file.path(), &samples, spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 24_000);
        assert_eq!(info.num_frames, 2400);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert!((info.duration_secs - 0.1).abs() < 1e-9);
    }
}
