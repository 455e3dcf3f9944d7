//! WAV file I/O for the timbre parametric EQ.
//!
//! The equalizer is a two-channel processor, so this crate exposes a
//! stereo-first API: [`read_wav_stereo`] loads any WAV as a left/right
//! pair ([`StereoSamples`]) and [`write_wav_stereo`] writes one back.
//! [`read_wav_info`] reads header metadata without touching sample data.

mod wav;

pub use wav::{
    StereoSamples, WavFormat, WavInfo, WavSpec, read_wav_info, read_wav_stereo, write_wav_stereo,
};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file has no audio channels.
    #[error("WAV file contains no channels")]
    NoChannels,

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
