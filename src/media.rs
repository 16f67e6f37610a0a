//! audio file introspection for the two formats the speakers can play
use crate::common::box_error::BoxError;
use crate::media::info::{AudioFormat, StreamInfo};

pub mod info;
pub mod mp3;
pub mod wav;

/// Read the stream parameters for a local audio file.
///
/// WAV is a direct header read.  MP3 has to walk the frame stream to get
/// at the duration, so it can take a moment on a big file.
pub fn probe(filename: &str, format: AudioFormat) -> Result<StreamInfo, BoxError> {
    match format {
        AudioFormat::Mp3 => mp3::read_info(filename),
        AudioFormat::Pcm => wav::read_info(filename),
    }
}
