//! WAV parameter read, straight off the RIFF header
use crate::common::box_error::BoxError;
use crate::media::info::{AudioFormat, StreamInfo};
use std::fs;

pub fn read_info(filename: &str) -> Result<StreamInfo, BoxError> {
    let reader = hound::WavReader::open(filename)?;
    let spec = reader.spec();
    // duration() is frames, i.e. samples per channel
    let frames = reader.duration();
    let duration = frames as f64 / spec.sample_rate as f64;
    let bit_rate = spec.sample_rate * spec.channels as u32 * spec.bits_per_sample as u32;
    let file_size = fs::metadata(filename)?.len();
    let info = StreamInfo {
        format: AudioFormat::Pcm,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits: spec.bits_per_sample,
        bit_rate,
        duration,
        file_size,
    };
    info.validate()?;
    Ok(info)
}
