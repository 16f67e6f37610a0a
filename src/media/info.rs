use num::ToPrimitive;
use simple_error::bail;
use std::fmt;

use crate::common::box_error::BoxError;

/// Codec tag as it appears in the start message.  The speakers only know
/// these two.
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, PartialEq, Debug)]
pub enum AudioFormat {
    Mp3 = 0,
    Pcm = 1,
}

impl AudioFormat {
    pub fn to_wire(&self) -> i64 {
        ToPrimitive::to_i64(self).unwrap()
    }
}

/// Everything the receivers need to know about the stream before the first
/// payload datagram shows up.  Built once from the source file and never
/// changed for the life of a cast.
#[derive(Clone, Debug)]
pub struct StreamInfo {
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits: u16,
    pub bit_rate: u32,
    pub duration: f64,
    pub file_size: u64,
}

impl StreamInfo {
    /// Same checks the speaker firmware runs on the start message.  Catch
    /// a bad descriptor here instead of watching the whole fleet reject it.
    pub fn validate(&self) -> Result<(), BoxError> {
        if self.sample_rate == 0 {
            bail!("sample rate must be non-zero");
        }
        if !(self.channels == 1 || self.channels == 2) {
            bail!(format!("unsupported channel count: {}", self.channels));
        }
        if !matches!(self.bits, 8 | 16 | 24 | 32) {
            bail!(format!("unsupported bit depth: {}", self.bits));
        }
        if self.bit_rate == 0 {
            bail!("bit rate must be non-zero");
        }
        Ok(())
    }
}

impl fmt::Display for StreamInfo {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ format: {:?}, rate: {}, channels: {}, bits: {}, bit_rate: {}, duration: {:.2}s, size: {} }}",
            self.format,
            self.sample_rate,
            self.channels,
            self.bits,
            self.bit_rate,
            self.duration,
            self.file_size
        )
    }
}
