//! packing of the speaker mac list carried inside control messages
//!
//! The list goes on the wire as base64(gzip(JSON array of string)).  The
//! speakers inflate it and look for their own mac to decide whether the
//! message is for them.  unpack is the receiver side of the same coding.
use crate::common::box_error::BoxError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

pub fn pack(macs: &[String]) -> Result<String, BoxError> {
    let json_str = serde_json::to_string(macs)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json_str.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

pub fn unpack(packed: &str) -> Result<Vec<String>, BoxError> {
    let compressed = STANDARD.decode(packed)?;
    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut json_str = String::new();
    decoder.read_to_string(&mut json_str)?;
    Ok(serde_json::from_str(&json_str)?)
}

#[cfg(test)]
mod test_mac_list {
    use super::*;

    #[test]
    fn round_trip() {
        // whatever goes in must come back out unchanged
        let macs = vec![
            String::from("e4b06385e750"),
            String::from("f09e9e0f8254"),
            String::from("48ca43332dc4"),
        ];
        let packed = pack(&macs).unwrap();
        let unpacked = unpack(&packed).unwrap();
        assert_eq!(unpacked, macs);
    }

    #[test]
    fn empty_list() {
        let packed = pack(&[]).unwrap();
        assert_eq!(unpack(&packed).unwrap().len(), 0);
    }

    #[test]
    fn unpack_garbage() {
        assert!(unpack("not even base64!!!").is_err());
        // valid base64 but not gzip underneath
        assert!(unpack(&STANDARD.encode(b"plain bytes")).is_err());
    }
}
