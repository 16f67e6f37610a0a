//! MP3 parameter probe
//!
//! The frame headers carry rate and channel mode, but the duration only
//! falls out of the frame count, so files without a Xing/VBRI tag get
//! their stream walked end to end.  Bit rate is taken as size over
//! duration, which lands on the nominal rate for CBR files.
use crate::common::box_error::BoxError;
use crate::media::info::{AudioFormat, StreamInfo};
use simple_error::bail;
use std::fs::File;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

pub fn read_info(filename: &str) -> Result<StreamInfo, BoxError> {
    let file = File::open(filename)?;
    let file_size = file.metadata()?.len();
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    hint.with_extension("mp3");
    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;
    let track = match format.default_track() {
        Some(t) => t,
        None => bail!(format!("{} has no audio track", filename)),
    };
    let track_id = track.id;
    let params = track.codec_params.clone();
    let sample_rate = match params.sample_rate {
        Some(rate) => rate,
        None => bail!(format!("{} has no sample rate", filename)),
    };
    let channels = match params.channels {
        Some(ch) => ch.count() as u16,
        None => 2,
    };
    // mp3 frames carry no bit depth, decoders emit 16 bit pcm
    let bits = params.bits_per_sample.unwrap_or(16) as u16;
    let mut frames = params.n_frames.unwrap_or(0);
    if frames == 0 {
        // no duration tag, count the frames ourselves
        while let Ok(packet) = format.next_packet() {
            if packet.track_id() == track_id {
                frames += packet.dur();
            }
        }
    }
    if frames == 0 {
        bail!(format!("{} contains no mp3 frames", filename));
    }
    let duration = frames as f64 / sample_rate as f64;
    let bit_rate = (file_size as f64 * 8.0 / duration).round() as u32;
    let info = StreamInfo {
        format: AudioFormat::Mp3,
        sample_rate,
        channels,
        bits,
        bit_rate,
        duration,
        file_size,
    };
    info.validate()?;
    Ok(info)
}

#[cfg(test)]
mod test_mp3 {
    use super::*;
    use std::io::Write;

    // 20 silent CBR frames: MPEG1 layer III, 128kbps, 44100Hz, stereo.
    // Frame length = 144 * 128000 / 44100 = 417 bytes, no padding.
    fn write_test_mp3(path: &str) {
        let mut frame = vec![0u8; 417];
        frame[0] = 0xFF;
        frame[1] = 0xFB;
        frame[2] = 0x90;
        frame[3] = 0x00;
        let mut file = std::fs::File::create(path).unwrap();
        for _ in 0..20 {
            file.write_all(&frame).unwrap();
        }
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(name)
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn reads_frame_params() {
        let path = temp_path("mcast_music_info_test.mp3");
        write_test_mp3(&path);
        let info = read_info(&path).unwrap();
        println!("info: {}", info);
        assert_eq!(info.format, AudioFormat::Mp3);
        assert_eq!(info.sample_rate, 44100);
        assert_eq!(info.channels, 2);
        assert_eq!(info.bits, 16);
        // 20 frames of 1152 samples
        assert!((info.duration - 0.5224).abs() < 0.01);
        // close to the 128k nominal rate
        assert!(info.bit_rate > 120_000 && info.bit_rate < 136_000);
        assert_eq!(info.file_size, 20 * 417);
    }

    #[test]
    fn missing_file_errors() {
        assert!(read_info("no_such_file.mp3").is_err());
    }
}
