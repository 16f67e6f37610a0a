//! entry point called by the cast binaries
//!
//! run() is the whole show: read the file facts, tell the speakers what is
//! coming, give them a moment to get their sockets open, then push the
//! bytes.  Everything is sequential on the calling thread.
use crate::common::{box_error::BoxError, config::Config};
use crate::media::{self, info::AudioFormat};
use crate::net::ctrl_message::{StartMessage, StopMessage};
use crate::net::pacer::PacingPlan;
use crate::net::streamer::StreamSender;
use log::{info, warn};
use std::thread::sleep;
use std::time::Duration;

pub const SETTINGS_FILE: &str = "settings.json";

/// All the knobs for one cast.  The compiled-in defaults match the speaker
/// fleet deployment; settings.json can override any of them.
pub struct CastConfig {
    pub ctrl_ip: String,
    pub ctrl_port: u16,
    pub music_ip: String,
    pub music_port: u16,
    pub response_ip: String,
    pub response_port: u16,
    pub chunk_size: usize,
    pub task_id: String,
    pub start_hold_secs: u32,
}

impl CastConfig {
    pub fn build() -> Result<CastConfig, BoxError> {
        let defaults = json::object! {
            "ctrl_ip": "239.205.155.251",
            "ctrl_port": 8000,
            "music_ip": "239.205.155.252",
            "music_port": 9999,
            "response_ip": "192.168.1.121",
            "response_port": 8569,
            "chunk_size": 512,
            "task_id": "12345613",
            "start_hold_secs": 3
        };
        let config = Config::build(SETTINGS_FILE.to_string(), defaults)?;
        Ok(CastConfig {
            ctrl_ip: config.get_str_value("ctrl_ip", None)?,
            ctrl_port: config.get_u16_value("ctrl_port", None)?,
            music_ip: config.get_str_value("music_ip", None)?,
            music_port: config.get_u16_value("music_port", None)?,
            response_ip: config.get_str_value("response_ip", None)?,
            response_port: config.get_u16_value("response_port", None)?,
            chunk_size: config.get_u32_value("chunk_size", None)? as usize,
            task_id: config.get_str_value("task_id", None)?,
            start_hold_secs: config.get_u32_value("start_hold_secs", None)?,
        })
    }
}

/// Cast one file to the speakers: announce, hold, stream.
pub fn run(
    config: &CastConfig,
    filename: &str,
    format: AudioFormat,
    macs: &[String],
) -> Result<(), BoxError> {
    let stream_info = media::probe(filename, format)?;
    info!("casting {}: {}", filename, stream_info);

    let start = StartMessage::new(
        &config.task_id,
        &config.music_ip,
        config.music_port,
        stream_info.clone(),
        macs,
        &config.response_ip,
        config.response_port,
    );
    // the start command is best effort, the stream goes out either way
    if let Err(e) = start.send(&config.ctrl_ip, config.ctrl_port) {
        warn!("start command failed: {}", e);
    }

    // give the speakers a moment to open the music socket
    sleep(Duration::from_secs(config.start_hold_secs as u64));

    let plan = PacingPlan::build(
        config.chunk_size,
        stream_info.file_size,
        stream_info.bit_rate,
        stream_info.duration,
    );
    info!("pacing plan: {}", plan);
    let sender = StreamSender::build(&config.music_ip, config.music_port, plan)?;
    let sent = sender.send_file(filename)?;
    info!("cast complete, {} bytes sent", sent);
    Ok(())
}

/// Tell the addressed speakers to quit playing.
pub fn stop(config: &CastConfig, macs: &[String]) -> Result<(), BoxError> {
    let msg = StopMessage::new(
        &config.task_id,
        macs,
        &config.response_ip,
        config.response_port,
    );
    msg.send(&config.ctrl_ip, config.ctrl_port)
}
