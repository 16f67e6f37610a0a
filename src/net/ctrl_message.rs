//! control messages the speakers listen for on the control group
//!
//! A start tells the addressed speakers what stream is about to arrive and
//! where; a stop tells them to quit playing.  Both go out once, unreliably,
//! as a single JSON datagram.  The speakers answer on the response address,
//! but nothing here waits for that.
use crate::common::{box_error::BoxError, mac_list};
use crate::media::info::{AudioFormat, StreamInfo};
use crate::net::mcast_sock;
use log::info;
use num::FromPrimitive;
use serde_json::json;
use simple_error::bail;
use std::fmt;

pub struct StartMessage {
    pub task_id: String,
    pub music_ip: String,
    pub music_port: u16,
    pub info: StreamInfo,
    pub macs: Vec<String>,
    pub response_ip: String,
    pub response_port: u16,
}

impl StartMessage {
    pub fn new(
        task_id: &str,
        music_ip: &str,
        music_port: u16,
        info: StreamInfo,
        macs: &[String],
        response_ip: &str,
        response_port: u16,
    ) -> StartMessage {
        StartMessage {
            task_id: task_id.to_string(),
            music_ip: music_ip.to_string(),
            music_port: music_port,
            info: info,
            macs: macs.to_vec(),
            response_ip: response_ip.to_string(),
            response_port: response_port,
        }
    }

    pub fn as_json(&self) -> Result<serde_json::Value, BoxError> {
        self.info.validate()?;
        Ok(json!({
            "task_id": self.task_id,
            "method": "start",
            "params": {
                "music": {
                    "ip": self.music_ip,
                    "port": self.music_port,
                    "format": self.info.format.to_wire(),
                    "rate": self.info.sample_rate,
                    "channel": self.info.channels,
                    "bits": self.info.bits,
                    "bit_rate": self.info.bit_rate,
                    "mac": mac_list::pack(&self.macs)?,
                },
                "response": {
                    "ip": self.response_ip,
                    "port": self.response_port,
                }
            }
        }))
    }

    /// Receiver side of the coding, here mostly so the two directions stay
    /// honest with each other.
    pub fn from_json(raw: &serde_json::Value) -> Result<StartMessage, BoxError> {
        if raw["method"].as_str() != Some("start") {
            bail!("not a start message");
        }
        let task_id = match raw["task_id"].as_str() {
            Some(id) => id,
            None => bail!("no task_id in message"),
        };
        let music = &raw["params"]["music"];
        let format: AudioFormat = match music["format"].as_i64().and_then(FromPrimitive::from_i64) {
            Some(f) => f,
            None => bail!("bad format code"),
        };
        let macs = match music["mac"].as_str() {
            Some(packed) => mac_list::unpack(packed)?,
            None => vec![],
        };
        let response = &raw["params"]["response"];
        // duration and size never go on the wire, the receivers don't need them
        let info = StreamInfo {
            format: format,
            sample_rate: music["rate"].as_u64().unwrap_or(0) as u32,
            channels: music["channel"].as_u64().unwrap_or(0) as u16,
            bits: music["bits"].as_u64().unwrap_or(0) as u16,
            bit_rate: music["bit_rate"].as_u64().unwrap_or(0) as u32,
            duration: 0.0,
            file_size: 0,
        };
        info.validate()?;
        Ok(StartMessage {
            task_id: task_id.to_string(),
            music_ip: music["ip"].as_str().unwrap_or("").to_string(),
            music_port: music["port"].as_u64().unwrap_or(0) as u16,
            info: info,
            macs: macs,
            response_ip: response["ip"].as_str().unwrap_or("").to_string(),
            response_port: response["port"].as_u64().unwrap_or(0) as u16,
        })
    }

    pub fn send(&self, group: &str, port: u16) -> Result<(), BoxError> {
        let sock = mcast_sock::new_sender()?;
        let data = self.as_json()?.to_string();
        sock.send_to(data.as_bytes(), (group, port))?;
        info!("sent start command to {}:{}", group, port);
        Ok(())
    }
}

impl fmt::Display for StartMessage {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ task_id: {}, music: {}:{}, macs: {} }}",
            self.task_id,
            self.music_ip,
            self.music_port,
            self.macs.len()
        )
    }
}

pub struct StopMessage {
    pub task_id: String,
    pub macs: Vec<String>,
    pub response_ip: String,
    pub response_port: u16,
}

impl StopMessage {
    pub fn new(
        task_id: &str,
        macs: &[String],
        response_ip: &str,
        response_port: u16,
    ) -> StopMessage {
        StopMessage {
            task_id: task_id.to_string(),
            macs: macs.to_vec(),
            response_ip: response_ip.to_string(),
            response_port: response_port,
        }
    }

    pub fn as_json(&self) -> Result<serde_json::Value, BoxError> {
        Ok(json!({
            "task_id": self.task_id,
            "method": "stop",
            "params": {
                "music": {
                    "mac": mac_list::pack(&self.macs)?,
                },
                "response": {
                    "ip": self.response_ip,
                    "port": self.response_port,
                }
            }
        }))
    }

    pub fn send(&self, group: &str, port: u16) -> Result<(), BoxError> {
        let sock = mcast_sock::new_sender()?;
        let data = self.as_json()?.to_string();
        sock.send_to(data.as_bytes(), (group, port))?;
        info!("sent stop command to {}:{}", group, port);
        Ok(())
    }
}
