//! paced chunk sender for the payload stream
//!
//! Reads the file in fixed size chunks and puts each one on the wire as a
//! bare datagram, no header, no sequence numbers.  The receivers trust
//! datagram boundaries to survive the LAN.  Pacing comes entirely from the
//! plan, one blocking sleep per chunk.
use crate::common::box_error::BoxError;
use crate::net::mcast_sock;
use crate::net::pacer::PacingPlan;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::net::UdpSocket;
use std::thread::sleep;

pub struct StreamSender {
    sock: UdpSocket,
    dest: String,
    plan: PacingPlan,
}

impl StreamSender {
    pub fn build(host: &str, port: u16, plan: PacingPlan) -> Result<StreamSender, BoxError> {
        Ok(StreamSender {
            sock: mcast_sock::new_sender()?,
            dest: format!("{}:{}", host, port),
            plan: plan,
        })
    }

    /// Push the whole file, one datagram per chunk.  Returns the bytes put
    /// on the wire, which equals the file length unless it errors out
    /// partway.  An unreadable file fails before anything is sent.
    pub fn send_file(&self, filename: &str) -> Result<u64, BoxError> {
        let mut file = File::open(filename)?;
        let mut buf = vec![0u8; self.plan.chunk_size()];
        let mut sent: u64 = 0;
        loop {
            let nread = file.read(&mut buf)?;
            if nread == 0 {
                break;
            }
            self.sock.send_to(&buf[..nread], self.dest.as_str())?;
            sent += nread as u64;
            sleep(self.plan.delay(sent));
        }
        debug!("streamed {} bytes to {}", sent, self.dest);
        Ok(sent)
    }
}

impl fmt::Display for StreamSender {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ dest: {}, plan: {} }}", self.dest, self.plan)
    }
}

#[cfg(test)]
mod test_streamer {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(name)
            .to_str()
            .unwrap()
            .to_string()
    }

    fn local_receiver() -> (UdpSocket, u16) {
        let sock = UdpSocket::bind("127.0.0.1:0").unwrap();
        sock.set_read_timeout(Some(Duration::from_millis(500))).unwrap();
        let port = sock.local_addr().unwrap().port();
        (sock, port)
    }

    // short file so the whole thing bursts at 1ms per chunk
    fn burst_plan(chunk_size: usize) -> PacingPlan {
        PacingPlan::build(chunk_size, 1_000, 128_000, 1.0)
    }

    #[test]
    fn sends_every_byte() {
        let path = temp_path("mcast_music_streamer_test.raw");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[7u8; 1_000]).unwrap();
        drop(file);

        let (receiver, port) = local_receiver();
        let sender = StreamSender::build("127.0.0.1", port, burst_plan(64)).unwrap();
        println!("sender: {}", sender);
        let sent = sender.send_file(&path).unwrap();
        assert_eq!(sent, 1_000);

        // 15 full chunks and one 40 byte tail
        let mut buf = [0u8; 2048];
        let mut total = 0;
        let mut datagrams = 0;
        while total < 1_000 {
            let nread = receiver.recv(&mut buf).unwrap();
            assert!(nread <= 64);
            total += nread;
            datagrams += 1;
        }
        assert_eq!(total, 1_000);
        assert_eq!(datagrams, 16);
    }

    #[test]
    fn zero_length_file_sends_nothing() {
        let path = temp_path("mcast_music_streamer_empty.raw");
        File::create(&path).unwrap();

        let (receiver, port) = local_receiver();
        let sender = StreamSender::build("127.0.0.1", port, burst_plan(64)).unwrap();
        let sent = sender.send_file(&path).unwrap();
        assert_eq!(sent, 0);

        let mut buf = [0u8; 64];
        assert!(receiver.recv(&mut buf).is_err());
    }

    #[test]
    fn missing_file_sends_nothing() {
        let (receiver, port) = local_receiver();
        let sender = StreamSender::build("127.0.0.1", port, burst_plan(64)).unwrap();
        assert!(sender.send_file("no_such_file.raw").is_err());

        let mut buf = [0u8; 64];
        assert!(receiver.recv(&mut buf).is_err());
    }
}
