//! two phase pacing for the payload stream
//!
//! The first ~5 seconds worth of bytes go out as fast as the wire will
//! take them so the speakers have playback headroom before they start.
//! After that every chunk waits a fixed frame delay sized to land the
//! whole file a little ahead of real time, so the player buffer never
//! runs dry.
use std::fmt;
use std::time::Duration;

/// per chunk delay inside the buffering window
pub const BURST_DELAY: Duration = Duration::from_millis(1);
/// seconds of playback the cache window covers
const CACHE_SECS: f64 = 5.0;
/// the steady phase finishes this many seconds ahead of playback
const STREAM_LEAD_SECS: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PacePhase {
    Buffering,
    Steady,
}

/// Derived once per cast from the file facts, constant after that.
#[derive(Debug, Clone, Copy)]
pub struct PacingPlan {
    chunk_size: usize,
    cache_size: u64,
    frame_delay: Duration,
}

impl PacingPlan {
    pub fn build(chunk_size: usize, file_size: u64, bit_rate: u32, duration: f64) -> PacingPlan {
        let cache_size = (bit_rate as f64 / 8.0 * CACHE_SECS) as u64;
        PacingPlan {
            chunk_size,
            cache_size,
            frame_delay: steady_delay(chunk_size, file_size, cache_size, duration),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn cache_size(&self) -> u64 {
        self.cache_size
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Which phase the transfer is in after bytes_sent cumulative bytes.
    /// Offsets inside the cache window never get the steady delay.
    pub fn phase(&self, bytes_sent: u64) -> PacePhase {
        if bytes_sent <= self.cache_size {
            PacePhase::Buffering
        } else {
            PacePhase::Steady
        }
    }

    pub fn delay(&self, bytes_sent: u64) -> Duration {
        match self.phase(bytes_sent) {
            PacePhase::Buffering => BURST_DELAY,
            PacePhase::Steady => self.frame_delay,
        }
    }
}

impl fmt::Display for PacingPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ chunk: {}, cache: {}, frame_delay: {:.4}s }}",
            self.chunk_size,
            self.cache_size,
            self.frame_delay.as_secs_f64()
        )
    }
}

// Spread what is left after the cache window over the playback time minus
// the lead.  Short files can push the formula to zero or negative; they
// just keep the burst delay the whole way.
fn steady_delay(chunk_size: usize, file_size: u64, cache_size: u64, duration: f64) -> Duration {
    if file_size <= cache_size || duration <= STREAM_LEAD_SECS {
        return BURST_DELAY;
    }
    let chunks = (file_size - cache_size) as f64 / chunk_size as f64;
    let delay = (duration - STREAM_LEAD_SECS) / chunks;
    if delay <= BURST_DELAY.as_secs_f64() {
        return BURST_DELAY;
    }
    Duration::from_secs_f64(delay)
}
