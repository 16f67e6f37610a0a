//! mcast_music - multicast music push library
//!
//! provides library elements to announce an audio stream to a group of
//! networked speaker devices and then push the file bytes to them over
//! UDP multicast at roughly playback rate
#[macro_use]
extern crate num_derive;

pub mod cast;
pub mod common;
pub mod media;
pub mod net;
