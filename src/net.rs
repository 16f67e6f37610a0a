//! socket setup, control messages, and the paced payload sender
pub mod ctrl_message;
pub mod mcast_sock;
pub mod pacer;
pub mod streamer;
