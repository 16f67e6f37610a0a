//! boxed error type used by every fallible operation in the crate
//!
//! Send + Sync bounds so the same alias still works if an operation
//! ever gets moved onto its own thread.
pub type BoxError = std::boxed::Box<
    dyn std::error::Error // must implement Error to satisfy ?
        + std::marker::Send
        + std::marker::Sync,
>;
