//! SSH transport layer wrapping russh.
//!
//! Handles connection setup, authentication, host key checking and opening
//! the PTY shell channel the driver talks through.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
