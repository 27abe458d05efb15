//! Error types for netquery.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for netquery operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform/vendor errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Structured output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Orchestrator REST errors
    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    /// A structured document did not have the expected shape
    #[error("Unexpected structure: {0}")]
    Shape(#[from] ShapeError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Private key could not be loaded
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host is not present in known_hosts and verification is strict
    #[error("Host key for {host}:{port} is not known")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (pattern matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (command execution, privilege escalation).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// Command execution failed
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Failed to acquire target privilege level
    #[error("Failed to acquire privilege level '{target}'")]
    PrivilegeAcquisitionFailed { target: String },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown privilege level detected
    #[error("Unknown privilege level from prompt: '{prompt}'")]
    UnknownPrivilege { prompt: String },

    /// No path found between privilege levels
    #[error("No path from privilege '{from}' to '{to}'")]
    NoPrivilegePath { from: String, to: String },
}

/// Platform/vendor definition errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Invalid platform definition
    #[error("Invalid platform definition: {message}")]
    InvalidDefinition { message: String },

    /// No platform registered under this name
    #[error("Unknown platform '{name}'")]
    UnknownPlatform { name: String },

    /// A platform with this name is already registered
    #[error("Platform '{name}' is already registered")]
    AlreadyRegistered { name: String },
}

/// Errors raised while turning raw CLI text into structured data.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The requested mode has no parser attached
    #[error("No parser configured for {mode} output")]
    NotConfigured { mode: &'static str },

    /// No TextFSM template is known for this command
    #[error("No TextFSM template for command '{command}'")]
    TemplateMissing { command: String },

    /// The TextFSM template or its evaluation failed
    #[error("TextFSM error for '{command}': {message}")]
    TextFsm { command: String, message: String },

    /// A template index could not be read
    #[error("Template index line {line}: {message}")]
    Index { line: usize, message: String },

    /// The external parser program failed
    #[error("External parser '{program}' failed: {message}")]
    External { program: String, message: String },

    /// Parser output was not valid JSON
    #[error("Parser produced invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while loading templates or talking to a parser process
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Orchestrator REST API errors.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The HTTP request could not be performed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The orchestrator answered with a non-success status
    #[error("{path} returned HTTP {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// The response body was not the JSON we expected
    #[error("Invalid JSON from orchestrator: {0}")]
    Json(#[from] serde_json::Error),

    /// No API token was supplied
    #[error("Orchestrator API token is not set (expected {variable})")]
    MissingToken { variable: &'static str },

    /// Invalid configuration value
    #[error("Invalid orchestrator configuration: {message}")]
    InvalidConfig { message: String },

    /// No link-status record exists for the edge
    #[error("No edge named '{name}'")]
    EdgeNotFound { name: String },
}

/// A structured document was missing a key or index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing {path}")]
pub struct ShapeError {
    /// Dotted path to the missing element, e.g. `[0].modules[1].data`.
    pub path: String,
}

impl ShapeError {
    /// Create a shape error for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Result type alias using netquery's Error.
pub type Result<T> = std::result::Result<T, Error>;
