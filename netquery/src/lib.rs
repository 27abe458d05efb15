//! # netquery
//!
//! Async facades for pulling operational state out of network gear.
//!
//! - [`CiscoDevice`] runs fixed show commands on Cisco IOS / IOS-XE devices
//!   over an SSH CLI session, returning raw text or output structured by a
//!   TextFSM template or an external (Genie-style) parser.
//! - [`VcoClient`] queries a VeloCloud Orchestrator over its REST API for
//!   edges, configuration stacks and link status.
//!
//! Underneath the device facade sits a small CLI scraper: an SSH
//! [`transport`], a PTY [`channel`] with tail-search prompt matching,
//! [`platform`] definitions with privilege levels, and a [`driver`] that ties
//! them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netquery::{CiscoDevice, ParseMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netquery::Error> {
//!     let device = CiscoDevice::new("10.20.0.11", "netops", "secret");
//!
//!     let clock = device.clock(ParseMode::Raw).await?;
//!     println!("{clock}");
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod device;
pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod parse;
pub mod platform;
pub mod shape;
pub mod transport;

pub use device::{CiscoDevice, CiscoDeviceBuilder, Connector, ShowCommand, SshConnector, VersionInfo};
pub use driver::{Driver, DriverBuilder, GenericDriver, Response};
pub use error::{Error, Result};
pub use orchestrator::{
    Edge, EdgeLinkStatus, EdgeLookup, EdgeSerial, HttpTransport, JsonTransport, LanSvi,
    OrchestratorConfig, VcoClient, WanInterface, WanLinkState,
};
pub use parse::{
    CommandOutput, ExternalParser, OutputParser, ParseMode, ParserSet, TemplateIndex, TextFsmParser,
};
pub use platform::{PlatformDefinition, PlatformRegistry, PrivilegeLevel};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
