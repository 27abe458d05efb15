//! One-shot show commands against Cisco IOS / IOS-XE devices.
//!
//! Every call on [`CiscoDevice`] opens a fresh SSH session, escalates to
//! privileged exec, sends exactly one command, and closes the session again
//! before the output is structured. Nothing is cached between calls.
//!
//! ```rust,no_run
//! use netquery::{CiscoDevice, ParseMode, ParserSet, TextFsmParser};
//!
//! # async fn example() -> Result<(), netquery::Error> {
//! let device = CiscoDevice::new("10.20.0.11", "netops", "secret").with_parsers(
//!     ParserSet::new().with_textfsm(TextFsmParser::new("cisco_ios").with_directory("templates")),
//! );
//!
//! println!("{}", device.clock(ParseMode::Raw).await?);
//! let vlans = device.vlans("textfsm").await?;
//! # Ok(())
//! # }
//! ```

mod command;
mod version;

pub use command::ShowCommand;
pub use version::VersionInfo;

use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use secrecy::{ExposeSecret, SecretString};

use crate::driver::{Driver, DriverBuilder, GenericDriver, Response};
use crate::error::Result;
use crate::parse::{CommandOutput, ParseMode, ParserSet};
use crate::transport::HostKeyVerification;

/// Produces unopened driver sessions for a device.
pub trait Connector: Send + Sync {
    type Session: Driver;

    /// Host the sessions connect to.
    fn host(&self) -> &str;

    /// A new session; not yet opened.
    fn session(&self) -> Result<Self::Session>;
}

/// Opens SSH sessions through [`DriverBuilder`].
///
/// The login password is also answered at the `enable` prompt.
#[derive(Debug, Clone)]
pub struct SshConnector {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    platform: String,
    timeout: Duration,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl SshConnector {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            password: SecretString::from(password.into()),
            platform: "cisco_iosxe".to_string(),
            timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::Disabled,
            known_hosts_path: None,
        }
    }
}

impl Connector for SshConnector {
    type Session = GenericDriver;

    fn host(&self) -> &str {
        &self.host
    }

    fn session(&self) -> Result<GenericDriver> {
        let password = self.password.expose_secret();
        let mut builder = DriverBuilder::new(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(password)
            .secondary_password(password)
            .platform(&self.platform)
            .timeout(self.timeout)
            .host_key_verification(self.host_key_verification.clone());

        if let Some(path) = &self.known_hosts_path {
            builder = builder.known_hosts_path(path);
        }

        builder.build()
    }
}

/// A Cisco IOS / IOS-XE device queried one command at a time.
#[derive(Debug, Clone)]
pub struct CiscoDevice<C = SshConnector> {
    connector: C,
    parsers: ParserSet,
}

impl CiscoDevice<SshConnector> {
    /// A device reached over SSH on port 22 with default settings.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_connector(SshConnector::new(host, username, password))
    }

    pub fn builder(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> CiscoDeviceBuilder {
        CiscoDeviceBuilder {
            connector: SshConnector::new(host, username, password),
            parsers: ParserSet::new(),
        }
    }
}

impl<C: Connector> CiscoDevice<C> {
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            parsers: ParserSet::new(),
        }
    }

    /// Parsers used for the `Genie` and `TextFsm` modes.
    pub fn with_parsers(mut self, parsers: ParserSet) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn host(&self) -> &str {
        self.connector.host()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Run a single arbitrary command in a session of its own.
    ///
    /// The session is closed whether or not the command succeeded; an error
    /// from sending takes precedence over one from closing.
    pub async fn run_raw(&self, command: &str) -> Result<Response> {
        let mut session = self.connector.session()?;

        if let Err(e) = session.open().await {
            if let Err(close_err) = session.close().await {
                debug!("{}: close after failed open: {}", self.host(), close_err);
            }
            return Err(e);
        }

        let sent = session.send_command(command).await;
        let closed = session.close().await;

        let response = sent?;
        closed?;
        Ok(response)
    }

    /// Run `command` and structure its output according to `mode`.
    pub async fn run(&self, command: ShowCommand, mode: impl Into<ParseMode>) -> Result<CommandOutput> {
        let mode = mode.into();
        let response = self.run_raw(command.command()).await?;
        self.parsers.apply(mode, command.command(), response.result).await
    }

    /// Full running configuration, always as raw text.
    ///
    /// Unlike the show accessors, output the device flags as failed is an
    /// error ([`DriverError::CommandFailed`](crate::error::DriverError::CommandFailed)).
    pub async fn configuration(&self) -> Result<String> {
        let response = self.run_raw(ShowCommand::RunningConfig.command()).await?;
        Ok(response.into_result()?.result)
    }

    /// `show version` through the Genie parser.
    pub async fn version_info(&self) -> Result<VersionInfo> {
        let output = self.run(ShowCommand::Version, ParseMode::Genie).await?;
        Ok(VersionInfo::new(output.into_value()))
    }

    pub async fn chassis(&self) -> Result<String> {
        Ok(self.version_info().await?.chassis()?.to_string())
    }

    pub async fn image_id(&self) -> Result<String> {
        Ok(self.version_info().await?.image_id()?.to_string())
    }

    pub async fn system_image(&self) -> Result<String> {
        Ok(self.version_info().await?.system_image()?.to_string())
    }

    pub async fn os(&self) -> Result<String> {
        Ok(self.version_info().await?.os()?.to_string())
    }

    /// Platform string from `show version`. For `show platform` see
    /// [`platform_info`](Self::platform_info).
    pub async fn platform(&self) -> Result<String> {
        Ok(self.version_info().await?.platform()?.to_string())
    }

    pub async fn chassis_serial(&self) -> Result<String> {
        Ok(self.version_info().await?.chassis_serial()?.to_string())
    }

    /// Number of members in the switch stack.
    pub async fn switch_count(&self) -> Result<usize> {
        Ok(self.version_info().await?.switch_count()?)
    }
}

macro_rules! show_accessors {
    ($($name:ident => $command:ident,)*) => {
        impl<C: Connector> CiscoDevice<C> {
            $(
                #[doc = concat!("Runs [`ShowCommand::", stringify!($command), "`].")]
                pub async fn $name(&self, mode: impl Into<ParseMode>) -> Result<CommandOutput> {
                    self.run(ShowCommand::$command, mode).await
                }
            )*
        }
    };
}

show_accessors! {
    interface_status => InterfaceStatus,
    interface_brief => InterfaceBrief,
    interface_description => InterfaceDescription,
    trunk_interfaces => TrunkInterfaces,
    snmp_user => SnmpUser,
    eigrp_neighbors => EigrpNeighbors,
    eigrp_topology => EigrpTopology,
    eigrp_interfaces => EigrpInterfaces,
    cdp_neighbors => CdpNeighbors,
    cdp_neighbors_detail => CdpNeighborsDetail,
    routing_table => RoutingTable,
    routing_table_summary => RoutingTableSummary,
    os_version => Version,
    clock => Clock,
    environment_power => EnvironmentPower,
    environment_temperature => EnvironmentTemperature,
    arp_table => ArpTable,
    nat_translations => NatTranslations,
    mac_address_table => MacAddressTable,
    modules => Modules,
    switch_info => SwitchInfo,
    switch_detail => SwitchDetail,
    vlans => Vlans,
    tacacs => Tacacs,
    errdisable_recovery => ErrdisableRecovery,
    access_lists => AccessLists,
    ip_protocols => IpProtocols,
    license_status => LicenseStatus,
    platform_info => Platform,
    power_inline => PowerInline,
    redundancy => Redundancy,
    etherchannel_summary => EtherchannelSummary,
}

/// Builder for an SSH-backed [`CiscoDevice`].
#[derive(Debug, Clone)]
pub struct CiscoDeviceBuilder {
    connector: SshConnector,
    parsers: ParserSet,
}

impl CiscoDeviceBuilder {
    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.connector.port = port;
        self
    }

    /// Connection and per-command timeout (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.connector.timeout = timeout;
        self
    }

    /// Registered platform name (default: `cisco_iosxe`).
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.connector.platform = platform.into();
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.connector.host_key_verification = mode;
        self
    }

    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.connector.known_hosts_path = Some(path.into());
        self
    }

    pub fn parsers(mut self, parsers: ParserSet) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn build(self) -> CiscoDevice<SshConnector> {
        CiscoDevice::with_connector(self.connector).with_parsers(self.parsers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_connector_builds_cisco_session() {
        let device = CiscoDevice::new("10.20.0.11", "netops", "secret");
        assert_eq!(device.host(), "10.20.0.11");

        let session = device.connector().session().unwrap();
        assert_eq!(session.platform().name, "cisco_iosxe");
        assert!(!session.is_open());
    }

    #[test]
    fn test_login_password_answers_enable() {
        let device = CiscoDevice::builder("10.20.0.11", "netops", "s3cret")
            .platform("cisco_ios")
            .build();
        let session = device.connector().session().unwrap();
        assert_eq!(session.secondary_password(), Some("s3cret"));
    }

    #[test]
    fn test_builder_unknown_platform_fails_at_session() {
        let device = CiscoDevice::builder("10.20.0.11", "netops", "secret")
            .platform("nxos")
            .port(2222)
            .build();
        assert!(device.connector().session().is_err());
    }

    #[test]
    fn test_password_is_redacted() {
        let device = CiscoDevice::new("10.20.0.11", "netops", "hunter2");
        assert!(!format!("{device:?}").contains("hunter2"));
    }
}
