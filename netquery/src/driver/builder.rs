//! Builder for creating device drivers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::generic::GenericDriver;
use crate::channel::DEFAULT_SEARCH_DEPTH;
use crate::error::{DriverError, Result};
use crate::platform::{PlatformDefinition, PlatformRegistry};
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig};

/// Builder for [`GenericDriver`].
///
/// ```rust,no_run
/// use netquery::{Driver, DriverBuilder};
///
/// # async fn example() -> Result<(), netquery::Error> {
/// let mut driver = DriverBuilder::new("10.20.0.11")
///     .username("netops")
///     .password("secret")
///     .platform("cisco_iosxe")
///     .build()?;
///
/// driver.open().await?;
/// let response = driver.send_command("show clock").await?;
/// println!("{}", response.result);
/// driver.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DriverBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: Option<AuthMethod>,
    secondary_password: Option<SecretString>,
    platform_name: Option<String>,
    custom_platform: Option<PlatformDefinition>,
    timeout: Duration,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    search_depth: usize,
}

impl DriverBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: None,
            secondary_password: None,
            platform_name: None,
            custom_platform: None,
            timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Use password authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = Some(AuthMethod::Password(SecretString::from(password.into())));
        self
    }

    /// Use private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        });
        self
    }

    /// Password for privilege escalation (`enable`). Defaults to the login
    /// password.
    pub fn secondary_password(mut self, password: impl Into<String>) -> Self {
        self.secondary_password = Some(SecretString::from(password.into()));
        self
    }

    /// Select a registered platform by name (e.g. "cisco_iosxe").
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform_name = Some(platform.into());
        self
    }

    pub fn custom_platform(mut self, platform: PlatformDefinition) -> Self {
        self.custom_platform = Some(platform);
        self
    }

    /// Connection and per-command timeout (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Bytes from the end of the output scanned for a prompt.
    pub fn search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    /// Build the driver. Does not connect.
    pub fn build(self) -> Result<GenericDriver> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "username is required".to_string(),
        })?;

        let auth = self.auth.ok_or_else(|| DriverError::InvalidConfig {
            message: "a password or private key is required".to_string(),
        })?;

        let platform = match (self.custom_platform, self.platform_name) {
            (Some(custom), _) => custom,
            (None, Some(name)) => PlatformRegistry::lookup(&name)?,
            (None, None) => {
                return Err(DriverError::InvalidConfig {
                    message: "platform must be specified".to_string(),
                }
                .into());
            }
        };

        let ssh_config = SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth,
            timeout: self.timeout,
            terminal_width: platform.terminal_width,
            terminal_height: platform.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        GenericDriver::new(ssh_config, platform, self.secondary_password, self.search_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;

    #[test]
    fn test_build_cisco_driver() {
        let driver = DriverBuilder::new("10.20.0.11")
            .username("netops")
            .password("secret")
            .platform("cisco_iosxe")
            .build()
            .unwrap();

        assert_eq!(driver.platform().name, "cisco_iosxe");
        assert!(!driver.is_open());
        assert!(driver.current_privilege().is_none());
    }

    #[test]
    fn test_username_required() {
        let err = DriverBuilder::new("10.20.0.11")
            .password("secret")
            .platform("cisco_iosxe")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_platform_required() {
        let result = DriverBuilder::new("10.20.0.11")
            .username("netops")
            .password("secret")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_platform() {
        let result = DriverBuilder::new("10.20.0.11")
            .username("netops")
            .password("secret")
            .platform("nxos")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_platform_without_levels_rejected() {
        let result = DriverBuilder::new("10.20.0.11")
            .username("netops")
            .password("secret")
            .custom_platform(PlatformDefinition::new("empty"))
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_send_without_open() {
        let mut driver = DriverBuilder::new("10.20.0.11")
            .username("netops")
            .password("secret")
            .platform("cisco_iosxe")
            .build()
            .unwrap();

        let err = driver.send_command("show clock").await.unwrap_err();
        assert!(matches!(err, crate::Error::Driver(DriverError::NotConnected)));
        // Closing an unopened driver is a no-op
        driver.close().await.unwrap();
    }
}
