//! Generic driver implementation that works with any platform.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use regex::bytes::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::Driver;
use super::privilege::PrivilegeManager;
use super::response::Response;
use crate::channel::PtyChannel;
use crate::error::{ChannelError, DriverError, Result};
use crate::platform::{DefaultBehavior, PlatformDefinition, VendorBehavior};
use crate::transport::{SshConfig, SshTransport};

struct Connection {
    transport: SshTransport,
    channel: PtyChannel,
}

/// Driver for any platform definition over an SSH PTY shell.
pub struct GenericDriver {
    ssh_config: SshConfig,
    platform: PlatformDefinition,
    behavior: Arc<dyn VendorBehavior>,

    /// `None` while disconnected.
    connection: Option<Connection>,

    privilege_manager: PrivilegeManager,
    timeout: Duration,
    search_depth: usize,

    /// Matches the prompt of any privilege level.
    prompt_pattern: Regex,

    /// Password answered at escalation prompts (e.g. `enable`).
    secondary_password: Option<SecretString>,
}

impl GenericDriver {
    /// Create a driver; nothing is connected until [`Driver::open`].
    pub fn new(
        ssh_config: SshConfig,
        platform: PlatformDefinition,
        secondary_password: Option<SecretString>,
        search_depth: usize,
    ) -> Result<Self> {
        let prompt_pattern = Self::build_combined_pattern(&platform)?;
        let behavior = platform
            .behavior
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultBehavior));

        Ok(Self {
            timeout: ssh_config.timeout,
            privilege_manager: PrivilegeManager::new(platform.privilege_levels.clone()),
            ssh_config,
            platform,
            behavior,
            connection: None,
            search_depth,
            prompt_pattern,
            secondary_password,
        })
    }

    fn build_combined_pattern(platform: &PlatformDefinition) -> Result<Regex> {
        let combined = platform
            .privilege_levels
            .values()
            .map(|level| format!("(?:{})", level.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        if combined.is_empty() {
            return Err(DriverError::InvalidConfig {
                message: format!("platform '{}' defines no privilege levels", platform.name),
            }
            .into());
        }

        Ok(Regex::new(&combined).map_err(ChannelError::InvalidPattern)?)
    }

    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    pub fn privilege_manager(&self) -> &PrivilegeManager {
        &self.privilege_manager
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn channel(&mut self) -> Result<&mut PtyChannel> {
        self.connection
            .as_mut()
            .map(|conn| &mut conn.channel)
            .ok_or_else(|| DriverError::NotConnected.into())
    }

    /// The text of the last prompt in `data`.
    fn extract_prompt(&self, data: &[u8]) -> String {
        self.prompt_pattern
            .find_iter(data)
            .last()
            .map(|m| String::from_utf8_lossy(m.as_bytes()).trim().to_string())
            .unwrap_or_default()
    }

    /// Read up to the next prompt; returns (output, prompt).
    async fn read_until_prompt(&mut self) -> Result<(String, String)> {
        let timeout = self.timeout;
        let pattern = self.prompt_pattern.clone();
        let data = self.channel()?.read_until(&pattern, timeout).await?;

        let prompt = self.extract_prompt(&data);
        self.privilege_manager.update_from_prompt(&prompt);

        Ok((String::from_utf8_lossy(&data).into_owned(), prompt))
    }

    /// Password set for privilege escalation, if any.
    pub(crate) fn secondary_password(&self) -> Option<&str> {
        self.secondary_password.as_ref().map(|p| p.expose_secret())
    }

    fn escalation_password(&self) -> Option<&str> {
        self.secondary_password()
            .or_else(|| self.ssh_config.auth.password().map(|p| p.expose_secret()))
    }
}

impl Driver for GenericDriver {
    async fn open(&mut self) -> Result<()> {
        if self.connection.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(self.ssh_config.clone()).await?;
        let channel = transport.open_pty(self.search_depth).await?;
        self.connection = Some(Connection { transport, channel });

        let (_, prompt) = self.read_until_prompt().await?;
        debug!(
            "{}: initial prompt {:?} ({:?})",
            self.ssh_config.host,
            prompt,
            self.current_privilege()
        );

        let default = self.platform.default_privilege.clone();
        if !default.is_empty() {
            self.acquire_privilege(&default).await?;
        }

        for cmd in self.platform.on_open_commands.clone() {
            self.send_command(&cmd).await?;
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let Some(mut conn) = self.connection.take() else {
            return Ok(());
        };
        self.privilege_manager.reset();

        for cmd in &self.platform.on_close_commands {
            if let Err(e) = conn.channel.write_line(cmd).await {
                trace!("on_close command {:?} not sent: {}", cmd, e);
            }
        }
        if let Err(e) = conn.channel.close().await {
            trace!("channel close: {}", e);
        }

        conn.transport.close().await
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let start = Instant::now();
        self.channel()?.write_line(command).await?;
        let (raw_result, prompt) = self.read_until_prompt().await?;
        let elapsed = start.elapsed();

        let result = self.behavior.normalize_output(&raw_result, command);
        let response = Response::new(command, result, raw_result, prompt, elapsed);

        let failure = self
            .behavior
            .detect_failure(&response.result)
            .or_else(|| self.platform.failure_in(&response.result).map(str::to_string));

        match failure {
            Some(message) => {
                warn!("{}: '{}' failed: {}", self.ssh_config.host, command, message);
                Ok(response.with_failure(message))
            }
            None => {
                debug!("{}: '{}' completed in {:?}", self.ssh_config.host, command, elapsed);
                Ok(response)
            }
        }
    }

    async fn acquire_privilege(&mut self, target: &str) -> Result<()> {
        let current = self
            .privilege_manager
            .current()
            .map(|l| l.name.clone())
            .ok_or_else(|| DriverError::UnknownPrivilege {
                prompt: String::new(),
            })?;

        let path = self.privilege_manager.find_path(&current, target)?;

        for hop in path.windows(2) {
            let (from, to) = (&hop[0], &hop[1]);
            let transition = self
                .privilege_manager
                .get_transition(from, to)
                .ok_or_else(|| DriverError::NoPrivilegePath {
                    from: from.clone(),
                    to: to.clone(),
                })?;

            debug!("{}: {} -> {} via '{}'", self.ssh_config.host, from, to, transition.command);
            self.channel()?.write_line(&transition.command).await?;

            if let Some(auth_prompt) = transition.auth_prompt {
                let timeout = self.timeout;
                let password = self
                    .escalation_password()
                    .map(str::to_string)
                    .ok_or_else(|| DriverError::PrivilegeAcquisitionFailed { target: to.clone() })?;

                let channel = self.channel()?;
                channel.read_until(&auth_prompt, timeout).await?;
                channel.write_line(&password).await?;
            }

            self.read_until_prompt().await?;
            if self.current_privilege() != Some(to.as_str()) {
                return Err(DriverError::PrivilegeAcquisitionFailed { target: to.clone() }.into());
            }
        }

        Ok(())
    }

    fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    fn current_privilege(&self) -> Option<&str> {
        self.privilege_manager.current().map(|l| l.name.as_str())
    }
}
