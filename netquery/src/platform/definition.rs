//! Platform definition.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::VendorBehavior;
use super::privilege_level::PrivilegeLevel;
use crate::error::PlatformError;

/// Everything the driver needs to know about a device family.
#[derive(Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g. "cisco_iosxe").
    pub name: String,

    /// Privilege levels, in prompt-matching order.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Privilege level the driver moves to after login.
    pub default_privilege: String,

    /// Output substrings that mark a command as failed.
    pub failed_when_contains: Vec<String>,

    /// Commands sent once the default privilege level is reached.
    pub on_open_commands: Vec<String>,

    /// Commands written (without waiting for a prompt) before disconnecting.
    pub on_close_commands: Vec<String>,

    /// Terminal width for the PTY.
    pub terminal_width: u32,

    /// Terminal height for the PTY.
    pub terminal_height: u32,

    /// Output normalization hooks; `DefaultBehavior` when unset.
    pub behavior: Option<Arc<dyn VendorBehavior>>,
}

impl PlatformDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            default_privilege: String::new(),
            failed_when_contains: vec![],
            on_open_commands: vec![],
            on_close_commands: vec![],
            terminal_width: 511,
            terminal_height: 24,
            behavior: None,
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    pub fn with_default_privilege(mut self, name: impl Into<String>) -> Self {
        self.default_privilege = name.into();
        self
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    pub fn with_on_close_command(mut self, command: impl Into<String>) -> Self {
        self.on_close_commands.push(command.into());
        self
    }

    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    pub fn with_behavior(mut self, behavior: Arc<dyn VendorBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Check that the default level and every parent level exist.
    pub fn validate(&self) -> Result<(), PlatformError> {
        let invalid = |message: String| PlatformError::InvalidDefinition { message };

        if !self.privilege_levels.contains_key(&self.default_privilege) {
            return Err(invalid(format!(
                "{}: default privilege '{}' is not defined",
                self.name, self.default_privilege
            )));
        }

        for level in self.privilege_levels.values() {
            let unknown = level
                .previous_priv
                .as_ref()
                .filter(|parent| !self.privilege_levels.contains_key(parent.as_str()));
            if let Some(parent) = unknown {
                return Err(invalid(format!(
                    "{}: level '{}' has unknown parent '{}'",
                    self.name, level.name, parent
                )));
            }
        }
        Ok(())
    }

    /// The first failure pattern contained in `output`, if any.
    pub fn failure_in(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }
}

impl fmt::Debug for PlatformDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformDefinition")
            .field("name", &self.name)
            .field("privilege_levels", &self.privilege_levels)
            .field("default_privilege", &self.default_privilege)
            .field("failed_when_contains", &self.failed_when_contains)
            .field("on_open_commands", &self.on_open_commands)
            .field("on_close_commands", &self.on_close_commands)
            .field("terminal_width", &self.terminal_width)
            .field("terminal_height", &self.terminal_height)
            .field("behavior", &self.behavior.as_ref().map(|_| "<VendorBehavior>"))
            .finish()
    }
}
