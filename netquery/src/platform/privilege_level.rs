//! Privilege level definition.

use regex::bytes::Regex;

/// One CLI mode of a device (user exec, privileged exec, configuration).
///
/// Levels form a tree through `previous_priv`; the driver walks the tree
/// with `escalate_command` (parent to child) and `deescalate_command`
/// (child to parent).
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    pub name: String,

    /// Prompt pattern identifying this level.
    pub pattern: Regex,

    /// Parent level; `None` for the root.
    pub previous_priv: Option<String>,

    /// Command that enters this level from its parent.
    pub escalate_command: Option<String>,

    /// Command that leaves this level for its parent.
    pub deescalate_command: Option<String>,

    /// Password prompt shown after `escalate_command`, when one is expected.
    pub escalate_prompt: Option<Regex>,

    /// Substrings that rule a prompt out even when `pattern` matches.
    pub not_contains: Vec<String>,
}

impl PrivilegeLevel {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            previous_priv: None,
            escalate_command: None,
            deescalate_command: None,
            escalate_prompt: None,
            not_contains: vec![],
        })
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.previous_priv = Some(parent.into());
        self
    }

    pub fn with_escalate(mut self, command: impl Into<String>) -> Self {
        self.escalate_command = Some(command.into());
        self
    }

    pub fn with_deescalate(mut self, command: impl Into<String>) -> Self {
        self.deescalate_command = Some(command.into());
        self
    }

    /// Expect a password prompt matching `prompt_pattern` when escalating.
    pub fn with_auth(mut self, prompt_pattern: &str) -> Result<Self, regex::Error> {
        self.escalate_prompt = Some(Regex::new(prompt_pattern)?);
        Ok(self)
    }

    pub fn with_not_contains(mut self, pattern: impl Into<String>) -> Self {
        self.not_contains.push(pattern.into());
        self
    }

    /// Whether `prompt` belongs to this level.
    pub fn matches(&self, prompt: &str) -> bool {
        !self.not_contains.iter().any(|nc| prompt.contains(nc.as_str()))
            && self.pattern.is_match(prompt.as_bytes())
    }
}
