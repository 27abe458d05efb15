//! Privilege level tracking and navigation.

use indexmap::IndexMap;
use regex::bytes::Regex;

use crate::error::{DriverError, Result};
use crate::platform::PrivilegeLevel;

/// Tracks the current privilege level and plans moves between levels.
///
/// Levels form a tree through `previous_priv`, so the route between two
/// levels climbs from the source to the closest common ancestor and
/// descends to the target.
#[derive(Debug)]
pub struct PrivilegeManager {
    levels: IndexMap<String, PrivilegeLevel>,
    current: Option<String>,
}

/// A single hop between adjacent privilege levels.
#[derive(Debug, Clone)]
pub struct TransitionInfo {
    /// Command that performs the hop.
    pub command: String,

    /// Password prompt to answer after the command, if any.
    pub auth_prompt: Option<Regex>,
}

impl PrivilegeManager {
    pub fn new(levels: IndexMap<String, PrivilegeLevel>) -> Self {
        Self {
            levels,
            current: None,
        }
    }

    /// The first level whose pattern matches `prompt`.
    pub fn determine_from_prompt(&self, prompt: &str) -> Result<&PrivilegeLevel> {
        self.levels
            .values()
            .find(|level| level.matches(prompt))
            .ok_or_else(|| {
                DriverError::UnknownPrivilege {
                    prompt: prompt.to_string(),
                }
                .into()
            })
    }

    /// Record the level matching `prompt` as current, if any matches.
    pub fn update_from_prompt(&mut self, prompt: &str) -> Option<&str> {
        let name = self.determine_from_prompt(prompt).ok()?.name.clone();
        self.current = Some(name);
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&PrivilegeLevel> {
        self.current.as_ref().and_then(|name| self.levels.get(name))
    }

    pub fn set_current(&mut self, name: &str) -> Result<()> {
        if !self.levels.contains_key(name) {
            return Err(DriverError::UnknownPrivilege {
                prompt: name.to_string(),
            }
            .into());
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Forget the current level (after disconnecting).
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// `name` followed by each of its ancestors up to the root.
    fn lineage(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut next = Some(name.to_string());
        while let Some(level) = next.and_then(|n| self.levels.get(&n)) {
            if chain.contains(&level.name) {
                break;
            }
            chain.push(level.name.clone());
            next = level.previous_priv.clone();
        }
        chain
    }

    /// Levels to traverse from `from` to `to`, both ends included.
    pub fn find_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let no_path = || -> crate::Error {
            DriverError::NoPrivilegePath {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into()
        };

        let up = self.lineage(from);
        let down = self.lineage(to);
        if up.is_empty() || down.is_empty() {
            return Err(no_path());
        }

        let (up_idx, down_idx) = up
            .iter()
            .enumerate()
            .find_map(|(i, name)| down.iter().position(|d| d == name).map(|j| (i, j)))
            .ok_or_else(no_path)?;

        let mut path: Vec<String> = up[..=up_idx].to_vec();
        path.extend(down[..down_idx].iter().rev().cloned());
        Ok(path)
    }

    /// The command for a hop between two adjacent levels.
    pub fn get_transition(&self, from: &str, to: &str) -> Option<TransitionInfo> {
        let from_level = self.levels.get(from)?;
        let to_level = self.levels.get(to)?;

        if to_level.previous_priv.as_deref() == Some(from) {
            return Some(TransitionInfo {
                command: to_level.escalate_command.clone()?,
                auth_prompt: to_level.escalate_prompt.clone(),
            });
        }

        if from_level.previous_priv.as_deref() == Some(to) {
            return Some(TransitionInfo {
                command: from_level.deescalate_command.clone()?,
                auth_prompt: None,
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::vendors::cisco_iosxe;

    fn manager() -> PrivilegeManager {
        PrivilegeManager::new(cisco_iosxe::platform().privilege_levels)
    }

    #[test]
    fn test_determine_privilege() {
        let manager = manager();
        assert_eq!(manager.determine_from_prompt("sw1>").unwrap().name, "exec");
        assert_eq!(manager.determine_from_prompt("sw1#").unwrap().name, "privilege_exec");
        assert_eq!(
            manager.determine_from_prompt("sw1(config-if)#").unwrap().name,
            "configuration"
        );
        assert!(manager.determine_from_prompt("login: ").is_err());
    }

    #[test]
    fn test_update_from_prompt() {
        let mut manager = manager();
        assert!(manager.current().is_none());
        assert_eq!(manager.update_from_prompt("sw1>"), Some("exec"));
        assert_eq!(manager.update_from_prompt("garbage"), None);
        assert_eq!(manager.current().unwrap().name, "exec");
        manager.reset();
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_find_path() {
        let manager = manager();
        assert_eq!(
            manager.find_path("exec", "configuration").unwrap(),
            vec!["exec", "privilege_exec", "configuration"]
        );
        assert_eq!(
            manager.find_path("configuration", "exec").unwrap(),
            vec!["configuration", "privilege_exec", "exec"]
        );
        assert_eq!(manager.find_path("exec", "exec").unwrap(), vec!["exec"]);
        assert!(manager.find_path("exec", "shell").is_err());
    }

    #[test]
    fn test_find_path_between_siblings() {
        let mut levels = cisco_iosxe::platform().privilege_levels;
        let tclsh = PrivilegeLevel::new("tclsh", r"\(tcl\)#\s?$")
            .unwrap()
            .with_parent("privilege_exec")
            .with_escalate("tclsh")
            .with_deescalate("tclquit");
        levels.insert("tclsh".to_string(), tclsh);

        let manager = PrivilegeManager::new(levels);
        assert_eq!(
            manager.find_path("configuration", "tclsh").unwrap(),
            vec!["configuration", "privilege_exec", "tclsh"]
        );
    }

    #[test]
    fn test_get_transition() {
        let manager = manager();

        let enable = manager.get_transition("exec", "privilege_exec").unwrap();
        assert_eq!(enable.command, "enable");
        assert!(enable.auth_prompt.is_some());

        let disable = manager.get_transition("privilege_exec", "exec").unwrap();
        assert_eq!(disable.command, "disable");
        assert!(disable.auth_prompt.is_none());

        assert!(manager.get_transition("exec", "configuration").is_none());
    }
}
