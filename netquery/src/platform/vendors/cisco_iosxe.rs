//! Cisco IOS / IOS-XE platform definition.
//!
//! Privilege levels:
//! - `exec` - user EXEC, `>` prompt
//! - `privilege_exec` - privileged EXEC, `#` prompt, reached with `enable`
//! - `configuration` - `(config*)#` prompt
//!
//! ```text
//! edge-sw01>                 # exec
//! edge-sw01#                 # privilege_exec
//! edge-sw01(config)#         # configuration
//! edge-sw01(config-if)#      # configuration sub-mode
//! ```

use crate::platform::{PlatformDefinition, PrivilegeLevel};

/// Create the Cisco IOS-XE platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-@/:]{1,63}>\s?$")
        .expect("static exec prompt");

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/:]{1,63}#\s?$")
        .expect("static privilege_exec prompt")
        .with_parent("exec")
        .with_escalate("enable")
        .with_deescalate("disable")
        .with_auth(r"(?mi)^(?:enable\s)?password:\s?$")
        .expect("static enable prompt")
        .with_not_contains("(conf");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-@/:]{1,63}\(conf[\w.\-@/:+]{0,32}\)#\s?$",
    )
    .expect("static configuration prompt")
    .with_parent("privilege_exec")
    .with_escalate("configure terminal")
    .with_deescalate("end");

    PlatformDefinition::new("cisco_iosxe")
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_default_privilege("privilege_exec")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Invalid input detected")
        .with_failure_pattern("% Unknown command")
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 512")
        .with_on_close_command("exit")
        .with_terminal_size(512, 24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let platform = platform();
        assert_eq!(platform.name, "cisco_iosxe");
        let names: Vec<_> = platform.privilege_levels.keys().cloned().collect();
        assert_eq!(names, vec!["exec", "privilege_exec", "configuration"]);
        assert_eq!(platform.default_privilege, "privilege_exec");
        platform.validate().unwrap();
    }

    #[test]
    fn test_exec_prompt() {
        let platform = platform();
        let exec = &platform.privilege_levels["exec"];
        assert!(exec.matches("edge-sw01>"));
        assert!(exec.matches("NER0502D01.corp>"));
        assert!(!exec.matches("edge-sw01#"));
    }

    #[test]
    fn test_privilege_exec_prompt_excludes_config() {
        let platform = platform();
        let priv_exec = &platform.privilege_levels["privilege_exec"];
        assert!(priv_exec.matches("edge-sw01#"));
        assert!(priv_exec.matches("edge-sw01# "));
        assert!(!priv_exec.matches("edge-sw01(config)#"));
        assert!(!priv_exec.matches("edge-sw01(config-if)#"));
        assert!(!priv_exec.matches("edge-sw01>"));
    }

    #[test]
    fn test_configuration_prompt() {
        let platform = platform();
        let config = &platform.privilege_levels["configuration"];
        assert!(config.matches("edge-sw01(config)#"));
        assert!(config.matches("edge-sw01(config-if)#"));
        assert!(config.matches("edge-sw01(config-router)#"));
        assert!(!config.matches("edge-sw01#"));
    }

    #[test]
    fn test_enable_password_prompt() {
        let platform = platform();
        let auth = platform.privilege_levels["privilege_exec"]
            .escalate_prompt
            .as_ref()
            .unwrap();
        assert!(auth.is_match(b"Password: "));
        assert!(auth.is_match(b"enable\r\nPassword:"));
    }

    #[test]
    fn test_failure_patterns() {
        let platform = platform();
        let output = "show ip eigrp neighbors\n                ^\n% Invalid input detected at '^' marker.";
        assert_eq!(platform.failure_in(output), Some("% Invalid input detected"));
        assert_eq!(platform.failure_in("Vlan1  10.0.0.1  YES NVRAM  up  up"), None);
    }

    #[test]
    fn test_paging_disabled_on_open() {
        let platform = platform();
        assert_eq!(
            platform.on_open_commands,
            vec!["terminal length 0".to_string(), "terminal width 512".to_string()]
        );
    }
}
