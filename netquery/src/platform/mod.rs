//! Platform definitions for the devices the driver talks to.
//!
//! A platform bundles prompt patterns, privilege levels, failure strings
//! and session setup commands. Cisco IOS / IOS-XE ships built in.

mod definition;
mod privilege_level;
mod registry;
pub mod vendors;

pub use definition::PlatformDefinition;
pub use privilege_level::PrivilegeLevel;
pub use registry::PlatformRegistry;

/// Vendor hooks for cleaning up and classifying command output.
pub trait VendorBehavior: Send + Sync {
    /// Strip command echo and trailing prompt from raw channel output.
    fn normalize_output(&self, raw: &str, command: &str) -> String;

    /// Return a failure message if the output indicates the command failed.
    fn detect_failure(&self, output: &str) -> Option<String>;
}

/// Output handling shared by line-oriented CLIs.
pub struct DefaultBehavior;

impl VendorBehavior for DefaultBehavior {
    fn normalize_output(&self, raw: &str, command: &str) -> String {
        let text = raw.replace("\r\n", "\n");
        let text = text.trim_start_matches(['\r', '\n']);
        let output = text
            .strip_prefix(command)
            .unwrap_or(text)
            .trim_start_matches(['\r', '\n']);

        // Last line is the prompt
        match output.rfind('\n') {
            Some(pos) => output[..pos].trim_end_matches('\r').to_string(),
            None => String::new(),
        }
    }

    fn detect_failure(&self, _output: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_echo_and_prompt() {
        let raw = "show clock\r\n*10:42:17.123 UTC Mon Oct 19 2026\r\nedge-sw01#";
        let out = DefaultBehavior.normalize_output(raw, "show clock");
        assert_eq!(out, "*10:42:17.123 UTC Mon Oct 19 2026");
    }

    #[test]
    fn test_normalize_keeps_multiline_body() {
        let raw = "show ip arp\r\nProtocol  Address\r\nInternet  10.0.0.1\r\nedge-sw01#";
        let out = DefaultBehavior.normalize_output(raw, "show ip arp");
        assert_eq!(out, "Protocol  Address\nInternet  10.0.0.1");
    }

    #[test]
    fn test_normalize_prompt_only() {
        let out = DefaultBehavior.normalize_output("terminal length 0\r\nedge-sw01#", "terminal length 0");
        assert_eq!(out, "");
    }
}
