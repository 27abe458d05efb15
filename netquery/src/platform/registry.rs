//! Global platform registry.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use super::definition::PlatformDefinition;
use super::vendors;
use crate::error::{PlatformError, Result};

static REGISTRY: LazyLock<RwLock<PlatformRegistry>> = LazyLock::new(|| {
    let mut registry = PlatformRegistry::new();
    registry.register_builtin_platforms();
    RwLock::new(registry)
});

/// Platform definitions by name.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: HashMap<String, PlatformDefinition>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, seeded with the built-in platforms.
    pub fn global() -> &'static RwLock<PlatformRegistry> {
        &REGISTRY
    }

    /// Look up a platform in the global registry and clone it.
    pub fn lookup(name: &str) -> Result<PlatformDefinition> {
        // Entries are only inserted whole, so a poisoned lock is still consistent
        let registry = Self::global().read().unwrap_or_else(PoisonError::into_inner);

        registry.get(name).cloned().ok_or_else(|| {
            PlatformError::UnknownPlatform {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn register_builtin_platforms(&mut self) {
        let cisco = vendors::cisco_iosxe::platform();
        // IOS and IOS-XE share prompts and paging commands
        self.platforms.insert("cisco_ios".to_string(), cisco.clone());
        self.platforms.insert(cisco.name.clone(), cisco);
    }

    /// Register a platform; names must be unique and the definition valid.
    pub fn register(&mut self, platform: PlatformDefinition) -> Result<()> {
        platform.validate()?;
        if self.platforms.contains_key(&platform.name) {
            return Err(PlatformError::AlreadyRegistered {
                name: platform.name.clone(),
            }
            .into());
        }
        self.platforms.insert(platform.name.clone(), platform);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PlatformDefinition> {
        self.platforms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PrivilegeLevel;

    #[test]
    fn test_builtin_cisco_platforms() {
        let platform = PlatformRegistry::lookup("cisco_iosxe").unwrap();
        assert_eq!(platform.name, "cisco_iosxe");
        assert!(PlatformRegistry::lookup("cisco_ios").is_ok());
    }

    #[test]
    fn test_unknown_platform() {
        let err = PlatformRegistry::lookup("vyos").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Platform(PlatformError::UnknownPlatform { ref name }) if name == "vyos"
        ));
    }

    fn lab() -> PlatformDefinition {
        PlatformDefinition::new("lab")
            .with_privilege(PrivilegeLevel::new("exec", r">\s?$").unwrap())
            .with_default_privilege("exec")
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = PlatformRegistry::new();
        registry.register(lab()).unwrap();
        assert!(matches!(
            registry.register(lab()).unwrap_err(),
            crate::Error::Platform(PlatformError::AlreadyRegistered { .. })
        ));
        assert!(registry.contains("lab"));
    }

    #[test]
    fn test_invalid_definition_rejected() {
        let mut registry = PlatformRegistry::new();
        let err = registry
            .register(lab().with_default_privilege("privilege_exec"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Platform(PlatformError::InvalidDefinition { .. })
        ));
        assert!(!registry.contains("lab"));
    }
}
