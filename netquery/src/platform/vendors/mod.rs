//! Built-in vendor platform definitions.

pub mod cisco_iosxe;
