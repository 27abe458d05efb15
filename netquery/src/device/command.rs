//! The show commands a [`CiscoDevice`](super::CiscoDevice) can issue.

use std::fmt;

/// A fixed show command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowCommand {
    RunningConfig,
    InterfaceStatus,
    InterfaceBrief,
    InterfaceDescription,
    TrunkInterfaces,
    SnmpUser,
    EigrpNeighbors,
    EigrpTopology,
    EigrpInterfaces,
    CdpNeighbors,
    CdpNeighborsDetail,
    RoutingTable,
    RoutingTableSummary,
    Version,
    Clock,
    EnvironmentPower,
    EnvironmentTemperature,
    ArpTable,
    NatTranslations,
    MacAddressTable,
    Modules,
    SwitchInfo,
    SwitchDetail,
    Vlans,
    Tacacs,
    ErrdisableRecovery,
    AccessLists,
    IpProtocols,
    LicenseStatus,
    Platform,
    PowerInline,
    Redundancy,
    EtherchannelSummary,
}

impl ShowCommand {
    pub const ALL: [ShowCommand; 33] = [
        ShowCommand::RunningConfig,
        ShowCommand::InterfaceStatus,
        ShowCommand::InterfaceBrief,
        ShowCommand::InterfaceDescription,
        ShowCommand::TrunkInterfaces,
        ShowCommand::SnmpUser,
        ShowCommand::EigrpNeighbors,
        ShowCommand::EigrpTopology,
        ShowCommand::EigrpInterfaces,
        ShowCommand::CdpNeighbors,
        ShowCommand::CdpNeighborsDetail,
        ShowCommand::RoutingTable,
        ShowCommand::RoutingTableSummary,
        ShowCommand::Version,
        ShowCommand::Clock,
        ShowCommand::EnvironmentPower,
        ShowCommand::EnvironmentTemperature,
        ShowCommand::ArpTable,
        ShowCommand::NatTranslations,
        ShowCommand::MacAddressTable,
        ShowCommand::Modules,
        ShowCommand::SwitchInfo,
        ShowCommand::SwitchDetail,
        ShowCommand::Vlans,
        ShowCommand::Tacacs,
        ShowCommand::ErrdisableRecovery,
        ShowCommand::AccessLists,
        ShowCommand::IpProtocols,
        ShowCommand::LicenseStatus,
        ShowCommand::Platform,
        ShowCommand::PowerInline,
        ShowCommand::Redundancy,
        ShowCommand::EtherchannelSummary,
    ];

    /// The CLI text sent to the device.
    pub fn command(&self) -> &'static str {
        match self {
            ShowCommand::RunningConfig => "show running-config",
            ShowCommand::InterfaceStatus => "show interfaces status",
            ShowCommand::InterfaceBrief => "show ip interface brief",
            ShowCommand::InterfaceDescription => "show interface description",
            ShowCommand::TrunkInterfaces => "show interfaces trunk",
            ShowCommand::SnmpUser => "show snmp user",
            ShowCommand::EigrpNeighbors => "show ip eigrp neighbors",
            ShowCommand::EigrpTopology => "show ip eigrp topology",
            ShowCommand::EigrpInterfaces => "show ip eigrp interfaces",
            ShowCommand::CdpNeighbors => "show cdp neighbors",
            ShowCommand::CdpNeighborsDetail => "show cdp neighbors detail",
            ShowCommand::RoutingTable => "show ip route",
            ShowCommand::RoutingTableSummary => "show ip route summary",
            ShowCommand::Version => "show version",
            ShowCommand::Clock => "show clock",
            ShowCommand::EnvironmentPower => "show environment power all",
            ShowCommand::EnvironmentTemperature => "show environment temperature",
            ShowCommand::ArpTable => "show ip arp",
            ShowCommand::NatTranslations => "show ip nat translations",
            ShowCommand::MacAddressTable => "show mac address-table",
            ShowCommand::Modules => "show module",
            ShowCommand::SwitchInfo => "show switch",
            ShowCommand::SwitchDetail => "show switch detail",
            ShowCommand::Vlans => "show vlan",
            ShowCommand::Tacacs => "show tacacs",
            ShowCommand::ErrdisableRecovery => "show errdisable recovery",
            ShowCommand::AccessLists => "show access-lists",
            ShowCommand::IpProtocols => "show ip protocols",
            ShowCommand::LicenseStatus => "show license status",
            ShowCommand::Platform => "show platform",
            ShowCommand::PowerInline => "show power inline",
            ShowCommand::Redundancy => "show redundancy",
            ShowCommand::EtherchannelSummary => "show etherchannel summary",
        }
    }
}

impl fmt::Display for ShowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}
