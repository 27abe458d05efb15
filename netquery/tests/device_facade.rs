//! CiscoDevice against an in-memory session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use netquery::error::{ChannelError, DriverError, TransportError};
use netquery::{
    CiscoDevice, CommandOutput, Connector, Driver, OutputParser, ParseMode, ParserSet, Response,
    Result, ShowCommand,
};

#[derive(Debug, Default)]
struct SessionLog {
    sessions: usize,
    opened: usize,
    closed: usize,
    commands: Vec<String>,
}

#[derive(Clone, Default)]
struct FakeConnector {
    log: Arc<Mutex<SessionLog>>,
    fail_open: bool,
    fail_send: bool,
    reject: bool,
}

struct FakeSession {
    log: Arc<Mutex<SessionLog>>,
    open: bool,
    fail_open: bool,
    fail_send: bool,
    reject: bool,
}

impl Connector for FakeConnector {
    type Session = FakeSession;

    fn host(&self) -> &str {
        "sw1.lab"
    }

    fn session(&self) -> Result<FakeSession> {
        self.log.lock().unwrap().sessions += 1;
        Ok(FakeSession {
            log: self.log.clone(),
            open: false,
            fail_open: self.fail_open,
            fail_send: self.fail_send,
            reject: self.reject,
        })
    }
}

impl Driver for FakeSession {
    async fn open(&mut self) -> Result<()> {
        self.log.lock().unwrap().opened += 1;
        if self.fail_open {
            return Err(TransportError::Timeout(Duration::from_secs(30)).into());
        }
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.open {
            self.log.lock().unwrap().closed += 1;
            self.open = false;
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        if !self.open {
            return Err(DriverError::NotConnected.into());
        }
        self.log.lock().unwrap().commands.push(command.to_string());
        if self.fail_send {
            return Err(ChannelError::Closed.into());
        }
        let output = if self.reject {
            "% Invalid input detected at '^' marker.".to_string()
        } else {
            format!("output of {command}")
        };
        let response = Response::new(
            command,
            output.clone(),
            format!("{command}\n{output}\nsw1#"),
            "sw1#",
            Duration::from_millis(5),
        );
        Ok(if self.reject {
            response.with_failure("% Invalid input detected")
        } else {
            response
        })
    }

    async fn acquire_privilege(&mut self, _privilege: &str) -> Result<()> {
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn current_privilege(&self) -> Option<&str> {
        self.open.then_some("privilege_exec")
    }
}

/// Tags its output with the parser name and the command it was given.
struct Tagging(&'static str);

#[async_trait]
impl OutputParser for Tagging {
    async fn parse(&self, command: &str, raw: &str) -> Result<Value> {
        Ok(json!({ "parser": self.0, "command": command, "raw": raw }))
    }
}

/// Returns a fixed Genie `show version` document.
struct GenieVersion(Value);

#[async_trait]
impl OutputParser for GenieVersion {
    async fn parse(&self, _command: &str, _raw: &str) -> Result<Value> {
        Ok(self.0.clone())
    }
}

fn device(connector: FakeConnector) -> CiscoDevice<FakeConnector> {
    CiscoDevice::with_connector(connector).with_parsers(
        ParserSet::new()
            .with_genie(Tagging("genie"))
            .with_textfsm(Tagging("textfsm")),
    )
}

async fn call_every_accessor(
    device: &CiscoDevice<FakeConnector>,
    mode: ParseMode,
) -> Result<Vec<CommandOutput>> {
    Ok(vec![
        device.interface_status(mode).await?,
        device.interface_brief(mode).await?,
        device.interface_description(mode).await?,
        device.trunk_interfaces(mode).await?,
        device.snmp_user(mode).await?,
        device.eigrp_neighbors(mode).await?,
        device.eigrp_topology(mode).await?,
        device.eigrp_interfaces(mode).await?,
        device.cdp_neighbors(mode).await?,
        device.cdp_neighbors_detail(mode).await?,
        device.routing_table(mode).await?,
        device.routing_table_summary(mode).await?,
        device.os_version(mode).await?,
        device.clock(mode).await?,
        device.environment_power(mode).await?,
        device.environment_temperature(mode).await?,
        device.arp_table(mode).await?,
        device.nat_translations(mode).await?,
        device.mac_address_table(mode).await?,
        device.modules(mode).await?,
        device.switch_info(mode).await?,
        device.switch_detail(mode).await?,
        device.vlans(mode).await?,
        device.tacacs(mode).await?,
        device.errdisable_recovery(mode).await?,
        device.access_lists(mode).await?,
        device.ip_protocols(mode).await?,
        device.license_status(mode).await?,
        device.platform_info(mode).await?,
        device.power_inline(mode).await?,
        device.redundancy(mode).await?,
        device.etherchannel_summary(mode).await?,
    ])
}

fn expected_commands() -> Vec<&'static str> {
    ShowCommand::ALL
        .iter()
        .filter(|c| **c != ShowCommand::RunningConfig)
        .map(|c| c.command())
        .collect()
}

#[tokio::test]
async fn every_accessor_uses_one_session_per_call() {
    for mode in [ParseMode::Raw, ParseMode::Genie, ParseMode::TextFsm] {
        let connector = FakeConnector::default();
        let device = device(connector.clone());

        let outputs = call_every_accessor(&device, mode).await.unwrap();
        let log = connector.log.lock().unwrap();
        let expected = expected_commands();

        assert_eq!(log.commands, expected, "mode {mode}");
        assert_eq!(log.sessions, expected.len());
        assert_eq!(log.opened, expected.len());
        assert_eq!(log.closed, expected.len());

        for (output, command) in outputs.iter().zip(&expected) {
            match mode {
                ParseMode::Raw => {
                    assert_eq!(output.as_raw(), Some(format!("output of {command}").as_str()))
                }
                ParseMode::Genie | ParseMode::TextFsm => {
                    let value = output.as_structured().unwrap();
                    assert_eq!(value["parser"], mode.as_str());
                    assert_eq!(value["command"], *command);
                    assert_eq!(value["raw"], format!("output of {command}"));
                }
            }
        }
    }
}

#[tokio::test]
async fn unknown_selector_returns_raw_text() {
    let connector = FakeConnector::default();
    let device = device(connector.clone());

    let output = device.vlans("ttp").await.unwrap();
    assert_eq!(output, CommandOutput::Raw("output of show vlan".to_string()));

    let output = device.clock("no_parse").await.unwrap();
    assert_eq!(output.as_raw(), Some("output of show clock"));

    let output = device.arp_table("textfsm").await.unwrap();
    assert!(output.as_structured().is_some());
}

#[tokio::test]
async fn configuration_is_raw_running_config() {
    let connector = FakeConnector::default();
    let config = device(connector.clone()).configuration().await.unwrap();

    assert_eq!(config, "output of show running-config");
    let log = connector.log.lock().unwrap();
    assert_eq!(log.commands, vec!["show running-config"]);
    assert_eq!(log.closed, 1);
}

#[tokio::test]
async fn rejected_running_config_is_an_error() {
    let connector = FakeConnector {
        reject: true,
        ..Default::default()
    };

    let err = device(connector.clone()).configuration().await.unwrap_err();
    match err {
        netquery::Error::Driver(DriverError::CommandFailed { command, message }) => {
            assert_eq!(command, "show running-config");
            assert!(message.contains("Invalid input"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(connector.log.lock().unwrap().closed, 1);
}

#[tokio::test]
async fn rejected_show_command_still_returns_output() {
    let connector = FakeConnector {
        reject: true,
        ..Default::default()
    };

    let output = device(connector).clock(ParseMode::Raw).await.unwrap();
    assert_eq!(output.as_raw(), Some("% Invalid input detected at '^' marker."));
}

#[tokio::test]
async fn session_closed_when_command_fails() {
    let connector = FakeConnector {
        fail_send: true,
        ..Default::default()
    };

    let err = device(connector.clone())
        .interface_brief(ParseMode::Raw)
        .await
        .unwrap_err();
    assert!(matches!(err, netquery::Error::Channel(ChannelError::Closed)));

    let log = connector.log.lock().unwrap();
    assert_eq!(log.commands, vec!["show ip interface brief"]);
    assert_eq!(log.opened, 1);
    assert_eq!(log.closed, 1);
}

#[tokio::test]
async fn open_failure_propagates_without_sending() {
    let connector = FakeConnector {
        fail_open: true,
        ..Default::default()
    };

    let err = device(connector.clone()).clock(ParseMode::Raw).await.unwrap_err();
    assert!(matches!(
        err,
        netquery::Error::Transport(TransportError::Timeout(_))
    ));
    assert!(connector.log.lock().unwrap().commands.is_empty());
}

#[tokio::test]
async fn structured_mode_without_parser_is_an_error() {
    let connector = FakeConnector::default();
    let device = CiscoDevice::with_connector(connector.clone());

    let err = device.vlans(ParseMode::Genie).await.unwrap_err();
    assert!(matches!(err, netquery::Error::Parse(_)));
    // The command still ran in a closed session
    assert_eq!(connector.log.lock().unwrap().closed, 1);
}

fn version_document() -> Value {
    json!({
        "version": {
            "chassis": "C9300-48P",
            "chassis_sn": "FOC2233X0AB",
            "image_id": "CAT9K_IOSXE",
            "os": "IOS-XE",
            "platform": "Catalyst L3 Switch",
            "system_image": "flash:packages.conf",
            "switch_num": {
                "1": { "active": true },
                "2": { "active": true },
                "3": { "active": false }
            }
        }
    })
}

#[tokio::test]
async fn derived_version_accessors() {
    let connector = FakeConnector::default();
    let device = CiscoDevice::with_connector(connector.clone())
        .with_parsers(ParserSet::new().with_genie(GenieVersion(version_document())));

    assert_eq!(device.chassis().await.unwrap(), "C9300-48P");
    assert_eq!(device.image_id().await.unwrap(), "CAT9K_IOSXE");
    assert_eq!(device.system_image().await.unwrap(), "flash:packages.conf");
    assert_eq!(device.os().await.unwrap(), "IOS-XE");
    assert_eq!(device.platform().await.unwrap(), "Catalyst L3 Switch");
    assert_eq!(device.chassis_serial().await.unwrap(), "FOC2233X0AB");
    assert_eq!(device.switch_count().await.unwrap(), 3);

    let log = connector.log.lock().unwrap();
    assert_eq!(log.commands, vec!["show version"; 7]);
    assert_eq!(log.closed, 7);
}

#[tokio::test]
async fn derived_accessor_reports_missing_key() {
    let device = CiscoDevice::with_connector(FakeConnector::default())
        .with_parsers(ParserSet::new().with_genie(GenieVersion(json!({ "version": {} }))));

    match device.chassis_serial().await.unwrap_err() {
        netquery::Error::Shape(e) => assert_eq!(e.path, "version.chassis_sn"),
        other => panic!("unexpected error: {other}"),
    }
}
