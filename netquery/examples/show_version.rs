//! Print `show version` from a Cisco device.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example show_version -- --host 10.20.0.11 --username netops --password secret
//! ```
//!
//! Credentials can also come from `NETQUERY_USERNAME` / `NETQUERY_PASSWORD`.
//! Pass `--genie <program>` to print the structured form and the fields
//! derived from it.

use std::time::Duration;

use clap::Parser;
use netquery::{CiscoDevice, ExternalParser, ParseMode, ParserSet};

#[derive(Parser, Debug)]
struct Args {
    /// Device hostname or IP
    #[arg(long)]
    host: String,

    /// SSH username
    #[arg(short, long, env = "NETQUERY_USERNAME")]
    username: String,

    /// SSH password, also used for enable
    #[arg(short, long, env = "NETQUERY_PASSWORD", hide_env_values = true)]
    password: String,

    /// SSH port
    #[arg(long, default_value_t = 22)]
    port: u16,

    /// Timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Program that turns raw output into Genie-style JSON
    #[arg(long)]
    genie: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut parsers = ParserSet::new();
    if let Some(program) = &args.genie {
        parsers = parsers.with_genie(ExternalParser::new(program).args(["--os", "iosxe"]));
    }

    let device = CiscoDevice::builder(&args.host, &args.username, &args.password)
        .port(args.port)
        .timeout(Duration::from_secs(args.timeout))
        .parsers(parsers)
        .build();

    if args.genie.is_none() {
        println!("{}", device.os_version(ParseMode::Raw).await?);
        return Ok(());
    }

    let info = device.version_info().await?;
    println!("{}", serde_json::to_string_pretty(info.as_value())?);
    println!();
    println!("chassis:      {}", info.chassis()?);
    println!("serial:       {}", info.chassis_serial()?);
    println!("os:           {}", info.os()?);
    println!("image:        {}", info.system_image()?);
    println!("stack size:   {}", info.switch_count()?);

    Ok(())
}
