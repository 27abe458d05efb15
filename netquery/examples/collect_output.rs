//! Run one command on one or more devices and print or save the output.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example collect_output -- \
//!     --host 10.20.0.11 --host 10.20.0.12 \
//!     --command "show ip interface brief" \
//!     --append collected.txt
//! ```
//!
//! Each device's output is preceded by a `### <host>: <command>` header.
//! Devices are queried one after another; a failing device is reported and
//! skipped.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::error;
use netquery::CiscoDevice;
use tokio::io::AsyncWriteExt;

#[derive(Parser, Debug)]
struct Args {
    /// Device hostname or IP (repeatable)
    #[arg(long = "host", required = true)]
    hosts: Vec<String>,

    /// SSH username
    #[arg(short, long, env = "NETQUERY_USERNAME")]
    username: String,

    /// SSH password, also used for enable
    #[arg(short, long, env = "NETQUERY_PASSWORD", hide_env_values = true)]
    password: String,

    /// Command to run
    #[arg(short, long, default_value = "show version")]
    command: String,

    /// Append output to this file instead of printing it
    #[arg(long)]
    append: Option<PathBuf>,

    /// Timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut file = match &args.append {
        Some(path) => Some(
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .await?,
        ),
        None => None,
    };

    let mut failures = 0;
    for host in &args.hosts {
        let device = CiscoDevice::builder(host, &args.username, &args.password)
            .timeout(Duration::from_secs(args.timeout))
            .build();

        let response = match device.run_raw(&args.command).await {
            Ok(response) => response,
            Err(e) => {
                error!("{}: {}", host, e);
                failures += 1;
                continue;
            }
        };

        if let Some(message) = &response.failure_message {
            error!("{}: {}", host, message);
        }

        let block = format!("### {}: {}\n{}\n\n", host, args.command, response.result);
        match file.as_mut() {
            Some(file) => file.write_all(block.as_bytes()).await?,
            None => print!("{block}"),
        }
    }

    if let Some(mut file) = file {
        file.flush().await?;
    }

    if failures > 0 {
        eprintln!("{} of {} devices failed", failures, args.hosts.len());
        std::process::exit(1);
    }

    Ok(())
}
