//! Summarise a VeloCloud edge: serials, LAN SVIs, WAN interfaces and links.
//!
//! # Usage
//!
//! ```bash
//! export VCO_URL=https://vco.example.net/portal/rest
//! export VCO_TOKEN=...
//! cargo run --example edge_report -- NER0502D01
//! ```

use clap::Parser;
use netquery::{EdgeLookup, OrchestratorConfig, VcoClient};

#[derive(Parser, Debug)]
struct Args {
    /// Edge name as shown in the orchestrator
    edge: String,

    /// Orchestrator REST root
    #[arg(long, env = "VCO_URL")]
    url: Option<String>,

    /// Enterprise id
    #[arg(long, env = "VCO_ENTERPRISE_ID")]
    enterprise_id: Option<i64>,

    /// Skip TLS certificate validation
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = OrchestratorConfig::from_lookup(|name| match (name, &args.url) {
        ("VCO_URL", Some(url)) => Some(url.clone()),
        _ => std::env::var(name).ok(),
    })?;
    if let Some(id) = args.enterprise_id {
        config = config.enterprise_id(id);
    }
    if args.insecure {
        config = config.accept_invalid_certs(true);
    }

    let vco = VcoClient::new(config)?;

    let edge_id = match vco.edge_id_by_name(&args.edge).await? {
        EdgeLookup::Found(id) => id,
        EdgeLookup::NotFound(edges) => {
            eprintln!("No edge named {:?}. Known edges:", args.edge);
            for edge in edges {
                eprintln!("  {:>6}  {}", edge.id, edge.name);
            }
            std::process::exit(1);
        }
    };

    let serial = vco.edge_serial_number(&args.edge).await?;
    println!("{} (id {})", serial.edge_name, edge_id);
    println!("  active serial:  {}", serial.active_serial.as_deref().unwrap_or("-"));
    println!("  standby serial: {}", serial.standby_serial.as_deref().unwrap_or("-"));
    println!("  management IP:  {}", vco.edge_management_ip(edge_id).await?);

    println!("\nLAN SVIs");
    for (vlan, svi) in vco.edge_lan_svi_info(edge_id).await? {
        println!(
            "  vlan {:<5} {:<20} {:<16} {:<16} dhcp={} ports={}",
            vlan,
            svi.svi_name,
            svi.ip_address.as_deref().unwrap_or("-"),
            svi.subnet_mask.as_deref().unwrap_or("-"),
            svi.dhcp_enabled,
            svi.physical_interface.join(",")
        );
    }

    println!("\nWAN interfaces");
    for (name, wan) in vco.edge_wan_interface_info(edge_id).await? {
        println!(
            "  {:<8} {:<7} {:<16} {:<16} {}/{} {}",
            name,
            wan.addressing_type,
            wan.ipv4_address.as_deref().unwrap_or("-"),
            wan.subnet_mask.as_deref().unwrap_or("-"),
            wan.duplex,
            wan.speed,
            wan.overlay
        );
    }

    println!("\nWAN links");
    for (interface, link) in vco.wan_interface_status(&args.edge).await? {
        println!(
            "  {:<8} {:<16} {:<24} link={} vpn={}",
            interface,
            link.ip_address.as_deref().unwrap_or("-"),
            link.isp_info.as_deref().unwrap_or("-"),
            link.link_state.as_deref().unwrap_or("-"),
            link.link_vpn_state.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
