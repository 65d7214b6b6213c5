//! hil-vpn privileged operations (hil-vpn-privop)
//!
//! Writes openvpn server configs and keys, which requires root.
//!
//! # Usage
//!
//! ```bash
//! # Create the config and key for network "lab1" on VLAN 42, port 1194
//! sudo hil-vpn-privop create lab1 42 1194
//!
//! # Use an alternate settings file
//! sudo hil-vpn-privop --config /etc/hil-vpn/test.toml create lab1 42 1194
//! ```

use clap::{Parser, Subcommand};
use libhilvpn::error::HilVpnResult;
use libhilvpn::{HilVpnConfig, VpnProvisioner};
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// hil-vpn privileged operations
#[derive(Parser, Debug)]
#[command(name = "hil-vpn-privop")]
#[command(author = "hil-vpn contributors")]
#[command(version)]
#[command(about = "Privileged helper that provisions OpenVPN server configs for isolated networks", long_about = None)]
struct Args {
    /// Settings file (defaults to /etc/hil-vpn/hil-vpn.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the openvpn config and static key for a new network
    Create {
        /// Network name
        name: String,
        /// VLAN the tap device is bound into
        vlan: u16,
        /// UDP port openvpn listens on
        port: u16,
    },
}

#[tokio::main]
async fn main() -> HilVpnResult<()> {
    let args = Args::parse();

    init_logging(&args);

    #[cfg(target_os = "linux")]
    {
        let uid = unsafe { libc::geteuid() };
        if uid != 0 {
            warn!("Not running as root - writing the openvpn config directory will likely fail");
        }
    }

    let config = HilVpnConfig::load_or_default(args.config.as_deref())?;

    match args.command {
        Commands::Create { name, vlan, port } => {
            let provisioner = VpnProvisioner::from_config(&config)?;
            match provisioner.create(&name, vlan, port).await {
                Ok(vpn) => {
                    println!("config  {}", vpn.config_path.display());
                    println!("key     {}", vpn.key_path.display());
                    println!("service {}", vpn.service_name);
                }
                Err(e) => {
                    error!("Creating VPN {} failed: {}", name, e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging based on command-line arguments
fn init_logging(args: &Args) {
    let log_level: &str = if args.verbose {
        "debug"
    } else {
        &args.log_level
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            EnvFilter::new(format!("hil_vpn_privop={},libhilvpn={}", log_level, log_level))
        });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}
