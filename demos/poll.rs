// SPDX-License-Identifier: MPL-2.0

//! Switch monitoring example.
//!
//! Sets up one `myStrom` switch, prints every rendered view after each poll
//! and unloads the entry on Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example poll -- <host> [scan_interval_seconds]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=mystrom_lib=debug cargo run --example poll -- 192.168.1.30 10
//! ```

use std::env;
use std::sync::Arc;

use mystrom_lib::entity::{EntityState, StateValue};
use mystrom_lib::manager::{IntegrationManager, SwitchConfig, validate_device};
use mystrom_lib::{EnergyClock, ScanInterval};
use tracing_subscriber::EnvFilter;

fn print_state(state: &EntityState) {
    let availability = if state.available { "" } else { " (unavailable)" };
    match state.value {
        StateValue::On => println!("{:<48} on{availability}", state.unique_id),
        StateValue::Off => println!("{:<48} off{availability}", state.unique_id),
        StateValue::Number(value) => println!("{:<48} {value}{availability}", state.unique_id),
        StateValue::Unknown => println!("{:<48} unknown{availability}", state.unique_id),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <host> [scan_interval_seconds]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cargo run --example poll -- 192.168.1.30");
        eprintln!("  cargo run --example poll -- 192.168.1.30 10");
        std::process::exit(1);
    }

    let host = &args[1];
    let interval = match args.get(2) {
        Some(seconds) => ScanInterval::new(seconds.parse()?)?,
        None => ScanInterval::default(),
    };

    println!("=== myStrom Switch Monitor ===");
    println!("Host: {host}");
    println!("Interval: {interval}");
    println!();

    let device = validate_device(SwitchConfig::new(host.as_str()).with_scan_interval(interval)).await?;
    println!("Found {} ({})", device.title, device.unique_id);

    let manager = IntegrationManager::new(Arc::new(print_state))
        .with_energy_clock(EnergyClock::MeasuredElapsed);
    let entry_id = manager.setup_entry(device).await?;

    println!("Polling, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    manager.unload_entry(entry_id).await;
    println!("Stopped");
    Ok(())
}
