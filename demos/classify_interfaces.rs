//! Interface classification example
//!
//! This example demonstrates:
//! - Loading classifier rules from a YAML file
//! - Classifying a batch of interfaces
//! - Reading the error counters
//!
//! Run with `RUST_LOG=flowclass_sdk=trace` to see every pass.

use anyhow::Context;
use flowclass_sdk::{ClassifierBuilder, ExporterInfo, InterfaceInfo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Interface Classification Example ===\n");

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/classifiers.yaml");
    let classifier = ClassifierBuilder::new()
        .load_config(path)
        .await
        .with_context(|| format!("cannot load {}", path))?
        .build()?;
    tracing::info!(
        path,
        interface_rules = classifier.rules().interface_rules().len(),
        "Loaded classifier rules"
    );

    let exporter = ExporterInfo::new("192.0.2.10", "th2-edge1");
    let interfaces = [
        InterfaceInfo::new("et-0/0/0", "Transit: Cogent 100G", 100_000),
        InterfaceInfo::new("et-0/0/1", "PNI: Hurricane Electric", 100_000),
        InterfaceInfo::new("et-0/0/2", "IX: FranceIX (Paris)", 10_000),
        InterfaceInfo::new("ae0", "Core: th2-core1", 400_000),
        InterfaceInfo::new("lo0", "", 0),
    ];

    for interface in &interfaces {
        let classification = classifier.classify_interface(&exporter, interface);
        println!("{} ({:?}):", interface.name, interface.description);
        println!("  connectivity: {:?}", classification.connectivity);
        println!("  provider:     {:?}", classification.provider);
        println!("  boundary:     {}", classification.boundary);
    }

    println!(
        "\nInterface classifier errors: {}",
        classifier.stats().interface_errors()
    );

    Ok(())
}
