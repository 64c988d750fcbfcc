//! Exporter classification example
//!
//! This example demonstrates:
//! - Building a classifier from inline rule text
//! - Classifying exporters into groups
//! - Reloading the rules while the classifier is in use

use flowclass_sdk::{ClassifierBuilder, ClassifierConfig, ExporterInfo};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Exporter Classification Example ===\n");

    let classifier = Arc::new(
        ClassifierBuilder::new()
            .add_exporter_rule(r#"Exporter.Name matches "^(th2|par)-" && classify("paris")"#)
            .add_exporter_rule(r#"classifyRegex(Exporter.Name, "^([a-z]+)[0-9]*-", "$1")"#)
            .build()?,
    );

    let exporters = [
        ExporterInfo::new("192.0.2.1", "th2-edge1"),
        ExporterInfo::new("192.0.2.2", "nyc1-edge2"),
        ExporterInfo::new("198.51.100.7", "lab-router"),
        ExporterInfo::new("203.0.113.9", "UNNAMED"),
    ];

    let print_groups = |title: &str| {
        println!("{}:", title);
        for exporter in &exporters {
            let group = classifier.classify_exporter(exporter);
            println!("  {:<14} -> {}", exporter.name, group.as_deref().unwrap_or("(none)"));
        }
    };
    print_groups("Initial rules");

    // Swap in a new rule set; running passes keep the old one until they end
    let config = ClassifierConfig::from_yaml(
        r#"
exporter-classifiers:
  - 'Exporter.IP startsWith "198.51.100." && classify("lab")'
  - 'classify("default")'
"#,
    )?;
    println!("\nReloading with:\n{}", config.to_yaml()?);
    classifier.reload_config(config);
    print_groups("Reloaded rules");

    // A rule with a broken pattern is refused before it can run
    match ClassifierBuilder::new()
        .add_exporter_rule(r#"classifyRegex(Exporter.Name, "([a-z]+", "$1")"#)
        .build()
    {
        Ok(_) => println!("\nunexpected: invalid rule accepted"),
        Err(err) => println!("\nRejected rule: {}", err),
    }

    Ok(())
}
