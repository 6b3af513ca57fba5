//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_provider` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger, registry and DNS resolver initialization
//! - User-facing output formatting
//!
//! All resolution logic is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use mail_provider::initialization::{init_logger_with, init_registry, init_resolver};
use mail_provider::{split_email_domain, Config, MailProviderResolver, ServiceConfig};

/// Exit code when the requested services could not all be resolved.
const EXIT_UNRESOLVED: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set RUST_LOG; a missing file is fine
    let _ = dotenvy::dotenv();

    let config = Config::parse();
    config.validate()?;

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let registry = init_registry(&config.providers).with_context(|| {
        format!(
            "Failed to load provider data from {}",
            config.providers.display()
        )
    })?;

    let domain = split_email_domain(&config.target)
        .with_context(|| format!("No domain in '{}'", config.target))?;
    let services = config.service_set();

    let dns = init_resolver(
        Duration::from_secs(config.dns_timeout_secs),
        config.dns_attempts,
    );
    let resolver = MailProviderResolver::new(registry, dns);

    let resolved = if config.public {
        resolver.lookup_public(&domain).cloned().unwrap_or_default()
    } else {
        resolver.resolve(&domain, services).await
    };

    print_config(&domain, &resolved, config.json)?;

    if !resolved.found(services) {
        log::warn!("Could not resolve all requested services for {domain}");
        process::exit(EXIT_UNRESOLVED);
    }
    Ok(())
}

fn print_config(domain: &str, config: &ServiceConfig, json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({ "domain": domain, "config": config });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("Failed to serialize result")?
        );
    } else {
        println!("domain: {domain}");
        println!("{config}");
    }
    Ok(())
}
