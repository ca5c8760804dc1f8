// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the modconfig crate.
//!
//! This example demonstrates:
//! - Compiled-in module defaults with a fallback list
//! - Keyword overrides
//! - Typed updates from environment variables
//! - Reading values with defaults and typed extraction
//!
//! To run this example:
//! ```bash
//! # Point the configuration at a module and override some values
//! export APP_SETTINGS="example.production"
//! export SOME_LIMIT="100"
//! export DATABASE='{"host": "new.com", "user": "admin"}'
//!
//! # A list can't replace a mapping; this one is rejected with a warning
//! # export DATABASE='[1,2,3]'
//!
//! # Run the example
//! cargo run --example basic_usage
//! ```

use modconfig::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    user: String,
}

fn defaults() -> StaticModule {
    StaticModule::new("example.defaults")
        .with("ENV", "development")
        .with("SECRET", "unsecure")
        .with("API_KEY", "something")
        .with("SOME_LIMIT", 42)
        .with(
            "DATABASE",
            ConfigValue::map([("host", "localhost"), ("user", "guest")]),
        )
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== modconfig: Basic Usage ===\n");

    let production = StaticModule::new("example.production")
        .with("ENV", "production")
        .with("SECRET", "unsecure")
        .with("API_KEY", "something")
        .with("SOME_LIMIT", 42)
        .with(
            "DATABASE",
            ConfigValue::map([("host", "db.com"), ("user", "guest")]),
        );

    let registry = ModuleRegistry::new()
        .with_module(defaults())
        .with_module(production)
        .with_search_path("config");

    // The first module that resolves wins; options and the environment go on top.
    let config = Config::builder()
        .resolver(registry)
        .module("env:APP_SETTINGS")
        .module("example.defaults")
        .option("API_KEY", "redefined")
        .build();

    println!("{}\n", config);

    println!("--- Reading values ---");
    println!("ENV        = {}", config["ENV"]);
    println!("SOME_LIMIT = {}", config.get("some_limit")?);
    println!("MISSING    = {}", config.get_or("MISSING", true));

    match config.get("UNKNOWN") {
        Ok(value) => println!("UNKNOWN    = {}", value),
        Err(e) => println!("UNKNOWN    -> {}", e),
    }

    println!("\n--- Typed extraction ---");
    let database: Database = config.extract("DATABASE")?;
    println!("database host={} user={}", database.host, database.user);

    println!("\n--- Declared types ---");
    for (key, value) in &config {
        let declared = config
            .declared_type(key)
            .map(|t| t.to_string())
            .unwrap_or_default();
        println!("{:<10} {:<8} {}", key, declared, value);
    }

    Ok(())
}
