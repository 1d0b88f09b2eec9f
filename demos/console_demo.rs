// Demonstration of the console handler
//
// Run with: cargo run --example console_demo [config.toml]

use consolelog::{Console, ConsoleConfig, Level, Logger, F};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let console = match std::env::args().nth(1) {
        Some(path) => Console::with_config(ConsoleConfig::from_file(Path::new(&path))?)?,
        None => Console::new(),
    };
    let console = Arc::new(console);
    console.set_writer(std::io::stdout());

    let mut logger = Logger::new();
    logger.register_handler(console.clone(), &Level::ALL)?;

    println!("=== Levels ===\n");
    logger.debug("debug");
    logger.info("info");
    logger.notice("notice");
    logger.warn("warn");
    logger.error("error");
    logger.alert("alert");

    println!("\n=== Fields ===\n");
    logger
        .with_fields(vec![F("user", "alice"), F("attempts", 3)])
        .warn("login throttled");
    logger
        .with_fields(vec![F("path", "/var/lib/app")])
        .info("a message long enough to push the fields further right");

    println!("\n=== Trace span ===\n");
    {
        let _span = logger.with_fields(vec![F("job", "compact")]).trace("compaction");
        std::thread::sleep(Duration::from_millis(25));
    }

    println!("\n=== Calendar timestamps, no color ===\n");
    console.use_mini_timestamp(false);
    console.set_timestamp_format("%Y-%m-%d %H:%M:%S");
    console.display_color(false);
    logger.info("plain output");

    logger.shutdown();
    Ok(())
}
