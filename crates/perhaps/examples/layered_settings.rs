//! Resolve a setting from several layers, most specific first.
//!
//! RUST_LOG=perhaps=trace cargo run -p perhaps --example layered_settings

use std::collections::HashMap;

use perhaps::{Candidate, Config, Maybe};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let file: HashMap<&str, String> = HashMap::from([("listen", "127.0.0.1:9000".to_string())]);

    // Blank strings count as absent for settings.
    let settings = Config::<String>::builder().is_empty(|s| s.trim().is_empty()).build();

    let cli_override = Maybe::of_with(settings.clone(), Some("   ".to_string()));
    let from_file = {
        let file = file.clone();
        let settings = settings.clone();
        Maybe::lazy_with(settings, move || file.get("listen").cloned())
    };

    let listen = cli_override
        .or_get([
            Candidate::producer(|| std::env::var("LISTEN_ADDR").ok()),
            Candidate::from(from_file),
            Candidate::from(Some("0.0.0.0:8080".to_string())),
        ])?
        .expected(Some("no listen address configured"))?;
    println!("listen: {}", listen.get());

    let workers = Maybe::lazy(|| std::env::var("WORKERS").ok().and_then(|w| w.parse::<usize>().ok()))
        .map(|n| Some((*n).max(1) * 2))?;
    workers.if_absent(|| println!("workers: default"))?;
    if let Some(n) = workers.raw() {
        println!("workers: {n}");
    }

    Ok(())
}
