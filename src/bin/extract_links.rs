//! Reads an HTML fragment from stdin and prints its aggregated links as JSON.
//!
//! Usage: `extract_links <home-url> [--summary]`
//!
//! With `--summary`, prints per-domain totals instead of the raw records.

use std::env;
use std::error::Error;
use std::io::{self, Read};

use chrono::Utc;
use rs_linkrel::report::{summarize_domains, LinkFilter};
use rs_linkrel::store::StoredLink;
use rs_linkrel::{extract_links, SiteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let home_url = args
        .next()
        .ok_or("usage: extract_links <home-url> [--summary]")?;
    let summary = args.any(|a| a == "--summary");

    let site = SiteConfig::new(&home_url)?;

    let mut html = String::new();
    io::stdin().read_to_string(&mut html)?;

    let records = extract_links(&html, &site);
    info!(records = records.len(), "extraction finished");

    let json = if summary {
        let now = Utc::now();
        let stored: Vec<StoredLink> = records
            .into_iter()
            .map(|record| StoredLink {
                source_id: 0,
                record,
                indexed_at: now,
            })
            .collect();
        serde_json::to_string_pretty(&summarize_domains(&stored, LinkFilter::All))?
    } else {
        serde_json::to_string_pretty(&records)?
    };

    println!("{json}");
    Ok(())
}
