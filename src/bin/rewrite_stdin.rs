//! Reads an HTML fragment from stdin and writes it back with link
//! attributes rewritten.
//!
//! Usage: `rewrite_stdin <home-url> [--options <json>] [--options-file <path>] [--scheme http|https]`
//!
//! Set `RUST_LOG=rs_linkrel=debug` to see per-document decisions on stderr.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use rs_linkrel::{rewrite_with_report, Options, Scheme, SiteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: rewrite_stdin <home-url> [--options <json>] [--options-file <path>] [--scheme http|https]";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let home_url = args.next().ok_or(USAGE)?;

    let mut options = Options::default();
    let mut scheme = None;
    while let Some(flag) = args.next() {
        let value = args.next().ok_or(USAGE)?;
        match flag.as_str() {
            "--options" => options = Options::from_json(&value)?,
            "--options-file" => options = Options::from_json(&fs::read_to_string(value)?)?,
            "--scheme" => {
                scheme = Some(match value.as_str() {
                    "http" => Scheme::Http,
                    "https" => Scheme::Https,
                    other => return Err(format!("unknown scheme {other:?}").into()),
                });
            }
            other => return Err(format!("unknown flag {other:?}\n{USAGE}").into()),
        }
    }

    let mut site = SiteConfig::new(&home_url)?;
    if let Some(scheme) = scheme {
        site = site.with_scheme(scheme);
    }

    let mut html = String::new();
    io::stdin().read_to_string(&mut html)?;

    let result = rewrite_with_report(&html, &options, &site);
    info!(
        seen = result.anchors_seen,
        changed = result.anchors_changed,
        "rewrite finished"
    );

    let mut stdout = io::stdout().lock();
    stdout.write_all(result.html.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
