//! Element catalog listing.

use std::io::{self, Write};

use anyhow::Result;
use compone_html::{ElementInfo, CATALOG};

fn lines(void_only: bool) -> Vec<String> {
    CATALOG
        .iter()
        .filter(|info| !void_only || info.self_closing)
        .map(describe)
        .collect()
}

fn describe(info: &ElementInfo) -> String {
    if info.self_closing {
        format!("<{} />", info.tag)
    } else {
        format!("<{0}></{0}>", info.tag)
    }
}

/// Run the catalog command.
pub fn run(void_only: bool) -> Result<()> {
    let lines = lines(void_only);
    let mut stdout = io::stdout().lock();
    for line in &lines {
        writeln!(stdout, "{line}")?;
    }
    tracing::info!("{} elements", lines.len());
    Ok(())
}
