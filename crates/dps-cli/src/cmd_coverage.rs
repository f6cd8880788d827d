/// Implementation of `dps coverage`.
///
/// Compares the snapshot against the expected-key list (the monitored
/// table by default, or `--expected 163,167,…`) and prints per-key
/// presence with descriptions, the found/total ratio, and any observed
/// keys outside the expected set.
use anyhow::{Context, Result};

use dps_monitor::{compute_coverage, default_expected_keys};
use dps_types::KeyId;

use crate::CoverageArgs;
use crate::load_snapshot;
use crate::render;

/// Run the `dps coverage` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or ingested, the
/// `--expected` list is empty after trimming, or JSON output cannot be
/// serialized.
pub fn run(args: &CoverageArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.file)?;

    let expected: Vec<KeyId> = match args.expected.as_deref() {
        Some(list) => parse_expected(list)?,
        None => default_expected_keys(),
    };

    let report = compute_coverage(&snapshot, &expected);

    if args.json {
        let text =
            serde_json::to_string_pretty(&report).context("cannot serialize report")?;
        println!("{text}");
    } else {
        println!("{}", render::coverage_lines(&report));
    }

    Ok(())
}

/// Parses a comma-separated `--expected` string into a key list.
///
/// # Errors
///
/// Returns an error if no keys remain after trimming empty tokens.
fn parse_expected(list: &str) -> Result<Vec<KeyId>> {
    let keys: Vec<KeyId> = list
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(Into::into)
        .collect();
    if keys.is_empty() {
        anyhow::bail!("--expected given but no keys supplied");
    }
    Ok(keys)
}
