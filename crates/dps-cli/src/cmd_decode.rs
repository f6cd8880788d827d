/// Implementation of `dps decode`.
///
/// Loads a snapshot file, runs every registered decoder against it, and
/// prints one outcome per decoder — the typed reading with confidence
/// and provenance, or the failure that took its place. A failing
/// decoder never suppresses the others' output; the command exits 0
/// either way, because individual failures are data, not command
/// errors.
///
/// With `--json`, the decoder-name → outcome map serializes directly.
/// `--tank-full-raw` applies a calibrated water-tank scale.
use std::collections::BTreeMap;

use anyhow::{Context, Result};

use dps_decode::{DecoderRegistry, KeyDecoder as _, TankScale};
use dps_types::{DecoderOutcome, RawSnapshot};

use crate::DecodeArgs;
use crate::load_snapshot;
use crate::render;

/// Run the `dps decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or ingested, or JSON
/// output cannot be serialized.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.file)?;
    let registry = registry_for(args.tank_full_raw);
    let outcomes = decode_all(&registry, &snapshot);

    if args.json {
        let text =
            serde_json::to_string_pretty(&outcomes).context("cannot serialize outcomes")?;
        println!("{text}");
    } else {
        println!("{}", render::outcome_lines(outcomes.into_iter()));
    }

    Ok(())
}

/// The standard registry, with the tank scale recalibrated when asked.
pub fn registry_for(tank_full_raw: Option<u8>) -> DecoderRegistry {
    match tank_full_raw {
        Some(full_raw) => DecoderRegistry::with_tank_scale(TankScale { full_raw }),
        None => DecoderRegistry::standard(),
    }
}

/// One pass of every decoder over the snapshot, failures captured in
/// place.
fn decode_all(
    registry: &DecoderRegistry,
    snapshot: &RawSnapshot,
) -> BTreeMap<String, DecoderOutcome> {
    registry
        .iter()
        .map(|decoder| {
            let outcome = match decoder.decode(snapshot) {
                Ok(reading) => DecoderOutcome::Ok { reading },
                Err(failure) => DecoderOutcome::Failed { failure },
            };
            (decoder.name().to_string(), outcome)
        })
        .collect()
}
