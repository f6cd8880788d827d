/// Implementation of `dps poll`.
///
/// Hosts the coordinator in a fixed-interval loop — the scheduling role
/// the core deliberately does not own. Each tick runs one cycle and
/// prints a summary line (or a JSON document with `--json`); transient
/// fetch failures are reported and the loop keeps going, while a fatal
/// failure (or a faulted coordinator) ends the run with an error.
///
/// Sources:
///
/// ```text
/// --file path.json   re-read the file every tick; edit it mid-run to
///                    watch keys appear and vanish from coverage
/// --demo             the built-in deterministic research payload
/// ```
///
/// The loop uses a delaying interval (a slow tick never causes a
/// catch-up burst) and stops after `--cycles N` successful cycles or on
/// ctrl-c.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::time::{Duration, MissedTickBehavior};

use dps_poll::{
    Coordinator, CoordinatorConfig, CycleError, DemoFetcher, FetchError, SnapshotFetcher,
};
use dps_types::RawSnapshot;

use crate::PollArgs;
use crate::cmd_decode::registry_for;
use crate::render;

/// Run the `dps poll` command.
///
/// # Errors
///
/// Returns an error if neither `--file` nor `--demo` is given, or when
/// the coordinator faults on a fatal fetch error.
pub fn run(args: PollArgs) -> Result<()> {
    let source = match (&args.file, args.demo) {
        (Some(path), false) => PollSource::File(path.clone()),
        (None, true) => PollSource::Demo(DemoFetcher::new()),
        (None, false) => anyhow::bail!("one of --file or --demo is required"),
        // clap's conflicts_with already rejects this combination
        (Some(_), true) => anyhow::bail!("--file and --demo are mutually exclusive"),
    };

    let registry = registry_for(args.tank_full_raw);
    let config = CoordinatorConfig::new(args.device_id.clone());
    let coordinator = Coordinator::new(source, registry, config);

    let runtime = tokio::runtime::Runtime::new().context("cannot start runtime")?;
    runtime.block_on(poll_loop(coordinator, &args))
}

/// Where poll cycles get their snapshots.
///
/// File mode re-reads on every tick so the file acts as a live stand-in
/// for the vendor endpoint; read and ingest failures become transient
/// fetch errors rather than process exits.
enum PollSource {
    File(PathBuf),
    Demo(DemoFetcher),
}

impl SnapshotFetcher for PollSource {
    async fn fetch(&mut self) -> Result<RawSnapshot, FetchError> {
        match self {
            Self::Demo(demo) => demo.fetch().await,
            Self::File(path) => {
                let text = tokio::fs::read_to_string(&path).await.map_err(|err| {
                    FetchError::Transport {
                        detail: format!("cannot read {}: {err}", path.display()),
                    }
                })?;
                Ok(RawSnapshot::from_json_str(&text)?)
            }
        }
    }
}

async fn poll_loop(mut coordinator: Coordinator<PollSource>, args: &PollArgs) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut completed = 0u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match coordinator.run_cycle().await {
                    Ok(result) => {
                        if args.json {
                            let text = serde_json::to_string(&result)
                                .context("cannot serialize cycle result")?;
                            println!("{text}");
                        } else {
                            println!("{}", render::cycle_line(&result));
                        }
                        completed += 1;
                        if args.cycles.is_some_and(|limit| completed >= limit) {
                            return Ok(());
                        }
                    }
                    Err(CycleError::Fetch(failure)) if !failure.fatal => {
                        tracing::warn!(
                            consecutive = failure.consecutive_failures,
                            "cycle skipped: {failure}"
                        );
                    }
                    Err(err) => {
                        return Err(anyhow::Error::new(err).context("poll loop ended"));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(cycles = completed, "poll loop stopped");
                return Ok(());
            }
        }
    }
}
