//! Matches the detectors of a scenario file to its network and prints the
//! resulting link-to-detector table as JSON.
//!
//! Usage: `detector-match <scenario.json> [--sanity-checks]`

use detector_match::{MatchError, Scenario};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "detector_match=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut path = None;
    let mut sanity_checks = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--sanity-checks" => sanity_checks = true,
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("Usage: detector-match <scenario.json> [--sanity-checks]");
                return ExitCode::FAILURE;
            }
        }
    }
    let Some(path) = path else {
        eprintln!("Usage: detector-match <scenario.json> [--sanity-checks]");
        return ExitCode::FAILURE;
    };

    match run(&path, sanity_checks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, sanity_checks: bool) -> Result<(), MatchError> {
    let mut matcher = Scenario::from_path(path)?.build()?;
    log::info!("Read scenario {}", path);

    matcher.assign_all()?;
    for unassigned in &matcher.report().unassigned {
        if let Some(detector) = matcher.get_detector(unassigned.detector) {
            log::warn!("Unassigned: {} ({})", detector.source_id(), unassigned.reason);
        }
    }

    if sanity_checks {
        let sanity = matcher.sanity_check();
        if sanity.passed() {
            log::info!("Passed sanity checks");
        } else {
            log::warn!("Failed sanity checks: {:?}", sanity);
        }
    }

    println!("{}", serde_json::to_string_pretty(&matcher.export())?);
    Ok(())
}
