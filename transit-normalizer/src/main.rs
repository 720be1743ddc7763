use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_normalizer::config::NormalizerConfig;
use transit_normalizer::domain::{AgencyInfo, NormalizeError, NormalizedFeed};
use transit_normalizer::feed::{FeedError, load_snapshot, write_json};
use transit_normalizer::normalize::Normalizer;
use transit_normalizer::routes::RouteResolver;
use transit_normalizer::rules::{RouteRules, roam_rules};

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

fn run(config: &NormalizerConfig) -> Result<(), RunError> {
    let snapshot = load_snapshot(config.feed_path())?;
    info!(
        path = %config.feed_path().display(),
        routes = snapshot.routes.len(),
        trips = snapshot.trips.len(),
        "loaded feed snapshot"
    );

    let rules = match config.rules_path() {
        Some(path) => RouteRules::load(path)?,
        None => roam_rules()?,
    };
    info!(routes = rules.len(), "loaded route rules");

    let normalizer = Normalizer::new(&rules, RouteResolver::roam());
    let feed = NormalizedFeed {
        agency: AgencyInfo::roam(),
        trips: normalizer.normalize_feed(&snapshot)?,
    };

    match config.output_path() {
        Some(path) => {
            write_json(path, &feed)?;
            info!(path = %path.display(), trips = feed.trips.len(), "wrote normalized feed");
        }
        None => {
            let text = serde_json::to_string_pretty(&feed).map_err(|source| FeedError::Json {
                path: "<stdout>".into(),
                source,
            })?;
            println!("{text}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = NormalizerConfig::from_env().with_args(std::env::args_os().skip(1));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
