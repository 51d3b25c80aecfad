//! CLI options.

use std::path::PathBuf;

use clap::Parser;

use crate::predictor::UnseenStationPolicy;

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about, rename_all = "kebab-case")]
pub struct Opts {
    #[command(flatten)]
    pub sentry: SentryOpts,

    #[command(flatten)]
    pub artifacts: ArtifactOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "POLLUTANTS_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8080", env = "POLLUTANTS_PORT")]
    pub port: u16,

    /// What to do with a station identifier the model has never seen
    #[arg(long, value_enum, default_value_t = UnseenStationPolicy::Warn)]
    pub unseen_station: UnseenStationPolicy,
}

#[derive(clap::Args)]
pub struct SentryOpts {
    /// Sentry DSN
    #[arg(short, long = "sentry-dsn", env = "SENTRY_DSN")]
    pub dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(
        long = "traces-sample-rate",
        default_value = "0",
        value_parser = parsers::sample_rate,
    )]
    pub traces_sample_rate: f32,
}

/// Pre-trained model artifacts.
///
/// Files ending with `.json` are read as JSON, anything else as a Python pickle.
#[derive(clap::Args)]
pub struct ArtifactOpts {
    /// Serialized regression model
    #[arg(long = "model", default_value = "pollution_model.pkl")]
    pub model_path: PathBuf,

    /// Serialized ordered list of the model's feature columns
    #[arg(long = "columns", default_value = "model_columns.pkl")]
    pub columns_path: PathBuf,
}
