use clap::{crate_name, crate_version, Parser};

use crate::artifacts::Artifacts;
use crate::opts::Opts;
use crate::predictor::Predictor;
use crate::prelude::*;

mod artifacts;
mod features;
mod input;
mod math;
mod model;
mod opts;
mod pollutants;
mod predictor;
mod prelude;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry.dsn, opts.sentry.traces_sample_rate)?;
    info!(name = crate_name!(), version = crate_version!(), "starting…");

    let artifacts = Artifacts::read(&opts.artifacts).context("failed to load the artifacts")?;
    let predictor = Predictor::new(artifacts, opts.unseen_station)
        .context("the artifacts do not match each other")?;
    let result = web::run(&opts.host, opts.port, predictor).await;

    info!("the application has finished");
    result
}
