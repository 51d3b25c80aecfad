use std::borrow::Cow;
use std::env;
use std::time::Duration as StdDuration;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

const LOG_VAR: &str = "POLLUTANTS_LOG";
const DEFAULT_LOG: &str = "pollutant_predictor=info,poem=info";

const SENTRY_LOG_VAR: &str = "POLLUTANTS_SENTRY_LOG";
const DEFAULT_SENTRY_LOG: &str = "pollutant_predictor=debug";

/// Initialises the console and Sentry layers.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(sentry_event_filter)
        .span_filter(|metadata| metadata.level() <= &Level::INFO)
        .with_filter(filter_from_env(SENTRY_LOG_VAR, DEFAULT_SENTRY_LOG)?);

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(filter_from_env(LOG_VAR, DEFAULT_LOG)?);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(guard)
}

/// Warnings include rejected stations, so they become Sentry events along with errors.
fn sentry_event_filter(metadata: &Metadata) -> EventFilter {
    sentry_event_kind(metadata.level())
}

fn sentry_event_kind(level: &Level) -> EventFilter {
    if level <= &Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}

fn filter_from_env(var: &str, default: &str) -> Result<EnvFilter> {
    parse_filter(env::var(var).ok().as_deref(), default)
        .with_context(|| format!("`{}` is not a valid filter", var))
}

/// An explicitly set but malformed filter is an error rather than a silent fallback.
fn parse_filter(directives: Option<&str>, default: &str) -> Result<EnvFilter> {
    Ok(EnvFilter::try_new(directives.unwrap_or(default))?)
}

pub fn format_duration(duration: StdDuration) -> String {
    humantime::format_duration(duration).to_string()
}

pub fn format_elapsed(instant: Instant) -> String {
    format_duration(instant.elapsed())
}
