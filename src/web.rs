use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, Endpoint, EndpointExt, Route, Server};

use crate::predictor::Predictor;
use crate::prelude::*;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware};

mod middleware;
mod partials;
#[cfg(test)]
mod test;
mod views;

const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Serves the predictor until interrupted.
pub async fn run(host: &str, port: u16, predictor: Predictor) -> Result {
    let app = create_app(Arc::new(predictor));
    info!(host, port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(host)?, port)))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for the interrupt signal: {:#}", error);
                }
                info!("shutting down…");
            },
            Some(SHUTDOWN_TIMEOUT),
        )
        .await
        .context("the server has failed")?;
    Ok(())
}

pub fn create_app(predictor: Arc<Predictor>) -> impl Endpoint {
    Route::new()
        .at("/", get(views::index::get).post(views::index::post))
        .at("/static/theme.css", get(views::r#static::get_theme_css))
        .at("/robots.txt", get(views::r#static::get_robots_txt))
        .at("/api/health", get(views::api::get_health))
        .data(predictor)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
