use clap::crate_version;
use maud::{html, Markup, DOCTYPE};
use poem::http::StatusCode;

pub use self::float::*;

mod float;

pub fn headers() -> Markup {
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="/static/theme.css?v1";
    }
}

pub fn footer() -> Markup {
    html! {
        footer.footer {
            div.content.has-text-centered {
                p {
                    "Pollutant Predictor " (crate_version!())
                    " · made with " a href="https://www.rust-lang.org/" { "Rust" }
                    " and " a href="https://bulma.io/" { "Bulma" }
                }
            }
        }
    }
}

pub fn error_page(status: StatusCode) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { (status.to_string()) }
            }
            body {
                section.section {
                    div.container {
                        h1.title { (status.as_u16()) }
                        p.subtitle { (status.canonical_reason().unwrap_or("Error")) }
                        a.button.is-link href="/" { "Back to the predictor" }
                    }
                }
            }
        }
    }
}
