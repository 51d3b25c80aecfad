//! The predictor form and its result.

use maud::{html, Markup, DOCTYPE};
use poem::web::{Data, Form, Html};
use poem::{handler, IntoResponse, Response};
use serde::Deserialize;

use crate::features::FeatureLayout;
use crate::input::{InputRecord, InputWarning, StationId, Year};
use crate::pollutants::{Pollutant, Prediction};
use crate::predictor::{Outcome, Predictor};
use crate::prelude::*;
use crate::web::partials::{footer, headers, Float};

#[derive(Deserialize)]
pub struct PredictForm {
    pub year: i32,

    #[serde(default)]
    pub station: String,
}

enum View {
    Idle,
    Rejected(InputWarning),
    Predicted {
        input: InputRecord,
        prediction: Prediction,
        warning: Option<InputWarning>,
    },
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(Data(predictor): Data<&Arc<Predictor>>) -> Result<Response> {
    let markup = render(predictor.layout(), Year::DEFAULT.get(), StationId::DEFAULT, View::Idle);
    Ok(Html(markup.into_string()).into_response())
}

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn post(
    Form(form): Form<PredictForm>,
    Data(predictor): Data<&Arc<Predictor>>,
) -> Result<Response> {
    let view = match InputRecord::new(form.year, &form.station) {
        Ok(input) => match predictor.predict(&input)? {
            Outcome::Rejected(warning) => View::Rejected(warning),
            Outcome::Predicted {
                prediction,
                warning,
            } => View::Predicted {
                input,
                prediction,
                warning,
            },
        },
        Err(warning) => {
            info!(year = form.year, station = ?form.station, %warning, "rejected");
            View::Rejected(warning)
        }
    };
    let markup = render(predictor.layout(), form.year, &form.station, view);
    Ok(Html(markup.into_string()).into_response())
}

/// Renders the whole page, keeping the submitted values in the form.
fn render(layout: &FeatureLayout, year: i32, station: &str, view: View) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (headers())
                title { "Water Pollutants Predictor" }
            }
            body {
                section.section {
                    div.container {
                        h1.main-title { "💧 Water Pollutants Predictor" }
                        p.main-subtitle { "Enter a year and station ID to predict water pollutant levels" }

                        form.box method="POST" action="/" {
                            div.field {
                                label.label for="year" { "Enter Year" }
                                div.control {
                                    input.input
                                        id="year"
                                        type="number"
                                        name="year"
                                        min=(Year::RANGE.start())
                                        max=(Year::RANGE.end())
                                        step="1"
                                        value=(year)
                                        required;
                                }
                            }
                            div.field {
                                label.label for="station" { "Enter Station ID" }
                                div.control {
                                    input.input
                                        id="station"
                                        type="text"
                                        name="station"
                                        value=(station)
                                        list="stations"
                                        autocomplete="off"
                                        spellcheck="false";
                                }
                                datalist id="stations" {
                                    @for station in layout.stations() {
                                        option value=(station) {}
                                    }
                                }
                            }
                            div.field {
                                div.control {
                                    button.button.is-link type="submit" { "🔍 Predict" }
                                }
                            }
                        }

                        @match view {
                            View::Idle => {}
                            View::Rejected(warning) => {
                                (warning_notification(&warning))
                            }
                            View::Predicted { input, prediction, warning } => {
                                @if let Some(warning) = warning {
                                    (warning_notification(&warning))
                                }
                                (result(&input, &prediction))
                            }
                        }
                    }
                }

                (footer())
            }
        }
    }
}

fn warning_notification(warning: &InputWarning) -> Markup {
    html! {
        div.notification.is-warning role="alert" {
            "⚠️ " (warning.to_string())
        }
    }
}

fn result(input: &InputRecord, prediction: &Prediction) -> Markup {
    html! {
        div.result-section.box {
            h3.title."is-5" {
                "📍 Predicted Pollutants at Station "
                code { (input.station_id.as_str()) }
                " for Year "
                code { (input.year.get()) }
                ":"
            }
            div.columns.is-mobile.is-multiline {
                @for (pollutant, value) in prediction.iter() {
                    div.column {
                        div.metric-box {
                            p.heading { (pollutant.name()) }
                            p.title."is-4" { (Float::from(value)) }
                        }
                    }
                }
            }
        }

        h3.title."is-5" { "📊 Tabular Results" }
        div.table-container {
            table.table.is-fullwidth.is-striped.is-hoverable {
                thead {
                    tr {
                        @for pollutant in Pollutant::ALL {
                            th { (pollutant.name()) }
                        }
                    }
                }
                tbody {
                    tr {
                        @for (_, value) in prediction.iter() {
                            td { (Float::from(value)) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use crate::predictor::UnseenStationPolicy;
    use crate::prelude::*;
    use crate::web::test::create_standalone_test_client;

    #[tokio::test]
    async fn get_idle_form_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains(r#"value="2022""#));
        assert!(body.contains(r#"min="2000""#));
        assert!(body.contains(r#"max="2100""#));
        assert!(body.contains(r#"name="station" value="1""#));
        assert!(body.contains(r#"<option value="10">"#));
        assert!(!body.contains("Tabular Results"));
        Ok(())
    }

    #[tokio::test]
    async fn post_known_station_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client
            .post("/")
            .form(&[("year", "2022"), ("station", "1")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Predicted Pollutants at Station <code>1</code> for Year <code>2022</code>"));
        for name in ["O2", "NO3", "NO2", "SO4", "PO4", "CL"] {
            assert!(body.contains(&format!("<th>{}</th>", name)), "missing {}", name);
        }
        for value in ["29.22", "4.00", "1.50", "41.00", "1.25", "51.00"] {
            assert!(body.contains(&format!(">{}</span>", value)), "missing {}", value);
        }
        assert!(!body.contains("notification"));
        Ok(())
    }

    #[tokio::test]
    async fn post_blank_station_warned() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::ZeroFill)?;
        let response = client
            .post("/")
            .form(&[("year", "2022"), ("station", "   ")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Please enter a valid Station ID."));
        assert!(!body.contains("Tabular Results"));
        Ok(())
    }

    #[tokio::test]
    async fn post_year_out_of_range_warned() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client
            .post("/")
            .form(&[("year", "1999"), ("station", "1")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Year 1999 is outside of the supported range"));
        assert!(!body.contains("Tabular Results"));
        Ok(())
    }

    #[tokio::test]
    async fn post_unseen_station_rejected() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client
            .post("/")
            .form(&[("year", "2022"), ("station", "404")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Station 404 was not present in the training data."));
        assert!(!body.contains("Tabular Results"));
        Ok(())
    }

    #[tokio::test]
    async fn post_unseen_station_warned() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Warn)?;
        let response = client
            .post("/")
            .form(&[("year", "2022"), ("station", "404")])
            .send()
            .await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Station 404 was not present in the training data."));
        assert!(body.contains(">28.22</span>"));
        Ok(())
    }

    #[tokio::test]
    async fn post_malformed_year_bad_request() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        client
            .post("/")
            .form(&[("year", "next year"), ("station", "1")])
            .send()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
