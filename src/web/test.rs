use poem::test::TestClient;
use poem::Endpoint;

use crate::predictor::UnseenStationPolicy;
use crate::prelude::*;
use crate::web::create_app;

pub fn create_standalone_test_client(
    unseen_station_policy: UnseenStationPolicy,
) -> Result<TestClient<impl Endpoint>> {
    let predictor = crate::test::predictor(unseen_station_policy)?;
    Ok(TestClient::new(create_app(Arc::new(predictor))))
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn get_health_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        client.get("/api/health").send().await.assert_status(StatusCode::NO_CONTENT);
        Ok(())
    }

    #[tokio::test]
    async fn get_theme_css_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client.get("/static/theme.css").send().await;
        response.assert_status_is_ok();
        response.assert_content_type("text/css");
        Ok(())
    }

    #[tokio::test]
    async fn security_headers_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        let response = client.get("/").send().await;
        response.assert_header("X-Frame-Options", "deny");
        response.assert_header("X-Content-Type-Options", "nosniff");
        Ok(())
    }

    #[tokio::test]
    async fn not_found_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        client.get("/missing").send().await.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn method_not_allowed_ok() -> Result {
        let client = create_standalone_test_client(UnseenStationPolicy::Reject)?;
        client.delete("/").send().await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        Ok(())
    }
}
