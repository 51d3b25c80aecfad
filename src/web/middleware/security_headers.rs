use poem::http::HeaderValue;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

/// Stylesheets come from the site itself and the Bulma CDN, nothing else is loaded.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; \
    style-src 'self' https://cdn.jsdelivr.net; \
    img-src 'self' data:; \
    form-action 'self'; \
    frame-ancestors 'none'";

pub struct SecurityHeadersMiddleware;

impl<E: Endpoint> Middleware<E> for SecurityHeadersMiddleware {
    type Output = SecurityHeadersImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SecurityHeadersImpl { ep }
    }
}

pub struct SecurityHeadersImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SecurityHeadersImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let mut response = self.ep.call(request).await?.into_response();
        let headers = response.headers_mut();
        headers.remove("Server");
        headers.append("Content-Security-Policy", HeaderValue::from_static(CONTENT_SECURITY_POLICY));
        headers.append("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
        headers.append("X-Frame-Options", HeaderValue::from_static("deny"));
        headers.append("Referrer-Policy", HeaderValue::from_static("no-referrer"));
        Ok(response)
    }
}
