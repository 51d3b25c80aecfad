use poem::error::{
    MethodNotAllowedError, NotFoundError, ParseFormError, ParsePathError, ParseQueryError,
};
use poem::http::StatusCode;
use poem::web::Html;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::prelude::*;
use crate::web::partials::error_page;

/// Turns the errors into plain HTML error pages.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let status = match self.ep.call(request).await {
            Ok(response) => {
                return Ok(response);
            }
            Err(error) if error.is::<NotFoundError>() => {
                info!(?method, ?uri, "{:#}", error);
                StatusCode::NOT_FOUND
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                StatusCode::METHOD_NOT_ALLOWED
            }
            Err(error)
                if error.is::<ParseFormError>()
                    || error.is::<ParseQueryError>()
                    || error.is::<ParsePathError>() =>
            {
                info!(?method, ?uri, "{:#}", error);
                StatusCode::BAD_REQUEST
            }
            Err(error) => {
                error!(?method, ?uri, "{:#}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Ok(Html(error_page(status).into_string()).with_status(status).into_response())
    }
}
