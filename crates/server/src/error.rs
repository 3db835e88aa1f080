//! HTTP mapping of generation errors

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use openapi_llms_common::LlmsError;

/// Any failure while serving llms.txt; always answered with a 500
#[derive(Debug)]
pub struct ServeError(pub LlmsError);

impl From<LlmsError> for ServeError {
    fn from(err: LlmsError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Error generating llms.txt: {}", self.0),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_map_to_500() {
        let response = ServeError(LlmsError::Config("missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
