use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown service")]
    UnknownService,

    /// The backing service answered with a non-success status. Propagated
    /// opaquely; the gateway does not distinguish an upstream 404 from an
    /// upstream 500.
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("upstream request failed: {0}")]
    UpstreamUnreachable(String),

    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::UpstreamUnreachable(e.to_string())
    }
}

impl actix_web::ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UnknownService => StatusCode::NOT_FOUND,
            GatewayError::UpstreamStatus(_) | GatewayError::UpstreamUnreachable(_) => {
                StatusCode::BAD_GATEWAY
            }
            GatewayError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            GatewayError::UnknownService => "<h1>Unknown service</h1>".to_string(),
            GatewayError::UpstreamStatus(_) | GatewayError::UpstreamUnreachable(_) => {
                "<h1>Bad gateway</h1><p>The backing service did not answer successfully.</p>"
                    .to_string()
            }
            GatewayError::Render(_) => "<h1>Internal error</h1>".to_string(),
        };
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn unknown_service_is_404() {
        assert_eq!(
            GatewayError::UnknownService.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_failures_are_502_regardless_of_status() {
        assert_eq!(
            GatewayError::UpstreamStatus(404).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::UpstreamStatus(500).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GatewayError::UpstreamUnreachable("connection refused".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn error_pages_are_html() {
        let resp = GatewayError::UnknownService.error_response();
        let content_type = resp
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }
}
