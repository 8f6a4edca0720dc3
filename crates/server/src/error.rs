use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gatelogue_client::ClientError;
use gatelogue_types::GatelogueError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no snapshot has been loaded yet")]
    NotLoaded,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<GatelogueError> for ApiError {
    fn from(error: GatelogueError) -> Self {
        match error {
            GatelogueError::UnknownCategory(_) => Self::BadRequest(error.to_string()),
            GatelogueError::NodeNotFound(_) | GatelogueError::IncorrectType { .. } => {
                Self::NotFound(error.to_string())
            }
            GatelogueError::Decode(_) => Self::Upstream(ClientError::Decode(error)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatelogue_types::{Category, NodeId};

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotLoaded.status(), StatusCode::SERVICE_UNAVAILABLE);

        let unknown: ApiError = GatelogueError::UnknownCategory("planes".into()).into();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let wrong: ApiError = GatelogueError::IncorrectType {
            id: NodeId::new(1),
            expected: Category::AirGate,
            actual: Category::AirAirport,
        }
        .into();
        assert_eq!(wrong.status(), StatusCode::NOT_FOUND);

        let upstream = ApiError::Upstream(ClientError::Status {
            url: "https://example.invalid/data.json".into(),
            status: 500,
        });
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }
}
