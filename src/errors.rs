use axum::http::StatusCode;

/// Failures raised by the state transformations themselves.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("task {0} not found")]
    TaskNotFound(String),
    #[error("stock item {0} not found")]
    StockItemNotFound(String),
    #[error("flock {0} not found")]
    FlockNotFound(String),
    #[error("cannot price a sale for {name}: price per kg is {price}")]
    InvalidPrice { name: String, price: f64 },
    #[error("refusing to save non-finite number in {0}")]
    NonFiniteValue(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::TaskNotFound(_)
            | StoreError::StockItemNotFound(_)
            | StoreError::FlockNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidPrice { .. } => StatusCode::BAD_REQUEST,
            StoreError::NonFiniteValue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
