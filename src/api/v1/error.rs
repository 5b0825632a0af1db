use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if let Some(code) = err.find::<ApiErrorCode>() {
        (code.clone(), code.to_string())
    } else if err.is_not_found() {
        (ApiErrorCode::NotFound, ApiErrorCode::NotFound.to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (ApiErrorCode::BadRequest, e.to_string())
    } else if err.find::<reject::PayloadTooLarge>().is_some() {
        (
            ApiErrorCode::PayloadTooLarge,
            ApiErrorCode::PayloadTooLarge.to_string(),
        )
    } else if err.find::<reject::LengthRequired>().is_some() {
        (ApiErrorCode::BadRequest, "Missing content-length".to_string())
    } else if err.find::<reject::UnsupportedMediaType>().is_some() {
        (ApiErrorCode::BadRequest, "Expected a JSON body".to_string())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (
            ApiErrorCode::MethodNotAllowed,
            ApiErrorCode::MethodNotAllowed.to_string(),
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (
            ApiErrorCode::InternalError,
            ApiErrorCode::InternalError.to_string(),
        )
    };

    let status = code.status();
    let json = warp::reply::json(&ApiResponse::<()>::err(code, message));
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// One outcome for every credential failure; the cause is not disclosed.
    #[error("Invalid access token")]
    Unauthorized,
    #[error("User was logged out")]
    NotLoggedIn,
    #[error("Invalid resource id")]
    InvalidResource,
    #[error("Malformed request")]
    BadRequest,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Route not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Service temporarily unavailable, retry later")]
    ServiceUnavailable,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorCode::NotLoggedIn | ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidResource | ApiErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<AuthError> for ApiErrorCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MalformedCredential
            | AuthError::ExpiredCredential
            | AuthError::RevokedOrUnknownSession => ApiErrorCode::Unauthorized,
            AuthError::NotLoggedIn => ApiErrorCode::NotLoggedIn,
            AuthError::StoreUnavailable(e) => {
                warn!("Session store unavailable: {}", e);
                ApiErrorCode::ServiceUnavailable
            }
            AuthError::InternalError(e) => ApiErrorCode::internal(e),
        }
    }
}

impl From<LikeError> for ApiErrorCode {
    fn from(error: LikeError) -> Self {
        match error {
            LikeError::InvalidResource(_) => ApiErrorCode::InvalidResource,
            LikeError::StoreUnavailable(_) => ApiErrorCode::ServiceUnavailable,
        }
    }
}
