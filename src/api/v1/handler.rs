use super::error::*;
use crate::application_port::{AuthService, LikeService};
use crate::domain_model::{LikeCount, LikedResource, ResourceId, UserId};
use crate::logger::*;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleLikeRequest {
    #[serde(alias = "podcast_id")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub message: &'static str,
}

pub async fn toggle_like(
    user_id: UserId,
    body: ToggleLikeRequest,
    like_service: Arc<dyn LikeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let toggle = like_service
        .toggle_like(&user_id, &body.resource_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let response = ToggleLikeResponse {
        liked: toggle.liked,
        message: if toggle.liked {
            "Podcast liked successfully"
        } else {
            "Podcast unliked successfully"
        },
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::ok(response)),
        StatusCode::CREATED,
    ))
}

pub async fn list_liked(
    user_id: UserId,
    like_service: Arc<dyn LikeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let liked: Vec<LikedResource> = like_service
        .list_liked(&user_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(liked)))
}

pub async fn count_likes(
    segment: String,
    like_service: Arc<dyn LikeService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // Path segments arrive percent-encoded; stored ids are decoded text.
    let resource_id = percent_decode_str(&segment)
        .decode_utf8()
        .map_err(|_| reject::custom(ApiErrorCode::InvalidResource))?
        .into_owned();

    let count: LikeCount = like_service
        .count_likes(&ResourceId(resource_id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(count)))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse;

pub async fn logout(
    token: String,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    if let Err(e) = auth_service.revoke(&token).await {
        debug!("logout refused: {}", e);
        return Err(reject::custom(ApiErrorCode::from(e)));
    }

    Ok(warp::reply::json(&ApiResponse::ok(LogoutResponse)))
}
