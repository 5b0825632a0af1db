use super::error::*;
use super::handler;
use crate::application_port::AuthService;
use crate::domain_model::UserId;
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

const MAX_BODY_BYTES: u64 = 4 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let toggle_like = warp::path!("likes" / "toggle")
        .and(warp::post())
        .and(with_verification(server.auth_service.clone()))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with(server.like_service.clone()))
        .and_then(handler::toggle_like);

    let list_liked = warp::path!("likes")
        .and(warp::get())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.like_service.clone()))
        .and_then(handler::list_liked);

    let count_likes = warp::path!("likes" / "count" / String)
        .and(warp::get())
        .and(with(server.like_service.clone()))
        .and_then(handler::count_likes);

    let logout = warp::path!("sessions" / "logout")
        .and(warp::post())
        .and(with_bearer())
        .and(with(server.auth_service.clone()))
        .and_then(handler::logout);

    toggle_like.or(list_liked).or(count_likes).or(logout)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Extracts the raw bearer credential. A missing or non-bearer header is unauthorized.
fn with_bearer() -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(
        |header: Option<String>| async move {
            header
                .as_deref()
                .and_then(bearer_token)
                .map(str::to_string)
                .ok_or_else(|| reject::custom(ApiErrorCode::Unauthorized))
        },
    )
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (UserId,), Error = warp::Rejection> + Clone {
    with_bearer().and_then(move |token: String| {
        let auth_service = auth_service.clone();
        async move {
            auth_service
                .validate(&token)
                .await
                .map_err(ApiErrorCode::from)
                .map_err(reject::custom)
        }
    })
}
