//! HTTP server exposing a feed API over XRPC.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use scrollfeed_core::error::{Error, InvalidArgumentError};
use scrollfeed_core::model::{Comment, CommentPage, PostPage};
use scrollfeed_core::traits::{CommentsQuery, FeedApi, PostsQuery};
use scrollfeed_core::types::Limit;

use crate::endpoints::*;

type SharedApi = Arc<dyn FeedApi>;

/// An [`Error`] rendered as an XRPC error response.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(
            InvalidArgumentError::Other {
                message: rejection.body_text(),
            }
            .into(),
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(
            InvalidArgumentError::Other {
                message: rejection.body_text(),
            }
            .into(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidArgument(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
            Error::WriteFailed { reason } => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
            Error::StoreUnavailable(inner) => {
                warn!(error = %inner, "Store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "the feed store is unavailable".to_string(),
                )
            }
            other => (StatusCode::BAD_GATEWAY, other.to_string()),
        };

        let body = XrpcErrorResponse {
            error: Some(self.0.code().to_string()),
            message: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

async fn get_posts(
    State(api): State<SharedApi>,
    params: Result<Query<GetPostsParams>, QueryRejection>,
) -> Result<Json<PostPage>, ApiError> {
    let Query(params) = params?;
    let query = PostsQuery::first(Limit::resolve(params.limit)?).after(params.cursor);
    Ok(Json(api.get_posts(query).await?))
}

async fn get_comments(
    State(api): State<SharedApi>,
    params: Result<Query<GetCommentsParams>, QueryRejection>,
) -> Result<Json<CommentPage>, ApiError> {
    let Query(params) = params?;
    let query = CommentsQuery::latest(params.post_id, Limit::resolve(params.limit)?)
        .before(params.cursor);
    Ok(Json(api.get_comments(query).await?))
}

async fn add_comment(
    State(api): State<SharedApi>,
    input: Result<Json<AddCommentInput>, JsonRejection>,
) -> Result<Json<Comment>, ApiError> {
    let Json(input) = input?;
    Ok(Json(api.add_comment(input.post_id, &input.content).await?))
}

/// Build the XRPC router for a feed API.
pub fn router(api: SharedApi) -> Router {
    Router::new()
        .route(&format!("/xrpc/{}", GET_POSTS), get(get_posts))
        .route(&format!("/xrpc/{}", GET_COMMENTS), get(get_comments))
        .route(&format!("/xrpc/{}", ADD_COMMENT), post(add_comment))
        .with_state(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve a feed API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, api: SharedApi, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Serving feed over XRPC");

    axum::serve(listener, router(api))
        .with_graceful_shutdown(shutdown)
        .await
}
