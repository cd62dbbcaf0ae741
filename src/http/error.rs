use std::borrow::Cow;

use axum::response::IntoResponse;
use axum::Json;
use hyper::StatusCode;

use crate::dashboard::BookmarkError;
use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ApiErrorCode(pub u16);

impl ApiErrorCode {
	/// The requested route does not exist.
	pub const ROUTE_NOT_FOUND: Self = Self(404);
	/// No article with the requested id.
	pub const ARTICLE_NOT_FOUND: Self = Self(1000);
	/// The article is not on the current bookmarks list.
	pub const NOT_BOOKMARKED: Self = Self(1001);
	/// The article store failed or answered with something unreadable.
	pub const UPSTREAM_ERROR: Self = Self(2000);
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiError {
	#[serde(skip)]
	pub status_code: StatusCode,
	pub status: Cow<'static, str>,
	pub error_code: ApiErrorCode,
	pub error: Cow<'static, str>,
}

impl ApiError {
	pub fn new(status_code: StatusCode, error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self {
			status_code,
			status: status_code.canonical_reason().unwrap_or("unknown").into(),
			error_code,
			error: error.into(),
		}
	}

	pub fn not_found(error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::NOT_FOUND, error_code, error)
	}

	pub fn bad_gateway(error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::BAD_GATEWAY, error_code, error)
	}

	/// Maps a store failure, logging the underlying cause.
	pub fn upstream(context: &'static str, err: &StoreError) -> Self {
		match err {
			StoreError::NotFound(id) => {
				Self::not_found(ApiErrorCode::ARTICLE_NOT_FOUND, format!("article {id} not found"))
			}
			_ => {
				tracing::error!(error = %err, "{context}");
				Self::bad_gateway(ApiErrorCode::UPSTREAM_ERROR, context)
			}
		}
	}
}

impl From<BookmarkError> for ApiError {
	fn from(err: BookmarkError) -> Self {
		match err {
			BookmarkError::NotBookmarked(id) => {
				Self::not_found(ApiErrorCode::NOT_BOOKMARKED, format!("article {id} is not bookmarked"))
			}
			BookmarkError::Store { source, .. } => Self::upstream("failed to update bookmark", &source),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> axum::http::Response<axum::body::Body> {
		(self.status_code, Json(self)).into_response()
	}
}
