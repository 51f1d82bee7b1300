//! Request extractors: session identity, validated JSON bodies, and
//! wrappers that keep transport rejections inside the error envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tower_sessions::Session;
use validator::Validate;

use domains::SessionUser;

use crate::error::{violations_from, ApiError};

/// Session key under which the logged-in identity is stored.
pub const SESSION_USER_KEY: &str = "auth.user";

/// The authenticated caller, resolved from the server-side session.
///
/// Adding this to a handler makes the route protected: no (or stale)
/// session yields a 401 envelope before the handler runs. The identity is
/// then passed on explicitly; nothing downstream reads ambient state.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub SessionUser);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unauthorized())?;
        let identity: Option<SessionUser> = session
            .get(SESSION_USER_KEY)
            .await
            .map_err(ApiError::session)?;
        identity.map(CurrentUser).ok_or_else(ApiError::unauthorized)
    }
}

/// `Json<T>` plus validator checks. Unreadable bodies and failed field
/// validation both come back as 400 VALIDATION_ERROR, the latter listing
/// every offending field.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::malformed_body(&rejection))?;
        value
            .validate()
            .map_err(|errors| ApiError::validation(violations_from(&errors)))?;
        Ok(Self(value))
    }
}

/// `Query<T>` with its rejection folded into the envelope.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_query(&rejection))?;
        Ok(Self(value))
    }
}

/// `Path<T>` with its rejection folded into the envelope.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_path(&rejection))?;
        Ok(Self(value))
    }
}
