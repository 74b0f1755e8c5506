use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::identity::UserId;

/// Header set by the upstream auth proxy
pub const USER_HEADER: &str = "x-user-id";

/// Caller identity from `X-User-Id`; `None` when the header is missing or blank.
///
/// Never rejects a request: commands decide whether no identity means
/// "no data" or `unauthenticated`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserId>);

impl CurrentUser {
    pub fn user(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(UserId::parse);
        Ok(CurrentUser(user))
    }
}
