//! Per-request identity gateway.
//!
//! Every authenticated route names `Caller` as an extractor, so no handler
//! can reach the store without the token verified and the namespace resolved
//! first. Resolution hits the user-record store on each request: a record
//! deleted after token issuance is rejected on its very next call.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use http::StatusCode;
use uuid::Uuid;

use common::identity::ResolveError;
use common::namespace::Namespace;

use crate::ServiceState;

use super::tokens::TokenError;

/// The authenticated caller of one request, bound to its namespace.
pub struct Caller {
    pub id: Uuid,
    pub namespace: Namespace,
}

impl Caller {
    pub fn username(&self) -> &str {
        self.namespace.username()
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for Caller {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthRejection::MissingToken)?;

        let id = state.tokens().verify(bearer.token())?;
        let namespace = state.resolver().resolve(id).await?;

        Ok(Caller { id, namespace })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing bearer token")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthRejection::MissingToken => StatusCode::UNAUTHORIZED,
            AuthRejection::Token(_) => StatusCode::FORBIDDEN,
            AuthRejection::Resolve(ResolveError::IdentityNotFound(_)) => StatusCode::NOT_FOUND,
            AuthRejection::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
