//! Token authentication extractor.
//!
//! Handlers that take an [`Authenticated`] argument only run for requests
//! carrying `Authorization: Token <key>` (or `Bearer <key>`) that resolves
//! to an active account.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthToken, Error, User};

use super::state::HttpState;

const SCHEMES: [&str; 2] = ["token", "bearer"];

/// The account behind the request's token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub User);

impl Authenticated {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Extract the token key from an `Authorization` header value.
///
/// Returns `Ok(None)` when the header uses some other scheme, so the
/// request is treated as unauthenticated rather than malformed.
pub(crate) fn parse_authorization(value: &str) -> Result<Option<AuthToken>, Error> {
    let mut parts = value.split_whitespace();
    let Some(scheme) = parts.next() else {
        return Ok(None);
    };
    if !SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }
    let key = match (parts.next(), parts.next()) {
        (Some(key), None) => key,
        (None, _) => {
            return Err(Error::unauthorized(
                "Invalid token header. No credentials provided.",
            ));
        }
        (Some(_), Some(_)) => {
            return Err(Error::unauthorized(
                "Invalid token header. Token string should not contain spaces.",
            ));
        }
    };
    AuthToken::parse(key)
        .map(Some)
        .map_err(|_| Error::unauthorized("Invalid token."))
}

fn bearer_token(req: &HttpRequest) -> Result<AuthToken, Error> {
    let missing = || Error::unauthorized("Authentication credentials were not provided.");
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(missing)?
        .to_str()
        .map_err(|_| Error::unauthorized("Invalid token header."))?;
    parse_authorization(value)?.ok_or_else(missing)
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let user = state.accounts.authenticate(&token).await?;
            Ok(Authenticated(user))
        })
    }
}
