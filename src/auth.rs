use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use super::db::{self, GetLoggedInPerson, Pool};
use super::error::{Error, Result};
use super::models::Person;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// The person making the request, if they are signed in.
///
/// A missing, unknown or expired session is an anonymous request, not an error.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Person>);

impl CurrentUser {
    pub fn person(&self) -> Option<&Person> {
        self.0.as_ref()
    }

    /// Require a signed-in administrator.
    pub fn admin(&self) -> Result<&Person> {
        match &self.0 {
            None => Err(Error::Unauthorized),
            Some(person) if !person.is_admin => Err(Error::Forbidden),
            Some(person) => Ok(person),
        }
    }
}

/// Session id from the session cookie, or else from an
/// `Authorization: Bearer` header.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_owned());
        }
    }

    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let mut parts = value.splitn(2, ' ');
            match (parts.next(), parts.next()) {
                (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
                    Some(token.trim().to_owned())
                }
                _ => None,
            }
        })
        .filter(|token| !token.is_empty())
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = session_token(req);
        let pool = web::Data::<Pool>::extract(req);

        Box::pin(async move {
            let token = match token {
                Some(token) => token,
                None => return Ok(CurrentUser(None)),
            };

            let pool = pool.await?;
            let person = db::execute(&pool, GetLoggedInPerson::from_session(token)).await?;
            if person.is_none() {
                debug!("Session not found or expired");
            }

            Ok(CurrentUser(person))
        })
    }
}
