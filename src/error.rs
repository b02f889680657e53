use actix_web::error::{BlockingError, ResponseError};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use derive_more::Display;
use diesel::r2d2;
use diesel::result::Error as DieselError;
use std::convert::From;

use super::api::{ApiResponse, ResponseStatus};

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "Invalid configuration: {}", _0)]
    Config(String),

    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),

    #[display(fmt = "Authentication required")]
    Unauthorized,

    #[display(fmt = "Permission denied")]
    Forbidden,

    #[display(fmt = "Database error: {}", _0)]
    DieselError(DieselError),

    #[display(fmt = "Connection pool error: {}", _0)]
    PoolError(r2d2::PoolError),

    #[display(fmt = "Database operation was canceled")]
    Canceled,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DieselError(e) => Some(e),
            Self::PoolError(e) => Some(e),
            _ => None,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Config(_) | Self::DieselError(_) | Self::PoolError(_) | Self::Canceled => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server-side failures are logged, but not shown to the client.
        let body = if status.is_server_error() {
            error!("{}", self);
            ApiResponse::failure(
                ResponseStatus::Error,
                vec!["Internal server error".to_owned()],
            )
        } else {
            ApiResponse::failure(ResponseStatus::Fail, vec![self.to_string()])
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Error {
        match e {
            DieselError::NotFound => Error::NotFound("Record"),
            e => Error::DieselError(e),
        }
    }
}

impl From<r2d2::PoolError> for Error {
    fn from(e: r2d2::PoolError) -> Error {
        Error::PoolError(e)
    }
}

impl From<BlockingError<Error>> for Error {
    fn from(e: BlockingError<Error>) -> Error {
        match e {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => Error::Canceled,
        }
    }
}
