//! Error type returned by every page handler.
//!
//! Visitors never see an error status for their own mistakes: those become a
//! `303 See Other` back to a page, carrying a flash message. Only storage or
//! hashing failures produce a 500.

use std::fmt;

use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use gatehouse_auth::{AuthError, Flash};
use gatehouse_core::{Destination, ServiceError};

use crate::pages;

#[derive(Debug)]
pub enum ApiError {
    /// Send the visitor elsewhere, optionally with a message.
    Redirect { to: String, flash: Option<Flash> },
    /// Server-side failure; the detail is logged, never shown.
    Internal(String),
}

impl ApiError {
    pub fn redirect(to: impl Into<String>) -> Self {
        ApiError::Redirect {
            to: to.into(),
            flash: None,
        }
    }

    pub fn redirect_with(to: impl Into<String>, flash: Flash) -> Self {
        ApiError::Redirect {
            to: to.into(),
            flash: Some(flash),
        }
    }

    pub fn internal(detail: impl fmt::Display) -> Self {
        ApiError::Internal(detail.to_string())
    }

    /// Map a service failure to a redirect back to `back_to`, or a 500 when
    /// the failure is not the visitor's doing.
    pub fn from_service(err: ServiceError, back_to: &str) -> Self {
        if err.is_user_facing() {
            ApiError::redirect_with(back_to, Flash::error(err.to_string()))
        } else {
            ApiError::internal(err)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Redirect { to, .. } => write!(f, "redirect to {}", to),
            ApiError::Internal(detail) => write!(f, "internal error: {}", detail),
        }
    }
}

impl From<Destination> for ApiError {
    fn from(dest: Destination) -> Self {
        match dest {
            Destination::Login => {
                ApiError::redirect_with(dest.path(), Flash::info("Please log in to continue"))
            },
            other => ApiError::redirect(other.path()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::internal(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Redirect { .. } => StatusCode::SEE_OTHER,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Redirect { to, flash } => {
                let mut builder = HttpResponse::SeeOther();
                builder.insert_header((header::LOCATION, to.as_str()));
                if let Some(flash) = flash {
                    builder.cookie(flash.to_cookie());
                }
                builder.finish()
            },
            ApiError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                HttpResponse::InternalServerError()
                    .content_type(ContentType::html())
                    .body(pages::server_error())
            },
        }
    }
}
