//! One-shot flash messages carried across a redirect.
//!
//! The message is stored base64url-encoded in a short-lived cookie, read on
//! the next rendered page, then cleared.

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::HttpRequest;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use gatehouse_commons::AuthConstants;

/// Flash cookies only need to survive one redirect.
const FLASH_MAX_AGE_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Info => "info",
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "info" => Some(FlashLevel::Info),
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Encode as `level|message`, base64url without padding.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}|{}", self.level.as_str(), self.message))
    }

    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (level, message) = text.split_once('|')?;

        Some(Self {
            level: FlashLevel::from_str_opt(level)?,
            message: message.to_string(),
        })
    }

    pub fn to_cookie<'a>(&self) -> Cookie<'a> {
        Cookie::build(AuthConstants::FLASH_COOKIE_NAME, self.encode())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(FLASH_MAX_AGE_SECS))
            .finish()
    }

    /// Read the pending flash message, if any.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.cookie(AuthConstants::FLASH_COOKIE_NAME)
            .and_then(|c| Self::decode(c.value()))
    }

    /// Cookie that removes a consumed flash message.
    pub fn clear_cookie<'a>() -> Cookie<'a> {
        Cookie::build(AuthConstants::FLASH_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .finish()
    }
}
