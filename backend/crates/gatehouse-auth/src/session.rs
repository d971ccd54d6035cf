// Signed session tokens
//
// The browser session is a stateless HS256 JWT whose subject is the
// username. Nothing is stored server-side; handlers reload the user record
// on every request, so the role claim is informational only.

use crate::error::{AuthError, AuthResult};
use gatehouse_commons::{AuthConstants, Role, UserName};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (username)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Role at login time
    pub role: Role,
}

impl SessionClaims {
    pub fn new(username: &UserName, role: Role, expiry_hours: Option<i64>) -> Self {
        let now = chrono::Utc::now();
        let exp_hours = expiry_hours.unwrap_or(DEFAULT_SESSION_EXPIRY_HOURS);
        let exp = now + chrono::Duration::hours(exp_hours);

        Self {
            sub: username.to_string(),
            iss: AuthConstants::SESSION_ISSUER.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            role,
        }
    }

    pub fn username(&self) -> UserName {
        UserName::new(self.sub.clone())
    }
}

/// Create and sign a session token in one step.
pub fn create_session_token(
    username: &UserName,
    role: Role,
    expiry_hours: Option<i64>,
    secret: &str,
) -> AuthResult<(String, SessionClaims)> {
    let claims = SessionClaims::new(username, role, expiry_hours);
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    let token = encode(&header, &claims, &encoding_key)
        .map_err(|e| AuthError::SigningError(e.to_string()))?;

    Ok((token, claims))
}

/// Validate a session token and extract its claims.
///
/// Verifies signature, expiration, issuer and a non-empty subject.
///
/// # Errors
/// - `AuthError::TokenExpired` if the token has expired
/// - `AuthError::InvalidToken` for any other failure
pub fn validate_session_token(token: &str, secret: &str) -> AuthResult<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_issuer(&[AuthConstants::SESSION_ISSUER]);

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;

    let claims = token_data.claims;
    if claims.sub.is_empty() {
        return Err(AuthError::InvalidToken("missing subject".to_string()));
    }

    Ok(claims)
}
