// Gatehouse Authentication Library
// Provides password hashing, signed session tokens, session/flash cookies,
// and the request extractor that resolves the current user.

pub mod cookie;
pub mod error;
pub mod extractor;
pub mod flash;
pub mod password;
pub mod session;

pub use cookie::{create_logout_cookie, create_session_cookie, CookieConfig};
pub use error::{AuthError, AuthResult};
pub use extractor::CurrentUser;
pub use flash::{Flash, FlashLevel};
pub use password::{hash_password, validate_password, verify_password};
pub use session::{create_session_token, validate_session_token, SessionClaims};
