//! Constants shared between crates.

/// Authentication and session constants.
pub struct AuthConstants;

impl AuthConstants {
    /// Cookie holding the signed session token
    pub const SESSION_COOKIE_NAME: &'static str = "gatehouse_session";

    /// Cookie carrying a one-shot message across a redirect
    pub const FLASH_COOKIE_NAME: &'static str = "gatehouse_flash";

    /// Issuer stamped into every session token
    pub const SESSION_ISSUER: &'static str = "gatehouse";

    /// Minimum username length (after trimming)
    pub const MIN_USERNAME_LENGTH: usize = 3;

    /// Maximum username length
    pub const MAX_USERNAME_LENGTH: usize = 32;
}

/// Evaluation gate constants.
pub struct EvaluationConstants;

impl EvaluationConstants {
    /// Default minimum score (percent) required to pass the evaluation
    pub const DEFAULT_PASS_MARK: u8 = 70;

    /// Highest possible score
    pub const MAX_SCORE: u8 = 100;
}
