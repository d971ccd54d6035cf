use serde::Deserialize;

use super::credentials_form::validate_username_length;

/// Admin decision posted from the approvals table.
///
/// `action` is `approve` or `reject`; it is parsed by the handler so an
/// unknown value can be reported back on the page.
#[derive(Debug, Deserialize)]
pub struct ApprovalForm {
    #[serde(deserialize_with = "validate_username_length")]
    pub username: String,
    pub action: String,
}
