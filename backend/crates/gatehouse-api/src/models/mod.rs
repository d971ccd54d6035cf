//! Form bodies accepted by the page handlers.

mod approval_form;
mod credentials_form;

pub use approval_form::ApprovalForm;
pub use credentials_form::{LoginForm, RegisterForm};
