//! HTTP request handlers
//!
//! Every protected page runs the access gate against a freshly loaded user
//! record before doing anything else.

mod account;
mod admin;
mod dashboard;
mod evaluation;
mod health;
mod home;
mod payment;
mod pending;

pub use account::{login_form, login_submit, logout_handler, register_form, register_submit};
pub use admin::{approvals_page, approvals_submit};
pub use dashboard::dashboard_page;
pub use evaluation::{evaluation_page, evaluation_submit};
pub use health::healthz_handler;
pub use home::home_page;
pub use payment::{payment_page, payment_submit};
pub use pending::pending_page;
