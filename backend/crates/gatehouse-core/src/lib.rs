//! Gatehouse core
//!
//! Business rules shared by every HTTP handler:
//!
//! - [`evaluation`]: question bank and scoring
//! - [`workflow`]: user status state machine
//! - [`gate`]: ordered access checks for protected pages
//! - [`accounts`]: registration, login and the mutations that drive the
//!   workflow, persisted through a `UserRepository`

pub mod accounts;
pub mod error;
pub mod evaluation;
pub mod gate;
pub mod workflow;

pub use accounts::AccountService;
pub use error::{ServiceError, ServiceResult};
pub use evaluation::{passes, percentage, EvaluationError, Question, QuestionBank, Score};
pub use gate::{check_access, current_destination, Destination, Requirement};
pub use workflow::{AdminDecision, EvaluationOutcome, WorkflowError};
