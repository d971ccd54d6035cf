//! GET/POST /evaluation

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use gatehouse_auth::{CurrentUser, Flash};
use gatehouse_commons::UserStatus;
use gatehouse_core::{check_access, AccountService, Destination, EvaluationOutcome, Requirement};

use crate::error::ApiError;
use crate::pages;
use crate::response::{html_page, see_other_with};

const REQUIREMENT: Requirement = Requirement::Status(UserStatus::PendingEvaluation);

pub async fn evaluation_page(
    req: HttpRequest,
    current: CurrentUser,
    accounts: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), REQUIREMENT)?;

    Ok(html_page(&req, |flash| {
        pages::evaluation(user, accounts.question_bank(), accounts.pass_mark(), flash)
    }))
}

/// Answers arrive as `question_id=choice` pairs; unanswered questions are
/// simply absent.
pub async fn evaluation_submit(
    current: CurrentUser,
    accounts: web::Data<AccountService>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), REQUIREMENT)?;

    let (_, score, outcome) = accounts
        .submit_evaluation(user, &form)
        .await
        .map_err(|e| ApiError::from_service(e, Destination::Evaluation.path()))?;

    let response = match outcome {
        EvaluationOutcome::Passed { score: percent } => see_other_with(
            Destination::Pending.path(),
            Flash::success(format!(
                "You scored {}% ({} of {} correct). Your application is now awaiting approval.",
                percent, score.correct, score.total
            )),
        ),
        EvaluationOutcome::Failed { score: percent } => see_other_with(
            Destination::Evaluation.path(),
            Flash::error(format!(
                "You scored {}% ({} of {} correct). At least {}% is required; please try again.",
                percent,
                score.correct,
                score.total,
                accounts.pass_mark()
            )),
        ),
    };

    Ok(response)
}
