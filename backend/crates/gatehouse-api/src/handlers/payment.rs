//! Simulated payment
//!
//! No payment provider is involved: submitting the form marks an approved
//! user as paid.

use actix_web::{web, HttpRequest, HttpResponse};
use gatehouse_auth::{CurrentUser, Flash};
use gatehouse_core::{check_access, AccountService, Destination, Requirement};

use crate::error::ApiError;
use crate::pages;
use crate::response::{html_page, see_other, see_other_with};

/// GET /payment
pub async fn payment_page(req: HttpRequest, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), Requirement::Approved)?;

    if user.paid {
        return Ok(see_other(Destination::Dashboard.path()));
    }
    Ok(html_page(&req, |flash| pages::payment(user, flash)))
}

/// POST /payment
pub async fn payment_submit(
    current: CurrentUser,
    accounts: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), Requirement::Approved)?;

    if user.paid {
        return Ok(see_other_with(
            Destination::Dashboard.path(),
            Flash::info("Your membership is already active."),
        ));
    }

    accounts
        .record_payment(user)
        .await
        .map_err(|e| ApiError::from_service(e, Destination::Payment.path()))?;

    Ok(see_other_with(
        Destination::Dashboard.path(),
        Flash::success("Payment received. Your membership is now active."),
    ))
}
