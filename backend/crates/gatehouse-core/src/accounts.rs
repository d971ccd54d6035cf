//! Account operations backed by a `UserRepository`.
//!
//! Workflow transitions run inside `UserRepository::modify_user`, against the
//! stored record rather than the copy a request loaded earlier. A refused
//! transition or a failed write leaves the stored record untouched.

use std::collections::HashMap;
use std::sync::Arc;

use gatehouse_auth::{hash_password, validate_password, verify_password};
use gatehouse_commons::{User, UserName, UserStatus};
use gatehouse_configs::{AuthSettings, EvaluationSettings};
use gatehouse_store::{StoreError, UserRepository};
use log::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::evaluation::{passes, QuestionBank, Score};
use crate::workflow::{self, AdminDecision, EvaluationOutcome};

pub struct AccountService {
    repo: Arc<dyn UserRepository>,
    bank: Arc<QuestionBank>,
    bcrypt_cost: u32,
    pass_mark: u8,
}

impl AccountService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        bank: Arc<QuestionBank>,
        auth: &AuthSettings,
        evaluation: &EvaluationSettings,
    ) -> Self {
        Self {
            repo,
            bank,
            bcrypt_cost: auth.bcrypt_cost,
            pass_mark: evaluation.pass_mark,
        }
    }

    pub fn repository(&self) -> &Arc<dyn UserRepository> {
        &self.repo
    }

    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn pass_mark(&self) -> u8 {
        self.pass_mark
    }

    /// Create a new applicant account.
    ///
    /// The account starts as role `user`, `pending_evaluation`, score 0,
    /// unpaid. Usernames are compared case-insensitively.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> ServiceResult<User> {
        let username = UserName::parse(username)?;
        if password != confirm_password {
            return Err(ServiceError::PasswordMismatch);
        }
        validate_password(password)?;

        if self.repo.get_user(&username).await?.is_some() {
            return Err(ServiceError::UsernameTaken(username.into_string()));
        }

        let hash = hash_password(password, Some(self.bcrypt_cost)).await?;
        let user = User::new_applicant(username, hash);
        // insert_user re-checks under the store lock, so a concurrent
        // registration of the same name still fails here
        self.repo.insert_user(user.clone()).await?;

        info!("Registered user '{}'", user.username);
        Ok(user)
    }

    /// Verify credentials. Unknown users and wrong passwords produce the
    /// same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<User> {
        let Ok(username) = UserName::parse(username) else {
            return Err(ServiceError::InvalidCredentials);
        };

        let Some(user) = self.repo.get_user(&username).await? else {
            debug!("Login attempt for unknown user '{}'", username);
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash).await? {
            warn!("Failed login for user '{}'", username);
            return Err(ServiceError::InvalidCredentials);
        }

        info!("User '{}' logged in", username);
        Ok(user)
    }

    /// Score a submission and record the attempt.
    ///
    /// Only `user`'s name is taken from the argument; the transition is
    /// checked against the stored status.
    pub async fn submit_evaluation(
        &self,
        user: &User,
        answers: &HashMap<String, String>,
    ) -> ServiceResult<(User, Score, EvaluationOutcome)> {
        let score = self.bank.score(answers);
        let (percent, pass_mark) = (score.percent, self.pass_mark);

        let updated = self
            .repo
            .modify_user(
                &user.username,
                Box::new(move |stored: &mut User| {
                    workflow::apply_evaluation(stored, percent, pass_mark)
                        .map(|_| ())
                        .map_err(StoreError::rejected)
                }),
            )
            .await?;

        let outcome = if passes(percent, pass_mark) {
            EvaluationOutcome::Passed { score: percent }
        } else {
            EvaluationOutcome::Failed { score: percent }
        };

        info!(
            "User '{}' scored {}% ({}/{}) on attempt {}: {}",
            updated.username,
            score.percent,
            score.correct,
            score.total,
            updated.evaluation_attempts,
            if outcome.passed() { "passed" } else { "failed" }
        );
        Ok((updated, score, outcome))
    }

    /// Applications waiting for an admin decision, oldest first.
    pub async fn pending_applications(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.users_with_status(UserStatus::PendingApproval).await?)
    }

    /// Approve or reject `target` on behalf of `admin`.
    pub async fn decide(
        &self,
        admin: &User,
        target: &str,
        decision: AdminDecision,
    ) -> ServiceResult<User> {
        if !admin.is_admin() {
            return Err(ServiceError::Forbidden);
        }

        let target = UserName::parse(target)?;
        let user = self
            .repo
            .modify_user(
                &target,
                Box::new(move |stored: &mut User| {
                    workflow::decide(stored, decision).map_err(StoreError::rejected)
                }),
            )
            .await?;

        info!(
            "Admin '{}' applied '{}' to user '{}'",
            admin.username, decision, user.username
        );
        Ok(user)
    }

    /// Simulated payment: flips `paid` for an approved user.
    pub async fn record_payment(&self, user: &User) -> ServiceResult<User> {
        let updated = self
            .repo
            .modify_user(
                &user.username,
                Box::new(|stored: &mut User| {
                    workflow::record_payment(stored).map_err(StoreError::rejected)
                }),
            )
            .await?;

        info!("Recorded payment for user '{}'", updated.username);
        Ok(updated)
    }

    /// Create an admin account unless one with that name already exists.
    ///
    /// Returns `true` when a record was written. An existing non-admin user
    /// with the same name is an error.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let username = UserName::parse(username)?;

        if let Some(existing) = self.repo.get_user(&username).await? {
            if existing.is_admin() {
                debug!("Admin '{}' already present", username);
                return Ok(false);
            }
            return Err(ServiceError::UsernameTaken(username.into_string()));
        }

        validate_password(password)?;
        let hash = hash_password(password, Some(self.bcrypt_cost)).await?;
        self.repo.insert_user(User::new_admin(username.clone(), hash)).await?;

        info!("Created admin user '{}'", username);
        Ok(true)
    }
}
