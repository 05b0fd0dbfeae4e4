use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::repository::{Assessment, RepositoryError, SessionId, SessionRecord, SessionRepository};
use crate::borrowing::{
    purchase_budget, BorrowingEngine, BudgetError, CalculationResult, DepositInput,
    FinancialProfile, Jurisdiction, ProfileGuard, ProfileSubmission, ProfileViolation,
    PurchaseBudget,
};
use crate::rates::{RateTableError, RateTables};
use crate::schemes::{SchemeEligibility, SchemeEvaluator};

/// Service composing the profile guard, borrowing engine, scheme evaluator and session store.
///
/// Each session holds at most one profile and the result derived from it; nothing is
/// shared between sessions.
pub struct BorrowingService<R> {
    guard: ProfileGuard,
    repository: Arc<R>,
    engine: BorrowingEngine,
    schemes: SchemeEvaluator,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("sess-{id:06}"))
}

impl<R> BorrowingService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, tables: Arc<RateTables>) -> Self {
        Self {
            guard: ProfileGuard,
            repository,
            engine: BorrowingEngine::new(tables.clone()),
            schemes: SchemeEvaluator::new(tables),
        }
    }

    pub fn open_session(&self) -> Result<SessionId, BorrowingServiceError> {
        let record = self
            .repository
            .insert(SessionRecord::open(next_session_id()))?;
        info!(session_id = %record.session_id, "session opened");
        Ok(record.session_id)
    }

    /// Validate and assess a profile, replacing whatever the session held before.
    pub fn submit(
        &self,
        session_id: &SessionId,
        submission: ProfileSubmission,
    ) -> Result<Assessment, BorrowingServiceError> {
        let mut record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;

        let profile = self.validate(submission)?;
        let result = self.engine.assess(&profile).map_err(table_gap)?;
        let assessment = Assessment {
            profile,
            result,
            submitted_at: Utc::now(),
        };

        record.assessment = Some(assessment.clone());
        self.repository.replace(record)?;

        info!(
            session_id = %session_id,
            borrowing_power = assessment.result.borrowing_power,
            "profile assessed"
        );
        Ok(assessment)
    }

    pub fn estimate(
        &self,
        session_id: &SessionId,
    ) -> Result<CalculationResult, BorrowingServiceError> {
        Ok(self.assessment(session_id)?.result)
    }

    /// Scheme eligibility for the session's profile; defaults to the profile's own jurisdiction.
    pub fn schemes(
        &self,
        session_id: &SessionId,
        jurisdiction: Option<Jurisdiction>,
    ) -> Result<Vec<SchemeEligibility>, BorrowingServiceError> {
        let assessment = self.assessment(session_id)?;
        let jurisdiction = jurisdiction.unwrap_or(assessment.profile.jurisdiction);
        self.schemes
            .eligible_schemes(
                jurisdiction,
                &assessment.profile,
                assessment.result.household_gross_income,
            )
            .map_err(table_gap)
    }

    pub fn budget(
        &self,
        session_id: &SessionId,
        deposit: DepositInput,
    ) -> Result<PurchaseBudget, BorrowingServiceError> {
        let assessment = self.assessment(session_id)?;
        let budget = purchase_budget(assessment.result.borrowing_power, deposit)?;
        Ok(budget)
    }

    pub fn close(&self, session_id: &SessionId) -> Result<(), BorrowingServiceError> {
        self.repository.remove(session_id)?;
        info!(session_id = %session_id, "session closed");
        Ok(())
    }

    /// One-shot calculation that touches no session.
    pub fn assess(
        &self,
        submission: ProfileSubmission,
    ) -> Result<CalculationResult, BorrowingServiceError> {
        let profile = self.validate(submission)?;
        self.engine.assess(&profile).map_err(table_gap)
    }

    fn validate(
        &self,
        submission: ProfileSubmission,
    ) -> Result<FinancialProfile, BorrowingServiceError> {
        self.guard
            .profile_from_submission(submission)
            .map_err(|violation| {
                warn!(%violation, "profile rejected");
                BorrowingServiceError::from(violation)
            })
    }

    fn assessment(&self, session_id: &SessionId) -> Result<Assessment, BorrowingServiceError> {
        let record = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        record
            .assessment
            .ok_or_else(|| BorrowingServiceError::NoProfile(session_id.clone()))
    }
}

fn table_gap(error: RateTableError) -> BorrowingServiceError {
    warn!(%error, "rate table lookup failed");
    BorrowingServiceError::Rates(error)
}

/// Error raised by the borrowing service.
#[derive(Debug, thiserror::Error)]
pub enum BorrowingServiceError {
    #[error(transparent)]
    Validation(#[from] ProfileViolation),
    #[error(transparent)]
    InvalidDeposit(#[from] BudgetError),
    #[error("no profile has been submitted for session {0}")]
    NoProfile(SessionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Rates(#[from] RateTableError),
}
