use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::borrowing::ProfileSubmission;
use crate::rates::RateTables;
use crate::sessions::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository,
};
use crate::sessions::{borrowing_router, BorrowingService};

pub(super) fn tables() -> Arc<RateTables> {
    Arc::new(RateTables::standard().expect("standard tables"))
}

/// Salaried individual earning 8000 a month, owner-occupier in NSW.
pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        gross_income: 8_000.0,
        income_frequency: "monthly".to_string(),
        other_income: 0.0,
        other_income_frequency: "yearly".to_string(),
        second_person_income: 0.0,
        second_person_income_frequency: "yearly".to_string(),
        second_person_other_income: 0.0,
        second_person_other_income_frequency: "yearly".to_string(),
        rental_income: 0.0,
        living_expenses: 2_000.0,
        rent_board: 0.0,
        dependents: 0,
        credit_card_limits: 5_000.0,
        loan_repayment: 0.0,
        has_hecs: false,
        age: 30,
        employment_type: "Full-time".to_string(),
        loan_purpose: "Owner-occupied".to_string(),
        loan_term: 30,
        interest_rate: 6.0,
        household_type: "Individual".to_string(),
        first_time_buyer: true,
        jurisdiction: "NSW".to_string(),
    }
}

pub(super) fn couple_investor_submission() -> ProfileSubmission {
    ProfileSubmission {
        second_person_income: 85_000.0,
        rental_income: 650.0,
        household_type: "Couple".to_string(),
        loan_purpose: "Investor".to_string(),
        first_time_buyer: false,
        dependents: 2,
        jurisdiction: "VIC".to_string(),
        ..submission()
    }
}

pub(super) fn negative_income_submission() -> ProfileSubmission {
    ProfileSubmission {
        gross_income: -1.0,
        ..submission()
    }
}

pub(super) fn build_service() -> (BorrowingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = BorrowingService::new(repository.clone(), tables());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session_id.clone(), record.clone());
        Ok(record)
    }

    fn replace(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.session_id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn replace(&self, _record: SessionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn router_with_service(service: BorrowingService<MemoryRepository>) -> axum::Router {
    borrowing_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
