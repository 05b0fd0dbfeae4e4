use super::common::*;
use crate::borrowing::{
    BudgetError, DepositInput, HouseholdType, Jurisdiction, LoanPurpose, ProfileViolation,
};
use crate::sessions::repository::{RepositoryError, SessionId, SessionRepository};
use crate::sessions::{BorrowingService, BorrowingServiceError};
use std::sync::Arc;

#[test]
fn open_session_allocates_distinct_ids() {
    let (service, repository) = build_service();

    let first = service.open_session().expect("opens");
    let second = service.open_session().expect("opens");

    assert_ne!(first, second);
    assert!(first.0.starts_with("sess-"));
    assert_eq!(repository.len(), 2);
    let stored = repository
        .fetch(&first)
        .expect("fetch succeeds")
        .expect("record present");
    assert!(stored.assessment.is_none());
}

#[test]
fn estimate_before_submission_reports_no_profile() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");

    match service.estimate(&session) {
        Err(BorrowingServiceError::NoProfile(id)) => assert_eq!(id, session),
        other => panic!("expected missing profile, got {other:?}"),
    }
    assert!(matches!(
        service.schemes(&session, None),
        Err(BorrowingServiceError::NoProfile(_))
    ));
    assert!(matches!(
        service.budget(&session, DepositInput::Percentage(20.0)),
        Err(BorrowingServiceError::NoProfile(_))
    ));
}

#[test]
fn unknown_session_is_not_found() {
    let (service, _) = build_service();
    let missing = SessionId("sess-missing".to_string());

    assert!(matches!(
        service.estimate(&missing),
        Err(BorrowingServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.submit(&missing, submission()),
        Err(BorrowingServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.close(&missing),
        Err(BorrowingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn submit_stores_profile_and_result_together() {
    let (service, repository) = build_service();
    let session = service.open_session().expect("opens");

    let assessment = service.submit(&session, submission()).expect("valid profile");
    assert_eq!(assessment.profile.household_type, HouseholdType::Individual);
    assert!(assessment.result.borrowing_power > 0.0);

    let stored = repository
        .fetch(&session)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.assessment, Some(assessment.clone()));
    assert_eq!(
        service.estimate(&session).expect("estimate available"),
        assessment.result
    );
}

#[test]
fn resubmission_replaces_rather_than_merges() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");

    let first = service.submit(&session, submission()).expect("valid");
    let second = service
        .submit(&session, couple_investor_submission())
        .expect("valid");

    assert_ne!(first.result, second.result);
    let current = service.estimate(&session).expect("estimate available");
    assert_eq!(current, second.result);
    assert_eq!(current.loan_purpose, LoanPurpose::Investor);
    assert!(current.income.rental > 0.0);
}

#[test]
fn same_profile_twice_yields_identical_results() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");

    let first = service.submit(&session, submission()).expect("valid");
    let second = service.submit(&session, submission()).expect("valid");
    assert_eq!(first.result, second.result);
}

#[test]
fn sessions_do_not_share_state() {
    let (service, _) = build_service();
    let alice = service.open_session().expect("opens");
    let bob = service.open_session().expect("opens");

    service.submit(&alice, submission()).expect("valid");
    service
        .submit(&bob, couple_investor_submission())
        .expect("valid");

    let alice_result = service.estimate(&alice).expect("alice estimate");
    let bob_result = service.estimate(&bob).expect("bob estimate");
    assert_eq!(alice_result.loan_purpose, LoanPurpose::OwnerOccupied);
    assert_eq!(bob_result.loan_purpose, LoanPurpose::Investor);
    assert_eq!(
        alice_result,
        service.assess(submission()).expect("stateless estimate")
    );
}

#[test]
fn invalid_submission_leaves_previous_result_untouched() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");
    let accepted = service.submit(&session, submission()).expect("valid");

    match service.submit(&session, negative_income_submission()) {
        Err(BorrowingServiceError::Validation(ProfileViolation::NegativeAmount {
            field, ..
        })) => assert_eq!(field, "gross_income"),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(
        service.estimate(&session).expect("still available"),
        accepted.result
    );
}

#[test]
fn schemes_default_to_profile_jurisdiction() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");
    service.submit(&session, submission()).expect("valid");

    let nsw = service.schemes(&session, None).expect("nsw schemes");
    assert_eq!(nsw.len(), 3);
    assert!(nsw[0].is_eligible());

    let tas = service
        .schemes(&session, Some(Jurisdiction::Tas))
        .expect("tas schemes");
    assert_eq!(tas.len(), 1);
    assert_eq!(tas[0].name, "First Home Guarantee");
}

#[test]
fn budget_uses_session_borrowing_power() {
    let (service, _) = build_service();
    let session = service.open_session().expect("opens");
    let assessment = service.submit(&session, submission()).expect("valid");

    let budget = service
        .budget(&session, DepositInput::Percentage(20.0))
        .expect("valid deposit");
    let power = assessment.result.borrowing_power;
    assert_eq!(budget.total_budget, (power / 0.8).round());

    assert!(matches!(
        service.budget(&session, DepositInput::Amount(1.0)),
        Err(BorrowingServiceError::InvalidDeposit(
            BudgetError::AmountBelowMinimum { .. }
        ))
    ));
}

#[test]
fn close_discards_the_session() {
    let (service, repository) = build_service();
    let session = service.open_session().expect("opens");
    service.submit(&session, submission()).expect("valid");

    service.close(&session).expect("closes");
    assert_eq!(repository.len(), 0);
    assert!(matches!(
        service.estimate(&session),
        Err(BorrowingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn unavailable_store_propagates() {
    let service = BorrowingService::new(Arc::new(UnavailableRepository), tables());

    assert!(matches!(
        service.open_session(),
        Err(BorrowingServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
    // the stateless path never touches the store
    assert!(service.assess(submission()).is_ok());
}
