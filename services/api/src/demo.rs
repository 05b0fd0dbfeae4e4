use crate::infra::{load_tables, parse_jurisdiction, InMemorySessionRepository};
use chrono::{DateTime, Local, Utc};
use clap::Args;
use loan_ai::borrowing::{
    CalculationResult, DepositInput, Jurisdiction, ProfileImporter, ProfileSubmission,
    PurchaseBudget,
};
use loan_ai::config::{AppConfig, RatesConfig};
use loan_ai::error::AppError;
use loan_ai::schemes::SchemeEligibility;
use loan_ai::sessions::BorrowingService;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// JSON file holding a single profile submission
    #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
    pub(crate) profile: Option<PathBuf>,
    /// CSV batch of profile submissions (headers are the submission field names)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// List schemes for this jurisdiction instead of the profile's own
    #[arg(long, value_parser = parse_jurisdiction)]
    pub(crate) jurisdiction: Option<Jurisdiction>,
    /// Deposit as a percentage of the purchase price, used for the budget line
    #[arg(long)]
    pub(crate) deposit_pct: Option<f64>,
    /// JSON rate-table document to use instead of the compiled-in tables
    #[arg(long)]
    pub(crate) rate_tables: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Deposit as a percentage of the purchase price (defaults to 20)
    #[arg(long)]
    pub(crate) deposit_pct: Option<f64>,
    /// List schemes for this jurisdiction instead of the sample household's own
    #[arg(long, value_parser = parse_jurisdiction)]
    pub(crate) jurisdiction: Option<Jurisdiction>,
    /// JSON rate-table document to use instead of the compiled-in tables
    #[arg(long)]
    pub(crate) rate_tables: Option<PathBuf>,
}

type CliService = BorrowingService<InMemorySessionRepository>;

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        profile,
        csv,
        jurisdiction,
        deposit_pct,
        rate_tables,
    } = args;

    let service = cli_service(rate_tables)?;
    match (profile, csv) {
        (Some(path), _) => {
            let submission = ProfileImporter::from_json_path(path)?;
            assess_household(&service, submission, jurisdiction, deposit_pct)
        }
        (None, Some(path)) => {
            let submissions = ProfileImporter::from_path(path)?;
            let total = submissions.len();
            let failed = assess_batch(&service, submissions, jurisdiction, deposit_pct);
            if failed > 0 {
                println!("\n{failed} of {total} households could not be assessed");
            }
            Ok(())
        }
        (None, None) => Ok(()),
    }
}

/// Assesses every household in turn; a failing row is reported and skipped.
/// Returns the number of rows that failed.
fn assess_batch(
    service: &CliService,
    submissions: Vec<ProfileSubmission>,
    jurisdiction: Option<Jurisdiction>,
    deposit_pct: Option<f64>,
) -> usize {
    let total = submissions.len();
    let mut failed = 0;
    for (index, submission) in submissions.into_iter().enumerate() {
        println!("\nHousehold {} of {}", index + 1, total);
        if let Err(err) = assess_household(service, submission, jurisdiction, deposit_pct) {
            eprintln!("  household {} skipped: {err}", index + 1);
            failed += 1;
        }
    }
    failed
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        deposit_pct,
        jurisdiction,
        rate_tables,
    } = args;

    println!("Borrowing power demo");
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!("Sample household: couple, two salaries, one dependent, first home in NSW");

    let service = cli_service(rate_tables)?;
    assess_household(
        &service,
        sample_submission(),
        jurisdiction,
        Some(deposit_pct.unwrap_or(20.0)),
    )
}

fn cli_service(rate_tables: Option<PathBuf>) -> Result<CliService, AppError> {
    let rates = match rate_tables {
        Some(path) => RatesConfig {
            tables_path: Some(path),
        },
        None => AppConfig::load()?.rates,
    };
    let tables = load_tables(&rates)?;
    Ok(BorrowingService::new(
        Arc::new(InMemorySessionRepository::default()),
        tables,
    ))
}

fn assess_household(
    service: &CliService,
    submission: ProfileSubmission,
    jurisdiction: Option<Jurisdiction>,
    deposit_pct: Option<f64>,
) -> Result<(), AppError> {
    let session = service.open_session()?;
    let assessment = service.submit(&session, submission)?;
    render_estimate(&assessment.result, assessment.submitted_at);

    let schemes = service.schemes(&session, jurisdiction)?;
    let jurisdiction = jurisdiction.unwrap_or(assessment.profile.jurisdiction);
    render_schemes(jurisdiction, &schemes);

    if let Some(pct) = deposit_pct {
        let budget = service.budget(&session, DepositInput::Percentage(pct))?;
        render_budget(pct, &budget);
    }

    service.close(&session)?;
    Ok(())
}

fn sample_submission() -> ProfileSubmission {
    ProfileSubmission {
        gross_income: 7_500.0,
        income_frequency: "monthly".to_string(),
        other_income: 0.0,
        other_income_frequency: "yearly".to_string(),
        second_person_income: 1_150.0,
        second_person_income_frequency: "weekly".to_string(),
        second_person_other_income: 2_400.0,
        second_person_other_income_frequency: "yearly".to_string(),
        rental_income: 0.0,
        living_expenses: 3_800.0,
        rent_board: 0.0,
        dependents: 1,
        credit_card_limits: 8_000.0,
        loan_repayment: 350.0,
        has_hecs: true,
        age: 34,
        employment_type: "Full-time".to_string(),
        loan_purpose: "Owner-occupied".to_string(),
        loan_term: 30,
        interest_rate: 6.1,
        household_type: "Couple".to_string(),
        first_time_buyer: true,
        jurisdiction: "NSW".to_string(),
    }
}

fn render_estimate(result: &CalculationResult, submitted_at: DateTime<Utc>) {
    println!("\nBorrowing estimate (assessed {})", submitted_at.format("%Y-%m-%d %H:%M UTC"));
    for line in result.summary().lines() {
        println!("  {line}");
    }
}

fn render_schemes(jurisdiction: Jurisdiction, schemes: &[SchemeEligibility]) {
    println!("\nHome-buyer schemes in {jurisdiction}");
    if schemes.is_empty() {
        println!("  None registered");
        return;
    }

    for scheme in schemes {
        let verdict = if scheme.is_eligible() {
            "eligible"
        } else {
            "not eligible"
        };
        println!("  - {} ({verdict})", scheme.name);
        println!("    {}", scheme.offer);
        for check in &scheme.requirements {
            let mark = if check.satisfied { "x" } else { " " };
            println!("    [{mark}] {}", check.label);
        }
    }
}

fn render_budget(deposit_pct: f64, budget: &PurchaseBudget) {
    println!("\nPurchase budget with a {deposit_pct}% deposit");
    println!("  Total budget: {:>12.0}", budget.total_budget);
    println!("  Deposit:      {:>12.0}", budget.deposit_amount);
    println!("  Loan amount:  {:>12.0}", budget.loan_amount);
}
