//! Borrowing power estimation and government home-buyer scheme eligibility.
//!
//! The crate is organised leaf-first: [`rates`] holds the static lookup data, [`borrowing`]
//! turns a declared financial profile into a [`borrowing::CalculationResult`], [`schemes`]
//! matches a profile against a jurisdiction's scheme registry, and [`sessions`] scopes one
//! profile and its derived result per caller behind an HTTP router.

pub mod borrowing;
pub mod config;
pub mod error;
pub mod rates;
pub mod schemes;
pub mod sessions;
pub mod telemetry;
