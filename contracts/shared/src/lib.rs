#![no_std]
//! # Shared Vehicle Insurance Library
//!
//! Reusable types, errors, constants, and validation helpers for the
//! vehicle insurance Soroban contracts.
//!
//! ## Modules
//!
//! - `errors` - Common error type used across contracts
//! - `types` - Vehicle, policy and claim types that cross contract boundaries
//! - `constants` - Bounds for coverage, duration and vehicle data
//! - `validation` - Reusable validation helper functions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::errors::ContractError;
//! use shared::types::{VehicleTier, VehicleProfile};
//! use shared::validation::validate_profile;
//! use shared::constants::MIN_COVERAGE_AMOUNT;
//! ```

pub mod constants;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use errors::ContractError;
pub use types::{
    ClaimStatus, PolicyState, PolicyTokenMetadata, RiskAssessment, TierCoefficients,
    VehicleProfile, VehicleTier, VerificationStatus,
};
pub use validation::{
    current_year, safe_add, safe_div, safe_mul, safe_sub, validate_coverage_amount,
    validate_duration_days, validate_positive_amount, validate_profile, validate_string_length,
    vehicle_age,
};
