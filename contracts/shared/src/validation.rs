//! Validation helper utilities for the vehicle insurance contracts
//!
//! Reusable checks shared by the core, risk assessment and token contracts
//! so that the same input is rejected with the same error everywhere.

use crate::constants::*;
use crate::errors::ContractError;
use crate::types::VehicleProfile;
use soroban_sdk::String;

// ===== Amount Validation =====

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate coverage against the global bounds and a tier ceiling
pub fn validate_coverage_amount(amount: i128, tier_max: i128) -> Result<(), ContractError> {
    if !is_coverage_amount_valid(amount) || amount > tier_max {
        return Err(ContractError::InvalidCoverageAmount);
    }
    Ok(())
}

/// Validate that sufficient funds are available
pub fn validate_sufficient_funds(balance: i128, required: i128) -> Result<(), ContractError> {
    if balance < required {
        return Err(ContractError::InsufficientFunds);
    }
    Ok(())
}

/// Validate that a value is within basis points range (0-10000)
pub fn validate_bps(bps: u32) -> Result<(), ContractError> {
    if !is_basis_points_valid(bps) {
        return Err(ContractError::InvalidRiskConfig);
    }
    Ok(())
}

// ===== Time Validation =====

/// Validate that duration is within bounds
pub fn validate_duration_days(duration_days: u32) -> Result<(), ContractError> {
    if !is_duration_valid(duration_days) {
        return Err(ContractError::InvalidDuration);
    }
    Ok(())
}

/// Calendar year of a ledger timestamp, using 365.25-day years.
/// Saturates at `u32::MAX` for timestamps beyond that year.
pub fn current_year(timestamp: u64) -> u32 {
    let elapsed = u32::try_from(timestamp / ONE_YEAR_SECONDS).unwrap_or(u32::MAX);
    EPOCH_YEAR.saturating_add(elapsed)
}

/// Age of a vehicle in whole years; a model year ahead of the clock is age 0
pub fn vehicle_age(year: u32, current_year: u32) -> u32 {
    current_year.saturating_sub(year)
}

// ===== Vehicle Validation =====

/// Validate condition rating (1-10)
pub fn validate_condition(condition: u32) -> Result<(), ContractError> {
    if !(MIN_VEHICLE_CONDITION..=MAX_VEHICLE_CONDITION).contains(&condition) {
        return Err(ContractError::InvalidCondition);
    }
    Ok(())
}

/// Validate model year against the ledger clock
pub fn validate_vehicle_year(year: u32, current_year: u32) -> Result<(), ContractError> {
    if year < MIN_VEHICLE_YEAR || year > current_year {
        return Err(ContractError::InvalidVehicleYear);
    }
    Ok(())
}

/// Validate every field of a risk profile
pub fn validate_profile(profile: &VehicleProfile, current_year: u32) -> Result<(), ContractError> {
    validate_positive_amount(profile.base_value)?;
    validate_condition(profile.condition)?;
    validate_vehicle_year(profile.year, current_year)
}

// ===== String Validation =====

/// Validate that a string is non-empty and at most `max_len` bytes
pub fn validate_string_length(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidLength);
    }
    Ok(())
}

// ===== Arithmetic Validation =====

/// Safely add two amounts, returning error on overflow
pub fn safe_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

/// Safely subtract two amounts, returning error on underflow
pub fn safe_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Overflow)
}

/// Safely multiply two amounts, returning error on overflow
pub fn safe_mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// Safely divide two amounts, returning error on division by zero
pub fn safe_div(a: i128, b: i128) -> Result<i128, ContractError> {
    if b == 0 {
        return Err(ContractError::DivisionByZero);
    }
    a.checked_div(b).ok_or(ContractError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    fn profile(year: u32, condition: u32, base_value: i128) -> VehicleProfile {
        VehicleProfile {
            year,
            base_value,
            mileage: 0,
            condition,
            has_accident_history: false,
        }
    }

    #[test]
    fn test_current_year() {
        assert_eq!(current_year(0), 1970);
        assert_eq!(current_year(1_780_000_000), 2026);
    }

    #[test]
    fn test_current_year_saturates_on_far_future_timestamps() {
        assert_eq!(current_year(u64::MAX), u32::MAX);

        let last_exact = u64::from(u32::MAX - EPOCH_YEAR) * ONE_YEAR_SECONDS;
        assert_eq!(current_year(last_exact), u32::MAX);
        assert_eq!(current_year(last_exact + ONE_YEAR_SECONDS), u32::MAX);
    }

    #[test]
    fn test_vehicle_age_saturates() {
        assert_eq!(vehicle_age(2020, 2026), 6);
        assert_eq!(vehicle_age(2027, 2026), 0);
    }

    #[test]
    fn test_validate_profile() {
        assert_eq!(validate_profile(&profile(2020, 7, 1), 2026), Ok(()));
        assert_eq!(
            validate_profile(&profile(2020, 0, 1), 2026),
            Err(ContractError::InvalidCondition)
        );
        assert_eq!(
            validate_profile(&profile(2020, 11, 1), 2026),
            Err(ContractError::InvalidCondition)
        );
        assert_eq!(
            validate_profile(&profile(1899, 5, 1), 2026),
            Err(ContractError::InvalidVehicleYear)
        );
        assert_eq!(
            validate_profile(&profile(2027, 5, 1), 2026),
            Err(ContractError::InvalidVehicleYear)
        );
        assert_eq!(
            validate_profile(&profile(2020, 5, 0), 2026),
            Err(ContractError::InvalidInput)
        );
    }

    #[test]
    fn test_validate_coverage_amount_respects_tier_ceiling() {
        assert_eq!(validate_coverage_amount(MIN_COVERAGE_AMOUNT, 20_000_000), Ok(()));
        assert_eq!(
            validate_coverage_amount(20_000_001, 20_000_000),
            Err(ContractError::InvalidCoverageAmount)
        );
        assert_eq!(
            validate_coverage_amount(MIN_COVERAGE_AMOUNT - 1, MAX_COVERAGE_AMOUNT),
            Err(ContractError::InvalidCoverageAmount)
        );
    }

    #[test]
    fn test_validate_string_length() {
        let env = Env::default();
        assert_eq!(
            validate_string_length(&String::from_str(&env, "AB12 CDE"), MAX_REG_PLATE_LENGTH),
            Ok(())
        );
        assert_eq!(
            validate_string_length(&String::from_str(&env, ""), MAX_REG_PLATE_LENGTH),
            Err(ContractError::InvalidLength)
        );
        assert_eq!(
            validate_string_length(
                &String::from_str(&env, "THIS-PLATE-IS-WAY-TOO-LONG"),
                MAX_REG_PLATE_LENGTH
            ),
            Err(ContractError::InvalidLength)
        );
    }

    #[test]
    fn test_safe_math() {
        assert_eq!(safe_add(i128::MAX, 1), Err(ContractError::Overflow));
        assert_eq!(safe_sub(5, 3), Ok(2));
        assert_eq!(safe_mul(i128::MAX, 2), Err(ContractError::Overflow));
        assert_eq!(safe_div(10, 0), Err(ContractError::DivisionByZero));
    }
}
