//! Common constants used across the vehicle insurance contracts
//!
//! Amounts are `i128` stroops (7 decimal places), matching Stellar asset
//! precision.

// ===== Decimals Constants =====

/// Stroops per unit (10^7)
pub const STROOPS_PER_UNIT: i128 = 10_000_000;

// ===== Policy Bounds =====

/// Minimum coverage amount (0.1 units)
pub const MIN_COVERAGE_AMOUNT: i128 = STROOPS_PER_UNIT / 10;

/// Maximum coverage amount (10 units)
pub const MAX_COVERAGE_AMOUNT: i128 = 10 * STROOPS_PER_UNIT;

/// Premium floor (0.01 units)
pub const MIN_PREMIUM_AMOUNT: i128 = STROOPS_PER_UNIT / 100;

/// Minimum policy duration in days
pub const MIN_POLICY_DURATION_DAYS: u32 = 30;

/// Maximum policy duration in days
pub const MAX_POLICY_DURATION_DAYS: u32 = 365;

// ===== Vehicle Bounds =====

pub const MIN_VEHICLE_CONDITION: u32 = 1;

pub const MAX_VEHICLE_CONDITION: u32 = 10;

/// Oldest model year accepted at registration
pub const MIN_VEHICLE_YEAR: u32 = 1900;

// ===== Ledger TTL =====
// At ~5s per ledger a day is 17,280 ledgers. Persistent records are kept
// alive for the longest policy term from their last touch; contract
// instances are bumped whenever their config is read or written.

pub const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = MAX_POLICY_DURATION_DAYS * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

// ===== Time Constants (in seconds) =====

/// One day in seconds (86400)
pub const ONE_DAY_SECONDS: u64 = 86_400;

/// One year in seconds (approximately 365.25 days)
pub const ONE_YEAR_SECONDS: u64 = 31_557_600;

/// Unix epoch year
pub const EPOCH_YEAR: u32 = 1970;

/// Days used to pro-rate an annual premium
pub const DAYS_PER_YEAR: u32 = 365;

// ===== Risk Scoring Constants =====

/// Age at which the age component saturates
pub const RISK_AGE_CAP_YEARS: u32 = 20;

/// Mileage at which the mileage component saturates
pub const RISK_MILEAGE_CAP_KM: u64 = 200_000;

/// Odometer step used by the mileage multiplier
pub const MILEAGE_STEP_KM: u64 = 10_000;

/// Component weights; they sum to 100
pub const RISK_WEIGHT_AGE: u32 = 30;
pub const RISK_WEIGHT_MILEAGE: u32 = 25;
pub const RISK_WEIGHT_CONDITION: u32 = 25;
pub const RISK_WEIGHT_ACCIDENT: u32 = 20;

/// Maximum risk score
pub const MAX_RISK_SCORE: u32 = 100;

// ===== Basis Points =====

/// Maximum basis points (10000 = 100%)
pub const MAX_BASIS_POINTS: u32 = 10_000;

// ===== String Length Constants =====

/// Maximum length of a registration plate
pub const MAX_REG_PLATE_LENGTH: u32 = 16;

/// Maximum length of a vehicle make or model
pub const MAX_MAKE_MODEL_LENGTH: u32 = 64;

/// Maximum length for claim description
pub const MAX_DESCRIPTION_LENGTH: u32 = 2048;

// ===== Validation Helper Functions =====

/// Validate that an amount is within acceptable bounds
pub fn is_amount_valid(amount: i128, min: i128, max: i128) -> bool {
    amount >= min && amount <= max
}

/// Validate coverage amount against the global bounds
pub fn is_coverage_amount_valid(amount: i128) -> bool {
    is_amount_valid(amount, MIN_COVERAGE_AMOUNT, MAX_COVERAGE_AMOUNT)
}

/// Validate policy duration
pub fn is_duration_valid(duration_days: u32) -> bool {
    (MIN_POLICY_DURATION_DAYS..=MAX_POLICY_DURATION_DAYS).contains(&duration_days)
}

/// Validate basis points (0-10000)
pub fn is_basis_points_valid(bps: u32) -> bool {
    bps <= MAX_BASIS_POINTS
}

/// Calculate basis points of an amount
pub fn calculate_basis_points(amount: i128, bps: u32) -> Option<i128> {
    amount
        .checked_mul(i128::from(bps))
        .map(|v| v / i128::from(MAX_BASIS_POINTS))
}
