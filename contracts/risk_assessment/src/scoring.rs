//! Risk scoring and premium arithmetic.
//!
//! Pure functions over a [`VehicleProfile`]; the contract layer only adds
//! storage lookups and the ledger clock.

use shared::constants::*;
use shared::{
    safe_div, safe_mul, vehicle_age, ContractError, TierCoefficients, VehicleProfile, VehicleTier,
};

use crate::RiskConfig;

/// Weighted risk score in 0..=100.
///
/// Each component is normalised to 0..=100 before weighting:
/// age saturates at 20 years, mileage at 200,000 km, condition maps
/// 10 to 0 and 1 to 100, and an accident history is all-or-nothing.
pub fn risk_score(profile: &VehicleProfile, current_year: u32) -> u32 {
    let age = vehicle_age(profile.year, current_year).min(RISK_AGE_CAP_YEARS);
    let age_score = age * MAX_RISK_SCORE / RISK_AGE_CAP_YEARS;

    let mileage = profile.mileage.min(RISK_MILEAGE_CAP_KM);
    // bounded by MAX_RISK_SCORE after the division
    let mileage_score = (mileage * u64::from(MAX_RISK_SCORE) / RISK_MILEAGE_CAP_KM) as u32;

    let condition_gap = MAX_VEHICLE_CONDITION.saturating_sub(profile.condition);
    let condition_score =
        condition_gap * MAX_RISK_SCORE / (MAX_VEHICLE_CONDITION - MIN_VEHICLE_CONDITION);

    let accident_score = if profile.has_accident_history {
        MAX_RISK_SCORE
    } else {
        0
    };

    let weighted = age_score * RISK_WEIGHT_AGE
        + mileage_score * RISK_WEIGHT_MILEAGE
        + condition_score * RISK_WEIGHT_CONDITION
        + accident_score * RISK_WEIGHT_ACCIDENT;

    (weighted / MAX_RISK_SCORE).min(MAX_RISK_SCORE)
}

/// Map a risk score onto a tier; low scores earn the Premium tier.
pub fn tier_for_score(score: u32, config: &RiskConfig) -> VehicleTier {
    if score <= config.premium_tier_max_score {
        VehicleTier::Premium
    } else if score <= config.medium_tier_max_score {
        VehicleTier::Medium
    } else {
        VehicleTier::Basic
    }
}

/// Risk adjustment in basis points; 10,000 means no adjustment.
pub fn risk_adjustment_bps(
    profile: &VehicleProfile,
    coefficients: &TierCoefficients,
    current_year: u32,
) -> Result<i128, ContractError> {
    let age = i128::from(vehicle_age(profile.year, current_year));
    let mileage_steps = i128::from(profile.mileage / MILEAGE_STEP_KM);
    let condition_gap = i128::from(MAX_VEHICLE_CONDITION.saturating_sub(profile.condition));

    let mut adjustment = i128::from(MAX_BASIS_POINTS);
    adjustment += safe_mul(age, i128::from(coefficients.age_multiplier_bps))?;
    adjustment += safe_mul(mileage_steps, i128::from(coefficients.mileage_multiplier_bps))?;
    adjustment += safe_mul(condition_gap, i128::from(coefficients.condition_multiplier_bps))?;
    if profile.has_accident_history {
        adjustment += i128::from(coefficients.accident_penalty_bps);
    }
    Ok(adjustment)
}

/// Premium for `duration_days` of cover:
/// `base rate x tier multiplier x risk adjustment`, pro-rated from a
/// 365-day year and floored at [`MIN_PREMIUM_AMOUNT`].
pub fn premium(
    profile: &VehicleProfile,
    coefficients: &TierCoefficients,
    base_rate_bps: u32,
    duration_days: u32,
    current_year: u32,
) -> Result<i128, ContractError> {
    let bps = i128::from(MAX_BASIS_POINTS);

    let annual_base =
        calculate_basis_points(profile.base_value, base_rate_bps).ok_or(ContractError::Overflow)?;
    let tiered = safe_div(
        safe_mul(annual_base, i128::from(coefficients.tier_multiplier_bps))?,
        bps,
    )?;
    let adjustment = risk_adjustment_bps(profile, coefficients, current_year)?;
    let annual = safe_div(safe_mul(tiered, adjustment)?, bps)?;

    let prorated = safe_div(
        safe_mul(annual, i128::from(duration_days))?,
        i128::from(DAYS_PER_YEAR),
    )?;

    Ok(prorated.max(MIN_PREMIUM_AMOUNT))
}

/// Default coefficient table for a tier.
///
/// Riskier tiers carry larger multipliers in every column, so a vehicle
/// that slips into a worse tier never gets a cheaper quote.
pub fn default_coefficients(tier: VehicleTier) -> TierCoefficients {
    match tier {
        VehicleTier::Premium => TierCoefficients {
            tier_multiplier_bps: 10_000,
            age_multiplier_bps: 100,
            mileage_multiplier_bps: 50,
            condition_multiplier_bps: 200,
            accident_penalty_bps: 2_500,
            max_coverage: MAX_COVERAGE_AMOUNT,
        },
        VehicleTier::Medium => TierCoefficients {
            tier_multiplier_bps: 12_500,
            age_multiplier_bps: 150,
            mileage_multiplier_bps: 75,
            condition_multiplier_bps: 250,
            accident_penalty_bps: 3_000,
            max_coverage: 5 * STROOPS_PER_UNIT,
        },
        VehicleTier::Basic => TierCoefficients {
            tier_multiplier_bps: 15_000,
            age_multiplier_bps: 200,
            mileage_multiplier_bps: 100,
            condition_multiplier_bps: 300,
            accident_penalty_bps: 4_000,
            max_coverage: 2 * STROOPS_PER_UNIT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: u32 = 2026;

    fn family_car() -> VehicleProfile {
        VehicleProfile {
            year: 2020,
            base_value: 20 * STROOPS_PER_UNIT,
            mileage: 60_000,
            condition: 7,
            has_accident_history: false,
        }
    }

    fn config() -> RiskConfig {
        RiskConfig {
            base_rate_bps: 500,
            premium_tier_max_score: 33,
            medium_tier_max_score: 66,
        }
    }

    #[test]
    fn test_score_of_new_pristine_vehicle_is_zero() {
        let profile = VehicleProfile {
            year: YEAR,
            base_value: STROOPS_PER_UNIT,
            mileage: 0,
            condition: 10,
            has_accident_history: false,
        };
        assert_eq!(risk_score(&profile, YEAR), 0);
    }

    #[test]
    fn test_score_of_worst_vehicle_is_hundred() {
        let profile = VehicleProfile {
            year: 1950,
            base_value: STROOPS_PER_UNIT,
            mileage: 900_000,
            condition: 1,
            has_accident_history: true,
        };
        assert_eq!(risk_score(&profile, YEAR), 100);
    }

    #[test]
    fn test_weighted_score() {
        // age 6 -> 30, mileage 60k -> 30, condition 7 -> 33, no accident
        // (30*30 + 30*25 + 33*25) / 100 = 24
        assert_eq!(risk_score(&family_car(), YEAR), 24);

        let mut crashed = family_car();
        crashed.has_accident_history = true;
        assert_eq!(risk_score(&crashed, YEAR), 44);
    }

    #[test]
    fn test_tier_thresholds() {
        let config = config();
        assert_eq!(tier_for_score(0, &config), VehicleTier::Premium);
        assert_eq!(tier_for_score(33, &config), VehicleTier::Premium);
        assert_eq!(tier_for_score(34, &config), VehicleTier::Medium);
        assert_eq!(tier_for_score(66, &config), VehicleTier::Medium);
        assert_eq!(tier_for_score(67, &config), VehicleTier::Basic);
    }

    #[test]
    fn test_risk_adjustment() {
        // 10_000 + 6*100 + 6*50 + 3*200
        let adjustment = risk_adjustment_bps(
            &family_car(),
            &default_coefficients(VehicleTier::Premium),
            YEAR,
        )
        .unwrap();
        assert_eq!(adjustment, 11_500);
    }

    #[test]
    fn test_annual_premium() {
        // base 1 unit/yr, x1.0 tier, x1.15 risk
        let premium = premium(
            &family_car(),
            &default_coefficients(VehicleTier::Premium),
            500,
            365,
            YEAR,
        )
        .unwrap();
        assert_eq!(premium, 11_500_000);
    }

    #[test]
    fn test_premium_is_prorated() {
        let premium = premium(
            &family_car(),
            &default_coefficients(VehicleTier::Premium),
            500,
            30,
            YEAR,
        )
        .unwrap();
        assert_eq!(premium, 11_500_000 * 30 / 365);
    }

    #[test]
    fn test_riskier_tiers_never_carry_smaller_coefficients() {
        let tiers = [VehicleTier::Premium, VehicleTier::Medium, VehicleTier::Basic];
        for pair in tiers.windows(2) {
            let safer = default_coefficients(pair[0]);
            let riskier = default_coefficients(pair[1]);
            assert!(riskier.tier_multiplier_bps >= safer.tier_multiplier_bps);
            assert!(riskier.age_multiplier_bps >= safer.age_multiplier_bps);
            assert!(riskier.mileage_multiplier_bps >= safer.mileage_multiplier_bps);
            assert!(riskier.condition_multiplier_bps >= safer.condition_multiplier_bps);
            assert!(riskier.accident_penalty_bps >= safer.accident_penalty_bps);
            assert!(riskier.max_coverage <= safer.max_coverage);
        }
    }

    #[test]
    fn test_premium_floor() {
        let mut cheap = family_car();
        cheap.base_value = 1_000;
        let premium = premium(&cheap, &default_coefficients(VehicleTier::Basic), 500, 30, YEAR)
            .unwrap();
        assert_eq!(premium, MIN_PREMIUM_AMOUNT);
    }

    #[test]
    fn test_premium_overflow_is_reported() {
        let mut absurd = family_car();
        absurd.base_value = i128::MAX;
        assert_eq!(
            premium(&absurd, &default_coefficients(VehicleTier::Basic), 500, 30, YEAR),
            Err(ContractError::Overflow)
        );
    }
}
