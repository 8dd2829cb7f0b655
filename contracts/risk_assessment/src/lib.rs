#![no_std]
//! Risk assessment contract.
//!
//! Scores vehicles, assigns tiers and prices policies. Only the owner's
//! coefficient adjustments change pricing state, so the insurance core can
//! call it freely while quoting.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

use shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_BASIS_POINTS, MAX_COVERAGE_AMOUNT,
    MAX_RISK_SCORE, MIN_COVERAGE_AMOUNT,
};
use shared::validation::validate_bps;
use shared::{
    current_year, validate_duration_days, validate_profile, ContractError, RiskAssessment,
    TierCoefficients, VehicleProfile, VehicleTier,
};
use vehicle_insurance::authorization::{get_admin, initialize_admin, require_admin};

mod scoring;

#[contract]
pub struct RiskAssessmentContract;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Coefficients(VehicleTier),
}

/// Global pricing parameters
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RiskConfig {
    /// Annual premium as a share of base value, before multipliers
    pub base_rate_bps: u32,
    /// Highest score still rated Premium
    pub premium_tier_max_score: u32,
    /// Highest score still rated Medium
    pub medium_tier_max_score: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            base_rate_bps: 500,
            premium_tier_max_score: 33,
            medium_tier_max_score: 66,
        }
    }
}

const TIERS: [VehicleTier; 3] = [VehicleTier::Basic, VehicleTier::Medium, VehicleTier::Premium];

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn load_config(env: &Env) -> Result<RiskConfig, ContractError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)?;
    extend_instance(env);
    Ok(config)
}

fn load_coefficients(env: &Env, tier: VehicleTier) -> Result<TierCoefficients, ContractError> {
    let coefficients = env
        .storage()
        .instance()
        .get(&DataKey::Coefficients(tier))
        .ok_or(ContractError::NotInitialized)?;
    extend_instance(env);
    Ok(coefficients)
}

fn ledger_year(env: &Env) -> u32 {
    current_year(env.ledger().timestamp())
}

fn validate_config(config: &RiskConfig) -> Result<(), ContractError> {
    if config.base_rate_bps == 0 || config.base_rate_bps > MAX_BASIS_POINTS {
        return Err(ContractError::InvalidRiskConfig);
    }
    if config.premium_tier_max_score >= config.medium_tier_max_score
        || config.medium_tier_max_score > MAX_RISK_SCORE
    {
        return Err(ContractError::InvalidRiskConfig);
    }
    Ok(())
}

fn validate_coefficients(coefficients: &TierCoefficients) -> Result<(), ContractError> {
    if coefficients.tier_multiplier_bps == 0 {
        return Err(ContractError::InvalidRiskConfig);
    }
    validate_bps(coefficients.age_multiplier_bps)?;
    validate_bps(coefficients.mileage_multiplier_bps)?;
    validate_bps(coefficients.condition_multiplier_bps)?;
    validate_bps(coefficients.accident_penalty_bps)?;
    if coefficients.max_coverage < MIN_COVERAGE_AMOUNT
        || coefficients.max_coverage > MAX_COVERAGE_AMOUNT
    {
        return Err(ContractError::InvalidRiskConfig);
    }
    Ok(())
}

#[contractimpl]
impl RiskAssessmentContract {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if get_admin(&env).is_some() {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        initialize_admin(&env, admin.clone());

        env.storage()
            .instance()
            .set(&DataKey::Config, &RiskConfig::default());
        for tier in TIERS {
            env.storage().instance().set(
                &DataKey::Coefficients(tier),
                &scoring::default_coefficients(tier),
            );
        }
        extend_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "initialized"), ()), admin);

        Ok(())
    }

    /// Weighted risk score (0-100) for a vehicle profile
    pub fn calculate_risk_score(env: Env, profile: VehicleProfile) -> Result<u32, ContractError> {
        let year = ledger_year(&env);
        validate_profile(&profile, year)?;
        Ok(scoring::risk_score(&profile, year))
    }

    pub fn determine_tier(env: Env, risk_score: u32) -> Result<VehicleTier, ContractError> {
        if risk_score > MAX_RISK_SCORE {
            return Err(ContractError::InvalidInput);
        }
        let config = load_config(&env)?;
        Ok(scoring::tier_for_score(risk_score, &config))
    }

    /// Score and tier in one call
    pub fn assess(env: Env, profile: VehicleProfile) -> Result<RiskAssessment, ContractError> {
        let config = load_config(&env)?;
        let year = ledger_year(&env);
        validate_profile(&profile, year)?;

        let risk_score = scoring::risk_score(&profile, year);
        Ok(RiskAssessment {
            risk_score,
            tier: scoring::tier_for_score(risk_score, &config),
        })
    }

    /// Premium in stroops for `duration_days` of cover in `tier`
    pub fn calculate_premium(
        env: Env,
        profile: VehicleProfile,
        tier: VehicleTier,
        duration_days: u32,
    ) -> Result<i128, ContractError> {
        validate_duration_days(duration_days)?;
        let year = ledger_year(&env);
        validate_profile(&profile, year)?;

        let config = load_config(&env)?;
        let coefficients = load_coefficients(&env, tier)?;

        scoring::premium(
            &profile,
            &coefficients,
            config.base_rate_bps,
            duration_days,
            year,
        )
    }

    pub fn max_coverage(env: Env, tier: VehicleTier) -> Result<i128, ContractError> {
        Ok(load_coefficients(&env, tier)?.max_coverage)
    }

    pub fn get_config(env: Env) -> Result<RiskConfig, ContractError> {
        load_config(&env)
    }

    pub fn get_tier_coefficients(
        env: Env,
        tier: VehicleTier,
    ) -> Result<TierCoefficients, ContractError> {
        load_coefficients(&env, tier)
    }

    pub fn set_config(env: Env, admin: Address, config: RiskConfig) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        validate_config(&config)?;

        env.storage().instance().set(&DataKey::Config, &config);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "config_updated"), admin),
            (
                config.base_rate_bps,
                config.premium_tier_max_score,
                config.medium_tier_max_score,
            ),
        );

        Ok(())
    }

    pub fn set_tier_coefficients(
        env: Env,
        admin: Address,
        tier: VehicleTier,
        coefficients: TierCoefficients,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        validate_coefficients(&coefficients)?;

        env.storage()
            .instance()
            .set(&DataKey::Coefficients(tier), &coefficients);
        extend_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "coefficients_updated"), tier),
            coefficients,
        );

        Ok(())
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        get_admin(&env).ok_or(ContractError::NotInitialized)
    }
}
