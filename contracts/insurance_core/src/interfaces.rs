//! Client interfaces of the contracts the core calls into.

use soroban_sdk::{contractclient, Address, Env, InvokeError};

use shared::{ContractError, PolicyTokenMetadata, RiskAssessment, VehicleProfile, VehicleTier};
use vehicle_insurance::authorization::require_trusted_contract;

use crate::types::CoreConfig;

#[allow(dead_code)]
#[contractclient(name = "RiskAssessmentClient")]
pub trait RiskAssessmentInterface {
    fn assess(env: Env, profile: VehicleProfile) -> Result<RiskAssessment, ContractError>;

    fn calculate_premium(
        env: Env,
        profile: VehicleProfile,
        tier: VehicleTier,
        duration_days: u32,
    ) -> Result<i128, ContractError>;

    fn max_coverage(env: Env, tier: VehicleTier) -> Result<i128, ContractError>;
}

#[allow(dead_code)]
#[contractclient(name = "PolicyNftClient")]
pub trait PolicyNftInterface {
    fn mint(
        env: Env,
        minter: Address,
        to: Address,
        metadata: PolicyTokenMetadata,
    ) -> Result<u64, ContractError>;

    fn burn(env: Env, minter: Address, token_id: u64) -> Result<(), ContractError>;

    fn owner_of(env: Env, token_id: u64) -> Result<Address, ContractError>;
}

pub fn risk_assessment<'a>(
    env: &'a Env,
    config: &CoreConfig,
) -> Result<RiskAssessmentClient<'a>, ContractError> {
    require_trusted_contract(env, &config.risk_assessment)?;
    Ok(RiskAssessmentClient::new(env, &config.risk_assessment))
}

pub fn policy_nft<'a>(
    env: &'a Env,
    config: &CoreConfig,
) -> Result<PolicyNftClient<'a>, ContractError> {
    require_trusted_contract(env, &config.policy_nft)?;
    Ok(PolicyNftClient::new(env, &config.policy_nft))
}

/// Flatten the result of a `try_` client call, keeping the callee's typed
/// error when it returned one.
pub fn call_result<T, C>(
    result: Result<Result<T, C>, Result<ContractError, InvokeError>>,
) -> Result<T, ContractError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err),
        Ok(Err(_)) | Err(Err(_)) => Err(ContractError::ExternalCallFailed),
    }
}
