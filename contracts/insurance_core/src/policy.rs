//! Policy issuance and lifecycle.
//!
//! A policy is written against a verified vehicle, paid for up front in the
//! payment token and represented by a policy NFT minted to the buyer. The
//! state machine is `Active -> Expired | Cancelled`; every transition is
//! appended to the policy's history.

use soroban_sdk::{log, token, Address, Env, String, Symbol};

use shared::constants::ONE_DAY_SECONDS;
use shared::{
    validate_coverage_amount, validate_duration_days, ContractError, PolicyState,
    PolicyTokenMetadata,
};
use vehicle_insurance::authorization::{has_role, Role};

use crate::interfaces::{call_result, policy_nft, risk_assessment};
use crate::storage;
use crate::types::{CoreConfig, Policy, PolicyStatusHistory, Vehicle};
use crate::vehicle::require_owner;

/// Premium the risk contract charges for this vehicle and term
pub fn quote(
    env: &Env,
    config: &CoreConfig,
    vehicle: &Vehicle,
    duration_days: u32,
) -> Result<i128, ContractError> {
    validate_duration_days(duration_days)?;
    if !vehicle.is_verified() {
        return Err(ContractError::VehicleNotVerified);
    }

    let risk = risk_assessment(env, config)?;
    call_result(risk.try_calculate_premium(&vehicle.profile(), &vehicle.tier, &duration_days))
}

pub fn create(
    env: &Env,
    owner: &Address,
    reg_plate: &String,
    duration_days: u32,
    coverage: i128,
) -> Result<Policy, ContractError> {
    let config = storage::get_config(env)?;
    let mut vehicle = storage::get_vehicle(env, reg_plate)?;
    require_owner(&vehicle, owner)?;

    let now = env.ledger().timestamp();
    if let Some(current_id) = vehicle.active_policy {
        close_lapsed(env, current_id, now)?;
    }

    let premium = quote(env, &config, &vehicle, duration_days)?;

    let risk = risk_assessment(env, &config)?;
    let max_coverage = call_result(risk.try_max_coverage(&vehicle.tier))?;
    validate_coverage_amount(coverage, max_coverage)?;

    let token = token::Client::new(env, &config.payment_token);
    if token.balance(owner) < premium {
        return Err(ContractError::InsufficientFunds);
    }
    token.transfer(owner, &env.current_contract_address(), &premium);

    let term = u64::from(duration_days)
        .checked_mul(ONE_DAY_SECONDS)
        .ok_or(ContractError::Overflow)?;
    let end_time = now.checked_add(term).ok_or(ContractError::Overflow)?;

    let policy_id = vehicle_insurance::utils::next_id(env, "policy")?;
    let policy = Policy {
        id: policy_id,
        reg_plate: reg_plate.clone(),
        holder: owner.clone(),
        coverage,
        premium,
        start_time: now,
        end_time,
        tier: vehicle.tier,
        state: PolicyState::Active,
        claimed_amount: 0,
        pending_claims: 0,
    };
    storage::set_policy(env, &policy);
    storage::add_vehicle_policy(env, reg_plate, policy_id);

    vehicle.active_policy = Some(policy_id);
    storage::set_vehicle(env, &vehicle);

    let nft = policy_nft(env, &config)?;
    let metadata = PolicyTokenMetadata {
        policy_id,
        reg_plate: reg_plate.clone(),
        tier: policy.tier,
        coverage,
        end_time,
    };
    call_result(nft.try_mint(&env.current_contract_address(), owner, &metadata))?;

    log!(env, "premium collected", policy_id, premium);
    env.events().publish(
        (Symbol::new(env, "policy_created"), policy_id),
        (owner.clone(), reg_plate.clone(), coverage, premium, end_time),
    );

    Ok(policy)
}

/// Cancel an active policy. Allowed for the current token holder and the
/// admin; the premium is not refunded and the policy token is burned.
pub fn cancel(env: &Env, actor: &Address, policy_id: u64) -> Result<Policy, ContractError> {
    let config = storage::get_config(env)?;
    let mut policy = storage::get_policy(env, policy_id)?;
    if policy.state != PolicyState::Active {
        return Err(ContractError::PolicyNotActive);
    }

    let nft = policy_nft(env, &config)?;
    let holder = call_result(nft.try_owner_of(&policy_id))?;
    if &holder != actor && !has_role(env, actor, Role::Admin) {
        return Err(ContractError::Unauthorized);
    }
    if policy.pending_claims > 0 {
        return Err(ContractError::PendingClaimsExist);
    }

    transition(env, &mut policy, PolicyState::Cancelled, actor)?;
    release_vehicle(env, &policy)?;

    call_result(nft.try_burn(&env.current_contract_address(), &policy_id))?;

    Ok(policy)
}

/// Close a policy whose term has ended. Callable by anyone.
pub fn expire(env: &Env, policy_id: u64) -> Result<Policy, ContractError> {
    let mut policy = storage::get_policy(env, policy_id)?;
    if policy.state != PolicyState::Active {
        return Err(ContractError::PolicyNotActive);
    }
    if env.ledger().timestamp() < policy.end_time {
        return Err(ContractError::PolicyNotExpired);
    }
    if policy.pending_claims > 0 {
        return Err(ContractError::PendingClaimsExist);
    }

    transition(env, &mut policy, PolicyState::Expired, &env.current_contract_address())?;
    release_vehicle(env, &policy)?;

    Ok(policy)
}

/// Apply a state transition, persist the policy and record it in the
/// policy's history.
pub fn transition(
    env: &Env,
    policy: &mut Policy,
    next: PolicyState,
    actor: &Address,
) -> Result<(), ContractError> {
    let previous = policy.state;
    if !previous.can_transition_to(next) {
        return Err(ContractError::InvalidStateTransition);
    }

    policy.state = next;
    storage::set_policy(env, policy);

    let timestamp = env.ledger().timestamp();
    storage::append_policy_history(
        env,
        &PolicyStatusHistory {
            policy_id: policy.id,
            previous_state: previous,
            new_state: next,
            actor: actor.clone(),
            timestamp,
        },
    );

    env.events().publish(
        (Symbol::new(env, "policy_state_changed"), policy.id),
        (previous, next, actor.clone(), timestamp),
    );

    Ok(())
}

/// Expire the vehicle's current policy if its term has run out, so that a
/// new one can be written. Fails if it is still in force.
fn close_lapsed(env: &Env, policy_id: u64, now: u64) -> Result<(), ContractError> {
    let mut current = storage::get_policy(env, policy_id)?;
    if current.state != PolicyState::Active {
        return Ok(());
    }
    if current.is_active_at(now) {
        return Err(ContractError::ActivePolicyExists);
    }
    if current.pending_claims > 0 {
        return Err(ContractError::PendingClaimsExist);
    }
    transition(env, &mut current, PolicyState::Expired, &env.current_contract_address())
}

fn release_vehicle(env: &Env, policy: &Policy) -> Result<(), ContractError> {
    let mut vehicle = storage::get_vehicle(env, &policy.reg_plate)?;
    if vehicle.active_policy == Some(policy.id) {
        vehicle.active_policy = None;
        storage::set_vehicle(env, &vehicle);
    }
    Ok(())
}
