//! Claim submission and adjudication.

use soroban_sdk::{log, token, Address, BytesN, Env, String, Symbol};

use shared::constants::MAX_DESCRIPTION_LENGTH;
use shared::validation::validate_sufficient_funds;
use shared::{
    safe_add, validate_positive_amount, validate_string_length, ClaimStatus, ContractError,
    PolicyState,
};
use vehicle_insurance::utils::{next_id, store_claim_evidence};

use crate::interfaces::{call_result, policy_nft};
use crate::storage;
use crate::types::{Claim, Policy};

pub fn submit(
    env: &Env,
    claimant: &Address,
    policy_id: u64,
    description: String,
    photo_hash: BytesN<32>,
    amount: i128,
) -> Result<Claim, ContractError> {
    let config = storage::get_config(env)?;
    let mut policy = storage::get_policy(env, policy_id)?;

    let now = env.ledger().timestamp();
    if !policy.is_active_at(now) {
        return Err(ContractError::PolicyNotActive);
    }

    let nft = policy_nft(env, &config)?;
    if &call_result(nft.try_owner_of(&policy_id))? != claimant {
        return Err(ContractError::NotTokenOwner);
    }

    validate_string_length(&description, MAX_DESCRIPTION_LENGTH)?;
    validate_positive_amount(amount)?;
    check_remaining_coverage(&policy, amount)?;

    let claim_id = next_id(env, "claim")?;
    store_claim_evidence(env, claim_id, photo_hash.clone(), claimant.clone())?;

    let claim = Claim {
        id: claim_id,
        policy_id,
        claimant: claimant.clone(),
        description,
        photo_hash,
        amount,
        payout: 0,
        status: ClaimStatus::Pending,
        submitted_at: now,
        processed_at: None,
        processor: None,
    };
    storage::set_claim(env, &claim);
    storage::add_policy_claim(env, policy_id, claim_id);

    policy.pending_claims = policy
        .pending_claims
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    storage::set_policy(env, &policy);

    env.events().publish(
        (Symbol::new(env, "claim_submitted"), claim_id),
        (policy_id, claimant.clone(), amount),
    );

    Ok(claim)
}

/// Decide a pending claim. An approval pays out in the same call, so an
/// approved claim is always observed as Paid.
pub fn process(
    env: &Env,
    processor: &Address,
    claim_id: u64,
    approved: bool,
) -> Result<Claim, ContractError> {
    let mut claim = storage::get_claim(env, claim_id)?;
    if claim.is_processed() {
        return Err(ContractError::ClaimAlreadyProcessed);
    }
    let mut policy = storage::get_policy(env, claim.policy_id)?;

    if approved {
        pay_out(env, processor, &mut claim, &mut policy)?;
    } else {
        set_status(env, &mut claim, ClaimStatus::Rejected)?;
    }

    claim.processed_at = Some(env.ledger().timestamp());
    claim.processor = Some(processor.clone());
    storage::set_claim(env, &claim);

    policy.pending_claims = policy.pending_claims.saturating_sub(1);
    storage::set_policy(env, &policy);

    Ok(claim)
}

fn pay_out(
    env: &Env,
    processor: &Address,
    claim: &mut Claim,
    policy: &mut Policy,
) -> Result<(), ContractError> {
    if policy.state != PolicyState::Active {
        return Err(ContractError::PolicyNotActive);
    }

    let remaining = policy.remaining_coverage();
    if remaining == 0 {
        return Err(ContractError::CoverageExhausted);
    }
    let payout = claim.amount.min(remaining);

    let config = storage::get_config(env)?;
    let token = token::Client::new(env, &config.payment_token);
    let pool = env.current_contract_address();
    validate_sufficient_funds(token.balance(&pool), payout)?;

    set_status(env, claim, ClaimStatus::Approved)?;
    token.transfer(&pool, &claim.claimant, &payout);

    claim.payout = payout;
    policy.claimed_amount = safe_add(policy.claimed_amount, payout)?;
    set_status(env, claim, ClaimStatus::Paid)?;

    log!(env, "claim paid", claim.id, payout);
    env.events().publish(
        (Symbol::new(env, "claim_paid"), claim.id),
        (policy.id, claim.claimant.clone(), payout, processor.clone()),
    );

    Ok(())
}

fn set_status(env: &Env, claim: &mut Claim, next: ClaimStatus) -> Result<(), ContractError> {
    if !claim.status.can_transition_to(next) {
        return Err(ContractError::InvalidStateTransition);
    }
    let previous = claim.status;
    claim.status = next;

    env.events().publish(
        (Symbol::new(env, "claim_status_changed"), claim.id),
        (previous, next),
    );

    Ok(())
}

fn check_remaining_coverage(policy: &Policy, amount: i128) -> Result<(), ContractError> {
    let remaining = policy.remaining_coverage();
    if remaining == 0 {
        return Err(ContractError::CoverageExhausted);
    }
    if amount > remaining {
        return Err(ContractError::ClaimAmountExceedsCoverage);
    }
    Ok(())
}
