#![no_std]
//! Insurance core contract.
//!
//! Owns the vehicle registry, policies, claims and the payment-token pool
//! that premiums are paid into and claims are paid out of. Pricing is
//! delegated to the risk assessment contract and policy ownership is
//! represented by tokens of the policy NFT contract, for which this
//! contract is the minter.

use soroban_sdk::{contract, contractimpl, token, Address, BytesN, Env, String, Symbol, Vec};

use shared::validation::validate_sufficient_funds;
use shared::{validate_positive_amount, ContractError};
use vehicle_insurance::authorization::{
    get_admin, get_role, grant_role, initialize_admin, register_trusted_contract,
    require_admin, require_claim_processing, require_claim_submission,
    require_vehicle_verification, revoke_role, Role,
};
use vehicle_insurance::utils::{
    current_id, get_claim_evidence, require_not_paused, set_paused, verify_claim_evidence,
};
use vehicle_insurance::types::ClaimEvidence;

mod claim;
mod interfaces;
mod policy;
mod storage;
mod types;
mod vehicle;

pub use types::{
    Claim, CoreConfig, DataKey, Policy, PolicyStatusHistory, Vehicle, VehicleRegistration,
};

#[contract]
pub struct InsuranceCoreContract;

#[contractimpl]
impl InsuranceCoreContract {
    // ===== Setup and administration =====

    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        risk_assessment: Address,
        policy_nft: Address,
    ) -> Result<(), ContractError> {
        if storage::has_config(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        initialize_admin(&env, admin.clone());

        register_trusted_contract(&env, &admin, &risk_assessment)?;
        register_trusted_contract(&env, &admin, &policy_nft)?;

        storage::set_config(
            &env,
            &CoreConfig {
                payment_token,
                risk_assessment,
                policy_nft,
            },
        );

        env.events()
            .publish((Symbol::new(&env, "initialized"), ()), admin);

        Ok(())
    }

    pub fn get_config(env: Env) -> Result<CoreConfig, ContractError> {
        storage::get_config(&env)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        get_admin(&env)
    }

    pub fn pause(env: Env, admin: Address) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;

        set_paused(&env, true);
        env.events().publish((Symbol::new(&env, "paused"), ()), admin);

        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;

        set_paused(&env, false);
        env.events().publish((Symbol::new(&env, "unpaused"), ()), admin);

        Ok(())
    }

    pub fn grant_verifier_role(
        env: Env,
        admin: Address,
        verifier: Address,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        grant_role(&env, &admin, &verifier, Role::Verifier)?;
        Ok(())
    }

    pub fn grant_claim_processor_role(
        env: Env,
        admin: Address,
        processor: Address,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        grant_role(&env, &admin, &processor, Role::ClaimProcessor)?;
        Ok(())
    }

    pub fn revoke_role(env: Env, admin: Address, target: Address) -> Result<(), ContractError> {
        admin.require_auth();
        revoke_role(&env, &admin, &target)?;
        Ok(())
    }

    pub fn get_role(env: Env, address: Address) -> Role {
        get_role(&env, &address)
    }

    // ===== Vehicles =====

    pub fn register_vehicle(
        env: Env,
        owner: Address,
        registration: VehicleRegistration,
    ) -> Result<Vehicle, ContractError> {
        owner.require_auth();
        require_not_paused(&env)?;

        storage::extend_instance(&env);
        vehicle::register(&env, &owner, registration)
    }

    pub fn update_vehicle(
        env: Env,
        owner: Address,
        reg_plate: String,
        mileage: u64,
        condition: u32,
        has_accident_history: bool,
    ) -> Result<Vehicle, ContractError> {
        owner.require_auth();
        require_not_paused(&env)?;

        storage::extend_instance(&env);
        vehicle::update(&env, &owner, &reg_plate, mileage, condition, has_accident_history)
    }

    pub fn verify_vehicle(
        env: Env,
        verifier: Address,
        reg_plate: String,
    ) -> Result<Vehicle, ContractError> {
        verifier.require_auth();
        require_vehicle_verification(&env, &verifier)?;
        require_not_paused(&env)?;

        vehicle::verify(&env, &verifier, &reg_plate)
    }

    pub fn reject_vehicle(
        env: Env,
        verifier: Address,
        reg_plate: String,
    ) -> Result<Vehicle, ContractError> {
        verifier.require_auth();
        require_vehicle_verification(&env, &verifier)?;
        require_not_paused(&env)?;

        storage::extend_instance(&env);
        vehicle::reject(&env, &verifier, &reg_plate)
    }

    pub fn get_vehicle(env: Env, reg_plate: String) -> Result<Vehicle, ContractError> {
        storage::get_vehicle(&env, &reg_plate)
    }

    pub fn get_vehicles_by_owner(env: Env, owner: Address) -> Vec<String> {
        storage::get_owner_vehicles(&env, &owner)
    }

    pub fn get_vehicle_policies(env: Env, reg_plate: String) -> Vec<u64> {
        storage::get_vehicle_policies(&env, &reg_plate)
    }

    // ===== Policies =====

    pub fn quote_premium(
        env: Env,
        reg_plate: String,
        duration_days: u32,
    ) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        let vehicle = storage::get_vehicle(&env, &reg_plate)?;
        policy::quote(&env, &config, &vehicle, duration_days)
    }

    /// Buy a policy on a verified vehicle. The premium is pulled from the
    /// owner in the payment token and the policy token is minted to them.
    pub fn create_policy(
        env: Env,
        owner: Address,
        reg_plate: String,
        duration_days: u32,
        coverage: i128,
    ) -> Result<u64, ContractError> {
        owner.require_auth();
        require_not_paused(&env)?;

        let policy = policy::create(&env, &owner, &reg_plate, duration_days, coverage)?;
        Ok(policy.id)
    }

    pub fn cancel_policy(env: Env, actor: Address, policy_id: u64) -> Result<(), ContractError> {
        actor.require_auth();
        require_not_paused(&env)?;

        policy::cancel(&env, &actor, policy_id)?;
        Ok(())
    }

    pub fn expire_policy(env: Env, policy_id: u64) -> Result<(), ContractError> {
        policy::expire(&env, policy_id)?;
        Ok(())
    }

    pub fn get_policy(env: Env, policy_id: u64) -> Result<Policy, ContractError> {
        storage::get_policy(&env, policy_id)
    }

    pub fn get_policy_count(env: Env) -> u64 {
        current_id(&env, "policy")
    }

    pub fn is_policy_active(env: Env, policy_id: u64) -> Result<bool, ContractError> {
        let policy = storage::get_policy(&env, policy_id)?;
        Ok(policy.is_active_at(env.ledger().timestamp()))
    }

    pub fn get_policy_history(
        env: Env,
        policy_id: u64,
    ) -> Result<Vec<PolicyStatusHistory>, ContractError> {
        storage::get_policy(&env, policy_id)?;
        Ok(storage::get_policy_history(&env, policy_id))
    }

    // ===== Claims =====

    pub fn submit_claim(
        env: Env,
        claimant: Address,
        policy_id: u64,
        description: String,
        photo_hash: BytesN<32>,
        amount: i128,
    ) -> Result<u64, ContractError> {
        claimant.require_auth();
        require_claim_submission(&env, &claimant)?;
        require_not_paused(&env)?;

        let claim = claim::submit(&env, &claimant, policy_id, description, photo_hash, amount)?;
        Ok(claim.id)
    }

    pub fn process_claim(
        env: Env,
        processor: Address,
        claim_id: u64,
        approved: bool,
    ) -> Result<(), ContractError> {
        processor.require_auth();
        require_claim_processing(&env, &processor)?;
        require_not_paused(&env)?;

        claim::process(&env, &processor, claim_id, approved)?;
        Ok(())
    }

    /// Check a photo against the hash recorded when the claim was filed
    pub fn verify_claim_photo(
        env: Env,
        claim_id: u64,
        photo_hash: BytesN<32>,
    ) -> Result<bool, ContractError> {
        verify_claim_evidence(&env, claim_id, photo_hash)
    }

    pub fn get_claim_evidence(env: Env, claim_id: u64) -> Result<ClaimEvidence, ContractError> {
        get_claim_evidence(&env, claim_id)
    }

    pub fn get_claim(env: Env, claim_id: u64) -> Result<Claim, ContractError> {
        storage::get_claim(&env, claim_id)
    }

    pub fn get_claims_by_policy(env: Env, policy_id: u64) -> Vec<u64> {
        storage::get_policy_claims(&env, policy_id)
    }

    pub fn get_claim_count(env: Env) -> u64 {
        current_id(&env, "claim")
    }

    // ===== Treasury =====

    /// Deposit payment tokens into the claims pool
    pub fn fund_pool(env: Env, from: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        validate_positive_amount(amount)?;

        let config = storage::get_config(&env)?;
        let token = token::Client::new(&env, &config.payment_token);
        validate_sufficient_funds(token.balance(&from), amount)?;
        token.transfer(&from, &env.current_contract_address(), &amount);

        env.events()
            .publish((Symbol::new(&env, "pool_funded"), from), amount);

        Ok(())
    }

    pub fn withdraw(
        env: Env,
        admin: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;
        validate_positive_amount(amount)?;

        let config = storage::get_config(&env)?;
        let token = token::Client::new(&env, &config.payment_token);
        let pool = env.current_contract_address();
        validate_sufficient_funds(token.balance(&pool), amount)?;
        token.transfer(&pool, &to, &amount);

        env.events()
            .publish((Symbol::new(&env, "pool_withdrawn"), to), amount);

        Ok(())
    }

    pub fn get_pool_balance(env: Env) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        Ok(token::Client::new(&env, &config.payment_token).balance(&env.current_contract_address()))
    }
}
