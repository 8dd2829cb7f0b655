#![no_std]
//! Shared library for the vehicle insurance Soroban contracts
//!
//! Re-exports the authorization module and provides the small storage
//! utilities (pause flag, id counters, claim photo evidence) that every
//! contract in the workspace needs.

use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol};

/// Re-export authorization module for easy access
/// Import authorization functions like: use vehicle_insurance::authorization::*;
pub mod authorization {
    pub use authorization::{
        get_admin, get_role, grant_role, has_role, initialize_admin, is_trusted_contract,
        register_trusted_contract, require_admin, require_claim_processing,
        require_claim_submission, require_role, require_trusted_contract,
        require_vehicle_verification, revoke_role, unregister_trusted_contract, AuthError, Role,
        RoleKey,
    };
}

/// Storage types used by the utilities below
pub mod types {
    use super::*;

    /// Evidence record for a claim photo (hash-only, immutable)
    #[contracttype]
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct ClaimEvidence {
        pub claim_id: u64,
        /// SHA-256 of the damage photo
        pub photo_hash: BytesN<32>,
        pub submitter: Address,
        pub recorded_at: u64,
    }

    /// Common data keys for contract storage
    #[contracttype]
    #[derive(Clone, Debug)]
    pub enum CommonKey {
        Paused,
        Counter(Symbol),
        ClaimEvidence(u64),
    }
}

/// Common error type, convertible from `AuthError` with `?`
pub mod errors {
    pub use shared::errors::ContractError;
}

/// Utility functions for contract operations
pub mod utils {
    use super::*;
    use crate::{errors::ContractError, types::*};
    use shared::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};

    fn extend(env: &Env, key: &CommonKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    /// Check if contract is paused
    pub fn is_paused(env: &Env) -> bool {
        match env.storage().persistent().get(&CommonKey::Paused) {
            Some(paused) => {
                extend(env, &CommonKey::Paused);
                paused
            }
            None => false,
        }
    }

    /// Set contract pause status
    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().persistent().set(&CommonKey::Paused, &paused);
        extend(env, &CommonKey::Paused);
    }

    /// Fail with `Paused` while the contract is paused
    pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
        if is_paused(env) {
            return Err(ContractError::Paused);
        }
        Ok(())
    }

    /// Current value of a named counter
    pub fn current_id(env: &Env, counter_name: &str) -> u64 {
        let key = CommonKey::Counter(Symbol::new(env, counter_name));
        match env.storage().persistent().get(&key) {
            Some(id) => {
                extend(env, &key);
                id
            }
            None => 0,
        }
    }

    /// Get next ID for a given counter; ids start at 1
    pub fn next_id(env: &Env, counter_name: &str) -> Result<u64, ContractError> {
        let key = CommonKey::Counter(Symbol::new(env, counter_name));
        let current_id: u64 = env.storage().persistent().get(&key).unwrap_or(0u64);
        let next_id = current_id.checked_add(1).ok_or(ContractError::Overflow)?;
        env.storage().persistent().set(&key, &next_id);
        extend(env, &key);
        Ok(next_id)
    }

    /// Store claim photo hash (immutable)
    pub fn store_claim_evidence(
        env: &Env,
        claim_id: u64,
        photo_hash: BytesN<32>,
        submitter: Address,
    ) -> Result<(), ContractError> {
        let key = CommonKey::ClaimEvidence(claim_id);

        if env.storage().persistent().has(&key) {
            return Err(ContractError::EvidenceAlreadyExists);
        }

        let record = ClaimEvidence {
            claim_id,
            photo_hash,
            submitter,
            recorded_at: env.ledger().timestamp(),
        };

        env.storage().persistent().set(&key, &record);
        extend(env, &key);
        Ok(())
    }

    /// Verify supplied hash against stored hash
    pub fn verify_claim_evidence(
        env: &Env,
        claim_id: u64,
        provided_hash: BytesN<32>,
    ) -> Result<bool, ContractError> {
        let record = get_claim_evidence(env, claim_id)?;
        Ok(record.photo_hash == provided_hash)
    }

    /// Fetch stored evidence
    pub fn get_claim_evidence(env: &Env, claim_id: u64) -> Result<ClaimEvidence, ContractError> {
        let key = CommonKey::ClaimEvidence(claim_id);
        let record = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::EvidenceNotFound)?;
        extend(env, &key);
        Ok(record)
    }
}
