//! Authorization Module for the Vehicle Insurance Protocol
//!
//! Role-based access control shared by every contract in the workspace.
//! Role assignments live in the persistent storage of the contract that
//! calls into this module.
//!
//! ## Features
//! - Standardized role definitions across all contracts
//! - Explicit permission checks for vehicle verification and claim processing
//! - Cross-contract call validation through a trusted contract list

#![no_std]

use shared::constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use shared::errors::ContractError;
use soroban_sdk::{contracttype, Address, Env, IntoVal, Symbol, TryFromVal, Val};

/// Protocol-wide role definitions
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Role {
    /// Contract owner with full access
    Admin,
    /// Inspector authorized to verify or reject vehicle registrations
    Verifier,
    /// Adjuster authorized to approve or reject claims
    ClaimProcessor,
    /// Regular user (vehicle owner, policyholder)
    User,
}

/// Storage keys for role assignments
#[contracttype]
#[derive(Clone)]
pub enum RoleKey {
    /// Maps Address -> Role
    UserRole(Address),
    /// Contract-level admin address
    ContractAdmin,
    /// Trusted contract addresses for cross-contract calls
    TrustedContract(Address),
}

/// Authorization errors
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthError {
    Unauthorized,
    InvalidRole,
    NotTrustedContract,
}

/// Convert authorization errors to contract errors
impl From<AuthError> for ContractError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ContractError::Unauthorized,
            AuthError::InvalidRole => ContractError::InvalidRole,
            AuthError::NotTrustedContract => ContractError::NotTrustedContract,
        }
    }
}

/// Permission matrix: defines what each role can do
impl Role {
    pub fn can_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_verify_vehicles(&self) -> bool {
        matches!(self, Role::Admin | Role::Verifier)
    }

    pub fn can_process_claims(&self) -> bool {
        matches!(self, Role::Admin | Role::ClaimProcessor)
    }

    /// Claim processors cannot file claims they would then adjudicate
    pub fn can_submit_claim(&self) -> bool {
        !matches!(self, Role::ClaimProcessor)
    }
}

fn extend(env: &Env, key: &RoleKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &RoleKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        extend(env, key);
    }
    value
}

fn write<V: IntoVal<Env, Val>>(env: &Env, key: &RoleKey, value: &V) {
    env.storage().persistent().set(key, value);
    extend(env, key);
}

/// Initialize contract admin (call once during contract initialization)
pub fn initialize_admin(env: &Env, admin: Address) {
    write(env, &RoleKey::ContractAdmin, &admin);
    write(env, &RoleKey::UserRole(admin), &Role::Admin);
}

/// Get the contract admin address
pub fn get_admin(env: &Env) -> Option<Address> {
    read(env, &RoleKey::ContractAdmin)
}

/// Grant a role to an address (admin only)
pub fn grant_role(
    env: &Env,
    caller: &Address,
    target: &Address,
    role: Role,
) -> Result<(), AuthError> {
    require_admin(env, caller)?;

    // A second admin would be unreachable by revoke_role's self-check
    if role == Role::Admin {
        return Err(AuthError::InvalidRole);
    }

    write(env, &RoleKey::UserRole(target.clone()), &role);

    env.events().publish(
        (Symbol::new(env, "role_granted"), target.clone()),
        (role, caller.clone()),
    );

    Ok(())
}

/// Revoke a role from an address (admin only)
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> Result<(), AuthError> {
    require_admin(env, caller)?;

    // Prevent admin from revoking their own role
    if caller == target {
        return Err(AuthError::Unauthorized);
    }

    write(env, &RoleKey::UserRole(target.clone()), &Role::User);

    env.events()
        .publish((Symbol::new(env, "role_revoked"), target.clone()), caller.clone());

    Ok(())
}

/// Get the role of an address
pub fn get_role(env: &Env, address: &Address) -> Role {
    read(env, &RoleKey::UserRole(address.clone())).unwrap_or(Role::User)
}

/// Check if an address has a specific role
pub fn has_role(env: &Env, address: &Address, required_role: Role) -> bool {
    get_role(env, address) == required_role
}

/// Require that the caller has a specific role
pub fn require_role(env: &Env, address: &Address, required_role: Role) -> Result<(), AuthError> {
    if has_role(env, address, required_role) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Require admin privileges
pub fn require_admin(env: &Env, address: &Address) -> Result<(), AuthError> {
    require_role(env, address, Role::Admin)
}

/// Require permission to verify vehicles
pub fn require_vehicle_verification(env: &Env, address: &Address) -> Result<(), AuthError> {
    if get_role(env, address).can_verify_vehicles() {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Require permission to process claims
pub fn require_claim_processing(env: &Env, address: &Address) -> Result<(), AuthError> {
    if get_role(env, address).can_process_claims() {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Require permission to submit claims
pub fn require_claim_submission(env: &Env, address: &Address) -> Result<(), AuthError> {
    if get_role(env, address).can_submit_claim() {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Cross-contract call validation

/// Register a trusted contract address (admin only)
pub fn register_trusted_contract(
    env: &Env,
    caller: &Address,
    contract_address: &Address,
) -> Result<(), AuthError> {
    require_admin(env, caller)?;

    write(env, &RoleKey::TrustedContract(contract_address.clone()), &true);

    Ok(())
}

/// Unregister a trusted contract address (admin only)
pub fn unregister_trusted_contract(
    env: &Env,
    caller: &Address,
    contract_address: &Address,
) -> Result<(), AuthError> {
    require_admin(env, caller)?;

    env.storage()
        .persistent()
        .remove(&RoleKey::TrustedContract(contract_address.clone()));

    Ok(())
}

/// Check if a contract address is trusted
pub fn is_trusted_contract(env: &Env, contract_address: &Address) -> bool {
    read(env, &RoleKey::TrustedContract(contract_address.clone())).unwrap_or(false)
}

/// Require that the contract making the call is trusted
pub fn require_trusted_contract(env: &Env, contract_address: &Address) -> Result<(), AuthError> {
    if is_trusted_contract(env, contract_address) {
        Ok(())
    } else {
        Err(AuthError::NotTrustedContract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{contract, contractimpl};

    #[contract]
    struct HostContract;

    #[contractimpl]
    impl HostContract {}

    fn with_contract_env<T>(env: &Env, f: impl FnOnce() -> T) -> T {
        let cid = env.register(HostContract, ());
        env.as_contract(&cid, f)
    }

    #[test]
    fn test_admin_grants_and_revokes_roles() {
        let env = Env::default();
        with_contract_env(&env, || {
            let admin = Address::generate(&env);
            let verifier = Address::generate(&env);

            initialize_admin(&env, admin.clone());
            assert_eq!(get_admin(&env), Some(admin.clone()));
            assert_eq!(get_role(&env, &verifier), Role::User);

            grant_role(&env, &admin, &verifier, Role::Verifier).unwrap();
            assert!(has_role(&env, &verifier, Role::Verifier));
            assert_eq!(require_vehicle_verification(&env, &verifier), Ok(()));
            assert_eq!(
                require_claim_processing(&env, &verifier),
                Err(AuthError::Unauthorized)
            );

            revoke_role(&env, &admin, &verifier).unwrap();
            assert_eq!(get_role(&env, &verifier), Role::User);
        });
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let env = Env::default();
        with_contract_env(&env, || {
            let admin = Address::generate(&env);
            let mallory = Address::generate(&env);

            initialize_admin(&env, admin);
            assert_eq!(
                grant_role(&env, &mallory, &mallory, Role::ClaimProcessor),
                Err(AuthError::Unauthorized)
            );
        });
    }

    #[test]
    fn test_admin_role_cannot_be_granted_or_self_revoked() {
        let env = Env::default();
        with_contract_env(&env, || {
            let admin = Address::generate(&env);
            let other = Address::generate(&env);

            initialize_admin(&env, admin.clone());
            assert_eq!(
                grant_role(&env, &admin, &other, Role::Admin),
                Err(AuthError::InvalidRole)
            );
            assert_eq!(revoke_role(&env, &admin, &admin), Err(AuthError::Unauthorized));
        });
    }

    #[test]
    fn test_claim_processor_cannot_submit_claims() {
        let env = Env::default();
        with_contract_env(&env, || {
            let admin = Address::generate(&env);
            let adjuster = Address::generate(&env);

            initialize_admin(&env, admin.clone());
            grant_role(&env, &admin, &adjuster, Role::ClaimProcessor).unwrap();

            assert_eq!(
                require_claim_submission(&env, &adjuster),
                Err(AuthError::Unauthorized)
            );
            assert_eq!(require_claim_submission(&env, &admin), Ok(()));
        });
    }

    #[test]
    fn test_trusted_contracts() {
        let env = Env::default();
        with_contract_env(&env, || {
            let admin = Address::generate(&env);
            let other = Address::generate(&env);

            initialize_admin(&env, admin.clone());
            assert_eq!(
                require_trusted_contract(&env, &other),
                Err(AuthError::NotTrustedContract)
            );

            register_trusted_contract(&env, &admin, &other).unwrap();
            assert!(is_trusted_contract(&env, &other));

            unregister_trusted_contract(&env, &admin, &other).unwrap();
            assert!(!is_trusted_contract(&env, &other));
        });
    }
}
