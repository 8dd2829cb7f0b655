use soroban_sdk::{Address, Env, IntoVal, String, TryFromVal, Val, Vec};

use shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use shared::ContractError;

use crate::types::{Claim, CoreConfig, DataKey, Policy, PolicyStatusHistory, Vehicle};

// ===== TTL =====

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn extend(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Read a persistent entry, keeping it alive if it exists
fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        extend(env, key);
    }
    value
}

fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    extend(env, key);
}

// ===== Config =====

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<CoreConfig, ContractError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)?;
    extend_instance(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &CoreConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance(env);
}

// ===== Vehicles =====

pub fn has_vehicle(env: &Env, reg_plate: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vehicle(reg_plate.clone()))
}

pub fn get_vehicle(env: &Env, reg_plate: &String) -> Result<Vehicle, ContractError> {
    read(env, &DataKey::Vehicle(reg_plate.clone())).ok_or(ContractError::VehicleNotFound)
}

pub fn set_vehicle(env: &Env, vehicle: &Vehicle) {
    write(env, &DataKey::Vehicle(vehicle.reg_plate.clone()), vehicle);
}

pub fn get_owner_vehicles(env: &Env, owner: &Address) -> Vec<String> {
    read(env, &DataKey::OwnerVehicles(owner.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn add_owner_vehicle(env: &Env, owner: &Address, reg_plate: &String) {
    let mut plates = get_owner_vehicles(env, owner);
    plates.push_back(reg_plate.clone());
    write(env, &DataKey::OwnerVehicles(owner.clone()), &plates);
}

pub fn get_vehicle_policies(env: &Env, reg_plate: &String) -> Vec<u64> {
    read(env, &DataKey::VehiclePolicies(reg_plate.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn add_vehicle_policy(env: &Env, reg_plate: &String, policy_id: u64) {
    let mut policies = get_vehicle_policies(env, reg_plate);
    policies.push_back(policy_id);
    write(env, &DataKey::VehiclePolicies(reg_plate.clone()), &policies);
}

// ===== Policies =====

pub fn get_policy(env: &Env, policy_id: u64) -> Result<Policy, ContractError> {
    read(env, &DataKey::Policy(policy_id)).ok_or(ContractError::PolicyNotFound)
}

pub fn set_policy(env: &Env, policy: &Policy) {
    write(env, &DataKey::Policy(policy.id), policy);
}

pub fn get_policy_history(env: &Env, policy_id: u64) -> Vec<PolicyStatusHistory> {
    read(env, &DataKey::PolicyHistory(policy_id)).unwrap_or_else(|| Vec::new(env))
}

pub fn append_policy_history(env: &Env, entry: &PolicyStatusHistory) {
    let mut history = get_policy_history(env, entry.policy_id);
    history.push_back(entry.clone());
    write(env, &DataKey::PolicyHistory(entry.policy_id), &history);
}

// ===== Claims =====

pub fn get_claim(env: &Env, claim_id: u64) -> Result<Claim, ContractError> {
    read(env, &DataKey::Claim(claim_id)).ok_or(ContractError::ClaimNotFound)
}

pub fn set_claim(env: &Env, claim: &Claim) {
    write(env, &DataKey::Claim(claim.id), claim);
}

pub fn get_policy_claims(env: &Env, policy_id: u64) -> Vec<u64> {
    read(env, &DataKey::PolicyClaims(policy_id)).unwrap_or_else(|| Vec::new(env))
}

pub fn add_policy_claim(env: &Env, policy_id: u64, claim_id: u64) {
    let mut claims = get_policy_claims(env, policy_id);
    claims.push_back(claim_id);
    write(env, &DataKey::PolicyClaims(policy_id), &claims);
}
