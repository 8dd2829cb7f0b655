use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val, Vec};

use shared::constants::{
    INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};
use shared::{ContractError, PolicyTokenMetadata};

use crate::DataKey;

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    value
}

fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_minter(env: &Env) -> Result<Address, ContractError> {
    let minter = env
        .storage()
        .instance()
        .get(&DataKey::Minter)
        .ok_or(ContractError::NotInitialized)?;
    extend_instance(env);
    Ok(minter)
}

pub fn set_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&DataKey::Minter, minter);
    extend_instance(env);
}

pub fn has_token(env: &Env, token_id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Owner(token_id))
}

pub fn get_owner(env: &Env, token_id: u64) -> Result<Address, ContractError> {
    read(env, &DataKey::Owner(token_id)).ok_or(ContractError::TokenNotFound)
}

pub fn set_owner(env: &Env, token_id: u64, owner: &Address) {
    write(env, &DataKey::Owner(token_id), owner);
}

pub fn get_metadata(env: &Env, token_id: u64) -> Result<PolicyTokenMetadata, ContractError> {
    read(env, &DataKey::Metadata(token_id)).ok_or(ContractError::TokenNotFound)
}

pub fn set_metadata(env: &Env, token_id: u64, metadata: &PolicyTokenMetadata) {
    write(env, &DataKey::Metadata(token_id), metadata);
}

pub fn remove_token(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&DataKey::Owner(token_id));
    env.storage().persistent().remove(&DataKey::Metadata(token_id));
    clear_approved(env, token_id);
}

pub fn get_approved(env: &Env, token_id: u64) -> Option<Address> {
    read(env, &DataKey::Approved(token_id))
}

pub fn set_approved(env: &Env, token_id: u64, spender: &Address) {
    write(env, &DataKey::Approved(token_id), spender);
}

pub fn clear_approved(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&DataKey::Approved(token_id));
}

pub fn get_owner_tokens(env: &Env, owner: &Address) -> Vec<u64> {
    read(env, &DataKey::OwnerTokens(owner.clone())).unwrap_or_else(|| Vec::new(env))
}

pub fn add_owner_token(env: &Env, owner: &Address, token_id: u64) {
    let mut tokens = get_owner_tokens(env, owner);
    tokens.push_back(token_id);
    write(env, &DataKey::OwnerTokens(owner.clone()), &tokens);
}

pub fn remove_owner_token(env: &Env, owner: &Address, token_id: u64) {
    let mut tokens = get_owner_tokens(env, owner);
    if let Some(index) = tokens.first_index_of(token_id) {
        tokens.remove(index);
    }
    write(env, &DataKey::OwnerTokens(owner.clone()), &tokens);
}

pub fn adjust_supply(env: &Env, delta: i64) -> Result<u64, ContractError> {
    let supply: u64 = env
        .storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0u64);
    let updated = supply
        .checked_add_signed(delta)
        .ok_or(ContractError::Overflow)?;
    env.storage().instance().set(&DataKey::TotalSupply, &updated);
    extend_instance(env);
    Ok(updated)
}
