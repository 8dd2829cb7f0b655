#![no_std]
//! Policy NFT contract.
//!
//! One non-fungible token per issued policy; the token id is the policy id.
//! Holding the token is what entitles an address to claim against the
//! policy, so transfers move the claim rights with them. Only the configured
//! minter (the insurance core) may mint or burn.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol, Vec};

use shared::{ContractError, PolicyTokenMetadata};
use vehicle_insurance::authorization::{get_admin, initialize_admin, require_admin};

mod storage;

#[contract]
pub struct PolicyNftContract;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Minter,
    TokenName,
    TokenSymbol,
    TotalSupply,
    Owner(u64),
    Metadata(u64),
    Approved(u64),
    OwnerTokens(Address),
}

fn require_minter(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let minter = storage::get_minter(env)?;
    if &minter != caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn do_transfer(
    env: &Env,
    from: &Address,
    to: &Address,
    token_id: u64,
) -> Result<(), ContractError> {
    let owner = storage::get_owner(env, token_id)?;
    if &owner != from {
        return Err(ContractError::NotTokenOwner);
    }

    storage::remove_owner_token(env, from, token_id);
    storage::add_owner_token(env, to, token_id);
    storage::set_owner(env, token_id, to);
    storage::clear_approved(env, token_id);
    storage::extend_instance(env);

    env.events().publish(
        (Symbol::new(env, "transfer"), token_id),
        (from.clone(), to.clone()),
    );

    Ok(())
}

#[contractimpl]
impl PolicyNftContract {
    pub fn initialize(env: Env, admin: Address, minter: Address) -> Result<(), ContractError> {
        if get_admin(&env).is_some() {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();
        initialize_admin(&env, admin.clone());

        storage::set_minter(&env, &minter);
        env.storage()
            .instance()
            .set(&DataKey::TokenName, &String::from_str(&env, "Vehicle Insurance Policy"));
        env.storage()
            .instance()
            .set(&DataKey::TokenSymbol, &String::from_str(&env, "VIP"));
        env.storage().instance().set(&DataKey::TotalSupply, &0u64);

        env.events()
            .publish((Symbol::new(&env, "initialized"), ()), (admin, minter));

        Ok(())
    }

    pub fn set_minter(env: Env, admin: Address, minter: Address) -> Result<(), ContractError> {
        admin.require_auth();
        require_admin(&env, &admin)?;

        storage::set_minter(&env, &minter);

        env.events()
            .publish((Symbol::new(&env, "minter_updated"), ()), minter);

        Ok(())
    }

    /// Mint the token for a newly issued policy
    pub fn mint(
        env: Env,
        minter: Address,
        to: Address,
        metadata: PolicyTokenMetadata,
    ) -> Result<u64, ContractError> {
        minter.require_auth();
        require_minter(&env, &minter)?;

        let token_id = metadata.policy_id;
        if storage::has_token(&env, token_id) {
            return Err(ContractError::TokenAlreadyExists);
        }

        storage::set_owner(&env, token_id, &to);
        storage::set_metadata(&env, token_id, &metadata);
        storage::add_owner_token(&env, &to, token_id);
        storage::adjust_supply(&env, 1)?;

        env.events()
            .publish((Symbol::new(&env, "minted"), token_id), to);

        Ok(token_id)
    }

    /// Burn the token of a cancelled policy
    pub fn burn(env: Env, minter: Address, token_id: u64) -> Result<(), ContractError> {
        minter.require_auth();
        require_minter(&env, &minter)?;

        let owner = storage::get_owner(&env, token_id)?;
        storage::remove_owner_token(&env, &owner, token_id);
        storage::remove_token(&env, token_id);
        storage::adjust_supply(&env, -1)?;

        env.events()
            .publish((Symbol::new(&env, "burned"), token_id), owner);

        Ok(())
    }

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), ContractError> {
        from.require_auth();
        do_transfer(&env, &from, &to, token_id)
    }

    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        token_id: u64,
    ) -> Result<(), ContractError> {
        owner.require_auth();

        if storage::get_owner(&env, token_id)? != owner {
            return Err(ContractError::NotTokenOwner);
        }
        storage::set_approved(&env, token_id, &spender);
        storage::extend_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "approval"), token_id), (owner, spender));

        Ok(())
    }

    pub fn get_approved(env: Env, token_id: u64) -> Option<Address> {
        storage::get_approved(&env, token_id)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), ContractError> {
        spender.require_auth();

        if storage::get_approved(&env, token_id) != Some(spender) {
            return Err(ContractError::NotTokenOwner);
        }
        do_transfer(&env, &from, &to, token_id)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, ContractError> {
        storage::get_owner(&env, token_id)
    }

    pub fn exists(env: Env, token_id: u64) -> bool {
        storage::has_token(&env, token_id)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        storage::get_owner_tokens(&env, &owner).len()
    }

    pub fn tokens_of_owner(env: Env, owner: Address) -> Vec<u64> {
        storage::get_owner_tokens(&env, &owner)
    }

    pub fn token_metadata(env: Env, token_id: u64) -> Result<PolicyTokenMetadata, ContractError> {
        storage::get_metadata(&env, token_id)
    }

    pub fn total_supply(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0u64)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::TokenName)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::TokenSymbol)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_minter(env: Env) -> Result<Address, ContractError> {
        storage::get_minter(&env)
    }
}

#[cfg(test)]
mod test;
