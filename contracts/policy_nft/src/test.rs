#![cfg(test)]

use super::*;
use shared::VehicleTier;
use soroban_sdk::testutils::Address as _;

struct Setup {
    env: Env,
    client: PolicyNftContractClient<'static>,
    admin: Address,
    minter: Address,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(PolicyNftContract, ());
    let client = PolicyNftContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let minter = Address::generate(&env);
    client.initialize(&admin, &minter);

    Setup {
        env,
        client,
        admin,
        minter,
    }
}

fn metadata(env: &Env, policy_id: u64) -> PolicyTokenMetadata {
    PolicyTokenMetadata {
        policy_id,
        reg_plate: String::from_str(env, "KA01AB1234"),
        tier: VehicleTier::Medium,
        coverage: 30_000_000,
        end_time: 1_000_000,
    }
}

#[test]
fn test_initialize() {
    let s = setup();
    assert_eq!(s.client.name(), String::from_str(&s.env, "Vehicle Insurance Policy"));
    assert_eq!(s.client.symbol(), String::from_str(&s.env, "VIP"));
    assert_eq!(s.client.get_minter(), s.minter);
    assert_eq!(s.client.total_supply(), 0);
    assert_eq!(
        s.client.try_initialize(&s.admin, &s.minter),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_mint_and_query() {
    let s = setup();
    let holder = Address::generate(&s.env);

    let token_id = s.client.mint(&s.minter, &holder, &metadata(&s.env, 7));
    assert_eq!(token_id, 7);
    assert_eq!(s.client.owner_of(&7), holder);
    assert_eq!(s.client.balance_of(&holder), 1);
    assert_eq!(s.client.tokens_of_owner(&holder).get(0), Some(7));
    assert_eq!(s.client.token_metadata(&7), metadata(&s.env, 7));
    assert_eq!(s.client.total_supply(), 1);
    assert!(s.client.exists(&7));
}

#[test]
fn test_only_minter_can_mint() {
    let s = setup();
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.client.try_mint(&stranger, &stranger, &metadata(&s.env, 1)),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_duplicate_mint_rejected() {
    let s = setup();
    let holder = Address::generate(&s.env);

    s.client.mint(&s.minter, &holder, &metadata(&s.env, 1));
    assert_eq!(
        s.client.try_mint(&s.minter, &holder, &metadata(&s.env, 1)),
        Err(Ok(ContractError::TokenAlreadyExists))
    );
}

#[test]
fn test_transfer_moves_ownership() {
    let s = setup();
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);

    s.client.mint(&s.minter, &alice, &metadata(&s.env, 1));
    s.client.transfer(&alice, &bob, &1);

    assert_eq!(s.client.owner_of(&1), bob);
    assert_eq!(s.client.balance_of(&alice), 0);
    assert_eq!(s.client.balance_of(&bob), 1);

    assert_eq!(
        s.client.try_transfer(&alice, &bob, &1),
        Err(Ok(ContractError::NotTokenOwner))
    );
}

#[test]
fn test_approved_spender_can_transfer_once() {
    let s = setup();
    let alice = Address::generate(&s.env);
    let broker = Address::generate(&s.env);
    let bob = Address::generate(&s.env);

    s.client.mint(&s.minter, &alice, &metadata(&s.env, 1));
    s.client.approve(&alice, &broker, &1);
    assert_eq!(s.client.get_approved(&1), Some(broker.clone()));

    s.client.transfer_from(&broker, &alice, &bob, &1);
    assert_eq!(s.client.owner_of(&1), bob);
    assert_eq!(s.client.get_approved(&1), None);

    assert_eq!(
        s.client.try_transfer_from(&broker, &bob, &alice, &1),
        Err(Ok(ContractError::NotTokenOwner))
    );
}

#[test]
fn test_burn() {
    let s = setup();
    let holder = Address::generate(&s.env);

    s.client.mint(&s.minter, &holder, &metadata(&s.env, 3));
    s.client.burn(&s.minter, &3);

    assert!(!s.client.exists(&3));
    assert_eq!(s.client.balance_of(&holder), 0);
    assert_eq!(s.client.total_supply(), 0);
    assert_eq!(s.client.try_owner_of(&3), Err(Ok(ContractError::TokenNotFound)));
}

#[test]
fn test_admin_rotates_minter() {
    let s = setup();
    let new_minter = Address::generate(&s.env);
    let holder = Address::generate(&s.env);

    s.client.set_minter(&s.admin, &new_minter);
    assert_eq!(
        s.client.try_mint(&s.minter, &holder, &metadata(&s.env, 1)),
        Err(Ok(ContractError::Unauthorized))
    );
    s.client.mint(&new_minter, &holder, &metadata(&s.env, 1));
}
