//! Vehicle registry: registration, owner updates and verifier decisions.

use soroban_sdk::{Address, Env, String, Symbol};

use shared::constants::{MAX_MAKE_MODEL_LENGTH, MAX_REG_PLATE_LENGTH};
use shared::{
    current_year, validate_profile, validate_string_length, ContractError, VehicleTier,
    VerificationStatus,
};

use crate::interfaces::{call_result, risk_assessment};
use crate::storage;
use crate::types::{Vehicle, VehicleRegistration};

pub fn register(
    env: &Env,
    owner: &Address,
    registration: VehicleRegistration,
) -> Result<Vehicle, ContractError> {
    validate_string_length(&registration.reg_plate, MAX_REG_PLATE_LENGTH)?;
    validate_string_length(&registration.make, MAX_MAKE_MODEL_LENGTH)?;
    validate_string_length(&registration.model, MAX_MAKE_MODEL_LENGTH)?;

    if storage::has_vehicle(env, &registration.reg_plate) {
        return Err(ContractError::VehicleAlreadyRegistered);
    }

    let now = env.ledger().timestamp();
    let vehicle = Vehicle {
        reg_plate: registration.reg_plate,
        owner: owner.clone(),
        make: registration.make,
        model: registration.model,
        year: registration.year,
        base_value: registration.base_value,
        mileage: registration.mileage,
        condition: registration.condition,
        has_accident_history: registration.has_accident_history,
        status: VerificationStatus::Pending,
        tier: VehicleTier::Basic,
        risk_score: 0,
        registered_at: now,
        verified_at: None,
        active_policy: None,
    };
    validate_profile(&vehicle.profile(), current_year(now))?;

    storage::set_vehicle(env, &vehicle);
    storage::add_owner_vehicle(env, owner, &vehicle.reg_plate);

    env.events().publish(
        (Symbol::new(env, "vehicle_registered"), vehicle.reg_plate.clone()),
        owner.clone(),
    );

    Ok(vehicle)
}

/// Record a new inspection reading. The vehicle goes back to Pending and
/// must be re-verified before a new policy can be written on it.
pub fn update(
    env: &Env,
    owner: &Address,
    reg_plate: &String,
    mileage: u64,
    condition: u32,
    has_accident_history: bool,
) -> Result<Vehicle, ContractError> {
    let mut vehicle = storage::get_vehicle(env, reg_plate)?;
    require_owner(&vehicle, owner)?;

    if mileage < vehicle.mileage {
        return Err(ContractError::MileageDecreased);
    }

    vehicle.mileage = mileage;
    vehicle.condition = condition;
    // accident history is never cleared
    vehicle.has_accident_history = vehicle.has_accident_history || has_accident_history;
    validate_profile(&vehicle.profile(), current_year(env.ledger().timestamp()))?;

    vehicle.status = VerificationStatus::Pending;
    vehicle.verified_at = None;
    storage::set_vehicle(env, &vehicle);

    env.events().publish(
        (Symbol::new(env, "vehicle_updated"), reg_plate.clone()),
        (mileage, condition, vehicle.has_accident_history),
    );

    Ok(vehicle)
}

pub fn verify(env: &Env, verifier: &Address, reg_plate: &String) -> Result<Vehicle, ContractError> {
    let mut vehicle = storage::get_vehicle(env, reg_plate)?;
    require_pending(&vehicle)?;

    let config = storage::get_config(env)?;
    let risk = risk_assessment(env, &config)?;
    let assessment = call_result(risk.try_assess(&vehicle.profile()))?;

    vehicle.risk_score = assessment.risk_score;
    vehicle.tier = assessment.tier;
    vehicle.status = VerificationStatus::Verified;
    vehicle.verified_at = Some(env.ledger().timestamp());
    storage::set_vehicle(env, &vehicle);

    env.events().publish(
        (Symbol::new(env, "vehicle_verified"), reg_plate.clone()),
        (verifier.clone(), assessment.risk_score, assessment.tier),
    );

    Ok(vehicle)
}

pub fn reject(env: &Env, verifier: &Address, reg_plate: &String) -> Result<Vehicle, ContractError> {
    let mut vehicle = storage::get_vehicle(env, reg_plate)?;
    require_pending(&vehicle)?;

    vehicle.status = VerificationStatus::Rejected;
    storage::set_vehicle(env, &vehicle);

    env.events().publish(
        (Symbol::new(env, "vehicle_rejected"), reg_plate.clone()),
        verifier.clone(),
    );

    Ok(vehicle)
}

pub fn require_owner(vehicle: &Vehicle, caller: &Address) -> Result<(), ContractError> {
    if &vehicle.owner != caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn require_pending(vehicle: &Vehicle) -> Result<(), ContractError> {
    if vehicle.status != VerificationStatus::Pending {
        return Err(ContractError::InvalidVerificationState);
    }
    Ok(())
}
