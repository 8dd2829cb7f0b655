use soroban_sdk::{contracttype, Address, BytesN, String};

use shared::{ClaimStatus, PolicyState, VehicleProfile, VehicleTier, VerificationStatus};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Vehicle(String),
    OwnerVehicles(Address),
    VehiclePolicies(String),
    Policy(u64),
    PolicyHistory(u64),
    PolicyClaims(u64),
    Claim(u64),
}

/// Addresses of the contracts the core depends on
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreConfig {
    /// Token premiums are paid in and claims are paid out in
    pub payment_token: Address,
    pub risk_assessment: Address,
    pub policy_nft: Address,
}

/// Vehicle registration request
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VehicleRegistration {
    pub reg_plate: String,
    pub make: String,
    pub model: String,
    pub year: u32,
    /// Insured base value in stroops
    pub base_value: i128,
    /// Odometer reading in kilometres
    pub mileage: u64,
    /// Condition rating, 1 (poor) to 10 (mint)
    pub condition: u32,
    pub has_accident_history: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vehicle {
    pub reg_plate: String,
    pub owner: Address,
    pub make: String,
    pub model: String,
    pub year: u32,
    pub base_value: i128,
    pub mileage: u64,
    pub condition: u32,
    pub has_accident_history: bool,
    pub status: VerificationStatus,
    /// Basic until the vehicle has been assessed
    pub tier: VehicleTier,
    pub risk_score: u32,
    pub registered_at: u64,
    pub verified_at: Option<u64>,
    pub active_policy: Option<u64>,
}

impl Vehicle {
    pub fn profile(&self) -> VehicleProfile {
        VehicleProfile {
            year: self.year,
            base_value: self.base_value,
            mileage: self.mileage,
            condition: self.condition,
            has_accident_history: self.has_accident_history,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.status, VerificationStatus::Verified)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    pub id: u64,
    pub reg_plate: String,
    /// Address the policy was issued to; claim rights follow the policy token
    pub holder: Address,
    pub coverage: i128,
    pub premium: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub tier: VehicleTier,
    pub state: PolicyState,
    /// Total paid out against this policy
    pub claimed_amount: i128,
    pub pending_claims: u32,
}

impl Policy {
    /// Active in state and still within its term
    pub fn is_active_at(&self, now: u64) -> bool {
        matches!(self.state, PolicyState::Active) && now < self.end_time
    }

    pub fn remaining_coverage(&self) -> i128 {
        self.coverage.saturating_sub(self.claimed_amount).max(0)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyStatusHistory {
    pub policy_id: u64,
    pub previous_state: PolicyState,
    pub new_state: PolicyState,
    pub actor: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub id: u64,
    pub policy_id: u64,
    pub claimant: Address,
    pub description: String,
    /// SHA-256 of the damage photo
    pub photo_hash: BytesN<32>,
    pub amount: i128,
    /// Amount actually transferred; zero unless paid
    pub payout: i128,
    pub status: ClaimStatus,
    pub submitted_at: u64,
    pub processed_at: Option<u64>,
    pub processor: Option<Address>,
}

impl Claim {
    pub fn is_processed(&self) -> bool {
        self.status.is_processed()
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_paid()
    }
}
