//! Common types and data structures for the vehicle insurance contracts
//!
//! This module defines the enums and structs that cross contract boundaries:
//! the risk profile the core sends to the risk assessment contract, the
//! tier tables it gets back, and the lifecycle enums of policies and claims.

use soroban_sdk::{contracttype, String};

// ===== Vehicle Types =====

/// Risk category of a vehicle.
///
/// Determines the coverage ceiling and the multipliers used when pricing
/// a policy.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VehicleTier {
    Basic = 0,
    Medium = 1,
    Premium = 2,
}

/// Verification status of a registered vehicle
///
/// # Transitions
/// - `Pending` → `Verified` or `Rejected`
/// - `Verified` / `Rejected` → `Pending` when the owner updates the vehicle
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VerificationStatus {
    Pending = 0,
    Verified = 1,
    Rejected = 2,
}

/// The risk-relevant subset of a vehicle record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VehicleProfile {
    /// Model year
    pub year: u32,
    /// Insured base value in stroops
    pub base_value: i128,
    /// Odometer reading in kilometres
    pub mileage: u64,
    /// Condition rating, 1 (poor) to 10 (mint)
    pub condition: u32,
    pub has_accident_history: bool,
}

/// Output of a risk assessment
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RiskAssessment {
    /// Score in 0..=100, higher is riskier
    pub risk_score: u32,
    pub tier: VehicleTier,
}

/// Per-tier pricing coefficients, all in basis points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierCoefficients {
    /// Multiplier applied to the annual base rate
    pub tier_multiplier_bps: u32,
    /// Added to the risk adjustment per year of vehicle age
    pub age_multiplier_bps: u32,
    /// Added per full 10,000 km on the odometer
    pub mileage_multiplier_bps: u32,
    /// Added per condition point below 10
    pub condition_multiplier_bps: u32,
    /// Added once when the vehicle has an accident history
    pub accident_penalty_bps: u32,
    /// Largest coverage a policy in this tier may carry
    pub max_coverage: i128,
}

// ===== Status Enums =====

/// Represents the lifecycle state of a policy
///
/// # Transitions
/// - `Active` → `Expired` or `Cancelled`
/// - `Expired` → Terminal (no further transitions)
/// - `Cancelled` → Terminal (no further transitions)
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PolicyState {
    Active = 0,
    Expired = 1,
    Cancelled = 2,
}

impl PolicyState {
    pub fn can_transition_to(self, next: PolicyState) -> bool {
        matches!(
            (self, next),
            (PolicyState::Active, PolicyState::Expired)
                | (PolicyState::Active, PolicyState::Cancelled)
        )
    }
}

/// Represents the lifecycle status of a claim
///
/// # Transitions
/// - `Pending` → `Approved`, `Rejected`
/// - `Approved` → `Paid`
/// - `Rejected` → Terminal (no further transitions)
/// - `Paid` → Terminal (no further transitions)
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ClaimStatus {
    /// Submitted and waiting for a claim processor
    Pending = 0,

    /// Approved, payout not yet transferred
    Approved = 1,

    /// Rejected by a claim processor
    Rejected = 2,

    /// Payout transferred to the claimant
    Paid = 3,
}

impl ClaimStatus {
    pub fn can_transition_to(self, next: ClaimStatus) -> bool {
        matches!(
            (self, next),
            (ClaimStatus::Pending, ClaimStatus::Approved)
                | (ClaimStatus::Pending, ClaimStatus::Rejected)
                | (ClaimStatus::Approved, ClaimStatus::Paid)
        )
    }

    pub fn is_processed(self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }

    pub fn is_paid(self) -> bool {
        matches!(self, ClaimStatus::Paid)
    }
}

// ===== NFT Types =====

/// Metadata attached to a policy token
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyTokenMetadata {
    /// Token id; always equal to the policy id
    pub policy_id: u64,
    pub reg_plate: String,
    pub tier: VehicleTier,
    pub coverage: i128,
    pub end_time: u64,
}
