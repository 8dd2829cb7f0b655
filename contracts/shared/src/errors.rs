//! Common error types for the vehicle insurance contracts
//!
//! A single set of error codes shared by every contract in the workspace so
//! that a failed invocation reads the same regardless of which contract
//! raised it.

use soroban_sdk::contracterror;

/// Error type for all vehicle insurance contracts
///
/// Error ranges are organized by category:
/// - 1-19: General/Authorization errors
/// - 20-39: Vehicle-specific errors
/// - 40-59: Policy-specific errors
/// - 60-79: Claim-specific errors
/// - 80-99: Risk assessment and policy token errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ===== General/Authorization Errors (1-19) =====
    /// Caller is not authorized to perform this action
    Unauthorized = 1,

    /// Contract is paused and operations are not allowed
    Paused = 2,

    /// Invalid input provided
    InvalidInput = 3,

    /// Insufficient funds for operation
    InsufficientFunds = 4,

    /// Requested resource not found
    NotFound = 5,

    /// Contract not initialized
    NotInitialized = 6,

    /// Contract already initialized
    AlreadyInitialized = 7,

    /// Arithmetic overflow occurred
    Overflow = 8,

    /// Division by zero
    DivisionByZero = 9,

    /// Invalid role or permission
    InvalidRole = 10,

    /// Contract not trusted for cross-contract calls
    NotTrustedContract = 11,

    /// String field empty or too long
    InvalidLength = 12,

    /// A cross-contract call failed without a typed error
    ExternalCallFailed = 13,

    // ===== Vehicle-Specific Errors (20-39) =====
    VehicleNotFound = 20,

    VehicleAlreadyRegistered = 21,

    /// Vehicle is not verified
    VehicleNotVerified = 22,

    /// Verification requested for a vehicle that is not pending
    InvalidVerificationState = 23,

    /// Condition outside 1..=10
    InvalidCondition = 24,

    /// Model year before 1900 or after the current year
    InvalidVehicleYear = 25,

    /// Odometer reading went backwards
    MileageDecreased = 26,

    // ===== Policy-Specific Errors (40-59) =====
    PolicyNotFound = 40,

    /// Policy is not active or its term has ended
    PolicyNotActive = 41,

    /// Coverage amount out of allowed bounds
    InvalidCoverageAmount = 42,

    /// Policy duration out of allowed bounds
    InvalidDuration = 43,

    /// State transition is not allowed
    InvalidStateTransition = 44,

    /// Vehicle already carries an active policy
    ActivePolicyExists = 45,

    /// Policy term has not ended yet
    PolicyNotExpired = 46,

    /// Policy still has claims waiting for a decision
    PendingClaimsExist = 47,

    // ===== Claim-Specific Errors (60-79) =====
    ClaimNotFound = 60,

    ClaimAlreadyProcessed = 61,

    /// Claim amount exceeds the remaining coverage
    ClaimAmountExceedsCoverage = 62,

    /// Policy coverage has been fully paid out
    CoverageExhausted = 63,

    EvidenceAlreadyExists = 64,

    EvidenceNotFound = 65,

    // ===== Risk / Token Errors (80-99) =====
    /// Tier coefficients or thresholds rejected
    InvalidRiskConfig = 80,

    TokenNotFound = 81,

    TokenAlreadyExists = 82,

    /// Caller is neither the token owner nor approved
    NotTokenOwner = 83,
}

/// Detailed error message provider
impl ContractError {
    /// Get a human-readable description of the error
    pub fn message(&self) -> &str {
        match self {
            // General/Authorization
            ContractError::Unauthorized => "Caller is not authorized",
            ContractError::Paused => "Contract is paused",
            ContractError::InvalidInput => "Invalid input provided",
            ContractError::InsufficientFunds => "Insufficient funds",
            ContractError::NotFound => "Resource not found",
            ContractError::NotInitialized => "Contract not initialized",
            ContractError::AlreadyInitialized => "Contract already initialized",
            ContractError::Overflow => "Arithmetic overflow",
            ContractError::DivisionByZero => "Division by zero",
            ContractError::InvalidRole => "Invalid role",
            ContractError::NotTrustedContract => "Contract not trusted",
            ContractError::InvalidLength => "Invalid string length",
            ContractError::ExternalCallFailed => "Cross-contract call failed",

            // Vehicle-Specific
            ContractError::VehicleNotFound => "Vehicle not found",
            ContractError::VehicleAlreadyRegistered => "Vehicle already registered",
            ContractError::VehicleNotVerified => "Vehicle not verified",
            ContractError::InvalidVerificationState => "Vehicle is not pending verification",
            ContractError::InvalidCondition => "Condition must be between 1 and 10",
            ContractError::InvalidVehicleYear => "Invalid vehicle year",
            ContractError::MileageDecreased => "Mileage cannot decrease",

            // Policy-Specific
            ContractError::PolicyNotFound => "Policy not found",
            ContractError::PolicyNotActive => "Policy not active",
            ContractError::InvalidCoverageAmount => "Invalid coverage amount",
            ContractError::InvalidDuration => "Invalid policy duration",
            ContractError::InvalidStateTransition => "Invalid state transition",
            ContractError::ActivePolicyExists => "Vehicle already has an active policy",
            ContractError::PolicyNotExpired => "Policy term has not ended",
            ContractError::PendingClaimsExist => "Policy has pending claims",

            // Claim-Specific
            ContractError::ClaimNotFound => "Claim not found",
            ContractError::ClaimAlreadyProcessed => "Claim already processed",
            ContractError::ClaimAmountExceedsCoverage => "Claim exceeds remaining coverage",
            ContractError::CoverageExhausted => "Policy coverage exhausted",
            ContractError::EvidenceAlreadyExists => "Evidence already exists",
            ContractError::EvidenceNotFound => "Evidence not found",

            // Risk / Token
            ContractError::InvalidRiskConfig => "Invalid risk configuration",
            ContractError::TokenNotFound => "Policy token not found",
            ContractError::TokenAlreadyExists => "Policy token already exists",
            ContractError::NotTokenOwner => "Caller does not own the policy token",
        }
    }
}
