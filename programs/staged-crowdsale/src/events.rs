use anchor_lang::prelude::*;
use crate::state::{SaleTimings, StageConfig};

// ============================================================
// REGISTRY EVENTS
// ============================================================

#[event]
pub struct RegistryInitialized {
    pub registry: Pubkey,
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub total_supply_max: u64,
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

#[event]
pub struct Issued {
    pub registry: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
    pub remaining_supply: u64,
}

#[event]
pub struct IssuanceLocked {
    pub registry: Pubkey,
    pub total_supply: u64,
    pub locked_at: i64,
}

#[event]
pub struct IssuanceAuthorityTransferred {
    pub registry: Pubkey,
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
}

// ============================================================
// SALE LIFECYCLE EVENTS
// ============================================================

#[event]
pub struct SaleCreated {
    pub sale: Pubkey,
    pub registry: Pubkey,
    pub administrator: Pubkey,
    pub beneficiary: Pubkey,
    pub timings: SaleTimings,
    pub hard_cap: u64,
    pub goal: u64,
}

#[event]
pub struct SaleConfigUpdated {
    pub sale: Pubkey,
    pub timings: SaleTimings,
    pub stage_one: StageConfig,
    pub stage_two: StageConfig,
}

#[event]
pub struct Finalized {
    pub sale: Pubkey,
    pub amount_raised: u64,
    pub goal_reached: bool,
    pub swept: u64,
    pub finalized_at: i64,
}

// ============================================================
// PURCHASE EVENTS
// ============================================================

#[event]
pub struct TokensPurchased {
    pub sale: Pubkey,
    pub payer: Pubkey,
    pub destination: Pubkey,
    pub stage: u8,
    pub amount: u64,
    pub units: u64,
    pub amount_raised: u64,
}

#[event]
pub struct FundsSwept {
    pub sale: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub total_swept: u64,
}

#[event]
pub struct ManualIssued {
    pub sale: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RefundClaimed {
    pub sale: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
    pub held_balance: u64,
}

// ============================================================
// WHITELIST EVENTS
// ============================================================

#[event]
pub struct WhitelistUpdated {
    pub sale: Pubkey,
    pub source: Pubkey,
    /// Null when the source was removed
    pub destination: Pubkey,
}

// ============================================================
// RESERVATION EVENTS
// ============================================================

#[event]
pub struct TeamReserveTransferred {
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct BountyReserveTransferred {
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DevelopmentReserveTransferred {
    pub recipient: Pubkey,
    pub amount: u64,
}

#[event]
pub struct SaleReserveTransferred {
    pub recipient: Pubkey,
    pub amount: u64,
}

// ============================================================
// VESTING EVENTS
// ============================================================

#[event]
pub struct VestingGuardInitialized {
    pub guard: Pubkey,
    pub vault: Pubkey,
    pub administrator: Pubkey,
    pub vesting_times: [i64; 4],
}

#[event]
pub struct VestingPortionsCalculated {
    pub guard: Pubkey,
    pub vested_total: u64,
    pub minimum_retained: [u64; 4],
}

#[event]
pub struct VestingTimesUpdated {
    pub guard: Pubkey,
    pub vesting_times: [i64; 4],
}

#[event]
pub struct VestedTokensReleased {
    pub guard: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub milestone: u8,
}
