use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{ReservationCategory, SaleStatus, SaleTimings, StageConfig};

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod staged_crowdsale {
    use super::*;

    // ============ Asset Registry ============

    /// Create the registry, its mint and token metadata
    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        total_supply_max: u64,
        metadata: TokenMetadataParams,
    ) -> Result<()> {
        instructions::initialize_registry::handler(ctx, total_supply_max, metadata)
    }

    /// Issue units as the current issuance authority
    pub fn issue(ctx: Context<Issue>, amount: u64) -> Result<()> {
        instructions::registry::issue_handler(ctx, amount)
    }

    /// Permanently disable issuance
    pub fn lock_issuance(ctx: Context<LockIssuance>) -> Result<()> {
        instructions::registry::lock_issuance_handler(ctx)
    }

    /// Hand issuance control to a new identity (the sale PDA at bootstrap)
    pub fn transfer_issuance_authority(
        ctx: Context<TransferIssuanceAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::registry::transfer_issuance_authority_handler(ctx, new_authority)
    }

    // ============ Sale Lifecycle ============

    /// Create the sale engine for a registry
    pub fn create_sale(ctx: Context<CreateSale>, params: CreateSaleParams) -> Result<()> {
        instructions::create_sale::handler(ctx, params)
    }

    /// Buy tokens with SOL during an open stage
    pub fn purchase(
        ctx: Context<Purchase>,
        amount: u64,
        destination_override: Option<Pubkey>,
    ) -> Result<()> {
        instructions::purchase::handler(ctx, amount, destination_override)
    }

    /// Administrator issuance outside the purchase rules
    pub fn manual_issue(ctx: Context<SaleIssue>, amount: u64) -> Result<()> {
        instructions::manual_issue::handler(ctx, amount)
    }

    /// Close the sale and settle funds (once, after closing)
    pub fn finalize(ctx: Context<Finalize>) -> Result<()> {
        instructions::finalize::handler(ctx)
    }

    /// Refund an investor of a sale that missed its goal
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::claim_refund::handler(ctx)
    }

    /// Phase, rate and accounting snapshot
    pub fn sale_status(ctx: Context<SaleStatusView>) -> Result<SaleStatus> {
        instructions::sale_status::handler(ctx)
    }

    // ============ Whitelist ============

    pub fn add_to_whitelist(
        ctx: Context<AddToWhitelist>,
        source: Pubkey,
        destination: Pubkey,
    ) -> Result<()> {
        instructions::whitelist::add_handler(ctx, source, destination)
    }

    pub fn add_many_to_whitelist<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddManyToWhitelist<'info>>,
        sources: Vec<Pubkey>,
        destinations: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::whitelist::add_many_handler(ctx, sources, destinations)
    }

    pub fn remove_from_whitelist(ctx: Context<RemoveFromWhitelist>, source: Pubkey) -> Result<()> {
        instructions::whitelist::remove_handler(ctx, source)
    }

    // ============ Reservations ============

    pub fn transfer_team_reservation(ctx: Context<SaleIssue>) -> Result<()> {
        instructions::reservations::handler(ctx, ReservationCategory::Team)
    }

    pub fn transfer_bounty_reservation(ctx: Context<SaleIssue>) -> Result<()> {
        instructions::reservations::handler(ctx, ReservationCategory::Bounty)
    }

    pub fn transfer_development_reservation(ctx: Context<SaleIssue>) -> Result<()> {
        instructions::reservations::handler(ctx, ReservationCategory::Development)
    }

    pub fn transfer_sale_reservation(ctx: Context<SaleIssue>) -> Result<()> {
        instructions::reservations::handler(ctx, ReservationCategory::SaleCost)
    }

    // ============ Admin ============

    /// Move the sale window (before opening only)
    pub fn update_sale_timings(ctx: Context<UpdateSaleConfig>, timings: SaleTimings) -> Result<()> {
        instructions::admin::update_sale_timings_handler(ctx, timings)
    }

    /// Change a stage's pricing and limits (before that stage starts)
    pub fn update_stage_config(
        ctx: Context<UpdateSaleConfig>,
        stage: u8,
        config: StageConfig,
    ) -> Result<()> {
        instructions::admin::update_stage_config_handler(ctx, stage, config)
    }

    // ============ Vesting Guard ============

    pub fn initialize_vesting_guard(
        ctx: Context<InitializeVestingGuard>,
        vesting_times: [i64; 4],
    ) -> Result<()> {
        instructions::vesting::initialize_handler(ctx, vesting_times)
    }

    /// Compute the minimum-retained curve from the current vault balance
    pub fn calculate_vesting_portions(ctx: Context<CalculateVestingPortions>) -> Result<()> {
        instructions::vesting::calculate_portions_handler(ctx)
    }

    /// Replace milestone times; the curve stays attached by index
    pub fn update_vesting_times(
        ctx: Context<UpdateVestingTimes>,
        vesting_times: [i64; 4],
    ) -> Result<()> {
        instructions::vesting::update_times_handler(ctx, vesting_times)
    }

    /// Release vested units without crossing the active milestone's floor
    pub fn transfer_tokens(ctx: Context<TransferVestedTokens>, amount: u64) -> Result<()> {
        instructions::vesting::transfer_tokens_handler(ctx, amount)
    }
}
