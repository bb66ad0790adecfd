use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::SaleCreated;

/// Parameters for creating the sale engine
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct CreateSaleParams {
    /// Receives released funds
    pub beneficiary: Pubkey,
    pub timings: SaleTimings,
    /// [stage one, stage two]
    pub stages: [StageConfig; 2],
    /// Maximum aggregate raise in lamports
    pub hard_cap: u64,
    /// Minimum raise to release funds instead of refunding
    pub goal: u64,
}

impl CreateSaleParams {
    pub fn validate(&self, now: i64) -> Result<()> {
        require_keys_neq!(self.beneficiary, Pubkey::default(), SaleError::ZeroAddress);
        self.timings.validate(now)?;
        for stage in &self.stages {
            stage.validate()?;
        }
        SaleState::validate_caps(self.hard_cap, self.goal)
    }

    /// Deployment defaults with the given beneficiary and timings
    pub fn with_defaults(beneficiary: Pubkey, timings: SaleTimings) -> Self {
        Self {
            beneficiary,
            timings,
            stages: default_stages(),
            hard_cap: DEFAULT_HARD_CAP,
            goal: DEFAULT_GOAL,
        }
    }
}

/// Create the sale engine for a registry.
/// Must be called by the registry's current authority, which then hands
/// issuance over to the sale PDA with `transfer_issuance_authority`.
#[derive(Accounts)]
pub struct CreateSale<'info> {
    #[account(
        mut,
        address = registry.authority @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        seeds = [REGISTRY_SEED, registry.creator.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        init,
        payer = administrator,
        space = SaleState::LEN,
        seeds = [SALE_SEED, registry.key().as_ref()],
        bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    /// SOL vault holding escrowed deposits
    /// CHECK: PDA that holds SOL
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, sale.key().as_ref()],
        bump
    )]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateSale>, params: CreateSaleParams) -> Result<()> {
    let clock = Clock::get()?;
    params.validate(clock.unix_timestamp)?;

    let sale = &mut ctx.accounts.sale;
    let registry = &ctx.accounts.registry;

    sale.registry = registry.key();
    sale.mint = registry.mint;
    sale.administrator = ctx.accounts.administrator.key();
    sale.beneficiary = params.beneficiary;
    sale.timings = params.timings;
    sale.stages = params.stages;
    sale.hard_cap = params.hard_cap;
    sale.goal = params.goal;
    sale.reservations = default_reservations();
    sale.amount_raised = 0;
    sale.held_balance = 0;
    sale.total_swept = 0;
    sale.investor_count = 0;
    sale.finalized = false;
    sale.goal_reached_at_finalize = false;
    sale.created_at = clock.unix_timestamp;
    sale.finalized_at = 0;
    sale.bump = ctx.bumps.sale;
    sale.vault_bump = ctx.bumps.sol_vault;

    // Fund the vault's rent-exempt reserve so custody never dips below it
    let min_rent = Rent::get()?.minimum_balance(0);
    let shortfall = min_rent.saturating_sub(ctx.accounts.sol_vault.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.administrator.to_account_info(),
                    to: ctx.accounts.sol_vault.to_account_info(),
                },
            ),
            shortfall,
        )?;
    }

    emit!(SaleCreated {
        sale: sale.key(),
        registry: sale.registry,
        administrator: sale.administrator,
        beneficiary: sale.beneficiary,
        timings: sale.timings,
        hard_cap: sale.hard_cap,
        goal: sale.goal,
    });

    Ok(())
}
