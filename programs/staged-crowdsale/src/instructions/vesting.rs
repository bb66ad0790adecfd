use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use anchor_spl::associated_token::AssociatedToken;
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::{
    VestingGuardInitialized,
    VestingPortionsCalculated,
    VestingTimesUpdated,
    VestedTokensReleased,
};

// ============================================================
// INITIALIZE
// ============================================================

/// Create the vesting guard of a registry and its token vault.
/// The vault is the guard's associated token account, so the team
/// reservation can be sent to the guard PDA directly.
#[derive(Accounts)]
pub struct InitializeVestingGuard<'info> {
    #[account(
        mut,
        address = registry.creator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        seeds = [REGISTRY_SEED, registry.creator.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(address = registry.mint)]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = administrator,
        space = VestingGuard::LEN,
        seeds = [VESTING_GUARD_SEED, registry.key().as_ref()],
        bump
    )]
    pub guard: Box<Account<'info, VestingGuard>>,

    #[account(
        init_if_needed,
        payer = administrator,
        associated_token::mint = mint,
        associated_token::authority = guard
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<InitializeVestingGuard>,
    vesting_times: [i64; VESTING_MILESTONES],
) -> Result<()> {
    VestingGuard::validate_times(&vesting_times)?;

    let guard = &mut ctx.accounts.guard;
    guard.registry = ctx.accounts.registry.key();
    guard.mint = ctx.accounts.mint.key();
    guard.administrator = ctx.accounts.administrator.key();
    guard.vesting_times = vesting_times;
    guard.minimum_retained = [0; VESTING_MILESTONES];
    guard.portions_calculated = false;
    guard.vested_total = 0;
    guard.released_total = 0;
    guard.created_at = Clock::get()?.unix_timestamp;
    guard.bump = ctx.bumps.guard;

    emit!(VestingGuardInitialized {
        guard: guard.key(),
        vault: ctx.accounts.vault.key(),
        administrator: guard.administrator,
        vesting_times,
    });

    Ok(())
}

// ============================================================
// CURVE
// ============================================================

#[derive(Accounts)]
pub struct CalculateVestingPortions<'info> {
    #[account(
        address = guard.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_GUARD_SEED, guard.registry.as_ref()],
        bump = guard.bump
    )]
    pub guard: Box<Account<'info, VestingGuard>>,

    #[account(
        associated_token::mint = guard.mint,
        associated_token::authority = guard
    )]
    pub vault: Box<Account<'info, TokenAccount>>,
}

pub fn calculate_portions_handler(ctx: Context<CalculateVestingPortions>) -> Result<()> {
    let guard = &mut ctx.accounts.guard;
    guard.calculate_portions(ctx.accounts.vault.amount)?;

    emit!(VestingPortionsCalculated {
        guard: guard.key(),
        vested_total: guard.vested_total,
        minimum_retained: guard.minimum_retained,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateVestingTimes<'info> {
    #[account(
        address = guard.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_GUARD_SEED, guard.registry.as_ref()],
        bump = guard.bump
    )]
    pub guard: Box<Account<'info, VestingGuard>>,
}

pub fn update_times_handler(
    ctx: Context<UpdateVestingTimes>,
    vesting_times: [i64; VESTING_MILESTONES],
) -> Result<()> {
    let guard = &mut ctx.accounts.guard;
    guard.update_times(vesting_times)?;

    emit!(VestingTimesUpdated {
        guard: guard.key(),
        vesting_times,
    });

    Ok(())
}

// ============================================================
// RELEASE
// ============================================================

#[derive(Accounts)]
pub struct TransferVestedTokens<'info> {
    #[account(
        address = guard.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        mut,
        seeds = [VESTING_GUARD_SEED, guard.registry.as_ref()],
        bump = guard.bump
    )]
    pub guard: Box<Account<'info, VestingGuard>>,

    #[account(
        mut,
        associated_token::mint = guard.mint,
        associated_token::authority = guard
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = guard.mint
    )]
    pub to: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn transfer_tokens_handler(ctx: Context<TransferVestedTokens>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let guard = &mut ctx.accounts.guard;
    let held = ctx.accounts.vault.amount;

    guard.record_release(held, amount, now)?;
    let milestone = guard
        .active_milestone(now)
        .ok_or(SaleError::BeforeFirstMilestone)? as u8;

    let registry = guard.registry;
    let seeds = &[
        VESTING_GUARD_SEED,
        registry.as_ref(),
        &[guard.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    emit!(VestedTokensReleased {
        guard: guard.key(),
        to: ctx.accounts.to.owner,
        amount,
        remaining: held - amount,
        milestone,
    });

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.to.to_account_info(),
                authority: guard.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}
