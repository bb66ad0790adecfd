use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::{Finalized, FundsSwept};
use super::registry::lock_units;
use super::sol_vault::release_from_vault;

/// Close out the sale after `closing`: stop issuance for good, then either
/// release remaining custody or arm refunds
#[derive(Accounts)]
pub struct Finalize<'info> {
    #[account(
        address = sale.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    #[account(
        mut,
        address = sale.registry
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        mut,
        address = sale.mint
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA that holds SOL
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, sale.key().as_ref()],
        bump = sale.vault_bump
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(
        mut,
        address = sale.beneficiary
    )]
    pub beneficiary: SystemAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Finalize>) -> Result<()> {
    let clock = Clock::get()?;
    let sale = &mut ctx.accounts.sale;

    let swept = sale.finalize(clock.unix_timestamp)?;
    let sale_key = sale.key();

    lock_units(
        &mut ctx.accounts.registry,
        sale_key,
        &ctx.accounts.mint,
        &ctx.accounts.token_program,
        clock.unix_timestamp,
    )?;

    emit!(Finalized {
        sale: sale_key,
        amount_raised: sale.amount_raised,
        goal_reached: sale.goal_reached_at_finalize,
        swept,
        finalized_at: sale.finalized_at,
    });

    if swept > 0 {
        release_from_vault(
            sale_key,
            sale.vault_bump,
            &ctx.accounts.sol_vault,
            ctx.accounts.beneficiary.to_account_info(),
            &ctx.accounts.system_program,
            swept,
        )?;

        emit!(FundsSwept {
            sale: sale_key,
            beneficiary: sale.beneficiary,
            amount: swept,
            total_swept: sale.total_swept,
        });
    }

    Ok(())
}
