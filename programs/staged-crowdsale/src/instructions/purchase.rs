use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token::{Mint, Token, TokenAccount};
use anchor_spl::associated_token::AssociatedToken;
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::{TokensPurchased, FundsSwept};
use super::registry::mint_units;
use super::sol_vault::release_from_vault;
use super::whitelist::load_entry;

#[derive(Accounts)]
pub struct Purchase<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

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

    /// Whitelist entry of the payer; may be uninitialized
    /// CHECK: Address is derived from the payer, contents checked in the handler
    #[account(
        seeds = [WHITELIST_SEED, sale.key().as_ref(), payer.key().as_ref()],
        bump
    )]
    pub whitelist_entry: UncheckedAccount<'info>,

    /// CHECK: Must equal the payer's whitelisted destination
    pub destination: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = destination
    )]
    pub destination_tokens: Box<Account<'info, TokenAccount>>,

    /// Cumulative contribution of the payer, used for refunds
    #[account(
        init_if_needed,
        payer = payer,
        space = DepositRecord::LEN,
        seeds = [DEPOSIT_RECORD_SEED, sale.key().as_ref(), payer.key().as_ref()],
        bump
    )]
    pub deposit_record: Box<Account<'info, DepositRecord>>,

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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Purchase>,
    amount: u64,
    destination_override: Option<Pubkey>,
) -> Result<()> {
    let clock = Clock::get()?;
    let payer = ctx.accounts.payer.key();

    // Whitelist resolves where the tokens go
    let destination = load_entry(&ctx.accounts.whitelist_entry.to_account_info())?
        .ok_or(SaleError::NotWhitelisted)?
        .resolve_destination(payer, destination_override)?;
    require_keys_eq!(
        ctx.accounts.destination.key(),
        destination,
        SaleError::DestinationMismatch
    );

    // Ledger first
    let sale = &mut ctx.accounts.sale;
    let outcome = sale.record_purchase(amount, clock.unix_timestamp)?;

    let deposit_record = &mut ctx.accounts.deposit_record;
    if deposit_record.is_new() {
        deposit_record.open(sale.key(), payer, clock.unix_timestamp, ctx.bumps.deposit_record);
        sale.investor_count = sale.investor_count
            .checked_add(1)
            .ok_or(SaleError::Overflow)?;
    }
    deposit_record.record_deposit(amount)?;

    // Payment into custody
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.sol_vault.to_account_info(),
            },
        ),
        amount,
    )?;

    let sale_key = sale.key();
    mint_units(
        &mut ctx.accounts.registry,
        sale_key,
        &ctx.accounts.mint,
        &ctx.accounts.destination_tokens,
        &ctx.accounts.token_program,
        outcome.units,
    )?;

    emit!(TokensPurchased {
        sale: sale_key,
        payer,
        destination,
        stage: outcome.stage,
        amount,
        units: outcome.units,
        amount_raised: sale.amount_raised,
    });

    // Custody reached the goal: forward everything held
    if outcome.swept > 0 {
        release_from_vault(
            sale_key,
            sale.vault_bump,
            &ctx.accounts.sol_vault,
            ctx.accounts.beneficiary.to_account_info(),
            &ctx.accounts.system_program,
            outcome.swept,
        )?;

        emit!(FundsSwept {
            sale: sale_key,
            beneficiary: sale.beneficiary,
            amount: outcome.swept,
            total_swept: sale.total_swept,
        });
    }

    Ok(())
}
