use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, SetAuthority, Token, TokenAccount};
use anchor_spl::token::spl_token::instruction::AuthorityType;
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::{Issued, IssuanceLocked, IssuanceAuthorityTransferred};

// ============================================================
// SHARED ISSUANCE PATH
// ============================================================

/// Issue `amount` units to `destination` on behalf of `caller`.
/// The registry ledger is checked and updated before the mint CPI.
pub fn mint_units<'info>(
    registry: &mut Account<'info, AssetRegistry>,
    caller: Pubkey,
    mint: &Account<'info, Mint>,
    destination: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    let total_supply = registry.record_issue(caller, amount)?;

    let creator = registry.creator;
    let seeds = &[
        REGISTRY_SEED,
        creator.as_ref(),
        &[registry.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: mint.to_account_info(),
                to: destination.to_account_info(),
                authority: registry.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(Issued {
        registry: registry.key(),
        to: destination.owner,
        amount,
        total_supply,
        remaining_supply: registry.remaining_supply(),
    });

    Ok(())
}

/// Permanently disable issuance, at the ledger and at the SPL mint
pub fn lock_units<'info>(
    registry: &mut Account<'info, AssetRegistry>,
    caller: Pubkey,
    mint: &Account<'info, Mint>,
    token_program: &Program<'info, Token>,
    now: i64,
) -> Result<()> {
    registry.lock(caller)?;

    let creator = registry.creator;
    let seeds = &[
        REGISTRY_SEED,
        creator.as_ref(),
        &[registry.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::set_authority(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            SetAuthority {
                current_authority: registry.to_account_info(),
                account_or_mint: mint.to_account_info(),
            },
            signer_seeds,
        ),
        AuthorityType::MintTokens,
        None,
    )?;

    emit!(IssuanceLocked {
        registry: registry.key(),
        total_supply: registry.total_supply,
        locked_at: now,
    });

    Ok(())
}

// ============================================================
// DIRECT REGISTRY INSTRUCTIONS
// ============================================================

/// Issue units directly. Only usable while the authority is a wallet,
/// i.e. before control is handed to the sale.
#[derive(Accounts)]
pub struct Issue<'info> {
    #[account(
        address = registry.authority @ SaleError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED, registry.creator.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        mut,
        address = registry.mint
    )]
    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = mint
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn issue_handler(ctx: Context<Issue>, amount: u64) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    mint_units(
        &mut ctx.accounts.registry,
        authority,
        &ctx.accounts.mint,
        &ctx.accounts.destination,
        &ctx.accounts.token_program,
        amount,
    )
}

#[derive(Accounts)]
pub struct LockIssuance<'info> {
    #[account(
        address = registry.authority @ SaleError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED, registry.creator.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    #[account(
        mut,
        address = registry.mint
    )]
    pub mint: Box<Account<'info, Mint>>,

    pub token_program: Program<'info, Token>,
}

pub fn lock_issuance_handler(ctx: Context<LockIssuance>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let now = Clock::get()?.unix_timestamp;
    lock_units(
        &mut ctx.accounts.registry,
        authority,
        &ctx.accounts.mint,
        &ctx.accounts.token_program,
        now,
    )
}

/// Hand issuance control to a new identity (the sale PDA during bootstrap)
#[derive(Accounts)]
pub struct TransferIssuanceAuthority<'info> {
    #[account(
        address = registry.authority @ SaleError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED, registry.creator.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,
}

pub fn transfer_issuance_authority_handler(
    ctx: Context<TransferIssuanceAuthority>,
    new_authority: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let previous_authority = registry.authority;

    registry.transfer_authority(ctx.accounts.authority.key(), new_authority)?;

    emit!(IssuanceAuthorityTransferred {
        registry: registry.key(),
        previous_authority,
        new_authority,
    });

    Ok(())
}
