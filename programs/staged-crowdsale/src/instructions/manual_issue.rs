use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use anchor_spl::associated_token::AssociatedToken;
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::ManualIssued;
use super::registry::mint_units;

/// Administrator issuance through the sale, bypassing stage, whitelist and
/// investment limits. The registry cap and lock still apply.
/// Also used by the reservation transfers.
#[derive(Accounts)]
pub struct SaleIssue<'info> {
    #[account(
        mut,
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

    /// CHECK: Any non-null holder (a wallet or the vesting guard PDA)
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = administrator,
        associated_token::mint = mint,
        associated_token::authority = recipient
    )]
    pub recipient_tokens: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> SaleIssue<'info> {
    pub fn require_recipient(&self) -> Result<Pubkey> {
        let recipient = self.recipient.key();
        require_keys_neq!(recipient, Pubkey::default(), SaleError::ZeroAddress);
        Ok(recipient)
    }

    /// Mint through the registry with the sale PDA as caller
    pub fn issue(&mut self, amount: u64) -> Result<()> {
        let sale = self.sale.key();
        mint_units(
            &mut self.registry,
            sale,
            &self.mint,
            &self.recipient_tokens,
            &self.token_program,
            amount,
        )
    }
}

pub fn handler(ctx: Context<SaleIssue>, amount: u64) -> Result<()> {
    let recipient = ctx.accounts.require_recipient()?;

    ctx.accounts.issue(amount)?;

    emit!(ManualIssued {
        sale: ctx.accounts.sale.key(),
        to: recipient,
        amount,
    });

    Ok(())
}
