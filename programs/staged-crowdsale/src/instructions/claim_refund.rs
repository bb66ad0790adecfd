use anchor_lang::prelude::*;
use anchor_lang::error::ErrorCode;
use crate::state::*;
use crate::constants::*;
use crate::events::RefundClaimed;
use super::sol_vault::release_from_vault;

/// Refund an investor after a sale that missed its goal.
/// Anyone may crank it; lamports only ever go to the recorded investor.
#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    #[account(mut)]
    pub investor: SystemAccount<'info>,

    /// May be uninitialized when the investor never purchased
    /// CHECK: Address is derived from the investor, contents checked in the handler
    #[account(
        mut,
        seeds = [DEPOSIT_RECORD_SEED, sale.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub deposit_record: UncheckedAccount<'info>,

    /// CHECK: PDA that holds SOL
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, sale.key().as_ref()],
        bump = sale.vault_bump
    )]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimRefund>) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    sale.require_refundable()?;

    let investor = ctx.accounts.investor.key();
    let record_info = ctx.accounts.deposit_record.to_account_info();
    if record_info.data_is_empty() {
        msg!("No deposit recorded for {}", investor);
        return Ok(());
    }
    require_keys_eq!(*record_info.owner, crate::ID, ErrorCode::AccountOwnedByWrongProgram);

    let mut record = DepositRecord::try_deserialize(&mut &record_info.try_borrow_data()?[..])?;
    if record.already_refunded() {
        msg!("Refund already paid to {}", investor);
        return Ok(());
    }
    let owed = record.take_refund();
    if owed == 0 {
        msg!("Nothing owed to {}", investor);
        return Ok(());
    }

    // Ledger before payout
    sale.record_refund(owed)?;
    record.try_serialize(&mut &mut record_info.try_borrow_mut_data()?[..])?;

    emit!(RefundClaimed {
        sale: sale.key(),
        investor,
        amount: owed,
        held_balance: sale.held_balance,
    });

    release_from_vault(
        sale.key(),
        sale.vault_bump,
        &ctx.accounts.sol_vault,
        ctx.accounts.investor.to_account_info(),
        &ctx.accounts.system_program,
        owed,
    )
}
