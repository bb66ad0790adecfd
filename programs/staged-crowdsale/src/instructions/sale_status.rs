use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;

#[derive(Accounts)]
pub struct SaleStatusView<'info> {
    #[account(
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,
}

pub fn handler(ctx: Context<SaleStatusView>) -> Result<SaleStatus> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.sale.status(now))
}
