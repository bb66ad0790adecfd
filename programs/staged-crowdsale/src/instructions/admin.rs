use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::SaleConfigUpdated;

/// Reconfigure a sale that has not reached the affected period yet
/// Only callable by the sale administrator
#[derive(Accounts)]
pub struct UpdateSaleConfig<'info> {
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
}

fn emit_config(sale: &Account<SaleState>) {
    emit!(SaleConfigUpdated {
        sale: sale.key(),
        timings: sale.timings,
        stage_one: sale.stages[0],
        stage_two: sale.stages[1],
    });
}

pub fn update_sale_timings_handler(ctx: Context<UpdateSaleConfig>, timings: SaleTimings) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    sale.update_timings(timings, Clock::get()?.unix_timestamp)?;
    emit_config(sale);
    Ok(())
}

/// `stage` is 0 for stage one, 1 for stage two
pub fn update_stage_config_handler(
    ctx: Context<UpdateSaleConfig>,
    stage: u8,
    config: StageConfig,
) -> Result<()> {
    let sale = &mut ctx.accounts.sale;
    sale.update_stage(stage as usize, config, Clock::get()?.unix_timestamp)?;
    emit_config(sale);
    Ok(())
}
