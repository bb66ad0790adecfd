use anchor_lang::prelude::*;
use crate::state::*;
use crate::events::{
    TeamReserveTransferred,
    BountyReserveTransferred,
    DevelopmentReserveTransferred,
    SaleReserveTransferred,
};
use super::manual_issue::SaleIssue;

/// Distribute a reservation category in full. A repeat call moves 0 units
/// and never touches the registry.
pub fn handler(ctx: Context<SaleIssue>, category: ReservationCategory) -> Result<()> {
    let recipient = ctx.accounts.require_recipient()?;

    let amount = ctx.accounts.sale.take_reservation(category);
    if amount > 0 {
        ctx.accounts.issue(amount)?;
    } else {
        msg!("{:?} reservation already distributed", category);
    }

    match category {
        ReservationCategory::Team => emit!(TeamReserveTransferred { recipient, amount }),
        ReservationCategory::Bounty => emit!(BountyReserveTransferred { recipient, amount }),
        ReservationCategory::Development => {
            emit!(DevelopmentReserveTransferred { recipient, amount })
        }
        ReservationCategory::SaleCost => emit!(SaleReserveTransferred { recipient, amount }),
    }

    Ok(())
}
