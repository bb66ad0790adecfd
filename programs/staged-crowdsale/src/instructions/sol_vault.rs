use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use crate::constants::*;
use crate::errors::SaleError;

/// Move `amount` lamports out of the sale's SOL vault.
/// The vault keeps its rent-exempt reserve; it never closes.
pub fn release_from_vault<'info>(
    sale: Pubkey,
    vault_bump: u8,
    sol_vault: &SystemAccount<'info>,
    to: AccountInfo<'info>,
    system_program: &Program<'info, System>,
    amount: u64,
) -> Result<()> {
    let min_rent = Rent::get()?.minimum_balance(0);
    let available = sol_vault.lamports().saturating_sub(min_rent);
    require!(available >= amount, SaleError::InsufficientVaultBalance);

    let seeds = &[
        SOL_VAULT_SEED,
        sale.as_ref(),
        &[vault_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    system_program::transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Transfer {
                from: sol_vault.to_account_info(),
                to,
            },
            signer_seeds,
        ),
        amount,
    )
}
