use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::WhitelistUpdated;

/// Read a whitelist entry PDA that may not exist yet
pub fn load_entry(info: &AccountInfo) -> Result<Option<WhitelistEntry>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, SaleError::InvalidWhitelistAccount);
    let entry = WhitelistEntry::try_deserialize(&mut &info.try_borrow_data()?[..])?;
    Ok(Some(entry))
}

/// How a not-yet-initialized entry PDA gets its rent and space
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryFunding {
    /// Untouched address: create it outright
    Create { lamports: u64 },
    /// Address already holds lamports, so `create_account` would be refused.
    /// Top up to rent exemption, then allocate and assign.
    Adopt { top_up: u64 },
}

pub fn entry_funding(current_lamports: u64, rent_exempt_minimum: u64) -> EntryFunding {
    if current_lamports == 0 {
        EntryFunding::Create { lamports: rent_exempt_minimum }
    } else {
        EntryFunding::Adopt {
            top_up: rent_exempt_minimum.saturating_sub(current_lamports),
        }
    }
}

/// Turn an empty entry PDA into a program-owned account of `WhitelistEntry::LEN`
fn create_entry_account<'info>(
    payer: AccountInfo<'info>,
    entry: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    rent: &Rent,
) -> Result<()> {
    let space = WhitelistEntry::LEN;
    match entry_funding(entry.lamports(), rent.minimum_balance(space)) {
        EntryFunding::Create { lamports } => system_program::create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount {
                    from: payer,
                    to: entry,
                },
                signer_seeds,
            ),
            lamports,
            space as u64,
            &crate::ID,
        ),
        EntryFunding::Adopt { top_up } => {
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system_program.clone(),
                        Transfer {
                            from: payer,
                            to: entry.clone(),
                        },
                    ),
                    top_up,
                )?;
            }
            system_program::allocate(
                CpiContext::new_with_signer(
                    system_program.clone(),
                    Allocate {
                        account_to_allocate: entry.clone(),
                    },
                    signer_seeds,
                ),
                space as u64,
            )?;
            system_program::assign(
                CpiContext::new_with_signer(
                    system_program,
                    Assign {
                        account_to_assign: entry,
                    },
                    signer_seeds,
                ),
                &crate::ID,
            )
        }
    }
}

// ============================================================
// SINGLE ENTRY
// ============================================================

#[derive(Accounts)]
#[instruction(source: Pubkey)]
pub struct AddToWhitelist<'info> {
    #[account(
        mut,
        address = sale.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    #[account(
        init_if_needed,
        payer = administrator,
        space = WhitelistEntry::LEN,
        seeds = [WHITELIST_SEED, sale.key().as_ref(), source.as_ref()],
        bump
    )]
    pub whitelist_entry: Account<'info, WhitelistEntry>,

    pub system_program: Program<'info, System>,
}

pub fn add_handler(ctx: Context<AddToWhitelist>, source: Pubkey, destination: Pubkey) -> Result<()> {
    validate_pair(&source, &destination)?;

    let sale = ctx.accounts.sale.key();
    ctx.accounts
        .whitelist_entry
        .set(sale, source, destination, ctx.bumps.whitelist_entry);

    emit!(WhitelistUpdated {
        sale,
        source,
        destination,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(source: Pubkey)]
pub struct RemoveFromWhitelist<'info> {
    #[account(
        address = sale.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    /// May be uninitialized when the source was never whitelisted
    /// CHECK: Address is derived from the source, contents checked in the handler
    #[account(
        mut,
        seeds = [WHITELIST_SEED, sale.key().as_ref(), source.as_ref()],
        bump
    )]
    pub whitelist_entry: UncheckedAccount<'info>,
}

pub fn remove_handler(ctx: Context<RemoveFromWhitelist>, source: Pubkey) -> Result<()> {
    require_keys_neq!(source, Pubkey::default(), SaleError::ZeroAddress);

    let info = ctx.accounts.whitelist_entry.to_account_info();
    match load_entry(&info)? {
        Some(mut entry) => {
            entry.clear();
            entry.try_serialize(&mut &mut info.try_borrow_mut_data()?[..])?;
        }
        None => msg!("{} was not whitelisted", source),
    }

    emit!(WhitelistUpdated {
        sale: ctx.accounts.sale.key(),
        source,
        destination: Pubkey::default(),
    });

    Ok(())
}

// ============================================================
// BATCH
// ============================================================

/// Whitelist many sources at once.
/// remaining_accounts: one writable entry PDA per source, in order.
#[derive(Accounts)]
pub struct AddManyToWhitelist<'info> {
    #[account(
        mut,
        address = sale.administrator @ SaleError::Unauthorized
    )]
    pub administrator: Signer<'info>,

    #[account(
        seeds = [SALE_SEED, sale.registry.as_ref()],
        bump = sale.bump
    )]
    pub sale: Box<Account<'info, SaleState>>,

    pub system_program: Program<'info, System>,
}

pub fn add_many_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddManyToWhitelist<'info>>,
    sources: Vec<Pubkey>,
    destinations: Vec<Pubkey>,
) -> Result<()> {
    validate_batch(&sources, &destinations)?;
    require!(
        ctx.remaining_accounts.len() == sources.len(),
        SaleError::WhitelistLengthMismatch
    );

    let sale = ctx.accounts.sale.key();

    // Pass 1: every PDA must be the one derived for its source
    let mut bumps = Vec::with_capacity(sources.len());
    for (source, info) in sources.iter().zip(ctx.remaining_accounts) {
        let (expected, bump) = Pubkey::find_program_address(
            &[WHITELIST_SEED, sale.as_ref(), source.as_ref()],
            &crate::ID,
        );
        require_keys_eq!(info.key(), expected, SaleError::InvalidWhitelistAccount);
        require!(info.is_writable, SaleError::InvalidWhitelistAccount);
        load_entry(info)?;
        bumps.push(bump);
    }

    // Pass 2: create missing entries and write
    let rent = Rent::get()?;
    for (((source, destination), info), bump) in sources
        .iter()
        .zip(&destinations)
        .zip(ctx.remaining_accounts)
        .zip(bumps)
    {
        if info.data_is_empty() {
            let seeds = &[
                WHITELIST_SEED,
                sale.as_ref(),
                source.as_ref(),
                &[bump],
            ];
            create_entry_account(
                ctx.accounts.administrator.to_account_info(),
                info.clone(),
                ctx.accounts.system_program.to_account_info(),
                &[&seeds[..]],
                &rent,
            )?;
        }

        let mut entry = WhitelistEntry::default();
        entry.set(sale, *source, *destination, bump);
        entry.try_serialize(&mut &mut info.try_borrow_mut_data()?[..])?;

        emit!(WhitelistUpdated {
            sale,
            source: *source,
            destination: *destination,
        });
    }

    Ok(())
}
