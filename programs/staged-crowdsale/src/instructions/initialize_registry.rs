use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};
use anchor_spl::metadata::{
    create_metadata_accounts_v3,
    CreateMetadataAccountsV3,
    Metadata as MetadataProgram,
    mpl_token_metadata::types::DataV2,
};
use crate::state::*;
use crate::constants::*;
use crate::errors::SaleError;
use crate::events::RegistryInitialized;

/// Metaplex metadata for the issued token
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct TokenMetadataParams {
    pub name: String,
    pub symbol: String,
    /// Metadata URI (IPFS/Arweave)
    pub uri: String,
}

impl TokenMetadataParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            !self.name.is_empty() && self.name.len() <= MAX_TOKEN_NAME_LEN,
            SaleError::InvalidMetadata
        );
        require!(
            !self.symbol.is_empty() && self.symbol.len() <= MAX_TOKEN_SYMBOL_LEN,
            SaleError::InvalidMetadata
        );
        require!(
            !self.uri.is_empty() && self.uri.len() <= MAX_METADATA_URI_LEN,
            SaleError::InvalidMetadata
        );
        Ok(())
    }
}

/// Create the asset registry, its SPL mint and token metadata.
/// The deployer becomes the issuance authority.
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = AssetRegistry::LEN,
        seeds = [REGISTRY_SEED, creator.key().as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, AssetRegistry>>,

    /// Mint authority is the registry PDA, never a wallet
    #[account(
        init,
        payer = creator,
        seeds = [MINT_SEED, registry.key().as_ref()],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = registry,
    )]
    pub mint: Box<Account<'info, Mint>>,

    /// CHECK: Created via Metaplex CPI
    #[account(
        mut,
        seeds = [b"metadata", metadata_program.key().as_ref(), mint.key().as_ref()],
        seeds::program = metadata_program.key(),
        bump
    )]
    pub metadata_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,

    pub metadata_program: Program<'info, MetadataProgram>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(
    ctx: Context<InitializeRegistry>,
    total_supply_max: u64,
    metadata: TokenMetadataParams,
) -> Result<()> {
    metadata.validate()?;
    require!(total_supply_max > 0, SaleError::ZeroAmount);

    let registry = &mut ctx.accounts.registry;
    let creator = ctx.accounts.creator.key();

    registry.creator = creator;
    registry.authority = creator;
    registry.mint = ctx.accounts.mint.key();
    registry.total_supply = 0;
    registry.total_supply_max = total_supply_max;
    registry.issuance_locked = false;
    registry.decimals = TOKEN_DECIMALS;
    registry.created_at = Clock::get()?.unix_timestamp;
    registry.bump = ctx.bumps.registry;
    registry.mint_bump = ctx.bumps.mint;

    let seeds = &[
        REGISTRY_SEED,
        creator.as_ref(),
        &[registry.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: ctx.accounts.metadata_account.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                mint_authority: registry.to_account_info(),
                payer: ctx.accounts.creator.to_account_info(),
                update_authority: registry.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            signer_seeds,
        ),
        DataV2 {
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            uri: metadata.uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        },
        true, // is_mutable
        true, // update_authority_is_signer
        None, // collection_details
    )?;

    emit!(RegistryInitialized {
        registry: registry.key(),
        mint: registry.mint,
        authority: registry.authority,
        total_supply_max,
        decimals: TOKEN_DECIMALS,
        name: metadata.name,
        symbol: metadata.symbol,
        uri: metadata.uri,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_sale_error;

    fn params(name: &str, symbol: &str, uri: &str) -> TokenMetadataParams {
        TokenMetadataParams {
            name: name.to_string(),
            symbol: symbol.to_string(),
            uri: uri.to_string(),
        }
    }

    #[test]
    fn metadata_limits() {
        params("Staged Token", "STG", "https://arweave.net/stg.json").validate().unwrap();

        assert_sale_error(params("", "STG", "u").validate(), SaleError::InvalidMetadata);
        assert_sale_error(params("n", "", "u").validate(), SaleError::InvalidMetadata);
        assert_sale_error(params("n", "STG", "").validate(), SaleError::InvalidMetadata);
        assert_sale_error(
            params(&"x".repeat(MAX_TOKEN_NAME_LEN + 1), "STG", "u").validate(),
            SaleError::InvalidMetadata,
        );
        assert_sale_error(
            params("n", &"S".repeat(MAX_TOKEN_SYMBOL_LEN + 1), "u").validate(),
            SaleError::InvalidMetadata,
        );
        assert_sale_error(
            params("n", "STG", &"u".repeat(MAX_METADATA_URI_LEN + 1)).validate(),
            SaleError::InvalidMetadata,
        );
    }
}
