use anchor_lang::prelude::*;
use crate::errors::SaleError;

/// Capped, mintable token ledger
/// The registry PDA is the SPL mint authority; `authority` decides who may
/// drive it (the deployer at first, the sale PDA after bootstrap).
#[account]
#[derive(Default)]
pub struct AssetRegistry {
    /// Deployer that created the registry (part of the PDA seeds)
    pub creator: Pubkey,

    /// Identity allowed to issue and lock issuance
    pub authority: Pubkey,

    /// SPL mint controlled by this registry
    pub mint: Pubkey,

    /// Units issued so far
    pub total_supply: u64,

    /// Hard ceiling on total_supply
    pub total_supply_max: u64,

    /// Once true, issuance is disabled forever
    pub issuance_locked: bool,

    /// Mint decimals
    pub decimals: u8,

    /// Timestamp when the registry was created
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Mint PDA bump seed
    pub mint_bump: u8,
}

impl AssetRegistry {
    pub const LEN: usize = 8  // discriminator
        + 32  // creator
        + 32  // authority
        + 32  // mint
        + 8   // total_supply
        + 8   // total_supply_max
        + 1   // issuance_locked
        + 1   // decimals
        + 8   // created_at
        + 1   // bump
        + 1   // mint_bump
        + 32; // padding

    pub fn require_authority(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.authority, SaleError::Unauthorized);
        Ok(())
    }

    /// Units that can still be issued before hitting the cap
    pub fn remaining_supply(&self) -> u64 {
        self.total_supply_max.saturating_sub(self.total_supply)
    }

    /// Validate and account for an issuance of `amount` units.
    /// Returns the new total supply. Leaves state untouched on failure.
    pub fn record_issue(&mut self, caller: Pubkey, amount: u64) -> Result<u64> {
        self.require_authority(caller)?;
        require!(!self.issuance_locked, SaleError::IssuanceLocked);

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(SaleError::SupplyCapExceeded)?;
        require!(
            new_supply <= self.total_supply_max,
            SaleError::SupplyCapExceeded
        );

        self.total_supply = new_supply;
        Ok(new_supply)
    }

    /// Permanently disable issuance
    pub fn lock(&mut self, caller: Pubkey) -> Result<()> {
        self.require_authority(caller)?;
        require!(!self.issuance_locked, SaleError::AlreadyLocked);
        self.issuance_locked = true;
        Ok(())
    }

    /// Hand issuance control to a new identity
    pub fn transfer_authority(&mut self, caller: Pubkey, new_authority: Pubkey) -> Result<()> {
        self.require_authority(caller)?;
        require_keys_neq!(new_authority, Pubkey::default(), SaleError::ZeroAddress);
        self.authority = new_authority;
        Ok(())
    }
}
