use anchor_lang::prelude::*;
use crate::errors::SaleError;

/// Maps a paying identity to the holder that receives its tokens.
/// A missing entry or a null destination means "not permitted".
#[account]
#[derive(Default, Debug)]
pub struct WhitelistEntry {
    /// The sale this entry belongs to
    pub sale: Pubkey,

    /// Paying wallet
    pub source: Pubkey,

    /// Token recipient, null when removed
    pub destination: Pubkey,

    /// PDA bump seed
    pub bump: u8,
}

impl WhitelistEntry {
    pub const LEN: usize = 8  // discriminator
        + 32  // sale
        + 32  // source
        + 32  // destination
        + 1   // bump
        + 16; // padding

    pub fn is_permitted(&self) -> bool {
        self.destination != Pubkey::default()
    }

    /// Destination for a purchase by `source`. An explicit override is only
    /// accepted when it names the whitelisted destination.
    pub fn resolve_destination(&self, source: Pubkey, requested: Option<Pubkey>) -> Result<Pubkey> {
        require!(
            self.source == source && self.is_permitted(),
            SaleError::NotWhitelisted
        );
        if let Some(requested) = requested {
            require_keys_eq!(requested, self.destination, SaleError::DestinationMismatch);
        }
        Ok(self.destination)
    }

    pub fn set(&mut self, sale: Pubkey, source: Pubkey, destination: Pubkey, bump: u8) {
        self.sale = sale;
        self.source = source;
        self.destination = destination;
        self.bump = bump;
    }

    pub fn clear(&mut self) {
        self.destination = Pubkey::default();
    }
}

pub fn validate_pair(source: &Pubkey, destination: &Pubkey) -> Result<()> {
    require_keys_neq!(*source, Pubkey::default(), SaleError::ZeroAddress);
    require_keys_neq!(*destination, Pubkey::default(), SaleError::ZeroAddress);
    Ok(())
}

/// Check a whole batch up front so nothing is written unless every pair is valid
pub fn validate_batch(sources: &[Pubkey], destinations: &[Pubkey]) -> Result<()> {
    require!(
        sources.len() == destinations.len(),
        SaleError::WhitelistLengthMismatch
    );
    sources
        .iter()
        .zip(destinations)
        .try_for_each(|(source, destination)| validate_pair(source, destination))
}
