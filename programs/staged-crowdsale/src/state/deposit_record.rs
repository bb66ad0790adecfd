use anchor_lang::prelude::*;
use crate::errors::SaleError;

/// Tracks an investor's cumulative contribution to a sale
/// One DepositRecord per investor per sale
#[account]
#[derive(Default)]
pub struct DepositRecord {
    /// The sale this deposit belongs to
    pub sale: Pubkey,

    /// The investor's wallet address (refunds go here)
    pub depositor: Pubkey,

    /// Lamports contributed and not yet refunded
    pub amount: u64,

    /// Whether the investor has been refunded
    pub refund_claimed: bool,

    /// Timestamp of the first deposit
    pub deposited_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl DepositRecord {
    pub const LEN: usize = 8  // discriminator
        + 32  // sale
        + 32  // depositor
        + 8   // amount
        + 1   // refund_claimed
        + 8   // deposited_at
        + 1   // bump
        + 16; // padding

    /// A freshly created record has never been written
    pub fn is_new(&self) -> bool {
        self.depositor == Pubkey::default()
    }

    pub fn open(&mut self, sale: Pubkey, depositor: Pubkey, now: i64, bump: u8) {
        self.sale = sale;
        self.depositor = depositor;
        self.deposited_at = now;
        self.bump = bump;
    }

    pub fn record_deposit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(SaleError::Overflow)?;
        Ok(())
    }

    /// The investor was refunded and nothing has been owed since
    pub fn already_refunded(&self) -> bool {
        self.refund_claimed && self.amount == 0
    }

    /// Zero the record and return what is owed. A second call returns 0.
    pub fn take_refund(&mut self) -> u64 {
        let owed = std::mem::take(&mut self.amount);
        if owed > 0 {
            self.refund_claimed = true;
        }
        owed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_blank() {
        let mut record = DepositRecord::default();
        assert!(record.is_new());

        let depositor = Pubkey::new_unique();
        record.open(Pubkey::new_unique(), depositor, 42, 254);
        assert!(!record.is_new());
        assert_eq!(record.depositor, depositor);
        assert_eq!(record.deposited_at, 42);
    }

    #[test]
    fn deposits_accumulate() {
        let mut record = DepositRecord::default();
        record.record_deposit(2_000_000_000).unwrap();
        record.record_deposit(1_500_000_000).unwrap();
        assert_eq!(record.amount, 3_500_000_000);

        assert!(record.record_deposit(u64::MAX).is_err());
        assert_eq!(record.amount, 3_500_000_000);
    }

    #[test]
    fn refund_is_paid_once() {
        let mut record = DepositRecord::default();
        record.record_deposit(2_000_000_000).unwrap();

        assert!(!record.already_refunded());
        assert_eq!(record.take_refund(), 2_000_000_000);
        assert!(record.refund_claimed);
        assert!(record.already_refunded());
        assert_eq!(record.amount, 0);

        assert_eq!(record.take_refund(), 0);
        assert!(record.refund_claimed);
    }

    #[test]
    fn empty_record_refunds_nothing() {
        let mut record = DepositRecord::default();
        assert_eq!(record.take_refund(), 0);
        assert!(!record.refund_claimed);
        assert!(!record.already_refunded());
    }
}
