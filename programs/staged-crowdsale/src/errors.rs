use anchor_lang::prelude::*;

#[error_code]
pub enum SaleError {
    // ============================================================
    // AUTHORITY ERRORS
    // ============================================================

    #[msg("Caller is not the authorized account")]
    Unauthorized,

    #[msg("Address must not be the null address")]
    ZeroAddress,

    // ============================================================
    // ISSUANCE ERRORS
    // ============================================================

    #[msg("Issuance has been permanently locked")]
    IssuanceLocked,

    #[msg("Issuance is already locked")]
    AlreadyLocked,

    #[msg("Issuance would exceed the maximum token supply")]
    SupplyCapExceeded,

    #[msg("Invalid token metadata")]
    InvalidMetadata,

    // ============================================================
    // SALE TIMING ERRORS
    // ============================================================

    #[msg("Sale has not opened yet")]
    NotOpenYet,

    #[msg("Sale is already closed")]
    AlreadyClosed,

    #[msg("Sale has not closed yet")]
    NotClosedYet,

    #[msg("Sale timings must be strictly increasing and not in the past")]
    InvalidTimings,

    #[msg("Sale has already opened")]
    SaleAlreadyOpened,

    #[msg("Stage is already active")]
    StageAlreadyActive,

    // ============================================================
    // PURCHASE ERRORS
    // ============================================================

    #[msg("Investment is outside the active stage bounds")]
    InvestmentOutOfRange,

    #[msg("Purchase would exceed the hard cap")]
    CapExceeded,

    #[msg("Payer is not whitelisted")]
    NotWhitelisted,

    #[msg("Destination does not match the whitelisted destination")]
    DestinationMismatch,

    #[msg("Invalid stage configuration")]
    InvalidStageConfig,

    #[msg("Goal must be non-zero and not above the hard cap")]
    InvalidCaps,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    // ============================================================
    // WHITELIST ERRORS
    // ============================================================

    #[msg("Sources and destinations must have the same length")]
    WhitelistLengthMismatch,

    #[msg("Whitelist account does not match the derived address")]
    InvalidWhitelistAccount,

    // ============================================================
    // FINALIZATION / REFUND ERRORS
    // ============================================================

    #[msg("Sale is already finalized")]
    AlreadyFinalized,

    #[msg("Refunds are not available")]
    RefundNotAvailable,

    #[msg("Insufficient SOL in vault")]
    InsufficientVaultBalance,

    // ============================================================
    // VESTING ERRORS
    // ============================================================

    #[msg("Vesting times must be strictly increasing")]
    InvalidVestingTimes,

    #[msg("Vesting vault holds no tokens")]
    NothingToVest,

    #[msg("Vesting portions have not been calculated")]
    PortionsNotCalculated,

    #[msg("No vesting milestone has passed yet")]
    BeforeFirstMilestone,

    #[msg("Transfer would leave less than the minimum retained balance")]
    BelowMinimumRetainedBalance,

    // ============================================================
    // MATH ERRORS
    // ============================================================

    #[msg("Arithmetic overflow")]
    Overflow,
}
