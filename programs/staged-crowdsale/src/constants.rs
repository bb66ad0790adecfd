// ============================================================
// UNITS
// ============================================================

/// Lamports per SOL (1 SOL = 1_000_000_000 lamports)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimals of the issued token
pub const TOKEN_DECIMALS: u8 = 8;

/// One whole token in minor units
pub const TOKEN_UNIT: u64 = 100_000_000;

/// Denominator for bonus percentages
pub const PERCENT_DENOMINATOR: u64 = 100;

/// 0.5 SOL in lamports
pub const HALF_SOL: u64 = LAMPORTS_PER_SOL / 2;

// ============================================================
// SUPPLY
// ============================================================

/// Maximum token supply (1,000,000,000 tokens)
pub const DEFAULT_TOTAL_SUPPLY_MAX: u64 = 1_000_000_000 * TOKEN_UNIT;

// ============================================================
// SALE DEFAULTS
// ============================================================

/// Tokens per SOL during both stages
pub const DEFAULT_RATE: u64 = 1500;

/// Stage one (pre-sale) bonus
pub const DEFAULT_STAGE_ONE_BONUS_PERCENT: u8 = 40;

/// Stage two (main sale) bonus
pub const DEFAULT_STAGE_TWO_BONUS_PERCENT: u8 = 20;

/// Stage one investment bounds (1.5 - 35 SOL)
pub const DEFAULT_STAGE_ONE_MIN_INVESTMENT: u64 = 3 * HALF_SOL;
pub const DEFAULT_STAGE_ONE_MAX_INVESTMENT: u64 = 35 * LAMPORTS_PER_SOL;

/// Stage two investment bounds (0.5 - 20 SOL)
pub const DEFAULT_STAGE_TWO_MIN_INVESTMENT: u64 = HALF_SOL;
pub const DEFAULT_STAGE_TWO_MAX_INVESTMENT: u64 = 20 * LAMPORTS_PER_SOL;

/// Hard cap (7 SOL)
pub const DEFAULT_HARD_CAP: u64 = 7 * LAMPORTS_PER_SOL;

/// Soft cap / goal (4 SOL)
pub const DEFAULT_GOAL: u64 = 4 * LAMPORTS_PER_SOL;

// ============================================================
// RESERVATIONS
// ============================================================

/// Team reservation (140,000,000 tokens)
pub const TEAM_RESERVATION: u64 = 140_000_000 * TOKEN_UNIT;

/// Bounty reservation (50,000,000 tokens)
pub const BOUNTY_RESERVATION: u64 = 50_000_000 * TOKEN_UNIT;

/// Development reservation (150,000,000 tokens)
pub const DEVELOPMENT_RESERVATION: u64 = 150_000_000 * TOKEN_UNIT;

/// Sale cost reservation (10,000,000 tokens)
pub const SALE_COST_RESERVATION: u64 = 10_000_000 * TOKEN_UNIT;

// ============================================================
// VESTING
// ============================================================

/// Number of vesting milestones
pub const VESTING_MILESTONES: usize = 4;

// ============================================================
// METADATA LIMITS
// ============================================================

pub const MAX_TOKEN_NAME_LEN: usize = 32;
pub const MAX_TOKEN_SYMBOL_LEN: usize = 10;
pub const MAX_METADATA_URI_LEN: usize = 200;

// ============================================================
// PDA SEEDS
// ============================================================

pub const REGISTRY_SEED: &[u8] = b"asset_registry";
pub const MINT_SEED: &[u8] = b"mint";
pub const SALE_SEED: &[u8] = b"sale";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";
pub const WHITELIST_SEED: &[u8] = b"whitelist";
pub const DEPOSIT_RECORD_SEED: &[u8] = b"deposit_record";
pub const VESTING_GUARD_SEED: &[u8] = b"vesting_guard";
