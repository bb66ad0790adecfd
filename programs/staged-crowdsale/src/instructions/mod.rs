pub mod initialize_registry;
pub mod registry;
pub mod sol_vault;
pub mod create_sale;
pub mod purchase;
pub mod manual_issue;
pub mod whitelist;
pub mod reservations;
pub mod finalize;
pub mod claim_refund;
pub mod sale_status;
pub mod admin;
pub mod vesting;

// Glob re-exports for Anchor compatibility
// lib.rs calls handlers through fully qualified paths
#[allow(ambiguous_glob_reexports)]
pub use initialize_registry::*;
pub use registry::*;
pub use create_sale::*;
pub use purchase::*;
pub use manual_issue::*;
pub use whitelist::*;
pub use finalize::*;
pub use claim_refund::*;
pub use sale_status::*;
pub use admin::*;
pub use vesting::*;
