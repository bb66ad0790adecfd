pub mod asset_registry;
pub mod sale_state;
pub mod whitelist_entry;
pub mod deposit_record;
pub mod vesting_guard;

pub use asset_registry::*;
pub use sale_state::*;
pub use whitelist_entry::*;
pub use deposit_record::*;
pub use vesting_guard::*;
