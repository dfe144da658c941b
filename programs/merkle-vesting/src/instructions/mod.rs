pub mod add_vesting;
pub mod claim;
pub mod claim_multiple;
pub mod fund_vestings;
pub mod initialize;
pub mod pause;
pub mod reschedule;
pub mod set_admin;
pub mod token_balance;
pub mod unpause;
pub mod verify;

pub use add_vesting::*;
pub use claim::*;
pub use claim_multiple::*;
pub use fund_vestings::*;
pub use initialize::*;
pub use pause::*;
pub use reschedule::*;
pub use set_admin::*;
pub use token_balance::*;
pub use unpause::*;
pub use verify::*;
