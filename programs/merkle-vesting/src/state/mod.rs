pub mod claim_status;
pub mod distributor;
pub mod vesting;

pub use claim_status::*;
pub use distributor::*;
pub use vesting::*;
