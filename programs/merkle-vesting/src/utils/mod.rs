pub mod merkle;
pub mod token_ledger;
