//! Program-wide constants.

/// Seed prefix of the distributor PDA (`["distributor", mint]`).
pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";

/// Seed prefix of the custody vault PDA (`["vault", distributor]`).
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed prefix of the per-(claimant, vesting) claim record PDA.
pub const CLAIM_SEED: &[u8] = b"claim";

/// Max vestings stored in the distributor account.
pub const MAX_VESTINGS: usize = 64;

/// Max claims processed per `claim_multiple` call.
pub const MAX_CLAIM_BATCH: usize = 8;

/// Max entries funded per `fund_vestings` call.
pub const MAX_FUND_BATCH: usize = 16;

/// Width of a Merkle node in bytes.
pub const HASH_BYTES: usize = 32;
