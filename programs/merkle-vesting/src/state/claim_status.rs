use anchor_lang::prelude::*;

use crate::utils::merkle::Hash;

/// Claim record PDA for one `(claimant, vesting)` pair.
/// `claimed` goes false -> true exactly once and is never reset.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClaimStatus {
    pub claimant: Pubkey,
    pub vesting_index: u32,
    pub claimed: bool,
    /// Amount paid out.
    pub amount: u64,
    /// Unix seconds of the claim.
    pub claimed_at: i64,
    pub bump: u8,
}

impl ClaimStatus {
    pub const SIZE: usize =
        32 + // claimant
        4 +  // vesting_index
        1 +  // claimed
        8 +  // amount
        8 +  // claimed_at
        1;   // bump
}

/// Instruction input for one claim.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClaimArgs {
    pub amount: u64,
    pub vesting_index: u32,
    pub proof: Vec<Hash>,
}
