use anchor_lang::prelude::*;

use crate::utils::merkle::{self, Hash};

/// Lets clients check a proof against a root before submitting a claim.
pub fn verify(
    _ctx: Context<Verify>,
    claimant: Pubkey,
    amount: u64,
    proof: Vec<Hash>,
    root: Hash,
) -> Result<bool> {
    Ok(merkle::verify(&claimant, amount, &proof, &root))
}

#[derive(Accounts)]
pub struct Verify {}
