//! Phased Merkle-root reward distribution.
//!
//! An admin registers vestings, each committing to a list of
//! `(claimant, amount)` entitlements through a single Merkle root, and funds
//! them up to their declared total. Once a vesting has started, every listed
//! claimant can withdraw their amount exactly once by presenting a proof.

use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod testing;

use state::ClaimArgs;
use utils::merkle::Hash;

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod merkle_vesting {
    use super::*;

    /// Creates the distributor, its vault and the genesis vestings.
    /// The signer becomes admin.
    pub fn initialize(
        ctx: Context<Initialize>,
        roots: Vec<Hash>,
        start_ts: Vec<i64>,
        total_rewards: Vec<u64>,
    ) -> Result<()> {
        instructions::initialize::initialize(ctx, roots, start_ts, total_rewards)
    }

    pub fn add_vesting(
        ctx: Context<AddVesting>,
        root: Hash,
        start_ts: i64,
        total_reward: u64,
    ) -> Result<()> {
        instructions::add_vesting::add_vesting(ctx, root, start_ts, total_reward)
    }

    /// Funds one or more vestings from the admin's token account.
    pub fn fund_vestings(
        ctx: Context<FundVestings>,
        indices: Vec<u32>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::fund_vestings::fund_vestings(ctx, indices, amounts)
    }

    pub fn reschedule(
        ctx: Context<Reschedule>,
        vesting_index: u32,
        new_start_ts: i64,
    ) -> Result<()> {
        instructions::reschedule::reschedule(ctx, vesting_index, new_start_ts)
    }

    pub fn pause(ctx: Context<SetPaused>, vesting_index: u32) -> Result<()> {
        instructions::pause::pause(ctx, vesting_index)
    }

    pub fn unpause(ctx: Context<SetPaused>, vesting_index: u32) -> Result<()> {
        instructions::unpause::unpause(ctx, vesting_index)
    }

    pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::set_admin::set_admin(ctx, new_admin)
    }

    /// Pays `amount` to the signer if `(signer, amount)` is committed under
    /// the vesting root.
    pub fn claim(
        ctx: Context<Claim>,
        amount: u64,
        vesting_index: u32,
        proof: Vec<Hash>,
    ) -> Result<()> {
        instructions::claim::claim(ctx, amount, vesting_index, proof)
    }

    pub fn claim_multiple<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimMultiple<'info>>,
        claims: Vec<ClaimArgs>,
    ) -> Result<()> {
        instructions::claim_multiple::claim_multiple(ctx, claims)
    }

    pub fn verify(
        ctx: Context<Verify>,
        claimant: Pubkey,
        amount: u64,
        proof: Vec<Hash>,
        root: Hash,
    ) -> Result<bool> {
        instructions::verify::verify(ctx, claimant, amount, proof, root)
    }

    pub fn token_balance(ctx: Context<TokenBalance>) -> Result<u64> {
        instructions::token_balance::token_balance(ctx)
    }
}
