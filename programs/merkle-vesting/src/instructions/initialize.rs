use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DISTRIBUTOR_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::Distributor;
use crate::utils::merkle::Hash;

pub fn initialize(
    ctx: Context<Initialize>,
    roots: Vec<Hash>,
    start_ts: Vec<i64>,
    total_rewards: Vec<u64>,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let mint = ctx.accounts.mint.key();
    let vault = ctx.accounts.vault.key();

    let d = &mut ctx.accounts.distributor;
    d.admin = admin;
    d.mint = mint;
    d.vault = vault;
    d.bump = ctx.bumps.distributor;
    d.vault_bump = ctx.bumps.vault;

    process_initialize(d, &roots, &start_ts, &total_rewards)?;

    emit!(DistributorInitialized {
        admin,
        mint,
        vault,
        no_of_vestings: d.no_of_vestings(),
    });
    for (index, v) in d.vestings.iter().enumerate() {
        emit!(crate::instructions::VestingAdded {
            index: index as u32,
            root: v.root,
            start_ts: v.start_ts,
            total_reward: v.total_reward,
        });
    }

    Ok(())
}

/// Appends the genesis vestings given as parallel arrays.
pub(crate) fn process_initialize(
    d: &mut Distributor,
    roots: &[Hash],
    start_ts: &[i64],
    total_rewards: &[u64],
) -> Result<()> {
    require!(!roots.is_empty(), VestingError::EmptyVestingList);
    require!(
        roots.len() == start_ts.len() && roots.len() == total_rewards.len(),
        VestingError::LengthMismatch
    );

    for ((root, ts), total) in roots.iter().zip(start_ts).zip(total_rewards) {
        d.push_vesting(*root, *ts, *total)?;
    }
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Distributor::space(),
        seeds = [DISTRIBUTOR_SEED, mint.key().as_ref()],
        bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = distributor,
        seeds = [VAULT_SEED, distributor.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct DistributorInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub no_of_vestings: u32,
}
