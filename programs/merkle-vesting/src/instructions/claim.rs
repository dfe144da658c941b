use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CLAIM_SEED, DISTRIBUTOR_SEED, MAX_CLAIM_BATCH, VAULT_SEED};
use crate::error::VestingError;
use crate::state::{ClaimArgs, ClaimStatus, Distributor};
use crate::utils::merkle::{self, Hash};
use crate::utils::token_ledger::{SplTokenLedger, TokenLedger};

pub fn claim(ctx: Context<Claim>, amount: u64, vesting_index: u32, proof: Vec<Hash>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let claimant = ctx.accounts.claimant.key();
    let destination = ctx.accounts.claimant_token_account.key();

    let d_info = ctx.accounts.distributor.to_account_info();
    let d = &mut ctx.accounts.distributor;
    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        d_info,
        d.mint,
        d.bump,
    )
    .with_account(ctx.accounts.claimant_token_account.to_account_info());

    let mut records = [ClaimStatus {
        bump: ctx.bumps.claim_status,
        ..(*ctx.accounts.claim_status).clone()
    }];
    let args = [ClaimArgs {
        amount,
        vesting_index,
        proof,
    }];
    process_claims(d, &mut records, &args, &claimant, &destination, now, &mut ledger)?;

    emit!(Claimed {
        claimant,
        index: vesting_index,
        amount,
        remaining: d.vesting(vesting_index)?.remaining,
    });

    let [record] = records;
    ctx.accounts.claim_status.set_inner(record);
    Ok(())
}

/// Applies `claims` in order against `records` (one per claim, same order),
/// then pays the claimed total to `destination` in one transfer.
///
/// All-or-nothing: any rejected claim or a failed transfer restores the
/// vestings and records to their state on entry.
pub(crate) fn process_claims<L: TokenLedger>(
    d: &mut Distributor,
    records: &mut [ClaimStatus],
    claims: &[ClaimArgs],
    claimant: &Pubkey,
    destination: &Pubkey,
    now: i64,
    ledger: &mut L,
) -> Result<u64> {
    require!(!claims.is_empty(), VestingError::EmptyBatch);
    require!(claims.len() <= MAX_CLAIM_BATCH, VestingError::BatchTooLarge);
    require!(
        records.len() == claims.len(),
        VestingError::InvalidClaimStatus
    );

    let vestings = d.vestings.clone();
    let snapshot = records.to_vec();
    let result = apply_claims(d, records, claims, claimant, now)
        .and_then(|total| ledger.transfer(destination, total).map(|()| total));
    if result.is_err() {
        d.vestings = vestings;
        records.clone_from_slice(&snapshot);
    }
    result
}

fn apply_claims(
    d: &mut Distributor,
    records: &mut [ClaimStatus],
    claims: &[ClaimArgs],
    claimant: &Pubkey,
    now: i64,
) -> Result<u64> {
    let mut total: u64 = 0;
    for (i, (args, record)) in claims.iter().zip(records.iter_mut()).enumerate() {
        // An earlier entry of this batch already consumed the same record.
        let claimed_in_batch = claims[..i]
            .iter()
            .any(|c| c.vesting_index == args.vesting_index);
        apply_claim(d, record, claimed_in_batch, args, claimant, now)?;
        total = total
            .checked_add(args.amount)
            .ok_or(VestingError::MathOverflow)?;
    }
    Ok(total)
}

/// Guards, in order: vesting exists, started, not paused, not claimed,
/// proof valid, balance strictly above `amount`.
fn apply_claim(
    d: &mut Distributor,
    record: &mut ClaimStatus,
    claimed_in_batch: bool,
    args: &ClaimArgs,
    claimant: &Pubkey,
    now: i64,
) -> Result<()> {
    let vesting = d.vesting_mut(args.vesting_index)?;
    vesting.ensure_claimable(now)?;
    require!(
        !record.claimed && !claimed_in_batch,
        VestingError::AlreadyClaimed
    );
    require!(
        merkle::verify(claimant, args.amount, &args.proof, &vesting.root),
        VestingError::InvalidProof
    );
    vesting.debit(args.amount)?;

    record.claimant = *claimant;
    record.vesting_index = args.vesting_index;
    record.claimed = true;
    record.amount = args.amount;
    record.claimed_at = now;
    Ok(())
}

#[derive(Accounts)]
#[instruction(amount: u64, vesting_index: u32)]
pub struct Claim<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        init_if_needed,
        payer = claimant,
        space = 8 + ClaimStatus::SIZE,
        seeds = [
            CLAIM_SEED,
            distributor.key().as_ref(),
            claimant.key().as_ref(),
            vesting_index.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub claim_status: Account<'info, ClaimStatus>,

    #[account(
        mut,
        seeds = [VAULT_SEED, distributor.key().as_ref()],
        bump = distributor.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = claimant_token_account.mint == distributor.mint @ VestingError::InvalidTokenMint,
        constraint = claimant_token_account.owner == claimant.key() @ VestingError::InvalidTokenAccount,
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct Claimed {
    pub claimant: Pubkey,
    pub index: u32,
    pub amount: u64,
    pub remaining: u64,
}
