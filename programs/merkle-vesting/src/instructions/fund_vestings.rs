use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{DISTRIBUTOR_SEED, MAX_FUND_BATCH, VAULT_SEED};
use crate::error::VestingError;
use crate::state::Distributor;
use crate::utils::token_ledger::{SplTokenLedger, TokenLedger};

pub fn fund_vestings(ctx: Context<FundVestings>, indices: Vec<u32>, amounts: Vec<u64>) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let source = ctx.accounts.admin_token_account.key();
    let vault = ctx.accounts.vault.key();

    let d_info = ctx.accounts.distributor.to_account_info();
    let d = &mut ctx.accounts.distributor;
    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        d_info,
        d.mint,
        d.bump,
    )
    .with_account(ctx.accounts.admin_token_account.to_account_info())
    .with_authority(ctx.accounts.admin.to_account_info());

    let total = process_fund_vestings(d, &admin, &indices, &amounts, &source, &vault, &mut ledger)?;

    for (index, amount) in indices.iter().zip(&amounts) {
        emit!(VestingFunded {
            index: *index,
            amount: *amount,
            remaining: d.vesting(*index)?.remaining,
        });
    }
    msg!("funded {} vesting(s), {} tokens", indices.len(), total);
    Ok(())
}

/// Credits every `(index, amount)` pair, then pulls the sum from `source`
/// into `vault`. Any failure leaves the vestings untouched.
pub(crate) fn process_fund_vestings<L: TokenLedger>(
    d: &mut Distributor,
    signer: &Pubkey,
    indices: &[u32],
    amounts: &[u64],
    source: &Pubkey,
    vault: &Pubkey,
    ledger: &mut L,
) -> Result<u64> {
    d.ensure_admin(signer)?;
    require!(!indices.is_empty(), VestingError::EmptyBatch);
    require!(indices.len() == amounts.len(), VestingError::LengthMismatch);
    require!(indices.len() <= MAX_FUND_BATCH, VestingError::BatchTooLarge);

    let snapshot = d.vestings.clone();
    let result = credit_all(d, indices, amounts)
        .and_then(|total| ledger.transfer_from(source, vault, total).map(|()| total));
    if result.is_err() {
        d.vestings = snapshot;
    }
    result
}

fn credit_all(d: &mut Distributor, indices: &[u32], amounts: &[u64]) -> Result<u64> {
    let mut total: u64 = 0;
    for (index, amount) in indices.iter().zip(amounts) {
        d.vesting_mut(*index)?.fund(*amount)?;
        total = total
            .checked_add(*amount)
            .ok_or(VestingError::MathOverflow)?;
    }
    Ok(total)
}

#[derive(Accounts)]
pub struct FundVestings<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, distributor.key().as_ref()],
        bump = distributor.vault_bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = admin_token_account.mint == distributor.mint @ VestingError::InvalidTokenMint,
        constraint = admin_token_account.owner == admin.key() @ VestingError::InvalidTokenAccount,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VestingFunded {
    pub index: u32,
    pub amount: u64,
    pub remaining: u64,
}
