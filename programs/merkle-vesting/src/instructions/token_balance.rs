use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{DISTRIBUTOR_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::state::Distributor;

/// Custody balance of the vault. Read-only; returned as instruction data.
pub fn token_balance(ctx: Context<TokenBalance>) -> Result<u64> {
    let balance = ctx.accounts.vault.amount;
    msg!("vault balance: {}", balance);
    Ok(balance)
}

#[derive(Accounts)]
pub struct TokenBalance<'info> {
    #[account(
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    #[account(
        seeds = [VAULT_SEED, distributor.key().as_ref()],
        bump = distributor.vault_bump,
        constraint = vault.mint == distributor.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,
}
