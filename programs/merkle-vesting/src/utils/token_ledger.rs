//! Token custody seam.
//!
//! The distributor engine never talks to the token program directly; it goes
//! through [`TokenLedger`]. On-chain that is [`SplTokenLedger`] (SPL Token
//! CPIs), in tests an in-memory ledger. Addresses are token account keys.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::DISTRIBUTOR_SEED;
use crate::error::VestingError;

pub trait TokenLedger {
    /// Moves `amount` out of custody into token account `to`.
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()>;

    /// Moves `amount` from token account `from` into token account `to`
    /// under an external authority.
    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;
}

/// [`TokenLedger`] backed by SPL Token CPIs against the distributor vault.
pub struct SplTokenLedger<'info> {
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    /// Distributor PDA; owner of the vault.
    vault_authority: AccountInfo<'info>,
    mint: Pubkey,
    bump: u8,
    accounts: Vec<AccountInfo<'info>>,
    authority: Option<AccountInfo<'info>>,
}

impl<'info> SplTokenLedger<'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        vault_authority: AccountInfo<'info>,
        mint: Pubkey,
        bump: u8,
    ) -> Self {
        Self {
            token_program,
            vault,
            vault_authority,
            mint,
            bump,
            accounts: Vec::new(),
            authority: None,
        }
    }

    /// Registers a counterparty token account.
    pub fn with_account(mut self, account: AccountInfo<'info>) -> Self {
        self.accounts.push(account);
        self
    }

    /// Signer allowed to move tokens out of counterparty accounts.
    pub fn with_authority(mut self, authority: AccountInfo<'info>) -> Self {
        self.authority = Some(authority);
        self
    }

    fn find(&self, key: &Pubkey) -> Result<&AccountInfo<'info>> {
        if self.vault.key == key {
            return Ok(&self.vault);
        }
        self.accounts
            .iter()
            .find(|a| a.key == key)
            .ok_or_else(|| VestingError::TokenAccountNotFound.into())
    }
}

impl<'info> TokenLedger for SplTokenLedger<'info> {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let to = self.find(to)?.clone();
        let bump = [self.bump];
        let signer_seeds: &[&[&[u8]]] = &[&[DISTRIBUTOR_SEED, self.mint.as_ref(), &bump]];
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to,
                    authority: self.vault_authority.clone(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let authority = self
            .authority
            .clone()
            .ok_or(VestingError::MissingTransferAuthority)?;
        let from = self.find(from)?.clone();
        let to = self.find(to)?.clone();
        token::transfer(
            CpiContext::new(
                self.token_program.clone(),
                Transfer {
                    from,
                    to,
                    authority,
                },
            ),
            amount,
        )
    }
}
