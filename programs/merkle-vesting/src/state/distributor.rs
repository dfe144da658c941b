use anchor_lang::prelude::*;

use crate::constants::MAX_VESTINGS;
use crate::error::VestingError;
use crate::state::Vesting;
use crate::utils::merkle::Hash;

/// Distributor PDA: administrative authority, custody wiring and the
/// append-only vesting collection.
#[account]
#[derive(Debug, Default)]
pub struct Distributor {
    /// Single principal allowed to add, fund, pause and reschedule vestings.
    pub admin: Pubkey,
    /// Token mint being distributed.
    pub mint: Pubkey,
    /// Custody token account (PDA owned by this distributor).
    pub vault: Pubkey,
    pub bump: u8,
    pub vault_bump: u8,
    /// Vestings indexed by position; never removed or reordered.
    pub vestings: Vec<Vesting>,
}

impl Distributor {
    /// Space for discriminator + fields + full vesting capacity.
    pub const fn space() -> usize {
        8 +
        32 + // admin
        32 + // mint
        32 + // vault
        1 +  // bump
        1 +  // vault_bump
        4 + MAX_VESTINGS * Vesting::SIZE
    }

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, VestingError::UnauthorizedAdmin);
        Ok(())
    }

    pub fn no_of_vestings(&self) -> u32 {
        self.vestings.len() as u32
    }

    pub fn vesting(&self, index: u32) -> Result<&Vesting> {
        self.vestings
            .get(index as usize)
            .ok_or_else(|| VestingError::VestingNotFound.into())
    }

    pub fn vesting_mut(&mut self, index: u32) -> Result<&mut Vesting> {
        self.vestings
            .get_mut(index as usize)
            .ok_or_else(|| VestingError::VestingNotFound.into())
    }

    /// Appends a vesting and returns its index.
    pub fn push_vesting(&mut self, root: Hash, start_ts: i64, total_reward: u64) -> Result<u32> {
        require!(
            self.vestings.len() < MAX_VESTINGS,
            VestingError::VestingListFull
        );
        let vesting = Vesting::new(root, start_ts, total_reward)?;
        self.vestings.push(vesting);
        Ok(self.no_of_vestings() - 1)
    }
}
