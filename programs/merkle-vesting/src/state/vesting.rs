use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::utils::merkle::Hash;

/// One vesting round: a committed allow-list and its reward pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vesting {
    /// Merkle root over `(claimant, amount)` leaves. Immutable.
    pub root: Hash,
    /// Claims open at this timestamp (Unix seconds, inclusive).
    pub start_ts: i64,
    /// Declared reward; caps the outstanding `remaining`, not lifetime payouts.
    pub total_reward: u64,
    /// Cumulative amount ever deposited. Payouts never exceed it.
    pub funded: u64,
    /// Funded and not yet claimed.
    pub remaining: u64,
    pub paused: bool,
}

impl Vesting {
    pub const SIZE: usize =
        32 + // root
        8 +  // start_ts
        8 +  // total_reward
        8 +  // funded
        8 +  // remaining
        1;   // paused

    pub fn new(root: Hash, start_ts: i64, total_reward: u64) -> Result<Self> {
        require!(total_reward > 0, VestingError::InvalidTotalReward);
        Ok(Self {
            root,
            start_ts,
            total_reward,
            funded: 0,
            remaining: 0,
            paused: false,
        })
    }

    pub fn is_active(&self, now: i64) -> bool {
        now >= self.start_ts
    }

    /// Credits `amount`. The outstanding balance stays within `total_reward`;
    /// re-funding after claims restores headroom.
    pub fn fund(&mut self, amount: u64) -> Result<()> {
        let post = self
            .remaining
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        require!(post <= self.total_reward, VestingError::OverFunding);
        self.funded = self
            .funded
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        self.remaining = post;
        Ok(())
    }

    /// Total paid out so far.
    pub fn claimed(&self) -> u64 {
        self.funded - self.remaining
    }

    /// Moves the start time; only before the current start is reached.
    pub fn reschedule(&mut self, now: i64, new_start_ts: i64) -> Result<()> {
        require!(!self.is_active(now), VestingError::ActivationPassed);
        self.start_ts = new_start_ts;
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            require!(!self.paused, VestingError::AlreadyPaused);
        } else {
            require!(self.paused, VestingError::NotPaused);
        }
        self.paused = paused;
        Ok(())
    }

    /// Time and pause gates of a claim, in that order.
    pub fn ensure_claimable(&self, now: i64) -> Result<()> {
        require!(self.is_active(now), VestingError::VestingNotActive);
        require!(!self.paused, VestingError::VestingPaused);
        Ok(())
    }

    /// Debits a claim. The balance must strictly exceed `amount`.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(
            self.remaining > amount,
            VestingError::InsufficientVestingBalance
        );
        self.remaining -= amount;
        Ok(())
    }
}
