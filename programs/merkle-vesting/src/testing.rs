//! Host-side test support: an in-memory token ledger and an off-chain tree
//! builder producing proofs under the on-chain hashing rules.

use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::utils::merkle::{self, Hash};

#[derive(Default, Debug, Clone)]
pub struct MemoryLedger {
    pub custody: Pubkey,
    balances: HashMap<Pubkey, u64>,
    /// When set, every mutating call fails like a rejected CPI.
    pub fail_transfers: bool,
}

impl MemoryLedger {
    pub fn new(custody: Pubkey, balance: u64) -> Self {
        let mut ledger = Self {
            custody,
            ..Default::default()
        };
        ledger.balances.insert(custody, balance);
        ledger
    }

    pub fn mint_to(&mut self, account: Pubkey, amount: u64) {
        *self.balances.entry(account).or_default() += amount;
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn move_tokens(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if self.fail_transfers {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        let available = self.balance(from);
        if available < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        self.balances.insert(*from, available - amount);
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}

impl crate::utils::token_ledger::TokenLedger for MemoryLedger {
    fn transfer(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let custody = self.custody;
        self.move_tokens(&custody, to, amount)
    }

    fn transfer_from(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        self.move_tokens(from, to, amount)
    }
}

/// Sorted-pair tree; an unpaired node at the end of a layer is promoted.
pub struct MerkleTree {
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn from_entries(entries: &[(Pubkey, u64)]) -> Self {
        let leaves = entries
            .iter()
            .map(|(claimant, amount)| merkle::leaf(claimant, *amount))
            .collect();
        Self::from_leaves(leaves)
    }

    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        assert!(!leaves.is_empty());
        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let next = layers[layers.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => merkle::hash_pair(a, b),
                    [a] => *a,
                    _ => unreachable!(),
                })
                .collect();
            layers.push(next);
        }
        Self { layers }
    }

    pub fn root(&self) -> Hash {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn proof(&self, mut index: usize) -> Vec<Hash> {
        let mut proof = Vec::new();
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = index ^ 1;
            if sibling < layer.len() {
                proof.push(layer[sibling]);
            }
            index /= 2;
        }
        proof
    }
}
