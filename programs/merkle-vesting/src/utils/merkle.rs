//! Sorted-pair Merkle proof verification.
//!
//! Leaf: `BLAKE3(claimant || amount.to_le_bytes())`.
//! Parent: `BLAKE3(min(a, b) || max(a, b))`, ordering the two 32-byte digests
//! as unsigned big-endian integers. Off-chain tree builders must produce
//! proofs under exactly these rules.

use anchor_lang::prelude::Pubkey;

use crate::constants::HASH_BYTES;

pub type Hash = [u8; HASH_BYTES];

/// Leaf committed for one `(claimant, amount)` entitlement.
pub fn leaf(claimant: &Pubkey, amount: u64) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(claimant.as_ref());
    hasher.update(&amount.to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// Hash two sibling nodes. Commutative: the smaller digest goes first.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = blake3::Hasher::new();
    hasher.update(lo);
    hasher.update(hi);
    *hasher.finalize().as_bytes()
}

/// Folds `proof` (siblings from leaf to root) onto `leaf`.
pub fn compute_root(leaf: Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(leaf, |computed, sibling| hash_pair(&computed, sibling))
}

/// True iff `(claimant, amount)` is committed under `root`.
pub fn verify(claimant: &Pubkey, amount: u64, proof: &[Hash], root: &Hash) -> bool {
    compute_root(leaf(claimant, amount), proof) == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MerkleTree;

    fn entries(n: usize) -> Vec<(Pubkey, u64)> {
        (0..n)
            .map(|i| (Pubkey::new_unique(), 100 * (i as u64 + 1)))
            .collect()
    }

    fn flip_bit(hash: &Hash, byte: usize, bit: u8) -> Hash {
        let mut out = *hash;
        out[byte] ^= 1 << bit;
        out
    }

    #[test]
    fn every_member_of_an_odd_sized_tree_verifies() {
        let entries = entries(7);
        let tree = MerkleTree::from_entries(&entries);
        for (i, (claimant, amount)) in entries.iter().enumerate() {
            assert!(verify(claimant, *amount, &tree.proof(i), &tree.root()));
        }
    }

    #[test]
    fn single_leaf_tree_uses_empty_proof() {
        let claimant = Pubkey::new_unique();
        let root = leaf(&claimant, 30);
        assert!(verify(&claimant, 30, &[], &root));
        assert!(!verify(&claimant, 31, &[], &root));
    }

    #[test]
    fn pair_hash_is_commutative() {
        let a = leaf(&Pubkey::new_unique(), 1);
        let b = leaf(&Pubkey::new_unique(), 2);
        assert_eq!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn near_miss_inputs_are_rejected() {
        let entries = entries(5);
        let tree = MerkleTree::from_entries(&entries);
        let (claimant, amount) = entries[2];
        let proof = tree.proof(2);
        let root = tree.root();
        assert!(verify(&claimant, amount, &proof, &root));

        // amount
        for bit in 0..64 {
            assert!(!verify(&claimant, amount ^ (1 << bit), &proof, &root));
        }
        // claimant
        let key_bytes = claimant.to_bytes();
        for byte in [0, 15, 31] {
            let mutated = Pubkey::new_from_array(flip_bit(&key_bytes, byte, 3));
            assert!(!verify(&mutated, amount, &proof, &root));
        }
        // each proof element
        for i in 0..proof.len() {
            let mut bad = proof.clone();
            bad[i] = flip_bit(&bad[i], 7, 0);
            assert!(!verify(&claimant, amount, &bad, &root));
        }
        // root
        assert!(!verify(&claimant, amount, &proof, &flip_bit(&root, 31, 7)));
    }

    #[test]
    fn proof_for_another_member_does_not_transfer() {
        let entries = entries(4);
        let tree = MerkleTree::from_entries(&entries);
        let (claimant, amount) = entries[0];
        assert!(!verify(&claimant, amount, &tree.proof(1), &tree.root()));
    }

    #[test]
    fn adversarial_proofs_only_mismatch() {
        let claimant = Pubkey::new_unique();
        let root = leaf(&claimant, 5);
        let dup = vec![root; 4];
        assert!(!verify(&claimant, 5, &dup, &root));
        assert!(!verify(&claimant, 5, &[[0u8; 32]], &root));
    }
}
