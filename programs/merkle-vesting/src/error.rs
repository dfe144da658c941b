use anchor_lang::prelude::*;

/// Custom error codes for the Merkle vesting distributor.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Vesting list must not be empty")]
    EmptyVestingList,

    #[msg("Parallel input arrays differ in length")]
    LengthMismatch,

    #[msg("Invalid total reward (must be > 0)")]
    InvalidTotalReward,

    #[msg("Vesting list is full")]
    VestingListFull,

    #[msg("Vesting not found")]
    VestingNotFound,

    #[msg("Vesting has not started yet")]
    VestingNotActive,

    #[msg("Vesting is paused")]
    VestingPaused,

    #[msg("Vesting is already paused")]
    AlreadyPaused,

    #[msg("Vesting is not paused")]
    NotPaused,

    #[msg("Vesting start has already passed")]
    ActivationPassed,

    #[msg("Reward already claimed for this vesting")]
    AlreadyClaimed,

    #[msg("Invalid Merkle proof: wrong claim details")]
    InvalidProof,

    #[msg("Funding would exceed the vesting total reward")]
    OverFunding,

    #[msg("Insufficient vesting balance")]
    InsufficientVestingBalance,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Invalid claim status account")]
    InvalidClaimStatus,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Token account not provided to the ledger")]
    TokenAccountNotFound,

    #[msg("Transfer authority not provided to the ledger")]
    MissingTransferAuthority,

    #[msg("Math overflow")]
    MathOverflow,
}
