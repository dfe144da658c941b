use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CLAIM_SEED, DISTRIBUTOR_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::instructions::claim::process_claims;
use crate::state::{ClaimArgs, ClaimStatus, Distributor};
use crate::utils::token_ledger::SplTokenLedger;

/// Claims several vestings in one instruction.
///
/// `remaining_accounts` carries one writable claim status PDA per entry of
/// `claims`, in the same order. Missing PDAs are created, paid by the
/// claimant, including addresses that already hold lamports.
pub fn claim_multiple<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimMultiple<'info>>,
    claims: Vec<ClaimArgs>,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == claims.len(),
        VestingError::InvalidClaimStatus
    );
    let now = Clock::get()?.unix_timestamp;
    let claimant = ctx.accounts.claimant.key();
    let destination = ctx.accounts.claimant_token_account.key();
    let distributor_key = ctx.accounts.distributor.key();
    let claimant_info = ctx.accounts.claimant.to_account_info();
    let system_info = ctx.accounts.system_program.to_account_info();

    let mut records: Vec<ClaimStatus> = Vec::with_capacity(claims.len());
    for (i, (args, info)) in claims.iter().zip(ctx.remaining_accounts).enumerate() {
        // Repeated index: the record is loaded once; the batch check rejects it.
        if let Some(j) = claims[..i]
            .iter()
            .position(|c| c.vesting_index == args.vesting_index)
        {
            records.push(records[j].clone());
            continue;
        }
        let record = match load_record(info, &distributor_key, &claimant, args.vesting_index)? {
            LoadedRecord::Existing(record) => record,
            LoadedRecord::Missing { bump } => {
                init_record(
                    info,
                    &claimant_info,
                    &system_info,
                    &distributor_key,
                    args.vesting_index,
                    bump,
                )?;
                ClaimStatus {
                    bump,
                    ..Default::default()
                }
            }
        };
        records.push(record);
    }

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

    let total = process_claims(d, &mut records, &claims, &claimant, &destination, now, &mut ledger)?;

    for (record, info) in records.iter().zip(ctx.remaining_accounts) {
        store_record(info, record)?;
        emit!(crate::instructions::Claimed {
            claimant,
            index: record.vesting_index,
            amount: record.amount,
            remaining: d.vesting(record.vesting_index)?.remaining,
        });
    }
    msg!("claimed {} vesting(s), {} tokens", claims.len(), total);
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum LoadedRecord {
    Existing(ClaimStatus),
    /// Not created yet; `bump` is the canonical bump of its address.
    Missing { bump: u8 },
}

/// How a missing record gets its rent and space.
#[derive(Debug, PartialEq, Eq)]
enum RecordFunding {
    /// Empty address: one `create_account`.
    Create { lamports: u64 },
    /// Address already holds lamports, so `create_account` would fail.
    /// Top up to rent exemption, then allocate and assign.
    Adopt { top_up: u64 },
}

fn record_funding(current_lamports: u64, rent_minimum: u64) -> RecordFunding {
    if current_lamports == 0 {
        RecordFunding::Create {
            lamports: rent_minimum,
        }
    } else {
        RecordFunding::Adopt {
            top_up: rent_minimum.saturating_sub(current_lamports),
        }
    }
}

fn load_record(
    info: &AccountInfo,
    distributor: &Pubkey,
    claimant: &Pubkey,
    vesting_index: u32,
) -> Result<LoadedRecord> {
    let (expected, bump) = Pubkey::find_program_address(
        &[
            CLAIM_SEED,
            distributor.as_ref(),
            claimant.as_ref(),
            vesting_index.to_le_bytes().as_ref(),
        ],
        &crate::ID,
    );
    require_keys_eq!(*info.key, expected, VestingError::InvalidClaimStatus);
    require!(info.is_writable, VestingError::InvalidClaimStatus);

    if info.owner == &crate::ID {
        let data = info.try_borrow_data()?;
        let record = ClaimStatus::try_deserialize(&mut &data[..])?;
        return Ok(LoadedRecord::Existing(record));
    }
    require_keys_eq!(*info.owner, System::id(), VestingError::InvalidClaimStatus);
    require!(info.data_is_empty(), VestingError::InvalidClaimStatus);
    Ok(LoadedRecord::Missing { bump })
}

fn init_record<'info>(
    info: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    distributor: &Pubkey,
    vesting_index: u32,
    bump: u8,
) -> Result<()> {
    let space = 8 + ClaimStatus::SIZE;
    let rent_minimum = Rent::get()?.minimum_balance(space);
    let index_bytes = vesting_index.to_le_bytes();
    let bump_bytes = [bump];
    let signer_seeds: &[&[&[u8]]] = &[&[
        CLAIM_SEED,
        distributor.as_ref(),
        payer.key.as_ref(),
        &index_bytes,
        &bump_bytes,
    ]];

    match record_funding(info.lamports(), rent_minimum) {
        RecordFunding::Create { lamports } => system_program::create_account(
            CpiContext::new_with_signer(
                system.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: info.clone(),
                },
                signer_seeds,
            ),
            lamports,
            space as u64,
            &crate::ID,
        ),
        RecordFunding::Adopt { top_up } => {
            if top_up > 0 {
                system_program::transfer(
                    CpiContext::new(
                        system.clone(),
                        Transfer {
                            from: payer.clone(),
                            to: info.clone(),
                        },
                    ),
                    top_up,
                )?;
            }
            system_program::allocate(
                CpiContext::new_with_signer(
                    system.clone(),
                    Allocate {
                        account_to_allocate: info.clone(),
                    },
                    signer_seeds,
                ),
                space as u64,
            )?;
            system_program::assign(
                CpiContext::new_with_signer(
                    system.clone(),
                    Assign {
                        account_to_assign: info.clone(),
                    },
                    signer_seeds,
                ),
                &crate::ID,
            )
        }
    }
}

fn store_record(info: &AccountInfo, record: &ClaimStatus) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    record.try_serialize(&mut writer)
}

#[derive(Accounts)]
pub struct ClaimMultiple<'info> {
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
        constraint = claimant_token_account.mint == distributor.mint @ VestingError::InvalidTokenMint,
        constraint = claimant_token_account.owner == claimant.key() @ VestingError::InvalidTokenAccount,
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryLedger, MerkleTree};
    use anchor_lang::error::Error;

    const NOW: i64 = 1_700_000_000;
    const RECORD_SPACE: usize = 8 + ClaimStatus::SIZE;

    fn record_address(distributor: &Pubkey, claimant: &Pubkey, vesting_index: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                CLAIM_SEED,
                distributor.as_ref(),
                claimant.as_ref(),
                vesting_index.to_le_bytes().as_ref(),
            ],
            &crate::ID,
        )
    }

    fn record_data(record: &ClaimStatus) -> Vec<u8> {
        let mut data = vec![0u8; RECORD_SPACE];
        let mut writer: &mut [u8] = &mut data[..];
        record.try_serialize(&mut writer).unwrap();
        data
    }

    fn account<'a>(
        key: &'a Pubkey,
        writable: bool,
        lamports: &'a mut u64,
        data: &'a mut [u8],
        owner: &'a Pubkey,
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, writable, lamports, data, owner, false, 0)
    }

    fn assert_rejected<T: std::fmt::Debug>(result: Result<T>, expected: VestingError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    #[test]
    fn record_under_the_wrong_address_is_rejected() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        // Address of index 1 presented for index 0.
        let (key, _) = record_address(&distributor, &claimant, 1);
        let mut lamports = 1_000_000;
        let mut data = record_data(&ClaimStatus::default());
        let owner = crate::ID;
        let info = account(&key, true, &mut lamports, &mut data, &owner);

        assert_rejected(
            load_record(&info, &distributor, &claimant, 0),
            VestingError::InvalidClaimStatus,
        );
    }

    #[test]
    fn read_only_record_is_rejected() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let (key, _) = record_address(&distributor, &claimant, 0);
        let mut lamports = 1_000_000;
        let mut data = record_data(&ClaimStatus::default());
        let owner = crate::ID;
        let info = account(&key, false, &mut lamports, &mut data, &owner);

        assert_rejected(
            load_record(&info, &distributor, &claimant, 0),
            VestingError::InvalidClaimStatus,
        );
    }

    #[test]
    fn record_owned_by_another_program_is_rejected() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let (key, _) = record_address(&distributor, &claimant, 0);
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; RECORD_SPACE];
        let owner = Pubkey::new_unique();
        let info = account(&key, true, &mut lamports, &mut data, &owner);

        assert_rejected(
            load_record(&info, &distributor, &claimant, 0),
            VestingError::InvalidClaimStatus,
        );
    }

    #[test]
    fn existing_claimed_record_blocks_a_second_batch() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let (key, bump) = record_address(&distributor, &claimant, 0);
        let claimed = ClaimStatus {
            claimant,
            vesting_index: 0,
            claimed: true,
            amount: 4,
            claimed_at: NOW - 10,
            bump,
        };
        let mut lamports = 1_000_000;
        let mut data = record_data(&claimed);
        let owner = crate::ID;
        let info = account(&key, true, &mut lamports, &mut data, &owner);

        let record = match load_record(&info, &distributor, &claimant, 0).unwrap() {
            LoadedRecord::Existing(record) => record,
            other => panic!("expected an existing record, got {other:?}"),
        };
        assert_eq!(record, claimed);

        let vault = Pubkey::new_unique();
        let mut d = Distributor {
            vault,
            ..Default::default()
        };
        let tree = MerkleTree::from_entries(&[(claimant, 4), (Pubkey::new_unique(), 4)]);
        let index = d.push_vesting(tree.root(), NOW, 20).unwrap();
        d.vesting_mut(index).unwrap().fund(20).unwrap();
        let mut ledger = MemoryLedger::new(vault, 20);
        let claims = [ClaimArgs {
            amount: 4,
            vesting_index: 0,
            proof: tree.proof(0),
        }];
        let mut records = [record];

        assert_rejected(
            process_claims(&mut d, &mut records, &claims, &claimant, &claimant, NOW, &mut ledger),
            VestingError::AlreadyClaimed,
        );
        assert_eq!(d.vestings[0].remaining, 20);
        assert_eq!(ledger.balance(&vault), 20);
    }

    #[test]
    fn pre_funded_address_is_adopted() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let (key, bump) = record_address(&distributor, &claimant, 3);
        // Anyone can send lamports to the address before the first claim.
        let mut lamports = 1;
        let mut data: Vec<u8> = Vec::new();
        let owner = System::id();
        let info = account(&key, true, &mut lamports, &mut data, &owner);

        assert_eq!(
            load_record(&info, &distributor, &claimant, 3).unwrap(),
            LoadedRecord::Missing { bump }
        );

        let rent_minimum = 1_113_600;
        assert_eq!(
            record_funding(info.lamports(), rent_minimum),
            RecordFunding::Adopt {
                top_up: rent_minimum - 1
            }
        );
        assert_eq!(
            record_funding(0, rent_minimum),
            RecordFunding::Create {
                lamports: rent_minimum
            }
        );
        assert_eq!(
            record_funding(rent_minimum + 5, rent_minimum),
            RecordFunding::Adopt { top_up: 0 }
        );
    }

    #[test]
    fn stored_record_loads_back() {
        let distributor = Pubkey::new_unique();
        let claimant = Pubkey::new_unique();
        let (key, bump) = record_address(&distributor, &claimant, 2);
        // Freshly allocated: zeroed data already owned by the program.
        let mut lamports = 1_000_000;
        let mut data = vec![0u8; RECORD_SPACE];
        let owner = crate::ID;
        let info = account(&key, true, &mut lamports, &mut data, &owner);

        let record = ClaimStatus {
            claimant,
            vesting_index: 2,
            claimed: true,
            amount: 9,
            claimed_at: NOW,
            bump,
        };
        store_record(&info, &record).unwrap();

        assert_eq!(
            load_record(&info, &distributor, &claimant, 2).unwrap(),
            LoadedRecord::Existing(record)
        );
    }
}
