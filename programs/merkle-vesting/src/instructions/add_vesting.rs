use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::state::Distributor;
use crate::utils::merkle::Hash;

pub fn add_vesting(
    ctx: Context<AddVesting>,
    root: Hash,
    start_ts: i64,
    total_reward: u64,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let d = &mut ctx.accounts.distributor;
    let index = process_add_vesting(d, &admin, root, start_ts, total_reward)?;

    emit!(VestingAdded {
        index,
        root,
        start_ts,
        total_reward,
    });
    Ok(())
}

pub(crate) fn process_add_vesting(
    d: &mut Distributor,
    signer: &Pubkey,
    root: Hash,
    start_ts: i64,
    total_reward: u64,
) -> Result<u32> {
    d.ensure_admin(signer)?;
    d.push_vesting(root, start_ts, total_reward)
}

#[derive(Accounts)]
pub struct AddVesting<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct VestingAdded {
    pub index: u32,
    pub root: Hash,
    pub start_ts: i64,
    pub total_reward: u64,
}
