use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::state::Distributor;

pub fn reschedule(ctx: Context<Reschedule>, vesting_index: u32, new_start_ts: i64) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let now = Clock::get()?.unix_timestamp;
    let d = &mut ctx.accounts.distributor;
    let old_start_ts = d.vesting(vesting_index)?.start_ts;

    process_reschedule(d, &admin, vesting_index, new_start_ts, now)?;

    emit!(VestingRescheduled {
        index: vesting_index,
        old_start_ts,
        new_start_ts,
    });
    Ok(())
}

pub(crate) fn process_reschedule(
    d: &mut Distributor,
    signer: &Pubkey,
    vesting_index: u32,
    new_start_ts: i64,
    now: i64,
) -> Result<()> {
    d.ensure_admin(signer)?;
    d.vesting_mut(vesting_index)?.reschedule(now, new_start_ts)
}

#[derive(Accounts)]
pub struct Reschedule<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct VestingRescheduled {
    pub index: u32,
    pub old_start_ts: i64,
    pub new_start_ts: i64,
}
