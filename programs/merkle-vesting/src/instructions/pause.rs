use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::state::Distributor;

pub fn pause(ctx: Context<SetPaused>, vesting_index: u32) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    process_set_paused(&mut ctx.accounts.distributor, &admin, vesting_index, true)?;
    emit!(VestingPaused {
        admin,
        index: vesting_index,
    });
    Ok(())
}

pub(crate) fn process_set_paused(
    d: &mut Distributor,
    signer: &Pubkey,
    vesting_index: u32,
    paused: bool,
) -> Result<()> {
    d.ensure_admin(signer)?;
    d.vesting_mut(vesting_index)?.set_paused(paused)
}

/// Shared by `pause` and `unpause`.
#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,
    pub admin: Signer<'info>,
}

#[event]
pub struct VestingPaused {
    pub admin: Pubkey,
    pub index: u32,
}
