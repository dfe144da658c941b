use anchor_lang::prelude::*;

use crate::instructions::pause::{process_set_paused, SetPaused};

pub fn unpause(ctx: Context<SetPaused>, vesting_index: u32) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    process_set_paused(&mut ctx.accounts.distributor, &admin, vesting_index, false)?;
    emit!(VestingUnpaused {
        admin,
        index: vesting_index,
    });
    Ok(())
}

#[event]
pub struct VestingUnpaused {
    pub admin: Pubkey,
    pub index: u32,
}
