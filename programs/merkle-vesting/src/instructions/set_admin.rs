use anchor_lang::prelude::*;

use crate::constants::DISTRIBUTOR_SEED;
use crate::error::VestingError;
use crate::state::Distributor;

pub fn set_admin(ctx: Context<SetAdmin>, new_admin: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let d = &mut ctx.accounts.distributor;
    process_set_admin(d, &admin, new_admin)?;

    emit!(AdminChanged {
        old_admin: admin,
        new_admin,
    });
    Ok(())
}

pub(crate) fn process_set_admin(d: &mut Distributor, signer: &Pubkey, new_admin: Pubkey) -> Result<()> {
    d.ensure_admin(signer)?;
    require!(new_admin != Pubkey::default(), VestingError::InvalidPubkey);
    d.admin = new_admin;
    Ok(())
}

#[derive(Accounts)]
pub struct SetAdmin<'info> {
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Box<Account<'info, Distributor>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminChanged {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn handover_moves_the_gate() {
        let old = Pubkey::new_unique();
        let new = Pubkey::new_unique();
        let mut d = Distributor {
            admin: old,
            ..Default::default()
        };
        process_set_admin(&mut d, &old, new).unwrap();
        assert_eq!(d.admin, new);
        assert_eq!(
            process_set_admin(&mut d, &old, old).unwrap_err(),
            Error::from(VestingError::UnauthorizedAdmin)
        );
    }

    #[test]
    fn zero_key_is_rejected() {
        let old = Pubkey::new_unique();
        let mut d = Distributor {
            admin: old,
            ..Default::default()
        };
        assert_eq!(
            process_set_admin(&mut d, &old, Pubkey::default()).unwrap_err(),
            Error::from(VestingError::InvalidPubkey)
        );
        assert_eq!(d.admin, old);
    }
}
