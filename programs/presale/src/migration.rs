use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_lang::Discriminator;

use crate::errors::PresaleError;
use crate::state::{LegacyPresaleState, PresaleState};

/// Decodes presale state in either the current or the legacy layout.
/// The flag is true when the account still needs to grow.
pub fn load_presale_state(data: &[u8], tokens_per_sol: u64) -> Result<(PresaleState, bool)> {
    let disc_len = PresaleState::DISCRIMINATOR.len();
    require!(
        data.len() >= disc_len && &data[..disc_len] == PresaleState::DISCRIMINATOR,
        PresaleError::InvalidAccount
    );

    if data.len() >= disc_len + PresaleState::LEN {
        let state = PresaleState::try_deserialize(&mut &data[..])?;
        return Ok((state, false));
    }

    require!(
        data.len() >= disc_len + LegacyPresaleState::LEN,
        PresaleError::InvalidAccount
    );
    let legacy = LegacyPresaleState::deserialize(&mut &data[disc_len..])
        .map_err(|_| error!(PresaleError::InvalidAccount))?;
    Ok((legacy.upgrade(tokens_per_sol), true))
}

/// Grows `account` to the current layout, topping up rent from `payer`.
pub fn grow_to_current_layout<'info>(
    account: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let new_size = 8 + PresaleState::LEN;
    let minimum_balance = Rent::get()?.minimum_balance(new_size);
    let current = account.lamports();

    if current < minimum_balance {
        let top_up = minimum_balance
            .checked_sub(current)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                system_program::Transfer {
                    from: payer.clone(),
                    to: account.clone(),
                },
            ),
            top_up,
        )?;
    }

    #[allow(deprecated)]
    account.realloc(new_size, false)?;
    Ok(())
}

pub fn store_presale_state(account: &AccountInfo, state: &PresaleState) -> Result<()> {
    let mut data = account.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    state.try_serialize(&mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::active_presale;

    fn legacy_bytes(state: &PresaleState) -> Vec<u8> {
        let legacy = LegacyPresaleState {
            admin: state.admin,
            authority: state.authority,
            governance: state.governance,
            token_program: state.token_program,
            token_program_state: state.token_program_state,
            presale_token_mint: state.presale_token_mint,
            status: state.status,
            total_tokens_sold: state.total_tokens_sold,
            total_raised: state.total_raised,
            governance_set: state.governance_set,
            treasury_address: state.treasury_address,
            max_presale_cap: state.max_presale_cap,
            max_per_user: state.max_per_user,
            token_price_usd_micro: state.token_price_usd_micro,
            bump: state.bump,
        };
        let mut bytes = PresaleState::DISCRIMINATOR.to_vec();
        legacy.serialize(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn legacy_layout_keeps_every_field() {
        let mut before = active_presale(Pubkey::new_unique());
        before.total_tokens_sold = 42_000;
        before.total_raised = 9_999;
        before.max_presale_cap = 1_000_000;
        before.treasury_address = Pubkey::new_unique();

        let bytes = legacy_bytes(&before);
        assert_eq!(bytes.len(), 8 + LegacyPresaleState::LEN);

        let (migrated, needs_growth) = load_presale_state(&bytes, 133_000_000_000_000).unwrap();
        assert!(needs_growth);
        assert_eq!(migrated.admin, before.admin);
        assert_eq!(migrated.authority, before.authority);
        assert_eq!(migrated.presale_token_mint, before.presale_token_mint);
        assert_eq!(migrated.status, before.status);
        assert_eq!(migrated.total_tokens_sold, 42_000);
        assert_eq!(migrated.total_raised, 9_999);
        assert_eq!(migrated.max_presale_cap, 1_000_000);
        assert_eq!(migrated.treasury_address, before.treasury_address);
        assert_eq!(migrated.token_price_usd_micro, before.token_price_usd_micro);
        assert_eq!(migrated.bump, before.bump);
        assert_eq!(migrated.tokens_per_sol, 133_000_000_000_000);
    }

    #[test]
    fn current_layout_round_trips_through_store() {
        let mut state = active_presale(Pubkey::new_unique());
        state.tokens_per_sol = 5;

        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; 8 + PresaleState::LEN];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);
        store_presale_state(&info, &state).unwrap();

        let (loaded, needs_growth) = load_presale_state(&info.try_borrow_data().unwrap(), 0).unwrap();
        assert!(!needs_growth);
        assert_eq!(loaded.tokens_per_sol, 5);
        assert_eq!(loaded.authority, state.authority);
    }

    #[test]
    fn foreign_or_truncated_data_is_rejected() {
        assert_eq!(
            load_presale_state(&[0u8; 8 + PresaleState::LEN], 1).unwrap_err(),
            PresaleError::InvalidAccount.into()
        );

        let state = active_presale(Pubkey::new_unique());
        let mut bytes = legacy_bytes(&state);
        bytes.truncate(40);
        assert_eq!(
            load_presale_state(&bytes, 1).unwrap_err(),
            PresaleError::InvalidAccount.into()
        );
    }
}
