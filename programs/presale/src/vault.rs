//! Signing for the program-owned vaults. A `VaultAuthority` can only be built
//! inside this crate, from the vault's own seeds, so no instruction takes an
//! outside signer for moving vault funds.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Transfer};

use crate::constants::{PRESALE_PAYMENT_VAULT_SEED, PRESALE_SOL_VAULT_SEED, PRESALE_TOKEN_VAULT_SEED};
use crate::errors::PresaleError;

/// The SOL vault is a bare system account, so it must either be empty or
/// hold at least the rent-exempt minimum for zero bytes of data.
pub(crate) fn ensure_sol_vault_rent_exempt(balance_after: u64, rent_minimum: u64) -> Result<()> {
    require!(
        balance_after == 0 || balance_after >= rent_minimum,
        PresaleError::SolVaultBelowRentMinimum
    );
    Ok(())
}

pub(crate) struct VaultAuthority<'info> {
    account: AccountInfo<'info>,
    seeds: Vec<Vec<u8>>,
}

impl<'info> VaultAuthority<'info> {
    /// Owner of the presale token vault: `["presale_token_vault_pda", mint]`.
    pub(crate) fn presale_tokens(account: AccountInfo<'info>, mint: &Pubkey, bump: u8) -> Self {
        Self {
            account,
            seeds: vec![
                PRESALE_TOKEN_VAULT_SEED.to_vec(),
                mint.to_bytes().to_vec(),
                vec![bump],
            ],
        }
    }

    /// Owner of a payment vault: `["presale_payment_vault_pda", presale_state, mint]`.
    pub(crate) fn payment_tokens(
        account: AccountInfo<'info>,
        presale_state: &Pubkey,
        mint: &Pubkey,
        bump: u8,
    ) -> Self {
        Self {
            account,
            seeds: vec![
                PRESALE_PAYMENT_VAULT_SEED.to_vec(),
                presale_state.to_bytes().to_vec(),
                mint.to_bytes().to_vec(),
                vec![bump],
            ],
        }
    }

    /// The SOL vault holds lamports directly: `["presale_sol_vault", presale_state]`.
    pub(crate) fn sol(account: AccountInfo<'info>, presale_state: &Pubkey, bump: u8) -> Self {
        Self {
            account,
            seeds: vec![
                PRESALE_SOL_VAULT_SEED.to_vec(),
                presale_state.to_bytes().to_vec(),
                vec![bump],
            ],
        }
    }

    fn signer_seeds(&self) -> Vec<&[u8]> {
        self.seeds.iter().map(Vec::as_slice).collect()
    }

    pub(crate) fn transfer_tokens(
        &self,
        token_program: AccountInfo<'info>,
        from: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let seeds = self.signer_seeds();
        let signer = &[&seeds[..]];
        let cpi_accounts = Transfer {
            from,
            to,
            authority: self.account.clone(),
        };
        token::transfer(
            CpiContext::new_with_signer(token_program, cpi_accounts, signer),
            amount,
        )
    }

    pub(crate) fn transfer_lamports(
        &self,
        system_program: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let seeds = self.signer_seeds();
        let signer = &[&seeds[..]];
        let cpi_accounts = system_program::Transfer {
            from: self.account.clone(),
            to,
        };
        system_program::transfer(
            CpiContext::new_with_signer(system_program, cpi_accounts, signer),
            amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(seeds: &[&[u8]]) -> (Pubkey, u8) {
        Pubkey::find_program_address(seeds, &crate::ID)
    }

    fn assert_seeds_sign_for(vault: &VaultAuthority, expected: &Pubkey) {
        let derived = Pubkey::create_program_address(&vault.signer_seeds(), &crate::ID).unwrap();
        assert_eq!(derived, *expected);
    }

    #[test]
    fn handles_carry_the_seeds_of_their_vault() {
        let mint = Pubkey::new_unique();
        let presale_state = Pubkey::new_unique();
        let owner = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];

        let (token_vault, token_bump) = derive(&[PRESALE_TOKEN_VAULT_SEED, mint.as_ref()]);
        let info = AccountInfo::new(&token_vault, false, true, &mut lamports, &mut data, &owner, false, 0);
        assert_seeds_sign_for(&VaultAuthority::presale_tokens(info, &mint, token_bump), &token_vault);

        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let (payment_vault, payment_bump) = derive(&[
            PRESALE_PAYMENT_VAULT_SEED,
            presale_state.as_ref(),
            mint.as_ref(),
        ]);
        let info = AccountInfo::new(&payment_vault, false, true, &mut lamports, &mut data, &owner, false, 0);
        assert_seeds_sign_for(
            &VaultAuthority::payment_tokens(info, &presale_state, &mint, payment_bump),
            &payment_vault,
        );

        let mut lamports = 0u64;
        let mut data: Vec<u8> = vec![];
        let (sol_vault, sol_bump) = derive(&[PRESALE_SOL_VAULT_SEED, presale_state.as_ref()]);
        let info = AccountInfo::new(&sol_vault, false, true, &mut lamports, &mut data, &owner, false, 0);
        assert_seeds_sign_for(&VaultAuthority::sol(info, &presale_state, sol_bump), &sol_vault);
    }

    #[test]
    fn sol_vault_is_empty_or_rent_exempt() {
        let minimum = Rent::default().minimum_balance(0);

        // First purchase too small to open the vault
        assert_eq!(
            ensure_sol_vault_rent_exempt(minimum - 1, minimum).unwrap_err(),
            PresaleError::SolVaultBelowRentMinimum.into()
        );
        assert!(ensure_sol_vault_rent_exempt(minimum, minimum).is_ok());

        // Withdrawals may drain the vault fully but not leave dust
        assert!(ensure_sol_vault_rent_exempt(0, minimum).is_ok());
        assert_eq!(
            ensure_sol_vault_rent_exempt(1, minimum).unwrap_err(),
            PresaleError::SolVaultBelowRentMinimum.into()
        );
    }
}
