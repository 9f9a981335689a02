use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{Mint, Token, TokenAccount};

use token_control::{Blacklist, TokenState, BLACKLIST_SEED};

pub mod constants;
pub mod errors;
pub mod events;
pub mod migration;
pub mod oracle;
pub mod pricing;
pub mod state;
mod vault;

use constants::*;
use errors::PresaleError;
use events::*;
use state::*;
use vault::VaultAuthority;

declare_id!("4e9SwBUtbpEUcwdwUEWzw2esekNdACpjYAwtzoqQ6o5H");

#[program]
pub mod presale {
    use super::*;

    // Initialize the presale contract
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        presale_token_mint: Pubkey,
        token_program: Pubkey,
        token_program_state: Pubkey,
        token_price_usd_micro: u64,
    ) -> Result<()> {
        for key in [admin, presale_token_mint, token_program, token_program_state] {
            require_keys_neq!(key, Pubkey::default(), PresaleError::ZeroOrDefaultAddress);
        }
        require!(token_price_usd_micro > 0, PresaleError::InvalidAmount);

        let presale_state = &mut ctx.accounts.presale_state;
        require_keys_eq!(
            presale_state.admin,
            Pubkey::default(),
            PresaleError::AlreadyInitialized
        );

        presale_state.admin = admin;
        presale_state.authority = admin; // Initially admin, can be transferred to governance
        presale_state.governance = Pubkey::default();
        presale_state.token_program = token_program;
        presale_state.token_program_state = token_program_state;
        presale_state.presale_token_mint = presale_token_mint;
        presale_state.status = PresaleStatus::NotStarted;
        presale_state.total_tokens_sold = 0;
        presale_state.total_raised = 0;
        presale_state.governance_set = false;
        presale_state.treasury_address = Pubkey::default(); // Can be set later via set_treasury_address
        presale_state.max_presale_cap = 0;
        presale_state.max_per_user = 0;
        presale_state.token_price_usd_micro = token_price_usd_micro;
        presale_state.bump = ctx.bumps.presale_state;
        presale_state.tokens_per_sol = 0;

        msg!(
            "Presale initialized with admin: {}, token_program: {}, token_price_usd_micro: {}",
            admin,
            token_program,
            token_price_usd_micro
        );
        Ok(())
    }

    /// Grows a presale account written before fixed-rate pricing existed and
    /// sets `tokens_per_sol` (0 keeps oracle pricing). Safe to call again on
    /// an already migrated account to change the rate.
    pub fn migrate_presale_state(
        ctx: Context<MigratePresaleState>,
        tokens_per_sol: u64,
    ) -> Result<()> {
        let account = ctx.accounts.presale_state.to_account_info();
        let (mut presale_state, from_legacy_layout) = {
            let data = account.try_borrow_data()?;
            migration::load_presale_state(&data, tokens_per_sol)?
        };
        require!(
            presale_state.is_controller(&ctx.accounts.authority.key()),
            PresaleError::Unauthorized
        );

        let old_rate = presale_state.tokens_per_sol;
        presale_state.tokens_per_sol = tokens_per_sol;

        if from_legacy_layout {
            migration::grow_to_current_layout(
                &account,
                &ctx.accounts.payer.to_account_info(),
                &ctx.accounts.system_program.to_account_info(),
            )?;
        }
        migration::store_presale_state(&account, &presale_state)?;

        emit!(PresaleMigrated {
            from_legacy_layout,
            tokens_per_sol,
        });
        msg!(
            "Presale state migrated (legacy layout: {}): tokens_per_sol {} -> {} by {}",
            from_legacy_layout,
            old_rate,
            tokens_per_sol,
            ctx.accounts.authority.key()
        );
        Ok(())
    }

    // Transfer authority to governance PDA (one-time operation)
    pub fn set_governance(ctx: Context<SetGovernance>, new_authority: Pubkey) -> Result<()> {
        let presale_state = &mut ctx.accounts.presale_state;
        let old_authority =
            presale_state.hand_off_to_governance(&ctx.accounts.authority.key(), new_authority)?;

        emit!(GovernanceSet {
            old_authority,
            governance: new_authority,
        });
        msg!(
            "Authority transferred from {:?} to {:?}",
            old_authority,
            new_authority
        );
        Ok(())
    }

    pub fn set_token_program(
        ctx: Context<AdminOnly>,
        token_program: Pubkey,
        token_program_state: Pubkey,
    ) -> Result<()> {
        require_keys_neq!(token_program, Pubkey::default(), PresaleError::ZeroOrDefaultAddress);
        require_keys_neq!(
            token_program_state,
            Pubkey::default(),
            PresaleError::ZeroOrDefaultAddress
        );
        let presale_state = &mut ctx.accounts.presale_state;
        presale_state.token_program = token_program;
        presale_state.token_program_state = token_program_state;
        msg!(
            "Token program set to: {} (state {})",
            token_program,
            token_program_state
        );
        Ok(())
    }

    pub fn start_presale(ctx: Context<AdminOnly>) -> Result<()> {
        let previous_status = ctx.accounts.presale_state.transition(PresaleStatus::Active)?;
        emit!(PresaleStarted { previous_status });
        msg!("Presale started (was {:?})", previous_status);
        Ok(())
    }

    pub fn pause_presale(ctx: Context<AdminOnly>) -> Result<()> {
        ctx.accounts.presale_state.transition(PresaleStatus::Paused)?;
        emit!(PresalePaused {});
        msg!("Presale paused");
        Ok(())
    }

    /// Terminal: a stopped presale cannot be restarted.
    pub fn stop_presale(ctx: Context<AdminOnly>) -> Result<()> {
        ctx.accounts.presale_state.transition(PresaleStatus::Stopped)?;
        emit!(PresaleStopped {});
        msg!("Presale stopped");
        Ok(())
    }

    // Re-allowing an already allowed mint succeeds without changes
    pub fn allow_payment_token(ctx: Context<AllowPaymentToken>, payment_token_mint: Pubkey) -> Result<()> {
        let presale_key = ctx.accounts.presale_state.key();
        if ctx.accounts.allowed_token.allow(presale_key, payment_token_mint) {
            msg!("Payment token allowed: {}", payment_token_mint);
        } else {
            msg!("Payment token already allowed: {}", payment_token_mint);
        }
        Ok(())
    }

    pub fn disallow_payment_token(ctx: Context<DisallowPaymentToken>) -> Result<()> {
        let allowed_token = &mut ctx.accounts.allowed_token;
        allowed_token.disallow();
        msg!("Payment token disallowed: {}", allowed_token.payment_token_mint);
        Ok(())
    }

    pub fn set_treasury_address(ctx: Context<AdminOnly>, treasury_address: Pubkey) -> Result<()> {
        require_keys_neq!(
            treasury_address,
            Pubkey::default(),
            PresaleError::ZeroOrDefaultAddress
        );
        let presale_state = &mut ctx.accounts.presale_state;
        let old_treasury = presale_state.treasury_address;
        presale_state.treasury_address = treasury_address;

        msg!(
            "Treasury address updated from {:?} to {:?}",
            old_treasury,
            treasury_address
        );
        Ok(())
    }

    pub fn set_token_price_usd(ctx: Context<AdminOnly>, token_price_usd_micro: u64) -> Result<()> {
        require!(token_price_usd_micro > 0, PresaleError::InvalidAmount);
        let presale_state = &mut ctx.accounts.presale_state;
        let old_price = presale_state.token_price_usd_micro;
        presale_state.token_price_usd_micro = token_price_usd_micro;
        msg!(
            "Token price updated from {} to {} micro-USD",
            old_price,
            token_price_usd_micro
        );
        Ok(())
    }

    /// `None` leaves a limit unchanged; `Some(0)` removes it.
    pub fn update_presale_limits(
        ctx: Context<AdminOnly>,
        max_presale_cap: Option<u64>,
        max_per_user: Option<u64>,
    ) -> Result<()> {
        let presale_state = &mut ctx.accounts.presale_state;
        let (old_cap, old_per_user) = (presale_state.max_presale_cap, presale_state.max_per_user);
        presale_state.update_limits(max_presale_cap, max_per_user)?;
        msg!(
            "Presale limits updated: cap {} -> {}, per user {} -> {}",
            old_cap,
            presale_state.max_presale_cap,
            old_per_user,
            presale_state.max_per_user
        );
        Ok(())
    }

    /// Buys with SOL at the fixed rate when `tokens_per_sol` is set, otherwise
    /// at the Chainlink SOL/USD price.
    pub fn buy_with_sol(ctx: Context<BuyWithSol>, sol_amount: u64) -> Result<()> {
        require!(sol_amount > 0, PresaleError::InvalidAmount);
        ensure_buyer_may_trade(&ctx.accounts.token_state, &ctx.accounts.buyer_blacklist)?;

        let presale_state = &ctx.accounts.presale_state;
        require!(
            presale_state.status == PresaleStatus::Active,
            PresaleError::PresaleNotActive
        );

        let tokens_out = if presale_state.tokens_per_sol > 0 {
            pricing::tokens_for_lamports_fixed(sol_amount, presale_state.tokens_per_sol)?
        } else {
            let feed = ctx
                .accounts
                .chainlink_feed
                .as_ref()
                .ok_or(PresaleError::InvalidOraclePrice)?;
            let now = Clock::get()?.unix_timestamp;
            let price = oracle::read_sol_usd_price(&feed.to_account_info(), now)?;
            pricing::tokens_for_lamports_oracle(
                sol_amount,
                &price,
                presale_state.token_price_usd_micro,
                ctx.accounts.presale_token_mint.decimals,
            )?
        };
        require!(
            ctx.accounts.presale_token_vault.amount >= tokens_out,
            PresaleError::InsufficientVaultBalance
        );

        let vault_balance_after = ctx
            .accounts
            .sol_vault
            .lamports()
            .checked_add(sol_amount)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        vault::ensure_sol_vault_rent_exempt(vault_balance_after, Rent::get()?.minimum_balance(0))?;

        let buyer = ctx.accounts.buyer.key();
        let presale_key = ctx.accounts.presale_state.key();
        book_purchase(
            &mut ctx.accounts.presale_state,
            presale_key,
            &mut ctx.accounts.user_purchase,
            ctx.bumps.user_purchase,
            &buyer,
            tokens_out,
            sol_amount,
        )?;

        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.buyer.to_account_info(),
                    to: ctx.accounts.sol_vault.to_account_info(),
                },
            ),
            sol_amount,
        )?;

        VaultAuthority::presale_tokens(
            ctx.accounts.presale_token_vault_pda.to_account_info(),
            &ctx.accounts.presale_token_mint.key(),
            ctx.bumps.presale_token_vault_pda,
        )
        .transfer_tokens(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.presale_token_vault.to_account_info(),
            ctx.accounts.buyer_token_account.to_account_info(),
            tokens_out,
        )?;

        emit!(TokensPurchased {
            buyer,
            payment_mint: None,
            amount_paid: sol_amount,
            tokens_received: tokens_out,
            total_tokens_sold: ctx.accounts.presale_state.total_tokens_sold,
        });
        msg!(
            "Buy with SOL successful: {} tokens for {} lamports",
            tokens_out,
            sol_amount
        );
        Ok(())
    }

    /// Buys with an allowed USD-pegged payment token.
    pub fn buy_with_token(ctx: Context<BuyWithToken>, amount: u64) -> Result<()> {
        require!(amount > 0, PresaleError::InvalidAmount);
        AllowedToken::ensure_allowed_account(
            &ctx.accounts.allowed_token,
            &ctx.accounts.presale_state.key(),
            &ctx.accounts.payment_token_mint.key(),
        )?;
        ensure_buyer_may_trade(&ctx.accounts.token_state, &ctx.accounts.buyer_blacklist)?;

        let presale_state = &ctx.accounts.presale_state;
        require!(
            presale_state.status == PresaleStatus::Active,
            PresaleError::PresaleNotActive
        );

        let tokens_out = pricing::tokens_for_stablecoin(
            amount,
            ctx.accounts.payment_token_mint.decimals,
            presale_state.token_price_usd_micro,
            ctx.accounts.presale_token_mint.decimals,
        )?;
        require!(
            ctx.accounts.presale_token_vault.amount >= tokens_out,
            PresaleError::InsufficientVaultBalance
        );

        let buyer = ctx.accounts.buyer.key();
        let presale_key = ctx.accounts.presale_state.key();
        book_purchase(
            &mut ctx.accounts.presale_state,
            presale_key,
            &mut ctx.accounts.user_purchase,
            ctx.bumps.user_purchase,
            &buyer,
            tokens_out,
            amount,
        )?;

        anchor_spl::token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                anchor_spl::token::Transfer {
                    from: ctx.accounts.buyer_payment_token_account.to_account_info(),
                    to: ctx.accounts.presale_payment_vault.to_account_info(),
                    authority: ctx.accounts.buyer.to_account_info(),
                },
            ),
            amount,
        )?;

        VaultAuthority::presale_tokens(
            ctx.accounts.presale_token_vault_pda.to_account_info(),
            &ctx.accounts.presale_token_mint.key(),
            ctx.bumps.presale_token_vault_pda,
        )
        .transfer_tokens(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.presale_token_vault.to_account_info(),
            ctx.accounts.buyer_token_account.to_account_info(),
            tokens_out,
        )?;

        emit!(TokensPurchased {
            buyer,
            payment_mint: Some(ctx.accounts.payment_token_mint.key()),
            amount_paid: amount,
            tokens_received: tokens_out,
            total_tokens_sold: ctx.accounts.presale_state.total_tokens_sold,
        });
        msg!(
            "Buy successful: {} tokens for {} payment tokens",
            tokens_out,
            amount
        );
        Ok(())
    }

    // Withdraw payment tokens from PDA vault to treasury address (admin or governance only)
    pub fn withdraw_to_treasury(ctx: Context<WithdrawToTreasury>, amount: u64) -> Result<()> {
        require!(amount > 0, PresaleError::InvalidAmount);
        require!(
            ctx.accounts.presale_payment_vault.amount >= amount,
            PresaleError::InsufficientVaultBalance
        );

        VaultAuthority::payment_tokens(
            ctx.accounts.presale_payment_vault_pda.to_account_info(),
            &ctx.accounts.presale_state.key(),
            &ctx.accounts.payment_token_mint.key(),
            ctx.bumps.presale_payment_vault_pda,
        )
        .transfer_tokens(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.presale_payment_vault.to_account_info(),
            ctx.accounts.treasury_token_account.to_account_info(),
            amount,
        )?;

        let treasury = ctx.accounts.presale_state.treasury_address;
        emit!(TreasuryWithdrawn { amount, treasury });
        msg!("Withdrew {} payment tokens to treasury: {}", amount, treasury);
        Ok(())
    }

    pub fn withdraw_sol_to_treasury(ctx: Context<WithdrawSolToTreasury>, amount: u64) -> Result<()> {
        require!(amount > 0, PresaleError::InvalidAmount);
        let vault_balance_after = ctx
            .accounts
            .sol_vault
            .lamports()
            .checked_sub(amount)
            .ok_or(PresaleError::InsufficientVaultBalance)?;
        vault::ensure_sol_vault_rent_exempt(vault_balance_after, Rent::get()?.minimum_balance(0))?;

        VaultAuthority::sol(
            ctx.accounts.sol_vault.to_account_info(),
            &ctx.accounts.presale_state.key(),
            ctx.bumps.sol_vault,
        )
        .transfer_lamports(
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.treasury.to_account_info(),
            amount,
        )?;

        let treasury = ctx.accounts.presale_state.treasury_address;
        emit!(TreasuryWithdrawn { amount, treasury });
        msg!("Withdrew {} lamports to treasury: {}", amount, treasury);
        Ok(())
    }

    pub fn withdraw_unsold_tokens(ctx: Context<WithdrawUnsoldTokens>, amount: u64) -> Result<()> {
        require!(amount > 0, PresaleError::InvalidAmount);
        require!(
            ctx.accounts.presale_token_vault.amount >= amount,
            PresaleError::InsufficientVaultBalance
        );

        VaultAuthority::presale_tokens(
            ctx.accounts.presale_token_vault_pda.to_account_info(),
            &ctx.accounts.presale_token_mint.key(),
            ctx.bumps.presale_token_vault_pda,
        )
        .transfer_tokens(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.presale_token_vault.to_account_info(),
            ctx.accounts.treasury_token_account.to_account_info(),
            amount,
        )?;

        let treasury = ctx.accounts.presale_state.treasury_address;
        emit!(TreasuryWithdrawn { amount, treasury });
        msg!("Withdrew {} unsold presale tokens to treasury: {}", amount, treasury);
        Ok(())
    }
}

/// Fails while the token program is paused or the buyer is blacklisted. A
/// blacklist PDA that was never created counts as not blacklisted.
fn ensure_buyer_may_trade(token_state: &TokenState, buyer_blacklist: &UncheckedAccount) -> Result<()> {
    require!(
        !token_state.emergency_paused,
        PresaleError::TokenEmergencyPaused
    );

    if buyer_blacklist.owner == &token_control::ID && !buyer_blacklist.data_is_empty() {
        let data = buyer_blacklist.try_borrow_data()?;
        let entry = Blacklist::try_deserialize(&mut &data[..])?;
        require!(!entry.is_blacklisted, PresaleError::BuyerBlacklisted);
    }
    Ok(())
}

// First purchase fills in the lazily created UserPurchase record
fn book_purchase(
    presale_state: &mut PresaleState,
    presale_key: Pubkey,
    user_purchase: &mut UserPurchase,
    bump: u8,
    buyer: &Pubkey,
    tokens_out: u64,
    amount_paid: u64,
) -> Result<()> {
    if user_purchase.presale_state == Pubkey::default() {
        user_purchase.presale_state = presale_key;
        user_purchase.bump = bump;
    }
    presale_state.record_purchase(user_purchase, buyer, tokens_out, amount_paid)
}

// Account Structures

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + PresaleState::LEN,
        seeds = [PRESALE_STATE_SEED],
        bump
    )]
    pub presale_state: Account<'info, PresaleState>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct MigratePresaleState<'info> {
    /// CHECK: Read by hand because a legacy account does not deserialize as PresaleState
    #[account(
        mut,
        seeds = [PRESALE_STATE_SEED],
        bump,
        owner = crate::ID @ PresaleError::InvalidAccount
    )]
    pub presale_state: UncheckedAccount<'info>,

    pub authority: Signer<'info>,

    // Pays any extra rent
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// SetGovernance - Transfer authority to governance PDA
#[derive(Accounts)]
pub struct SetGovernance<'info> {
    #[account(
        mut,
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump
    )]
    pub presale_state: Account<'info, PresaleState>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct AdminOnly<'info> {
    #[account(
        mut,
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized
    )]
    pub presale_state: Account<'info, PresaleState>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(payment_token_mint: Pubkey)]
pub struct AllowPaymentToken<'info> {
    #[account(
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized
    )]
    pub presale_state: Account<'info, PresaleState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + AllowedToken::LEN,
        seeds = [
            ALLOWED_TOKEN_SEED,
            presale_state.key().as_ref(),
            payment_token_mint.as_ref()
        ],
        bump
    )]
    pub allowed_token: Account<'info, AllowedToken>,

    #[account(address = payment_token_mint)]
    pub payment_token_mint_account: Account<'info, Mint>,

    pub authority: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DisallowPaymentToken<'info> {
    #[account(
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized
    )]
    pub presale_state: Account<'info, PresaleState>,

    #[account(
        mut,
        seeds = [
            ALLOWED_TOKEN_SEED,
            presale_state.key().as_ref(),
            payment_token_mint.key().as_ref()
        ],
        bump
    )]
    pub allowed_token: Account<'info, AllowedToken>,

    pub payment_token_mint: Account<'info, Mint>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct BuyWithSol<'info> {
    #[account(
        mut,
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump
    )]
    pub presale_state: Box<Account<'info, PresaleState>>,

    #[account(
        constraint = token_state.key() == presale_state.token_program_state @ PresaleError::InvalidTokenProgramState
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// CHECK: Blacklist PDA of the buyer; may not exist yet
    #[account(
        seeds = [BLACKLIST_SEED, buyer.key().as_ref()],
        bump,
        seeds::program = token_control::ID
    )]
    pub buyer_blacklist: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + UserPurchase::LEN,
        seeds = [USER_PURCHASE_SEED, presale_state.key().as_ref(), buyer.key().as_ref()],
        bump
    )]
    pub user_purchase: Box<Account<'info, UserPurchase>>,

    #[account(
        mut,
        seeds = [PRESALE_SOL_VAULT_SEED, presale_state.key().as_ref()],
        bump
    )]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: PDA that owns the presale token vault
    #[account(
        seeds = [PRESALE_TOKEN_VAULT_SEED, presale_state.presale_token_mint.as_ref()],
        bump
    )]
    pub presale_token_vault_pda: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = presale_token_mint,
        token::authority = presale_token_vault_pda
    )]
    pub presale_token_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = presale_state.presale_token_mint)]
    pub presale_token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = presale_token_mint
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Chainlink SOL/USD feed, owner and freshness checked in oracle::read_sol_usd_price.
    /// Only needed while the presale prices through the oracle.
    pub chainlink_feed: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct BuyWithToken<'info> {
    #[account(
        mut,
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump
    )]
    pub presale_state: Box<Account<'info, PresaleState>>,

    #[account(
        constraint = token_state.key() == presale_state.token_program_state @ PresaleError::InvalidTokenProgramState
    )]
    pub token_state: Box<Account<'info, TokenState>>,

    /// CHECK: Blacklist PDA of the buyer; may not exist yet
    #[account(
        seeds = [BLACKLIST_SEED, buyer.key().as_ref()],
        bump,
        seeds::program = token_control::ID
    )]
    pub buyer_blacklist: UncheckedAccount<'info>,

    /// CHECK: Allowance PDA of the payment mint; may not exist. Checked by
    /// AllowedToken::ensure_allowed_account
    #[account(
        seeds = [
            ALLOWED_TOKEN_SEED,
            presale_state.key().as_ref(),
            payment_token_mint.key().as_ref()
        ],
        bump
    )]
    pub allowed_token: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + UserPurchase::LEN,
        seeds = [USER_PURCHASE_SEED, presale_state.key().as_ref(), buyer.key().as_ref()],
        bump
    )]
    pub user_purchase: Box<Account<'info, UserPurchase>>,

    pub payment_token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = payment_token_mint,
        token::authority = buyer
    )]
    pub buyer_payment_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA that owns the payment token vault
    #[account(
        seeds = [
            PRESALE_PAYMENT_VAULT_SEED,
            presale_state.key().as_ref(),
            payment_token_mint.key().as_ref()
        ],
        bump
    )]
    pub presale_payment_vault_pda: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = payment_token_mint,
        token::authority = presale_payment_vault_pda
    )]
    pub presale_payment_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA that owns the presale token vault
    #[account(
        seeds = [PRESALE_TOKEN_VAULT_SEED, presale_state.presale_token_mint.as_ref()],
        bump
    )]
    pub presale_token_vault_pda: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = presale_token_mint,
        token::authority = presale_token_vault_pda
    )]
    pub presale_token_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = presale_state.presale_token_mint)]
    pub presale_token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = presale_token_mint
    )]
    pub buyer_token_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawToTreasury<'info> {
    #[account(
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized,
        constraint = presale_state.treasury_address != Pubkey::default() @ PresaleError::TreasuryNotSet
    )]
    pub presale_state: Box<Account<'info, PresaleState>>,

    pub authority: Signer<'info>,

    pub payment_token_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA that owns the payment token vault
    #[account(
        seeds = [
            PRESALE_PAYMENT_VAULT_SEED,
            presale_state.key().as_ref(),
            payment_token_mint.key().as_ref()
        ],
        bump
    )]
    pub presale_payment_vault_pda: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = payment_token_mint,
        token::authority = presale_payment_vault_pda
    )]
    pub presale_payment_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = payment_token_mint,
        constraint = treasury_token_account.owner == presale_state.treasury_address @ PresaleError::InvalidTreasuryAccount
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct WithdrawSolToTreasury<'info> {
    #[account(
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized,
        constraint = presale_state.treasury_address != Pubkey::default() @ PresaleError::TreasuryNotSet
    )]
    pub presale_state: Account<'info, PresaleState>,

    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SOL_VAULT_SEED, presale_state.key().as_ref()],
        bump
    )]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: Treasury wallet, pinned to presale_state.treasury_address
    #[account(
        mut,
        address = presale_state.treasury_address @ PresaleError::InvalidTreasuryAccount
    )]
    pub treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawUnsoldTokens<'info> {
    #[account(
        seeds = [PRESALE_STATE_SEED],
        bump = presale_state.bump,
        constraint = presale_state.is_controller(&authority.key()) @ PresaleError::Unauthorized,
        constraint = presale_state.treasury_address != Pubkey::default() @ PresaleError::TreasuryNotSet
    )]
    pub presale_state: Box<Account<'info, PresaleState>>,

    pub authority: Signer<'info>,

    /// CHECK: PDA that owns the presale token vault
    #[account(
        seeds = [PRESALE_TOKEN_VAULT_SEED, presale_state.presale_token_mint.as_ref()],
        bump
    )]
    pub presale_token_vault_pda: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = presale_token_mint,
        token::authority = presale_token_vault_pda
    )]
    pub presale_token_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = presale_state.presale_token_mint)]
    pub presale_token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = presale_token_mint,
        constraint = treasury_token_account.owner == presale_state.treasury_address @ PresaleError::InvalidTreasuryAccount
    )]
    pub treasury_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
