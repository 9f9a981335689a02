use anchor_lang::prelude::*;
use anchor_spl::token::Token;

use presale::program::Presale;
use token_control::program::TokenControl;

pub mod errors;
pub mod events;
pub mod state;

use errors::GovernanceError;
use events::*;
use state::*;

declare_id!("7S2mcb2A4f117NMiA4Xx5DJWrQJC9VVcc2XbqXggPp59");

#[program]
pub mod governance {
    use super::*;

    /// Initialize the governance program
    pub fn initialize(
        ctx: Context<Initialize>,
        required_approvals: u8,
        cooldown_period: i64,
        signers: Vec<Pubkey>,
    ) -> Result<()> {
        GovernanceState::validate_config(required_approvals, cooldown_period, &signers)?;

        let governance_state = &mut ctx.accounts.governance_state;
        require_keys_eq!(
            governance_state.authority,
            Pubkey::default(),
            GovernanceError::AlreadyInitialized
        );

        governance_state.authority = ctx.accounts.authority.key();
        governance_state.required_approvals = required_approvals;
        governance_state.cooldown_period = cooldown_period;
        governance_state.next_transaction_id = 1;
        governance_state.token_program = Pubkey::default();
        governance_state.token_program_set = false;
        governance_state.presale_program = Pubkey::default();
        governance_state.presale_program_set = false;
        governance_state.bump = ctx.bumps.governance_state;
        governance_state.signers = signers;

        msg!(
            "Governance initialized with {} required approvals, {}s cooldown, and {} signers",
            required_approvals,
            cooldown_period,
            governance_state.signers.len()
        );
        Ok(())
    }

    /// Links the token control program. Can only be done once.
    pub fn set_token_program(ctx: Context<AuthorityOnly>, token_program: Pubkey) -> Result<()> {
        require_keys_neq!(
            token_program,
            Pubkey::default(),
            GovernanceError::ZeroOrDefaultAddress
        );
        let governance_state = &mut ctx.accounts.governance_state;
        require!(
            !governance_state.token_program_set,
            GovernanceError::TokenProgramAlreadySet
        );
        governance_state.token_program = token_program;
        governance_state.token_program_set = true;
        msg!("Token program set to: {}", token_program);
        Ok(())
    }

    /// Links the presale program. Can only be done once.
    pub fn set_presale_program(ctx: Context<AuthorityOnly>, presale_program: Pubkey) -> Result<()> {
        require_keys_neq!(
            presale_program,
            Pubkey::default(),
            GovernanceError::ZeroOrDefaultAddress
        );
        let governance_state = &mut ctx.accounts.governance_state;
        require!(
            !governance_state.presale_program_set,
            GovernanceError::PresaleProgramAlreadySet
        );
        governance_state.presale_program = presale_program;
        governance_state.presale_program_set = true;
        msg!("Presale program set to: {}", presale_program);
        Ok(())
    }

    pub fn queue_unpause(ctx: Context<QueueTransaction>) -> Result<u64> {
        queue(ctx, GovernanceAction::Unpause)
    }

    pub fn queue_set_blacklist(ctx: Context<QueueTransaction>, account: Pubkey, value: bool) -> Result<u64> {
        queue(ctx, GovernanceAction::SetBlacklist { account, value })
    }

    pub fn queue_set_no_sell_limit(
        ctx: Context<QueueTransaction>,
        account: Pubkey,
        value: bool,
    ) -> Result<u64> {
        queue(ctx, GovernanceAction::SetNoSellLimit { account, value })
    }

    pub fn queue_set_restricted(ctx: Context<QueueTransaction>, account: Pubkey, value: bool) -> Result<u64> {
        queue(ctx, GovernanceAction::SetRestricted { account, value })
    }

    pub fn queue_set_liquidity_pool(ctx: Context<QueueTransaction>, pool: Pubkey, value: bool) -> Result<u64> {
        queue(ctx, GovernanceAction::SetLiquidityPool { pool, value })
    }

    pub fn queue_set_sell_limit(ctx: Context<QueueTransaction>, percent: u8, period: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::SetSellLimit { percent, period })
    }

    pub fn queue_set_bridge_address(ctx: Context<QueueTransaction>, address: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::SetBridgeAddress { address })
    }

    pub fn queue_set_bond_address(ctx: Context<QueueTransaction>, address: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::SetBondAddress { address })
    }

    pub fn queue_mint_tokens(ctx: Context<QueueTransaction>, amount: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::MintTokens { amount })
    }

    pub fn queue_set_treasury_address(ctx: Context<QueueTransaction>, address: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::SetTreasuryAddress { address })
    }

    pub fn queue_withdraw_to_treasury(ctx: Context<QueueTransaction>, amount: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::WithdrawToTreasury { amount })
    }

    pub fn queue_withdraw_sol_to_treasury(ctx: Context<QueueTransaction>, amount: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::WithdrawSolToTreasury { amount })
    }

    pub fn queue_update_presale_limits(
        ctx: Context<QueueTransaction>,
        max_presale_cap: Option<u64>,
        max_per_user: Option<u64>,
    ) -> Result<u64> {
        queue(
            ctx,
            GovernanceAction::UpdatePresaleLimits {
                max_presale_cap,
                max_per_user,
            },
        )
    }

    pub fn queue_start_presale(ctx: Context<QueueTransaction>) -> Result<u64> {
        queue(ctx, GovernanceAction::StartPresale)
    }

    pub fn queue_pause_presale(ctx: Context<QueueTransaction>) -> Result<u64> {
        queue(ctx, GovernanceAction::PausePresale)
    }

    pub fn queue_stop_presale(ctx: Context<QueueTransaction>) -> Result<u64> {
        queue(ctx, GovernanceAction::StopPresale)
    }

    pub fn queue_set_token_price_usd(ctx: Context<QueueTransaction>, price_micro: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::SetTokenPriceUsd { price_micro })
    }

    pub fn queue_allow_payment_token(ctx: Context<QueueTransaction>, mint: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::AllowPaymentToken { mint })
    }

    pub fn queue_disallow_payment_token(ctx: Context<QueueTransaction>, mint: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::DisallowPaymentToken { mint })
    }

    pub fn queue_withdraw_unsold_tokens(ctx: Context<QueueTransaction>, amount: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::WithdrawUnsoldTokens { amount })
    }

    pub fn queue_migrate_presale_state(ctx: Context<QueueTransaction>, tokens_per_sol: u64) -> Result<u64> {
        queue(ctx, GovernanceAction::MigratePresaleState { tokens_per_sol })
    }

    pub fn queue_set_required_approvals(ctx: Context<QueueTransaction>, required: u8) -> Result<u64> {
        queue(ctx, GovernanceAction::SetRequiredApprovals { required })
    }

    pub fn queue_set_cooldown_period(ctx: Context<QueueTransaction>, period: i64) -> Result<u64> {
        queue(ctx, GovernanceAction::SetCooldownPeriod { period })
    }

    pub fn approve_transaction(ctx: Context<ApproveTransaction>, tx_id: u64) -> Result<()> {
        let approver = ctx.accounts.approver.key();
        let governance_state = &ctx.accounts.governance_state;
        let mut transaction = Transaction::load(&ctx.accounts.transaction, tx_id)?;

        transaction.approve(governance_state, approver)?;
        transaction.store(&ctx.accounts.transaction)?;
        let approvals = transaction.current_approvals(governance_state) as u8;

        emit!(TransactionApproved {
            id: tx_id,
            approver,
            approvals,
        });
        msg!(
            "Transaction {} approved by {} ({}/{})",
            tx_id,
            approver,
            approvals,
            governance_state.required_approvals
        );
        Ok(())
    }

    pub fn reject_transaction(ctx: Context<RejectTransaction>, tx_id: u64, reason: String) -> Result<()> {
        let rejector = ctx.accounts.rejector.key();
        let governance_state = &ctx.accounts.governance_state;
        let mut transaction = Transaction::load(&ctx.accounts.transaction, tx_id)?;

        let finalized = transaction.reject(governance_state, rejector, reason.clone())?;
        transaction.store(&ctx.accounts.transaction)?;

        msg!(
            "Transaction {} rejected by {}: {}{}",
            tx_id,
            rejector,
            reason,
            if finalized { " (final)" } else { "" }
        );
        emit!(TransactionRejected {
            id: tx_id,
            rejector,
            reason,
            finalized,
        });
        Ok(())
    }

    /// Permissionless once quorum and cooldown are met. The transaction is
    /// marked executed before the action runs.
    pub fn execute_transaction(ctx: Context<ExecuteTransaction>, tx_id: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let executor = ctx.accounts.executor.key();
        let mut transaction = Transaction::load(&ctx.accounts.transaction, tx_id)?;

        let action = transaction.begin_execution(&ctx.accounts.governance_state, executor, now)?;
        transaction.store(&ctx.accounts.transaction)?;
        action.validate(&ctx.accounts.governance_state)?;

        match action.target() {
            ActionTarget::Governance => apply_governance_action(&mut ctx.accounts.governance_state, &action)?,
            ActionTarget::TokenControl => execute_token_action(ctx.accounts, &action)?,
            ActionTarget::Presale => execute_presale_action(ctx.accounts, &action)?,
        }

        emit!(TransactionExecuted {
            id: tx_id,
            action,
            executor,
        });
        msg!("Transaction {} executed successfully: {:?}", tx_id, action);
        Ok(())
    }

    /// Queues adding a signer. Takes effect only after quorum and cooldown.
    pub fn grant_role(ctx: Context<QueueTransaction>, account: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::AddSigner { signer: account })
    }

    /// Queues removing a signer. Fails at queue and at execution if it would
    /// leave fewer signers than the quorum.
    pub fn revoke_role(ctx: Context<QueueTransaction>, account: Pubkey) -> Result<u64> {
        queue(ctx, GovernanceAction::RemoveSigner { signer: account })
    }

    /// Emergency pause (1 signer allowed, no queue, no cooldown)
    pub fn emergency_pause(ctx: Context<EmergencyPause>) -> Result<()> {
        let governance_state = &ctx.accounts.governance_state;
        let caller = ctx.accounts.caller.key();
        require!(
            governance_state.can_queue(&caller),
            GovernanceError::NotAuthorizedSigner
        );
        require!(
            governance_state.token_program_set,
            GovernanceError::TokenProgramNotSet
        );
        require_keys_eq!(
            ctx.accounts.token_control_program.key(),
            governance_state.token_program,
            GovernanceError::InvalidProgramLink
        );

        let bump_seed = [governance_state.bump];
        let seeds: &[&[u8]] = &[GOVERNANCE_SEED, &bump_seed];
        let signer_seeds = &[seeds];
        token_control::cpi::set_emergency_pause(
            CpiContext::new_with_signer(
                ctx.accounts.token_control_program.to_account_info(),
                token_control::cpi::accounts::GovernanceOnly {
                    state: ctx.accounts.token_state.to_account_info(),
                    governance: governance_state.to_account_info(),
                },
                signer_seeds,
            ),
            true,
        )?;

        emit!(EmergencyPauseActivated { by: caller });
        msg!("Emergency pause activated by {}", caller);
        Ok(())
    }
}

fn queue(ctx: Context<QueueTransaction>, action: GovernanceAction) -> Result<u64> {
    let initiator = ctx.accounts.initiator.key();
    let governance_state = &mut ctx.accounts.governance_state;
    require!(
        governance_state.can_queue(&initiator),
        GovernanceError::NotAuthorizedSigner
    );
    match action.target() {
        ActionTarget::TokenControl => require!(
            governance_state.token_program_set,
            GovernanceError::TokenProgramNotSet
        ),
        ActionTarget::Presale => require!(
            governance_state.presale_program_set,
            GovernanceError::PresaleProgramNotSet
        ),
        ActionTarget::Governance => {}
    }
    action.validate(governance_state)?;

    let now = Clock::get()?.unix_timestamp;
    let tx_id = governance_state.take_transaction_id()?;
    let transaction = Transaction::new(
        tx_id,
        action,
        initiator,
        now,
        governance_state.cooldown_period,
    )?;
    let execute_after = transaction.execute_after;
    ctx.accounts.transaction.set_inner(transaction);

    emit!(TransactionQueued {
        id: tx_id,
        action,
        initiator,
        execute_after,
    });
    msg!(
        "Transaction {} queued ({:?}), will execute after {}",
        tx_id,
        action,
        execute_after
    );
    Ok(tx_id)
}

fn required<T>(account: &Option<T>) -> Result<&T> {
    account
        .as_ref()
        .ok_or_else(|| error!(GovernanceError::MissingActionAccount))
}

fn apply_governance_action(governance_state: &mut GovernanceState, action: &GovernanceAction) -> Result<()> {
    governance_state.apply_config_action(action)?;
    match *action {
        GovernanceAction::SetRequiredApprovals { required } => {
            msg!("Required approvals set to {}", required);
        }
        GovernanceAction::SetCooldownPeriod { period } => {
            msg!("Cooldown period set to {} seconds", period);
        }
        GovernanceAction::AddSigner { signer } => {
            emit!(SignerAdded { signer });
            msg!("Signer {} added ({} signers)", signer, governance_state.signers.len());
        }
        GovernanceAction::RemoveSigner { signer } => {
            emit!(SignerRemoved { signer });
            msg!("Signer {} removed ({} signers)", signer, governance_state.signers.len());
        }
        _ => {}
    }
    Ok(())
}

fn execute_token_action<'info>(accounts: &ExecuteTransaction<'info>, action: &GovernanceAction) -> Result<()> {
    let governance_state = &accounts.governance_state;
    let program = required(&accounts.token_control_program)?;
    require_keys_eq!(
        program.key(),
        governance_state.token_program,
        GovernanceError::InvalidProgramLink
    );
    let program = program.to_account_info();
    let state = required(&accounts.token_state)?.to_account_info();
    let governance = governance_state.to_account_info();

    let bump_seed = [governance_state.bump];
    let seeds: &[&[u8]] = &[GOVERNANCE_SEED, &bump_seed];
    let signer_seeds = &[seeds];

    // init_if_needed on the flag PDAs is paid by whoever executes
    let payer = accounts.executor.to_account_info();
    let system_program = accounts.system_program.to_account_info();

    use token_control::cpi::accounts as cpi_accounts;
    match *action {
        GovernanceAction::Unpause => token_control::cpi::set_emergency_pause(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::GovernanceOnly { state, governance },
                signer_seeds,
            ),
            false,
        ),
        GovernanceAction::SetBlacklist { account, value } => token_control::cpi::set_blacklist(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::SetBlacklist {
                    state,
                    blacklist: required(&accounts.flag_account)?.to_account_info(),
                    governance,
                    payer,
                    system_program,
                },
                signer_seeds,
            ),
            account,
            value,
        ),
        GovernanceAction::SetNoSellLimit { account, value } => token_control::cpi::set_no_sell_limit(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::SetNoSellLimit {
                    state,
                    no_sell_limit: required(&accounts.flag_account)?.to_account_info(),
                    governance,
                    payer,
                    system_program,
                },
                signer_seeds,
            ),
            account,
            value,
        ),
        GovernanceAction::SetRestricted { account, value } => token_control::cpi::set_restricted(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::SetRestricted {
                    state,
                    restricted: required(&accounts.flag_account)?.to_account_info(),
                    governance,
                    payer,
                    system_program,
                },
                signer_seeds,
            ),
            account,
            value,
        ),
        GovernanceAction::SetLiquidityPool { pool, value } => token_control::cpi::set_liquidity_pool(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::SetLiquidityPool {
                    state,
                    liquidity_pool: required(&accounts.flag_account)?.to_account_info(),
                    governance,
                    payer,
                    system_program,
                },
                signer_seeds,
            ),
            pool,
            value,
        ),
        GovernanceAction::SetSellLimit { percent, period } => token_control::cpi::set_sell_limit(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::GovernanceOnly { state, governance },
                signer_seeds,
            ),
            percent,
            period,
        ),
        GovernanceAction::SetBridgeAddress { address } => token_control::cpi::set_bridge_address(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::GovernanceOnly { state, governance },
                signer_seeds,
            ),
            address,
        ),
        GovernanceAction::SetBondAddress { address } => token_control::cpi::set_bond_address(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::GovernanceOnly { state, governance },
                signer_seeds,
            ),
            address,
        ),
        GovernanceAction::MintTokens { amount } => token_control::cpi::mint_tokens(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::MintTokens {
                    state,
                    mint: required(&accounts.mint)?.to_account_info(),
                    to: required(&accounts.mint_destination)?.to_account_info(),
                    governance,
                    token_program: required(&accounts.spl_token_program)?.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        ),
        _ => err!(GovernanceError::InvalidActionPayload),
    }
}

fn execute_presale_action<'info>(accounts: &ExecuteTransaction<'info>, action: &GovernanceAction) -> Result<()> {
    let governance_state = &accounts.governance_state;
    let program = required(&accounts.presale_program)?;
    require_keys_eq!(
        program.key(),
        governance_state.presale_program,
        GovernanceError::InvalidProgramLink
    );
    let program = program.to_account_info();
    let presale_state = required(&accounts.presale_state)?.to_account_info();
    let authority = governance_state.to_account_info();

    let bump_seed = [governance_state.bump];
    let seeds: &[&[u8]] = &[GOVERNANCE_SEED, &bump_seed];
    let signer_seeds = &[seeds];

    use presale::cpi::accounts as cpi_accounts;
    let admin_only = |presale_state: AccountInfo<'info>, authority: AccountInfo<'info>| {
        CpiContext::new_with_signer(
            program.clone(),
            cpi_accounts::AdminOnly {
                presale_state,
                authority,
            },
            signer_seeds,
        )
    };
    match *action {
        GovernanceAction::StartPresale => presale::cpi::start_presale(admin_only(presale_state, authority)),
        GovernanceAction::PausePresale => presale::cpi::pause_presale(admin_only(presale_state, authority)),
        GovernanceAction::StopPresale => presale::cpi::stop_presale(admin_only(presale_state, authority)),
        GovernanceAction::SetTokenPriceUsd { price_micro } => {
            presale::cpi::set_token_price_usd(admin_only(presale_state, authority), price_micro)
        }
        GovernanceAction::AllowPaymentToken { mint } => {
            let payment_token_mint = required(&accounts.payment_token_mint)?;
            require_keys_eq!(
                payment_token_mint.key(),
                mint,
                GovernanceError::ActionAccountMismatch
            );
            presale::cpi::allow_payment_token(
                CpiContext::new_with_signer(
                    program,
                    cpi_accounts::AllowPaymentToken {
                        presale_state,
                        allowed_token: required(&accounts.allowed_token)?.to_account_info(),
                        payment_token_mint_account: payment_token_mint.to_account_info(),
                        authority,
                        payer: accounts.executor.to_account_info(),
                        system_program: accounts.system_program.to_account_info(),
                    },
                    signer_seeds,
                ),
                mint,
            )
        }
        GovernanceAction::DisallowPaymentToken { mint } => {
            let payment_token_mint = required(&accounts.payment_token_mint)?;
            require_keys_eq!(
                payment_token_mint.key(),
                mint,
                GovernanceError::ActionAccountMismatch
            );
            presale::cpi::disallow_payment_token(CpiContext::new_with_signer(
                program,
                cpi_accounts::DisallowPaymentToken {
                    presale_state,
                    allowed_token: required(&accounts.allowed_token)?.to_account_info(),
                    payment_token_mint: payment_token_mint.to_account_info(),
                    authority,
                },
                signer_seeds,
            ))
        }
        GovernanceAction::WithdrawUnsoldTokens { amount } => presale::cpi::withdraw_unsold_tokens(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::WithdrawUnsoldTokens {
                    presale_state,
                    authority,
                    presale_token_vault_pda: required(&accounts.presale_token_vault_pda)?.to_account_info(),
                    presale_token_vault: required(&accounts.presale_token_vault)?.to_account_info(),
                    presale_token_mint: required(&accounts.presale_token_mint)?.to_account_info(),
                    treasury_token_account: required(&accounts.treasury_token_account)?
                        .to_account_info(),
                    token_program: required(&accounts.spl_token_program)?.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        ),
        GovernanceAction::MigratePresaleState { tokens_per_sol } => presale::cpi::migrate_presale_state(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::MigratePresaleState {
                    presale_state,
                    authority,
                    payer: accounts.executor.to_account_info(),
                    system_program: accounts.system_program.to_account_info(),
                },
                signer_seeds,
            ),
            tokens_per_sol,
        ),
        GovernanceAction::SetTreasuryAddress { address } => {
            presale::cpi::set_treasury_address(admin_only(presale_state, authority), address)
        }
        GovernanceAction::UpdatePresaleLimits {
            max_presale_cap,
            max_per_user,
        } => presale::cpi::update_presale_limits(
            admin_only(presale_state, authority),
            max_presale_cap,
            max_per_user,
        ),
        GovernanceAction::WithdrawToTreasury { amount } => presale::cpi::withdraw_to_treasury(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::WithdrawToTreasury {
                    presale_state,
                    authority,
                    payment_token_mint: required(&accounts.payment_token_mint)?.to_account_info(),
                    presale_payment_vault_pda: required(&accounts.presale_payment_vault_pda)?
                        .to_account_info(),
                    presale_payment_vault: required(&accounts.presale_payment_vault)?.to_account_info(),
                    treasury_token_account: required(&accounts.treasury_token_account)?
                        .to_account_info(),
                    token_program: required(&accounts.spl_token_program)?.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        ),
        GovernanceAction::WithdrawSolToTreasury { amount } => presale::cpi::withdraw_sol_to_treasury(
            CpiContext::new_with_signer(
                program,
                cpi_accounts::WithdrawSolToTreasury {
                    presale_state,
                    authority,
                    sol_vault: required(&accounts.sol_vault)?.to_account_info(),
                    treasury: required(&accounts.treasury)?.to_account_info(),
                    system_program: accounts.system_program.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        ),
        _ => err!(GovernanceError::InvalidActionPayload),
    }
}

// Context structures

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + GovernanceState::LEN,
        seeds = [GOVERNANCE_SEED],
        bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AuthorityOnly<'info> {
    #[account(
        mut,
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump,
        constraint = governance_state.authority == authority.key() @ GovernanceError::Unauthorized
    )]
    pub governance_state: Account<'info, GovernanceState>,

    pub authority: Signer<'info>,
}

// Shared by every queue_* instruction
#[derive(Accounts)]
pub struct QueueTransaction<'info> {
    #[account(
        mut,
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    #[account(
        init,
        payer = initiator,
        space = 8 + Transaction::MAX_LEN,
        seeds = [TRANSACTION_SEED, governance_state.next_transaction_id.to_le_bytes().as_ref()],
        bump
    )]
    pub transaction: Account<'info, Transaction>,

    #[account(mut)]
    pub initiator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(tx_id: u64)]
pub struct ApproveTransaction<'info> {
    #[account(
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    /// CHECK: Queued transaction PDA, read and written through Transaction::load / store
    #[account(
        mut,
        seeds = [TRANSACTION_SEED, tx_id.to_le_bytes().as_ref()],
        bump
    )]
    pub transaction: UncheckedAccount<'info>,

    pub approver: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(tx_id: u64)]
pub struct RejectTransaction<'info> {
    #[account(
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    /// CHECK: Queued transaction PDA, read and written through Transaction::load / store
    #[account(
        mut,
        seeds = [TRANSACTION_SEED, tx_id.to_le_bytes().as_ref()],
        bump
    )]
    pub transaction: UncheckedAccount<'info>,

    pub rejector: Signer<'info>,
}

/// Accounts beyond the first three are only needed by some actions; leave
/// out the ones the queued action does not touch.
#[derive(Accounts)]
#[instruction(tx_id: u64)]
pub struct ExecuteTransaction<'info> {
    #[account(
        mut,
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    /// CHECK: Queued transaction PDA, read and written through Transaction::load / store
    #[account(
        mut,
        seeds = [TRANSACTION_SEED, tx_id.to_le_bytes().as_ref()],
        bump
    )]
    pub transaction: UncheckedAccount<'info>,

    // Anyone may execute; also pays for flag PDAs created on the token side
    #[account(mut)]
    pub executor: Signer<'info>,

    /// CHECK: Token control state PDA, validated by the token control program
    #[account(mut)]
    pub token_state: Option<UncheckedAccount<'info>>,

    /// CHECK: Blacklist / no-sell-limit / restricted / liquidity-pool PDA, validated by the token control program
    #[account(mut)]
    pub flag_account: Option<UncheckedAccount<'info>>,

    /// CHECK: Token mint, validated by the token control program
    #[account(mut)]
    pub mint: Option<UncheckedAccount<'info>>,

    /// CHECK: Token account receiving minted tokens
    #[account(mut)]
    pub mint_destination: Option<UncheckedAccount<'info>>,

    pub token_control_program: Option<Program<'info, TokenControl>>,

    /// CHECK: Presale state PDA, validated by the presale program
    #[account(mut)]
    pub presale_state: Option<UncheckedAccount<'info>>,

    /// CHECK: Payment token mint (for withdrawals)
    pub payment_token_mint: Option<UncheckedAccount<'info>>,

    /// CHECK: Presale payment vault PDA (for withdrawals)
    pub presale_payment_vault_pda: Option<UncheckedAccount<'info>>,

    /// CHECK: Presale payment vault token account
    #[account(mut)]
    pub presale_payment_vault: Option<UncheckedAccount<'info>>,

    /// CHECK: Treasury token account
    #[account(mut)]
    pub treasury_token_account: Option<UncheckedAccount<'info>>,

    /// CHECK: Presale SOL vault PDA
    #[account(mut)]
    pub sol_vault: Option<UncheckedAccount<'info>>,

    /// CHECK: Treasury wallet receiving SOL
    #[account(mut)]
    pub treasury: Option<UncheckedAccount<'info>>,

    /// CHECK: Allowance PDA of a payment mint, validated by the presale program
    #[account(mut)]
    pub allowed_token: Option<UncheckedAccount<'info>>,

    /// CHECK: PDA that owns the presale token vault
    pub presale_token_vault_pda: Option<UncheckedAccount<'info>>,

    /// CHECK: Presale token vault token account
    #[account(mut)]
    pub presale_token_vault: Option<UncheckedAccount<'info>>,

    /// CHECK: Presale token mint
    pub presale_token_mint: Option<UncheckedAccount<'info>>,

    pub presale_program: Option<Program<'info, Presale>>,

    pub spl_token_program: Option<Program<'info, Token>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EmergencyPause<'info> {
    #[account(
        seeds = [GOVERNANCE_SEED],
        bump = governance_state.bump
    )]
    pub governance_state: Account<'info, GovernanceState>,

    /// CHECK: Token control state PDA, validated by the token control program
    #[account(mut)]
    pub token_state: UncheckedAccount<'info>,

    pub token_control_program: Program<'info, TokenControl>,

    pub caller: Signer<'info>,
}
