use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount};

declare_id!("GhMpUFskuyqhoHBN61qS6EehfFwbMRCzD7U49dLXvaFu");

pub const STATE_SEED: &[u8] = b"state";
pub const BLACKLIST_SEED: &[u8] = b"blacklist";
pub const RESTRICTED_SEED: &[u8] = b"restricted";
pub const NO_SELL_LIMIT_SEED: &[u8] = b"noselllimit";
pub const LIQUIDITY_POOL_SEED: &[u8] = b"liquiditypool";

#[error_code]
pub enum TokenError {
    #[msg("Emergency pause is active")]
    EmergencyPaused,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Token state already initialized")]
    AlreadyInitialized,
    #[msg("Address must not be the default pubkey")]
    ZeroOrDefaultAddress,
    #[msg("No governance change has been proposed")]
    NoPendingGovernanceChange,
    #[msg("Governance change cooldown has not elapsed")]
    CooldownNotElapsed,
    #[msg("Mint would exceed the maximum supply")]
    MaxSupplyExceeded,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid sell limit (percent must be 1-100, period > 0)")]
    InvalidSellLimit,
}

#[event]
pub struct GovernanceChangeProposed {
    pub current_authority: Pubkey,
    pub proposed_authority: Pubkey,
    pub executable_at: i64,
}

#[event]
pub struct GovernanceChanged {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct EmergencyPauseChanged {
    pub paused: bool,
}

#[event]
pub struct TokensMinted {
    pub to: Pubkey,
    pub amount: u64,
    pub current_supply: u64,
}

#[program]
pub mod token_control {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let state = &mut ctx.accounts.state;
        require_keys_eq!(
            state.authority,
            Pubkey::default(),
            TokenError::AlreadyInitialized
        );

        state.authority = ctx.accounts.authority.key();
        state.bump = ctx.bumps.state;
        state.emergency_paused = false;
        state.sell_limit_percent = TokenState::DEFAULT_SELL_LIMIT_PERCENT;
        state.sell_limit_period = TokenState::DEFAULT_SELL_LIMIT_PERIOD;
        state.bridge_address = Pubkey::default(); // Will be set by governance later
        state.bond_address = Pubkey::default(); // Will be set by governance later
        state.pending_governance = None;
        state.max_supply = None;
        state.current_supply = 0;

        msg!("Token program initialized by: {:?}", state.authority);
        Ok(())
    }

    /// First half of the authority timelock. Overwrites (and restarts the
    /// clock of) any earlier proposal.
    pub fn propose_governance_change(
        ctx: Context<ProposeGovernanceChange>,
        new_authority: Pubkey,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let state = &mut ctx.accounts.state;
        let proposal =
            state.propose_governance_change(&ctx.accounts.authority.key(), new_authority, now)?;
        let executable_at = proposal.executable_at()?;

        emit!(GovernanceChangeProposed {
            current_authority: state.authority,
            proposed_authority: new_authority,
            executable_at,
        });
        msg!(
            "Governance change proposed from {:?} to {:?}, executable after {}",
            state.authority,
            new_authority,
            executable_at
        );
        Ok(())
    }

    /// Second half of the authority timelock.
    pub fn finalize_governance_change(ctx: Context<FinalizeGovernanceChange>) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let state = &mut ctx.accounts.state;
        let old_authority = state.finalize_governance_change(&ctx.accounts.authority.key(), now)?;

        emit!(GovernanceChanged {
            old_authority,
            new_authority: state.authority,
        });
        msg!(
            "Authority transferred from {:?} to {:?}",
            old_authority,
            state.authority
        );
        Ok(())
    }

    pub fn set_emergency_pause(ctx: Context<GovernanceOnly>, value: bool) -> Result<()> {
        let state = &mut ctx.accounts.state;
        state.emergency_paused = value;

        emit!(EmergencyPauseChanged { paused: value });
        msg!("Emergency pause set to: {}", value);
        Ok(())
    }

    pub fn set_blacklist(ctx: Context<SetBlacklist>, account: Pubkey, value: bool) -> Result<()> {
        let blacklist = &mut ctx.accounts.blacklist;
        blacklist.account = account;
        blacklist.is_blacklisted = value;
        msg!("Blacklist set for {}: {}", account, value);
        Ok(())
    }

    pub fn set_no_sell_limit(
        ctx: Context<SetNoSellLimit>,
        account: Pubkey,
        value: bool,
    ) -> Result<()> {
        let exemption = &mut ctx.accounts.no_sell_limit;
        exemption.account = account;
        exemption.has_exemption = value;
        msg!("No sell limit exemption set for {}: {}", account, value);
        Ok(())
    }

    pub fn set_restricted(ctx: Context<SetRestricted>, account: Pubkey, value: bool) -> Result<()> {
        let restricted = &mut ctx.accounts.restricted;
        restricted.account = account;
        restricted.is_restricted = value;
        msg!("Restricted set for {}: {}", account, value);
        Ok(())
    }

    pub fn set_liquidity_pool(
        ctx: Context<SetLiquidityPool>,
        pool: Pubkey,
        value: bool,
    ) -> Result<()> {
        let pool_account = &mut ctx.accounts.liquidity_pool;
        pool_account.pool = pool;
        pool_account.is_pool = value;
        msg!("Liquidity pool set for {}: {}", pool, value);
        Ok(())
    }

    pub fn set_sell_limit(ctx: Context<GovernanceOnly>, percent: u8, period: u64) -> Result<()> {
        TokenState::validate_sell_limit(percent, period)?;
        let state = &mut ctx.accounts.state;
        let (old_percent, old_period) = (state.sell_limit_percent, state.sell_limit_period);
        state.sell_limit_percent = percent;
        state.sell_limit_period = period;
        msg!(
            "Sell limit updated from {}%/{}s to {}%/{}s",
            old_percent,
            old_period,
            percent,
            period
        );
        Ok(())
    }

    pub fn set_bridge_address(ctx: Context<GovernanceOnly>, bridge_address: Pubkey) -> Result<()> {
        require_keys_neq!(
            bridge_address,
            Pubkey::default(),
            TokenError::ZeroOrDefaultAddress
        );
        let state = &mut ctx.accounts.state;
        let old_bridge = state.bridge_address;
        state.bridge_address = bridge_address;
        msg!(
            "Bridge address updated from {:?} to {:?}",
            old_bridge,
            bridge_address
        );
        Ok(())
    }

    pub fn set_bond_address(ctx: Context<GovernanceOnly>, bond_address: Pubkey) -> Result<()> {
        require_keys_neq!(
            bond_address,
            Pubkey::default(),
            TokenError::ZeroOrDefaultAddress
        );
        let state = &mut ctx.accounts.state;
        let old_bond = state.bond_address;
        state.bond_address = bond_address;
        msg!(
            "Bond address updated from {:?} to {:?}",
            old_bond,
            bond_address
        );
        Ok(())
    }

    /// `None` removes the cap. A cap below the supply already minted is rejected.
    pub fn set_max_supply(ctx: Context<GovernanceOnly>, max_supply: Option<u64>) -> Result<()> {
        let state = &mut ctx.accounts.state;
        if let Some(cap) = max_supply {
            require!(cap >= state.current_supply, TokenError::InvalidAmount);
        }
        state.max_supply = max_supply;
        msg!("Max supply set to {:?}", max_supply);
        Ok(())
    }

    // Mint Token (only governance can call this)
    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        require!(amount > 0, TokenError::InvalidAmount);
        require!(
            !ctx.accounts.state.emergency_paused,
            TokenError::EmergencyPaused
        );
        let new_supply = ctx.accounts.state.supply_after_mint(amount)?;

        let bump = ctx.accounts.state.bump;
        let bump_seed = [bump];
        let seeds = &[STATE_SEED, &bump_seed[..]];
        let signer = &[&seeds[..]];

        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.to.to_account_info(),
                    authority: ctx.accounts.state.to_account_info(),
                },
                signer,
            ),
            amount,
        )?;

        ctx.accounts.state.current_supply = new_supply;

        emit!(TokensMinted {
            to: ctx.accounts.to.key(),
            amount,
            current_supply: new_supply,
        });
        msg!("Successfully minted {} tokens", amount);
        Ok(())
    }
}

// Context Structures

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + TokenState::LEN,
        seeds = [STATE_SEED],
        bump
    )]
    pub state: Account<'info, TokenState>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ProposeGovernanceChange<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump
    )]
    pub state: Account<'info, TokenState>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct FinalizeGovernanceChange<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump
    )]
    pub state: Account<'info, TokenState>,

    pub authority: Signer<'info>,
}

// Shared by every setter that only touches TokenState
#[derive(Accounts)]
pub struct GovernanceOnly<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    /// Governance PDA (signs via CPI) or the pre-handoff authority
    pub governance: Signer<'info>,
}

#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    #[account(
        mut,
        mint::authority = state
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = mint
    )]
    pub to: Account<'info, TokenAccount>,

    pub governance: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct SetBlacklist<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Blacklist::LEN,
        seeds = [BLACKLIST_SEED, account.as_ref()],
        bump
    )]
    pub blacklist: Account<'info, Blacklist>,

    pub governance: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct SetNoSellLimit<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + NoSellLimit::LEN,
        seeds = [NO_SELL_LIMIT_SEED, account.as_ref()],
        bump
    )]
    pub no_sell_limit: Account<'info, NoSellLimit>,

    pub governance: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct SetRestricted<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Restricted::LEN,
        seeds = [RESTRICTED_SEED, account.as_ref()],
        bump
    )]
    pub restricted: Account<'info, Restricted>,

    pub governance: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(pool: Pubkey)]
pub struct SetLiquidityPool<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        constraint = state.authority == governance.key() @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + LiquidityPool::LEN,
        seeds = [LIQUIDITY_POOL_SEED, pool.as_ref()],
        bump
    )]
    pub liquidity_pool: Account<'info, LiquidityPool>,

    pub governance: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// Account structures

/// Pending authority handoff recorded by `propose_governance_change`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct GovernanceProposal {
    pub new_authority: Pubkey,
    pub proposed_at: i64,
}

impl GovernanceProposal {
    pub const LEN: usize = 32 + 8;

    pub fn executable_at(&self) -> Result<i64> {
        self.proposed_at
            .checked_add(TokenState::GOVERNANCE_COOLDOWN_SECONDS)
            .ok_or_else(|| error!(TokenError::MathOverflow))
    }
}

#[account]
pub struct TokenState {
    pub authority: Pubkey,
    pub bump: u8,
    pub emergency_paused: bool,
    pub sell_limit_percent: u8, // 10% = 10
    pub sell_limit_period: u64, // 24 hours in seconds = 86400
    pub bridge_address: Pubkey, // Bridge contract address (set by governance)
    pub bond_address: Pubkey,   // Bond contract address (set by governance)
    pub pending_governance: Option<GovernanceProposal>,
    pub max_supply: Option<u64>, // None = unlimited
    pub current_supply: u64,
}

impl TokenState {
    pub const GOVERNANCE_COOLDOWN_SECONDS: i64 = 604_800; // 7 days
    pub const DEFAULT_SELL_LIMIT_PERCENT: u8 = 10;
    pub const DEFAULT_SELL_LIMIT_PERIOD: u64 = 86_400;
    // authority + bump + paused + percent + period + bridge + bond + Option<proposal> + Option<u64> + supply
    pub const LEN: usize = 32 + 1 + 1 + 1 + 8 + 32 + 32 + (1 + GovernanceProposal::LEN) + 9 + 8;

    pub fn propose_governance_change(
        &mut self,
        caller: &Pubkey,
        new_authority: Pubkey,
        now: i64,
    ) -> Result<GovernanceProposal> {
        require_keys_eq!(self.authority, *caller, TokenError::Unauthorized);
        require_keys_neq!(
            new_authority,
            Pubkey::default(),
            TokenError::ZeroOrDefaultAddress
        );

        let proposal = GovernanceProposal {
            new_authority,
            proposed_at: now,
        };
        self.pending_governance = Some(proposal);
        Ok(proposal)
    }

    /// Applies the pending proposal and returns the replaced authority.
    pub fn finalize_governance_change(&mut self, caller: &Pubkey, now: i64) -> Result<Pubkey> {
        require_keys_eq!(self.authority, *caller, TokenError::Unauthorized);
        let proposal = self
            .pending_governance
            .ok_or(TokenError::NoPendingGovernanceChange)?;
        require!(
            now >= proposal.executable_at()?,
            TokenError::CooldownNotElapsed
        );

        let old_authority = self.authority;
        self.authority = proposal.new_authority;
        self.pending_governance = None;
        Ok(old_authority)
    }

    pub fn supply_after_mint(&self, amount: u64) -> Result<u64> {
        let new_supply = self
            .current_supply
            .checked_add(amount)
            .ok_or(TokenError::MathOverflow)?;
        if let Some(cap) = self.max_supply {
            require!(new_supply <= cap, TokenError::MaxSupplyExceeded);
        }
        Ok(new_supply)
    }

    pub fn validate_sell_limit(percent: u8, period: u64) -> Result<()> {
        require!(
            (1..=100).contains(&percent) && period > 0,
            TokenError::InvalidSellLimit
        );
        Ok(())
    }
}

#[account]
pub struct Blacklist {
    pub account: Pubkey,
    pub is_blacklisted: bool,
}

impl Blacklist {
    pub const LEN: usize = 32 + 1;
}

#[account]
pub struct NoSellLimit {
    pub account: Pubkey,
    pub has_exemption: bool,
}

impl NoSellLimit {
    pub const LEN: usize = 32 + 1;
}

#[account]
pub struct Restricted {
    pub account: Pubkey,
    pub is_restricted: bool,
}

impl Restricted {
    pub const LEN: usize = 32 + 1;
}

#[account]
pub struct LiquidityPool {
    pub pool: Pubkey,
    pub is_pool: bool,
}

impl LiquidityPool {
    pub const LEN: usize = 32 + 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;

    fn state_with_authority(authority: Pubkey) -> TokenState {
        TokenState {
            authority,
            bump: 255,
            emergency_paused: false,
            sell_limit_percent: TokenState::DEFAULT_SELL_LIMIT_PERCENT,
            sell_limit_period: TokenState::DEFAULT_SELL_LIMIT_PERIOD,
            bridge_address: Pubkey::default(),
            bond_address: Pubkey::default(),
            pending_governance: None,
            max_supply: None,
            current_supply: 0,
        }
    }

    #[test]
    fn finalize_before_deadline_fails() {
        let authority = Pubkey::new_unique();
        let governance = Pubkey::new_unique();
        let mut state = state_with_authority(authority);

        state
            .propose_governance_change(&authority, governance, T0)
            .unwrap();

        let deadline = T0 + TokenState::GOVERNANCE_COOLDOWN_SECONDS;
        for now in [T0, T0 + 1, deadline - 1] {
            let err = state.finalize_governance_change(&authority, now).unwrap_err();
            assert_eq!(err, TokenError::CooldownNotElapsed.into());
        }
        assert_eq!(state.authority, authority);
        assert!(state.pending_governance.is_some());
    }

    #[test]
    fn finalize_at_deadline_succeeds_exactly_once() {
        let authority = Pubkey::new_unique();
        let governance = Pubkey::new_unique();
        let mut state = state_with_authority(authority);
        state
            .propose_governance_change(&authority, governance, T0)
            .unwrap();

        let deadline = T0 + TokenState::GOVERNANCE_COOLDOWN_SECONDS;
        let old = state.finalize_governance_change(&authority, deadline).unwrap();
        assert_eq!(old, authority);
        assert_eq!(state.authority, governance);
        assert!(state.pending_governance.is_none());

        // The new authority has nothing left to finalize
        let err = state
            .finalize_governance_change(&governance, deadline + 10)
            .unwrap_err();
        assert_eq!(err, TokenError::NoPendingGovernanceChange.into());
    }

    #[test]
    fn reproposing_restarts_the_clock() {
        let authority = Pubkey::new_unique();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let mut state = state_with_authority(authority);

        state.propose_governance_change(&authority, first, T0).unwrap();
        let later = T0 + 3 * 86_400;
        state
            .propose_governance_change(&authority, second, later)
            .unwrap();

        let first_deadline = T0 + TokenState::GOVERNANCE_COOLDOWN_SECONDS;
        assert!(state
            .finalize_governance_change(&authority, first_deadline)
            .is_err());

        state
            .finalize_governance_change(
                &authority,
                later + TokenState::GOVERNANCE_COOLDOWN_SECONDS,
            )
            .unwrap();
        assert_eq!(state.authority, second);
    }

    #[test]
    fn only_current_authority_can_propose_or_finalize() {
        let authority = Pubkey::new_unique();
        let intruder = Pubkey::new_unique();
        let mut state = state_with_authority(authority);

        let err = state
            .propose_governance_change(&intruder, intruder, T0)
            .unwrap_err();
        assert_eq!(err, TokenError::Unauthorized.into());

        state
            .propose_governance_change(&authority, Pubkey::new_unique(), T0)
            .unwrap();
        let err = state
            .finalize_governance_change(&intruder, T0 + TokenState::GOVERNANCE_COOLDOWN_SECONDS)
            .unwrap_err();
        assert_eq!(err, TokenError::Unauthorized.into());
    }

    #[test]
    fn proposing_default_authority_is_rejected() {
        let authority = Pubkey::new_unique();
        let mut state = state_with_authority(authority);
        let err = state
            .propose_governance_change(&authority, Pubkey::default(), T0)
            .unwrap_err();
        assert_eq!(err, TokenError::ZeroOrDefaultAddress.into());
    }

    #[test]
    fn mint_respects_max_supply() {
        let mut state = state_with_authority(Pubkey::new_unique());
        state.max_supply = Some(1_000);
        state.current_supply = 900;

        assert_eq!(state.supply_after_mint(100).unwrap(), 1_000);
        assert_eq!(
            state.supply_after_mint(101).unwrap_err(),
            TokenError::MaxSupplyExceeded.into()
        );

        state.max_supply = None;
        state.current_supply = u64::MAX;
        assert_eq!(
            state.supply_after_mint(1).unwrap_err(),
            TokenError::MathOverflow.into()
        );
    }

    #[test]
    fn sell_limit_bounds() {
        assert!(TokenState::validate_sell_limit(10, 86_400).is_ok());
        assert!(TokenState::validate_sell_limit(100, 1).is_ok());
        assert!(TokenState::validate_sell_limit(0, 86_400).is_err());
        assert!(TokenState::validate_sell_limit(101, 86_400).is_err());
        assert!(TokenState::validate_sell_limit(10, 0).is_err());
    }
}
