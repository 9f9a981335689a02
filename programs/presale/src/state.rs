use anchor_lang::prelude::*;

use crate::errors::PresaleError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PresaleStatus {
    NotStarted,
    Active,
    Paused,
    Stopped,
}

/// Who currently controls the presale. Derived from the stored
/// `governance_set` latch so every mutating path matches on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Controller {
    Admin(Pubkey),
    Governance(Pubkey),
}

#[account]
#[derive(Debug)]
pub struct PresaleState {
    pub admin: Pubkey,               // Initializing admin, audit only
    pub authority: Pubkey,           // Current authority (admin or governance PDA)
    pub governance: Pubkey,          // Governance PDA (set after set_governance)
    pub token_program: Pubkey,       // Token control program id
    pub token_program_state: Pubkey, // Token control state PDA
    pub presale_token_mint: Pubkey,
    pub status: PresaleStatus,
    pub total_tokens_sold: u64,
    pub total_raised: u64,
    pub governance_set: bool,
    pub treasury_address: Pubkey,
    pub max_presale_cap: u64, // 0 = unlimited
    pub max_per_user: u64,    // 0 = unlimited
    pub token_price_usd_micro: u64,
    pub bump: u8,
    pub tokens_per_sol: u64, // 0 = oracle pricing
}

impl PresaleState {
    // admin + authority + governance + token_program + token_program_state + mint
    // + status + sold + raised + governance_set + treasury + cap + per_user + price + bump + tokens_per_sol
    pub const LEN: usize =
        32 + 32 + 32 + 32 + 32 + 32 + 1 + 8 + 8 + 1 + 32 + 8 + 8 + 8 + 1 + 8;

    pub fn controller(&self) -> Controller {
        match self.governance_set {
            false => Controller::Admin(self.authority),
            true => Controller::Governance(self.governance),
        }
    }

    pub fn is_controller(&self, key: &Pubkey) -> bool {
        match self.controller() {
            Controller::Admin(authority) => authority == *key,
            Controller::Governance(governance) => governance == *key,
        }
    }

    /// One-way handoff. Returns the authority that was replaced.
    pub fn hand_off_to_governance(&mut self, caller: &Pubkey, new_authority: Pubkey) -> Result<Pubkey> {
        match self.controller() {
            Controller::Governance(_) => err!(PresaleError::GovernanceAlreadySet),
            Controller::Admin(authority) => {
                require_keys_eq!(authority, *caller, PresaleError::Unauthorized);
                require_keys_neq!(
                    new_authority,
                    Pubkey::default(),
                    PresaleError::ZeroOrDefaultAddress
                );
                self.authority = new_authority;
                self.governance = new_authority;
                self.governance_set = true;
                Ok(authority)
            }
        }
    }

    /// Applies a status change, returning the previous status.
    pub fn transition(&mut self, to: PresaleStatus) -> Result<PresaleStatus> {
        use PresaleStatus::*;
        let from = self.status;
        let allowed = match (from, to) {
            (NotStarted, Active) | (Paused, Active) => true,
            (Active, Paused) => true,
            (Active, Stopped) | (Paused, Stopped) => true,
            _ => false,
        };
        require!(allowed, PresaleError::InvalidStatus);
        self.status = to;
        Ok(from)
    }

    pub fn update_limits(&mut self, cap: Option<u64>, max_per_user: Option<u64>) -> Result<()> {
        require!(
            self.status != PresaleStatus::Stopped,
            PresaleError::InvalidStatus
        );
        let new_cap = cap.unwrap_or(self.max_presale_cap);
        let new_per_user = max_per_user.unwrap_or(self.max_per_user);

        if new_cap > 0 {
            require!(
                new_cap >= self.total_tokens_sold,
                PresaleError::InvalidLimits
            );
            require!(new_per_user <= new_cap, PresaleError::InvalidLimits);
        }

        self.max_presale_cap = new_cap;
        self.max_per_user = new_per_user;
        Ok(())
    }

    /// Validates the purchase against both caps and then books it on the
    /// presale and buyer records. Nothing is written if any check fails.
    pub fn record_purchase(
        &mut self,
        purchase: &mut UserPurchase,
        buyer: &Pubkey,
        tokens_out: u64,
        amount_paid: u64,
    ) -> Result<()> {
        require!(
            self.status == PresaleStatus::Active,
            PresaleError::PresaleNotActive
        );
        require!(tokens_out > 0 && amount_paid > 0, PresaleError::InvalidAmount);

        let new_total_sold = self
            .total_tokens_sold
            .checked_add(tokens_out)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        if self.max_presale_cap > 0 {
            require!(
                new_total_sold <= self.max_presale_cap,
                PresaleError::PresaleCapExceeded
            );
        }

        let new_user_total = purchase
            .total_purchased
            .checked_add(tokens_out)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        if self.max_per_user > 0 {
            require!(
                new_user_total <= self.max_per_user,
                PresaleError::PerUserLimitExceeded
            );
        }

        let new_total_raised = self
            .total_raised
            .checked_add(amount_paid)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        let new_user_spent = purchase
            .total_spent
            .checked_add(amount_paid)
            .ok_or(PresaleError::ArithmeticOverflow)?;

        self.total_tokens_sold = new_total_sold;
        self.total_raised = new_total_raised;
        purchase.buyer = *buyer;
        purchase.total_purchased = new_user_total;
        purchase.total_spent = new_user_spent;
        Ok(())
    }
}

/// Layout written before fixed-rate pricing existed. Same discriminator as
/// `PresaleState`, without the trailing `tokens_per_sol`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LegacyPresaleState {
    pub admin: Pubkey,
    pub authority: Pubkey,
    pub governance: Pubkey,
    pub token_program: Pubkey,
    pub token_program_state: Pubkey,
    pub presale_token_mint: Pubkey,
    pub status: PresaleStatus,
    pub total_tokens_sold: u64,
    pub total_raised: u64,
    pub governance_set: bool,
    pub treasury_address: Pubkey,
    pub max_presale_cap: u64,
    pub max_per_user: u64,
    pub token_price_usd_micro: u64,
    pub bump: u8,
}

impl LegacyPresaleState {
    pub const LEN: usize = PresaleState::LEN - 8;

    pub fn upgrade(self, tokens_per_sol: u64) -> PresaleState {
        PresaleState {
            admin: self.admin,
            authority: self.authority,
            governance: self.governance,
            token_program: self.token_program,
            token_program_state: self.token_program_state,
            presale_token_mint: self.presale_token_mint,
            status: self.status,
            total_tokens_sold: self.total_tokens_sold,
            total_raised: self.total_raised,
            governance_set: self.governance_set,
            treasury_address: self.treasury_address,
            max_presale_cap: self.max_presale_cap,
            max_per_user: self.max_per_user,
            token_price_usd_micro: self.token_price_usd_micro,
            bump: self.bump,
            tokens_per_sol,
        }
    }
}

#[account]
#[derive(Debug)]
pub struct AllowedToken {
    pub presale_state: Pubkey,
    pub payment_token_mint: Pubkey,
    pub is_allowed: bool,
}

impl AllowedToken {
    pub const LEN: usize = 32 + 32 + 1; // presale_state + mint + is_allowed

    /// Idempotent. Returns false when the mint was already allowed.
    pub fn allow(&mut self, presale_state: Pubkey, payment_token_mint: Pubkey) -> bool {
        let newly_allowed = !self.is_allowed;
        self.presale_state = presale_state;
        self.payment_token_mint = payment_token_mint;
        self.is_allowed = true;
        newly_allowed
    }

    pub fn disallow(&mut self) {
        self.is_allowed = false;
    }

    pub fn ensure_allowed(&self, presale_state: &Pubkey, payment_token_mint: &Pubkey) -> Result<()> {
        require!(
            self.is_allowed
                && self.presale_state == *presale_state
                && self.payment_token_mint == *payment_token_mint,
            PresaleError::PaymentTokenNotAllowed
        );
        Ok(())
    }

    /// Checks the allowance PDA of a mint. A PDA that was never created
    /// reads as not allowed.
    pub fn ensure_allowed_account(
        info: &AccountInfo,
        presale_state: &Pubkey,
        payment_token_mint: &Pubkey,
    ) -> Result<()> {
        require!(
            info.owner == &crate::ID && !info.data_is_empty(),
            PresaleError::PaymentTokenNotAllowed
        );
        let data = info.try_borrow_data()?;
        let entry = AllowedToken::try_deserialize(&mut &data[..])
            .map_err(|_| error!(PresaleError::PaymentTokenNotAllowed))?;
        entry.ensure_allowed(presale_state, payment_token_mint)
    }
}

#[account]
pub struct UserPurchase {
    pub presale_state: Pubkey,
    pub buyer: Pubkey,
    pub total_purchased: u64,
    pub total_spent: u64, // lamports or payment token base units, as paid
    pub bump: u8,
}

impl UserPurchase {
    pub const LEN: usize = 32 + 32 + 8 + 8 + 1;
}
