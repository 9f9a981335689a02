use anchor_lang::prelude::*;

use crate::state::PresaleStatus;

#[event]
pub struct PresaleStarted {
    pub previous_status: PresaleStatus,
}

#[event]
pub struct PresalePaused {}

#[event]
pub struct PresaleStopped {}

#[event]
pub struct GovernanceSet {
    pub old_authority: Pubkey,
    pub governance: Pubkey,
}

#[event]
pub struct TokensPurchased {
    pub buyer: Pubkey,
    /// `None` when paid in SOL
    pub payment_mint: Option<Pubkey>,
    pub amount_paid: u64,
    pub tokens_received: u64,
    pub total_tokens_sold: u64,
}

#[event]
pub struct TreasuryWithdrawn {
    pub amount: u64,
    pub treasury: Pubkey,
}

#[event]
pub struct PresaleMigrated {
    pub from_legacy_layout: bool,
    pub tokens_per_sol: u64,
}
