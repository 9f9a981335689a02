use anchor_lang::prelude::*;

use crate::state::GovernanceAction;

#[event]
pub struct TransactionQueued {
    pub id: u64,
    pub action: GovernanceAction,
    pub initiator: Pubkey,
    pub execute_after: i64,
}

#[event]
pub struct TransactionApproved {
    pub id: u64,
    pub approver: Pubkey,
    pub approvals: u8,
}

#[event]
pub struct TransactionRejected {
    pub id: u64,
    pub rejector: Pubkey,
    pub reason: String,
    pub finalized: bool,
}

#[event]
pub struct TransactionExecuted {
    pub id: u64,
    pub action: GovernanceAction,
    pub executor: Pubkey,
}

#[event]
pub struct EmergencyPauseActivated {
    pub by: Pubkey,
}

#[event]
pub struct SignerAdded {
    pub signer: Pubkey,
}

#[event]
pub struct SignerRemoved {
    pub signer: Pubkey,
}
