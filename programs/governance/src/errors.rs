use anchor_lang::prelude::*;

#[error_code]
pub enum GovernanceError {
    #[msg("Governance already initialized")]
    AlreadyInitialized,
    #[msg("Token program not set")]
    TokenProgramNotSet,
    #[msg("Token program already set")]
    TokenProgramAlreadySet,
    #[msg("Presale program not set")]
    PresaleProgramNotSet,
    #[msg("Presale program already set")]
    PresaleProgramAlreadySet,
    #[msg("Program account does not match the linked program")]
    InvalidProgramLink,
    #[msg("Transaction not found")]
    TransactionNotFound,
    #[msg("Signer has already voted on this transaction")]
    DuplicateVote,
    #[msg("Transaction already executed")]
    AlreadyExecuted,
    #[msg("Transaction already rejected")]
    AlreadyFinalized,
    #[msg("Cooldown period has not elapsed")]
    CooldownNotElapsed,
    #[msg("Insufficient approvals")]
    InsufficientApprovals,
    #[msg("Empty rejection reason")]
    EmptyRejectionReason,
    #[msg("Rejection reason exceeds 256 bytes")]
    RejectionReasonTooLong,
    #[msg("Invalid action payload")]
    InvalidActionPayload,
    #[msg("An account required by this action was not provided")]
    MissingActionAccount,
    #[msg("Account does not match the queued action")]
    ActionAccountMismatch,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Not an authorized signer")]
    NotAuthorizedSigner,
    #[msg("Required approvals must be at least 2")]
    RequiredApprovalsTooLow,
    #[msg("Required approvals exceeds signer count")]
    RequiredApprovalsTooHigh,
    #[msg("Minimum cooldown period not met")]
    CooldownPeriodTooLow,
    #[msg("Cooldown period exceeds 30 days")]
    CooldownPeriodTooHigh,
    #[msg("Too many signers (max 10)")]
    TooManySigners,
    #[msg("Duplicate signers in signer list")]
    DuplicateSigners,
    #[msg("Address must not be the default pubkey")]
    ZeroOrDefaultAddress,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
