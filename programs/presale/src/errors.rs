use anchor_lang::prelude::*;

#[error_code]
pub enum PresaleError {
    #[msg("Unauthorized: Only admin or governance can perform this action")]
    Unauthorized,
    #[msg("Presale state already initialized")]
    AlreadyInitialized,
    #[msg("Governance has already been set")]
    GovernanceAlreadySet,
    #[msg("Presale is not active")]
    PresaleNotActive,
    #[msg("Invalid presale status for this operation")]
    InvalidStatus,
    #[msg("Payment token is not allowed")]
    PaymentTokenNotAllowed,
    #[msg("Purchase would exceed the presale cap")]
    PresaleCapExceeded,
    #[msg("Purchase would exceed the per-user limit")]
    PerUserLimitExceeded,
    #[msg("Token program emergency pause is active")]
    TokenEmergencyPaused,
    #[msg("Buyer is blacklisted")]
    BuyerBlacklisted,
    #[msg("Invalid token program state")]
    InvalidTokenProgramState,
    #[msg("Treasury address has not been set")]
    TreasuryNotSet,
    #[msg("Invalid treasury account")]
    InvalidTreasuryAccount,
    #[msg("Vault balance is too low for this withdrawal")]
    InsufficientVaultBalance,
    #[msg("SOL vault must be empty or hold at least the rent-exempt minimum")]
    SolVaultBelowRentMinimum,
    #[msg("Oracle price is stale")]
    StaleOraclePrice,
    #[msg("Price feed is not owned by the Chainlink program")]
    InvalidOracleOwner,
    #[msg("Oracle returned no usable price")]
    InvalidOraclePrice,
    #[msg("Address must not be the default pubkey")]
    ZeroOrDefaultAddress,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid presale limits")]
    InvalidLimits,
    #[msg("Account data does not match any known presale layout")]
    InvalidAccount,
}
