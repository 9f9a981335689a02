use anchor_lang::prelude::*;
use anchor_lang::solana_program::pubkey;

pub const PRESALE_STATE_SEED: &[u8] = b"presale_state";
pub const PRESALE_TOKEN_VAULT_SEED: &[u8] = b"presale_token_vault_pda";
pub const PRESALE_PAYMENT_VAULT_SEED: &[u8] = b"presale_payment_vault_pda";
pub const PRESALE_SOL_VAULT_SEED: &[u8] = b"presale_sol_vault";
pub const USER_PURCHASE_SEED: &[u8] = b"user_purchase";
pub const ALLOWED_TOKEN_SEED: &[u8] = b"allowed_token";

// Chainlink OCR2 program; feed addresses themselves are chosen by the client
pub const CHAINLINK_PROGRAM_ID: Pubkey = pubkey!("HEvSKofvBgfaexv23kMabbYqxasxU3mQ4ibBMEmJWHny");

pub const PRICE_FEED_STALENESS_THRESHOLD_SECONDS: i64 = 3600;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SOL_DECIMALS: u8 = 9;
// token_price_usd_micro is expressed in millionths of a dollar
pub const USD_MICRO_DECIMALS: u8 = 6;
