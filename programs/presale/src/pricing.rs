//! Token quotes for each way of paying. All intermediates are u128; a quote
//! that overflows u64 or rounds down to zero is rejected.

use anchor_lang::prelude::*;

use crate::constants::{LAMPORTS_PER_SOL, SOL_DECIMALS, USD_MICRO_DECIMALS};
use crate::errors::PresaleError;
use crate::oracle::OraclePrice;

fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or_else(|| error!(PresaleError::ArithmeticOverflow))
}

fn mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b)
        .ok_or_else(|| error!(PresaleError::ArithmeticOverflow))
}

fn finish(numerator: u128, denominator: u128) -> Result<u64> {
    let quote = numerator
        .checked_div(denominator)
        .ok_or_else(|| error!(PresaleError::InvalidAmount))?;
    let quote = u64::try_from(quote).map_err(|_| error!(PresaleError::ArithmeticOverflow))?;
    require!(quote > 0, PresaleError::InvalidAmount);
    Ok(quote)
}

/// `lamports * tokens_per_sol / LAMPORTS_PER_SOL`
pub fn tokens_for_lamports_fixed(lamports: u64, tokens_per_sol: u64) -> Result<u64> {
    let numerator = mul(lamports as u128, tokens_per_sol as u128)?;
    finish(numerator, LAMPORTS_PER_SOL as u128)
}

/// Converts lamports to USD with the oracle answer, then USD to tokens at
/// `token_price_usd_micro`.
pub fn tokens_for_lamports_oracle(
    lamports: u64,
    price: &OraclePrice,
    token_price_usd_micro: u64,
    token_decimals: u8,
) -> Result<u64> {
    require!(token_price_usd_micro > 0, PresaleError::InvalidAmount);
    let numerator = mul(
        mul(mul(lamports as u128, price.answer)?, pow10(USD_MICRO_DECIMALS)?)?,
        pow10(token_decimals)?,
    )?;
    let denominator = mul(
        mul(token_price_usd_micro as u128, pow10(SOL_DECIMALS)?)?,
        pow10(price.decimals)?,
    )?;
    finish(numerator, denominator)
}

/// For USD-pegged payment tokens: one whole payment token is one dollar.
pub fn tokens_for_stablecoin(
    amount: u64,
    payment_decimals: u8,
    token_price_usd_micro: u64,
    token_decimals: u8,
) -> Result<u64> {
    require!(token_price_usd_micro > 0, PresaleError::InvalidAmount);
    let numerator = mul(
        mul(amount as u128, pow10(USD_MICRO_DECIMALS)?)?,
        pow10(token_decimals)?,
    )?;
    let denominator = mul(token_price_usd_micro as u128, pow10(payment_decimals)?)?;
    finish(numerator, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rate_one_sol() {
        let tokens = tokens_for_lamports_fixed(1_000_000_000, 133_000_000_000_000).unwrap();
        assert_eq!(tokens, 133_000_000_000_000);
    }

    #[test]
    fn fixed_rate_fractional_sol() {
        // 0.25 SOL at 1000 tokens per SOL
        assert_eq!(tokens_for_lamports_fixed(250_000_000, 1_000).unwrap(), 250);
        // Rounds down to nothing
        assert_eq!(
            tokens_for_lamports_fixed(1, 1_000).unwrap_err(),
            PresaleError::InvalidAmount.into()
        );
    }

    #[test]
    fn fixed_rate_overflowing_u64_is_rejected() {
        let err = tokens_for_lamports_fixed(u64::MAX, u64::MAX).unwrap_err();
        assert_eq!(err, PresaleError::ArithmeticOverflow.into());
    }

    #[test]
    fn oracle_rate_uses_feed_decimals() {
        // $140.00000000 SOL, token at $0.001, 9-decimal token
        let price = OraclePrice {
            answer: 14_000_000_000,
            decimals: 8,
            published_at: 0,
        };
        let tokens = tokens_for_lamports_oracle(1_000_000_000, &price, 1_000, 9).unwrap();
        assert_eq!(tokens, 140_000 * 1_000_000_000);

        // Same price published with 10 decimals gives the same quote
        let price_10 = OraclePrice {
            answer: 140 * 10u128.pow(10),
            decimals: 10,
            published_at: 0,
        };
        assert_eq!(
            tokens_for_lamports_oracle(1_000_000_000, &price_10, 1_000, 9).unwrap(),
            tokens
        );
    }

    #[test]
    fn oracle_rate_requires_a_price() {
        let price = OraclePrice {
            answer: 14_000_000_000,
            decimals: 8,
            published_at: 0,
        };
        assert_eq!(
            tokens_for_lamports_oracle(1_000_000_000, &price, 0, 9).unwrap_err(),
            PresaleError::InvalidAmount.into()
        );
    }

    #[test]
    fn stablecoin_rate() {
        // 10 USDC (6 decimals) at $0.50 for a 9-decimal token = 20 tokens
        let tokens = tokens_for_stablecoin(10_000_000, 6, 500_000, 9).unwrap();
        assert_eq!(tokens, 20_000_000_000);
    }
}
