use anchor_lang::prelude::*;
use chainlink_solana::v2::read_feed_v2;

use crate::constants::{CHAINLINK_PROGRAM_ID, PRICE_FEED_STALENESS_THRESHOLD_SECONDS};
use crate::errors::PresaleError;

/// A validated SOL/USD answer. `answer / 10^decimals` is the price in dollars.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OraclePrice {
    pub answer: u128,
    pub decimals: u8,
    pub published_at: i64,
}

/// Reads the latest round of a Chainlink OCR2 feed account.
pub fn read_sol_usd_price(feed: &AccountInfo, now: i64) -> Result<OraclePrice> {
    require_keys_eq!(
        *feed.owner,
        CHAINLINK_PROGRAM_ID,
        PresaleError::InvalidOracleOwner
    );

    let feed_data = read_feed_v2(feed.try_borrow_data()?, feed.owner.to_bytes())
        .map_err(|_| error!(PresaleError::InvalidOraclePrice))?;
    let round = feed_data
        .latest_round_data()
        .map(|round| (round.answer, round.timestamp));

    validate_round(round, feed_data.decimals(), now)
}

/// `round` is `(answer, timestamp)` of the latest round, if any.
pub fn validate_round(round: Option<(i128, u32)>, decimals: u8, now: i64) -> Result<OraclePrice> {
    let (answer, timestamp) = round.ok_or(PresaleError::InvalidOraclePrice)?;
    require!(answer > 0, PresaleError::InvalidOraclePrice);

    let published_at = i64::from(timestamp);
    // A round stamped slightly ahead of the local clock is accepted
    let age = now
        .checked_sub(published_at)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    require!(
        age <= PRICE_FEED_STALENESS_THRESHOLD_SECONDS,
        PresaleError::StaleOraclePrice
    );

    Ok(OraclePrice {
        answer: answer as u128,
        decimals,
        published_at,
    })
}
