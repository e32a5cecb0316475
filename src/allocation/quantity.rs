//! Smallest-unit arithmetic shared by the allocator and the collector.
//!
//! Everything here is integer or exact-rational math. User supplied decimal
//! strings (SOL amounts, prices, token amounts) are parsed without going
//! through `f64`, so a price of `0.0001` SOL is exactly 100_000 lamports.

use crate::errors::{Result, SimError};
use serde::Serialize;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use std::fmt;

/// Decimal precision of SOL (lamports per SOL = 10^9).
pub const SOL_DECIMALS: u8 = 9;

// Keeps the lamport-scaled numerator and 10^digits inside u128.
const MAX_PRICE_FRACTION_DIGITS: usize = 18;

/// Integer ceiling of `numerator / denominator`. `denominator` must be non-zero.
pub fn ceil_div(numerator: u64, denominator: u64) -> u64 {
    numerator / denominator + u64::from(numerator % denominator != 0)
}

/// Splits a plain decimal string into its whole and fractional digit runs.
fn split_decimal<'a>(input: &'a str, what: &str) -> Result<(&'a str, &'a str)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SimError::InvalidQuantity(format!("{} is empty", what)));
    }
    if trimmed.starts_with('-') {
        return Err(SimError::InvalidQuantity(format!("{} cannot be negative: {}", what, trimmed)));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || (trimmed.contains('.') && fraction.is_empty()) {
        return Err(SimError::InvalidQuantity(format!("{} is not a decimal number: {}", what, trimmed)));
    }
    Ok((whole, fraction))
}

/// Parses a decimal string into an integer count of smallest units for an
/// asset with `decimals` digits of precision.
///
/// Rejects negatives, anything non-numeric, values that would need a fraction
/// of a smallest unit, and values that overflow `u64`.
pub fn parse_decimal_units(input: &str, decimals: u8, what: &str) -> Result<u64> {
    let (whole, fraction) = split_decimal(input, what)?;
    if fraction.len() > decimals as usize {
        return Err(SimError::InvalidQuantity(format!(
            "{} {} has more than {} fractional digits",
            what,
            input.trim(),
            decimals
        )));
    }

    let overflow = || SimError::InvalidQuantity(format!("{} {} overflows u64", what, input.trim()));
    let scale = 10u64.checked_pow(decimals as u32).ok_or_else(overflow)?;
    let whole_units: u64 = whole.parse().map_err(|_| overflow())?;
    let fraction_units: u64 = if fraction.is_empty() {
        0
    } else {
        let padding = 10u64.pow((decimals as usize - fraction.len()) as u32);
        fraction.parse::<u64>().map_err(|_| overflow())? * padding
    };

    whole_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction_units))
        .ok_or_else(overflow)
}

/// Parses a SOL amount such as `"0.005"` into lamports.
pub fn parse_sol_amount(input: &str) -> Result<u64> {
    parse_decimal_units(input, SOL_DECIMALS, "SOL amount")
}

/// Parses a whole-token amount such as `"10"` or `"1.5"` into smallest units.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<u64> {
    parse_decimal_units(input, decimals, "token amount")
}

/// Parses a count of smallest units. `"1.5"` and `"-1"` are both rejected.
pub fn parse_quantity(input: &str) -> Result<u64> {
    parse_decimal_units(input, 0, "quantity")
}

/// Converts whole tokens into smallest units, failing on overflow.
pub fn to_smallest_units(whole_tokens: u64, decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| whole_tokens.checked_mul(scale))
        .ok_or_else(|| {
            SimError::InvalidQuantity(format!(
                "{} tokens with {} decimals overflows u64",
                whole_tokens, decimals
            ))
        })
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Price of the asset as an exact positive rational: `lamports` are paid for
/// every `units` smallest token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitPrice {
    lamports: u64,
    units: u64,
}

impl UnitPrice {
    pub fn new(lamports: u64, units: u64) -> Result<Self> {
        if lamports == 0 || units == 0 {
            return Err(SimError::InvalidPrice(format!(
                "price must be positive, got {} lamports per {} units",
                lamports, units
            )));
        }
        let divisor = gcd(lamports as u128, units as u128) as u64;
        Ok(Self {
            lamports: lamports / divisor,
            units: units / divisor,
        })
    }

    /// Parses a decimal SOL price per smallest unit, e.g. `"0.0001"`.
    ///
    /// Sub-lamport prices stay exact: `"0.0000000005"` is 1 lamport per 2 units.
    pub fn from_sol_str(input: &str) -> Result<Self> {
        let (whole, fraction) = split_decimal(input, "price").map_err(|e| SimError::InvalidPrice(e.to_string()))?;
        if fraction.len() > MAX_PRICE_FRACTION_DIGITS {
            return Err(SimError::InvalidPrice(format!(
                "price {} has more than {} fractional digits",
                input.trim(),
                MAX_PRICE_FRACTION_DIGITS
            )));
        }

        let too_large = || SimError::InvalidPrice(format!("price {} is too large", input.trim()));
        let digits = format!("{}{}", whole, fraction);
        let numerator: u128 = digits.parse().map_err(|_| too_large())?;
        let numerator = numerator.checked_mul(LAMPORTS_PER_SOL as u128).ok_or_else(too_large)?;
        let denominator = 10u128.pow(fraction.len() as u32);

        if numerator == 0 {
            return Err(SimError::InvalidPrice(format!("price must be positive, got {}", input.trim())));
        }
        let divisor = gcd(numerator, denominator);
        let lamports = u64::try_from(numerator / divisor).map_err(|_| too_large())?;
        let units = u64::try_from(denominator / divisor).map_err(|_| too_large())?;
        Self::new(lamports, units)
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    /// floor(quantity × price) in lamports. Never rounds up.
    pub fn lamports_for(&self, quantity: u64) -> Result<u64> {
        let value = quantity as u128 * self.lamports as u128 / self.units as u128;
        u64::try_from(value).map_err(|_| {
            SimError::InvalidQuantity(format!("{} units at {} overflows a lamport amount", quantity, self))
        })
    }

    /// floor(lamports / price) in smallest units.
    pub fn units_for(&self, lamports: u64) -> Result<u64> {
        let value = lamports as u128 * self.units as u128 / self.lamports as u128;
        u64::try_from(value).map_err(|_| {
            SimError::InvalidQuantity(format!("{} lamports at {} overflows a unit amount", lamports, self))
        })
    }

    /// Approximate SOL per smallest unit, for display only.
    pub fn as_sol_per_unit(&self) -> f64 {
        self.lamports as f64 / self.units as f64 / LAMPORTS_PER_SOL as f64
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.units == 1 {
            write!(f, "{} lamports/unit", self.lamports)
        } else {
            write!(f, "{} lamports/{} units", self.lamports, self.units)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div_rounds_up_only_on_remainder() {
        assert_eq!(ceil_div(10, 3), 4);
        assert_eq!(ceil_div(9, 3), 3);
        assert_eq!(ceil_div(0, 5), 0);
        assert_eq!(ceil_div(1, 5), 1);
        assert_eq!(ceil_div(u64::MAX, 2), u64::MAX / 2 + 1);
    }

    #[test]
    fn parses_sol_amounts_into_lamports() {
        assert_eq!(parse_sol_amount("0.005").unwrap(), 5_000_000);
        assert_eq!(parse_sol_amount("2").unwrap(), 2 * LAMPORTS_PER_SOL);
        assert_eq!(parse_sol_amount(" 0.000000001 ").unwrap(), 1);
    }

    #[test]
    fn rejects_negative_and_fractional_quantities() {
        for bad in ["-1", "1.5", "", "abc", "1.", "1e3", "+"] {
            assert!(
                matches!(parse_quantity(bad), Err(SimError::InvalidQuantity(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
        assert!(matches!(parse_sol_amount("0.0000000001"), Err(SimError::InvalidQuantity(_))));
        assert!(matches!(parse_quantity("18446744073709551616"), Err(SimError::InvalidQuantity(_))));
        assert_eq!(parse_quantity("50").unwrap(), 50);
    }

    #[test]
    fn token_amounts_respect_decimals() {
        assert_eq!(parse_token_amount("10", 9).unwrap(), 10_000_000_000);
        assert_eq!(parse_token_amount("1.25", 2).unwrap(), 125);
        assert!(parse_token_amount("1.255", 2).is_err());
        assert_eq!(to_smallest_units(10, 9).unwrap(), 10_000_000_000);
        assert!(to_smallest_units(u64::MAX, 1).is_err());
    }

    #[test]
    fn price_from_sol_string_is_exact() {
        let price = UnitPrice::from_sol_str("0.0001").unwrap();
        assert_eq!((price.lamports(), price.units()), (100_000, 1));

        let half_lamport = UnitPrice::from_sol_str("0.0000000005").unwrap();
        assert_eq!((half_lamport.lamports(), half_lamport.units()), (1, 2));

        assert!(matches!(UnitPrice::from_sol_str("0"), Err(SimError::InvalidPrice(_))));
        assert!(matches!(UnitPrice::from_sol_str("-0.1"), Err(SimError::InvalidPrice(_))));
        assert!(matches!(UnitPrice::new(0, 1), Err(SimError::InvalidPrice(_))));
    }

    #[test]
    fn price_conversions_floor() {
        let half = UnitPrice::new(1, 2).unwrap();
        assert_eq!(half.lamports_for(3).unwrap(), 1);
        assert_eq!(half.lamports_for(4).unwrap(), 2);
        assert_eq!(half.units_for(3).unwrap(), 6);

        let one_sol = UnitPrice::from_sol_str("1").unwrap();
        assert_eq!(one_sol.units_for(parse_sol_amount("0.0001").unwrap()).unwrap(), 0);
        assert!(UnitPrice::new(u64::MAX, 1).unwrap().lamports_for(2).is_err());
    }
}
