use alloy::primitives::U256;
use tokendeck_error::{Result, TokendeckError};

/// A token amount held as base units (the smallest unit, 18 decimals for the
/// dashboard's tokens) with exact conversion to and from the display form.
///
/// All arithmetic is integer arithmetic on [U256]; the transfer path never
/// touches floating point, so `"1.5"` converts to exactly
/// `1500000000000000000` base units and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenAmount {
    base: U256,
    decimals: u8,
}

impl TokenAmount {
    /// Wraps a base-unit value as returned by `balanceOf`.
    pub fn from_base(base: U256, decimals: u8) -> Self {
        Self { base, decimals }
    }

    /// Zero base units.
    pub fn zero(decimals: u8) -> Self {
        Self {
            base: U256::ZERO,
            decimals,
        }
    }

    /// Parses a user-supplied decimal string into base units.
    ///
    /// The input must be a plain positive decimal number with at most
    /// `decimals` fractional digits. Empty strings, signs, exponents and
    /// zero are all rejected, so a successful parse is always a transferable
    /// amount.
    pub fn parse(text: &str, decimals: u8) -> Result<Self> {
        let invalid = |reason: &str| TokendeckError::InvalidAmount {
            amount: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        if trimmed.starts_with('-') || trimmed.starts_with('+') {
            return Err(invalid("must be an unsigned decimal"));
        }

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("missing digits"));
        }
        let all_digits =
            |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !(int_part.is_empty() || all_digits(int_part))
            || !(frac_part.is_empty() || all_digits(frac_part))
        {
            return Err(invalid("not a decimal number"));
        }
        if frac_part.len() > decimals as usize {
            return Err(invalid("too many decimal places"));
        }

        let overflow =
            || TokendeckError::AmountOverflow(format!("'{trimmed}' exceeds U256"));

        let whole = if int_part.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(int_part, 10).map_err(|_| overflow())?
        };
        let frac = if frac_part.is_empty() {
            U256::ZERO
        } else {
            let digits = U256::from_str_radix(frac_part, 10).map_err(|_| overflow())?;
            digits
                .checked_mul(pow10(decimals - frac_part.len() as u8))
                .ok_or_else(overflow)?
        };
        let base = whole
            .checked_mul(pow10(decimals))
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(overflow)?;

        if base.is_zero() {
            return Err(invalid("must be positive"));
        }
        Ok(Self { base, decimals })
    }

    /// The amount in base units.
    pub fn base(&self) -> U256 {
        self.base
    }

    /// The decimal scale of this amount.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// True when the amount is zero base units.
    pub fn is_zero(&self) -> bool {
        self.base.is_zero()
    }

    /// Formats the amount for display, trimming trailing fractional zeros:
    /// one full token renders as `"1"`, one and a half as `"1.5"`.
    pub fn display(&self) -> String {
        let scale = pow10(self.decimals);
        let whole = self.base / scale;
        let frac = self.base % scale;
        if frac.is_zero() {
            return whole.to_string();
        }
        let digits = frac.to_string();
        let mut padded = String::new();
        for _ in digits.len()..self.decimals as usize {
            padded.push('0');
        }
        padded.push_str(&digits);
        let trimmed = padded.trim_end_matches('0');
        format!("{whole}.{trimmed}")
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}
