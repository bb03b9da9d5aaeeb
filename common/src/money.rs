//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
///
/// The amount is stored as a whole number of the [`Currency`]'s minor units
/// (grosze, cents), so sums and per-line totals never accumulate
/// floating-point drift.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`], in minor units of its [`Currency`].
    pub minor: i64,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

/// Number of minor units in one major unit of a [`Currency`].
const MINOR_PER_MAJOR: i64 = 100;

impl Money {
    /// Creates a new [`Money`] from the provided amount of minor units.
    #[must_use]
    pub const fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Multiplies this [`Money`] by the provided factor.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        Some(Self {
            minor: self.minor.checked_mul(factor)?,
            currency: self.currency,
        })
    }

    /// Sums this [`Money`] with the provided one.
    ///
    /// [`None`] is returned on overflow, or if the [`Currency`]ies differ.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        (self.currency == other.currency).then_some(())?;
        Some(Self {
            minor: self.minor.checked_add(other.minor)?,
            currency: self.currency,
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { minor, currency } = self;
        let sign = if *minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        let (major, frac) = (abs / 100, abs % 100);
        if frac == 0 {
            write!(f, "{sign}{major}{currency}")
        } else {
            write!(f, "{sign}{major}.{frac:02}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        let minor = amount
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .filter(Decimal::is_integer)
            .ok_or("sub-minor-unit precision")?
            .to_i64()
            .ok_or("amount out of range")?;

        Ok(Self { minor, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Polish Zloty."]
        Pln = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "US Dollar."]
        Usd = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Currency, Money};

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("28.50PLN").unwrap(),
            Money::from_minor(2850, Currency::Pln),
        );

        assert_eq!(
            Money::from_str("123.45EUR").unwrap(),
            Money::from_minor(12345, Currency::Eur),
        );

        assert_eq!(
            Money::from_str("8USD").unwrap(),
            Money::from_minor(800, Currency::Usd),
        );

        assert_eq!(
            Money::from_str("123.4PLN").unwrap(),
            Money::from_minor(12340, Currency::Pln),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Pl").is_err());
        assert!(Money::from_str("123.45Zloty").is_err());
        assert!(Money::from_str("123.456PLN").is_err());

        assert!(Money::from_str("123.00PLN").is_ok());
        assert!(Money::from_str("123.0PLN").is_ok());
        assert!(Money::from_str("123PLN").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::from_minor(2850, Currency::Pln).to_string(),
            "28.50PLN",
        );

        assert_eq!(
            Money::from_minor(12345, Currency::Eur).to_string(),
            "123.45EUR",
        );

        assert_eq!(Money::from_minor(12300, Currency::Usd).to_string(), "123USD");
        assert_eq!(Money::from_minor(5, Currency::Pln).to_string(), "0.05PLN");
        assert_eq!(Money::from_minor(-5, Currency::Pln).to_string(), "-0.05PLN");
    }

    #[test]
    fn checked_arithmetic() {
        let a = Money::from_minor(1800, Currency::Pln);
        let b = Money::from_minor(800, Currency::Pln);

        assert_eq!(
            a.checked_mul(2).unwrap(),
            Money::from_minor(3600, Currency::Pln),
        );
        assert_eq!(
            a.checked_add(b).unwrap(),
            Money::from_minor(2600, Currency::Pln),
        );

        assert!(a.checked_mul(i64::MAX).is_none());
        assert!(a
            .checked_add(Money::from_minor(1, Currency::Eur))
            .is_none());
    }
}
