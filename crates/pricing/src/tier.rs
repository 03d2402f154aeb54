//! Quantity price tiers: validation of proposed tiers and display ordering.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use backoffice_core::ValueObject;

/// A price that applies once the purchased quantity reaches `min_quantity`.
///
/// Quantity 1 is never a tier: it is carried by the product's base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min_quantity: u32,
    pub price: Decimal,
    /// Promotional override; zero means "no promo".
    #[serde(default)]
    pub price_promo: Decimal,
    /// Secondary override; zero means "not set".
    #[serde(default)]
    pub custom_price: Decimal,
}

impl ValueObject for Tier {}

impl Tier {
    /// Price charged per unit at this tier (promo wins when set).
    pub fn effective_price(&self) -> Decimal {
        if self.has_promo() {
            self.price_promo
        } else {
            self.price
        }
    }

    /// Whether a promotional override is set (non-zero).
    pub fn has_promo(&self) -> bool {
        self.price_promo > Decimal::ZERO
    }
}

/// Raw form fields for a proposed tier, exactly as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTierInput {
    pub min_quantity: String,
    pub price: String,
    pub price_promo: String,
    pub custom_price: String,
}

impl RawTierInput {
    /// Input with only the required fields filled in.
    pub fn new(min_quantity: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            min_quantity: min_quantity.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    pub fn with_promo(mut self, price_promo: impl Into<String>) -> Self {
        self.price_promo = price_promo.into();
        self
    }

    pub fn with_custom_price(mut self, custom_price: impl Into<String>) -> Self {
        self.custom_price = custom_price.into();
        self
    }
}

/// Why a proposed tier was rejected.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RuleViolation {
    #[error("minimum quantity must be a whole number greater than zero")]
    InvalidQuantity,

    #[error("quantity 1 uses the product base price; edit the product instead")]
    ReservedBaseQuantity,

    #[error("a tier with this minimum quantity already exists")]
    DuplicateQuantity,

    #[error("price must be a number greater than zero")]
    InvalidPrice,
}

impl RuleViolation {
    /// Stable machine-readable code (used in API error bodies).
    pub fn code(self) -> &'static str {
        match self {
            RuleViolation::InvalidQuantity => "invalid_quantity",
            RuleViolation::ReservedBaseQuantity => "reserved_base_quantity",
            RuleViolation::DuplicateQuantity => "duplicate_quantity",
            RuleViolation::InvalidPrice => "invalid_price",
        }
    }
}

/// Validate a proposed tier against a product's current tiers.
///
/// Checks run in a fixed order and stop at the first failure. The optional
/// override fields never fail: anything unparseable (or negative) becomes zero.
pub fn propose_tier(existing: &[Tier], input: &RawTierInput) -> Result<Tier, RuleViolation> {
    let min_quantity = parse_quantity(&input.min_quantity).ok_or(RuleViolation::InvalidQuantity)?;

    if min_quantity == 1 {
        return Err(RuleViolation::ReservedBaseQuantity);
    }

    if existing.iter().any(|t| t.min_quantity == min_quantity) {
        return Err(RuleViolation::DuplicateQuantity);
    }

    let price = parse_amount(&input.price)
        .filter(|p| *p > Decimal::ZERO)
        .ok_or(RuleViolation::InvalidPrice)?;

    Ok(Tier {
        min_quantity,
        price,
        price_promo: parse_amount(&input.price_promo).unwrap_or(Decimal::ZERO),
        custom_price: parse_amount(&input.custom_price).unwrap_or(Decimal::ZERO),
    })
}

/// Tiers in display order (ascending `min_quantity`); the input is untouched.
pub fn render_order(tiers: &[Tier]) -> Vec<Tier> {
    let mut ordered = tiers.to_vec();
    ordered.sort_by_key(|t| t.min_quantity);
    ordered
}

fn parse_quantity(raw: &str) -> Option<u32> {
    let value: i64 = raw.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }
    u32::try_from(value).ok()
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|d| !d.is_sign_negative() || d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_quantity: u32, price: i64) -> Tier {
        Tier {
            min_quantity,
            price: Decimal::from(price),
            price_promo: Decimal::ZERO,
            custom_price: Decimal::ZERO,
        }
    }

    #[test]
    fn accepts_first_tier_with_defaults_for_optional_fields() {
        let accepted = propose_tier(&[], &RawTierInput::new("5", "95000")).unwrap();
        assert_eq!(
            accepted,
            Tier {
                min_quantity: 5,
                price: Decimal::from(95000),
                price_promo: Decimal::ZERO,
                custom_price: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn rejects_duplicate_quantity_even_with_different_price() {
        let existing = vec![tier(5, 95000)];
        let err = propose_tier(&existing, &RawTierInput::new("5", "100000")).unwrap_err();
        assert_eq!(err, RuleViolation::DuplicateQuantity);
    }

    #[test]
    fn rejects_quantity_one() {
        let err = propose_tier(&[], &RawTierInput::new("1", "50000")).unwrap_err();
        assert_eq!(err, RuleViolation::ReservedBaseQuantity);
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = propose_tier(&[], &RawTierInput::new("0", "50000")).unwrap_err();
        assert_eq!(err, RuleViolation::InvalidQuantity);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = propose_tier(&[], &RawTierInput::new("10", "abc")).unwrap_err();
        assert_eq!(err, RuleViolation::InvalidPrice);
    }

    #[test]
    fn rejects_missing_negative_and_fractional_quantities() {
        for raw in ["", "   ", "-3", "2.5", "ten"] {
            let err = propose_tier(&[], &RawTierInput::new(raw, "1000")).unwrap_err();
            assert_eq!(err, RuleViolation::InvalidQuantity, "input {raw:?}");
        }
    }

    #[test]
    fn rejects_quantities_beyond_u32() {
        for raw in ["4294967296", "99999999999", "99999999999999999999999"] {
            let err = propose_tier(&[], &RawTierInput::new(raw, "1000")).unwrap_err();
            assert_eq!(err, RuleViolation::InvalidQuantity, "input {raw:?}");
        }
        let accepted = propose_tier(&[], &RawTierInput::new("4294967295", "1000")).unwrap();
        assert_eq!(accepted.min_quantity, u32::MAX);
    }

    #[test]
    fn accepts_largest_representable_price() {
        let accepted = propose_tier(&[], &RawTierInput::new("2", "79228162514264337593543950335")).unwrap();
        assert_eq!(accepted.price, Decimal::MAX);
        assert_eq!(
            propose_tier(&[], &RawTierInput::new("2", "79228162514264337593543950336")),
            Err(RuleViolation::InvalidPrice)
        );
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        for raw in ["", "0", "0.00", "-10"] {
            let err = propose_tier(&[], &RawTierInput::new("3", raw)).unwrap_err();
            assert_eq!(err, RuleViolation::InvalidPrice, "input {raw:?}");
        }
    }

    #[test]
    fn checks_run_in_order() {
        // Quantity problems are reported before price problems.
        let existing = vec![tier(5, 1000)];
        assert_eq!(
            propose_tier(&existing, &RawTierInput::new("x", "y")),
            Err(RuleViolation::InvalidQuantity)
        );
        assert_eq!(
            propose_tier(&existing, &RawTierInput::new("1", "y")),
            Err(RuleViolation::ReservedBaseQuantity)
        );
        assert_eq!(
            propose_tier(&existing, &RawTierInput::new("5", "y")),
            Err(RuleViolation::DuplicateQuantity)
        );
    }

    #[test]
    fn trims_whitespace_and_accepts_decimal_prices() {
        let accepted = propose_tier(&[], &RawTierInput::new(" 12 ", " 1250.50 ")).unwrap();
        assert_eq!(accepted.min_quantity, 12);
        assert_eq!(accepted.price, Decimal::new(125050, 2));
    }

    #[test]
    fn malformed_optional_fields_degrade_to_zero() {
        let input = RawTierInput::new("10", "90000")
            .with_promo("soon")
            .with_custom_price("-5");
        let accepted = propose_tier(&[], &input).unwrap();
        assert_eq!(accepted.price_promo, Decimal::ZERO);
        assert_eq!(accepted.custom_price, Decimal::ZERO);
    }

    #[test]
    fn optional_fields_are_kept_when_valid() {
        let input = RawTierInput::new("10", "90000")
            .with_promo("85000")
            .with_custom_price("87500");
        let accepted = propose_tier(&[], &input).unwrap();
        assert_eq!(accepted.price_promo, Decimal::from(85000));
        assert_eq!(accepted.custom_price, Decimal::from(87500));
        assert!(accepted.has_promo());
        assert_eq!(accepted.effective_price(), Decimal::from(85000));
    }

    #[test]
    fn propose_does_not_touch_existing_tiers() {
        let existing = vec![tier(10, 900), tier(5, 950)];
        let snapshot = existing.clone();
        let _ = propose_tier(&existing, &RawTierInput::new("20", "800"));
        assert_eq!(existing, snapshot);
    }

    #[test]
    fn render_order_sorts_ascending_without_mutating() {
        let tiers = vec![tier(50, 700), tier(5, 950), tier(20, 800)];
        let ordered = render_order(&tiers);
        let quantities: Vec<u32> = ordered.iter().map(|t| t.min_quantity).collect();
        assert_eq!(quantities, vec![5, 20, 50]);
        assert_eq!(tiers[0].min_quantity, 50);
    }

    #[test]
    fn render_order_of_empty_is_empty() {
        assert!(render_order(&[]).is_empty());
    }

    #[test]
    fn violation_codes_are_snake_case() {
        assert_eq!(RuleViolation::DuplicateQuantity.code(), "duplicate_quantity");
        assert_eq!(RuleViolation::ReservedBaseQuantity.code(), "reserved_base_quantity");
    }

    #[test]
    fn tier_json_defaults_missing_overrides() {
        let parsed: Tier = serde_json::from_str(r#"{"min_quantity": 5, "price": 95000}"#).unwrap();
        assert_eq!(parsed, tier(5, 95000));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn existing_tiers() -> impl Strategy<Value = Vec<Tier>> {
            prop::collection::btree_set(2u32..10_000, 0..20).prop_map(|qs| {
                qs.into_iter()
                    .map(|q| tier(q, 1000 + i64::from(q)))
                    .collect()
            })
        }

        proptest! {
            /// Property: a fresh quantity above 1 with a positive price is accepted as given.
            #[test]
            fn valid_new_tiers_are_accepted(
                existing in existing_tiers(),
                quantity in 2u32..20_000,
                price in 1u64..10_000_000,
            ) {
                prop_assume!(existing.iter().all(|t| t.min_quantity != quantity));
                let input = RawTierInput::new(quantity.to_string(), price.to_string());
                let accepted = propose_tier(&existing, &input).unwrap();
                prop_assert_eq!(accepted, Tier {
                    min_quantity: quantity,
                    price: Decimal::from(price),
                    price_promo: Decimal::ZERO,
                    custom_price: Decimal::ZERO,
                });
            }

            /// Property: quantity 1 is always reserved, whatever the price says.
            #[test]
            fn quantity_one_is_always_reserved(existing in existing_tiers(), price in ".*") {
                let err = propose_tier(&existing, &RawTierInput::new("1", price)).unwrap_err();
                prop_assert_eq!(err, RuleViolation::ReservedBaseQuantity);
            }

            /// Property: any existing quantity is a duplicate regardless of price.
            #[test]
            fn existing_quantities_are_duplicates(
                existing in existing_tiers().prop_filter("non-empty", |t| !t.is_empty()),
                pick in any::<prop::sample::Index>(),
                price in ".*",
            ) {
                let quantity = existing[pick.index(existing.len())].min_quantity;
                let err = propose_tier(&existing, &RawTierInput::new(quantity.to_string(), price)).unwrap_err();
                prop_assert_eq!(err, RuleViolation::DuplicateQuantity);
            }

            /// Property: render_order is idempotent and ascending.
            #[test]
            fn render_order_is_idempotent(existing in existing_tiers(), seed in any::<u64>()) {
                let mut shuffled = existing.clone();
                if !shuffled.is_empty() {
                    let len = shuffled.len();
                    shuffled.rotate_left((seed as usize) % len);
                    shuffled.reverse();
                }
                let once = render_order(&shuffled);
                let twice = render_order(&once);
                prop_assert_eq!(&once, &twice);
                prop_assert!(once.windows(2).all(|w| w[0].min_quantity < w[1].min_quantity));
                prop_assert_eq!(once.len(), shuffled.len());
            }
        }
    }
}
