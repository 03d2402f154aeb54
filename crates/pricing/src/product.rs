use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use backoffice_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ProductId, StoreId};

use crate::image::{ImageField, ImageResolver};
use crate::tier::{propose_tier, render_order, RawTierInput, RuleViolation, Tier};

/// Aggregate root: the pricing slice of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    store_id: StoreId,
    name: String,
    base_price: Decimal,
    image: Option<ImageField>,
    tiers: Vec<Tier>,
    version: u64,
}

/// Failure while handling a product command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The proposed tier broke a pricing rule (user-facing).
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl Product {
    pub fn new(
        id: ProductId,
        store_id: StoreId,
        name: impl Into<String>,
        base_price: Decimal,
        image: Option<ImageField>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if base_price <= Decimal::ZERO {
            return Err(DomainError::validation("base price must be greater than zero"));
        }

        Ok(Self {
            id,
            store_id,
            name,
            base_price,
            image,
            tiers: Vec::new(),
            version: 0,
        })
    }

    pub fn store_id(&self) -> StoreId {
        self.store_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price for a single unit (quantity 1).
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn image(&self) -> Option<&ImageField> {
        self.image.as_ref()
    }

    /// Tiers in insertion order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn tiers_for_display(&self) -> Vec<Tier> {
        render_order(&self.tiers)
    }

    pub fn display_image(&self, resolver: &ImageResolver) -> String {
        resolver.resolve(self.image.as_ref())
    }

    /// Per-unit price when buying `quantity` units.
    ///
    /// The tier with the highest threshold not above `quantity` applies;
    /// below every threshold the base price applies.
    pub fn unit_price(&self, quantity: u32) -> Decimal {
        self.tiers
            .iter()
            .filter(|t| t.min_quantity <= quantity)
            .max_by_key(|t| t.min_quantity)
            .map(Tier::effective_price)
            .unwrap_or(self.base_price)
    }

    /// Total for `quantity` units at the resolved unit price.
    ///
    /// Fails when the total does not fit in a `Decimal`.
    pub fn line_total(&self, quantity: u32) -> DomainResult<Decimal> {
        self.unit_price(quantity)
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "line total for {quantity} units exceeds the largest supported amount"
                ))
            })
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddTier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTier {
    pub product_id: ProductId,
    pub input: RawTierInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCommand {
    AddTier(AddTier),
}

/// Event: TierAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAdded {
    pub product_id: ProductId,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    TierAdded(TierAdded),
}

impl ProductEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::TierAdded(_) => "pricing.product.tier_added",
        }
    }
}

impl Aggregate for Product {
    type Command = ProductCommand;
    type Event = ProductEvent;
    type Error = ProductError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProductEvent::TierAdded(e) => {
                self.tiers.push(e.tier.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::AddTier(cmd) => self.handle_add_tier(cmd),
        }
    }
}

impl Product {
    fn handle_add_tier(&self, cmd: &AddTier) -> Result<Vec<ProductEvent>, ProductError> {
        if self.id != cmd.product_id {
            return Err(DomainError::invariant("product_id mismatch").into());
        }

        let tier = propose_tier(&self.tiers, &cmd.input)?;

        Ok(vec![ProductEvent::TierAdded(TierAdded {
            product_id: cmd.product_id,
            tier,
        })])
    }
}
