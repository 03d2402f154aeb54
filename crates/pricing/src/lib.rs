//! Product pricing domain module.
//!
//! Business rules for quantity price tiers and product display data,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).

pub mod image;
pub mod product;
pub mod tier;

pub use image::{first_display_image, ImageField, ImageResolver, DEFAULT_PLACEHOLDER_IMAGE};
pub use product::{AddTier, Product, ProductCommand, ProductError, ProductEvent, TierAdded};
pub use tier::{propose_tier, render_order, RawTierInput, RuleViolation, Tier};
