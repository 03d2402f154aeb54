//! `backoffice-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the backoffice
//! crates (no HTTP, no storage).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, StoreId};
pub use value_object::ValueObject;
