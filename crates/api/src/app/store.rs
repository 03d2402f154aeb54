//! Store-scoped in-memory product storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use backoffice_core::{Aggregate, AggregateRoot, DomainError, ProductId, StoreId};
use backoffice_pricing::{Product, ProductCommand, ProductError, ProductEvent};

/// In-memory products keyed by `(store, product)`.
///
/// Commands run under the write lock, so two concurrent tier additions to
/// the same product are checked against each other.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<(StoreId, ProductId), Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, store_id: StoreId, id: &ProductId) -> Option<Product> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&(store_id, *id)).cloned()
    }

    pub fn insert(&self, product: Product) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert((product.store_id(), *product.id()), product);
    }

    /// Products of one store, oldest first.
    pub fn list(&self, store_id: StoreId) -> Vec<Product> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut items: Vec<Product> = map
            .iter()
            .filter(|((s, _), _)| *s == store_id)
            .map(|(_, p)| p.clone())
            .collect();
        items.sort_by_key(|p| *p.id().as_uuid());
        items
    }

    /// Run a command against a stored product and keep the resulting state.
    pub fn execute(
        &self,
        store_id: StoreId,
        id: &ProductId,
        command: &ProductCommand,
    ) -> Result<(Vec<ProductEvent>, Product), ProductError> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = map
            .get_mut(&(store_id, *id))
            .ok_or_else(DomainError::not_found)?;
        let events = product.execute(command)?;
        Ok((events, product.clone()))
    }
}
