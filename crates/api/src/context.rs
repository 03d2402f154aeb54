use backoffice_core::StoreId;

/// Store context for a request.
///
/// Every product route runs inside exactly one store; products of other
/// stores are invisible.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StoreContext {
    store_id: StoreId,
}

impl StoreContext {
    pub fn new(store_id: StoreId) -> Self {
        Self { store_id }
    }

    pub fn store_id(&self) -> StoreId {
        self.store_id
    }
}
