//! Product operations used by the HTTP handlers.

use backoffice_core::{AggregateRoot, DomainError, DomainResult, ProductId, StoreId};
use backoffice_pricing::{
    AddTier, ImageField, ImageResolver, Product, ProductCommand, ProductError, ProductEvent,
    RawTierInput, Tier,
};

use crate::app::dto::CreateProductRequest;
use crate::app::store::InMemoryProductStore;

pub struct AppServices {
    products: InMemoryProductStore,
    images: ImageResolver,
}

impl AppServices {
    pub fn new(images: ImageResolver) -> Self {
        Self {
            products: InMemoryProductStore::new(),
            images,
        }
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn create_product(
        &self,
        store_id: StoreId,
        body: CreateProductRequest,
    ) -> DomainResult<Product> {
        let image = body.image.as_deref().map(ImageField::parse);
        let product = Product::new(ProductId::new(), store_id, body.name, body.price, image)?;
        self.products.insert(product.clone());

        tracing::info!(%store_id, product_id = %product.id(), "product created");
        Ok(product)
    }

    pub fn get_product(&self, store_id: StoreId, id: &ProductId) -> Option<Product> {
        self.products.get(store_id, id)
    }

    pub fn list_products(&self, store_id: StoreId) -> Vec<Product> {
        self.products.list(store_id)
    }

    /// Validate and add a tier; returns the accepted tier.
    pub fn add_tier(
        &self,
        store_id: StoreId,
        product_id: ProductId,
        input: RawTierInput,
    ) -> Result<Tier, ProductError> {
        let cmd = ProductCommand::AddTier(AddTier { product_id, input });

        let (events, _product) = self
            .products
            .execute(store_id, &product_id, &cmd)
            .inspect_err(|e| {
                if let ProductError::Rule(violation) = e {
                    tracing::info!(%product_id, code = violation.code(), "tier rejected");
                }
            })?;

        let tier = events
            .into_iter()
            .map(|event| match event {
                ProductEvent::TierAdded(e) => e.tier,
            })
            .next()
            .ok_or_else(|| DomainError::invariant("tier command produced no event"))?;

        tracing::info!(%product_id, min_quantity = tier.min_quantity, "tier added");
        Ok(tier)
    }
}
