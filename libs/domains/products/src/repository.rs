use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};

/// Repository trait for Product persistence
///
/// Implementations own their storage handle; the service never sees it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product; the repository assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Every product, ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Persist all mutable fields of an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Returns `false` when no row matched
    async fn delete(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    last_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price.round_dp(2),
            availability: input.availability.unwrap_or(true),
        };
        products.insert(id, product.clone());

        tracing::debug!(product_id = id, "Stored product in memory");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn update(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let slot = products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        product.price = product.price.round_dp(2);
        *slot = product.clone();

        Ok(product)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: None,
            price: Decimal::new(5000, 2),
            availability: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(input("a")).await.unwrap();
        let b = repo.create(input("b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.availability, "availability defaults to true");
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(input("a")).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());

        let b = repo.create(input("b")).await.unwrap();
        assert_eq!(b.id, 2);
        assert!(repo.get_by_id(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();
        for name in ["c", "a", "b"] {
            repo.create(input(name)).await.unwrap();
        }

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.create(input("a")).await.unwrap();
        repo.delete(product.id).await.unwrap();

        product.name = "b".to_string();
        let result = repo.update(product).await;
        assert!(matches!(result, Err(ProductError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let repo = InMemoryProductRepository::new();
        assert!(!repo.delete(99).await.unwrap());
    }
}
