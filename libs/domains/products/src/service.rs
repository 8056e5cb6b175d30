use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
///
/// Every mutation is a lookup followed by a write, with no transaction
/// around the pair: concurrent writers race and the last one wins.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = self.repository.create(input).await?;
        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    /// Replace name, description, price and availability.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(input);

        let product = self.repository.update(product).await?;
        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    /// Flip `availability`; applying it twice restores the original value.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i64) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.availability = !product.availability;

        let product = self.repository.update(product).await?;
        tracing::info!(product_id = id, availability = product.availability, "Toggled availability");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        self.get_product(id).await?;

        // Removed concurrently after the lookup
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use sea_orm::DbErr;

    fn product(id: i64, availability: bool) -> Product {
        Product {
            id,
            name: "Mouse".to_string(),
            description: None,
            price: Decimal::new(5000, 2),
            availability,
        }
    }

    fn update() -> UpdateProduct {
        UpdateProduct {
            name: "Keyboard".to_string(),
            description: Some("Mechanical".to_string()),
            price: Decimal::new(12000, 2),
            availability: false,
        }
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(9))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(matches!(service.get_product(9).await, Err(ProductError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_create_rejects_long_name_without_touching_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(CreateProduct {
                name: "x".repeat(101),
                description: None,
                price: Decimal::ONE,
                availability: None,
            })
            .await;

        let Err(ProductError::Validation(errors)) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(errors[0].path, "name");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_update()
            .withf(|p| p.id == 1 && p.name == "Keyboard" && !p.availability)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service.update_product(1, update()).await.unwrap();

        assert_eq!(updated.description.as_deref(), Some("Mechanical"));
        assert_eq!(updated.price, Decimal::new(12000, 2));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_written() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.update_product(3, update()).await,
            Err(ProductError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_toggle_negates_availability() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_update()
            .withf(|p| !p.availability)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let toggled = service.toggle_availability(4).await.unwrap();
        assert!(!toggled.availability);
    }

    #[tokio::test]
    async fn test_delete_raced_by_another_delete() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo.expect_delete().with(eq(2)).returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(matches!(service.delete_product(2).await, Err(ProductError::NotFound(2))));
    }

    #[tokio::test]
    async fn test_database_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(DbErr::Custom("pool timed out".to_string()).into()));

        let service = ProductService::new(mock_repo);
        assert!(matches!(service.list_products().await, Err(ProductError::Database(_))));
    }
}
