use crate::{
    entities::companies,
    error::LayoutError,
    services::{catalog::CatalogService, now},
};
use log::info;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

pub struct TenantService;

impl TenantService {
    /// Creates a company together with its copy of the built-in seating catalog
    pub async fn provision(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<companies::Model, LayoutError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutError::ValidationFailed(vec![
                "company name must not be empty".to_string(),
            ]));
        }

        let txn = db.begin().await?;
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(now()),
        }
        .insert(&txn)
        .await?;

        let seeded = CatalogService::provision_defaults(&txn, company.id).await?;
        txn.commit().await?;

        info!(
            "Provisioned company {} ({}) with {seeded} default seating types",
            company.name, company.id
        );
        Ok(company)
    }
}
