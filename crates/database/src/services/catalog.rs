use crate::{
    entities::{companies, event_seatings, seating_types},
    error::LayoutError,
    services::now,
};
use log::{info, warn};
use models::{
    seating_type::{SeatingTypeSpec, default_catalog},
    validation::{CatalogCapacities, is_hex_color},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A catalog entry together with how many placed seats point at it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub seating_type: seating_types::Model,
    pub usage_count: u64,
}

pub struct CatalogService;

impl CatalogService {
    /// All entries of a tenant, built-in defaults first
    pub async fn list_types(
        db: &DatabaseConnection,
        company_id: Uuid,
    ) -> Result<Vec<CatalogEntry>, LayoutError> {
        let types = seating_types::Entity::find()
            .filter(seating_types::Column::CompanyId.eq(company_id))
            .order_by_desc(seating_types::Column::IsDefault)
            .order_by_asc(seating_types::Column::Shape)
            .order_by_asc(seating_types::Column::Capacity)
            .order_by_asc(seating_types::Column::Name)
            .all(db)
            .await?;

        let usage = Self::usage_counts(db, types.iter().map(|t| t.id).collect()).await?;

        Ok(types
            .into_iter()
            .map(|seating_type| CatalogEntry {
                usage_count: usage.get(&seating_type.id).copied().unwrap_or(0),
                seating_type,
            })
            .collect())
    }

    pub async fn create_type(
        db: &DatabaseConnection,
        company_id: Uuid,
        spec: &SeatingTypeSpec,
    ) -> Result<seating_types::Model, LayoutError> {
        check_spec(spec)?;

        let company = companies::Entity::find_by_id(company_id).one(db).await?;
        if company.is_none() {
            return Err(LayoutError::NotFound("company"));
        }

        let created = seating_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            name: Set(spec.name.trim().to_string()),
            shape: Set(spec.shape),
            capacity: Set(spec.capacity),
            color_code: Set(spec.color_code.clone()),
            icon: Set(spec.icon.clone()),
            is_default: Set(false),
            created_at: Set(now()),
        }
        .insert(db)
        .await?;

        info!(
            "Created seating type {} ({}, capacity {}) for company {company_id}",
            created.name, created.shape, created.capacity
        );
        Ok(created)
    }

    /// Edits an entry that no placed seat references yet
    pub async fn update_type(
        db: &DatabaseConnection,
        seating_type_id: Uuid,
        spec: &SeatingTypeSpec,
    ) -> Result<seating_types::Model, LayoutError> {
        check_spec(spec)?;

        let txn = db.begin().await?;
        let existing = seating_types::Entity::find_by_id(seating_type_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("seating type"))?;

        if Self::seat_count(&txn, seating_type_id).await? > 0 {
            return Err(LayoutError::InUse);
        }

        let mut active = existing.into_active_model();
        active.name = Set(spec.name.trim().to_string());
        active.shape = Set(spec.shape);
        active.capacity = Set(spec.capacity);
        active.color_code = Set(spec.color_code.clone());
        active.icon = Set(spec.icon.clone());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes an entry. Never cascades: entries with placed seats are refused.
    pub async fn delete_type(
        db: &DatabaseConnection,
        seating_type_id: Uuid,
    ) -> Result<(), LayoutError> {
        let txn = db.begin().await?;
        let existing = seating_types::Entity::find_by_id(seating_type_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("seating type"))?;

        let seats = Self::seat_count(&txn, seating_type_id).await?;
        if seats > 0 {
            warn!(
                "Refusing to delete seating type {} still used by {seats} seats",
                existing.name
            );
            return Err(LayoutError::InUse);
        }

        seating_types::Entity::delete_by_id(seating_type_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!("Deleted seating type {} ({seating_type_id})", existing.name);
        Ok(())
    }

    /// Seeds the built-in catalog for a tenant, skipping defaults it already has.
    /// Returns how many entries were inserted.
    pub async fn provision_defaults<C: ConnectionTrait>(
        db: &C,
        company_id: Uuid,
    ) -> Result<usize, DbErr> {
        let existing: HashSet<String> = seating_types::Entity::find()
            .select_only()
            .column(seating_types::Column::Name)
            .filter(seating_types::Column::CompanyId.eq(company_id))
            .filter(seating_types::Column::IsDefault.eq(true))
            .into_tuple::<String>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let created_at = now();
        let missing: Vec<seating_types::ActiveModel> = default_catalog()
            .into_iter()
            .filter(|spec| !existing.contains(&spec.name))
            .map(|spec| seating_types::ActiveModel {
                id: Set(Uuid::new_v4()),
                company_id: Set(company_id),
                name: Set(spec.name),
                shape: Set(spec.shape),
                capacity: Set(spec.capacity),
                color_code: Set(spec.color_code),
                icon: Set(spec.icon),
                is_default: Set(true),
                created_at: Set(created_at),
            })
            .collect();

        let inserted = missing.len();
        if !missing.is_empty() {
            seating_types::Entity::insert_many(missing).exec(db).await?;
        }

        Ok(inserted)
    }

    /// Capacity of every entry a tenant's layouts may reference
    pub async fn capacities<C: ConnectionTrait>(
        db: &C,
        company_id: Uuid,
    ) -> Result<CatalogCapacities, DbErr> {
        let rows = seating_types::Entity::find()
            .select_only()
            .column(seating_types::Column::Id)
            .column(seating_types::Column::Capacity)
            .filter(seating_types::Column::CompanyId.eq(company_id))
            .into_tuple::<(Uuid, i32)>()
            .all(db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    async fn seat_count<C: ConnectionTrait>(db: &C, seating_type_id: Uuid) -> Result<u64, DbErr> {
        event_seatings::Entity::find()
            .filter(event_seatings::Column::SeatingTypeId.eq(seating_type_id))
            .count(db)
            .await
    }

    async fn usage_counts<C: ConnectionTrait>(
        db: &C,
        seating_type_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, u64>, DbErr> {
        if seating_type_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let referenced = event_seatings::Entity::find()
            .select_only()
            .column(event_seatings::Column::SeatingTypeId)
            .filter(event_seatings::Column::SeatingTypeId.is_in(seating_type_ids))
            .into_tuple::<Uuid>()
            .all(db)
            .await?;

        let mut counts = HashMap::new();
        for seating_type_id in referenced {
            *counts.entry(seating_type_id).or_insert(0) += 1;
        }

        Ok(counts)
    }
}

fn check_spec(spec: &SeatingTypeSpec) -> Result<(), LayoutError> {
    if spec.capacity < 1 {
        return Err(LayoutError::InvalidCapacity);
    }

    let mut errors = Vec::new();
    if spec.name.trim().is_empty() {
        errors.push("seating type name must not be empty".to_string());
    }
    if !is_hex_color(&spec.color_code) {
        errors.push(format!("color {} is not #RRGGBB", spec.color_code));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LayoutError::ValidationFailed(errors))
    }
}
