use crate::{
    entities::{companies, events, layouts},
    error::LayoutError,
    services::{layout::LayoutService, now},
};
use chrono::NaiveDate;
use log::info;
use models::layout::LayoutMetadata;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, TransactionTrait,
};
use uuid::Uuid;

pub struct EventService;

impl EventService {
    /// Creates an event with the default 800x600 layout
    pub async fn create_event(
        db: &DatabaseConnection,
        company_id: Uuid,
        name: &str,
        event_date: NaiveDate,
    ) -> Result<events::Model, LayoutError> {
        let txn = db.begin().await?;
        let company = companies::Entity::find_by_id(company_id).one(&txn).await?;
        if company.is_none() {
            return Err(LayoutError::NotFound("company"));
        }

        let timestamp = now();
        let event = events::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            seating_layout_template_id: Set(None),
            name: Set(name.trim().to_string()),
            event_date: Set(event_date),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        let metadata = LayoutMetadata::default();
        layouts::ActiveModel {
            event_id: Set(event.id),
            canvas_width: Set(metadata.canvas_width),
            canvas_height: Set(metadata.canvas_height),
            grid_size: Set(metadata.grid_size),
            stage_position: Set(metadata.stage_position),
            stage_config: Set(metadata.stage_config),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(
            "Created event {} ({}) for company {company_id}",
            event.name, event.id
        );
        Ok(event)
    }

    /// Deletes an event after purging its layout. Refused while any of its
    /// seats holds an active reservation.
    pub async fn delete_event(db: &DatabaseConnection, event_id: Uuid) -> Result<(), LayoutError> {
        let txn = db.begin().await?;
        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;

        let purged = LayoutService::purge_event(&txn, event_id).await?;
        events::Entity::delete_by_id(event_id).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted event {} and {purged} seats", event.name);
        Ok(())
    }
}
