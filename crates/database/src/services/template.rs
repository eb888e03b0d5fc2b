//! Portable layout templates.
//!
//! Templates are copies: applying one writes fresh seats through the layout
//! store, and deleting one never touches the events built from it.

use crate::{
    entities::{companies, events, seating_layout_templates, seating_types},
    error::LayoutError,
    services::{
        begin_snapshot,
        layout::{LayoutSaved, LayoutService, LayoutSnapshot},
        now,
    },
};
use log::info;
use models::{
    template::{
        ArchivedTemplate, SeatDescriptor, TemplateArchive, TemplateBody, TemplateCategory,
        TemplateConfiguration, TemplateDocument,
    },
    validation::LayoutLimits,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::Expr,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct TemplateService;

impl TemplateService {
    /// Snapshots an event's layout into an export document named after the event
    pub async fn export(
        db: &DatabaseConnection,
        event_id: Uuid,
    ) -> Result<TemplateDocument, LayoutError> {
        let txn = begin_snapshot(db).await?;
        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;
        let snapshot = LayoutService::snapshot_in(&txn, event_id).await?;
        txn.commit().await?;

        Ok(TemplateDocument::new(body_from_snapshot(&event.name, &snapshot)))
    }

    /// Exports a stored template in the same envelope as [`Self::export`]
    pub async fn export_template(
        db: &DatabaseConnection,
        template_id: Uuid,
    ) -> Result<TemplateDocument, LayoutError> {
        let template = Self::find(db, template_id).await?;
        let body = template
            .body()
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;

        Ok(TemplateDocument::new(body))
    }

    /// Stores a document as a new template of the tenant. No event is touched.
    ///
    /// Seats naming another tenant's catalog entries are pointed at the
    /// matching entries of this tenant; a document that cannot be matched is
    /// rejected.
    pub async fn import(
        db: &DatabaseConnection,
        document: &TemplateDocument,
        company_id: Uuid,
        override_name: Option<&str>,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        document
            .check_envelope()
            .map_err(LayoutError::InvalidDocument)?;
        let body = document
            .template
            .clone()
            .renamed(override_name)
            .map_err(LayoutError::InvalidDocument)?;

        let txn = db.begin().await?;
        find_company(&txn, company_id).await?;
        let seat_count = body.configuration.seatings.len();
        let template = import_body(&txn, company_id, body, 0).await?;
        txn.commit().await?;

        info!(
            "Imported template {} with {seat_count} seats for company {company_id}",
            template.name
        );
        Ok(template)
    }

    /// Parses an export file and imports it
    pub async fn import_json(
        db: &DatabaseConnection,
        json: &str,
        company_id: Uuid,
        override_name: Option<&str>,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        let document = TemplateDocument::from_json(json)
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;

        Self::import(db, &document, company_id, override_name).await
    }

    /// Every seating layout template of the tenant in one archive
    pub async fn export_all(
        db: &DatabaseConnection,
        company_id: Uuid,
    ) -> Result<TemplateArchive, LayoutError> {
        let txn = begin_snapshot(db).await?;
        find_company(&txn, company_id).await?;
        let templates = seating_layout_templates::Entity::find()
            .filter(seating_layout_templates::Column::CompanyId.eq(company_id))
            .order_by_asc(seating_layout_templates::Column::Name)
            .all(&txn)
            .await?;
        txn.commit().await?;

        let mut archived = Vec::with_capacity(templates.len());
        for template in templates {
            archived.push(ArchivedTemplate {
                template: template
                    .body()
                    .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?,
                usage_count: template.usage_count,
            });
        }

        Ok(TemplateArchive::new(company_id, archived))
    }

    /// Stores every template of an archive for the tenant, all or nothing
    pub async fn import_all(
        db: &DatabaseConnection,
        archive: &TemplateArchive,
        company_id: Uuid,
    ) -> Result<Vec<seating_layout_templates::Model>, LayoutError> {
        archive
            .check_envelope()
            .map_err(LayoutError::InvalidDocument)?;

        let txn = db.begin().await?;
        find_company(&txn, company_id).await?;

        let mut imported = Vec::with_capacity(archive.seating_templates.len());
        for entry in &archive.seating_templates {
            let body = entry
                .template
                .clone()
                .renamed(None)
                .map_err(LayoutError::InvalidDocument)?;
            let usage_count = entry.usage_count.max(0);
            imported.push(import_body(&txn, company_id, body, usage_count).await?);
        }
        txn.commit().await?;

        info!(
            "Imported {} templates for company {company_id}",
            imported.len()
        );
        Ok(imported)
    }

    /// Parses a bulk export file and imports it
    pub async fn import_all_json(
        db: &DatabaseConnection,
        json: &str,
        company_id: Uuid,
    ) -> Result<Vec<seating_layout_templates::Model>, LayoutError> {
        let archive = TemplateArchive::from_json(json)
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;

        Self::import_all(db, &archive, company_id).await
    }

    /// Export followed by import, as one transaction
    pub async fn save_as_template(
        db: &DatabaseConnection,
        event_id: Uuid,
        name: &str,
        category: TemplateCategory,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        let txn = db.begin().await?;
        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;
        let snapshot = LayoutService::snapshot_in(&txn, event_id).await?;

        let name = match name.trim() {
            "" => event.name.as_str(),
            name => name,
        };
        let mut body = body_from_snapshot(name, &snapshot);
        body.category = category;

        let template = insert_template(&txn, event.company_id, &body, 0).await?;
        txn.commit().await?;

        info!(
            "Saved layout of event {} as template {}",
            event.name, template.name
        );
        Ok(template)
    }

    /// Rebuilds the event's layout from a template through the layout store.
    ///
    /// Inherits every check of a full layout save and records the template
    /// on the event for provenance.
    pub async fn apply(
        db: &DatabaseConnection,
        template_id: Uuid,
        event_id: Uuid,
        limits: &LayoutLimits,
    ) -> Result<LayoutSaved, LayoutError> {
        let txn = db.begin().await?;
        let template = Self::find(&txn, template_id).await?;
        let event = events::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
            .ok_or(LayoutError::NotFound("event"))?;

        // Templates of other tenants are invisible
        if template.company_id != event.company_id {
            return Err(LayoutError::NotFound("template"));
        }

        let body = template
            .body()
            .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;
        let saved = LayoutService::replace_layout_in(
            &txn,
            event_id,
            &body.metadata(),
            &body.configuration.drafts(),
            limits,
        )
        .await?;

        let mut event = event.into_active_model();
        event.seating_layout_template_id = Set(Some(template_id));
        event.updated_at = Set(now());
        event.update(&txn).await?;

        seating_layout_templates::Entity::update_many()
            .col_expr(
                seating_layout_templates::Column::UsageCount,
                Expr::col(seating_layout_templates::Column::UsageCount).add(1),
            )
            .filter(seating_layout_templates::Column::Id.eq(template_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        info!(
            "Applied template {} to event {event_id}: {} seats",
            template.name, saved.seat_count
        );
        Ok(saved)
    }

    /// Deep copy under a new identity; the copy is never a favorite
    pub async fn duplicate(
        db: &DatabaseConnection,
        template_id: Uuid,
        new_name: &str,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        let source = Self::find(db, template_id).await?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(LayoutError::ValidationFailed(vec![
                "template name must not be empty".to_string(),
            ]));
        }

        let timestamp = now();
        let copy = seating_layout_templates::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(source.company_id),
            name: Set(new_name.to_string()),
            description: Set(source.description),
            category: Set(source.category),
            stage_position: Set(source.stage_position),
            canvas_width: Set(source.canvas_width),
            canvas_height: Set(source.canvas_height),
            grid_size: Set(source.grid_size),
            configuration: Set(source.configuration),
            is_favorite: Set(false),
            usage_count: Set(0),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(db)
        .await?;

        info!("Duplicated template {} as {}", source.name, copy.name);
        Ok(copy)
    }

    /// Favorites first, then by name
    pub async fn list_templates(
        db: &DatabaseConnection,
        company_id: Uuid,
    ) -> Result<Vec<seating_layout_templates::Model>, LayoutError> {
        Ok(seating_layout_templates::Entity::find()
            .filter(seating_layout_templates::Column::CompanyId.eq(company_id))
            .order_by_desc(seating_layout_templates::Column::IsFavorite)
            .order_by_asc(seating_layout_templates::Column::Name)
            .all(db)
            .await?)
    }

    /// Most applied templates first
    pub async fn popular_templates(
        db: &DatabaseConnection,
        company_id: Uuid,
        limit: u64,
    ) -> Result<Vec<seating_layout_templates::Model>, LayoutError> {
        Ok(seating_layout_templates::Entity::find()
            .filter(seating_layout_templates::Column::CompanyId.eq(company_id))
            .order_by_desc(seating_layout_templates::Column::UsageCount)
            .order_by_asc(seating_layout_templates::Column::Name)
            .limit(limit)
            .all(db)
            .await?)
    }

    pub async fn set_favorite(
        db: &DatabaseConnection,
        template_id: Uuid,
        is_favorite: bool,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        let mut template = Self::find(db, template_id).await?.into_active_model();
        template.is_favorite = Set(is_favorite);
        template.updated_at = Set(now());

        Ok(template.update(db).await?)
    }

    /// Events built from the template keep their seats; only their
    /// provenance link is cleared.
    pub async fn delete_template(
        db: &DatabaseConnection,
        template_id: Uuid,
    ) -> Result<(), LayoutError> {
        let txn = db.begin().await?;
        let template = Self::find(&txn, template_id).await?;

        events::Entity::update_many()
            .col_expr(
                events::Column::SeatingLayoutTemplateId,
                Expr::value(Option::<Uuid>::None),
            )
            .filter(events::Column::SeatingLayoutTemplateId.eq(template_id))
            .exec(&txn)
            .await?;
        seating_layout_templates::Entity::delete_by_id(template_id)
            .exec(&txn)
            .await?;
        txn.commit().await?;

        info!("Deleted template {}", template.name);
        Ok(())
    }

    async fn find<C: ConnectionTrait>(
        db: &C,
        template_id: Uuid,
    ) -> Result<seating_layout_templates::Model, LayoutError> {
        seating_layout_templates::Entity::find_by_id(template_id)
            .one(db)
            .await?
            .ok_or(LayoutError::NotFound("template"))
    }
}

fn body_from_snapshot(name: &str, snapshot: &LayoutSnapshot) -> TemplateBody {
    let seatings: Vec<SeatDescriptor> = snapshot
        .seats
        .iter()
        .map(|seat| seat.to_descriptor())
        .collect();

    TemplateBody::from_layout(name, &snapshot.metadata, seatings)
}

async fn find_company<C: ConnectionTrait>(
    db: &C,
    company_id: Uuid,
) -> Result<companies::Model, LayoutError> {
    companies::Entity::find_by_id(company_id)
        .one(db)
        .await?
        .ok_or(LayoutError::NotFound("company"))
}

async fn import_body<C: ConnectionTrait>(
    db: &C,
    company_id: Uuid,
    mut body: TemplateBody,
    usage_count: i32,
) -> Result<seating_layout_templates::Model, LayoutError> {
    adopt_seating_types(db, company_id, &mut body.configuration).await?;
    insert_template(db, company_id, &body, usage_count).await
}

/// Points every seat at an entry of the tenant's own catalog.
///
/// An id the tenant does not own is looked up in the catalog it came from and
/// replaced by the tenant's entry with the same name, shape and capacity.
async fn adopt_seating_types<C: ConnectionTrait>(
    db: &C,
    company_id: Uuid,
    configuration: &mut TemplateConfiguration,
) -> Result<(), LayoutError> {
    let catalog = seating_types::Entity::find()
        .filter(seating_types::Column::CompanyId.eq(company_id))
        .all(db)
        .await?;
    let owned: HashSet<Uuid> = catalog.iter().map(|entry| entry.id).collect();

    let mut adopted: HashMap<Uuid, Uuid> = HashMap::new();
    for seat in &mut configuration.seatings {
        let type_id = seat.seating_type_id;
        if owned.contains(&type_id) {
            continue;
        }

        let local_id = match adopted.get(&type_id) {
            Some(&local_id) => local_id,
            None => {
                let source = seating_types::Entity::find_by_id(type_id).one(db).await?;
                let local_id = source
                    .and_then(|source| {
                        catalog.iter().find(|entry| {
                            entry.name == source.name
                                && entry.shape == source.shape
                                && entry.capacity == source.capacity
                        })
                    })
                    .map(|entry| entry.id)
                    .ok_or_else(|| {
                        LayoutError::InvalidDocument(format!(
                            "seat {}: seating type {type_id} has no match in this catalog",
                            seat.seat_number
                        ))
                    })?;
                adopted.insert(type_id, local_id);
                local_id
            }
        };
        seat.seating_type_id = local_id;
    }

    Ok(())
}

async fn insert_template<C: ConnectionTrait>(
    db: &C,
    company_id: Uuid,
    body: &TemplateBody,
    usage_count: i32,
) -> Result<seating_layout_templates::Model, LayoutError> {
    let configuration = body
        .configuration
        .to_value()
        .map_err(|e| LayoutError::InvalidDocument(e.to_string()))?;

    let timestamp = now();
    Ok(seating_layout_templates::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        name: Set(body.name.clone()),
        description: Set(body.description.clone()),
        category: Set(body.category),
        stage_position: Set(body.stage_position),
        canvas_width: Set(body.canvas_width),
        canvas_height: Set(body.canvas_height),
        grid_size: Set(body.grid_size),
        configuration: Set(configuration),
        is_favorite: Set(body.is_favorite),
        usage_count: Set(usage_count),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(db)
    .await?)
}
