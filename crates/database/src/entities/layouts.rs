use models::layout::{LayoutMetadata, StagePosition};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Canvas, grid and stage settings, one row per event
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "layouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: Uuid,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub grid_size: i32,
    pub stage_position: StagePosition,
    pub stage_config: Json,
    pub updated_at: DateTime,
}

impl Model {
    pub fn metadata(&self) -> LayoutMetadata {
        LayoutMetadata {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            grid_size: self.grid_size,
            stage_position: self.stage_position,
            stage_config: self.stage_config.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
