use models::{
    layout::StagePosition,
    template::{TemplateBody, TemplateCategory, TemplateConfiguration},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seating_layout_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: TemplateCategory,
    pub stage_position: StagePosition,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub grid_size: i32,
    /// Serialized `TemplateConfiguration`
    pub configuration: Json,
    pub is_favorite: bool,
    pub usage_count: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn body(&self) -> Result<TemplateBody, serde_json::Error> {
        Ok(TemplateBody {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            stage_position: self.stage_position,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            grid_size: self.grid_size,
            configuration: TemplateConfiguration::from_value(self.configuration.clone())?,
            is_favorite: self.is_favorite,
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
