//! Portable seating layout templates.
//!
//! A template stores its canvas settings as top-level fields and everything
//! else (stage geometry, seat descriptors) in a [`TemplateConfiguration`].
//! [`TemplateDocument`] is the envelope used for export files.

use crate::layout::{LayoutMetadata, SeatDraft, StagePosition};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use uuid::Uuid;

#[cfg(feature = "database")]
use crate::db_value::string_value_type;

/// Value of `template_type` in every exported seating layout
pub const TEMPLATE_TYPE: &str = "seating_layout";
/// Value of `export_type` in a bulk export of every template of a company
pub const ARCHIVE_TYPE: &str = "all_templates";
/// Current document version
pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Wedding,
    Conference,
    Concert,
    Theater,
    Restaurant,
    Classroom,
    #[default]
    Other,
}

impl TemplateCategory {
    pub const ALL: [Self; 7] = [
        Self::Wedding,
        Self::Conference,
        Self::Concert,
        Self::Theater,
        Self::Restaurant,
        Self::Classroom,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Conference => "conference",
            Self::Concert => "concert",
            Self::Theater => "theater",
            Self::Restaurant => "restaurant",
            Self::Classroom => "classroom",
            Self::Other => "other",
        }
    }
}

impl FromStr for TemplateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown template category: {s}"))
    }
}

impl Display for TemplateCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
string_value_type!(TemplateCategory);

/// One seat as recorded in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatDescriptor {
    pub seating_type_id: Uuid,
    pub seat_number: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub color_code: Option<String>,
}

impl SeatDescriptor {
    /// A fresh draft; template seats never carry the identity of a live seat
    pub fn to_draft(&self) -> SeatDraft {
        SeatDraft {
            id: None,
            seating_type_id: self.seating_type_id,
            seat_number: self.seat_number.clone(),
            position_x: self.position_x,
            position_y: self.position_y,
            width: self.width,
            height: self.height,
            color_code: self.color_code.clone(),
        }
    }
}

impl From<&SeatDraft> for SeatDescriptor {
    fn from(draft: &SeatDraft) -> Self {
        Self {
            seating_type_id: draft.seating_type_id,
            seat_number: draft.seat_number.clone(),
            position_x: draft.position_x,
            position_y: draft.position_y,
            width: draft.width,
            height: draft.height,
            color_code: draft.color_code.clone(),
        }
    }
}

/// The serialized body of a template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfiguration {
    #[serde(default)]
    pub stage_config: Value,
    #[serde(default)]
    pub seatings: Vec<SeatDescriptor>,
}

impl TemplateConfiguration {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn drafts(&self) -> Vec<SeatDraft> {
        self.seatings.iter().map(SeatDescriptor::to_draft).collect()
    }
}

/// Template fields carried by an export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default)]
    pub stage_position: StagePosition,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: i32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: i32,
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,
    #[serde(default)]
    pub configuration: TemplateConfiguration,
    #[serde(default)]
    pub is_favorite: bool,
}

// Older export files carry no canvas settings
fn default_canvas_width() -> i32 {
    LayoutMetadata::default().canvas_width
}

fn default_canvas_height() -> i32 {
    LayoutMetadata::default().canvas_height
}

fn default_grid_size() -> i32 {
    LayoutMetadata::default().grid_size
}

impl TemplateBody {
    /// Snapshot a layout under the given template name
    pub fn from_layout(
        name: impl Into<String>,
        metadata: &LayoutMetadata,
        seatings: Vec<SeatDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            category: TemplateCategory::default(),
            stage_position: metadata.stage_position,
            canvas_width: metadata.canvas_width,
            canvas_height: metadata.canvas_height,
            grid_size: metadata.grid_size,
            configuration: TemplateConfiguration {
                stage_config: metadata.stage_config.clone(),
                seatings,
            },
            is_favorite: false,
        }
    }

    /// Applies a non-blank replacement name, then rejects a body that is
    /// still unnamed
    pub fn renamed(mut self, name: Option<&str>) -> Result<Self, String> {
        if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
            self.name = name.to_string();
        }

        if self.name.trim().is_empty() {
            return Err("template name must not be empty".to_string());
        }

        Ok(self)
    }

    /// The layout metadata this template rebuilds
    pub fn metadata(&self) -> LayoutMetadata {
        LayoutMetadata {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            grid_size: self.grid_size,
            stage_position: self.stage_position,
            stage_config: self.configuration.stage_config.clone(),
        }
    }
}

/// Export file envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub template_type: String,
    pub version: String,
    pub exported_at: NaiveDateTime,
    pub template: TemplateBody,
}

impl TemplateDocument {
    pub fn new(template: TemplateBody) -> Self {
        Self {
            template_type: TEMPLATE_TYPE.to_string(),
            version: DOCUMENT_VERSION.to_string(),
            exported_at: Utc::now().naive_utc(),
            template,
        }
    }

    /// Rejects files that are not seating layout templates of a known version
    pub fn check_envelope(&self) -> Result<(), String> {
        if self.template_type != TEMPLATE_TYPE {
            return Err(format!(
                "expected template type {TEMPLATE_TYPE}, got {}",
                self.template_type
            ));
        }

        check_version(&self.version)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub id: Uuid,
}

/// One template inside a [`TemplateArchive`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedTemplate {
    #[serde(flatten)]
    pub template: TemplateBody,
    #[serde(default)]
    pub usage_count: i32,
}

/// Bulk export of every seating layout template of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateArchive {
    pub export_type: String,
    pub version: String,
    pub exported_at: NaiveDateTime,
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub seating_templates: Vec<ArchivedTemplate>,
}

impl TemplateArchive {
    pub fn new(company_id: Uuid, seating_templates: Vec<ArchivedTemplate>) -> Self {
        Self {
            export_type: ARCHIVE_TYPE.to_string(),
            version: DOCUMENT_VERSION.to_string(),
            exported_at: Utc::now().naive_utc(),
            company_info: CompanyInfo { id: company_id },
            seating_templates,
        }
    }

    pub fn check_envelope(&self) -> Result<(), String> {
        if self.export_type != ARCHIVE_TYPE {
            return Err(format!(
                "expected export type {ARCHIVE_TYPE}, got {}",
                self.export_type
            ));
        }

        check_version(&self.version)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn check_version(version: &str) -> Result<(), String> {
    if version == DOCUMENT_VERSION {
        Ok(())
    } else {
        Err(format!("unsupported template version {version}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_configuration_wire_format() {
        let type_id = Uuid::new_v4();
        let value = json!({
            "stage_config": { "x": 300, "y": 10, "shape": "rect" },
            "seatings": [{
                "seating_type_id": type_id,
                "seat_number": "M001",
                "position_x": 100.0,
                "position_y": 120.0,
                "width": 60.0,
                "height": 40.0,
                "color_code": "#3498db"
            }]
        });

        let config = TemplateConfiguration::from_value(value.clone()).unwrap();
        assert_eq!(config.seatings.len(), 1);
        assert_eq!(config.seatings[0].seating_type_id, type_id);
        assert_eq!(config.seatings[0].color_code.as_deref(), Some("#3498db"));
        assert_eq!(config.to_value().unwrap(), value);

        let drafts = config.drafts();
        assert!(drafts[0].id.is_none());
        assert_eq!(drafts[0].seat_number, "M001");
    }

    #[test]
    fn test_stage_config_is_copied_verbatim() {
        let metadata = LayoutMetadata {
            stage_config: json!({ "points": [[0, 0], [10, 5]], "label": "Main" }),
            stage_position: StagePosition::Left,
            ..LayoutMetadata::default()
        };

        let body = TemplateBody::from_layout("Gala", &metadata, vec![]);
        assert_eq!(body.metadata(), metadata);
    }

    #[test]
    fn test_envelope_checks() {
        let body = TemplateBody::from_layout("Gala", &LayoutMetadata::default(), vec![]);
        let document = TemplateDocument::new(body);
        assert!(document.check_envelope().is_ok());

        let parsed = TemplateDocument::from_json(&document.to_json().unwrap()).unwrap();
        assert_eq!(parsed, document);

        let mut event_template = document.clone();
        event_template.template_type = "event_template".to_string();
        assert!(event_template.check_envelope().is_err());

        let mut future = document.clone();
        future.version = "2.0".to_string();
        assert!(future.check_envelope().is_err());

    }

    #[test]
    fn test_renamed_prefers_override() {
        let mut body = TemplateBody::from_layout("Gala", &LayoutMetadata::default(), vec![]);
        body.name = "  ".to_string();

        assert!(body.clone().renamed(None).is_err());
        assert!(body.clone().renamed(Some(" ")).is_err());
        assert_eq!(body.renamed(Some(" Harbor ")).unwrap().name, "Harbor");
    }

    #[test]
    fn test_legacy_file_without_canvas_settings() {
        let json = r#"{
            "template_type": "seating_layout",
            "version": "1.0",
            "exported_at": "2024-03-01T10:00:00",
            "template": {
                "name": "Banquet",
                "category": "wedding",
                "stage_position": "bottom",
                "configuration": { "stage_config": {}, "seatings": [] }
            }
        }"#;

        let document = TemplateDocument::from_json(json).unwrap();
        assert!(document.check_envelope().is_ok());
        let metadata = document.template.metadata();
        assert_eq!(metadata.canvas_width, 800);
        assert_eq!(metadata.canvas_height, 600);
        assert_eq!(metadata.grid_size, 20);
        assert_eq!(metadata.stage_position, StagePosition::Bottom);
    }

    #[test]
    fn test_archive_envelope() {
        let body = TemplateBody::from_layout("Gala", &LayoutMetadata::default(), vec![]);
        let archive = TemplateArchive::new(
            Uuid::new_v4(),
            vec![ArchivedTemplate {
                template: body,
                usage_count: 3,
            }],
        );
        assert!(archive.check_envelope().is_ok());

        let parsed = TemplateArchive::from_json(&archive.to_json().unwrap()).unwrap();
        assert_eq!(parsed, archive);

        let mut other = archive;
        other.export_type = "event_templates".to_string();
        assert!(other.check_envelope().is_err());
    }

    #[test]
    fn test_category_parsing() {
        for category in TemplateCategory::ALL {
            assert_eq!(
                TemplateCategory::from_str(category.as_str()).unwrap(),
                category
            );
        }
        assert!(TemplateCategory::from_str("genel").is_err());
    }
}
