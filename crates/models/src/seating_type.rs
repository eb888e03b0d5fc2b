use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

#[cfg(feature = "database")]
use crate::db_value::string_value_type;

/// Shape archetype of a seating type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    Table,
    Chair,
    Vip,
}

impl ShapeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Chair => "chair",
            Self::Vip => "vip",
        }
    }

    /// Prefix used when generating seat labels, e.g. `M001` for tables
    pub fn label_prefix(self) -> char {
        match self {
            Self::Table => 'M',
            Self::Chair => 'K',
            Self::Vip => 'V',
        }
    }
}

impl FromStr for ShapeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "chair" => Ok(Self::Chair),
            "vip" => Ok(Self::Vip),
            _ => Err(format!("Unknown seating shape: {s}")),
        }
    }
}

impl Display for ShapeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "database")]
string_value_type!(ShapeClass);

/// Everything needed to create a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingTypeSpec {
    pub name: String,
    pub shape: ShapeClass,
    /// Persons per placed seat
    pub capacity: i32,
    pub color_code: String,
    pub icon: String,
}

impl SeatingTypeSpec {
    pub fn new(name: impl Into<String>, shape: ShapeClass, capacity: i32) -> Self {
        let (icon, color_code) = match shape {
            ShapeClass::Table => ("🪑", "#3498db"),
            ShapeClass::Chair => ("💺", "#e74c3c"),
            ShapeClass::Vip => ("👑", "#f1c40f"),
        };

        Self {
            name: name.into(),
            shape,
            capacity,
            color_code: color_code.to_owned(),
            icon: icon.to_owned(),
        }
    }

    pub fn with_color(mut self, color_code: impl Into<String>) -> Self {
        self.color_code = color_code.into();
        self
    }
}

/// Built-in entries every tenant starts with
pub fn default_catalog() -> Vec<SeatingTypeSpec> {
    const TABLES: [(i32, &str); 8] = [
        (1, "#95a5a6"),
        (2, "#e74c3c"),
        (4, "#3498db"),
        (5, "#9b59b6"),
        (6, "#f39c12"),
        (8, "#2ecc71"),
        (10, "#1abc9c"),
        (12, "#34495e"),
    ];

    let tables = TABLES.into_iter().map(|(capacity, color)| {
        SeatingTypeSpec::new(format!("Table for {capacity}"), ShapeClass::Table, capacity)
            .with_color(color)
    });

    let others = [
        SeatingTypeSpec::new("Single Chair", ShapeClass::Chair, 1),
        SeatingTypeSpec::new("Double Chair", ShapeClass::Chair, 2).with_color("#e67e22"),
        SeatingTypeSpec::new("VIP Box", ShapeClass::Vip, 8),
    ];

    tables.chain(others).collect()
}
