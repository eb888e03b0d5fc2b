//! Layout validation.
//!
//! Hard errors make a layout unsavable. Warnings (seats past the canvas edge,
//! overlapping seats) are reported but never block a save, since venue staff
//! routinely place seats loosely and older layouts may predate a canvas resize.

use crate::layout::{LayoutMetadata, SeatDraft};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    ops::RangeInclusive,
};
use uuid::Uuid;

/// Capacity of every catalog entry a layout may reference, keyed by entry id
pub type CatalogCapacities = HashMap<Uuid, i32>;

/// Bounds applied by [`validate_layout`]
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLimits {
    pub canvas_width: RangeInclusive<i32>,
    pub canvas_height: RangeInclusive<i32>,
    pub grid_size: RangeInclusive<i32>,
    /// Shared area two seats may have before it is reported, in square canvas units
    pub overlap_tolerance: f64,
    pub max_label_len: usize,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            canvas_width: 400..=2000,
            canvas_height: 300..=1500,
            grid_size: 10..=100,
            overlap_tolerance: 0.0,
            max_label_len: 20,
        }
    }
}

/// Outcome of validating a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Checks a complete layout against its canvas and the tenant's catalog.
///
/// The overlap check compares every pair of seats. That is quadratic, which
/// is fine for the few hundred seats an event holds.
pub fn validate_layout(
    metadata: &LayoutMetadata,
    seats: &[SeatDraft],
    catalog: &CatalogCapacities,
    limits: &LayoutLimits,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_canvas(metadata, limits, &mut errors);

    for seat in seats {
        check_seat(seat, metadata, catalog, limits, &mut errors, &mut warnings);
    }

    check_duplicate_labels(seats, &mut errors);
    check_overlaps(seats, limits.overlap_tolerance, &mut warnings);

    ValidationResult::from_findings(errors, warnings)
}

fn check_canvas(metadata: &LayoutMetadata, limits: &LayoutLimits, errors: &mut Vec<String>) {
    let bounds = [
        ("canvas width", metadata.canvas_width, &limits.canvas_width),
        ("canvas height", metadata.canvas_height, &limits.canvas_height),
        ("grid size", metadata.grid_size, &limits.grid_size),
    ];

    for (what, value, range) in bounds {
        if !range.contains(&value) {
            errors.push(format!(
                "{what} {value} is outside {}..={}",
                range.start(),
                range.end()
            ));
        }
    }

    if !(metadata.stage_config.is_object() || metadata.stage_config.is_null()) {
        errors.push("stage config must be a JSON object".to_string());
    }
}

fn check_seat(
    seat: &SeatDraft,
    metadata: &LayoutMetadata,
    catalog: &CatalogCapacities,
    limits: &LayoutLimits,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let label = seat.seat_number.as_str();

    if label.trim().is_empty() {
        errors.push("seat label must not be empty".to_string());
    } else if label.chars().count() > limits.max_label_len {
        errors.push(format!(
            "seat {label}: label is longer than {} characters",
            limits.max_label_len
        ));
    }

    match catalog.get(&seat.seating_type_id) {
        None => errors.push(format!(
            "seat {label}: unknown seating type {}",
            seat.seating_type_id
        )),
        Some(&capacity) if capacity <= 0 => errors.push(format!(
            "seat {label}: seating type {} has no capacity",
            seat.seating_type_id
        )),
        Some(_) => {}
    }

    if let Some(color) = &seat.color_code
        && !is_hex_color(color)
    {
        errors.push(format!("seat {label}: color {color} is not #RRGGBB"));
    }

    let rect = seat.rect();
    if !rect.is_finite() {
        errors.push(format!("seat {label}: position and size must be finite numbers"));
        return;
    }

    if seat.position_x < 0.0 || seat.position_y < 0.0 {
        errors.push(format!(
            "seat {label}: negative position ({}, {})",
            seat.position_x, seat.position_y
        ));
    }

    if seat.width <= 0.0 || seat.height <= 0.0 {
        errors.push(format!(
            "seat {label}: size {}x{} must be positive",
            seat.width, seat.height
        ));
    }

    if !rect.fits_within(
        f64::from(metadata.canvas_width),
        f64::from(metadata.canvas_height),
    ) {
        warnings.push(format!(
            "seat {label} extends beyond the {}x{} canvas",
            metadata.canvas_width, metadata.canvas_height
        ));
    }
}

fn check_duplicate_labels(seats: &[SeatDraft], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for seat in seats {
        let label = seat.seat_number.as_str();
        if !seen.insert(label) && reported.insert(label) {
            errors.push(format!("duplicate seat label {label}"));
        }
    }
}

fn check_overlaps(seats: &[SeatDraft], tolerance: f64, warnings: &mut Vec<String>) {
    for (i, a) in seats.iter().enumerate() {
        let rect_a = a.rect();
        if !rect_a.is_finite() {
            continue;
        }

        for b in &seats[i + 1..] {
            let rect_b = b.rect();
            if rect_b.is_finite()
                && rect_a.intersects(&rect_b)
                && rect_a.intersection_area(&rect_b) > tolerance
            {
                warnings.push(format!(
                    "seats {} and {} overlap",
                    a.seat_number, b.seat_number
                ));
            }
        }
    }
}

/// `#RRGGBB` with hexadecimal digits
pub fn is_hex_color(code: &str) -> bool {
    code.len() == 7
        && code.starts_with('#')
        && code[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> (CatalogCapacities, Uuid, Uuid) {
        let table = Uuid::new_v4();
        let chair = Uuid::new_v4();
        let catalog = HashMap::from([(table, 4), (chair, 1)]);
        (catalog, table, chair)
    }

    fn validate(seats: &[SeatDraft], catalog: &CatalogCapacities) -> ValidationResult {
        validate_layout(
            &LayoutMetadata::default(),
            seats,
            catalog,
            &LayoutLimits::default(),
        )
    }

    #[test]
    fn test_valid_layout_has_no_findings() {
        let (catalog, table, chair) = catalog();
        let seats = vec![
            SeatDraft::new(table, "M1", 0.0, 0.0),
            SeatDraft::new(table, "M2", 100.0, 0.0),
            SeatDraft::new(table, "M3", 200.0, 0.0),
            SeatDraft::new(chair, "K1", 0.0, 100.0).with_size(30.0, 30.0),
            SeatDraft::new(chair, "K2", 40.0, 100.0).with_size(30.0, 30.0),
        ];

        let result = validate(&seats, &catalog);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_overlaps_are_only_warnings() {
        let (catalog, table, _) = catalog();
        let seats = vec![
            SeatDraft::new(table, "M1", 100.0, 100.0),
            SeatDraft::new(table, "M2", 110.0, 110.0),
            SeatDraft::new(table, "M3", 160.0, 100.0),
        ];

        let result = validate(&seats, &catalog);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                "seats M1 and M2 overlap".to_string(),
                "seats M2 and M3 overlap".to_string()
            ]
        );
    }

    #[test]
    fn test_touching_seats_do_not_overlap() {
        let (catalog, table, _) = catalog();
        let seats = vec![
            SeatDraft::new(table, "M1", 0.0, 0.0),
            SeatDraft::new(table, "M2", 60.0, 0.0),
            SeatDraft::new(table, "M3", 0.0, 40.0),
        ];

        let result = validate(&seats, &catalog);
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_overlap_tolerance() {
        let (catalog, table, _) = catalog();
        let seats = vec![
            SeatDraft::new(table, "M1", 0.0, 0.0),
            SeatDraft::new(table, "M2", 55.0, 0.0),
        ];
        let limits = LayoutLimits {
            overlap_tolerance: 250.0,
            ..LayoutLimits::default()
        };

        // 5 x 40 = 200 square units shared
        let result = validate_layout(&LayoutMetadata::default(), &seats, &catalog, &limits);
        assert!(result.warnings.is_empty());

        let result = validate(&seats, &catalog);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_duplicate_labels_are_errors() {
        let (catalog, table, chair) = catalog();
        let seats = vec![
            SeatDraft::new(table, "M1", 0.0, 0.0),
            SeatDraft::new(chair, "M1", 300.0, 300.0),
            SeatDraft::new(table, "M1", 500.0, 300.0),
        ];

        let result = validate(&seats, &catalog);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["duplicate seat label M1".to_string()]);
    }

    #[test]
    fn test_out_of_bounds_seat_is_warning() {
        let (catalog, table, _) = catalog();
        let seats = vec![SeatDraft::new(table, "M1", 780.0, 10.0)];

        let result = validate(&seats, &catalog);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["seat M1 extends beyond the 800x600 canvas".to_string()]
        );
    }

    #[test]
    fn test_seat_errors() {
        let (catalog, table, _) = catalog();
        let seats = vec![
            SeatDraft::new(Uuid::new_v4(), "X1", 0.0, 0.0),
            SeatDraft::new(table, "M1", -5.0, 0.0),
            SeatDraft::new(table, "M2", 0.0, 0.0).with_size(0.0, 40.0),
            SeatDraft::new(table, "M3", 0.0, 0.0).with_color("blue"),
            SeatDraft::new(table, "M4", f64::NAN, 0.0),
            SeatDraft::new(table, " ", 0.0, 0.0),
        ];

        let result = validate(&seats, &catalog);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 6);
        assert!(result.errors[0].contains("unknown seating type"));
        assert!(result.errors[1].contains("negative position"));
        assert!(result.errors[2].contains("must be positive"));
        assert!(result.errors[3].contains("#RRGGBB"));
        assert!(result.errors[4].contains("finite"));
        assert!(result.errors[5].contains("must not be empty"));
    }

    #[test]
    fn test_zero_capacity_type_is_error() {
        let broken = Uuid::new_v4();
        let catalog = HashMap::from([(broken, 0)]);
        let seats = vec![SeatDraft::new(broken, "M1", 0.0, 0.0)];

        let result = validate(&seats, &catalog);
        assert!(!result.valid);
        assert!(result.errors[0].contains("has no capacity"));
    }

    #[test]
    fn test_canvas_bounds_are_errors() {
        let metadata = LayoutMetadata {
            canvas_width: 399,
            canvas_height: 1501,
            grid_size: 5,
            stage_config: json!("stage"),
            ..LayoutMetadata::default()
        };

        let result = validate_layout(&metadata, &[], &HashMap::new(), &LayoutLimits::default());
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "canvas width 399 is outside 400..=2000".to_string(),
                "canvas height 1501 is outside 300..=1500".to_string(),
                "grid size 5 is outside 10..=100".to_string(),
                "stage config must be a JSON object".to_string(),
            ]
        );
    }

    #[test]
    fn test_validation_is_deterministic() {
        let (catalog, table, _) = catalog();
        let seats: Vec<_> = (0..20)
            .map(|i| SeatDraft::new(table, format!("M{i}"), f64::from(i) * 30.0, 0.0))
            .collect();

        let first = validate(&seats, &catalog);
        let second = validate(&seats, &catalog);
        assert_eq!(first, second);
        assert!(first.valid);
        assert_eq!(first.warnings.len(), 19);
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#3498db"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("3498db"));
        assert!(!is_hex_color("#34g8db"));
        assert!(!is_hex_color("#fff"));
    }
}
