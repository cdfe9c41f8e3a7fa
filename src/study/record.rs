//! # Grid Records
//!
//! Serializable wrapper around a generated grid and the parameters it came from.

use crate::generation::{GeneratedGrid, Grid, GridParameters};
use crate::{defaults, StimgridResult, GRID_FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use uuid::Uuid;

/// One grid of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    /// Random identifier, unique per record
    pub id: Uuid,
    /// Output format version tag
    pub version: String,
    /// Study phase this grid belongs to
    pub session: String,
    /// Experimental condition this grid belongs to
    pub condition: String,
    /// Value participants search for
    pub target_number: i64,
    /// Whether the target replaced one of the stimuli
    pub does_include_target_number: bool,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Smallest stimulus value allowed
    pub min_value: i64,
    /// Largest stimulus value allowed
    pub max_value: i64,
    /// Probability the target was drawn with (0.0 to 1.0)
    pub target_number_inclusion_probability: f64,
    /// Number of occupied cells
    pub number_of_stimuli: usize,
    /// Position of this grid within its session/condition pair
    pub grid_index_in_condition: usize,
    /// Grids generated per session/condition pair
    pub number_of_grids_per_condition: usize,
    /// Cell values, `values[x][y]`, `null` for empty cells
    pub values: Grid,
}

impl GridRecord {
    /// Wraps a generated grid with a fresh identifier and its study metadata.
    pub fn new(
        session: &str,
        condition: &str,
        params: &GridParameters,
        grid_index_in_condition: usize,
        number_of_grids_per_condition: usize,
        generated: GeneratedGrid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            version: GRID_FORMAT_VERSION.to_string(),
            session: session.to_string(),
            condition: condition.to_string(),
            target_number: params.target_number,
            does_include_target_number: generated.includes_target,
            width: params.width,
            height: params.height,
            min_value: params.min_value,
            max_value: params.max_value,
            target_number_inclusion_probability: params.target_number_inclusion_probability,
            number_of_stimuli: params.number_of_stimuli,
            grid_index_in_condition,
            number_of_grids_per_condition,
            values: generated.grid,
        }
    }
}

/// Renders records as one pretty-printed JSON array with alphabetically sorted keys.
///
/// Records pass through [`serde_json::Value`], whose objects keep their keys
/// ordered, so the output is stable across runs.
pub fn render_records(records: &[GridRecord]) -> StimgridResult<Vec<u8>> {
    let document = serde_json::to_value(records)?;

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(defaults::OUTPUT_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Cell;

    fn sample_record() -> GridRecord {
        let params = GridParameters::new(2, 1, 1, 9, 5, 1.0, 1);
        let mut grid = Grid::new(2, 1);
        grid.set(Cell::new(1, 0), Some(5));

        GridRecord::new(
            "training",
            "HUD",
            &params,
            3,
            10,
            GeneratedGrid {
                grid,
                includes_target: true,
            },
        )
    }

    #[test]
    fn test_record_carries_parameters() {
        let record = sample_record();
        assert_eq!(record.version, GRID_FORMAT_VERSION);
        assert_eq!(record.session, "training");
        assert_eq!(record.condition, "HUD");
        assert_eq!(record.target_number, 5);
        assert!(record.does_include_target_number);
        assert_eq!(record.grid_index_in_condition, 3);
        assert_eq!(record.number_of_grids_per_condition, 10);
    }

    #[test]
    fn test_records_get_distinct_ids() {
        assert_ne!(sample_record().id, sample_record().id);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "condition",
                "doesIncludeTargetNumber",
                "gridIndexInCondition",
                "height",
                "id",
                "maxValue",
                "minValue",
                "numberOfGridsPerCondition",
                "numberOfStimuli",
                "session",
                "targetNumber",
                "targetNumberInclusionProbability",
                "values",
                "version",
                "width",
            ]
        );
        assert_eq!(object["values"], serde_json::json!([[null], [5]]));
        assert!(object["id"].is_string());
    }

    #[test]
    fn test_render_uses_four_space_indent_and_sorted_keys() {
        let rendered = String::from_utf8(render_records(&[sample_record()]).unwrap()).unwrap();

        assert!(rendered.starts_with("[\n    {\n        \"condition\": \"HUD\","));
        let condition = rendered.find("\"condition\"").unwrap();
        let width = rendered.find("\"width\"").unwrap();
        assert!(condition < width);

        let parsed: Vec<GridRecord> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec![sample_record_with_id(parsed[0].id)]);
    }

    #[test]
    fn test_render_empty_collection() {
        let rendered = render_records(&[]).unwrap();
        assert_eq!(rendered, b"[]");
    }

    fn sample_record_with_id(id: Uuid) -> GridRecord {
        GridRecord {
            id,
            ..sample_record()
        }
    }
}
