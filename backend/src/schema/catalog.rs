//! Column declarations for the bundled datasets.
//!
//! Everything that names a column of the Pokémon table or the music and
//! mental health survey lives here; the transform modules only see the
//! declarations.

use super::{Extras, FieldSpec, Schema};
use crate::models::FieldKind;
use crate::transform::projection::ProjectedField;
use crate::transform::stats::StatColumn;

/// Pokémon stats table.
pub const POKEMON_SOURCE: &str = "pokemon_alopez247.csv";

/// Music and mental health survey.
pub const SURVEY_SOURCE: &str = "mxmh_survey_results.csv";

/// Base stats averaged for the star and radar plots, in axis order.
pub const POKEMON_STATS: [StatColumn; 6] = [
    StatColumn::new("HP", "HP"),
    StatColumn::new("Sp_Atk", "Sp. Attack"),
    StatColumn::new("Attack", "Attack"),
    StatColumn::new("Sp_Def", "Sp. Defense"),
    StatColumn::new("Defense", "Defense"),
    StatColumn::new("Speed", "Speed"),
];

/// Rows of the bar chart.
pub const TYPE_COLUMN: &str = "Type_1";

/// Stacks of the bar chart.
pub const GENERATION_COLUMN: &str = "Generation";

/// Per-Pokémon radar rows: source column, output header, output kind.
pub const RADAR_ROW_FIELDS: [ProjectedField; 8] = [
    ProjectedField::new("Name", "Pokemon", FieldKind::Text),
    ProjectedField::new("Generation", "Generation", FieldKind::Integer),
    ProjectedField::new("HP", "HP", FieldKind::Integer),
    ProjectedField::new("Attack", "Attack", FieldKind::Integer),
    ProjectedField::new("Defense", "Defense", FieldKind::Integer),
    ProjectedField::new("Speed", "Speed", FieldKind::Integer),
    ProjectedField::new("Sp_Atk", "SpAttack", FieldKind::Integer),
    ProjectedField::new("Sp_Def", "SpDefense", FieldKind::Integer),
];

/// Survey columns the charts read. Other survey columns are carried as-is.
pub const SURVEY_FIELDS: [FieldSpec; 9] = [
    FieldSpec::integer("Age"),
    FieldSpec::float("Hours per day"),
    FieldSpec::text("Fav genre"),
    FieldSpec::integer("BPM"),
    FieldSpec::float("Anxiety"),
    FieldSpec::float("Depression"),
    FieldSpec::float("Insomnia"),
    FieldSpec::float("OCD"),
    FieldSpec::text("Music effects"),
];

/// Stat columns as integers.
pub fn pokemon_stats() -> Schema {
    let fields: Vec<FieldSpec> = POKEMON_STATS
        .iter()
        .map(|s| FieldSpec::integer(s.column))
        .collect();
    Schema::new(&fields)
}

/// Primary type against generation.
pub fn pokemon_type_by_generation() -> Schema {
    Schema::new(&[
        FieldSpec::text(TYPE_COLUMN),
        FieldSpec::integer(GENERATION_COLUMN),
    ])
}

/// Source columns of [`RADAR_ROW_FIELDS`]. Kinds are enforced by the projection.
pub fn pokemon_radar_rows() -> Schema {
    let fields: Vec<FieldSpec> = RADAR_ROW_FIELDS
        .iter()
        .map(|f| FieldSpec::new(f.source, source_kind(f.kind)))
        .collect();
    Schema::new(&fields)
}

// Integer outputs truncate, so the source may hold any number.
fn source_kind(output: FieldKind) -> FieldKind {
    match output {
        FieldKind::Integer => FieldKind::Float,
        other => other,
    }
}

/// Whole survey, consumed columns type-checked.
pub fn survey() -> Schema {
    Schema::new(&SURVEY_FIELDS).with_extras(Extras::Infer)
}
