//! Tables printed by the listing commands.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use maze_config::AppConfig;
use maze_model::{BoundsProfile, DisplayTier};
use maze_sizing::DisplaySizer;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn profiles_table(config: &AppConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profile"),
        header_cell("Width"),
        header_cell("Height"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for profile in config.profiles.values() {
        let is_default = profile.name == config.default_profile;
        let name = if is_default {
            Cell::new(&profile.name).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&profile.name)
        };
        table.add_row(vec![
            name,
            Cell::new(profile.width),
            Cell::new(profile.height),
            Cell::new(if is_default { "yes" } else { "" }).fg(Color::Green),
        ]);
    }
    table
}

/// Profiles as pretty JSON, in name order.
pub fn profiles_json(config: &AppConfig) -> serde_json::Result<String> {
    let profiles: Vec<&BoundsProfile> = config.profiles.values().collect();
    serde_json::to_string_pretty(&profiles)
}

pub fn tiers_table(sizer: &DisplaySizer) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tier"),
        header_cell("Width below"),
        header_cell("Height below"),
        header_cell("Font"),
        header_cell("Rows"),
        header_cell("Cols"),
    ]);
    apply_table_style(&mut table);
    for index in 1..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (index, rule) in sizer.rules().iter().enumerate() {
        let mut row = vec![
            Cell::new(index + 1),
            Cell::new(rule.below_width),
            Cell::new(rule.below_height),
        ];
        row.extend(tier_cells(rule.tier));
        table.add_row(row);
    }
    if let Some(tier) = sizer.fallback() {
        let mut row = vec![
            Cell::new("fallback").fg(Color::Cyan),
            dim_cell("-"),
            dim_cell("-"),
        ];
        row.extend(tier_cells(tier));
        table.add_row(row);
    }
    table
}

/// One line stating whether every size in `profile` gets a tier.
pub fn coverage_line(sizer: &DisplaySizer, profile: &BoundsProfile) -> String {
    match sizer.coverage_gap(profile) {
        None => format!(
            "Profile '{}' ({} x {}): every size maps to a tier.",
            profile.name, profile.width, profile.height
        ),
        Some(gap) => format!(
            "Profile '{}' ({} x {}): sizes such as {gap} keep the current tier.",
            profile.name, profile.width, profile.height
        ),
    }
}

fn tier_cells(tier: DisplayTier) -> [Cell; 3] {
    [
        Cell::new(format!("{}pt", tier.font_size)),
        Cell::new(tier.rows),
        Cell::new(tier.cols),
    ]
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_config::builtin_config;

    #[test]
    fn profiles_table_lists_builtin_profiles() {
        let config = builtin_config().unwrap();
        let mut table = profiles_table(&config);
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(rendered.contains("classic"));
        assert!(rendered.contains("3..=52"));
        assert!(rendered.contains("3..=120"));
    }

    #[test]
    fn tiers_table_includes_fallback() {
        let config = builtin_config().unwrap();
        let mut table = tiers_table(&config.sizer);
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(rendered.contains("18pt"));
        assert!(rendered.contains("fallback"));
        assert!(rendered.contains("256"));
    }

    #[test]
    fn coverage_reports_first_gap() {
        let sizer = DisplaySizer::classic();
        insta::assert_snapshot!(
            coverage_line(&sizer, &BoundsProfile::wide()),
            @"Profile 'wide' (3..=120 x 3..=33): sizes such as 53x3 keep the current tier."
        );
        assert!(coverage_line(&sizer, &BoundsProfile::classic()).contains("every size"));
    }
}
