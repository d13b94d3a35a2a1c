pub mod formatter;

pub use formatter::{
    format_calendar, format_constructor_table, format_constructors_tsv, format_driver_table,
    format_drivers_tsv, format_race_card, format_summary, format_team_details, parse_hex_color,
    should_use_colors, COMPACT_ROWS,
};
