pub mod formatter;

pub use formatter::{
    format_faults, format_faults_tsv, format_points, format_ranking_table, format_ranking_tsv,
    format_roster, format_roster_tsv, format_signed, format_summary, format_trend_table,
    should_use_colors,
};
