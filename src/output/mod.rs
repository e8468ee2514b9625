pub mod formatter;

pub use formatter::{
    format_assessment, format_bar_chart, format_categories, format_json, format_kg,
    format_recommendations, format_share_chart, format_summary, format_tsv, should_use_colors,
};
