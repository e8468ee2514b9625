pub mod categories;
pub mod config;
pub mod engine;
pub mod gauge;
pub mod recommendations;
pub mod validation;
pub mod zone;

pub use categories::{Cadence, CategorySpec, CATEGORIES, CATEGORY_COUNT};
pub use config::*;
pub use engine::{
    assess, assess_form, compute_contributions, compute_score, rank_top_contributors,
    Assessment, CategoryContribution, ContributionVector,
};
pub use gauge::{GaugeReading, GaugeTier};
pub use recommendations::{recommend, Recommendation, ALL_RECOMMENDATIONS};
pub use validation::{parse_field, validate, validate_scoring, InputError, RawInputs};
pub use zone::{classify, Zone};
