pub mod frequency;
pub mod revenue;

pub use frequency::occurrences_per_month;
pub use revenue::project_monthly_revenue;
