pub mod model;
pub mod overrides;
pub mod resolver;
pub mod tiers;

pub use model::infer_model;
pub use overrides::merge_overrides;
pub use resolver::resolve_field;
pub use tiers::normalize;
