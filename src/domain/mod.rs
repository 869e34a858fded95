pub mod rule;
pub mod site_policy;

pub use rule::{Rule, Sign};
pub use site_policy::SiteDataPolicy;
