pub mod selector;
pub mod types;
pub mod validate;

pub use selector::{select_rules, SelectedRules};
pub use types::{FeeRule, FeeType, ListingType, RuleQuery};
pub use validate::{validate_rules, RuleIssue};
