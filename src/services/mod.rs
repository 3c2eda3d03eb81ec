pub mod assignment_orderer;
pub mod display_builder;
pub mod eligibility;
pub mod submission_classifier;

pub use assignment_orderer::order_by_due;
pub use display_builder::{DisplayTreeBuilder, DisplayZone};
pub use eligibility::{EligibilityFilter, WindowPolicy};
pub use submission_classifier::SubmissionClassifier;
