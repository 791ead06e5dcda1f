pub mod dates;
pub mod models;
pub mod validation;

pub use dates::parse_review_date;
pub use models::*;
pub use validation::{RejectionReport, ReviewValidator};
