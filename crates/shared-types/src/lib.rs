pub mod layout;
pub mod types;

pub use layout::{StyleLayout, RESERVED_LAYOUT_KEY};
pub use types::{CompatReport, Issue, IssueList, ReleaseStatus, Target};
