pub mod pagination;

pub use pagination::{BreakAnalysis, Paginator, check_child_fit};
