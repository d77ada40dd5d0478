pub mod change_log;
pub mod change_log_query;
pub mod common;

pub use change_log_query::{
    ChangeLogOptions, ChangeLogOrder, ChangeLogQueryBuilder, ComparisonOp, SortDirection,
};
pub use common::*;
