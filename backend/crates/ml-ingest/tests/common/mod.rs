#![allow(dead_code)]

mod counting_recorder;
mod failing_commit_store;
mod fixtures;
mod scripted_source;
mod test_db;

pub use counting_recorder::*;
pub use failing_commit_store::*;
pub use fixtures::*;
pub use scripted_source::*;
pub use test_db::*;
