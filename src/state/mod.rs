//! State module for tracking crawl progress
//!
//! `RunState` holds the deadline, the visited-URL set and the accumulating
//! word counts of a single crawl run. It is created by a crawl strategy at
//! the start of `crawl` and shared by every task of that run.

mod run_state;

pub use run_state::RunState;
