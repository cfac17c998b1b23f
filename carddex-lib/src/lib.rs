//! Shared service utilities for the carddex workspace.

pub mod worker_pool;

pub use worker_pool::{Task, WorkerPool};
