//! Integration test modules.

mod config_test;
mod stats_pipeline_test;
mod store_test;
