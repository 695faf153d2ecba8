//! Integration test modules.

mod engine_flow_test;
mod sqlite_engine_test;
