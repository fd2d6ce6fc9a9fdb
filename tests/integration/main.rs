//! Host-side integration test harness.
//!
//! Everything here runs on the development machine with mock adapters —
//! `cargo test --no-default-features` — exercising the full service
//! pipeline without ESP-IDF.

mod menu_flow_tests;
mod mock_hw;
mod service_tests;
