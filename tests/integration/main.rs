//! Integration tests

mod client_tests;
mod panel_tests;
mod protocol_tests;
