//! Integration test crate for the Pruv faucet client.
//!
//! This crate exists solely to run end-to-end tests of the mint workflow
//! against a simulated injected wallet. It has no public API - all
//! functionality is in the test modules.

#![forbid(unsafe_code)]
