//! # Scenario Test Suite
//!
//! Cross-module tests that drive the library the way the binary does, with a
//! scripted upstream in place of the network. Unit tests for individual
//! modules live next to the code they cover.

mod registry_tests;
