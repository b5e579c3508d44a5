//! Unit tests for the specification module.

mod export_tests;
