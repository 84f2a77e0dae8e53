//! Cross-module tests for the allocator


mod clock_tests;
mod concurrent_tests;
