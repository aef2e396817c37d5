// mpmeta Test Infrastructure
//
// Integration-style tests over the fixtures in fixtures/miniprogram/. Unit
// tests for individual passes live next to the code in #[cfg(test)] modules.

pub mod test_utils; // Fixture paths and on-disk scratch projects


pub mod batch_tests;

// ============================================================================
// AMBIENT TESTS - configuration and CLI plumbing
// ============================================================================
pub mod cli_tests;
