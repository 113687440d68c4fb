//! Kernel Unit Tests Module
//!
//! Cross-module scenarios. Per-module tests live next to the code.

mod kernel_tests;
