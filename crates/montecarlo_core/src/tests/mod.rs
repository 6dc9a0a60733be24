//! Integration tests for the Monte Carlo engine
//!
//! Tests are organized by topic:
//! - `basic` - Core run mechanics (sample count, preview, zero variables)
//! - `distributions` - Per-family sampling behavior
//! - `determinism` - Seeded reproducibility and parallel batches
//! - `validation` - Input and distribution-shape errors
//! - `charts` - Optional chart artifact and its degradation
//! - `builder_dsl` - Builder DSL for fluent run setup
//! - `properties` - Property-based checks of summary invariants
