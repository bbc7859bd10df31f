// Shared helpers for the integration test crates under `tests/`.

pub mod fixtures;
