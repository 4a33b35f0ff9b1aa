//! Integration tests for `rbe_types` live under `tests/`.
