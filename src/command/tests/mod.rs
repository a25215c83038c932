//! Unit tests for command interpretation.
