//! Unit tests for user accounts.
