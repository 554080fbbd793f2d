//! Unit tests for verification backends
