//! Tests for credential store implementations
