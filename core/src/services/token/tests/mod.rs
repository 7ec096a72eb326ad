//! Tests for the token lifecycle services

#[cfg(test)]
mod service_tests;
