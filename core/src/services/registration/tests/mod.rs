//! Tests for the registration service

#[cfg(test)]
mod service_tests;
