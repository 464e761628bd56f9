//! Tests for the company service
