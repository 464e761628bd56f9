mod connection_tests;
mod mapping_tests;
