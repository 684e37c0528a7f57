//! Unit tests for the production bounded context.

mod service_tests;
