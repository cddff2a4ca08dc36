//! Integration test modules.

mod analytics_integration_test;
mod predictor_integration_test;
