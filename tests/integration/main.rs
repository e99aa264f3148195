//! HTTP integration tests driving the router against in-memory
//! collaborators.

mod country_test;
mod health_test;
mod helpers;
mod profile_test;
mod property_test;
