//! Traversal integration tests against the recording backend

mod material_integration;
mod traversal_integration;
