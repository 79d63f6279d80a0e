//! Application services (use-case orchestration).

pub mod discovery_service;
pub mod preference_service;
