/// Data retrieval service interface
pub mod data;
/// Task control service interface
pub mod task;
