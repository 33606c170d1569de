pub mod error;
pub mod history_client;
pub mod hydrological_year;
pub mod metadata;
pub mod provider;
pub mod sample;
pub mod weather;
