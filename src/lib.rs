pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    http::{HttpAvailabilityClient, ServiceSettings},
    storage::LocalStorage,
};
pub use config::{credentials::Credentials, settings::SettingsFile};
pub use self::core::{
    checker::BatchChecker,
    engine::{BatchEngine, RunSummary},
    normalize::{normalize, unique_numbers},
    pacing::PacingPolicy,
    pipeline::AvailabilityPipeline,
};
pub use domain::model::{Availability, CheckReport, NormalizedNumber};
pub use utils::error::{CheckError, Result};
