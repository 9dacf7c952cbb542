pub mod checker;
pub mod engine;
pub mod normalize;
pub mod pacing;
pub mod pipeline;

pub use crate::domain::model::{CheckReport, NormalizedNumber, RawInput};
pub use crate::domain::ports::{AvailabilityService, Pipeline, Storage};
pub use crate::utils::error::Result;
