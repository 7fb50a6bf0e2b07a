//! Weather observations and the normalised context derived from them.

mod condition;
mod context;
mod observation;

pub use condition::{ConditionCode, ConditionGroup, HEAVY_RAIN_CODES, HEAVY_SNOW_CODES};
pub use context::{
    NEUTRAL_DESCRIPTION, NEUTRAL_SEVERITY, NEUTRAL_TEMPERATURE_C, ObservationError, TimeOfDay,
    WeatherContext, compute_severity,
};
pub use observation::{TemperatureUnit, WeatherObservation};
