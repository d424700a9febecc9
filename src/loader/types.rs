//! Result row type

use serde::{Deserialize, Serialize};

/// One (circuit, race) group of the telemetry summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    /// Circuit name; null when the source rows carry no circuit
    pub circuit: Option<String>,
    pub race_number: i64,
    /// Distinct vehicles that reported telemetry in this race
    pub vehicle_count: i64,
    /// Mean of all speed readings in this race
    pub avg_speed: f64,
}

impl RaceSummary {
    pub fn new(circuit: impl Into<String>, race_number: i64, vehicle_count: i64, avg_speed: f64) -> Self {
        Self {
            circuit: Some(circuit.into()),
            race_number,
            vehicle_count,
            avg_speed,
        }
    }
}
