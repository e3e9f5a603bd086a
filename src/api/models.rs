use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub bearing_degrees: f64,
    pub distance_m: f64,
    pub corrected_latitude: f64,
    pub corrected_longitude: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub units: String,
    pub execution_time_ms: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InverseRequest {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InverseResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub execution_time_ms: f64,
}

#[derive(Debug, Deserialize)]
pub struct CsvWaypoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
