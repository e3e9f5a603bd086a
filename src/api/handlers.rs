use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use axum::extract::multipart::Multipart;
use tracing::{info, warn};

use crate::pipeline::CoordinatePipeline;
use crate::types::{GeodeticPoint, SimPoint};
use crate::{Error, Result as SimgeoResult};
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::InvalidInput(_) | Error::Csv(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn convert_coordinate(
    State(pipeline): State<Arc<CoordinatePipeline>>,
    Query(req): Query<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let start = Instant::now();

    let conversion = GeodeticPoint::new(req.latitude, req.longitude, req.altitude)
        .and_then(|destination| pipeline.convert(destination))
        .map_err(|e| api_error(status_for(&e), format!("Failed to convert coordinate: {}", e)))?;

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    Ok(Json(ConvertResponse {
        latitude: req.latitude,
        longitude: req.longitude,
        altitude: req.altitude,
        bearing_degrees: conversion.bearing.degrees(),
        distance_m: conversion.distance,
        corrected_latitude: conversion.corrected.latitude(),
        corrected_longitude: conversion.corrected.longitude(),
        x: conversion.sim.x,
        y: conversion.sim.y,
        z: conversion.sim.z,
        units: pipeline.mapper().units().name().to_string(),
        execution_time_ms,
    }))
}

pub async fn inverse_coordinate(
    State(pipeline): State<Arc<CoordinatePipeline>>,
    Query(req): Query<InverseRequest>,
) -> Result<Json<InverseResponse>, ApiError> {
    let start = Instant::now();

    let point = pipeline
        .sim_to_geodetic(SimPoint::new(req.x, req.y, req.z))
        .map_err(|e| api_error(status_for(&e), format!("Failed to invert coordinate: {}", e)))?;

    Ok(Json(InverseResponse {
        latitude: point.latitude(),
        longitude: point.longitude(),
        altitude: point.altitude(),
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }))
}

pub async fn upload_csv(
    State(pipeline): State<Arc<CoordinatePipeline>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let start = Instant::now();

    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
    {
        if field.name() == Some("csv") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read CSV: {}", e)))?;
            csv_data = Some(bytes.to_vec());
        }
    }

    let csv_data = csv_data
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing CSV file".to_string()))?;

    let output = process_csv_batch(&pipeline, &csv_data, start)
        .map_err(|e| api_error(status_for(&e), format!("Failed to process CSV: {}", e)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"sim_coordinates.csv\"")
        .body(Body::from(output))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// One output line, kept for every input row whether or not it converted
struct BatchRow {
    latitude: String,
    longitude: String,
    altitude: String,
    name: String,
    result: std::result::Result<SimPoint, String>,
}

fn raw_field(headers: &csv::StringRecord, record: &csv::StringRecord, column: &str) -> String {
    headers
        .iter()
        .position(|h| h == column)
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .to_string()
}

/// Converts every waypoint row and renders the result CSV
///
/// Rows that fail to parse or convert are kept in the output with their raw
/// fields, empty coordinates and the error as status.
pub fn process_csv_batch(
    pipeline: &CoordinatePipeline,
    csv_data: &[u8],
    start: Instant,
) -> SimgeoResult<String> {
    let mut csv_reader = csv::Reader::from_reader(Cursor::new(csv_data));
    let headers = csv_reader.headers()?.clone();
    let has_names = headers.iter().any(|h| h == "name");
    let mut rows: Vec<BatchRow> = Vec::new();

    for (line, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(row = line + 1, error = %e, "unreadable waypoint row");
                rows.push(BatchRow {
                    latitude: String::new(),
                    longitude: String::new(),
                    altitude: String::new(),
                    name: String::new(),
                    result: Err(Error::from(e).to_string()),
                });
                continue;
            }
        };

        let result = record
            .deserialize::<CsvWaypoint>(Some(&headers))
            .map_err(Error::from)
            .and_then(|w| GeodeticPoint::new(w.latitude, w.longitude, w.altitude))
            .and_then(|point| pipeline.compute_sim_coordinates(point))
            .map_err(|e| e.to_string());
        if let Err(e) = &result {
            warn!(row = line + 1, error = %e, "waypoint row not converted");
        }

        rows.push(BatchRow {
            latitude: raw_field(&headers, &record, "latitude"),
            longitude: raw_field(&headers, &record, "longitude"),
            altitude: raw_field(&headers, &record, "altitude"),
            name: raw_field(&headers, &record, "name"),
            result,
        });
    }

    let total = rows.len();
    let successful = rows.iter().filter(|row| row.result.is_ok()).count();

    let mut writer = csv::Writer::from_writer(Vec::with_capacity(rows.len() * 64));
    let mut header = vec!["latitude", "longitude", "altitude"];
    if has_names {
        header.push("name");
    }
    header.extend(["x", "y", "z", "status"]);
    writer.write_record(&header)?;

    for row in &rows {
        let mut record = vec![row.latitude.clone(), row.longitude.clone(), row.altitude.clone()];
        if has_names {
            record.push(row.name.clone());
        }
        match &row.result {
            Ok(p) => record.extend([p.x.to_string(), p.y.to_string(), p.z.to_string(), "ok".to_string()]),
            Err(e) => record.extend([String::new(), String::new(), String::new(), e.clone()]),
        }
        writer.write_record(&record)?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;

    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(total, successful, execution_time_ms, "converted waypoint batch");

    let mut output = String::with_capacity(body.len() + 256);
    output.push_str("# Statistics\n");
    output.push_str(&format!("# Total points: {}\n", total));
    output.push_str(&format!("# Successful: {}\n", successful));
    output.push_str(&format!("# Failed: {}\n", total - successful));
    output.push_str(&format!("# Units: {}\n", pipeline.mapper().units().name()));
    output.push_str(&format!("# Execution time: {:.2} ms\n", execution_time_ms));
    output.push_str(&String::from_utf8_lossy(&body));

    Ok(output)
}
