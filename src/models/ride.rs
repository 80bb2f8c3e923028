//! Ride input and prediction request models
//!
//! `RideForm` is what arrives from the browser, `RideInput` is the trusted
//! set of values after edge validation and `RidePredictionRequest` is the
//! immutable six-key payload sent to the prediction API.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Canonical `pickup_datetime` layout
pub const PICKUP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const PASSENGER_RANGE: (i64, i64) = (1, 8);

/// Raw form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideForm {
    /// Pickup date, `YYYY-MM-DD`
    pub pickup_date: String,
    /// Pickup time of day, `HH:MM` or `HH:MM:SS`
    pub pickup_time: String,
    /// Kept as a JSON number so fractional counts can be rejected
    pub passenger_count: f64,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    /// Session override of the prediction API URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for RideForm {
    /// Same defaults the form page is rendered with
    fn default() -> Self {
        Self {
            pickup_date: "2013-07-06".to_string(),
            pickup_time: "17:18".to_string(),
            passenger_count: 1.0,
            pickup_longitude: -73.985428,
            pickup_latitude: 40.748817,
            dropoff_longitude: -73.985664,
            dropoff_latitude: 40.748441,
            api_url: None,
        }
    }
}

impl RideForm {
    /// Edge validation: every value must be present, parseable and in range
    pub fn validate(&self) -> Result<RideInput, String> {
        let pickup_date = NaiveDate::parse_from_str(self.pickup_date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid pickup date '{}': {}", self.pickup_date, e))?;
        let pickup_time = parse_time_of_day(self.pickup_time.trim())
            .ok_or_else(|| format!("Invalid pickup time '{}'", self.pickup_time))?;

        check_range("pickup_longitude", self.pickup_longitude, LONGITUDE_RANGE)?;
        check_range("pickup_latitude", self.pickup_latitude, LATITUDE_RANGE)?;
        check_range("dropoff_longitude", self.dropoff_longitude, LONGITUDE_RANGE)?;
        check_range("dropoff_latitude", self.dropoff_latitude, LATITUDE_RANGE)?;

        if self.passenger_count.fract() != 0.0 {
            return Err(format!(
                "passenger_count must be a whole number, got {}",
                self.passenger_count
            ));
        }
        let (min, max) = PASSENGER_RANGE;
        check_range("passenger_count", self.passenger_count, (min as f64, max as f64))?;

        Ok(RideInput {
            pickup_date,
            pickup_time,
            passenger_count: self.passenger_count as i64,
            pickup_longitude: self.pickup_longitude,
            pickup_latitude: self.pickup_latitude,
            dropoff_longitude: self.dropoff_longitude,
            dropoff_latitude: self.dropoff_latitude,
        })
    }

    /// Session API URL, ignoring blank input
    pub fn session_api_url(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> Result<(), String> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(format!("{} must be between {} and {}, got {}", name, min, max, value))
    }
}

/// Trusted ride values, already checked by the edge
#[derive(Debug, Clone, PartialEq)]
pub struct RideInput {
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub passenger_count: i64,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
}

/// The six-key payload sent to the prediction API
///
/// Fields are private: once built the request never changes, only the HTTP
/// method used to send it does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidePredictionRequest {
    pickup_datetime: String,
    pickup_longitude: f64,
    pickup_latitude: f64,
    dropoff_longitude: f64,
    dropoff_latitude: f64,
    passenger_count: i64,
}

impl RidePredictionRequest {
    /// Combine date and time into the canonical timestamp and copy the coordinates over
    pub fn from_input(input: &RideInput) -> Self {
        Self {
            pickup_datetime: combine_pickup_datetime(input.pickup_date, input.pickup_time),
            pickup_longitude: input.pickup_longitude,
            pickup_latitude: input.pickup_latitude,
            dropoff_longitude: input.dropoff_longitude,
            dropoff_latitude: input.dropoff_latitude,
            passenger_count: input.passenger_count,
        }
    }

    pub fn pickup_datetime(&self) -> &str {
        &self.pickup_datetime
    }

    pub fn pickup_longitude(&self) -> f64 {
        self.pickup_longitude
    }

    pub fn pickup_latitude(&self) -> f64 {
        self.pickup_latitude
    }

    pub fn dropoff_longitude(&self) -> f64 {
        self.dropoff_longitude
    }

    pub fn dropoff_latitude(&self) -> f64 {
        self.dropoff_latitude
    }

    pub fn passenger_count(&self) -> i64 {
        self.passenger_count
    }

    /// Query string pairs for the GET attempt, in payload order
    ///
    /// Coordinates always carry a fractional part (`-180.0`, not `-180`).
    pub fn query_params(&self) -> [(&'static str, String); 6] {
        [
            ("pickup_datetime", self.pickup_datetime.clone()),
            ("pickup_longitude", format_coordinate(self.pickup_longitude)),
            ("pickup_latitude", format_coordinate(self.pickup_latitude)),
            ("dropoff_longitude", format_coordinate(self.dropoff_longitude)),
            ("dropoff_latitude", format_coordinate(self.dropoff_latitude)),
            ("passenger_count", self.passenger_count.to_string()),
        ]
    }

    /// Pickup then dropoff, for the map
    pub fn map_points(&self) -> [MapPoint; 2] {
        [
            MapPoint {
                lat: self.pickup_latitude,
                lon: self.pickup_longitude,
            },
            MapPoint {
                lat: self.dropoff_latitude,
                lon: self.dropoff_longitude,
            },
        ]
    }
}

/// Shortest round-trip float text, keeping `.0` on whole numbers
fn format_coordinate(value: f64) -> String {
    format!("{:?}", value)
}

/// Format a date and a time of day as `YYYY-MM-DD HH:MM:SS`
pub fn combine_pickup_datetime(date: NaiveDate, time: NaiveTime) -> String {
    date.and_time(time).format(PICKUP_DATETIME_FORMAT).to_string()
}

/// One row of the map dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}
