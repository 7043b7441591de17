use std::time::Duration;

use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::guard::RequestGuard;

pub const CONDITIONS: [&str; 4] = ["Sunny", "Cloudy", "Partly Cloudy", "Rainy"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    /// °C
    pub temperature: u32,
    /// percent
    pub humidity: u32,
    /// km/h
    pub wind_speed: u32,
    pub condition: String,
    /// mm
    pub precipitation: u32,
    /// km
    pub visibility: u32,
}

impl WeatherReport {
    pub fn simulate<R: Rng + ?Sized>(city: &str, rng: &mut R) -> Self {
        Self {
            city: city.to_string(),
            temperature: rng.gen_range(20..35),
            humidity: rng.gen_range(50..80),
            wind_speed: rng.gen_range(5..25),
            condition: CONDITIONS.choose(rng).copied().unwrap_or("Sunny").to_string(),
            precipitation: rng.gen_range(0..10),
            visibility: rng.gen_range(15..20),
        }
    }
}

/// Fake weather lookup: waits `delay` then returns random readings.
pub async fn lookup(guard: &RequestGuard, city: &str, delay: Duration) -> AppResult<WeatherReport> {
    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::BadRequest("Please enter a city name.".into()));
    }
    let _pending = guard.try_begin()?;

    tokio::time::sleep(delay).await;
    let report = WeatherReport::simulate(city, &mut rand::thread_rng());
    info!(city, temperature = report.temperature, condition = %report.condition, "weather simulated");
    Ok(report)
}
