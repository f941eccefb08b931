use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use log::debug;
use serde::Deserialize;

use crate::error::ForecastError;

/// Timestamp format used by the forecast feed's `dt_txt` field.
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local hour whose sample represents a whole day.
const MIDDAY_HOUR: u32 = 12;

/// Number of fixed display slots.
pub const DAY_SLOTS: usize = 5;

// ---------------------------------------------------------------------------
// Feed schema (fixed, opaque input contract)
// ---------------------------------------------------------------------------

/// Five-day/3-hour forecast response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastFeed {
    pub list: Vec<FeedEntry>,
}

/// One 3-hourly forecast record.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    pub dt_txt: String,
    pub main: MainReadings,
    pub wind: WindReadings,
    #[serde(default)]
    pub weather: Vec<ConditionTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionTag {
    pub icon: String,
}

/// Current-weather response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentFeed {
    /// Observation time, seconds since the UNIX epoch (UTC).
    pub dt: i64,
    /// Location's offset from UTC in seconds.
    pub timezone: i32,
    pub main: MainReadings,
    pub wind: WindReadings,
    #[serde(default)]
    pub weather: Vec<ConditionTag>,
}

/// Parse a five-day forecast response body.
pub fn parse_feed(body: &str) -> Result<ForecastFeed> {
    serde_json::from_str(body).context("parsing forecast feed")
}

/// Parse a current-weather response body into display-ready conditions.
pub fn parse_current(body: &str) -> Result<CurrentConditions> {
    let feed: CurrentFeed = serde_json::from_str(body).context("parsing current weather")?;
    CurrentConditions::from_feed(&feed)
}

// ---------------------------------------------------------------------------
// WeatherSample – one typed reading
// ---------------------------------------------------------------------------

/// A single forecast reading. Numeric fields are passed through as received;
/// unit suffixes belong to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub feels_like: f64,
    pub icon: String,
}

impl FeedEntry {
    /// Convert to a typed sample, parsing the `dt_txt` timestamp.
    pub fn sample(&self) -> Result<WeatherSample, ForecastError> {
        let timestamp = NaiveDateTime::parse_from_str(&self.dt_txt, FEED_TIMESTAMP_FORMAT)
            .map_err(|source| ForecastError::InvalidTimestamp {
                text: self.dt_txt.clone(),
                source,
            })?;
        Ok(WeatherSample {
            timestamp,
            temperature: self.main.temp,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            humidity: self.main.humidity,
            feels_like: self.main.feels_like,
            icon: self
                .weather
                .first()
                .map(|c| c.icon.clone())
                .unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// ForecastSelector – one midday sample per day, five fixed slots
// ---------------------------------------------------------------------------

/// One of the five fixed presentation positions.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    /// Day label in `dd/mm` form.
    pub label: String,
    pub sample: WeatherSample,
}

/// The five display slots, filled chronologically; trailing slots stay empty
/// when the feed covers fewer days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    slots: [Option<DaySlot>; DAY_SLOTS],
}

impl Forecast {
    pub fn slots(&self) -> &[Option<DaySlot>; DAY_SLOTS] {
        &self.slots
    }

    /// Day labels of the populated slots, in slot order.
    pub fn day_labels(&self) -> Vec<&str> {
        self.slots
            .iter()
            .flatten()
            .map(|s| s.label.as_str())
            .collect()
    }

    /// Number of populated slots.
    pub fn populated(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// All five slots, for callers that insist on a complete forecast.
    /// Partial fill is not an error elsewhere; only this accessor rejects it.
    pub fn require_full(&self) -> Result<[&DaySlot; DAY_SLOTS], ForecastError> {
        let found = self.populated();
        let full: Vec<&DaySlot> = self.slots.iter().flatten().collect();
        full.try_into()
            .map_err(|_| ForecastError::NoMiddayData { found })
    }
}

/// Stateless extraction of the per-day midday samples from a feed.
pub struct ForecastSelector;

impl ForecastSelector {
    /// Walk the feed in order and keep, for each calendar day, the sample
    /// taken at 12:00 local time. Days keep the order they were first seen;
    /// a repeated midday entry for the same day overwrites the earlier one
    /// (last write wins). The first five days fill the slots; the rest are
    /// truncated.
    pub fn select(entries: &[FeedEntry]) -> Result<Forecast, ForecastError> {
        let mut days: Vec<(String, WeatherSample)> = Vec::new();

        for entry in entries {
            let sample = entry.sample()?;
            if sample.timestamp.hour() != MIDDAY_HOUR {
                continue;
            }
            let label = sample.timestamp.format("%d/%m").to_string();
            match days.iter_mut().find(|(key, _)| *key == label) {
                Some((_, existing)) => *existing = sample,
                None => days.push((label, sample)),
            }
        }
        debug!(
            "forecast: {} midday day(s) from {} entries",
            days.len(),
            entries.len()
        );

        let mut forecast = Forecast::default();
        for (slot, (label, sample)) in forecast.slots.iter_mut().zip(days) {
            *slot = Some(DaySlot { label, sample });
        }
        Ok(forecast)
    }
}

// ---------------------------------------------------------------------------
// CurrentConditions – the "now" panel
// ---------------------------------------------------------------------------

/// Time-of-day bucket of the local hour. The renderer maps this to a
/// background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Night,
    Morning,
    Day,
    Evening,
}

impl DayPart {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => DayPart::Night,
            6..=11 => DayPart::Morning,
            12..=17 => DayPart::Day,
            _ => DayPart::Evening,
        }
    }
}

/// Current weather shaped for display: readings plus the observation time
/// shifted into the location's own timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub icon: String,
    pub observed_at: DateTime<FixedOffset>,
}

impl CurrentConditions {
    pub fn from_feed(feed: &CurrentFeed) -> Result<Self> {
        let offset = FixedOffset::east_opt(feed.timezone)
            .context("timezone offset out of range")?;
        let observed_at = DateTime::from_timestamp(feed.dt, 0)
            .context("observation time out of range")?
            .with_timezone(&offset);
        Ok(CurrentConditions {
            temperature: feed.main.temp,
            feels_like: feed.main.feels_like,
            humidity: feed.main.humidity,
            wind_speed: feed.wind.speed,
            icon: feed
                .weather
                .first()
                .map(|c| c.icon.clone())
                .unwrap_or_default(),
            observed_at,
        })
    }

    /// `dd/mm/YYYY` label of the local observation date.
    pub fn date_label(&self) -> String {
        self.observed_at.format("%d/%m/%Y").to_string()
    }

    /// `HH.MM` label of the local observation time.
    pub fn time_label(&self) -> String {
        self.observed_at.format("%H.%M").to_string()
    }

    pub fn day_part(&self) -> DayPart {
        DayPart::from_hour(self.observed_at.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt_txt: &str, temp: f64) -> FeedEntry {
        FeedEntry {
            dt_txt: dt_txt.to_string(),
            main: MainReadings {
                temp,
                feels_like: temp - 1.0,
                pressure: 1013.0,
                humidity: 60.0,
            },
            wind: WindReadings { speed: 4.2 },
            weather: vec![ConditionTag {
                icon: "04d".to_string(),
            }],
        }
    }

    #[test]
    fn selects_one_midday_sample_per_day() {
        let entries = vec![
            entry("2024-06-18 12:00:00", 21.0),
            entry("2024-06-18 15:00:00", 23.0),
            entry("2024-06-19 12:00:00", 19.0),
        ];
        let forecast = ForecastSelector::select(&entries).unwrap();

        assert_eq!(forecast.day_labels(), vec!["18/06", "19/06"]);
        let slots = forecast.slots();
        assert_eq!(slots[0].as_ref().unwrap().sample.temperature, 21.0);
        assert_eq!(slots[1].as_ref().unwrap().sample.temperature, 19.0);
        assert!(slots[2].is_none());
    }

    #[test]
    fn repeated_midday_entry_overwrites() {
        let entries = vec![
            entry("2024-06-18 12:00:00", 21.0),
            entry("2024-06-18 12:00:00", 25.0),
        ];
        let forecast = ForecastSelector::select(&entries).unwrap();
        assert_eq!(forecast.populated(), 1);
        assert_eq!(
            forecast.slots()[0].as_ref().unwrap().sample.temperature,
            25.0
        );
    }

    #[test]
    fn truncates_past_five_days() {
        let entries: Vec<FeedEntry> = (10..=16)
            .map(|day| entry(&format!("2024-06-{day} 12:00:00"), 20.0))
            .collect();
        let forecast = ForecastSelector::select(&entries).unwrap();
        assert_eq!(forecast.populated(), 5);
        assert_eq!(
            forecast.day_labels(),
            vec!["10/06", "11/06", "12/06", "13/06", "14/06"]
        );
    }

    #[test]
    fn partial_fill_is_not_an_error_unless_required() {
        let entries = vec![entry("2024-06-18 12:00:00", 21.0)];
        let forecast = ForecastSelector::select(&entries).unwrap();
        assert_eq!(forecast.populated(), 1);

        let err = forecast.require_full().unwrap_err();
        assert!(matches!(err, ForecastError::NoMiddayData { found: 1 }));
    }

    #[test]
    fn require_full_succeeds_with_five_days() {
        let entries: Vec<FeedEntry> = (10..15)
            .map(|day| entry(&format!("2024-06-{day} 12:00:00"), 20.0))
            .collect();
        let forecast = ForecastSelector::select(&entries).unwrap();
        let slots = forecast.require_full().unwrap();
        assert_eq!(slots[4].label, "14/06");
    }

    #[test]
    fn bad_timestamp_is_reported() {
        let entries = vec![entry("18-06-2024 12:00", 21.0)];
        let err = ForecastSelector::select(&entries).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidTimestamp { .. }));
    }

    #[test]
    fn parses_feed_json() {
        let body = r#"{
            "list": [
                {
                    "dt_txt": "2024-06-18 12:00:00",
                    "main": {"temp": 21.4, "feels_like": 20.9, "pressure": 1015, "humidity": 52},
                    "wind": {"speed": 3.1},
                    "weather": [{"icon": "01d"}]
                }
            ]
        }"#;
        let feed = parse_feed(body).unwrap();
        let sample = feed.list[0].sample().unwrap();
        assert_eq!(sample.pressure, 1015.0);
        assert_eq!(sample.icon, "01d");
        assert_eq!(sample.timestamp.hour(), 12);
    }

    #[test]
    fn current_conditions_use_local_time() {
        // 2024-06-18 10:30:00 UTC at UTC+3 → 13.30 local, afternoon.
        let body = r#"{
            "dt": 1718706600,
            "timezone": 10800,
            "main": {"temp": 24.0, "feels_like": 23.0, "pressure": 1012, "humidity": 40},
            "wind": {"speed": 2.0},
            "weather": [{"icon": "02d"}]
        }"#;
        let current = parse_current(body).unwrap();
        assert_eq!(current.date_label(), "18/06/2024");
        assert_eq!(current.time_label(), "13.30");
        assert_eq!(current.day_part(), DayPart::Day);
    }

    #[test]
    fn day_part_buckets() {
        assert_eq!(DayPart::from_hour(0), DayPart::Night);
        assert_eq!(DayPart::from_hour(5), DayPart::Night);
        assert_eq!(DayPart::from_hour(6), DayPart::Morning);
        assert_eq!(DayPart::from_hour(11), DayPart::Morning);
        assert_eq!(DayPart::from_hour(12), DayPart::Day);
        assert_eq!(DayPart::from_hour(17), DayPart::Day);
        assert_eq!(DayPart::from_hour(18), DayPart::Evening);
        assert_eq!(DayPart::from_hour(23), DayPart::Evening);
    }
}
