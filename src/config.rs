use serde::Deserialize;

/// OpenWeatherMap access settings, passed explicitly to the code that owns
/// the HTTP client instead of living in a process-wide global.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    /// Unit system requested from the API.
    #[serde(default = "default_units")]
    pub units: String,
    /// Language code for condition descriptions.
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            units: default_units(),
            lang: default_lang(),
        }
    }

    /// City-name → coordinates lookup URL.
    pub fn geocoding_url(&self, city: &str) -> String {
        format!(
            "http://api.openweathermap.org/geo/1.0/direct?q={city}&limit=1&appid={}",
            self.api_key
        )
    }

    /// Current-weather URL for a coordinate pair.
    pub fn current_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "https://api.openweathermap.org/data/2.5/weather?lat={lat}&lon={lon}&appid={}&units={}&lang={}",
            self.api_key, self.units, self.lang
        )
    }

    /// Five-day/3-hour forecast URL for a coordinate pair.
    pub fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "https://api.openweathermap.org/data/2.5/forecast?lat={lat}&lon={lon}&appid={}&units={}&lang={}",
            self.api_key, self.units, self.lang
        )
    }
}
