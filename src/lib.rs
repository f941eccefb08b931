//! Core logic shared by two small desktop data apps: a sortable SQLite table
//! browser and a five-day weather display.
//!
//! The crate owns the data shaping only. Widget trees, screen navigation and
//! HTTP transport live in the embedding application and talk to this crate
//! through [`data::loader::DataSource`] and [`render::Renderer`].

pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod render;
pub mod table;

pub use config::WeatherConfig;
pub use data::loader::{load_file, DataSource, SqliteSource};
pub use data::model::{CellValue, Dataset};
pub use error::{ForecastError, TableError};
pub use forecast::{CurrentConditions, DaySlot, Forecast, ForecastSelector, WeatherSample};
pub use render::{RenderPlan, Renderer};
pub use table::TableView;
