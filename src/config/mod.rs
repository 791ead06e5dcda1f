pub mod settings;

pub use settings::{AppConfig, FilterSettings, HeatmapSettings, SeriesSettings, path_from_env};
