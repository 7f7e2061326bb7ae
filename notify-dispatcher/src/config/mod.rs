pub mod settings;

pub use settings::{AppConfig, DispatcherConfig, load_app_config};
