pub mod hot_reload;
pub mod loader;
pub mod settings;

pub use hot_reload::{spawn_settings_sync, PolicyWatcher};
pub use loader::{load_settings, PolicyError, PolicyLoader, SiteDataFile};
pub use settings::SiteDataSettings;
