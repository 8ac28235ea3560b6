mod loader;
mod model;
mod scan;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{CONFIG_VERSION, Config, DEFAULT_SOURCE, ScanSettings, ScopeSettings};
pub use scan::ScanConfig;
pub use validation::validate_config_semantics;
