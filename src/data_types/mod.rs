pub mod appearance;
pub mod config;
pub mod data_set;
pub mod entry;
pub mod highlight;
pub mod settings;

// Re-export everything for compatibility
pub use appearance::*;
pub use config::*;
pub use data_set::*;
pub use entry::*;
pub use highlight::*;
pub use settings::*;
