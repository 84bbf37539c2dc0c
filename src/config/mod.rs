mod loader;

pub use loader::{AnalysisMode, Config};
