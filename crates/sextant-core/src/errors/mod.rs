mod config_error;
mod embedding_error;
mod graph_error;
mod sextant_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use graph_error::GraphError;
pub use sextant_error::{SextantError, SextantResult};
