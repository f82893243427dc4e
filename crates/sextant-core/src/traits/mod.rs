mod embedding;
mod graph_accessor;

pub use embedding::IEmbeddingProvider;
pub use graph_accessor::IGraphAccessor;
