/// Graph accessor and record-mapping errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("accessor failed for graph {graph_id}: {reason}")]
    AccessorFailed { graph_id: String, reason: String },

    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("no field found for capability {capability}")]
    SchemaUnresolved { capability: String },
}
