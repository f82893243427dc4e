mod degradation_event;
mod graph;
mod search;

pub use degradation_event::DegradationEvent;
pub use graph::{Edge, Node};
pub use search::{
    AuthorityOutcome, ScoredNode, SearchMode, SearchResponse, SignalBreakdown,
};
