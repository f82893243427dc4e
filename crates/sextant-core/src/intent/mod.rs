pub mod edge_map;
pub mod keywords;
pub mod profiles;
pub mod taxonomy;

pub use edge_map::IntentEdgeMap;
pub use keywords::keywords_for;
pub use profiles::{IntentProfile, IntentProfiles};
pub use taxonomy::Intent;
