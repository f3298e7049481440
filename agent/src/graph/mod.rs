// Re-export types and functionality from submodules
pub mod iter;
pub mod models;
pub mod nodes;
pub mod router;
pub mod runner;

// Re-export common types for convenience
pub use iter::GraphIter;
pub use models::{
    Context, CurrentNode, Deps, GraphError, GraphKind, GraphSettings, Invocation, NodeRunner,
    NodeTransition, State,
};
pub use nodes::{End, ModelCall, NumberCheck, Start};
pub use router::{next_node, route_after_number_check};
pub use runner::GraphRunner;
