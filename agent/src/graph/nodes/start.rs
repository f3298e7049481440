use crate::graph::models::{Deps, GraphError, GraphKind, NodeRunner, NodeTransition, State};
use providers::BaseProvider;

/// The starting node
#[derive(Debug)]
pub struct Start;

impl<P: BaseProvider> NodeRunner<P> for Start {
    async fn run(
        &self,
        state: &mut State,
        deps: &Deps<P>,
    ) -> std::result::Result<NodeTransition, GraphError> {
        // The flag only describes the current turn
        state.number_handled = false;

        tracing::debug!(
            graph = %deps.settings.kind,
            messages = state.messages.len(),
            "Starting turn"
        );

        match deps.settings.kind {
            GraphKind::Chatbot => Ok(NodeTransition::ToModelCall),
            GraphKind::NumberRouted => Ok(NodeTransition::ToNumberCheck),
        }
    }
}
