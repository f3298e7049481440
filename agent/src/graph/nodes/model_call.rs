use crate::graph::models::{Deps, GraphError, NodeRunner, NodeTransition, State};
use anyhow::Context;
use providers::{BaseProvider, Message, StopReason};

/// The model call node
///
/// Forwards the whole history to the provider and appends its reply. A mode label in the
/// invocation context becomes a leading system message on the outbound request only.
#[derive(Debug)]
pub struct ModelCall;

impl<P: BaseProvider> NodeRunner<P> for ModelCall {
    async fn run(
        &self,
        state: &mut State,
        deps: &Deps<P>,
    ) -> std::result::Result<NodeTransition, GraphError> {
        if state.messages.is_empty() {
            tracing::debug!("Empty history, skipping model call");
            return Ok(NodeTransition::ToEnd);
        }

        let mut outbound: Vec<Message> = Vec::with_capacity(state.messages.len() + 1);
        outbound.extend(deps.context.system_message());
        outbound.extend(state.messages.iter().cloned());

        let response = deps
            .provider
            .sync(&outbound, &deps.settings.request)
            .await
            .context("Failed to send conversation to provider")?;

        if response.stop_reason == Some(StopReason::MaxTokens) {
            tracing::warn!(model = %response.model, "Reply was truncated at the token limit");
        }

        let mut reply = Message::from(response);
        reply.content.push_str(deps.context.suffix());
        state.messages.push(reply);

        Ok(NodeTransition::ToEnd)
    }
}
