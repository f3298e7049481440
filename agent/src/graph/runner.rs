use crate::graph::iter::GraphIter;
use crate::graph::models::{Context, Deps, GraphError, GraphSettings, State};
use providers::{BaseProvider, Message};

/// The graph runner
pub struct GraphRunner<P: BaseProvider> {
    provider: P,
    settings: GraphSettings,
}

impl<P: BaseProvider> GraphRunner<P> {
    pub fn new(provider: P, settings: GraphSettings) -> Self {
        GraphRunner { provider, settings }
    }

    /// Create a new graph iterator
    pub fn create_iter(&self, messages: Vec<Message>, context: Context) -> GraphIter<P>
    where
        P: Clone,
    {
        let deps = Deps {
            provider: self.provider.clone(),
            context,
            settings: self.settings.clone(),
        };
        GraphIter::new(deps, messages)
    }

    /// Run one turn to completion and hand back the final state
    pub async fn invoke(
        &self,
        messages: Vec<Message>,
        context: Context,
    ) -> std::result::Result<State, GraphError>
    where
        P: Clone,
    {
        let mut iter = self.create_iter(messages, context);
        while let Some(step) = iter.next().await {
            step?;
        }
        Ok(iter.into_state())
    }
}
