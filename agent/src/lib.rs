use providers::{BaseProvider, Message};

pub mod graph;
pub use graph::{
    Context, CurrentNode, Deps, GraphError, GraphIter, GraphKind, GraphRunner, GraphSettings,
    Invocation, NodeRunner, NodeTransition, State,
};

pub struct Agent<P: BaseProvider> {
    runner: GraphRunner<P>,
}

impl<P: BaseProvider + Clone> Agent<P> {
    pub fn new(provider: P, settings: GraphSettings) -> Self {
        Agent {
            runner: GraphRunner::new(provider, settings),
        }
    }

    /// Process a wire-shaped invocation; the output carries the input history plus any replies
    pub async fn invoke(
        &self,
        invocation: Invocation,
        context: &Context,
    ) -> std::result::Result<Invocation, GraphError> {
        let state = self
            .runner
            .invoke(invocation.messages, context.clone())
            .await?;
        Ok(state.into())
    }

    /// Send a single user prompt with no prior history and return the reply, if any
    pub async fn run(
        &self,
        input: &str,
        context: &Context,
    ) -> std::result::Result<Option<String>, GraphError> {
        let mut iter = self
            .runner
            .create_iter(vec![Message::user(input)], context.clone());
        while let Some(step) = iter.next().await {
            step?;
        }
        Ok(iter.get_result().map(str::to_string))
    }
}
