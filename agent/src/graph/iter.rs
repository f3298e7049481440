use crate::graph::models::{CurrentNode, Deps, GraphError, NodeRunner, State};
use crate::graph::nodes::{End, ModelCall, NumberCheck, Start};
use crate::graph::router::next_node;
use providers::{BaseProvider, Role};

/// A struct to hold the state of a graph iteration
pub struct GraphIter<P: BaseProvider> {
    deps: Deps<P>,
    state: State,
    current_node: CurrentNode,
    finished: bool,
    result: Option<String>,
}

impl<P: BaseProvider> GraphIter<P> {
    /// Create a new graph iterator
    pub fn new(deps: Deps<P>, messages: Vec<providers::Message>) -> Self {
        GraphIter {
            deps,
            state: State::new(messages),
            current_node: CurrentNode::Start,
            finished: false,
            result: None,
        }
    }

    /// Get the result of the graph execution
    pub fn get_result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// The node that will run on the next call to [`GraphIter::next`]
    pub fn current_node(&self) -> CurrentNode {
        self.current_node
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run the next node in the graph and report the node it moved to
    pub async fn next(&mut self) -> Option<std::result::Result<CurrentNode, GraphError>> {
        if self.finished {
            return None;
        }

        let from = self.current_node;
        let result = match from {
            CurrentNode::Start => Start.run(&mut self.state, &self.deps).await,
            CurrentNode::NumberCheck => NumberCheck.run(&mut self.state, &self.deps).await,
            CurrentNode::ModelCall => ModelCall.run(&mut self.state, &self.deps).await,
            CurrentNode::End => End.run(&mut self.state, &self.deps).await,
        };

        let transition = match result {
            Ok(transition) => transition,
            Err(err) => {
                // On error, we'll return the error and mark as finished
                tracing::error!(node = %from, error = %err, "Node failed");
                self.finished = true;
                return Some(Err(err));
            }
        };

        if from == CurrentNode::End {
            // Store the result if we've reached the end
            self.result = self
                .state
                .last_message()
                .filter(|message| message.role == Role::Assistant)
                .map(|message| message.content.clone());
        }

        match next_node(from, transition) {
            Ok(Some(node)) => {
                tracing::debug!(from = %from, to = %node, "Transition");
                self.current_node = node;
                Some(Ok(node))
            }
            Ok(None) => {
                self.finished = true;
                Some(Ok(from))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }

    /// Get the current state
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }
}
