use providers::{BaseProvider, Message, RequestSettings};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use thiserror::Error;

/// Custom error type for the graph
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid state transition: {transition:?} from {from}")]
    InvalidStateTransition {
        from: CurrentNode,
        transition: NodeTransition,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// State owned by a single invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub messages: Vec<Message>,
    /// Set when the number check answered the turn itself; reset at every start
    pub number_handled: bool,
}

impl State {
    pub fn new(messages: Vec<Message>) -> Self {
        State {
            messages,
            number_handled: false,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Invocation payload, `{"messages": [{"role": ..., "content": ...}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl From<State> for Invocation {
    fn from(state: State) -> Self {
        Invocation {
            messages: state.messages,
        }
    }
}

/// Read-only overrides supplied with each invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Mode label folded into a system message for the model, e.g. "teacher-mode"
    #[serde(default)]
    pub mode: Option<String>,
    /// Appended to every reply produced during the turn
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Context {
    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or_default()
    }

    /// System message prepended to the model request only, never stored in the history
    pub fn system_message(&self) -> Option<Message> {
        self.mode
            .as_deref()
            .filter(|mode| !mode.is_empty())
            .map(|mode| {
                Message::system(format!(
                    "You are a helpful assistant. Special mode: {}.",
                    mode
                ))
            })
    }
}

/// Which wiring the runner uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphKind {
    /// start -> model call -> end
    Chatbot,
    /// start -> number check -> (router) -> end | model call -> end
    #[default]
    NumberRouted,
}

impl Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Chatbot => write!(f, "chatbot"),
            GraphKind::NumberRouted => write!(f, "number-routed"),
        }
    }
}

impl FromStr for GraphKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "chatbot" => Ok(GraphKind::Chatbot),
            "number-routed" => Ok(GraphKind::NumberRouted),
            other => Err(anyhow::anyhow!("Unknown graph kind: {}", other)),
        }
    }
}

/// Runner-level settings shared by every invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSettings {
    pub kind: GraphKind,
    pub request: RequestSettings,
}

/// Dependencies that nodes need to function
pub struct Deps<P: BaseProvider> {
    pub provider: P,
    pub context: Context,
    pub settings: GraphSettings,
}

/// Node logic, run against the invocation state and the injected dependencies
pub trait NodeRunner<P: BaseProvider>: Debug {
    /// Run the node's logic
    async fn run(
        &self,
        state: &mut State,
        deps: &Deps<P>,
    ) -> std::result::Result<NodeTransition, GraphError>;
}

/// Enum to represent all possible node transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTransition {
    ToNumberCheck,
    ToModelCall,
    ToEnd,
    Terminal,
}

/// Enum representing the current node in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentNode {
    Start,
    NumberCheck,
    ModelCall,
    End,
}

impl Display for CurrentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentNode::Start => write!(f, "start"),
            CurrentNode::NumberCheck => write!(f, "number_check"),
            CurrentNode::ModelCall => write!(f, "model_call"),
            CurrentNode::End => write!(f, "end"),
        }
    }
}
