use crate::graph::models::{CurrentNode, GraphError, NodeTransition, State};

/// Every legal edge of the graph: `(from, transition, to)`
pub const TRANSITIONS: &[(CurrentNode, NodeTransition, CurrentNode)] = &[
    (
        CurrentNode::Start,
        NodeTransition::ToNumberCheck,
        CurrentNode::NumberCheck,
    ),
    (
        CurrentNode::Start,
        NodeTransition::ToModelCall,
        CurrentNode::ModelCall,
    ),
    (
        CurrentNode::NumberCheck,
        NodeTransition::ToEnd,
        CurrentNode::End,
    ),
    (
        CurrentNode::NumberCheck,
        NodeTransition::ToModelCall,
        CurrentNode::ModelCall,
    ),
    (
        CurrentNode::ModelCall,
        NodeTransition::ToEnd,
        CurrentNode::End,
    ),
];

/// Routes after the number check: handled turns end, everything else goes to the model
pub fn route_after_number_check(state: &State) -> NodeTransition {
    if state.number_handled {
        NodeTransition::ToEnd
    } else {
        NodeTransition::ToModelCall
    }
}

/// Looks up the next node. `Ok(None)` means the graph has finished.
pub fn next_node(
    from: CurrentNode,
    transition: NodeTransition,
) -> Result<Option<CurrentNode>, GraphError> {
    if from == CurrentNode::End && transition == NodeTransition::Terminal {
        return Ok(None);
    }

    TRANSITIONS
        .iter()
        .find(|(source, edge, _)| *source == from && *edge == transition)
        .map(|(_, _, target)| Some(*target))
        .ok_or(GraphError::InvalidStateTransition { from, transition })
}
