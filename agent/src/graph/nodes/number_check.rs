use crate::graph::models::{Deps, GraphError, NodeRunner, NodeTransition, State};
use crate::graph::router::route_after_number_check;
use providers::{BaseProvider, Message, Role};

/// Answers numeric user messages with the number plus one, without calling the model
#[derive(Debug)]
pub struct NumberCheck;

impl<P: BaseProvider> NodeRunner<P> for NumberCheck {
    async fn run(
        &self,
        state: &mut State,
        deps: &Deps<P>,
    ) -> std::result::Result<NodeTransition, GraphError> {
        let value = state
            .last_message()
            .filter(|message| message.role == Role::User)
            .and_then(|message| parse_number(&message.content));

        if let Some(value) = value {
            let reply = format!("{}{}", format_float(value + 1.0), deps.context.suffix());
            tracing::info!(input = value, reply = %reply, "Answered numeric message");
            state.messages.push(Message::assistant(reply));
            state.number_handled = true;
        }

        let transition = route_after_number_check(state);
        tracing::debug!(?transition, "Number check routed");
        Ok(transition)
    }
}

/// Parses message text as a float. Surrounding whitespace is ignored; `inf` and `nan` are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Formats a float the way Python's `repr` does: `6.0`, `2.5`, `1e+16`, `2.5e-05`, `nan`, `inf`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            return format!("{}e{}{:0>2}", mantissa, sign, digits);
        }
        return scientific;
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
