mod end;
mod model_call;
mod number_check;
mod start;

pub use end::End;
pub use model_call::ModelCall;
pub use number_check::{format_float, parse_number, NumberCheck};
pub use start::Start;
