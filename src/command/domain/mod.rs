//! Domain model for command interpretation.

mod error;
mod fallback;
mod intent;
mod matching;
mod model_response;
mod outcome;
mod temporal;

pub use error::{CommandFailure, ModelResponseError};
pub use fallback::parse_fallback;
pub use intent::{CommandIntent, CreateIntent, IntentSource, InterpretedCommand};
pub use matching::{TitleMatch, match_title};
pub use model_response::decode_model_response;
pub use outcome::{CommandAction, CommandOutcome};
pub use temporal::{normalize_date, normalize_time, parse_clock_time};
