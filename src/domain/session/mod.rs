//! Session domain - drives one chat session through the question queue
//!
//! `Idle -> Authenticated -> (Asking -> AwaitingResponse -> Scraped)* -> Closed`

mod driver;
mod result;
mod state;

pub use driver::{SessionDriver, SessionSettings, NO_RESPONSE_SENTINEL};
pub use result::{QuestionFailure, QuestionResult, SessionOutcome};
pub use state::{FailurePolicy, SessionState, WaitOutcome};
