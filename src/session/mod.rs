//! Session state and the four-page flow that drives it

pub mod clock;
pub mod controller;
pub mod flow;
pub mod record;

pub use clock::{Clock, SystemClock};
pub use controller::{InterviewSession, SetupForm, SubmitOutcome};
pub use flow::{Action, Page};
pub use record::{QuestionType, ResumeReview, SessionRecord};
