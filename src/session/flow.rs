//! Page transitions
//!
//! The flow only moves forward, with two exceptions: submitting an answer
//! keeps the interview page, and restart returns from the summary to setup.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Setup,
    Review,
    Interview,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Proceed,
    StartInterview,
    SubmitAnswer,
    TimeExpired,
    Restart,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Proceed => "proceed to review",
            Action::StartInterview => "start the interview",
            Action::SubmitAnswer => "submit an answer",
            Action::TimeExpired => "finish the interview",
            Action::Restart => "restart",
        }
    }
}

impl Page {
    /// Target page for `action`, or `None` when the move is not allowed.
    pub fn next(self, action: Action) -> Option<Page> {
        match (self, action) {
            (Page::Setup, Action::Proceed) => Some(Page::Review),
            (Page::Review, Action::StartInterview) => Some(Page::Interview),
            (Page::Interview, Action::SubmitAnswer) => Some(Page::Interview),
            (Page::Interview, Action::TimeExpired) => Some(Page::Summary),
            (Page::Summary, Action::Restart) => Some(Page::Setup),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Setup => "setup",
            Page::Review => "resume review",
            Page::Interview => "interview",
            Page::Summary => "summary",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGES: [Page; 4] = [Page::Setup, Page::Review, Page::Interview, Page::Summary];
    const ACTIONS: [Action; 5] = [
        Action::Proceed,
        Action::StartInterview,
        Action::SubmitAnswer,
        Action::TimeExpired,
        Action::Restart,
    ];

    #[test]
    fn test_happy_path() {
        let page = Page::Setup
            .next(Action::Proceed)
            .and_then(|p| p.next(Action::StartInterview))
            .and_then(|p| p.next(Action::SubmitAnswer))
            .and_then(|p| p.next(Action::TimeExpired));
        assert_eq!(page, Some(Page::Summary));
        assert_eq!(Page::Summary.next(Action::Restart), Some(Page::Setup));
    }

    #[test]
    fn test_exactly_five_legal_moves() {
        let legal = PAGES
            .iter()
            .flat_map(|p| ACTIONS.iter().map(move |a| p.next(*a)))
            .filter(Option::is_some)
            .count();
        assert_eq!(legal, 5);
    }

    #[test]
    fn test_no_way_back_into_the_interview() {
        for action in ACTIONS {
            assert_ne!(Page::Summary.next(action), Some(Page::Interview));
        }
        assert_eq!(Page::Review.next(Action::Restart), None);
        assert_eq!(Page::Setup.next(Action::TimeExpired), None);
    }
}
