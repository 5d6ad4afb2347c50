//! Manuscript lifecycle states and editorial actions
//!
//! Both enumerations are closed: adding a state or action is a deploy-time
//! change, never a request-time one. Each variant carries a short wire code
//! (stored in the database) and a human-readable label (for display).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One state in the manuscript editorial lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// Freshly submitted, no referees assigned yet
    #[serde(rename = "SUB")]
    Submitted,
    /// Under review by one or more referees
    #[serde(rename = "REV")]
    InRefereeReview,
    /// Author is working on requested revisions
    #[serde(rename = "ARV")]
    AuthorRevision,
    /// Editor is reviewing the revised manuscript
    #[serde(rename = "EDR")]
    EditorReview,
    /// Accepted, in copy editing
    #[serde(rename = "CED")]
    CopyEdit,
    /// Author is reviewing the copy-edited manuscript
    #[serde(rename = "AUR")]
    AuthorReview,
    /// In formatting for publication
    #[serde(rename = "FOR")]
    Formatting,
    /// Published
    #[serde(rename = "PUB")]
    Published,
    /// Rejected by the editor
    #[serde(rename = "REJ")]
    Rejected,
    /// Withdrawn by the author
    #[serde(rename = "WIT")]
    Withdrawn
}

impl State {
    /// All states in declared enumeration order
    pub const ALL: [State; 10] = [
        State::Submitted,
        State::InRefereeReview,
        State::AuthorRevision,
        State::EditorReview,
        State::CopyEdit,
        State::AuthorReview,
        State::Formatting,
        State::Published,
        State::Rejected,
        State::Withdrawn,
    ];

    /// Short wire code as stored in the database
    pub fn code(&self) -> &'static str {
        match self {
            State::Submitted => "SUB",
            State::InRefereeReview => "REV",
            State::AuthorRevision => "ARV",
            State::EditorReview => "EDR",
            State::CopyEdit => "CED",
            State::AuthorReview => "AUR",
            State::Formatting => "FOR",
            State::Published => "PUB",
            State::Rejected => "REJ",
            State::Withdrawn => "WIT"
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            State::Submitted => "Submitted",
            State::InRefereeReview => "In Referee Review",
            State::AuthorRevision => "Author Revision",
            State::EditorReview => "Editor Review",
            State::CopyEdit => "Copy Edit",
            State::AuthorReview => "Author Review",
            State::Formatting => "Formatting",
            State::Published => "Published",
            State::Rejected => "Rejected",
            State::Withdrawn => "Withdrawn"
        }
    }

    /// Membership test against the closed state set
    pub fn is_valid(code: &str) -> bool {
        Self::from_str(code).is_ok()
    }

    /// No outbound transitions except the always-available withdrawal
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Published | State::Rejected | State::Withdrawn)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for State {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.code() == s)
            .ok_or_else(|| format!("Unknown state code: {}", s))
    }
}

/// A caller-initiated editorial command that may trigger a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Add a referee to the manuscript's referee list
    #[serde(rename = "ARF")]
    AssignReferee,
    /// Remove a referee from the manuscript's referee list
    #[serde(rename = "DRF")]
    DeleteReferee,
    /// Accept the manuscript as-is
    #[serde(rename = "ACC")]
    Accept,
    /// Accept the manuscript pending author revisions
    #[serde(rename = "ACR")]
    AcceptWithRevisions,
    /// Reject the manuscript
    #[serde(rename = "REJ")]
    Reject,
    /// Mark the current phase as finished
    #[serde(rename = "DON")]
    Done,
    /// Withdraw the manuscript, legal from any state
    #[serde(rename = "WIT")]
    Withdraw
}

impl Action {
    /// All actions in declared enumeration order
    pub const ALL: [Action; 7] = [
        Action::AssignReferee,
        Action::DeleteReferee,
        Action::Accept,
        Action::AcceptWithRevisions,
        Action::Reject,
        Action::Done,
        Action::Withdraw,
    ];

    /// Short wire code
    pub fn code(&self) -> &'static str {
        match self {
            Action::AssignReferee => "ARF",
            Action::DeleteReferee => "DRF",
            Action::Accept => "ACC",
            Action::AcceptWithRevisions => "ACR",
            Action::Reject => "REJ",
            Action::Done => "DON",
            Action::Withdraw => "WIT"
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Action::AssignReferee => "Assign Referee",
            Action::DeleteReferee => "Delete Referee",
            Action::Accept => "Accept",
            Action::AcceptWithRevisions => "Accept With Revisions",
            Action::Reject => "Reject",
            Action::Done => "Done",
            Action::Withdraw => "Withdraw"
        }
    }

    /// Membership test against the closed action set
    pub fn is_valid(code: &str) -> bool {
        Self::from_str(code).is_ok()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.code() == s)
            .ok_or_else(|| format!("Unknown action code: {}", s))
    }
}
