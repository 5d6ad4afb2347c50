//! The manuscript record and its referee ledger
//!
//! A manuscript is created in [`State::Submitted`] and from then on is
//! mutated only through the workflow dispatcher (state) or the referee
//! ledger operations below (referee list). The referee list is ordered and
//! duplicate-free.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{error::EngineError, state::State};

/// Opaque ordered manuscript identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManuscriptId(Uuid);

impl ManuscriptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ManuscriptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ManuscriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ManuscriptId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A manuscript moving through the editorial workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manuscript {
    /// Opaque identity, assigned at creation
    pub id:            ManuscriptId,
    /// Unique human-assigned title
    pub title:         String,
    /// Author display name, resolved from the person directory at creation
    pub author:        String,
    /// Author identity in the person directory
    pub author_id:     String,
    /// Abstract text
    pub abstract_text: String,
    /// Full manuscript text
    pub text:          String,
    /// Current lifecycle state
    pub state:         State,
    /// Ordered, duplicate-free referee ledger
    pub referees:      Vec<String>,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>
}

impl Manuscript {
    /// Create a manuscript in the initial [`State::Submitted`] state
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        author_id: impl Into<String>,
        abstract_text: impl Into<String>,
        text: impl Into<String>
    ) -> Self {
        let now = Utc::now();
        Self {
            id:            ManuscriptId::new(),
            title:         title.into(),
            author:        author.into(),
            author_id:     author_id.into(),
            abstract_text: abstract_text.into(),
            text:          text.into(),
            state:         State::Submitted,
            referees:      Vec::new(),
            created_at:    now,
            updated_at:    now
        }
    }

    /// Append a referee to the ledger and return the resulting state
    ///
    /// Always lands in [`State::InRefereeReview`], even for a second or
    /// later referee. There is no referee capacity limit.
    pub fn assign_referee(&mut self, referee: &str) -> Result<State, EngineError> {
        if self.referees.iter().any(|r| r == referee) {
            return Err(EngineError::DuplicateReferee { referee: referee.to_string() });
        }
        self.referees.push(referee.to_string());
        Ok(State::InRefereeReview)
    }

    /// Remove a referee from the ledger and return the resulting state
    ///
    /// [`State::Submitted`] if the ledger becomes empty, otherwise the
    /// manuscript stays in [`State::InRefereeReview`].
    pub fn delete_referee(&mut self, referee: &str) -> Result<State, EngineError> {
        let position = self
            .referees
            .iter()
            .position(|r| r == referee)
            .ok_or_else(|| EngineError::RefereeNotFound { referee: referee.to_string() })?;
        self.referees.remove(position);

        if self.referees.is_empty() { Ok(State::Submitted) } else { Ok(State::InRefereeReview) }
    }
}
