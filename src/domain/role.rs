//! Journal roles a person can hold

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One role within the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "AU")]
    Author,
    #[serde(rename = "ED")]
    Editor,
    #[serde(rename = "RE")]
    Referee,
    #[serde(rename = "ME")]
    ManagingEditor,
    #[serde(rename = "CE")]
    ConsultingEditor
}

impl Role {
    /// All roles in declared enumeration order
    pub const ALL: [Role; 5] =
        [Role::Author, Role::Editor, Role::Referee, Role::ManagingEditor, Role::ConsultingEditor];

    pub fn code(&self) -> &'static str {
        match self {
            Role::Author => "AU",
            Role::Editor => "ED",
            Role::Referee => "RE",
            Role::ManagingEditor => "ME",
            Role::ConsultingEditor => "CE"
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Author => "Author",
            Role::Editor => "Editor",
            Role::Referee => "Referee",
            Role::ManagingEditor => "Managing Editor",
            Role::ConsultingEditor => "Consulting Editor"
        }
    }

    /// Masthead roles are the ones listed on the journal's masthead page
    pub fn is_masthead(&self) -> bool {
        matches!(self, Role::Editor | Role::ManagingEditor | Role::ConsultingEditor)
    }

    pub fn is_valid(code: &str) -> bool {
        Self::from_str(code).is_ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL.into_iter().find(|role| role.code() == s).ok_or_else(|| format!("Unknown role code: {}", s))
    }
}
