//! People known to the journal
//!
//! The engine only consults the person directory to validate the author
//! reference at manuscript creation; the record itself is thin.

use serde::{Deserialize, Serialize};

use crate::domain::role::Role;

/// A person in the journal's directory, keyed by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name:        String,
    pub email:       String,
    pub affiliation: String,
    #[serde(default)]
    pub roles:       Vec<Role>
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>, affiliation: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into(), affiliation: affiliation.into(), roles: Vec::new() }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_role_deduplicates() {
        let person = Person::new("Aya Elfettahi", "aae2042@nyu.edu", "NYU")
            .with_role(Role::Author)
            .with_role(Role::Author)
            .with_role(Role::Referee);
        assert_eq!(person.roles, vec![Role::Author, Role::Referee]);
        assert!(person.has_role(Role::Referee));
        assert!(!person.has_role(Role::Editor));
    }
}
