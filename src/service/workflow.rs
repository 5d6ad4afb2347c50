//! Workflow service - the dispatcher that drives the editorial state machine
//!
//! Orchestrates load -> validate -> transition -> persist for every
//! editorial action, plus manuscript creation and deletion. All blocking
//! I/O lives behind the repository and directory ports; the service itself
//! holds no state across requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    domain::{
        error::EngineError,
        manuscript::{Manuscript, ManuscriptId},
        state::{Action, State},
        table::{self, Transition}
    },
    port::{directory::PersonDirectory, repository::ManuscriptRepository}
};

/// Extra data accompanying an action request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionPayload {
    /// Referee identity, required for the referee actions
    pub referee: Option<String>
}

impl ActionPayload {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn referee(referee: impl Into<String>) -> Self {
        Self { referee: Some(referee.into()) }
    }
}

/// Service for driving manuscripts through the editorial workflow
pub struct WorkflowService {
    repo:      Arc<dyn ManuscriptRepository>,
    directory: Arc<dyn PersonDirectory>
}

impl WorkflowService {
    pub fn new(repo: Arc<dyn ManuscriptRepository>, directory: Arc<dyn PersonDirectory>) -> Self {
        Self { repo, directory }
    }

    /// Create a manuscript in the initial submitted state
    ///
    /// The author reference must resolve in the person directory and the
    /// title must be unique. An existing record under the same title is
    /// never altered by a failed creation.
    pub async fn create(
        &self,
        title: &str,
        author_person_id: &str,
        abstract_text: &str,
        text: &str
    ) -> Result<Manuscript, EngineError> {
        let author = self
            .directory
            .lookup(author_person_id)
            .await?
            .ok_or_else(|| EngineError::UnknownAuthor { person_id: author_person_id.to_string() })?;

        if self.repo.load_by_title(title).await?.is_some() {
            return Err(EngineError::DuplicateTitle { title: title.to_string() });
        }

        let manuscript = Manuscript::new(title, author.name, author_person_id, abstract_text, text);
        self.repo.insert(&manuscript).await?;

        info!(id = %manuscript.id, title, "Manuscript created");
        Ok(manuscript)
    }

    /// Apply an editorial action to a manuscript and return the next state
    ///
    /// Validates the action against the transition table for the
    /// manuscript's current state, performs any referee ledger mutation,
    /// and persists the result. The state write is conditional on the
    /// loaded state, so a concurrent dispatch against the same manuscript
    /// cannot silently overwrite this one. Nothing is retried internally.
    pub async fn handle_action(
        &self,
        id: &ManuscriptId,
        action: Action,
        payload: &ActionPayload
    ) -> Result<State, EngineError> {
        let mut manuscript = self
            .repo
            .load(id)
            .await?
            .ok_or_else(|| EngineError::ManuscriptNotFound { id: id.to_string() })?;

        let current = manuscript.state;
        let transition = table::dispatch(current, action)?;
        debug!(id = %id, action = %action, state = %current, "Dispatching action");

        let next = match transition {
            Transition::To(next) => next,
            Transition::AssignReferee => {
                let referee = Self::require_referee(action, payload)?;
                let next = manuscript.assign_referee(referee)?;
                self.repo.persist_referees(id, &manuscript.referees).await?;
                next
            }
            Transition::DeleteReferee => {
                let referee = Self::require_referee(action, payload)?;
                let next = manuscript.delete_referee(referee)?;
                self.repo.persist_referees(id, &manuscript.referees).await?;
                next
            }
        };

        // Commit point: the state is observably updated only once this
        // conditional write succeeds.
        self.repo.persist_state(id, current, next).await?;

        info!(id = %id, action = %action, from = %current, to = %next, "Manuscript transitioned");
        Ok(next)
    }

    /// Apply an action to a manuscript addressed by its unique title
    pub async fn handle_action_by_title(
        &self,
        title: &str,
        action: Action,
        payload: &ActionPayload
    ) -> Result<State, EngineError> {
        let manuscript = self
            .repo
            .load_by_title(title)
            .await?
            .ok_or_else(|| EngineError::ManuscriptNotFound { id: title.to_string() })?;

        self.handle_action(&manuscript.id, action, payload).await
    }

    /// Actions legal in the given state, in declared order
    pub fn list_valid_actions(&self, state: State) -> Vec<Action> {
        table::valid_actions(state)
    }

    /// Actions legal in the state with the given wire code
    pub fn list_valid_actions_by_code(&self, code: &str) -> Result<Vec<Action>, EngineError> {
        let state = code.parse().map_err(|_| EngineError::UnknownState { state: code.to_string() })?;
        Ok(table::valid_actions(state))
    }

    /// All states in declared enumeration order
    pub fn list_states(&self) -> &'static [State] {
        &State::ALL
    }

    /// Fetch a manuscript by its unique title
    pub async fn get(&self, title: &str) -> Result<Manuscript, EngineError> {
        self.repo
            .load_by_title(title)
            .await?
            .ok_or_else(|| EngineError::ManuscriptNotFound { id: title.to_string() })
    }

    /// All manuscripts, ordered by title
    pub async fn list(&self) -> Result<Vec<Manuscript>, EngineError> {
        self.repo.list().await
    }

    /// Delete a manuscript by title; terminal, no tombstone is kept
    pub async fn delete(&self, title: &str) -> Result<(), EngineError> {
        if !self.repo.delete_by_title(title).await? {
            return Err(EngineError::ManuscriptNotFound { id: title.to_string() });
        }
        info!(title, "Manuscript deleted");
        Ok(())
    }

    fn require_referee(action: Action, payload: &ActionPayload) -> Result<&str, EngineError> {
        match payload.referee.as_deref() {
            Some(referee) if !referee.is_empty() => Ok(referee),
            _ => Err(EngineError::MissingReferee { action })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapter::memory::{MemoryDirectory, MemoryStore},
        domain::person::Person
    };

    fn service() -> WorkflowService {
        let repo = Arc::new(MemoryStore::new());
        let directory =
            Arc::new(MemoryDirectory::with_people([Person::new("Ada Author", "a@x.edu", "NYU")]));
        WorkflowService::new(repo, directory)
    }

    async fn submitted_manuscript(svc: &WorkflowService) -> Manuscript {
        svc.create("Paper A", "a@x.edu", "An abstract.", "The text.").await.unwrap()
    }

    #[tokio::test]
    async fn create_starts_submitted_with_resolved_author() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;

        assert_eq!(manu.state, State::Submitted);
        assert_eq!(manu.author, "Ada Author");
        assert_eq!(manu.author_id, "a@x.edu");
        assert!(manu.referees.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_author() {
        let svc = service();
        let err = svc.create("Paper A", "ghost@x.edu", "", "").await.unwrap_err();
        assert_eq!(err, EngineError::UnknownAuthor { person_id: "ghost@x.edu".to_string() });
    }

    #[tokio::test]
    async fn create_rejects_duplicate_title_and_keeps_existing_record() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;
        svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("r1")).await.unwrap();

        let err = svc.create("Paper A", "a@x.edu", "Other abstract.", "Other text.").await.unwrap_err();
        assert_eq!(err, EngineError::DuplicateTitle { title: "Paper A".to_string() });

        let existing = svc.get("Paper A").await.unwrap();
        assert_eq!(existing.id, manu.id);
        assert_eq!(existing.state, State::InRefereeReview);
        assert_eq!(existing.referees, vec!["r1"]);
    }

    #[tokio::test]
    async fn assign_referee_moves_to_review() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;

        let next =
            svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("r1")).await.unwrap();
        assert_eq!(next, State::InRefereeReview);

        let stored = svc.get("Paper A").await.unwrap();
        assert_eq!(stored.state, State::InRefereeReview);
        assert_eq!(stored.referees, vec!["r1"]);
    }

    #[tokio::test]
    async fn deleting_last_referee_returns_to_submitted() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;
        svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("r1")).await.unwrap();

        let next =
            svc.handle_action(&manu.id, Action::DeleteReferee, &ActionPayload::referee("r1")).await.unwrap();
        assert_eq!(next, State::Submitted);

        let stored = svc.get("Paper A").await.unwrap();
        assert_eq!(stored.state, State::Submitted);
        assert!(stored.referees.is_empty());
    }

    #[tokio::test]
    async fn accept_then_done_chain_reaches_published() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;
        svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("r1")).await.unwrap();

        let empty = ActionPayload::empty();
        assert_eq!(svc.handle_action(&manu.id, Action::Accept, &empty).await.unwrap(), State::CopyEdit);
        assert_eq!(svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap(), State::AuthorReview);
        assert_eq!(svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap(), State::Formatting);
        assert_eq!(svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap(), State::Published);
    }

    #[tokio::test]
    async fn withdraw_is_absorbing_and_repeatable() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;
        let empty = ActionPayload::empty();

        assert_eq!(svc.handle_action(&manu.id, Action::Withdraw, &empty).await.unwrap(), State::Withdrawn);
        assert_eq!(svc.handle_action(&manu.id, Action::Withdraw, &empty).await.unwrap(), State::Withdrawn);
    }

    #[tokio::test]
    async fn repeated_done_fails_once_state_has_moved_on() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;
        svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("r1")).await.unwrap();

        let empty = ActionPayload::empty();
        svc.handle_action(&manu.id, Action::Accept, &empty).await.unwrap();
        svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap();

        // The workflow is not idempotent: AUTHOR_REVIEW allows DONE, but a
        // replay after FORMATTING must fail, not re-apply.
        svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap();
        svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap();
        let err = svc.handle_action(&manu.id, Action::Done, &empty).await.unwrap_err();
        assert_eq!(err, EngineError::ActionNotAllowed { action: Action::Done, state: State::Published });
    }

    #[tokio::test]
    async fn referee_actions_require_a_referee_in_the_payload() {
        let svc = service();
        let manu = submitted_manuscript(&svc).await;

        let err = svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::empty()).await.unwrap_err();
        assert_eq!(err, EngineError::MissingReferee { action: Action::AssignReferee });

        let err =
            svc.handle_action(&manu.id, Action::AssignReferee, &ActionPayload::referee("")).await.unwrap_err();
        assert_eq!(err, EngineError::MissingReferee { action: Action::AssignReferee });

        // Nothing was persisted.
        let stored = svc.get("Paper A").await.unwrap();
        assert_eq!(stored.state, State::Submitted);
        assert!(stored.referees.is_empty());
    }

    #[tokio::test]
    async fn unknown_manuscript_fails() {
        let svc = service();
        let missing = ManuscriptId::new();

        let err = svc.handle_action(&missing, Action::Withdraw, &ActionPayload::empty()).await.unwrap_err();
        assert_eq!(err, EngineError::ManuscriptNotFound { id: missing.to_string() });

        let err = svc.handle_action_by_title("Nope", Action::Withdraw, &ActionPayload::empty()).await.unwrap_err();
        assert_eq!(err, EngineError::ManuscriptNotFound { id: "Nope".to_string() });
    }

    #[tokio::test]
    async fn action_by_title_resolves_the_manuscript() {
        let svc = service();
        submitted_manuscript(&svc).await;

        let next = svc
            .handle_action_by_title("Paper A", Action::AssignReferee, &ActionPayload::referee("r1"))
            .await
            .unwrap();
        assert_eq!(next, State::InRefereeReview);
    }

    #[tokio::test]
    async fn registry_listings() {
        let svc = service();

        assert_eq!(svc.list_states().len(), 10);
        assert_eq!(svc.list_states()[0], State::Submitted);

        assert_eq!(
            svc.list_valid_actions(State::Submitted),
            vec![Action::AssignReferee, Action::Reject, Action::Withdraw]
        );
        assert_eq!(svc.list_valid_actions_by_code("SUB").unwrap(), svc.list_valid_actions(State::Submitted));

        let err = svc.list_valid_actions_by_code("BAD").unwrap_err();
        assert_eq!(err, EngineError::UnknownState { state: "BAD".to_string() });
    }

    /// Repository whose state writes always fail, for persistence-failure paths
    struct BrokenStateStore {
        inner: MemoryStore
    }

    #[async_trait::async_trait]
    impl crate::port::repository::ManuscriptRepository for BrokenStateStore {
        async fn load(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, EngineError> {
            self.inner.load(id).await
        }

        async fn load_by_title(&self, title: &str) -> Result<Option<Manuscript>, EngineError> {
            self.inner.load_by_title(title).await
        }

        async fn insert(&self, manuscript: &Manuscript) -> Result<(), EngineError> {
            self.inner.insert(manuscript).await
        }

        async fn persist_state(&self, _: &ManuscriptId, _: State, _: State) -> Result<(), EngineError> {
            Err(EngineError::Persistence("disk on fire".to_string()))
        }

        async fn persist_referees(&self, id: &ManuscriptId, referees: &[String]) -> Result<(), EngineError> {
            self.inner.persist_referees(id, referees).await
        }

        async fn delete_by_title(&self, title: &str) -> Result<bool, EngineError> {
            self.inner.delete_by_title(title).await
        }

        async fn list(&self) -> Result<Vec<Manuscript>, EngineError> {
            self.inner.list().await
        }
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_and_state_stays_put() {
        let repo = Arc::new(BrokenStateStore { inner: MemoryStore::new() });
        let directory = Arc::new(MemoryDirectory::with_people([Person::new("Ada Author", "a@x.edu", "NYU")]));
        let svc = WorkflowService::new(repo.clone(), directory);

        let manu = svc.create("Paper A", "a@x.edu", "", "").await.unwrap();

        let err = svc.handle_action(&manu.id, Action::Reject, &ActionPayload::empty()).await.unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));

        // The stored state is untouched; the caller may retry.
        let stored = repo.load(&manu.id).await.unwrap().unwrap();
        assert_eq!(stored.state, State::Submitted);
    }

    #[tokio::test]
    async fn delete_is_terminal() {
        let svc = service();
        submitted_manuscript(&svc).await;

        svc.delete("Paper A").await.unwrap();
        let err = svc.delete("Paper A").await.unwrap_err();
        assert_eq!(err, EngineError::ManuscriptNotFound { id: "Paper A".to_string() });
    }

    #[tokio::test]
    async fn list_returns_manuscripts_ordered_by_title() {
        let svc = service();
        svc.create("Zeta", "a@x.edu", "", "").await.unwrap();
        svc.create("Alpha", "a@x.edu", "", "").await.unwrap();

        let titles: Vec<String> = svc.list().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta"]);
    }
}
