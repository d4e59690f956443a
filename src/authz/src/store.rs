//! Persistence collaborator interface and in-memory store

use async_trait::async_trait;
use intervue_core::{
    Interview, InterviewFilter, InterviewId, InterviewStatus, Message, Page, Participant,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors reported by a persistence backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Targeted document does not exist
    #[error("document not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// Any other backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Document store holding interviews, participants and messages
///
/// Each call is assumed atomic at single-document granularity. The engine
/// never retries a failed call.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Look up an interview by id
    async fn find_interview(&self, id: &InterviewId) -> StoreResult<Option<Interview>>;

    /// Look up the membership of `identity` in interview `id`
    async fn find_membership(
        &self,
        id: &InterviewId,
        identity: &str,
    ) -> StoreResult<Option<Participant>>;

    /// Overwrite the status of an interview
    async fn update_status(&self, id: &InterviewId, status: InterviewStatus) -> StoreResult<()>;

    /// Insert a new interview
    async fn insert_interview(&self, interview: Interview) -> StoreResult<()>;

    /// List interviews matching `filter`, newest first
    async fn list_interviews(
        &self,
        filter: &InterviewFilter,
        page: Page,
    ) -> StoreResult<Vec<Interview>>;

    /// Insert a membership row; at most one per (interview, identity)
    async fn insert_participant(&self, participant: Participant) -> StoreResult<()>;

    /// Append a message to an interview
    async fn insert_message(&self, message: Message) -> StoreResult<()>;

    /// List an interview's messages, oldest first
    async fn list_messages(&self, id: &InterviewId, page: Page) -> StoreResult<Vec<Message>>;
}

/// In-memory interview store implementation
pub struct InMemoryInterviewStore {
    interviews: Arc<RwLock<HashMap<InterviewId, Interview>>>,
    participants: Arc<RwLock<HashMap<(InterviewId, String), Participant>>>,
    messages: Arc<RwLock<HashMap<InterviewId, Vec<Message>>>>,
}

impl InMemoryInterviewStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            interviews: Arc::new(RwLock::new(HashMap::new())),
            participants: Arc::new(RwLock::new(HashMap::new())),
            messages: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored interviews
    pub async fn interview_count(&self) -> usize {
        self.interviews.read().await.len()
    }
}

impl Default for InMemoryInterviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InterviewStore for InMemoryInterviewStore {
    async fn find_interview(&self, id: &InterviewId) -> StoreResult<Option<Interview>> {
        let interviews = self.interviews.read().await;
        Ok(interviews.get(id).cloned())
    }

    async fn find_membership(
        &self,
        id: &InterviewId,
        identity: &str,
    ) -> StoreResult<Option<Participant>> {
        let participants = self.participants.read().await;
        Ok(participants.get(&(id.clone(), identity.to_string())).cloned())
    }

    async fn update_status(&self, id: &InterviewId, status: InterviewStatus) -> StoreResult<()> {
        let mut interviews = self.interviews.write().await;
        let interview = interviews
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        interview.status = status;
        Ok(())
    }

    async fn insert_interview(&self, interview: Interview) -> StoreResult<()> {
        let mut interviews = self.interviews.write().await;
        if interviews.contains_key(&interview.id) {
            return Err(StoreError::Duplicate(interview.id.to_string()));
        }
        interviews.insert(interview.id.clone(), interview);
        Ok(())
    }

    async fn list_interviews(
        &self,
        filter: &InterviewFilter,
        page: Page,
    ) -> StoreResult<Vec<Interview>> {
        let interviews = self.interviews.read().await;

        let mut matching: Vec<Interview> = interviews
            .values()
            .filter(|interview| filter.matches(interview))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let range = page.bounds(matching.len());
        Ok(matching[range].to_vec())
    }

    async fn insert_participant(&self, participant: Participant) -> StoreResult<()> {
        let mut participants = self.participants.write().await;
        let key = (participant.interview_id.clone(), participant.identity.clone());
        if participants.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "{} in interview {}",
                participant.identity, participant.interview_id
            )));
        }
        participants.insert(key, participant);
        Ok(())
    }

    async fn insert_message(&self, message: Message) -> StoreResult<()> {
        let mut messages = self.messages.write().await;
        let thread = messages.entry(message.interview_id.clone()).or_default();
        thread.push(message);
        // Stable sort keeps insertion order for equal timestamps
        thread.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(())
    }

    async fn list_messages(&self, id: &InterviewId, page: Page) -> StoreResult<Vec<Message>> {
        let messages = self.messages.read().await;
        let Some(thread) = messages.get(id) else {
            return Ok(Vec::new());
        };
        let range = page.bounds(thread.len());
        Ok(thread[range].to_vec())
    }
}
