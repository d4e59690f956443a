//! Interview access engine
//!
//! Composes the access authorizer, the lifecycle state machine and the read
//! cache in front of a persistence backend.
//!
//! # Write path
//!
//! ```text
//! existence → access check → transition table → role gate → persist → invalidate
//! ```
//!
//! # Read path
//!
//! ```text
//! cache ──hit──────────────────────────┐
//!   └─miss→ storage → populate cache ──┴→ access check → caller
//! ```
//!
//! The access check runs on every resource-scoped read, whether or not the
//! data came from the cache; only principal-independent data is cached.

use intervue_core::{
    Interview, InterviewFilter, InterviewId, InterviewStatus, Message, NewInterview, Page,
    Participant, ParticipantRole, Principal, Role,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::access::{AccessGrant, ResourceAccessAuthorizer};
use crate::cache::{keys, CacheStats, ReadThroughCache};
use crate::config::EngineConfig;
use crate::error::{AuthzError, Result};
use crate::lifecycle::{self, Transition};
use crate::store::{InterviewStore, StoreError};

/// Access-control and lifecycle engine for interviews
///
/// Built explicitly by the process entry point; the cache it uses is owned
/// by the engine (or injected with [`InterviewEngine::with_cache`]) rather
/// than living in a global.
pub struct InterviewEngine {
    store: Arc<dyn InterviewStore>,
    authorizer: ResourceAccessAuthorizer,
    cache: Arc<ReadThroughCache>,
    config: EngineConfig,
}

impl InterviewEngine {
    /// Create an engine with a fresh cache
    pub fn new(config: EngineConfig, store: Arc<dyn InterviewStore>) -> Self {
        let cache = Arc::new(ReadThroughCache::new(config.cache.clone()));
        Self::with_cache(config, store, cache)
    }

    /// Create an engine around an existing cache
    pub fn with_cache(
        config: EngineConfig,
        store: Arc<dyn InterviewStore>,
        cache: Arc<ReadThroughCache>,
    ) -> Self {
        info!(
            "InterviewEngine initialized with cache={}, ttl={}s",
            cache.is_enabled(),
            cache.config().default_ttl.as_secs()
        );

        Self {
            authorizer: ResourceAccessAuthorizer::new(Arc::clone(&store)),
            store,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ReadThroughCache> {
        &self.cache
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Check that interview `id` exists and `principal` may access it
    pub async fn authorize_access(
        &self,
        id: &InterviewId,
        principal: &Principal,
    ) -> Result<AccessGrant> {
        self.load_interview(id).await?;
        self.authorizer.check_access(id, principal).await
    }

    /// Move interview `id` to `next` on behalf of `principal`
    ///
    /// Checks run in a fixed order: existence, access, transition table,
    /// role gate. Only then is the status persisted, after which the
    /// interview collection and the interview's own cache key are dropped.
    pub async fn validate_and_apply_transition(
        &self,
        id: &InterviewId,
        next: InterviewStatus,
        principal: &Principal,
    ) -> Result<Transition> {
        let interview = self.load_interview(id).await?;
        self.authorizer.check_access(id, principal).await?;

        let from = interview.status;
        if let Err(err) = lifecycle::check_transition(principal.role, from, next) {
            debug!(
                interview = %id,
                identity = %principal.identity,
                %from,
                to = %next,
                "transition rejected: {}",
                err
            );
            return Err(err);
        }

        self.store.update_status(id, next).await?;
        self.invalidate_on_write(&[keys::INTERVIEWS_PREFIX]);
        self.cache.remove(&keys::interview(id));

        info!(interview = %id, identity = %principal.identity, %from, to = %next, "interview status changed");
        Ok(Transition { from, to: next })
    }

    /// Serve `key` from the cache, or load it and populate the cache
    ///
    /// `ttl` falls back to the configured default. Loader errors are returned
    /// unchanged and nothing is cached for them. When caching is disabled the
    /// loader runs every time.
    pub async fn cached_read<T, F, Fut>(&self, key: &str, ttl: Option<Duration>, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.cache.is_enabled() {
            return loader().await;
        }

        if let Some(value) = self.cache.get(key) {
            debug!(key, "cache hit");
            return Ok(serde_json::from_value(value)?);
        }

        debug!(key, "cache miss");
        let generation = self.cache.generation();
        let loaded = loader().await?;

        let ttl = ttl.unwrap_or(self.cache.config().default_ttl);
        if !self
            .cache
            .set_if_unchanged(key, serde_json::to_value(&loaded)?, ttl, generation)
        {
            debug!(key, "skipped populate, cache invalidated during load");
        }

        Ok(loaded)
    }

    /// Drop every cached entry under each of `prefixes`
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_on_write<S: AsRef<str>>(&self, prefixes: &[S]) -> usize {
        prefixes
            .iter()
            .map(|prefix| self.cache.invalidate_prefix(prefix.as_ref()))
            .sum()
    }

    /// Create an interview in the `scheduled` state (admins only)
    pub async fn create_interview(
        &self,
        new: NewInterview,
        principal: &Principal,
    ) -> Result<Interview> {
        require_admin(principal, "only admins can create interviews")?;

        let interview = Interview::scheduled(new, principal.identity.clone());
        self.store.insert_interview(interview.clone()).await?;
        self.invalidate_on_write(&[keys::INTERVIEWS_PREFIX]);

        info!(interview = %interview.id, created_by = %interview.created_by, "interview created");
        Ok(interview)
    }

    /// List interviews, newest first (admins only)
    pub async fn list_interviews(
        &self,
        filter: &InterviewFilter,
        limit: Option<u32>,
        offset: u32,
        principal: &Principal,
    ) -> Result<Vec<Interview>> {
        require_admin(principal, "only admins can list interviews")?;
        let page = self.page(limit, offset)?;

        let key = keys::interviews_list(page, filter);
        self.cached_read(&key, None, || async {
            self.store
                .list_interviews(filter, page)
                .await
                .map_err(AuthzError::from)
        })
        .await
    }

    /// Fetch one interview the principal has access to
    pub async fn get_interview(&self, id: &InterviewId, principal: &Principal) -> Result<Interview> {
        let key = keys::interview(id);
        let interview = self
            .cached_read(&key, None, || self.load_interview(id))
            .await?;

        self.authorizer.check_access(id, principal).await?;
        Ok(interview)
    }

    /// Register `identity` as a participant of interview `id` (admins only)
    pub async fn add_participant(
        &self,
        id: &InterviewId,
        identity: &str,
        participant_role: ParticipantRole,
        principal: &Principal,
    ) -> Result<Participant> {
        require_admin(principal, "only admins can add participants")?;

        let identity = identity.trim();
        if identity.is_empty() {
            return Err(AuthzError::InvalidInput(
                "participant identity must not be empty".to_string(),
            ));
        }

        self.load_interview(id).await?;

        if self.store.find_membership(id, identity).await?.is_some() {
            return Err(already_participant(identity));
        }

        let participant = Participant::new(id.clone(), identity, participant_role);
        match self.store.insert_participant(participant.clone()).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => return Err(already_participant(identity)),
            Err(err) => return Err(err.into()),
        }

        info!(interview = %id, identity, %participant_role, "participant added");
        Ok(participant)
    }

    /// Post a message into interview `id` as `principal`
    pub async fn post_message(
        &self,
        id: &InterviewId,
        content: impl Into<String>,
        principal: &Principal,
    ) -> Result<Message> {
        self.load_interview(id).await?;
        self.authorizer.check_access(id, principal).await?;

        let message = Message {
            interview_id: id.clone(),
            sender: principal.identity.clone(),
            sender_role: principal.role,
            content: content.into(),
            created_at: chrono::Utc::now(),
        };
        self.store.insert_message(message.clone()).await?;
        self.invalidate_on_write(&[keys::messages_prefix(id)]);

        debug!(interview = %id, sender = %message.sender, "message posted");
        Ok(message)
    }

    /// List messages of interview `id`, oldest first
    pub async fn list_messages(
        &self,
        id: &InterviewId,
        limit: Option<u32>,
        offset: u32,
        principal: &Principal,
    ) -> Result<Vec<Message>> {
        let page = self.page(limit, offset)?;

        self.load_interview(id).await?;
        self.authorizer.check_access(id, principal).await?;

        let key = keys::messages_list(id, page);
        self.cached_read(&key, None, || async {
            self.store
                .list_messages(id, page)
                .await
                .map_err(AuthzError::from)
        })
        .await
    }

    // Private helper methods

    async fn load_interview(&self, id: &InterviewId) -> Result<Interview> {
        self.store
            .find_interview(id)
            .await?
            .ok_or_else(AuthzError::interview_not_found)
    }

    fn page(&self, limit: Option<u32>, offset: u32) -> Result<Page> {
        Ok(Page::resolve(
            limit,
            offset,
            self.config.default_page_limit,
            self.config.max_page_limit,
        )?)
    }
}

fn require_admin(principal: &Principal, reason: &str) -> Result<()> {
    if principal.role == Role::Admin {
        Ok(())
    } else {
        debug!(identity = %principal.identity, role = %principal.role, "{}", reason);
        Err(AuthzError::permission_denied(reason))
    }
}

fn already_participant(identity: &str) -> AuthzError {
    AuthzError::Conflict(format!("{} is already a participant", identity))
}
