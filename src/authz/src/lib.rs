//! # intervue Authorization Engine
//!
//! Access-control and lifecycle authorization for interviews, with a
//! process-local read-through cache in front of the document store.
//!
//! ## Features
//!
//! - **Resource-scoped access**: admins bypass, everyone else must be a
//!   participant; denials surface as not-found
//! - **Lifecycle state machine**: `scheduled → ongoing → completed`,
//!   `scheduled → cancelled`, with a per-role gate on each edge
//! - **Read-through cache** with lazy TTL expiry and prefix invalidation,
//!   invalidated by every write before it returns
//!
//! ## Example
//!
//! ```rust
//! use intervue_authz::{EngineConfig, InMemoryInterviewStore, InterviewEngine};
//! use intervue_core::{InterviewStatus, NewInterview, ParticipantRole, Principal};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let engine = InterviewEngine::new(EngineConfig::default(), Arc::new(InMemoryInterviewStore::new()));
//! let admin = Principal::admin("admin@example.com");
//! let interviewer = Principal::interviewer("ines@example.com");
//!
//! let interview = engine
//!     .create_interview(NewInterview::new("Backend round", "backend"), &admin)
//!     .await?;
//! engine
//!     .add_participant(&interview.id, &interviewer.identity, ParticipantRole::Interviewer, &admin)
//!     .await?;
//!
//! let transition = engine
//!     .validate_and_apply_transition(&interview.id, InterviewStatus::Ongoing, &interviewer)
//!     .await?;
//! assert_eq!(transition.to, InterviewStatus::Ongoing);
//! # Ok::<(), intervue_authz::AuthzError>(())
//! # }).unwrap();
//! ```

pub mod access;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod store;

// Re-export commonly used types
pub use access::{AccessGrant, ResourceAccessAuthorizer};
pub use cache::{CacheConfig, CacheStats, ReadThroughCache};
pub use config::EngineConfig;
pub use engine::InterviewEngine;
pub use error::{AuthzError, Result};
pub use lifecycle::{check_transition, is_valid_transition, Transition};
pub use store::{InMemoryInterviewStore, InterviewStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
