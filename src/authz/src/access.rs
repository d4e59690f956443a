//! Resource-scoped access authorizer
//!
//! Decides whether a principal may see or act on a specific interview:
//! admins bypass the check, everyone else needs a membership row.

use intervue_core::{InterviewId, ParticipantRole, Principal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{AuthzError, Result};
use crate::store::InterviewStore;

/// Why access was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessGrant {
    /// Administrative bypass, no membership consulted
    AdminBypass,

    /// Caller is a registered participant
    Participant { role: ParticipantRole },
}

/// Membership-based access check over a persistence backend
pub struct ResourceAccessAuthorizer {
    store: Arc<dyn InterviewStore>,
}

impl ResourceAccessAuthorizer {
    pub fn new(store: Arc<dyn InterviewStore>) -> Self {
        Self { store }
    }

    /// Check whether `principal` may access interview `id`
    ///
    /// Callers must have confirmed that the interview exists. A missing
    /// membership fails with [`AuthzError::NotFound`], never with a
    /// forbidden-style error.
    pub async fn check_access(&self, id: &InterviewId, principal: &Principal) -> Result<AccessGrant> {
        if principal.is_admin() {
            debug!(interview = %id, identity = %principal.identity, "access granted: admin bypass");
            return Ok(AccessGrant::AdminBypass);
        }

        match self.store.find_membership(id, &principal.identity).await? {
            Some(membership) => {
                debug!(
                    interview = %id,
                    identity = %principal.identity,
                    participant_role = %membership.participant_role,
                    "access granted: participant"
                );
                Ok(AccessGrant::Participant {
                    role: membership.participant_role,
                })
            }
            None => {
                // Reported to the caller as not-found; the real reason only goes to the log
                debug!(
                    interview = %id,
                    identity = %principal.identity,
                    role = %principal.role,
                    "access denied: no membership"
                );
                Err(AuthzError::interview_not_found())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryInterviewStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use intervue_core::{
        Interview, InterviewFilter, InterviewStatus, Message, Page, Participant, Role,
    };
    use proptest::prelude::*;

    async fn store_with_member(id: &InterviewId, identity: &str) -> Arc<InMemoryInterviewStore> {
        let store = Arc::new(InMemoryInterviewStore::new());
        store
            .insert_participant(Participant::new(id.clone(), identity, ParticipantRole::Candidate))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_participant_granted() {
        let id = InterviewId::parse("iv-1").unwrap();
        let authorizer = ResourceAccessAuthorizer::new(store_with_member(&id, "c@x.io").await);

        let grant = authorizer
            .check_access(&id, &Principal::candidate("c@x.io"))
            .await
            .unwrap();
        assert_eq!(
            grant,
            AccessGrant::Participant { role: ParticipantRole::Candidate }
        );
    }

    #[tokio::test]
    async fn test_non_participant_sees_not_found() {
        let id = InterviewId::parse("iv-1").unwrap();
        let authorizer = ResourceAccessAuthorizer::new(store_with_member(&id, "c@x.io").await);

        let err = authorizer
            .check_access(&id, &Principal::interviewer("stranger@x.io"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::NotFound(_)));
        assert_eq!(err.to_string(), AuthzError::interview_not_found().to_string());
    }

    #[tokio::test]
    async fn test_membership_is_per_interview() {
        let id = InterviewId::parse("iv-1").unwrap();
        let other = InterviewId::parse("iv-2").unwrap();
        let authorizer = ResourceAccessAuthorizer::new(store_with_member(&id, "c@x.io").await);

        assert!(authorizer
            .check_access(&other, &Principal::candidate("c@x.io"))
            .await
            .is_err());
    }

    /// Store whose every call fails
    struct FailingStore;

    #[async_trait]
    impl InterviewStore for FailingStore {
        async fn find_interview(&self, _: &InterviewId) -> StoreResult<Option<Interview>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn find_membership(&self, _: &InterviewId, _: &str) -> StoreResult<Option<Participant>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn update_status(&self, _: &InterviewId, _: InterviewStatus) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }
        async fn insert_interview(&self, _: Interview) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }
        async fn list_interviews(&self, _: &InterviewFilter, _: Page) -> StoreResult<Vec<Interview>> {
            Err(StoreError::Backend("down".into()))
        }
        async fn insert_participant(&self, _: Participant) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }
        async fn insert_message(&self, _: Message) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }
        async fn list_messages(&self, _: &InterviewId, _: Page) -> StoreResult<Vec<Message>> {
            Err(StoreError::Backend("down".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_passes_through() {
        let authorizer = ResourceAccessAuthorizer::new(Arc::new(FailingStore));
        let id = InterviewId::parse("iv-1").unwrap();

        let err = authorizer
            .check_access(&id, &Principal::candidate("c@x.io"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthzError::Persistence(StoreError::Backend(ref msg)) if msg == "down"
        ));
    }

    #[tokio::test]
    async fn test_admin_bypass_skips_store() {
        // The failing store proves no lookup happens for admins
        let authorizer = ResourceAccessAuthorizer::new(Arc::new(FailingStore));
        let id = InterviewId::parse("iv-1").unwrap();

        let grant = authorizer
            .check_access(&id, &Principal::admin("root@x.io"))
            .await
            .unwrap();
        assert_eq!(grant, AccessGrant::AdminBypass);
    }

    proptest! {
        #[test]
        fn prop_admin_always_granted(
            identity in "[a-z]{3,10}@example\\.com",
            interview in "[a-z0-9-]{1,16}",
            member in proptest::bool::ANY,
        ) {
            tokio_test::block_on(async {
                let store = Arc::new(InMemoryInterviewStore::new());
                let id = InterviewId::parse(&interview).unwrap();
                if member {
                    store
                        .insert_participant(Participant::new(id.clone(), identity.clone(), ParticipantRole::Interviewer))
                        .await
                        .unwrap();
                }
                let authorizer = ResourceAccessAuthorizer::new(store);

                let grant = authorizer.check_access(&id, &Principal::admin(identity)).await.unwrap();
                assert_eq!(grant, AccessGrant::AdminBypass);
            });
        }

        #[test]
        fn prop_non_admin_without_membership_not_found(
            identity in "[a-z]{3,10}@example\\.com",
            interview in "[a-z0-9-]{1,16}",
            role in prop::sample::select(vec![Role::Interviewer, Role::Candidate]),
        ) {
            tokio_test::block_on(async {
                let authorizer = ResourceAccessAuthorizer::new(Arc::new(InMemoryInterviewStore::new()));
                let id = InterviewId::parse(&interview).unwrap();

                let err = authorizer
                    .check_access(&id, &Principal::new(identity, role))
                    .await
                    .unwrap_err();
                assert!(matches!(err, AuthzError::NotFound(_)));
            });
        }
    }
}
