//! Messaging and pagination integration tests

use intervue_authz::{
    AuthzError, EngineConfig, InMemoryInterviewStore, InterviewEngine, InterviewStore,
};
use intervue_core::{
    Interview, InterviewFilter, InterviewStatus, NewInterview, Page, ParticipantRole, Principal,
    Role,
};
use std::sync::Arc;

struct Room {
    engine: InterviewEngine,
    store: Arc<InMemoryInterviewStore>,
    interview: Interview,
    admin: Principal,
    interviewer: Principal,
    candidate: Principal,
}

async fn room() -> Room {
    let store = Arc::new(InMemoryInterviewStore::new());
    let engine = InterviewEngine::new(EngineConfig::default(), store.clone());
    let admin = Principal::admin("admin@example.com");
    let interviewer = Principal::interviewer("ivy@example.com");
    let candidate = Principal::candidate("carl@example.com");

    let interview = engine
        .create_interview(NewInterview::new("Systems design", "backend"), &admin)
        .await
        .unwrap();
    engine
        .add_participant(&interview.id, &interviewer.identity, ParticipantRole::Interviewer, &admin)
        .await
        .unwrap();
    engine
        .add_participant(&interview.id, &candidate.identity, ParticipantRole::Candidate, &admin)
        .await
        .unwrap();

    Room {
        engine,
        store,
        interview,
        admin,
        interviewer,
        candidate,
    }
}

#[tokio::test]
async fn test_conversation_round_trip() {
    let r = room().await;
    let id = &r.interview.id;

    r.engine.post_message(id, "Welcome", &r.interviewer).await.unwrap();
    r.engine.post_message(id, "Thanks", &r.candidate).await.unwrap();
    r.engine.post_message(id, "Observing", &r.admin).await.unwrap();

    let thread = r.engine.list_messages(id, None, 0, &r.candidate).await.unwrap();
    let contents: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Welcome", "Thanks", "Observing"]);
    assert_eq!(thread[0].sender_role, Role::Interviewer);
    assert_eq!(thread[1].sender, "carl@example.com");
    assert_eq!(thread[2].sender_role, Role::Admin);
}

#[tokio::test]
async fn test_outsider_cannot_post_or_read() {
    let r = room().await;
    let outsider = Principal::candidate("mallory@example.com");

    let err = r
        .engine
        .post_message(&r.interview.id, "hi", &outsider)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::NotFound(_)));

    let err = r
        .engine
        .list_messages(&r.interview.id, None, 0, &outsider)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::NotFound(_)));

    let stored = r
        .store
        .list_messages(&r.interview.id, Page { limit: 50, offset: 0 })
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_message_pagination() {
    let r = room().await;
    let id = &r.interview.id;
    for i in 0..5 {
        r.engine
            .post_message(id, format!("message {}", i), &r.interviewer)
            .await
            .unwrap();
    }

    let first = r.engine.list_messages(id, Some(2), 0, &r.candidate).await.unwrap();
    let second = r.engine.list_messages(id, Some(2), 2, &r.candidate).await.unwrap();
    let tail = r.engine.list_messages(id, Some(2), 4, &r.candidate).await.unwrap();
    let past_end = r.engine.list_messages(id, Some(2), 10, &r.candidate).await.unwrap();

    assert_eq!(first[0].content, "message 0");
    assert_eq!(second[0].content, "message 2");
    assert_eq!(tail.len(), 1);
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn test_page_limit_bounds() {
    let r = room().await;
    let id = &r.interview.id;

    for limit in [0, 51] {
        let err = r
            .engine
            .list_messages(id, Some(limit), 0, &r.candidate)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidInput(_)), "limit {}", limit);

        let err = r
            .engine
            .list_interviews(&InterviewFilter::default(), Some(limit), 0, &r.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::InvalidInput(_)), "limit {}", limit);
    }

    assert!(r.engine.list_messages(id, Some(50), 0, &r.candidate).await.is_ok());
}

#[tokio::test]
async fn test_custom_page_limits() {
    let store = Arc::new(InMemoryInterviewStore::new());
    let engine = InterviewEngine::new(EngineConfig::default().with_page_limits(2, 3), store);
    let admin = Principal::admin("admin@example.com");

    for title in ["a", "b", "c", "d"] {
        engine
            .create_interview(NewInterview::new(title, "backend"), &admin)
            .await
            .unwrap();
    }

    let page = engine
        .list_interviews(&InterviewFilter::default(), None, 0, &admin)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    let err = engine
        .list_interviews(&InterviewFilter::default(), Some(4), 0, &admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::InvalidInput(_)));
}

#[tokio::test]
async fn test_list_filters() {
    let r = room().await;
    let other = r
        .engine
        .create_interview(NewInterview::new("Model review", "ml"), &r.admin)
        .await
        .unwrap();
    r.engine
        .validate_and_apply_transition(&other.id, InterviewStatus::Cancelled, &r.admin)
        .await
        .unwrap();

    let ml = r
        .engine
        .list_interviews(&InterviewFilter::default().with_type("ml"), None, 0, &r.admin)
        .await
        .unwrap();
    assert_eq!(ml.len(), 1);
    assert_eq!(ml[0].id, other.id);

    let scheduled = r
        .engine
        .list_interviews(
            &InterviewFilter::default().with_status(InterviewStatus::Scheduled),
            None,
            0,
            &r.admin,
        )
        .await
        .unwrap();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].id, r.interview.id);
}

#[tokio::test]
async fn test_messages_allowed_in_any_status() {
    let r = room().await;
    let id = &r.interview.id;

    r.engine
        .validate_and_apply_transition(id, InterviewStatus::Cancelled, &r.admin)
        .await
        .unwrap();

    r.engine.post_message(id, "post-mortem", &r.interviewer).await.unwrap();
    let thread = r.engine.list_messages(id, None, 0, &r.interviewer).await.unwrap();
    assert_eq!(thread.len(), 1);
}

#[tokio::test]
async fn test_empty_participant_identity_rejected() {
    let r = room().await;

    let err = r
        .engine
        .add_participant(&r.interview.id, "   ", ParticipantRole::Candidate, &r.admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::InvalidInput(_)));
}
