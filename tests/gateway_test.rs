//! Tests for SessionGateway
//!
//! Exercise the gateway against recording fakes of the chat service and the
//! local store.

mod common;

use common::{stored, Call, InMemoryStore, RecordingChatService};
use futures_util::StreamExt;
use live_room_gateway::session::{GatewayError, SessionGateway};
use live_room_gateway::store::{Participant, RoomSummary, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn gateway(chat: &Arc<RecordingChatService>, store: InMemoryStore) -> SessionGateway {
    SessionGateway::new(chat.clone(), Arc::new(store), Handle::current())
}

fn participant(id: &str) -> Participant {
    Participant::new(id, format!("token-{}", id)).with_extra("name", id.to_uppercase())
}

#[tokio::test]
async fn test_disconnect_without_session_is_noop() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    gateway.disconnect(&participant("thor"));

    assert_eq!(chat.calls(), vec![Call::CurrentUser]);
    assert_eq!(chat.disconnect_count(), 0);
}

#[tokio::test]
async fn test_disconnect_leaves_other_users_session_alone() {
    let chat = Arc::new(RecordingChatService::new().with_session("loki"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    gateway.disconnect(&participant("thor"));

    assert_eq!(chat.disconnect_count(), 0);
    assert_eq!(chat.session_user_id(), Some("loki".to_string()));
}

#[tokio::test]
async fn test_disconnect_tears_down_own_session() {
    let chat = Arc::new(RecordingChatService::new().with_session("thor"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    gateway.disconnect(&participant("thor"));

    assert_eq!(chat.disconnect_count(), 1);
    assert_eq!(chat.session_user_id(), None);
}

#[tokio::test]
async fn test_connect_guards_before_connecting_without_session() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let _: Vec<_> = gateway.connect(participant("thor")).collect().await;

    assert_eq!(
        chat.calls(),
        vec![Call::CurrentUser, Call::Connect("thor".to_string())]
    );
}

#[tokio::test]
async fn test_connect_guards_before_connecting_same_user() {
    let chat = Arc::new(RecordingChatService::new().with_session("thor"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let _: Vec<_> = gateway.connect(participant("thor")).collect().await;

    assert_eq!(
        chat.calls(),
        vec![
            Call::CurrentUser,
            Call::Disconnect,
            Call::Connect("thor".to_string())
        ]
    );
}

#[tokio::test]
async fn test_connect_guards_before_connecting_different_user() {
    let chat = Arc::new(RecordingChatService::new().with_session("loki"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let _: Vec<_> = gateway.connect(participant("thor")).collect().await;

    // The guard looks but does not tear down someone else's session;
    // the chat service replaces it on connect.
    assert_eq!(
        chat.calls(),
        vec![Call::CurrentUser, Call::Connect("thor".to_string())]
    );
    assert_eq!(chat.session_user_id(), Some("thor".to_string()));
}

#[tokio::test]
async fn test_connect_success_yields_exactly_one_value() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let emitted: Vec<_> = gateway.connect(participant("thor")).collect().await;

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].connection_id, "conn-thor");
    assert_eq!(emitted[0].user.id, "thor");
    assert_eq!(emitted[0].user.extra_data["name"], "THOR");
}

#[tokio::test]
async fn test_connect_failure_yields_no_value() {
    let chat = Arc::new(RecordingChatService::new().failing());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let emitted: Vec<_> = gateway.connect(participant("thor")).collect().await;

    assert!(emitted.is_empty());
    assert_eq!(chat.session_user_id(), None);
}

#[tokio::test]
async fn test_connect_with_empty_token_never_reaches_backend() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let emitted: Vec<_> = gateway.connect(Participant::new("thor", "")).collect().await;

    assert!(emitted.is_empty());
    assert_eq!(chat.calls(), vec![Call::CurrentUser]);
}

#[tokio::test]
async fn test_connect_with_empty_token_still_runs_guard() {
    let chat = Arc::new(RecordingChatService::new().with_session("thor"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let emitted: Vec<_> = gateway.connect(Participant::new("thor", "")).collect().await;

    assert!(emitted.is_empty());
    assert_eq!(chat.calls(), vec![Call::CurrentUser, Call::Disconnect]);
    assert_eq!(chat.session_user_id(), None);
}

#[tokio::test]
async fn test_connect_with_empty_id_skips_guard() {
    let chat = Arc::new(RecordingChatService::new().with_session("thor"));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let emitted: Vec<_> = gateway.connect(Participant::new("", "token")).collect().await;

    assert!(emitted.is_empty());
    assert!(chat.calls().is_empty());
    assert_eq!(chat.session_user_id(), Some("thor".to_string()));
}

#[tokio::test]
async fn test_try_connect_reports_failure_reason() {
    let chat = Arc::new(RecordingChatService::new().failing());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let result = gateway.try_connect(participant("thor")).await;
    assert!(matches!(result, Err(GatewayError::Connect(_))));

    let result = gateway.try_connect(Participant::new("", "token")).await;
    assert!(matches!(result, Err(GatewayError::InvalidParticipant(_))));
}

#[tokio::test]
async fn test_try_connect_success() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let connected = gateway.try_connect(participant("thor")).await.unwrap();

    assert_eq!(connected.user.id, "thor");
    assert_eq!(gateway.current_user().map(|u| u.id), Some("thor".to_string()));
}

#[tokio::test]
async fn test_dropping_connect_stream_cancels_attempt() {
    let chat = Arc::new(RecordingChatService::new().with_connect_delay(Duration::from_millis(200)));
    let gateway = gateway(&chat, InMemoryStore::new(vec![]));

    let stream = gateway.connect(participant("thor"));
    // Let the task reach the backend call before cancelling
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(stream);
    tokio::time::sleep(Duration::from_millis(400)).await;

    assert!(chat.calls().contains(&Call::Connect("thor".to_string())));
    assert_eq!(chat.session_user_id(), None);
}

#[tokio::test]
async fn test_list_room_summaries_excludes_caller_and_keeps_order() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(
        &chat,
        InMemoryStore::new(vec![stored("1"), stored("2"), stored("3")]),
    );

    let emitted: Vec<_> = gateway
        .list_room_summaries(&participant("1"))
        .collect()
        .await;

    assert_eq!(emitted.len(), 1);
    let rooms = emitted.into_iter().next().unwrap().unwrap();
    assert_eq!(
        rooms,
        vec![stored("2").room_summary(), stored("3").room_summary()]
    );
    assert!(chat.calls().is_empty());
}

#[tokio::test]
async fn test_list_room_summaries_only_caller_yields_empty_list() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::new(vec![stored("1")]));

    let emitted: Vec<Result<Vec<RoomSummary>, StoreError>> = gateway
        .list_room_summaries(&participant("1"))
        .collect()
        .await;

    assert_eq!(emitted.len(), 1);
    assert!(emitted[0].as_ref().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_room_summaries_surfaces_store_failure() {
    let chat = Arc::new(RecordingChatService::new());
    let gateway = gateway(&chat, InMemoryStore::failing());

    let emitted: Vec<_> = gateway
        .list_room_summaries(&participant("1"))
        .collect()
        .await;

    assert_eq!(emitted.len(), 1);
    assert!(matches!(emitted[0], Err(StoreError::InvalidData(_))));
}
