mod common;

use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use xslack::{Api, Channel, ChannelHistory, Error, HistoryAfterOptions, MockTransport, Params};

async fn general(api: &Api, mock: &MockTransport) -> Channel {
    mock.respond(
        "channels.info",
        json!({"ok": true, "channel": {"id": "C1", "name": "general"}}),
    );
    api.channel().info("C1").await.unwrap()
}

fn fast(inclusive: bool) -> HistoryAfterOptions {
    HistoryAfterOptions {
        inclusive,
        page_delay: Duration::ZERO,
        ..HistoryAfterOptions::default()
    }
}

fn timestamps(history: &ChannelHistory) -> Vec<&str> {
    history.iter().map(|m| m.ts().unwrap()).collect()
}

#[tokio::test]
async fn test_history_after_reassembles_pages_oldest_first() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "3"}, {"ts": "2"}], "has_more": true}),
    );
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "1"}], "has_more": false}),
    );

    let history = channel.history_after_with("0", fast(true)).await.unwrap();
    assert_eq!(timestamps(&history), ["1", "2", "3"]);
    assert!(!history.has_more());

    let calls: Vec<_> = mock
        .calls()
        .into_iter()
        .filter(|c| c.method == "channels.history")
        .collect();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].params.get("channel"), Some(&json!("C1")));
    assert_eq!(calls[0].params.get("oldest"), Some(&json!("0")));
    assert_eq!(calls[0].params.get("count"), Some(&json!(1000)));
    assert_eq!(calls[0].params.get("inclusive"), Some(&json!(1)));
    assert_eq!(calls[1].params.get("inclusive"), Some(&json!(0)));
}

#[tokio::test]
async fn test_watermark_advances_to_newest_seen() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "20"}, {"ts": "10"}], "has_more": true}),
    );
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "40"}, {"ts": "30"}], "has_more": false}),
    );

    let history = channel.history_after_with("5", fast(false)).await.unwrap();
    assert_eq!(timestamps(&history), ["10", "20", "30", "40"]);

    let calls = mock.calls();
    let pages: Vec<_> = calls
        .iter()
        .filter(|c| c.method == "channels.history")
        .collect();
    assert_eq!(pages[1].params.get("oldest"), Some(&json!("20")));
    assert_eq!(pages[0].params.get("inclusive"), Some(&json!(0)));
}

#[tokio::test]
async fn test_empty_history() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [], "has_more": false}),
    );

    let history = channel.history_after("100", false).await.unwrap();
    assert!(history.is_empty());
    assert!(!history.has_more());
}

#[tokio::test]
async fn test_empty_page_with_has_more_stops() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.enqueue(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "2"}], "has_more": true}),
    );
    mock.respond(
        "channels.history",
        json!({"ok": true, "messages": [], "has_more": true}),
    );

    let history = channel.history_after_with("1", fast(false)).await.unwrap();
    assert_eq!(timestamps(&history), ["2"]);
    assert!(history.has_more());
    assert_eq!(mock.call_count("channels.history"), 2);
}

#[tokio::test]
async fn test_cancel_before_first_page() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let opts = HistoryAfterOptions {
        cancel: Some(rx),
        ..fast(false)
    };
    let err = channel.history_after_with("1", opts).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(mock.call_count("channels.history"), 0);
}

#[tokio::test]
async fn test_cancel_during_page_delay() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.respond(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "2"}], "has_more": true}),
    );
    let (tx, rx) = watch::channel(false);

    let opts = HistoryAfterOptions {
        page_delay: Duration::from_secs(60),
        cancel: Some(rx),
        ..HistoryAfterOptions::default()
    };
    let task = tokio::spawn(async move { channel.history_after_with("1", opts).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(true).unwrap();

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(mock.call_count("channels.history"), 1);
}

#[tokio::test]
async fn test_history_before_sets_newest() {
    let (api, mock) = common::plain_api();
    let channel = general(&api, &mock).await;
    mock.respond(
        "channels.history",
        json!({"ok": true, "messages": [{"ts": "9"}], "has_more": false}),
    );

    let page = channel
        .history_before("10", Params::new().with("count", 1))
        .await
        .unwrap();
    assert_eq!(page.require_array("messages").unwrap().len(), 1);

    let call = mock.calls().pop().unwrap();
    assert_eq!(call.params.get("newest"), Some(&json!("10")));
    assert_eq!(call.params.get("count"), Some(&json!(1)));
    assert_eq!(call.params.get("channel"), Some(&json!("C1")));
}
