//! 编辑中继单元测试。

use std::sync::Arc;

use domain::DocId;

use crate::{
    clock::SystemClock,
    error::ApplicationError,
    services::test_support::{CapturingBroadcaster, FailingBroadcaster},
    CollaborationRelay, CollaborationRelayDependencies, EditRequest,
};

fn edit(doc_id: &str, content: &str, sender: &str) -> EditRequest {
    EditRequest {
        doc_id: DocId::parse(doc_id).unwrap(),
        content: content.to_owned(),
        sender: sender.to_owned(),
    }
}

#[tokio::test]
async fn relays_verbatim_with_server_timestamp() {
    let broadcaster = Arc::new(CapturingBroadcaster::new());
    let relay = CollaborationRelay::new(CollaborationRelayDependencies {
        clock: Arc::new(SystemClock),
        broadcaster: broadcaster.clone(),
    });

    let before = time::OffsetDateTime::now_utc();
    let stamped = relay.handle_edit(edit("ABC123", "hi", "u1")).await.unwrap();
    let after = time::OffsetDateTime::now_utc();

    assert_eq!(stamped.doc_id.as_str(), "ABC123");
    assert_eq!(stamped.content, "hi");
    assert_eq!(stamped.sender, "u1");
    // 时间戳落在调用窗口内
    assert!(stamped.timestamp >= before && stamped.timestamp <= after);

    let published = broadcaster.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].doc_id.as_str(), "ABC123");
    assert_eq!(published[0].message, stamped);
}

#[tokio::test]
async fn concurrent_senders_are_relayed_independently() {
    let broadcaster = Arc::new(CapturingBroadcaster::new());
    let relay = CollaborationRelay::new(CollaborationRelayDependencies {
        clock: Arc::new(SystemClock),
        broadcaster: broadcaster.clone(),
    });

    relay
        .handle_edit(edit("ABC123", "version from u1", "u1"))
        .await
        .unwrap();
    relay
        .handle_edit(edit("ABC123", "version from u2", "u2"))
        .await
        .unwrap();

    // 两条广播各自原样送出，内容不做任何合并
    let contents: Vec<String> = broadcaster
        .published()
        .into_iter()
        .map(|b| b.message.content)
        .collect();
    assert_eq!(
        contents,
        vec!["version from u1".to_owned(), "version from u2".to_owned()]
    );
}

#[tokio::test]
async fn broadcast_failure_surfaces_as_error() {
    let relay = CollaborationRelay::new(CollaborationRelayDependencies {
        clock: Arc::new(SystemClock),
        broadcaster: Arc::new(FailingBroadcaster),
    });

    let err = relay.handle_edit(edit("ABC123", "hi", "u1")).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Broadcast(_)));
}
