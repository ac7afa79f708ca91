use article_portal::session::{
    FieldUpdate, MAX_ANONYMOUS_VIEWS, SessionSnapshot, SessionUpdate, ViewGate,
    gate_anonymous_view,
};
use std::sync::Arc;
use tower_sessions::{MemoryStore, Session};

// --- Pure Policy Tests ---
// The paywall gate is a pure function over the session snapshot, so these
// tests need no HTTP machinery at all.

#[test]
fn anonymous_first_view_initializes_and_increments() {
    let snapshot = SessionSnapshot::default();

    let (gate, update) = gate_anonymous_view(&snapshot);

    assert_eq!(gate, ViewGate::Granted);
    assert_eq!(update.page_views, FieldUpdate::Set(1));
    assert_eq!(update.user_id, FieldUpdate::Keep);
}

#[test]
fn anonymous_views_granted_up_to_the_limit() {
    for prior in 0..MAX_ANONYMOUS_VIEWS {
        let snapshot = SessionSnapshot {
            user_id: None,
            page_views: Some(prior),
        };

        let (gate, update) = gate_anonymous_view(&snapshot);

        assert_eq!(gate, ViewGate::Granted, "view {} should pass", prior + 1);
        assert_eq!(update.page_views, FieldUpdate::Set(prior + 1));
    }
}

#[test]
fn anonymous_view_past_the_limit_is_denied_but_still_counted() {
    let snapshot = SessionSnapshot {
        user_id: None,
        page_views: Some(MAX_ANONYMOUS_VIEWS),
    };

    let (gate, update) = gate_anonymous_view(&snapshot);

    assert_eq!(gate, ViewGate::LimitReached);
    // The counter keeps rising above the threshold; only the comparison gates access.
    assert_eq!(update.page_views, FieldUpdate::Set(MAX_ANONYMOUS_VIEWS + 1));
}

#[test]
fn blocking_is_sticky_and_unbounded() {
    // Far past the limit: still denied, counter still advancing.
    let snapshot = SessionSnapshot {
        user_id: None,
        page_views: Some(40),
    };

    let (gate, update) = gate_anonymous_view(&snapshot);

    assert_eq!(gate, ViewGate::LimitReached);
    assert_eq!(update.page_views, FieldUpdate::Set(41));
}

#[test]
fn authenticated_sessions_bypass_the_gate_without_mutation() {
    // Even a session that exhausted its anonymous allowance reads freely once
    // logged in, and the counter must not move.
    let snapshot = SessionSnapshot {
        user_id: Some(7),
        page_views: Some(99),
    };

    let (gate, update) = gate_anonymous_view(&snapshot);

    assert_eq!(gate, ViewGate::Granted);
    assert_eq!(update, SessionUpdate::none());
}

#[test]
fn logout_update_preserves_the_view_counter() {
    let update = SessionUpdate::logout();
    assert_eq!(update.user_id, FieldUpdate::Clear);
    assert_eq!(update.page_views, FieldUpdate::Keep);
}

#[test]
fn reset_update_clears_both_fields() {
    let update = SessionUpdate::reset();
    assert_eq!(update.user_id, FieldUpdate::Clear);
    assert_eq!(update.page_views, FieldUpdate::Clear);
}

// --- Apply Tests (real tower-sessions Session over a MemoryStore) ---

fn fresh_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

#[tokio::test]
async fn apply_roundtrips_through_a_real_session() {
    let session = fresh_session();

    SessionUpdate::login(42).apply(&session).await.unwrap();
    let snapshot = SessionSnapshot::load(&session).await.unwrap();
    assert_eq!(snapshot.user_id, Some(42));
    assert_eq!(snapshot.page_views, None);

    // Logout drops the identity but leaves page_views alone.
    SessionUpdate {
        user_id: FieldUpdate::Keep,
        page_views: FieldUpdate::Set(2),
    }
    .apply(&session)
    .await
    .unwrap();
    SessionUpdate::logout().apply(&session).await.unwrap();

    let snapshot = SessionSnapshot::load(&session).await.unwrap();
    assert_eq!(snapshot.user_id, None);
    assert_eq!(snapshot.page_views, Some(2));

    // Full reset removes everything.
    SessionUpdate::reset().apply(&session).await.unwrap();
    let snapshot = SessionSnapshot::load(&session).await.unwrap();
    assert_eq!(snapshot, SessionSnapshot::default());
}

#[tokio::test]
async fn apply_none_is_a_no_op() {
    let session = fresh_session();

    SessionUpdate::login(5).apply(&session).await.unwrap();
    SessionUpdate::none().apply(&session).await.unwrap();

    let snapshot = SessionSnapshot::load(&session).await.unwrap();
    assert_eq!(snapshot.user_id, Some(5));
}
