//! Integration tests for login state across page loads.

use funky_teens_integration_tests::{load_page, login, raw_store};
use funky_teens_storefront::models::keys;
use funky_teens_storefront::{Effect, Region, UiEvent};

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_login_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(login("riya", "secret"));
    page.shutdown();

    let page = load_page(dir.path());
    assert!(page.sessions().is_logged_in());
    assert_eq!(
        page.sessions().current_user().unwrap().username.as_str(),
        "riya"
    );

    let nav = page.renderer().region(&page, Region::NavAuth).unwrap();
    assert!(nav.contains("Logout (riya)"));
}

#[test]
fn test_logout_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(login("riya", "secret"));
    page.dispatch(UiEvent::LogoutClicked);

    let page = load_page(dir.path());
    assert!(!page.sessions().is_logged_in());
}

#[test]
fn test_stored_record_uses_wire_format_without_password() {
    let dir = tempfile::tempdir().unwrap();

    let mut page = load_page(dir.path());
    page.dispatch(login("riya", "hunter2"));

    let raw = raw_store(dir.path())
        .get_item(keys::SESSION)
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["isLoggedIn"], true);
    assert_eq!(value["currentUser"]["username"], "riya");
    assert!(value["currentUser"]["loginTime"].is_string());
    assert!(!raw.contains("hunter2"));
}

#[test]
fn test_session_written_elsewhere_is_read() {
    let dir = tempfile::tempdir().unwrap();
    raw_store(dir.path())
        .set_item(
            keys::SESSION,
            r#"{"isLoggedIn":true,"currentUser":{"username":"sam","loginTime":"2024-05-01T10:00:00.000Z"}}"#,
        )
        .unwrap();

    let page = load_page(dir.path());
    assert_eq!(
        page.sessions().current_user().unwrap().username.as_str(),
        "sam"
    );
}

#[test]
fn test_corrupt_session_loads_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    raw_store(dir.path())
        .set_item(keys::SESSION, "{not json")
        .unwrap();

    let mut page = load_page(dir.path());
    assert!(!page.sessions().is_logged_in());

    let effects = page.dispatch(UiEvent::PageLoaded {
        path: "/".to_string(),
    });
    assert!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::ShowLoginPopupAfter(_)))
    );
}

// =============================================================================
// Popup Flow Tests
// =============================================================================

#[test]
fn test_home_page_popup_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut page = load_page(dir.path());

    page.dispatch(UiEvent::PageLoaded {
        path: "/index.html".to_string(),
    });
    page.dispatch(UiEvent::LoginPopupTimerFired);
    assert!(page.is_login_popup_open());

    page.dispatch(login("riya", "secret"));
    assert!(!page.is_login_popup_open());
    page.shutdown();

    // Logged-in users are not prompted again
    let mut page = load_page(dir.path());
    let effects = page.dispatch(UiEvent::PageLoaded {
        path: "/index.html".to_string(),
    });
    assert!(
        !effects
            .iter()
            .any(|e| matches!(e, Effect::ShowLoginPopupAfter(_)))
    );
}
