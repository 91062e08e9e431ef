use catalog_client::{CatalogClient, ClientConfig, Route, Session};
use catalog_mock::{MockState, spawn};
use std::sync::Arc;

struct Harness {
    state: Arc<MockState>,
    client: CatalogClient,
    dir: tempfile::TempDir,
}

async fn harness(collection: &str) -> Harness {
    let state = Arc::new(MockState::seeded("admin", "secret"));
    let addr = spawn(state.clone()).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig::new(format!("http://{addr}"))
        .with_collection(collection)
        .with_token_path(dir.path().join("session.json"));
    let client = CatalogClient::from_config(&config).unwrap();
    Harness {
        state,
        client,
        dir,
    }
}

#[tokio::test]
async fn login_stores_token_and_shows_list() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert_eq!(panel.route(), &Route::Login);

    assert!(panel.login("  admin ", "secret").await);
    assert_eq!(panel.route(), &Route::List);
    assert_eq!(panel.items().len(), 3);

    let token = h.client.admin.session().token().unwrap();
    let list_request = h
        .state
        .journal()
        .into_iter()
        .find(|r| r.method == "GET" && r.path == "/api/admin/planes")
        .unwrap();
    assert_eq!(list_request.authorization, Some(format!("Bearer {token}")));

    // the token outlives this process
    let reopened = Session::file(h.dir.path().join("session.json"));
    assert_eq!(reopened.token(), Some(token));
}

#[tokio::test]
async fn wrong_password_keeps_login_view() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();

    assert!(!panel.login("admin", "nope").await);
    assert_eq!(panel.route(), &Route::Login);
    assert_eq!(panel.error(), Some("Credenciales inválidas"));
    assert!(!h.client.admin.session().is_authenticated());
}

#[tokio::test]
async fn logout_clears_token() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);

    panel.logout();
    assert_eq!(panel.route(), &Route::Login);
    assert!(h.client.admin.session().token().is_none());
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);
    h.state.clear_journal();

    let mut asked = 0;
    let mut decline = |_: &str| {
        asked += 1;
        false
    };
    assert!(!panel.delete("p1", &mut decline).await);
    assert_eq!(asked, 1);
    assert!(h.state.journal().is_empty());
    assert_eq!(panel.items().len(), 3);
}

#[tokio::test]
async fn confirmed_delete_sends_one_delete_and_refetches() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);
    h.state.clear_journal();

    let mut accept = |_: &str| true;
    assert!(panel.delete("p1", &mut accept).await);

    let journal = h.state.journal();
    assert_eq!(journal.len(), 2);
    assert_eq!(h.state.count("DELETE", "/api/admin/planes/p1"), 1);
    assert_eq!(h.state.count("GET", "/api/admin/planes"), 1);
    assert_eq!(journal[0].method, "DELETE");
    assert_eq!(panel.items().len(), 2);
}

#[tokio::test]
async fn rejected_token_returns_to_login() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);

    h.state.revoke_tokens();
    assert!(!panel.load().await);
    assert_eq!(panel.route(), &Route::Login);
    assert_eq!(panel.error(), Some("No autorizado"));
    // items from the last successful load stay
    assert_eq!(panel.items().len(), 3);
}

#[tokio::test]
async fn missing_required_field_is_caught_before_sending() {
    let h = harness("vehiculos").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);
    h.state.clear_journal();

    panel.new_item();
    panel.form_mut().set("marca", "Ford");
    assert!(!panel.save().await);
    assert!(panel.error().unwrap().contains("Modelo"));
    assert_eq!(panel.route(), &Route::Form(None));
    assert!(h.state.journal().is_empty());
}

#[tokio::test]
async fn create_and_edit_round_trip() {
    let h = harness("vehiculos").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);

    panel.new_item();
    let form = panel.form_mut();
    form.set("marca", " Ford ");
    form.set("modelo", "Transit");
    form.set("precio", "");
    form.set("anio", "2020");
    form.set("caracteristicas", "Rampa, Cortinas");
    form.add_uploaded(["/uploads/a.jpg", "/uploads/b.jpg"]);
    assert!(panel.save().await);
    assert_eq!(panel.route(), &Route::List);
    assert_eq!(panel.items().len(), 4);

    let created = panel
        .items()
        .iter()
        .find(|i| i.text("modelo").as_deref() == Some("Transit"))
        .unwrap()
        .clone();
    assert_eq!(created.text("marca").as_deref(), Some("Ford"));
    assert_eq!(created.number("anio"), Some(2020.0));
    assert!(created.attr("precio").unwrap().is_null());
    assert_eq!(created.list("caracteristicas"), vec!["Rampa", "Cortinas"]);
    assert_eq!(created.cover_path(), Some("/uploads/a.jpg"));

    assert!(panel.edit(&created.id).await);
    assert_eq!(panel.route(), &Route::Form(Some(created.id.clone())));
    assert_eq!(panel.form().get("modelo"), "Transit");
    panel.form_mut().set("modelo", "Transit Custom");
    panel.form_mut().set_primary("/uploads/b.jpg");
    assert!(panel.save().await);

    let stored = h.state.find("vehiculos", &created.id).unwrap();
    assert_eq!(stored["modelo"], "Transit Custom");
    assert_eq!(stored["fotoPrincipal"], "/uploads/b.jpg");
    assert_eq!(h.state.count("PUT", &format!("/api/admin/vehiculos/{}", created.id)), 1);
}

#[tokio::test]
async fn upload_adds_photos_to_form() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    assert!(panel.login("admin", "secret").await);

    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("frente.jpg");
    let second = dir.path().join("lado.png");
    std::fs::write(&first, b"jpeg").unwrap();
    std::fs::write(&second, b"png").unwrap();

    panel.new_item();
    assert!(panel.upload(&[first, second]).await);
    let form = panel.form();
    assert_eq!(form.gallery().len(), 2);
    assert!(form.primary_photo().ends_with("-frente.jpg"));
    assert_eq!(h.state.count("POST", "/api/upload/multiple"), 1);
}

#[tokio::test]
async fn upload_without_login_is_refused_locally() {
    let h = harness("planes").await;
    let mut panel = h.client.admin_panel();
    h.state.clear_journal();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.jpg");
    std::fs::write(&file, b"x").unwrap();

    assert!(!panel.upload(&[file]).await);
    assert_eq!(panel.route(), &Route::Login);
    assert!(h.state.journal().is_empty());
}
