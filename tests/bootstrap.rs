use callflows::{validate_document_file, App, AppConfig};
use callflows_core::{CallFlowStatus, ErrorKind, Privilege, UserContext};
use callflows_test_utils::{bad_flow_raw, default_settings, main_flow, main_flow_raw, settings_document};
use callflows_tests::config_in;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn starts_with_empty_settings_when_no_document_exists() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let app = App::bootstrap(&config).await.unwrap();

    assert!(app.config_service.all_configs().await.is_empty());
    assert!(app.config_service.all_renderers().await.is_empty());
    assert!(!config.settings_path().exists());
}

#[tokio::test]
async fn settings_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    std::fs::write(config.settings_path(), settings_document(&default_settings())).unwrap();

    let app = App::bootstrap(&config).await.unwrap();
    let mut configs = app.config_service.all_configs().await;
    configs[0].name = "voxeoUpdated".to_string();
    app.config_service.update_configs(configs.clone()).await.unwrap();

    let restarted = App::bootstrap(&config).await.unwrap();
    assert_eq!(restarted.config_service.all_configs().await, configs);
    assert_eq!(
        restarted.config_service.all_renderers().await,
        default_settings().renderers
    );
}

#[tokio::test]
async fn corrupt_settings_document_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    std::fs::write(config.settings_path(), b"{ not json").unwrap();

    assert!(App::bootstrap(&config).await.is_err());
}

#[tokio::test]
async fn wired_call_flow_service_is_usable() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::bootstrap(&config_in(dir.path())).await.unwrap();

    let created = app.call_flow_service.create(main_flow()).await.unwrap();
    assert!(created.is_persisted());
    assert_eq!(created.status, Some(CallFlowStatus::Draft));

    let found = app.call_flow_service.find_by_name("MainFlow").await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn event_logging_follows_configuration() {
    let dir = tempfile::tempdir().unwrap();

    let logged = App::bootstrap(&config_in(dir.path())).await.unwrap();
    assert!(format!("{:?}", logged.call_flow_service).contains("TracingEventPublisher"));

    let quiet = AppConfig {
        log_events: false,
        ..config_in(dir.path())
    };
    let app = App::bootstrap(&quiet).await.unwrap();
    assert!(format!("{:?}", app.call_flow_service).contains("NoopEventPublisher"));

    // Discarding events does not affect the mutation itself
    let created = app.call_flow_service.create(main_flow()).await.unwrap();
    app.call_flow_service.delete(created.id.unwrap()).await.unwrap();
}

#[tokio::test]
async fn authorized_services_check_privileges() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::bootstrap(&config_in(dir.path())).await.unwrap();

    let anonymous = UserContext::new("anonymous");
    let err = app
        .authorized_call_flows()
        .create(&anonymous, main_flow())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let admin = UserContext::new("admin").with_privilege(Privilege::MANAGE_CALLFLOWS.name());
    app.authorized_call_flows()
        .create(&admin, main_flow())
        .await
        .unwrap();
    app.authorized_configs()
        .update_renderers(&admin, default_settings().renderers)
        .await
        .unwrap();
    assert_eq!(app.config_service.all_renderers().await.len(), 2);
}

#[tokio::test]
async fn validates_document_files() {
    let dir = tempfile::tempdir().unwrap();

    let good = dir.path().join("main.json");
    std::fs::write(&good, main_flow_raw()).unwrap();
    assert!(validate_document_file(&good).await.unwrap().is_empty());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, bad_flow_raw()).unwrap();
    let violations = validate_document_file(&bad).await.unwrap();
    assert!(violations.contains_key("raw.nodes[0].templates"));

    assert!(validate_document_file(&dir.path().join("missing.json")).await.is_err());
}
