use ogshare::domain::repositories::SessionRepository;
use ogshare::domain::routing::MetadataPolicy;
use ogshare::infrastructure::database::Database;
use ogshare::infrastructure::repositories::sessions::SqlSessionRepository;

use crate::helpers::{get_metadata, spawn_app_with_database};

#[tokio::test]
async fn mappings_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("ogshare.db").display());

    {
        let app = spawn_app_with_database(&database_url, MetadataPolicy::SessionEndpoint).await;
        get_metadata(&app, "/share?qv=X&ssid=Y").await;
    }

    // Opening again re-runs the (idempotent) schema setup.
    let database = Database::connect(&database_url)
        .await
        .expect("Failed to reopen database");
    let repo = SqlSessionRepository::new(database.clone_pool());

    assert_eq!(
        repo.get("Y").await.expect("lookup failed").as_deref(),
        Some("X")
    );
}

#[tokio::test]
async fn restarted_server_resolves_stored_session() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", dir.path().join("ogshare.db").display());

    {
        let app = spawn_app_with_database(&database_url, MetadataPolicy::SessionEndpoint).await;
        get_metadata(&app, "/share?ssid=Y&qv=X").await;
    }

    let app = spawn_app_with_database(&database_url, MetadataPolicy::SessionEndpoint).await;
    let (metadata, _) = get_metadata(&app, "/session?ssid=Y").await;

    assert_eq!(
        metadata.meta_refresh,
        Some(app.page_url("/share?qv=X&ssid=Y"))
    );
}
