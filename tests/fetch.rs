//! End-to-end fetch tests against a stub archive server
//!
//! These tests exercise the full pipeline: task enumeration, the worker
//! pool, outcome classification, result aggregation, and the mirrored
//! directory tree.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use abide_fetcher::app::{
    ArchiveClient, CatalogConfig, ClientConfig, FetchErrorKind, FetchExecutor, FetchOutcome,
    FetcherConfig, FileCatalog, ResultStore, RunReport, SubjectId, TaskSet, WorkerConfig,
    WorkerPool,
};
use abide_fetcher::errors::ConfigError;

fn subjects() -> Vec<SubjectId> {
    vec![
        SubjectId::new("A"),
        SubjectId::new("no_filename"),
        SubjectId::new("B"),
    ]
}

fn small_catalog() -> FileCatalog {
    FileCatalog::from_entries(vec!["x.txt".to_string(), "y/z.txt".to_string()])
}

/// Mount the §8 end-to-end scenario: 200 for everything except A/y/z.txt
async fn mount_scenario(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/A/x.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a-x"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/A/y/z.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/B/x.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("b-x"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/B/y/z.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("b-z"))
        .mount(server)
        .await;
}

async fn run_pool(
    base_url: &str,
    local_root: &Path,
    skip_existing: bool,
    worker_count: usize,
) -> Arc<ResultStore> {
    let task_set = TaskSet::enumerate(&subjects(), &small_catalog(), local_root).unwrap();

    let client = Arc::new(ArchiveClient::new(base_url, ClientConfig::default()).unwrap());
    let executor = Arc::new(FetchExecutor::new(
        client,
        FetcherConfig {
            local_root: local_root.to_path_buf(),
            skip_existing,
        },
    ));
    let store = Arc::new(ResultStore::new());
    let pool = WorkerPool::new(
        WorkerConfig { worker_count },
        executor,
        Arc::clone(&store),
    )
    .unwrap();

    pool.run(task_set.into_tasks(), None).await;
    store
}

#[tokio::test]
async fn end_to_end_outcome_classification() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let root = TempDir::new().unwrap();
    let store = run_pool(&server.uri(), root.path(), true, 4).await;
    let snapshot = store.snapshot().await;

    // Sentinel subject contributes zero tasks
    assert_eq!(snapshot.len(), 4);

    let counts = snapshot.counts();
    assert_eq!(counts.success, 3);
    assert_eq!(counts.skipped, 0);
    assert_eq!(counts.errors, 1);

    let failed_url = format!("{}/A/y/z.txt", server.uri());
    assert_eq!(
        snapshot.get(&failed_url),
        Some(&FetchOutcome::error(FetchErrorKind::HttpStatus, "404"))
    );
}

#[tokio::test]
async fn end_to_end_mirrors_remote_tree() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let root = TempDir::new().unwrap();
    run_pool(&server.uri(), root.path(), true, 4).await;

    assert_eq!(
        std::fs::read_to_string(root.path().join("A/x.txt")).unwrap(),
        "a-x"
    );
    assert_eq!(
        std::fs::read_to_string(root.path().join("B/x.txt")).unwrap(),
        "b-x"
    );
    assert_eq!(
        std::fs::read_to_string(root.path().join("B/y/z.txt")).unwrap(),
        "b-z"
    );
    // The failed fetch leaves no mirror file behind, and the sentinel
    // subject gets no directory at all
    assert!(!root.path().join("A/y/z.txt").exists());
    assert!(!root.path().join("no_filename").exists());
}

#[tokio::test]
async fn second_run_skips_all_previously_downloaded_files() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data"))
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();

    let first = run_pool(&server.uri(), root.path(), true, 4).await;
    assert_eq!(first.snapshot().await.counts().success, 4);

    let second = run_pool(&server.uri(), root.path(), true, 4).await;
    let counts = second.snapshot().await.counts();
    assert_eq!(counts.skipped, 4);
    assert_eq!(counts.success, 0);
    assert_eq!(counts.errors, 0);
}

#[tokio::test]
async fn parallelism_does_not_change_outcome_distribution() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let root_serial = TempDir::new().unwrap();
    let root_parallel = TempDir::new().unwrap();

    let serial = run_pool(&server.uri(), root_serial.path(), true, 1).await;
    let parallel = run_pool(&server.uri(), root_parallel.path(), true, 16).await;

    assert_eq!(
        serial.snapshot().await.counts(),
        parallel.snapshot().await.counts()
    );
}

#[tokio::test]
async fn missing_local_root_aborts_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = TaskSet::enumerate(
        &subjects(),
        &small_catalog(),
        Path::new("/nonexistent/mirror/root"),
    );
    assert!(matches!(result, Err(ConfigError::LocalRootMissing { .. })));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn report_reflects_run_outcome() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let root = TempDir::new().unwrap();
    let store = run_pool(&server.uri(), root.path(), true, 4).await;
    let snapshot = store.snapshot().await;

    let report = RunReport::new(&snapshot, 4, 1, 4, std::time::Duration::from_secs(1));
    assert!(!report.is_clean());

    let rendered = report.render();
    assert!(rendered.contains("handled 4 URLs in total"));
    assert!(rendered.contains("3 downloaded, 0 existed, 1 failed, 1 subject entries"));
    assert!(rendered.contains(&format!("E: {}/A/y/z.txt (HTTP 404)", server.uri())));
}

/// Running against the full default catalog exercises nested subdirectories
/// (surf, stats, label, mri, mri/transforms) for one subject.
#[tokio::test]
async fn default_catalog_mirrors_nested_layout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data"))
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();
    let catalog = FileCatalog::build(&CatalogConfig::default());
    let task_set = TaskSet::enumerate(&[SubjectId::new("Pitt_0050003")], &catalog, root.path())
        .unwrap();
    assert_eq!(task_set.len(), 121);

    let client = Arc::new(ArchiveClient::new(&server.uri(), ClientConfig::default()).unwrap());
    let executor = Arc::new(FetchExecutor::new(
        client,
        FetcherConfig {
            local_root: root.path().to_path_buf(),
            skip_existing: true,
        },
    ));
    let store = Arc::new(ResultStore::new());
    let pool = WorkerPool::new(WorkerConfig { worker_count: 8 }, executor, Arc::clone(&store))
        .unwrap();
    pool.run(task_set.into_tasks(), None).await;

    assert_eq!(store.snapshot().await.counts().success, 121);
    for relative in [
        "surf/lh.white",
        "surf/rh.thickness.fwhm25.fsaverage.mgh",
        "stats/aseg.stats",
        "label/rh.cortex.label",
        "mri/T1.mgz",
        "mri/transforms/talairach.xfm",
    ] {
        let file = root.path().join("Pitt_0050003").join(relative);
        assert!(file.is_file(), "missing mirror file {}", file.display());
    }
}
