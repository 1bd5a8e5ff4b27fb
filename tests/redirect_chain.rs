//! End-to-end tests: map, path file and store layers behind a real listener.

use std::sync::Arc;
use std::time::Duration;

use urlshort::config::{AppConfig, LayerConfig, LayerKind};
use urlshort::lifecycle::assemble_chain;
use urlshort::routing::{LookupSource, MapSource, PathEntry, PathMapping};
use urlshort::store::{initialize_store, PathStore, StoreSource};
use urlshort::ResolverChain;

mod common;

#[tokio::test]
async fn test_end_to_end_chain() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(PathStore::open(dir.path().join("paths.db"), Duration::from_secs(1)).unwrap());
    initialize_store(
        &store,
        "PathToURL",
        &[PathEntry::new("/gophercises", "https://example.org")],
    )
    .unwrap();

    let map: Arc<dyn LookupSource> = Arc::new(MapSource::new(
        "map",
        PathMapping::from_entries(vec![PathEntry::new("/bolt", "https://example.com/bolt")]),
    ));
    let file: Arc<dyn LookupSource> = Arc::new(MapSource::new("yaml:empty", PathMapping::default()));
    let persistent: Arc<dyn LookupSource> = Arc::new(StoreSource::new(store, "PathToURL").unwrap());

    let server = common::start_server(ResolverChain::new(vec![map, file, persistent])).await;
    let client = common::client();

    let res = client.get(server.url("/bolt")).send().await.expect("server unreachable");
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "https://example.com/bolt");

    let res = client.get(server.url("/gophercises")).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "https://example.org");

    let res = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello, world!\n");

    server.stop().await;
}

#[tokio::test]
async fn test_map_layer_shadows_store() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.store.path = dir.path().join("paths.db");
    config.layers = vec![
        LayerConfig::map(vec![PathEntry::new("/bolt", "https://map.example/bolt")]),
        LayerConfig::store(),
    ];

    let chain = assemble_chain(&config).unwrap();
    let server = common::start_server(chain).await;
    let client = common::client();

    // The default seed also maps /bolt, but the map layer comes first.
    let res = client.get(server.url("/bolt")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://map.example/bolt");

    let res = client.get(server.url("/gophercises")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://gophercises.com");

    server.stop().await;
}

#[tokio::test]
async fn test_path_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("paths.yml");
    let json = dir.path().join("paths.json");
    std::fs::write(
        &yaml,
        "- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n- path: /dup\n  url: https://yaml.example\n",
    )
    .unwrap();
    std::fs::write(
        &json,
        r#"[{"path": "/dup", "url": "https://json.example/1"}, {"path": "/dup", "url": "https://json.example/2"}, {"path": "/json", "url": "https://www.json.org"}]"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.layers = vec![
        LayerConfig::file(LayerKind::Json, &json),
        LayerConfig::file(LayerKind::Yaml, &yaml),
    ];

    let server = common::start_server(assemble_chain(&config).unwrap()).await;
    let client = common::client();

    let res = client.get(server.url("/dup")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://json.example/2");

    let res = client.get(server.url("/urlshort")).send().await.unwrap();
    assert_eq!(res.headers()["location"], "https://github.com/gophercises/urlshort");

    server.stop().await;
}

#[tokio::test]
async fn test_store_updates_visible_without_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(PathStore::open(dir.path().join("paths.db"), Duration::from_secs(1)).unwrap());
    initialize_store(&store, "PathToURL", &[]).unwrap();

    let source: Arc<dyn LookupSource> = Arc::new(StoreSource::new(store.clone(), "PathToURL").unwrap());
    let server = common::start_server(ResolverChain::new(vec![source])).await;
    let client = common::client();

    let res = client.get(server.url("/new")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    store.set("PathToURL", "/new", "https://new.example").unwrap();
    let res = client.get(server.url("/new")).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "https://new.example");

    server.stop().await;
}
