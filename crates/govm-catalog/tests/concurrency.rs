use std::sync::Arc;
use std::time::Duration;

use govm_catalog::{ManualClock, ReleaseCatalog};
use govm_fetch::MockHttpClient;

const URL: &str = "https://go.example/dl/?mode=json";
const CATALOG: &str = r#"[{"version": "go1.21.0", "stable": true, "files": []}]"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_fetches_share_one_refresh() {
    let client = MockHttpClient::new();
    client.serve(URL, CATALOG).delay(URL, Duration::from_millis(50));
    let catalog = Arc::new(ReleaseCatalog::new(client.clone(), URL, Duration::from_secs(60)));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.fetch().await.map(|r| r.len()) })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), 1);
    }
    assert_eq!(client.request_count(URL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clear_and_fetch_interleave() {
    let client = MockHttpClient::new();
    client.serve(URL, CATALOG);
    let catalog = Arc::new(ReleaseCatalog::new(client.clone(), URL, Duration::from_secs(60)).with_clock(ManualClock::new()));

    let mut tasks = Vec::new();
    for i in 0..32 {
        let catalog = Arc::clone(&catalog);
        tasks.push(tokio::spawn(async move {
            if i % 4 == 0 {
                catalog.clear().await;
            } else {
                catalog.fetch().await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let requests = client.request_count(URL);
    assert!((1..=32).contains(&requests), "{requests}");

    catalog.fetch().await.unwrap();
    assert!(catalog.cached().await.is_some());
}
