use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DayResponse {
    date: String,
    tracked: bool,
    metrics: DayMetrics,
    progress: serde_json::Value,
    is_shared: bool,
}

#[derive(Debug, Deserialize)]
struct DayMetrics {
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    meals: Vec<MealEntry>,
}

#[derive(Debug, Deserialize)]
struct MealEntry {
    name: String,
    calories: f64,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "nutrition_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/day/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_nutrition_tracker"))
        .env("PORT", port.to_string())
        .env("NUTRITION_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_today(client: &Client, base_url: &str) -> DayResponse {
    client
        .get(format!("{base_url}/api/day/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_meal_updates_today_totals() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/day/{}/meals", server.base_url, before.date))
        .json(&serde_json::json!({
            "name": "Lunch",
            "calories": "600",
            "protein": "30",
            "carbs": "70",
            "fat": "20"
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = fetch_today(&client, &server.base_url).await;
    assert!(after.tracked);
    assert_eq!(after.metrics.calories, before.metrics.calories + 600.0);
    assert_eq!(after.metrics.protein, before.metrics.protein + 30.0);
    assert_eq!(after.metrics.carbs, before.metrics.carbs + 70.0);
    assert_eq!(after.metrics.fat, before.metrics.fat + 20.0);
    assert_eq!(after.metrics.meals.len(), before.metrics.meals.len() + 1);
    let added = after.metrics.meals.last().unwrap();
    assert_eq!(added.name, "Lunch");
    assert_eq!(added.calories, 600.0);
}

#[tokio::test]
async fn http_rejects_meal_without_name() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = fetch_today(&client, &server.base_url).await.date;
    let response = client
        .post(format!("{}/api/day/{today}/meals", server.base_url))
        .json(&serde_json::json!({ "name": "", "calories": "600" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_goals_drive_progress_band() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/goals", server.base_url))
        .json(&serde_json::json!({
            "calories": 2000.0,
            "protein": 150.0,
            "carbs": 200.0,
            "fat": 65.0,
            "water": 2000.0,
            "sleep": 8.0
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let today = fetch_today(&client, &server.base_url).await.date;
    let response = client
        .put(format!("{}/api/day/{today}", server.base_url))
        .json(&serde_json::json!({
            "calories": 1900.0,
            "protein": 0.0,
            "carbs": 0.0,
            "fat": 0.0,
            "water": 0.0,
            "sleep": 0.0
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let day = fetch_today(&client, &server.base_url).await;
    assert_eq!(day.metrics.calories, 1900.0);
    let calories = &day.progress["calories"];
    assert_eq!(calories["kind"], "toward");
    assert_eq!(calories["band"], "near");
    assert_eq!(calories["percent"], 95.0);
}

#[tokio::test]
async fn http_share_then_coach_sees_grouped_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let login = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "anna@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(login.status().is_success());

    // coach endpoint is gated on the session role
    let forbidden = client
        .get(format!("{}/api/coach/clients", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), reqwest::StatusCode::FORBIDDEN);

    let today = fetch_today(&client, &server.base_url).await.date;
    client
        .put(format!("{}/api/day/{today}", server.base_url))
        .json(&serde_json::json!({
            "calories": 1500.0,
            "protein": 90.0,
            "carbs": 120.0,
            "fat": 40.0,
            "water": 1800.0,
            "sleep": 7.5
        }))
        .send()
        .await
        .unwrap();

    let shared = client
        .post(format!("{}/api/share", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(shared.status().is_success());
    assert!(fetch_today(&client, &server.base_url).await.is_shared);

    let again = client
        .post(format!("{}/api/share", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), reqwest::StatusCode::CONFLICT);

    let login = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "coach@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(login.status().is_success());

    let groups: serde_json::Value = client
        .get(format!("{}/api/coach/clients", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let group = groups
        .as_array()
        .unwrap()
        .iter()
        .find(|group| group["date"] == today)
        .expect("today's group");
    let names: Vec<&str> = group["snapshots"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|snap| snap["client_name"].as_str())
        .collect();
    assert!(names.contains(&"anna"));
}

#[tokio::test]
async fn http_snapshot_keeps_pre_edit_totals() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let login = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "ben@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(login.status().is_success());

    let today = fetch_today(&client, &server.base_url).await.date;
    client
        .put(format!("{}/api/day/{today}", server.base_url))
        .json(&serde_json::json!({
            "calories": 1500.0,
            "protein": 90.0,
            "carbs": 120.0,
            "fat": 40.0,
            "water": 1800.0,
            "sleep": 7.5
        }))
        .send()
        .await
        .unwrap();

    let shared = client
        .post(format!("{}/api/share", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(shared.status().is_success());

    // edit the live day after sharing; the snapshot must keep the old totals
    client
        .put(format!("{}/api/day/{today}", server.base_url))
        .json(&serde_json::json!({
            "calories": 900.0,
            "protein": 50.0,
            "carbs": 80.0,
            "fat": 25.0,
            "water": 1000.0,
            "sleep": 6.0
        }))
        .send()
        .await
        .unwrap();
    let edited = fetch_today(&client, &server.base_url).await;
    assert_eq!(edited.metrics.calories, 900.0);

    let login = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "coach@example.com", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(login.status().is_success());

    let groups: serde_json::Value = client
        .get(format!("{}/api/coach/clients", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let snapshot = groups
        .as_array()
        .unwrap()
        .iter()
        .find(|group| group["date"] == today)
        .expect("today's group")["snapshots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|snap| snap["client_name"] == "ben")
        .expect("ben's snapshot");
    assert_eq!(snapshot["metrics"]["calories"], 1500.0);
    assert_eq!(snapshot["metrics"]["protein"], 90.0);
    assert_eq!(snapshot["metrics"]["water"], 1800.0);
}

#[tokio::test]
async fn http_login_requires_email_and_password() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}
