#![allow(dead_code)]

use axum::Router;
use careers_portal::{
    config::{Config, LogFormat},
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use url::Url;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });
    Url::parse(&format!("http://{}", addr)).expect("backend url")
}

/// A base URL nothing is listening on.
pub async fn unreachable_backend() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{}", addr)).expect("backend url")
}

pub fn app_state(api_url: Url) -> AppState {
    AppState::new(&Config {
        api_url,
        http_timeout_secs: 5,
        page_size: 10,
        log_format: LogFormat::Text,
    })
    .expect("app state")
}

pub fn vacancy_json(job_id: &str, title: &str, day: u32) -> JsonValue {
    json!({
        "_id": format!("oid-{}", job_id),
        "jobId": job_id,
        "jobTitle": title,
        "description": format!("{} role", title),
        "qualification": "B.Tech or MCA",
        "industry": { "_id": "IND1", "name": "Information Technology" },
        "location": { "city": "Noida", "state": "Uttar Pradesh", "isRemote": false },
        "employmentType": "Full-time",
        "experienceLevel": "0-2 years",
        "salary": { "min": 50000, "max": 80000, "isNegotiable": true },
        "skills": ["Rust", "SQL"],
        "createdAt": format!("2024-03-{:02}T09:00:00Z", day),
        "applicationDeadline": "2024-04-01T00:00:00Z",
        "isPromoted": false,
        "isActive": true
    })
}
