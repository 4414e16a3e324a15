#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;
use studio_sync_lib::config::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STUDIO: &str = "42";
pub const PROJECTS_PATH: &str = "/studios/42/projects";

pub fn test_config(server: &MockServer, public_dir: &Path) -> Config {
    Config {
        studio_id: STUDIO.to_string(),
        api_base: format!("{}/studios", server.uri()),
        public_dir: public_dir.to_path_buf(),
        ..Config::default()
    }
}

/// `count` records with ids starting at `first_id`.
pub fn page(first_id: u64, count: u64) -> Value {
    let items: Vec<Value> = (first_id..first_id + count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Project {}", id),
                "author": {"id": 7, "username": format!("user{}", id)},
                "image": format!("https://cdn.example/{}.png", id),
            })
        })
        .collect();
    Value::Array(items)
}

pub async fn mount_page(server: &MockServer, offset: usize, body: Value) {
    Mock::given(method("GET"))
        .and(path(PROJECTS_PATH))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, offset: usize, status: u16) {
    Mock::given(method("GET"))
        .and(path(PROJECTS_PATH))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
