//! Shared builders for catalog tests.

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

use super::types::{Attribute, CategoryTag, EntityRecord, Measurements};
use crate::environment::CatalogConfig;

pub fn record(id: u32, name: &str, tags: &[&str]) -> EntityRecord {
    EntityRecord {
        id,
        name: name.to_string(),
        category_tags: tags.iter().map(|t| t.parse::<CategoryTag>().unwrap()).collect(),
        measurements: Measurements {
            primary: 10,
            secondary: 100,
        },
        attributes: vec![Attribute {
            name: "hp".to_string(),
            value: 45,
        }],
        image_ref: format!("https://img.example/{}.png", id),
    }
}

pub fn entity_body(id: u32, name: &str, tags: &[&str]) -> String {
    let types: Vec<_> = tags
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": format!("https://x/type/{}/", t)}}))
        .collect();
    json!({
        "id": id,
        "name": name,
        "height": 10,
        "weight": 100,
        "types": types,
        "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}}],
        "sprites": {
            "front_default": null,
            "other": {"official-artwork": {"front_default": format!("https://img.example/{}.png", id)}}
        }
    })
    .to_string()
}

pub fn config_for(server: &ServerGuard) -> CatalogConfig {
    CatalogConfig::default().with_base_url(&server.url()).unwrap()
}

/// Mocks `GET /pokemon/{key}`, expecting exactly `hits` requests.
pub async fn mock_entity(
    server: &mut ServerGuard,
    key: &str,
    id: u32,
    name: &str,
    tags: &[&str],
    hits: usize,
) -> Mock {
    entity_mock(server, key, id, name, tags)
        .expect(hits)
        .create_async()
        .await
}

/// Mocks `GET /pokemon/{key}` without any expectation on how often it is hit.
pub async fn serve_entity(
    server: &mut ServerGuard,
    key: &str,
    id: u32,
    name: &str,
    tags: &[&str],
) -> Mock {
    entity_mock(server, key, id, name, tags).create_async().await
}

fn entity_mock(server: &mut ServerGuard, key: &str, id: u32, name: &str, tags: &[&str]) -> Mock {
    server
        .mock("GET", format!("/pokemon/{}", key).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(entity_body(id, name, tags))
}

/// Mocks `GET /pokemon?limit=..&offset=..` returning the given names.
pub async fn mock_index(
    server: &mut ServerGuard,
    limit: u32,
    offset: u32,
    names: &[&str],
) -> Mock {
    let base = server.url();
    let results: Vec<_> = names
        .iter()
        .map(|n| json!({"name": n, "url": format!("{}/pokemon/{}/", base, n)}))
        .collect();
    server
        .mock("GET", "/pokemon")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), limit.to_string()),
            Matcher::UrlEncoded("offset".into(), offset.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"count": 1025, "results": results}).to_string())
        .expect(1)
        .create_async()
        .await
}

/// Mocks `GET /type/{tag}` listing the given member ids in order.
pub async fn mock_category(server: &mut ServerGuard, tag: &str, ids: &[u32]) -> Mock {
    let base = server.url();
    let members: Vec<_> = ids
        .iter()
        .map(|id| json!({"slot": 1, "pokemon": {"name": format!("p{}", id), "url": format!("{}/pokemon/{}/", base, id)}}))
        .collect();
    server
        .mock("GET", format!("/type/{}", tag).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"id": 1, "name": tag, "pokemon": members}).to_string())
        .create_async()
        .await
}
