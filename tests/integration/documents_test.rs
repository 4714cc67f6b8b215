use super::common;

use common::test_server::TestServer;
use serde_json::{json, Value};

#[tokio::test]
async fn test_template_round_trip_over_http() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/templates/user-profile/load"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let coordinates = &body["data"]["fields"][0]["children"][3]["children"][2];
    assert_eq!(coordinates["key"], "coordinates");
    let lat_id = coordinates["children"][0]["id"].as_str().unwrap().to_string();

    // Give latitude an explicit value, then drop the whole address group
    let response = client
        .patch(server.url(&format!("/api/fields/{}", lat_id)))
        .json(&json!({"op": "set_value", "value": "51.5"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let sample: Value = client
        .get(server.url("/api/documents/sample"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sample["user"]["address"]["coordinates"], json!({"lat": 51.5, "lng": -74.006}));

    let address_id = body["data"]["fields"][0]["children"][3]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let body: Value = client
        .delete(server.url(&format!("/api/fields/{}", address_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["node_count"], 4);

    let schema: Value = client
        .get(server.url("/api/documents/schema"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        schema["properties"]["user"]["required"],
        json!(["name", "email", "age"])
    );
}

#[tokio::test]
async fn test_export_endpoint_saves_into_export_dir() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    client
        .put(server.url("/api/fields"))
        .json(&json!([{"key": "email", "type": "string"}]))
        .send()
        .await
        .unwrap();

    let response = client
        .post(server.url("/api/documents/schema/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let written =
        std::fs::read_to_string(server.export_dir.path().join("schema.json")).unwrap();
    let schema: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(schema["properties"]["email"]["default"], "john.doe@example.com");
    assert_eq!(schema["required"], json!(["email"]));
}
