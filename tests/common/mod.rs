/// Common test utilities and helpers for ForkSentry tests
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use forksentry::CheckerOptions;

pub const TOKEN: &str = "t0ken";
pub const AUTH_HEADER: &str = "token t0ken";

/// Options pointing the checker at the standard test fork
pub fn test_options() -> CheckerOptions {
    CheckerOptions {
        repository: "forker/repo".to_string(),
        src_branch: "main".to_string(),
        tgt_branch: "main".to_string(),
        token: TOKEN.to_string(),
        ..Default::default()
    }
}

/// Resolve payload whose parent URL points back at the mock server
pub fn resolve_payload(server: &MockServer) -> Value {
    json!({
        "parent": { "url": format!("{}/repos/upstream/repo", server.uri()) },
        "owner": { "login": "forker" }
    })
}

/// Mount the resolve endpoint with the given response
pub async fn mount_resolve(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/repos/forker/repo"))
        .and(header("Authorization", AUTH_HEADER))
        .and(header("Accept", "application/vnd.github+json"))
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a successful resolve pointing at the mock server's upstream repo
pub async fn mount_resolve_ok(server: &MockServer) {
    let payload = resolve_payload(server);
    mount_resolve(server, ResponseTemplate::new(200).set_body_json(payload)).await;
}

/// Mount the compare endpoint reporting the fork is `behind_by` commits back
pub async fn mount_compare(server: &MockServer, behind_by: u64) {
    Mock::given(method("GET"))
        .and(path("/repos/upstream/repo/compare/main...forker:main"))
        .and(header("Authorization", AUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "behind_by": behind_by,
            "ahead_by": 0,
            "status": if behind_by == 0 { "identical" } else { "behind" }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Assert that the merge-upstream endpoint is never called
pub async fn expect_no_sync(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/repos/forker/repo/merge-upstream"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
