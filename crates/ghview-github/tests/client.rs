//! Integration tests for `GithubClient` using wiremock HTTP mocks.

use ghview_core::{FetchError, ProfileSource, SortKey};
use ghview_github::{GithubClient, GithubError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GithubClient {
    GithubClient::with_base_url(base_url, "ghview-test/0.1", None, Some(5))
        .expect("client construction should not fail")
}

fn octocat_json() -> serde_json::Value {
    json!({
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "html_url": "https://github.com/octocat",
        "name": "The Octocat",
        "company": "@github",
        "blog": "",
        "location": "San Francisco",
        "email": null,
        "hireable": null,
        "bio": null,
        "twitter_username": null,
        "public_repos": 8,
        "public_gists": 8,
        "followers": 9000,
        "following": 9,
        "created_at": "2011-01-25T18:44:36Z"
    })
}

fn repos_json() -> serde_json::Value {
    json!([
        {
            "name": "Spoon-Knife",
            "description": "This repo is for demonstration purposes only.",
            "html_url": "https://github.com/octocat/Spoon-Knife",
            "language": "HTML",
            "stargazers_count": 12000,
            "forks_count": 140000,
            "updated_at": "2024-05-01T12:00:00Z"
        },
        {
            "name": "hello-world",
            "description": null,
            "html_url": "https://github.com/octocat/hello-world",
            "language": null,
            "stargazers_count": 2500,
            "forks_count": 2300,
            "updated_at": "not a date"
        }
    ])
}

#[tokio::test]
async fn fetch_user_returns_parsed_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/Octocat"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let user = client.fetch_user("Octocat").await.expect("should parse user");

    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.blog.as_deref(), Some(""));
    assert_eq!(user.hireable, None);
    assert_eq!(user.followers, 9000);
}

#[tokio::test]
async fn profile_source_maps_user_into_domain() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat_json()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = ProfileSource::fetch_user(&client, "octocat")
        .await
        .expect("should map user");

    assert!(!profile.hireable);
    assert!(profile.created_at.is_some());
    assert_eq!(profile.public_gists, 8);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost-user-404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_user("ghost-user-404").await.unwrap_err();
    assert!(matches!(err, GithubError::NotFound { .. }), "got {err:?}");

    let fetch = ProfileSource::fetch_user(&client, "ghost-user-404")
        .await
        .unwrap_err();
    assert_eq!(fetch, FetchError::NotFound);
}

#[tokio::test]
async fn forbidden_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = ProfileSource::fetch_user(&client, "octocat")
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::RateLimited);
}

#[tokio::test]
async fn server_error_surfaces_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_user("octocat").await.unwrap_err();
    assert!(
        matches!(err, GithubError::UnexpectedStatus { status: 500, .. }),
        "got {err:?}"
    );
    assert_eq!(
        FetchError::from(err),
        FetchError::Upstream("Internal Server Error".to_owned())
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch_user("octocat").await.unwrap_err();
    assert!(matches!(err, GithubError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn connection_failure_is_upstream_error() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1");
    let err = ProfileSource::fetch_user(&client, "octocat")
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Upstream(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_repositories_sends_sort_direction_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "stars"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let repos = ProfileSource::fetch_repositories(&client, "octocat", SortKey::Stars, 6)
        .await
        .expect("should parse repositories");

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "Spoon-Knife");
    assert_eq!(repos[0].stargazers_count, 12000);
    assert!(repos[0].updated_at.is_some());
    assert!(repos[1].language.is_none());
    assert!(repos[1].updated_at.is_none(), "bad timestamps become None");
}

#[tokio::test]
async fn fetch_repositories_forks_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "forks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let repos = client
        .fetch_repositories("octocat", SortKey::Forks, 6)
        .await
        .expect("empty list should parse");
    assert!(repos.is_empty());
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer ghp_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        GithubClient::with_base_url(&server.uri(), "ghview-test/0.1", Some("ghp_test"), None)
            .expect("client construction should not fail");
    client.fetch_user("octocat").await.expect("should authenticate");
}
