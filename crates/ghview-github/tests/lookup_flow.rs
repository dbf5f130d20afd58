//! End-to-end lookups through `ProfileLookupFlow` against a wiremock upstream.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ghview_core::{
    ErrorKind, LookupOutcome, LookupResult, PreferenceStore, Presenter, ProfileLookupFlow,
    RepositorySection, RepositoryStatus, SortKey, StoreError, Theme,
};
use ghview_github::GithubClient;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct MemoryStore {
    history: Mutex<Vec<String>>,
}

impl PreferenceStore for MemoryStore {
    fn load_history(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.history.lock().unwrap().clone())
    }

    fn save_history(&self, history: &[String]) -> Result<(), StoreError> {
        *self.history.lock().unwrap() = history.to_vec();
        Ok(())
    }

    fn clear_history(&self) -> Result<(), StoreError> {
        self.history.lock().unwrap().clear();
        Ok(())
    }

    fn load_theme(&self) -> Result<Option<Theme>, StoreError> {
        Ok(None)
    }

    fn save_theme(&self, _theme: Theme) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Default)]
struct CapturingPresenter {
    rendered: Mutex<Vec<LookupResult>>,
}

impl Presenter for CapturingPresenter {
    fn render(&self, result: &LookupResult) {
        self.rendered.lock().unwrap().push(result.clone());
    }

    fn render_loading(&self, _loading: bool) {}

    fn render_repositories(&self, _section: &RepositorySection) {}
}

type Flow = ProfileLookupFlow<GithubClient, Arc<MemoryStore>, Arc<CapturingPresenter>>;

fn build_flow(server: &MockServer) -> (Flow, Arc<MemoryStore>, Arc<CapturingPresenter>) {
    let client = GithubClient::with_base_url(&server.uri(), "ghview-test/0.1", None, Some(5))
        .expect("client construction should not fail");
    let store = Arc::new(MemoryStore::default());
    let presenter = Arc::new(CapturingPresenter::default());
    let flow = ProfileLookupFlow::new(client, Arc::clone(&store), Arc::clone(&presenter));
    (flow, store, presenter)
}

fn user_json(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "avatar_url": format!("https://avatars.example/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "name": null,
        "bio": null,
        "blog": "example.com",
        "public_repos": 3,
        "public_gists": 0,
        "followers": 1,
        "following": 1,
        "created_at": "2015-06-01T00:00:00Z"
    })
}

fn repo_json(name: &str, language: Option<&str>) -> serde_json::Value {
    json!({
        "name": name,
        "description": null,
        "html_url": format!("https://github.com/x/{name}"),
        "language": language,
        "stargazers_count": 1,
        "forks_count": 0,
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

async fn mount_user(server: &MockServer, typed: &str, login: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{typed}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(login)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_lookup_uses_canonical_login_for_repositories() {
    let server = MockServer::start().await;
    mount_user(&server, "OCTOCAT", "octocat").await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "stars"))
        .and(query_param("per_page", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json("a", Some("JavaScript")),
            repo_json("b", Some("JavaScript")),
            repo_json("c", None),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (flow, store, presenter) = build_flow(&server);
    let outcome = flow.lookup(" OCTOCAT ", SortKey::Stars).await;

    let LookupOutcome::Completed(LookupResult::Success(view)) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(view.profile.login, "octocat");
    assert_eq!(view.section.languages.get("JavaScript"), Some(2));
    assert_eq!(view.section.languages.get("Other"), Some(1));
    assert_eq!(*store.history.lock().unwrap(), vec!["octocat"]);
    assert_eq!(presenter.rendered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_user_fails_with_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (flow, store, _) = build_flow(&server);
    let outcome = flow.lookup("no-such-user-xyz", SortKey::Stars).await;

    let LookupOutcome::Completed(result) = outcome else {
        panic!("expected a completed lookup, got {outcome:?}");
    };
    assert_eq!(result.failure_kind(), Some(ErrorKind::NotFound));
    assert!(store.history.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repository_server_error_degrades() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", "alice").await;
    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (flow, store, _) = build_flow(&server);
    let outcome = flow.lookup("alice", SortKey::Forks).await;

    let LookupOutcome::Completed(LookupResult::Success(view)) = outcome else {
        panic!("expected degraded success, got {outcome:?}");
    };
    assert!(view.section.repositories.is_empty());
    assert!(matches!(
        view.section.status,
        RepositoryStatus::Degraded { .. }
    ));
    assert_eq!(*store.history.lock().unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn newer_lookup_wins_over_slow_repository_response() {
    let server = MockServer::start().await;
    mount_user(&server, "alice", "alice").await;
    mount_user(&server, "bob", "bob").await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([repo_json("slow", Some("Go"))]))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/bob/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (flow, store, presenter) = build_flow(&server);

    let first = flow.lookup("alice", SortKey::Stars);
    let second = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        flow.lookup("bob", SortKey::Stars).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, LookupOutcome::Superseded);
    assert!(matches!(
        second,
        LookupOutcome::Completed(LookupResult::Success(_))
    ));

    let rendered = presenter.rendered.lock().unwrap();
    assert_eq!(rendered.len(), 1);
    let LookupResult::Success(view) = &rendered[0] else {
        panic!("expected the rendered result to be a success");
    };
    assert_eq!(view.profile.login, "bob");
    assert_eq!(flow.current_subject().as_deref(), Some("bob"));
    assert_eq!(*store.history.lock().unwrap(), vec!["bob"]);
}
