#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};

use notion_board::config::AppConfig;
use notion_board::{app, AppState};

pub const API_KEY: &str = "secret_test_key";
pub const NOTION_VERSION: &str = "2022-06-28";
pub const USERS_DB: &str = "users-db";
pub const NOTIFICATION_DB: &str = "notification-db";
pub const ANON_DB: &str = "anon-db";

const TIMESTAMP: &str = "2025-01-01T00:00:00.000Z";

/// In-memory stand-in for the Notion API: pages, collections (as lists of
/// page ids) and block children, plus switches to make specific calls fail.
#[derive(Default)]
pub struct FakeState {
    pub pages: HashMap<String, Value>,
    pub collections: HashMap<String, Vec<String>>,
    pub children: HashMap<String, Vec<Value>>,
    /// Collections whose query answers 400
    pub failing_queries: HashSet<String>,
    /// `POST /databases` answers 400
    pub fail_database_create: bool,
    /// Editing an archived page answers 400, as the real API does
    pub reject_archived_edits: bool,
    /// Queries ignore filters and return every row
    pub ignore_filters: bool,
    /// "METHOD /path" for every request received
    pub requests: Vec<String>,
    /// Bodies of collection queries, in order
    pub query_bodies: Vec<Value>,
    next_id: u64,
}

impl FakeState {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

type Shared = Arc<Mutex<FakeState>>;
type FakeResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Clone)]
pub struct FakeNotion {
    state: Shared,
    pub base_url: String,
}

impl FakeNotion {
    pub async fn start() -> Result<Self> {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        let router = Router::new()
            .route("/databases", post(create_database))
            .route("/databases/:id/query", post(query_database))
            .route("/pages", post(create_page))
            .route("/pages/:id", get(retrieve_page).patch(update_page))
            .route("/blocks/:id/children", get(list_children).patch(append_children))
            .layer(middleware::from_fn_with_state(state.clone(), check_headers))
            .with_state(state.clone());

        let base_url = spawn(router).await?;
        Ok(Self { state, base_url })
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().expect("fake state poisoned");
        f(&mut state)
    }

    pub fn add_collection(&self, db_id: &str) {
        self.with(|s| {
            s.collections.entry(db_id.to_string()).or_default();
        });
    }

    /// Insert a page as a row of `db_id`, creating the collection if needed
    pub fn add_row(&self, db_id: &str, page: Value) -> String {
        let id = page["id"].as_str().expect("seeded page needs an id").to_string();
        self.with(|s| {
            s.collections.entry(db_id.to_string()).or_default().push(id.clone());
            s.pages.insert(id.clone(), page);
        });
        id
    }

    pub fn add_child(&self, parent_id: &str, block: Value) {
        self.with(|s| s.children.entry(parent_id.to_string()).or_default().push(block));
    }

    pub fn page(&self, id: &str) -> Option<Value> {
        self.with(|s| s.pages.get(id).cloned())
    }

    pub fn rows(&self, db_id: &str) -> Vec<Value> {
        self.with(|s| {
            s.collections
                .get(db_id)
                .map(|ids| ids.iter().filter_map(|id| s.pages.get(id).cloned()).collect())
                .unwrap_or_default()
        })
    }

    pub fn children_of(&self, id: &str) -> Vec<Value> {
        self.with(|s| s.children.get(id).cloned().unwrap_or_default())
    }

    pub fn requests(&self) -> Vec<String> {
        self.with(|s| s.requests.clone())
    }
}

// ---- page builders -------------------------------------------------------

pub fn title(text: &str) -> Value {
    json!({ "type": "title", "title": [{ "type": "text", "text": { "content": text }, "plain_text": text }] })
}

pub fn rich_text(text: &str) -> Value {
    json!({ "type": "rich_text", "rich_text": [{ "type": "text", "text": { "content": text }, "plain_text": text }] })
}

pub fn select(name: &str) -> Value {
    json!({ "type": "select", "select": { "id": "opt", "name": name, "color": "default" } })
}

pub fn likes(names: &[&str]) -> Value {
    let options: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    json!({ "type": "multi_select", "multi_select": options })
}

pub fn page(id: &str, properties: Value) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": TIMESTAMP,
        "last_edited_time": TIMESTAMP,
        "archived": false,
        "properties": properties
    })
}

pub fn post_page(id: &str, post_title: &str, writer: &str, date: &str) -> Value {
    page(
        id,
        json!({
            "title": title(post_title),
            "writer": select(writer),
            "date": { "type": "date", "date": { "start": date, "end": null } }
        }),
    )
}

pub fn user_page(id: &str, name: &str, login: &str, pw: &str, role: &str) -> Value {
    page(
        id,
        json!({
            "user_name": title(name),
            "ID": rich_text(login),
            "PW": rich_text(pw),
            "user_role": select(role)
        }),
    )
}

pub fn comment_page(id: &str, writer: &str, text: &str, liked_by: &[&str]) -> Value {
    page(
        id,
        json!({
            "subWriter": title(writer),
            "text": rich_text(text),
            "like": likes(liked_by)
        }),
    )
}

pub fn paragraph(id: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "paragraph",
        "paragraph": { "rich_text": [{ "type": "text", "text": { "content": text }, "plain_text": text }] }
    })
}

pub fn child_database_block(id: &str, db_title: &str) -> Value {
    json!({ "object": "block", "id": id, "type": "child_database", "child_database": { "title": db_title } })
}

// ---- fake API handlers ---------------------------------------------------

fn notion_error(status: StatusCode, code: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "object": "error", "status": status.as_u16(), "code": code, "message": message })),
    )
}

fn not_found(id: &str) -> (StatusCode, Json<Value>) {
    notion_error(
        StatusCode::NOT_FOUND,
        "object_not_found",
        &format!("Could not find object with ID: {}.", id),
    )
}

async fn check_headers(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    state.lock().expect("fake state poisoned").requests.push(line);

    // Owned copies: no borrow of the request may live across `next.run`
    let (authorization, version) = {
        let headers = request.headers();
        let owned = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (owned("authorization"), owned("notion-version"))
    };

    if authorization != Some(format!("Bearer {}", API_KEY)) {
        return notion_error(StatusCode::UNAUTHORIZED, "unauthorized", "API token is invalid.").into_response();
    }
    if version.as_deref() != Some(NOTION_VERSION) {
        return notion_error(StatusCode::BAD_REQUEST, "missing_version", "Notion-Version header failed validation.")
            .into_response();
    }

    next.run(request).await
}

async fn query_database(State(state): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>) -> FakeResult {
    let mut s = state.lock().expect("fake state poisoned");
    s.query_bodies.push(body.clone());

    if s.failing_queries.contains(&id) {
        return Err(notion_error(StatusCode::BAD_REQUEST, "validation_error", "query failed"));
    }
    let Some(ids) = s.collections.get(&id) else {
        return Err(not_found(&id));
    };

    let filter = if s.ignore_filters { None } else { body.get("filter") };
    let results: Vec<Value> = ids
        .iter()
        .filter_map(|row_id| s.pages.get(row_id))
        .filter(|p| p["archived"] != json!(true))
        .filter(|p| matches_filter(p, filter))
        .cloned()
        .collect();

    Ok(Json(json!({ "object": "list", "results": results, "has_more": false, "next_cursor": null })))
}

async fn retrieve_page(State(state): State<Shared>, Path(id): Path<String>) -> FakeResult {
    let s = state.lock().expect("fake state poisoned");
    s.pages.get(&id).cloned().map(Json).ok_or_else(|| not_found(&id))
}

async fn update_page(State(state): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>) -> FakeResult {
    let mut s = state.lock().expect("fake state poisoned");
    let reject_archived = s.reject_archived_edits;
    let Some(page) = s.pages.get_mut(&id) else {
        return Err(not_found(&id));
    };

    if reject_archived && page["archived"] == json!(true) {
        return Err(notion_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Can't edit block that is archived. You must unarchive the block before editing.",
        ));
    }
    if let Some(archived) = body.get("archived").and_then(Value::as_bool) {
        page["archived"] = json!(archived);
    }
    if let Some(props) = body.get("properties").and_then(Value::as_object) {
        for (name, value) in props {
            page["properties"][name.as_str()] = normalize_property(name, value);
        }
    }
    page["last_edited_time"] = json!("2025-01-02T00:00:00.000Z");

    Ok(Json(page.clone()))
}

async fn create_page(State(state): State<Shared>, Json(body): Json<Value>) -> FakeResult {
    let mut s = state.lock().expect("fake state poisoned");
    let db_id = body["parent"]["database_id"].as_str().unwrap_or_default().to_string();
    if !s.collections.contains_key(&db_id) {
        return Err(not_found(&db_id));
    }

    let id = s.fresh_id("page");
    let mut properties = Map::new();
    if let Some(props) = body["properties"].as_object() {
        for (name, value) in props {
            properties.insert(name.clone(), normalize_property(name, value));
        }
    }
    let created = page(&id, Value::Object(properties));

    s.pages.insert(id.clone(), created.clone());
    s.collections.entry(db_id).or_default().push(id);
    Ok(Json(created))
}

async fn create_database(State(state): State<Shared>, Json(body): Json<Value>) -> FakeResult {
    let mut s = state.lock().expect("fake state poisoned");
    if s.fail_database_create {
        return Err(notion_error(StatusCode::BAD_REQUEST, "validation_error", "database creation refused"));
    }
    let parent = body["parent"]["page_id"].as_str().unwrap_or_default().to_string();
    if !s.pages.contains_key(&parent) {
        return Err(not_found(&parent));
    }

    let id = s.fresh_id("db");
    let db_title = body["title"][0]["text"]["content"].as_str().unwrap_or_default().to_string();
    s.collections.insert(id.clone(), Vec::new());
    s.children
        .entry(parent)
        .or_default()
        .push(child_database_block(&id, &db_title));

    Ok(Json(json!({ "object": "database", "id": id, "properties": body["properties"] })))
}

async fn list_children(State(state): State<Shared>, Path(id): Path<String>) -> FakeResult {
    let s = state.lock().expect("fake state poisoned");
    if !s.pages.contains_key(&id) && !s.children.contains_key(&id) {
        return Err(not_found(&id));
    }
    let results = s.children.get(&id).cloned().unwrap_or_default();
    Ok(Json(json!({ "object": "list", "results": results, "has_more": false, "next_cursor": null })))
}

async fn append_children(State(state): State<Shared>, Path(id): Path<String>, Json(body): Json<Value>) -> FakeResult {
    let mut s = state.lock().expect("fake state poisoned");
    if !s.pages.contains_key(&id) {
        return Err(not_found(&id));
    }

    let mut appended = Vec::new();
    for block in body["children"].as_array().cloned().unwrap_or_default() {
        let mut block = block;
        block["id"] = json!(s.fresh_id("block"));
        if let Some(kind) = block["type"].as_str().map(str::to_string) {
            let fragments = block[kind.as_str()]["rich_text"].clone();
            block[kind.as_str()]["rich_text"] = with_plain_text(&fragments);
        }
        appended.push(block);
    }
    s.children.entry(id).or_default().extend(appended.iter().cloned());

    Ok(Json(json!({ "object": "list", "results": appended })))
}

/// `{kind: payload}` as sent in a write → `{id, type, kind: payload}` as read back
fn normalize_property(name: &str, value: &Value) -> Value {
    let Some((kind, payload)) = value
        .as_object()
        .and_then(|o| o.iter().find(|(k, _)| k.as_str() != "type" && k.as_str() != "id"))
    else {
        return value.clone();
    };

    let payload = match kind.as_str() {
        "title" | "rich_text" => with_plain_text(payload),
        _ => payload.clone(),
    };

    let mut out = Map::new();
    out.insert("id".into(), json!(name));
    out.insert("type".into(), json!(kind));
    out.insert(kind.clone(), payload);
    Value::Object(out)
}

fn with_plain_text(fragments: &Value) -> Value {
    let fragments = fragments.as_array().cloned().unwrap_or_default();
    Value::Array(
        fragments
            .into_iter()
            .map(|mut frag| {
                let text = frag["text"]["content"].as_str().unwrap_or_default().to_string();
                frag["plain_text"] = json!(text);
                frag
            })
            .collect(),
    )
}

fn matches_filter(page: &Value, filter: Option<&Value>) -> bool {
    let Some(clauses) = filter.and_then(|f| f.get("and")).and_then(Value::as_array) else {
        return true;
    };
    clauses.iter().all(|clause| {
        let property = clause["property"].as_str().unwrap_or_default();
        let expected = clause["rich_text"]["equals"].as_str().unwrap_or_default();
        text_of(&page["properties"][property]) == expected
    })
}

fn text_of(property: &Value) -> String {
    for key in ["title", "rich_text"] {
        if let Some(fragments) = property[key].as_array() {
            return fragments.iter().filter_map(|f| f["plain_text"].as_str()).collect();
        }
    }
    String::new()
}

// ---- application under test ----------------------------------------------

async fn spawn(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

pub struct TestServer {
    pub base_url: String,
    pub upstream: FakeNotion,
    client: reqwest::Client,
}

/// App wired to a fresh fake upstream with every collection configured
pub async fn start() -> Result<TestServer> {
    start_with(|_| {}).await
}

pub async fn start_with(configure: impl FnOnce(&mut AppConfig)) -> Result<TestServer> {
    let upstream = FakeNotion::start().await?;
    for db in [USERS_DB, NOTIFICATION_DB, ANON_DB] {
        upstream.add_collection(db);
    }

    let mut config = AppConfig::for_upstream(upstream.base_url.clone());
    config.notion.api_key = Some(API_KEY.to_string());
    config.notion.users_db = Some(USERS_DB.to_string());
    config.notion.notification_db = Some(NOTIFICATION_DB.to_string());
    config.notion.anon_db = Some(ANON_DB.to_string());
    configure(&mut config);

    let base_url = spawn(app(AppState::new(Arc::new(config)))).await?;
    Ok(TestServer {
        base_url,
        upstream,
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub async fn post_json(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.post(format!("{}{}", self.base_url, path)).send().await?;
        read(res).await
    }

    pub async fn get_json(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(format!("{}{}", self.base_url, path)).send().await?;
        read(res).await
    }

    pub async fn get_text(&self, path: &str) -> Result<(StatusCode, String)> {
        let res = self.client.get(format!("{}{}", self.base_url, path)).send().await?;
        let status = StatusCode::from_u16(res.status().as_u16())?;
        Ok((status, res.text().await?))
    }
}

async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = StatusCode::from_u16(res.status().as_u16())?;
    let body = res.json::<Value>().await.context("response was not JSON")?;
    Ok((status, body))
}
