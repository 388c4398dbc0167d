//! HTTP request handlers for the server.
//!
//! Implements the upload pipeline, session views, per-item detail fetches,
//! and owner-scoped deletion using axum. Every data route is authenticated
//! with a bearer token and scoped to the token's user identity.

use crate::auth::{AuthError, AuthManager};
use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use docent_domain::traits::{CompletionProvider, SessionStore};
use docent_domain::{ItemKind, NewSession, Session, SessionId};
use docent_extractor::{ExtractionRequest, Extractor, ExtractorConfig, ExtractorError};
use docent_explorer::detail_request;
use docent_ingest::IngestError;
use docent_store::{content_fingerprint, SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Shared application state
pub struct AppState<P> {
    /// Bearer-token issuance and validation
    pub auth: Arc<AuthManager>,
    /// Session persistence
    pub store: Arc<Mutex<SqliteStore>>,
    /// Completion provider shared by extraction and detail fetches
    pub provider: Arc<P>,
    /// Extraction limits
    pub extractor_config: ExtractorConfig,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            store: Arc::clone(&self.store),
            provider: Arc::clone(&self.provider),
            extractor_config: self.extractor_config.clone(),
        }
    }
}

/// Token issuance request
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// User identifier to issue a token for
    pub user_id: String,
}

/// Token issuance response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: String,
}

/// An item as it appears on the wire
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemView {
    /// Item id
    pub id: String,
    /// Topic or question text
    pub label: String,
}

/// A full session view
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    /// Session id
    pub id: String,
    /// Document title
    pub title: String,
    /// Extracted source text, used as context for detail fetches
    pub source_text: String,
    /// Extracted topics
    pub topics: Vec<ItemView>,
    /// Extracted questions
    pub questions: Vec<ItemView>,
    /// Creation time (Unix seconds)
    pub created_at: u64,
}

impl SessionView {
    fn from_session(session: &Session) -> Self {
        let views = |items: &[docent_domain::Item]| -> Vec<ItemView> {
            items
                .iter()
                .map(|item| ItemView {
                    id: item.id.to_string(),
                    label: item.label.clone(),
                })
                .collect()
        };

        Self {
            id: session.id.to_string(),
            title: session.title.clone(),
            source_text: session.source_text.clone(),
            topics: views(&session.topics),
            questions: views(&session.questions),
            created_at: session.created_at,
        }
    }
}

/// A session as it appears in a listing
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummaryView {
    /// Session id
    pub id: String,
    /// Document title
    pub title: String,
    /// Whether topic extraction has run
    pub has_topics: bool,
    /// Whether question extraction has run
    pub has_questions: bool,
    /// Creation time (Unix seconds)
    pub created_at: u64,
}

/// Detail fetch request
#[derive(Debug, Deserialize)]
pub struct DetailRequest {
    /// "topic" or "question"
    pub kind: String,
    /// The item label to fetch a detail for
    pub label: String,
    /// The session's source text
    pub context: String,
}

/// Detail fetch response
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    /// The generated detail text
    pub answer: String,
}

/// Regeneration request
#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    /// "summary" or "questions"
    pub mode: String,
}

/// Account deletion response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Number of sessions removed
    pub deleted: usize,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// Authentication failure
    Auth(AuthError),
    /// Document ingestion failure
    Ingest(IngestError),
    /// Extraction failure
    Extract(ExtractorError),
    /// Persistence failure
    Store(StoreError),
    /// Detail completion failure
    Completion(String),
    /// Malformed request
    BadRequest(String),
    /// Session not found for this owner
    NotFound,
    /// Internal server error
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Auth(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            ApiError::Ingest(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Extract(e) => {
                let status = match &e {
                    ExtractorError::TextTooLong(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
                    ExtractorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    ExtractorError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
            ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Completion(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Session not found".to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        ApiError::Ingest(e)
    }
}

impl From<ExtractorError> for ApiError {
    fn from(e: ExtractorError) -> Self {
        ApiError::Extract(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

/// Resolve the bearer token in the request headers to a user identity
fn authenticate<P>(state: &AppState<P>, headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Auth(AuthError::InvalidToken))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Auth(AuthError::InvalidToken))?;

    let claims = state.auth.validate_token(token)?;
    Ok(claims.user_id)
}

/// Lock the shared store
fn lock_store<P>(state: &AppState<P>) -> Result<MutexGuard<'_, SqliteStore>, ApiError> {
    state
        .store
        .lock()
        .map_err(|_| ApiError::Internal("Store lock poisoned".to_string()))
}

/// Parse a mode or kind string from the wire
fn parse_kind(value: &str) -> Result<ItemKind, ApiError> {
    match value {
        "summary" | "topics" | "topic" => Ok(ItemKind::Topic),
        "questions" | "question" => Ok(ItemKind::Question),
        other => Err(ApiError::BadRequest(format!("Unknown mode: {}", other))),
    }
}

/// Parse a session id path segment
fn parse_session_id(id: &str) -> Result<SessionId, ApiError> {
    SessionId::from_string(id).map_err(ApiError::BadRequest)
}

/// POST /auth/token - Issue a bearer token for a user
///
/// This is the seam where an external identity provider plugs in; deployments
/// that front the server with real authentication issue tokens there instead.
async fn issue_token<P>(
    State(state): State<AppState<P>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    if request.user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("user_id is required".to_string()));
    }

    let token = state.auth.issue_token(&request.user_id)?;
    Ok(Json(TokenResponse { token }))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /documents - Upload a PDF and run extraction
///
/// Multipart form with a `file` part (the PDF) and an optional `mode` part
/// ("summary" or "questions", defaulting to "summary"). The extracted text is
/// fingerprinted together with the owner identity, so re-uploading the same
/// document updates the existing session instead of creating a new one.
async fn upload_document<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut mode: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("document.pdf").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("mode") => {
                mode = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read mode field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (filename, content_type, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
    let kind = parse_kind(mode.as_deref().unwrap_or("summary"))?;

    let text = docent_ingest::extract_text(&bytes, &content_type)?;

    info!(
        "Processing '{}' for {} ({} chars, {} mode)",
        filename,
        owner_id,
        text.len(),
        kind
    );

    let extractor = Extractor::new(Arc::clone(&state.provider), state.extractor_config.clone());
    let outcome = extractor
        .extract(ExtractionRequest {
            text: text.clone(),
            kind,
        })
        .await?;

    let labels: Vec<String> = outcome.items.iter().map(|i| i.label.clone()).collect();
    let fingerprint = content_fingerprint(&owner_id, &text);

    let new_session = NewSession {
        owner_id: owner_id.clone(),
        title: filename,
        source_text: text,
        topics: (kind == ItemKind::Topic).then(|| labels.clone()),
        questions: (kind == ItemKind::Question).then_some(labels),
        fingerprint,
    };

    let session = {
        let mut store = lock_store(&state)?;
        let id = store.upsert_session(new_session)?;
        store.get_session(id, &owner_id)?
    }
    .ok_or_else(|| ApiError::Internal("Stored session not found".to_string()))?;

    Ok(Json(SessionView::from_session(&session)))
}

/// GET /sessions - List the caller's sessions, newest first
async fn list_sessions<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SessionSummaryView>>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;

    let summaries = lock_store(&state)?.list_sessions(&owner_id)?;

    let views = summaries
        .into_iter()
        .map(|s| SessionSummaryView {
            id: s.id.to_string(),
            title: s.title,
            has_topics: s.has_topics,
            has_questions: s.has_questions,
            created_at: s.created_at,
        })
        .collect();

    Ok(Json(views))
}

/// GET /sessions/{id} - Fetch one session with its items
async fn show_session<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;
    let id = parse_session_id(&id)?;

    let session = lock_store(&state)?
        .get_session(id, &owner_id)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(SessionView::from_session(&session)))
}

/// POST /sessions/{id}/regenerate - Re-run extraction from stored text
///
/// Re-extracts the requested mode against the session's stored source text
/// and replaces that mode's item list; the other mode's list is untouched.
async fn regenerate_session<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<SessionView>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;
    let id = parse_session_id(&id)?;
    let kind = parse_kind(&request.mode)?;

    // Snapshot what extraction needs, then release the lock across the await
    let (title, source_text) = {
        let store = lock_store(&state)?;
        let session = store.get_session(id, &owner_id)?.ok_or(ApiError::NotFound)?;
        (session.title, session.source_text)
    };

    let extractor = Extractor::new(Arc::clone(&state.provider), state.extractor_config.clone());
    let outcome = extractor
        .extract(ExtractionRequest {
            text: source_text.clone(),
            kind,
        })
        .await?;

    let labels: Vec<String> = outcome.items.iter().map(|i| i.label.clone()).collect();
    let fingerprint = content_fingerprint(&owner_id, &source_text);

    let new_session = NewSession {
        owner_id: owner_id.clone(),
        title,
        source_text,
        topics: (kind == ItemKind::Topic).then(|| labels.clone()),
        questions: (kind == ItemKind::Question).then_some(labels),
        fingerprint,
    };

    let session = {
        let mut store = lock_store(&state)?;
        let id = store.upsert_session(new_session)?;
        store.get_session(id, &owner_id)?
    }
    .ok_or_else(|| ApiError::Internal("Stored session not found".to_string()))?;

    Ok(Json(SessionView::from_session(&session)))
}

/// POST /details - Fetch the detail text for one item
///
/// Stateless: the caller supplies the label and the session's source text.
/// Failures come back as an error message scoped to this one request; they
/// never affect stored sessions or sibling items.
async fn item_detail<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Json(request): Json<DetailRequest>,
) -> Result<Json<DetailResponse>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    authenticate(&state, &headers)?;

    if request.label.trim().is_empty() || request.context.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "label and context are required".to_string(),
        ));
    }

    let kind = parse_kind(&request.kind)?;
    let completion_request = detail_request(kind, &request.label, &request.context);

    let answer = state
        .provider
        .complete(&completion_request)
        .await
        .map_err(|e| ApiError::Completion(e.to_string()))?;

    Ok(Json(DetailResponse { answer }))
}

/// DELETE /sessions/{id} - Delete one session
async fn remove_session<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;
    let id = parse_session_id(&id)?;

    let removed = lock_store(&state)?.delete_session(id, &owner_id)?;
    if !removed {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /account - Delete every session the caller owns
async fn remove_account<P>(
    State(state): State<AppState<P>>,
    headers: HeaderMap,
) -> Result<Json<DeletedResponse>, ApiError>
where
    P: CompletionProvider + Send + Sync + 'static,
{
    let owner_id = authenticate(&state, &headers)?;

    let deleted = lock_store(&state)?.delete_owner(&owner_id)?;

    info!("Deleted {} sessions for {}", deleted, owner_id);

    Ok(Json(DeletedResponse { deleted }))
}

/// Create the axum router with all routes
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: CompletionProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/token", post(issue_token::<P>))
        .route("/health", get(health_check))
        .route("/documents", post(upload_document::<P>))
        .route("/sessions", get(list_sessions::<P>))
        .route(
            "/sessions/:id",
            get(show_session::<P>).delete(remove_session::<P>),
        )
        .route("/sessions/:id/regenerate", post(regenerate_session::<P>))
        .route("/details", post(item_detail::<P>))
        .route("/account", delete(remove_account::<P>))
        .with_state(state)
}
