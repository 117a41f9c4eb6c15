use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

pub mod logging;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "linkedinURL", default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub is_favorite: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub email: String,
    pub note: Option<String>,
    #[serde(rename = "linkedinURL")]
    pub linkedin_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl CandidateRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
        {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                "firstName, lastName and email are required",
            ));
        }
        if !self.email.contains('@') {
            return Err(ApiError::new(StatusCode::BAD_REQUEST, "email is invalid"));
        }
        Ok(())
    }

    /// Overwrite every editable field of `candidate`.
    fn apply(self, candidate: &mut Candidate) {
        candidate.email = self.email;
        candidate.note = self.note;
        candidate.linkedin_url = self.linkedin_url;
        candidate.first_name = self.first_name;
        candidate.last_name = self.last_name;
        candidate.phone = self.phone;
    }
}

/// Error payload sent with every error raised by the candidate routes,
/// including auth failures and rejected JSON bodies.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found(id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("candidate {id} not found"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, message = %self.message, "request failed");
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

pub type Db = Arc<RwLock<HashMap<String, Candidate>>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Arc<str>,
}

/// Router accepting `Bearer {token}` on every route, with an empty store.
pub fn app(token: &str) -> Router {
    app_with_candidates(token, Vec::new())
}

/// Router seeded with `candidates`.
pub fn app_with_candidates(token: &str, candidates: Vec<Candidate>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        candidates.into_iter().map(|c| (c.id.clone(), c)).collect(),
    ));
    let state = AppState {
        db,
        token: Arc::from(token),
    };
    Router::new()
        .route("/candidate", get(list_candidates).post(create_candidate))
        .route(
            "/candidate/{id}",
            get(get_candidate).put(update_candidate).delete(delete_candidate),
        )
        .route("/candidate/{id}/favorite", put(toggle_favorite))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock candidate server listening");
    }
    axum::serve(listener, app(token)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == &*state.token => Ok(next.run(request).await),
        Some(_) => Err(ApiError::new(StatusCode::UNAUTHORIZED, "invalid token")),
        None => Err(ApiError::new(StatusCode::UNAUTHORIZED, "missing bearer token")),
    }
}

async fn list_candidates(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    let candidates = state.db.read().await;
    let mut all: Vec<Candidate> = candidates.values().cloned().collect();
    all.sort_by(|a, b| {
        (&a.last_name, &a.first_name, &a.id).cmp(&(&b.last_name, &b.first_name, &b.id))
    });
    Json(all)
}

async fn create_candidate(
    State(state): State<AppState>,
    payload: Result<Json<CandidateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Candidate>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let mut candidate = Candidate {
        id: Uuid::new_v4().to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        phone: None,
        note: None,
        linkedin_url: None,
        is_favorite: false,
    };
    input.apply(&mut candidate);
    state
        .db
        .write()
        .await
        .insert(candidate.id.clone(), candidate.clone());
    Ok((StatusCode::CREATED, Json(candidate)))
}

async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, ApiError> {
    let candidates = state.db.read().await;
    candidates
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&id))
}

async fn update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CandidateRequest>, JsonRejection>,
) -> Result<Json<Candidate>, ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let mut candidates = state.db.write().await;
    let candidate = candidates
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found(&id))?;
    input.apply(candidate);
    Ok(Json(candidate.clone()))
}

async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut candidates = state.db.write().await;
    candidates
        .remove(&id)
        .map(|_| StatusCode::OK)
        .ok_or_else(|| ApiError::not_found(&id))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, ApiError> {
    let mut candidates = state.db.write().await;
    let candidate = candidates
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found(&id))?;
    candidate.is_favorite = !candidate.is_favorite;
    Ok(Json(candidate.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> CandidateRequest {
        CandidateRequest {
            email: email.to_string(),
            note: None,
            linkedin_url: None,
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            phone: None,
        }
    }

    #[test]
    fn candidate_serializes_to_backend_schema() {
        let candidate = Candidate {
            id: "1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: None,
            note: Some("Good fit".to_string()),
            linkedin_url: Some("https://linkedin.com/in/john".to_string()),
            is_favorite: true,
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["linkedinURL"], "https://linkedin.com/in/john");
        assert_eq!(json["isFavorite"], true);
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn candidate_request_optional_fields_may_be_omitted() {
        let input: CandidateRequest = serde_json::from_str(
            r#"{"email":"a@b.c","firstName":"A","lastName":"B"}"#,
        )
        .unwrap();
        assert!(input.note.is_none());
        assert!(input.phone.is_none());
    }

    #[test]
    fn candidate_request_rejects_missing_email() {
        let result: Result<CandidateRequest, _> =
            serde_json::from_str(r#"{"firstName":"A","lastName":"B"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut input = request("jane@example.com");
        input.first_name = "  ".to_string();
        assert_eq!(input.validate().unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validate_rejects_email_without_at_sign() {
        assert!(request("jane.example.com").validate().is_err());
        assert!(request("jane@example.com").validate().is_ok());
    }

    #[test]
    fn apply_replaces_optional_fields_wholesale() {
        let mut candidate = Candidate {
            id: "1".to_string(),
            first_name: "Old".to_string(),
            last_name: "Name".to_string(),
            email: "old@example.com".to_string(),
            phone: Some("123".to_string()),
            note: Some("keep?".to_string()),
            linkedin_url: None,
            is_favorite: true,
        };
        request("jane@example.com").apply(&mut candidate);
        assert_eq!(candidate.first_name, "Jane");
        assert!(candidate.phone.is_none());
        assert!(candidate.note.is_none());
        assert!(candidate.is_favorite);
        assert_eq!(candidate.id, "1");
    }
}
