//! # API REST
//!
//! REST API implementation for the AYUSH terminology service.
//!
//! Handles:
//! - HTTP endpoints with axum (terminology search/translate/mappings, FHIR
//!   document export, health check)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (parameter validation, JSON envelopes, CORS)
//!
//! Precondition validation lives here: handlers reject requests with missing
//! or blank parameters and unrecognised coding-system names with a 400 before
//! anything reaches the registry. The registry itself only ever reports "not
//! found" by returning empty results.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use ayush_types::NonEmptyText;
use fhir::{CodeSystem, CodeSystemDocument, ConceptMap, ConceptMapDocument};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use terminology_core::{
    CodingSystem, ResolvedMappings, SearchHit, SystemFilter, TerminologyRegistry, Translation,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Content type for FHIR document responses.
pub const FHIR_JSON: &str = "application/fhir+json";

/// Default search result cap when the client does not send `limit`.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Application state shared across REST API handlers.
///
/// The registry is immutable reference data, so sharing an `Arc` is the whole
/// concurrency story: any number of in-flight requests may read it.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<TerminologyRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<TerminologyRegistry>) -> Self {
        Self { registry }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        search_terminology,
        translate_code,
        get_mappings,
        fhir_code_system,
        fhir_concept_map,
    ),
    components(schemas(
        HealthRes,
        ErrorBody,
        SearchEnvelope,
        TranslateReq,
        TranslateEnvelope,
        MappingsEnvelope,
        SearchHit,
        Translation,
        ResolvedMappings,
        terminology_core::CrossReferences,
        terminology_core::Equivalence,
        CodeSystemDocument,
        fhir::CodeSystemConcept,
        fhir::ConceptProperty,
        ConceptMapDocument,
        fhir::ConceptMapGroup,
        fhir::ConceptMapElement,
        fhir::ConceptMapTarget,
    ))
)]
struct ApiDoc;

/// Build the REST router over a loaded registry.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/terminology/search", get(search_terminology))
        .route("/terminology/translate", post(translate_code))
        .route("/terminology/mappings", get(get_mappings))
        .route("/fhir/CodeSystem", get(fhir_code_system))
        .route("/fhir/ConceptMap", get(fhir_concept_map))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the REST API until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while
/// running.
pub async fn serve(addr: &str, registry: Arc<TerminologyRegistry>) -> anyhow::Result<()> {
    tracing::info!("-- Starting AYUSH terminology REST API on {}", addr);

    let app = router(AppState::new(registry));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Wire envelopes
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body for 4xx rejections.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Search response envelope.
///
/// The metadata fields are omitted for a blank query, which answers with a
/// bare `{"results": []}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub results: Vec<SearchHit>,
}

/// Translation request body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateReq {
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub source_system: Option<String>,
    #[serde(default)]
    pub target_system: Option<String>,
}

/// Translation response envelope.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateEnvelope {
    pub source_code: String,
    pub source_system: String,
    pub target_system: String,
    pub translations: Vec<Translation>,
}

/// Mappings response envelope: the source term (if known) plus its resolved
/// cross-references.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MappingsEnvelope {
    pub source: Option<SearchHit>,
    pub mappings: ResolvedMappings,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    system: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MappingsParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    system: Option<String>,
}

// ============================================================================
// Precondition helpers
// ============================================================================

type Rejection = (StatusCode, Json<ErrorBody>);

fn bad_request(message: impl Into<String>) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Require a present, non-blank parameter. Trims surrounding whitespace.
fn required_text(value: Option<&str>, name: &str) -> Result<NonEmptyText, Rejection> {
    value
        .and_then(|v| NonEmptyText::new(v).ok())
        .ok_or_else(|| bad_request(format!("Missing required parameter: {name}")))
}

/// Parse a required coding-system parameter into its enum form.
fn required_system(value: Option<&str>, name: &str) -> Result<CodingSystem, Rejection> {
    let text = required_text(value, name)?;
    CodingSystem::parse(text.as_str()).map_err(|err| bad_request(err.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "AYUSH terminology API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/terminology/search",
    params(
        ("q" = Option<String>, Query, description = "Free-text query"),
        ("limit" = Option<usize>, Query, description = "Result cap, default 10"),
        ("system" = Option<String>, Query, description = "Scope: 'all', a family (NAMASTE, ICD-11) or a full system name"),
    ),
    responses(
        (status = 200, description = "Search results", body = SearchEnvelope),
        (status = 400, description = "Unrecognised system filter", body = ErrorBody)
    )
)]
/// Search both catalogs by free text.
///
/// A blank query yields an empty result list, not the full catalog. Results
/// keep catalog-scan order (NAMASTE before ICD-11) and are truncated to
/// `limit` before the system filter narrows them.
#[axum::debug_handler]
async fn search_terminology(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchEnvelope>, Rejection> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(SearchEnvelope {
            query: None,
            system: None,
            count: None,
            results: Vec::new(),
        }));
    }

    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let system = params.system.unwrap_or_else(|| "all".into());
    let filter = SystemFilter::parse(&system).map_err(|err| bad_request(err.to_string()))?;

    let mut results = state.registry.search(&query, limit);
    if filter != SystemFilter::All {
        results.retain(|hit| filter.matches(hit.system));
    }

    Ok(Json(SearchEnvelope {
        count: Some(results.len()),
        query: Some(query),
        system: Some(system),
        results,
    }))
}

#[utoipa::path(
    post,
    path = "/terminology/translate",
    request_body = TranslateReq,
    responses(
        (status = 200, description = "Translation records, possibly empty", body = TranslateEnvelope),
        (status = 400, description = "Missing parameter or unrecognised system", body = ErrorBody)
    )
)]
/// Translate a code between coding systems via the concept-mapping table.
///
/// An empty `translations` list is a successful answer meaning "no mapping";
/// only malformed requests are rejected.
#[axum::debug_handler]
async fn translate_code(
    State(state): State<AppState>,
    Json(req): Json<TranslateReq>,
) -> Result<Json<TranslateEnvelope>, Rejection> {
    let source_code = required_text(req.source_code.as_deref(), "sourceCode")?;
    let source_system = required_system(req.source_system.as_deref(), "sourceSystem")?;
    let target_system = required_system(req.target_system.as_deref(), "targetSystem")?;

    let translations = state
        .registry
        .translate(source_code.as_str(), source_system, target_system);

    Ok(Json(TranslateEnvelope {
        source_code: source_code.to_string(),
        source_system: source_system.as_wire().into(),
        target_system: target_system.as_wire().into(),
        translations,
    }))
}

#[utoipa::path(
    get,
    path = "/terminology/mappings",
    params(
        ("code" = String, Query, description = "Source code"),
        ("system" = String, Query, description = "Source coding system wire name"),
    ),
    responses(
        (status = 200, description = "Resolved cross-references", body = MappingsEnvelope),
        (status = 400, description = "Missing parameter or unrecognised system", body = ErrorBody)
    )
)]
/// Resolve a NAMASTE term's ICD-11 cross-references.
///
/// `source` is the looked-up term itself (null when the code is unknown);
/// `mappings` is empty rather than an error when nothing resolves.
#[axum::debug_handler]
async fn get_mappings(
    State(state): State<AppState>,
    Query(params): Query<MappingsParams>,
) -> Result<Json<MappingsEnvelope>, Rejection> {
    let code = required_text(params.code.as_deref(), "code")?;
    let system = required_system(params.system.as_deref(), "system")?;

    Ok(Json(MappingsEnvelope {
        source: state.registry.get_by_code(code.as_str(), system),
        mappings: state.registry.mappings_for(code.as_str(), system),
    }))
}

#[utoipa::path(
    get,
    path = "/fhir/CodeSystem",
    responses(
        (status = 200, description = "NAMASTE catalog as a FHIR CodeSystem", body = CodeSystemDocument)
    )
)]
/// Export the NAMASTE catalog as a FHIR CodeSystem document.
#[axum::debug_handler]
async fn fhir_code_system(State(state): State<AppState>) -> Response {
    let document = CodeSystem::generate(&state.registry);
    fhir_response(Json(document))
}

#[utoipa::path(
    get,
    path = "/fhir/ConceptMap",
    responses(
        (status = 200, description = "Mapping table as a FHIR ConceptMap", body = ConceptMapDocument)
    )
)]
/// Export the concept-mapping table as a FHIR ConceptMap document.
#[axum::debug_handler]
async fn fhir_concept_map(State(state): State<AppState>) -> Response {
    let document = ConceptMap::generate(&state.registry);
    fhir_response(Json(document))
}

/// Tag a JSON body with the FHIR content type.
fn fhir_response<T: Serialize>(body: Json<T>) -> Response {
    ([(header::CONTENT_TYPE, FHIR_JSON)], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(AppState::new(Arc::new(TerminologyRegistry::bundled())))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
    }

    #[tokio::test]
    async fn blank_search_query_yields_bare_empty_envelope() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/search?q=%20%20")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "results": [] }));
    }

    #[tokio::test]
    async fn search_returns_envelope_with_count() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/search?q=amavata&limit=10")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["query"], "amavata");
        assert_eq!(json["count"], json["results"].as_array().expect("array").len());
        assert_eq!(json["results"][0]["code"], "AYU001");
        assert_eq!(json["results"][0]["system"], "NAMASTE-Ayurveda");
        assert_eq!(json["results"][0]["mappings"]["icd11TM2"], "TM2-123");
    }

    #[tokio::test]
    async fn search_rejects_unknown_system_filter() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/search?q=amavata&system=LOINC")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().expect("message").contains("LOINC"));
    }

    #[tokio::test]
    async fn search_filter_narrows_by_family() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/search?q=amavata&system=ICD-11")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let results = json["results"].as_array().expect("array");
        assert!(!results.is_empty());
        for hit in results {
            assert!(hit["system"].as_str().expect("system").starts_with("ICD-11"));
        }
    }

    #[tokio::test]
    async fn translate_rejects_missing_parameters() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/terminology/translate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"sourceCode": "AYU001"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .expect("message")
            .contains("sourceSystem"));
    }

    #[tokio::test]
    async fn translate_returns_records() {
        let body = serde_json::json!({
            "sourceCode": "AYU001",
            "sourceSystem": "NAMASTE-Ayurveda",
            "targetSystem": "ICD-11-TM2",
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/terminology/translate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["translations"][0]["targetCode"], "TM2-123");
        assert_eq!(
            json["translations"][0]["targetDisplay"],
            "Amavata (Traditional Medicine)"
        );
    }

    #[tokio::test]
    async fn mappings_requires_code_and_system() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/mappings?code=AYU001")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn mappings_resolves_cross_references() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/terminology/mappings?code=AYU001&system=NAMASTE-Ayurveda")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["source"]["code"], "AYU001");
        assert_eq!(json["mappings"]["ICD-11-TM2"]["code"], "TM2-123");
        assert_eq!(json["mappings"]["ICD-11-Biomedicine"]["code"], "M06.9");
    }

    #[tokio::test]
    async fn fhir_exports_use_fhir_content_type() {
        for uri in ["/fhir/CodeSystem", "/fhir/ConceptMap"] {
            let response = test_router()
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .expect("content type"),
                FHIR_JSON
            );

            let json = body_json(response).await;
            assert!(json["resourceType"].is_string());
        }
    }
}
