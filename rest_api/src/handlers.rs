// rest_api/src/handlers.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::{
    AIAnalysis, CatalogSummary, DashboardStats, DoctorProfile, DoctorProfileUpdate, Exam, ExamUpdate,
    Medication, MedicationUpdate, NewAnalysis, NewExam, NewMedication, NewPatient, Patient,
    PatientUpdate, RecordId,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AppState, RestApiError};

type ApiResult<T> = Result<T, RestApiError>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    q: Option<String>,
}

type PathParam = Result<Path<String>, PathRejection>;
type SearchQuery = Result<Query<SearchParams>, QueryRejection>;

fn path_param(path: PathParam) -> ApiResult<String> {
    path.map(|Path(raw)| raw)
        .map_err(|rejection| RestApiError::InvalidInput(rejection.body_text()))
}

/// An id that cannot be valid can never name a record.
fn record_id(path: PathParam, kind: &str) -> ApiResult<RecordId> {
    let raw = path_param(path)?;
    raw.parse::<RecordId>()
        .map_err(|_| RestApiError::NotFound(format!("{} '{}'", kind, raw)))
}

fn search_query(query: SearchQuery) -> ApiResult<Option<String>> {
    query
        .map(|Query(params)| params.q)
        .map_err(|rejection| RestApiError::InvalidInput(rejection.body_text()))
}

fn found<T>(value: Option<T>, kind: &str, id: &RecordId) -> ApiResult<Json<T>> {
    value
        .map(Json)
        .ok_or_else(|| RestApiError::NotFound(format!("{} '{}'", kind, id)))
}

fn payload<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RestApiError::InvalidInput(rejection.body_text()))
}

fn deleted(removed: bool, kind: &str, id: &RecordId) -> ApiResult<StatusCode> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(RestApiError::NotFound(format!("{} '{}'", kind, id)))
    }
}

// Handler for the /api/v1/health endpoint
pub(crate) async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "message": "REST API is healthy" })))
}

// Handler for the /api/v1/version endpoint
pub(crate) async fn version_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": env!("CARGO_PKG_VERSION"), "api_level": 1 })))
}

// --- patients ---

pub(crate) async fn list_patients_handler(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<Vec<Patient>>> {
    Ok(match search_query(query)? {
        Some(q) => Json(state.clinical.search_patients(&q).await),
        None => Json(state.clinical.list_patients().await),
    })
}

pub(crate) async fn get_patient_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<Patient>> {
    let id = record_id(id, "Patient")?;
    found(state.clinical.get_patient(&id).await, "Patient", &id)
}

pub(crate) async fn create_patient_handler(
    State(state): State<AppState>,
    body: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let patient = state.clinical.add_patient(payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub(crate) async fn update_patient_handler(
    State(state): State<AppState>,
    id: PathParam,
    body: Result<Json<PatientUpdate>, JsonRejection>,
) -> ApiResult<Json<Patient>> {
    let id = record_id(id, "Patient")?;
    let update = payload(body)?;
    found(state.clinical.update_patient(&id, update).await?, "Patient", &id)
}

pub(crate) async fn delete_patient_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<StatusCode> {
    let id = record_id(id, "Patient")?;
    deleted(state.clinical.delete_patient(&id).await, "Patient", &id)
}

// Unknown patients simply have no analyses.
pub(crate) async fn patient_analyses_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<Vec<AIAnalysis>>> {
    Ok(match path_param(id)?.parse::<RecordId>() {
        Ok(id) => Json(state.clinical.list_analyses_for_patient(&id).await),
        Err(_) => Json(Vec::new()),
    })
}

// --- analyses ---

pub(crate) async fn list_analyses_handler(State(state): State<AppState>) -> Json<Vec<AIAnalysis>> {
    Json(state.clinical.list_analyses().await)
}

pub(crate) async fn get_analysis_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<AIAnalysis>> {
    let id = record_id(id, "Analysis")?;
    found(state.clinical.get_analysis(&id).await, "Analysis", &id)
}

pub(crate) async fn create_analysis_handler(
    State(state): State<AppState>,
    body: Result<Json<NewAnalysis>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AIAnalysis>)> {
    let analysis = state.clinical.add_analysis(payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

pub(crate) async fn dashboard_stats_handler(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.clinical.dashboard_stats().await)
}

// --- catalogue ---

pub(crate) async fn list_exams_handler(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<Vec<Exam>>> {
    Ok(match search_query(query)? {
        Some(q) => Json(state.catalog.search_exams(&q).await),
        None => Json(state.catalog.list_exams().await),
    })
}

pub(crate) async fn get_exam_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<Exam>> {
    let id = record_id(id, "Exam")?;
    found(state.catalog.get_exam(&id).await, "Exam", &id)
}

pub(crate) async fn create_exam_handler(
    State(state): State<AppState>,
    body: Result<Json<NewExam>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Exam>)> {
    let exam = state.catalog.add_exam(payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

pub(crate) async fn update_exam_handler(
    State(state): State<AppState>,
    id: PathParam,
    body: Result<Json<ExamUpdate>, JsonRejection>,
) -> ApiResult<Json<Exam>> {
    let id = record_id(id, "Exam")?;
    let update = payload(body)?;
    found(state.catalog.update_exam(&id, update).await?, "Exam", &id)
}

pub(crate) async fn delete_exam_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<StatusCode> {
    let id = record_id(id, "Exam")?;
    deleted(state.catalog.delete_exam(&id).await, "Exam", &id)
}

pub(crate) async fn list_medications_handler(
    State(state): State<AppState>,
    query: SearchQuery,
) -> ApiResult<Json<Vec<Medication>>> {
    Ok(match search_query(query)? {
        Some(q) => Json(state.catalog.search_medications(&q).await),
        None => Json(state.catalog.list_medications().await),
    })
}

pub(crate) async fn get_medication_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<Json<Medication>> {
    let id = record_id(id, "Medication")?;
    found(state.catalog.get_medication(&id).await, "Medication", &id)
}

pub(crate) async fn create_medication_handler(
    State(state): State<AppState>,
    body: Result<Json<NewMedication>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Medication>)> {
    let medication = state.catalog.add_medication(payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(medication)))
}

pub(crate) async fn update_medication_handler(
    State(state): State<AppState>,
    id: PathParam,
    body: Result<Json<MedicationUpdate>, JsonRejection>,
) -> ApiResult<Json<Medication>> {
    let id = record_id(id, "Medication")?;
    let update = payload(body)?;
    found(state.catalog.update_medication(&id, update).await?, "Medication", &id)
}

pub(crate) async fn delete_medication_handler(
    State(state): State<AppState>,
    id: PathParam,
) -> ApiResult<StatusCode> {
    let id = record_id(id, "Medication")?;
    deleted(state.catalog.delete_medication(&id).await, "Medication", &id)
}

pub(crate) async fn catalog_summary_handler(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(state.catalog.summary().await)
}

// --- profile ---

pub(crate) async fn get_profile_handler(State(state): State<AppState>) -> Json<DoctorProfile> {
    Json(state.profile.get_profile().await)
}

pub(crate) async fn update_profile_handler(
    State(state): State<AppState>,
    body: Result<Json<DoctorProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<DoctorProfile>> {
    let profile = state.profile.update_profile(payload(body)?).await?;
    Ok(Json(profile))
}
