//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request is tagged with a correlation id that appears in its log lines.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_pay;
use crate::error::PayrollError;
use crate::export::{CheckStub, CsvExporter, ExportArtifact, ExportSink};
use crate::import::{EMPLOYEE_TEMPLATE, PAYROLL_TEMPLATE, import_employees, import_payroll};
use crate::models::{
    Company, CompanyId, CompensationProfile, CustomColumn, CustomColumnId, Department, Employee,
    NewCustomColumn, NewEmployee, PayBreakdown, PayPeriodSubmission, PayrollRecord, ReportFilters,
    ReportSummary, ServerComputedRecord,
};
use crate::reporting::{
    department_totals, earnings_breakdown, generate_report, recent_periods, search_records,
};

use super::request::{
    BulkRequest, CalculationRequest, CompanyRequest, DepartmentRequest, EmployeesQuery,
    PeriodReportQuery, RecordsQuery, ReportRequest, StatusUpdateRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BulkEntryError, BulkResponse, DashboardResponse, ImportResponse,
    ReportResponse,
};
use super::state::AppState;

/// Records shown in the dashboard's trend.
const DASHBOARD_RECENT_PERIODS: usize = 6;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/reports", get(period_report_handler).post(report_handler))
        .route("/records", get(list_records_handler).post(create_record_handler))
        .route("/records/bulk", post(bulk_records_handler))
        .route("/records/computed", post(computed_record_handler))
        .route("/records/:id/status", put(update_status_handler))
        .route("/records/:id/check", get(check_handler))
        .route("/companies", get(list_companies_handler).post(create_company_handler))
        .route(
            "/companies/:id/departments",
            get(list_departments_handler).post(create_department_handler),
        )
        .route("/companies/:id/dashboard", get(dashboard_handler))
        .route(
            "/companies/:id/custom-columns",
            get(list_custom_columns_handler).post(create_custom_column_handler),
        )
        .route(
            "/companies/:id/custom-columns/:column_id",
            put(update_custom_column_handler).delete(delete_custom_column_handler),
        )
        .route("/employees", get(list_employees_handler).post(create_employee_handler))
        .route("/employees/:id/profile", get(profile_handler))
        .route("/import/payroll", post(import_payroll_handler))
        .route("/import/templates/:kind", get(template_handler))
        .route("/departments/:id/import", post(import_employees_handler))
        .route("/export/records", get(export_records_handler))
        .route("/export/report", get(export_report_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning rejections into API errors.
fn read_json<T>(payload: Result<Json<T>, JsonRejection>, correlation_id: Uuid) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn read_query<T>(query: Result<Query<T>, QueryRejection>, correlation_id: Uuid) -> ApiResult<T> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn read_id<T>(path: Result<Path<T>, PathRejection>, correlation_id: Uuid) -> ApiResult<T> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Logs an engine error and converts it to a response.
fn failure(correlation_id: Uuid, action: &str, err: PayrollError) -> ApiErrorResponse {
    if err.is_recoverable() {
        warn!(correlation_id = %correlation_id, error = %err, "{} failed", action);
    } else {
        error!(correlation_id = %correlation_id, error = %err, "{} failed", action);
    }
    err.into()
}

/// Summarises a company's records matching `filters`.
fn summarize(
    state: &AppState,
    company_id: CompanyId,
    filters: &ReportFilters,
) -> Result<ReportSummary, PayrollError> {
    filters.validate()?;
    let repository = state.repository();
    let records = repository.list_records(company_id, None)?;
    let employees = repository.employees()?;
    generate_report(&records, &employees, filters)
}

fn download(artifact: ExportArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Calculates pay for one period without storing a record.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<PayBreakdown>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = read_json(payload, correlation_id)?;
    let start_time = Instant::now();
    let breakdown = calculate_pay(&request.profile, &request.period, state.policy())
        .map_err(|e| failure(correlation_id, "Calculation", e))?;

    info!(
        correlation_id = %correlation_id,
        pay_type = %request.profile.pay_type,
        gross_pay = %breakdown.gross_pay,
        net_pay = %breakdown.net_pay,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Calculation completed successfully"
    );
    Ok(Json(breakdown))
}

/// Handler for POST /reports endpoint.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<Json<ReportResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = read_json(payload, correlation_id)?;
    let summary = summarize(&state, request.company_id, &request.filters)
        .map_err(|e| failure(correlation_id, "Report", e))?;

    info!(
        correlation_id = %correlation_id,
        company_id = request.company_id,
        records = summary.record_count,
        employees = summary.employee_count,
        "Report generated"
    );
    Ok(Json(summary.into()))
}

/// Handler for GET /reports endpoint.
///
/// Year-to-date and monthly reports whose range follows from the query.
async fn period_report_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodReportQuery>, QueryRejection>,
) -> ApiResult<Json<ReportResponse>> {
    let correlation_id = Uuid::new_v4();
    let query = read_query(query, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        company_id = query.company_id,
        report_type = ?query.report_type,
        "Processing period report request"
    );

    let summary = query
        .filters(Utc::now().date_naive())
        .and_then(|filters| summarize(&state, query.company_id, &filters))
        .map_err(|e| failure(correlation_id, "Report", e))?;
    Ok(Json(summary.into()))
}

/// Handler for GET /records endpoint.
async fn list_records_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PayrollRecord>>> {
    let correlation_id = Uuid::new_v4();
    let query = read_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id = query.company_id, "Listing records");

    let records = find_records(&state, &query).map_err(|e| failure(correlation_id, "Listing records", e))?;
    Ok(Json(records))
}

/// Records matching a listing query, narrowed by its search term if any.
fn find_records(state: &AppState, query: &RecordsQuery) -> Result<Vec<PayrollRecord>, PayrollError> {
    let repository = state.repository();
    let records = repository.list_records(query.company_id, Some(&query.filters()))?;
    match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            let employees = repository.employees()?;
            Ok(search_records(&records, &employees, None, None, term)
                .into_iter()
                .cloned()
                .collect())
        }
        _ => Ok(records),
    }
}

/// Handler for POST /records endpoint.
async fn create_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayPeriodSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PayrollRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Submitting pay period");

    let submission = read_json(payload, correlation_id)?;
    let record = state
        .repository()
        .submit_pay_period(submission.employee_id, &submission.period)
        .map_err(|e| failure(correlation_id, "Pay period submission", e))?;

    info!(
        correlation_id = %correlation_id,
        record_id = record.id,
        employee_id = record.employee_id,
        gross_pay = %record.gross_pay,
        "Pay period stored"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for POST /records/bulk endpoint.
///
/// Responds 200 when at least one entry was stored and 422 when every entry
/// failed.
async fn bulk_records_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BulkResponse>)> {
    let correlation_id = Uuid::new_v4();
    let request = read_json(payload, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        entries = request.records.len(),
        "Processing bulk submission"
    );

    let mut response = BulkResponse::default();
    for (index, result) in state.repository().submit_bulk(&request.records).into_iter().enumerate() {
        match result {
            Ok(record) => response.created.push(record),
            Err(err) => {
                warn!(correlation_id = %correlation_id, index, error = %err, "Bulk entry rejected");
                let message = err.to_string();
                let code = ApiErrorResponse::from(err).error.code;
                response.errors.push(BulkEntryError {
                    index,
                    code,
                    message,
                });
            }
        }
    }

    let status = if response.created.is_empty() && !response.errors.is_empty() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Handler for POST /records/computed endpoint.
async fn computed_record_handler(
    State(state): State<AppState>,
    payload: Result<Json<ServerComputedRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PayrollRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Accepting computed record");

    let computed = read_json(payload, correlation_id)?;
    let record = state
        .repository()
        .accept_computed(computed)
        .map_err(|e| failure(correlation_id, "Accepting computed record", e))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for PUT /records/:id/status endpoint.
async fn update_status_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<PayrollRecord>> {
    let correlation_id = Uuid::new_v4();
    let record_id = read_id(path, correlation_id)?;
    let request = read_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, record_id, status = %request.status, "Updating status");

    let record = state
        .repository()
        .update_status(record_id, request.status)
        .map_err(|e| failure(correlation_id, "Status update", e))?;
    Ok(Json(record))
}

/// Handler for GET /records/:id/check endpoint.
async fn check_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<CheckStub>> {
    let correlation_id = Uuid::new_v4();
    let record_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, record_id, "Preparing check");

    let repository = state.repository();
    let check = repository
        .record(record_id)
        .and_then(|record| {
            let employee = repository.employee(record.employee_id)?;
            let company = repository.employer(employee.id)?;
            CheckStub::new(&company, &employee, &record, state.policy())
        })
        .map_err(|e| failure(correlation_id, "Check preparation", e))?;
    Ok(Json(check))
}

/// Handler for GET /companies endpoint.
async fn list_companies_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing companies");
    let companies = state
        .repository()
        .companies()
        .map_err(|e| failure(correlation_id, "Listing companies", e))?;
    Ok(Json(companies))
}

/// Handler for POST /companies endpoint.
async fn create_company_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompanyRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating company");

    let request = read_json(payload, correlation_id)?;
    let company = state
        .repository()
        .add_company(&request.name, &request.address, &request.location)
        .map_err(|e| failure(correlation_id, "Creating company", e))?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// Handler for GET /companies/:id/departments endpoint.
async fn list_departments_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Vec<Department>>> {
    let correlation_id = Uuid::new_v4();
    let company_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, "Listing departments");

    let departments = state
        .repository()
        .departments(company_id)
        .map_err(|e| failure(correlation_id, "Listing departments", e))?;
    Ok(Json(departments))
}

/// Handler for POST /companies/:id/departments endpoint.
async fn create_department_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<DepartmentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    let correlation_id = Uuid::new_v4();
    let company_id = read_id(path, correlation_id)?;
    let request = read_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, "Creating department");

    let department = state
        .repository()
        .add_department(company_id, &request.name)
        .map_err(|e| failure(correlation_id, "Creating department", e))?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// Handler for GET /companies/:id/dashboard endpoint.
async fn dashboard_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<DashboardResponse>> {
    let correlation_id = Uuid::new_v4();
    let company_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, "Building dashboard");

    let repository = state.repository();
    let load = || -> Result<DashboardResponse, PayrollError> {
        let records = repository.list_records(company_id, None)?;
        let employees = repository.employees()?;
        let departments = repository.departments(company_id)?;
        Ok(DashboardResponse {
            department_totals: department_totals(&records, &employees, &departments)?,
            earnings: earnings_breakdown(&records)?,
            recent_periods: recent_periods(&records, DASHBOARD_RECENT_PERIODS),
        })
    };
    let dashboard = load().map_err(|e| failure(correlation_id, "Dashboard", e))?;
    Ok(Json(dashboard))
}

/// Handler for GET /companies/:id/custom-columns endpoint.
async fn list_custom_columns_handler(
    State(state): State<AppState>,
    path: Result<Path<CompanyId>, PathRejection>,
) -> ApiResult<Json<Vec<CustomColumn>>> {
    let correlation_id = Uuid::new_v4();
    let company_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, "Listing custom columns");

    let columns = state
        .repository()
        .custom_columns(company_id)
        .map_err(|e| failure(correlation_id, "Listing custom columns", e))?;
    Ok(Json(columns))
}

/// Handler for POST /companies/:id/custom-columns endpoint.
async fn create_custom_column_handler(
    State(state): State<AppState>,
    path: Result<Path<CompanyId>, PathRejection>,
    payload: Result<Json<NewCustomColumn>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CustomColumn>)> {
    let correlation_id = Uuid::new_v4();
    let company_id = read_id(path, correlation_id)?;
    let column = read_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, "Creating custom column");

    let column = state
        .repository()
        .add_custom_column(company_id, column)
        .map_err(|e| failure(correlation_id, "Creating custom column", e))?;
    Ok((StatusCode::CREATED, Json(column)))
}

/// Handler for PUT /companies/:id/custom-columns/:column_id endpoint.
async fn update_custom_column_handler(
    State(state): State<AppState>,
    path: Result<Path<(CompanyId, CustomColumnId)>, PathRejection>,
    payload: Result<Json<NewCustomColumn>, JsonRejection>,
) -> ApiResult<Json<CustomColumn>> {
    let correlation_id = Uuid::new_v4();
    let (company_id, column_id) = read_id(path, correlation_id)?;
    let column = read_json(payload, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, column_id, "Updating custom column");

    let column = state
        .repository()
        .update_custom_column(company_id, column_id, column)
        .map_err(|e| failure(correlation_id, "Updating custom column", e))?;
    Ok(Json(column))
}

/// Handler for DELETE /companies/:id/custom-columns/:column_id endpoint.
async fn delete_custom_column_handler(
    State(state): State<AppState>,
    path: Result<Path<(CompanyId, CustomColumnId)>, PathRejection>,
) -> ApiResult<Json<CustomColumn>> {
    let correlation_id = Uuid::new_v4();
    let (company_id, column_id) = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id, column_id, "Deleting custom column");

    let column = state
        .repository()
        .delete_custom_column(company_id, column_id)
        .map_err(|e| failure(correlation_id, "Deleting custom column", e))?;
    Ok(Json(column))
}

/// Handler for GET /employees/:id/profile endpoint.
async fn profile_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<CompensationProfile>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, employee_id, "Reading compensation profile");

    let profile = state
        .repository()
        .compensation_profile(employee_id)
        .map_err(|e| failure(correlation_id, "Reading compensation profile", e))?;
    Ok(Json(profile))
}

/// Handler for GET /employees endpoint.
async fn list_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<EmployeesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Employee>>> {
    let correlation_id = Uuid::new_v4();
    let query = read_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, "Listing employees");

    let mut employees = state
        .repository()
        .employees()
        .map_err(|e| failure(correlation_id, "Listing employees", e))?;
    if let Some(term) = query.search {
        employees.retain(|e| e.matches_search(&term));
    }
    Ok(Json(employees))
}

/// Handler for POST /employees endpoint.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating employee");

    let employee = read_json(payload, correlation_id)?;
    let employee = state
        .repository()
        .add_employee(employee)
        .map_err(|e| failure(correlation_id, "Creating employee", e))?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for POST /import/payroll endpoint.
///
/// The body is the CSV text itself.
async fn import_payroll_handler(
    State(state): State<AppState>,
    body: String,
) -> Json<ImportResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bytes = body.len(), "Importing payroll CSV");

    let result = import_payroll(state.repository(), &body);
    info!(
        correlation_id = %correlation_id,
        succeeded = result.succeeded,
        failed = result.failed,
        "Payroll import processed"
    );
    Json(result.into())
}

/// Handler for POST /departments/:id/import endpoint.
async fn import_employees_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: String,
) -> ApiResult<Json<ImportResponse>> {
    let correlation_id = Uuid::new_v4();
    let department_id = read_id(path, correlation_id)?;
    info!(correlation_id = %correlation_id, department_id, "Importing employee CSV");

    let result = import_employees(state.repository(), department_id, &body);
    info!(
        correlation_id = %correlation_id,
        succeeded = result.succeeded,
        failed = result.failed,
        "Employee import processed"
    );
    Ok(Json(result.into()))
}

/// Handler for GET /import/templates/:kind endpoint.
async fn template_handler(Path(kind): Path<String>) -> ApiResult<Response> {
    let (file_name, body) = match kind.as_str() {
        "payroll" => ("payroll_template.csv", PAYROLL_TEMPLATE),
        "employees" => ("employee_template.csv", EMPLOYEE_TEMPLATE),
        other => return Err(PayrollError::not_found("Import template", other).into()),
    };
    Ok(download(ExportArtifact {
        file_name: file_name.to_string(),
        content_type: "text/csv;charset=utf-8".to_string(),
        body: body.to_string(),
    }))
}

/// Handler for GET /export/records endpoint.
async fn export_records_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let query = read_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id = query.company_id, "Exporting records");

    let artifact = find_records(&state, &query)
        .and_then(|records| {
            let employees = state.repository().employees()?;
            CsvExporter::today().export_records(&records, &employees)
        })
        .map_err(|e| failure(correlation_id, "Record export", e))?;
    Ok(download(artifact))
}

/// Handler for GET /export/report endpoint.
async fn export_report_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordsQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    let query = read_query(query, correlation_id)?;
    info!(correlation_id = %correlation_id, company_id = query.company_id, "Exporting report");

    if query.start_date.is_none() || query.end_date.is_none() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "start_date and end_date are required for a report export",
        )));
    }

    let filters = query.filters();
    let artifact = summarize(&state, query.company_id, &filters)
        .and_then(|summary| CsvExporter::today().export_summary(&summary, &filters.date_range()))
        .map_err(|e| failure(correlation_id, "Report export", e))?;
    Ok(download(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::seeded(config).expect("Failed to seed repository")
    }

    async fn send(router: Router, method: &str, uri: &str, body: &str) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_breakdown() {
        let router = create_router(create_test_state());
        let body = r#"{
            "profile": {
                "pay_type": "hourly",
                "pay_rate": "35",
                "retirement_rate": "0.06",
                "filing_status": "single"
            },
            "period": {
                "pay_period_start": "2024-03-01",
                "pay_period_end": "2024-03-15",
                "regular_hours": "75",
                "overtime_hours": "10",
                "reported_tips": "200"
            }
        }"#;

        let response = send(router, "POST", "/calculate", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let breakdown: PayBreakdown = read_body(response).await;
        assert_eq!(breakdown.gross_pay, Decimal::from(3350));
        assert_eq!(breakdown.net_pay, Decimal::from(2479));
        assert_eq!(breakdown.audit_steps.len(), 5);
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/calculate", "{invalid json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_negative_hours_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{
            "profile": {
                "pay_type": "hourly",
                "pay_rate": "20",
                "retirement_rate": "0",
                "filing_status": "single"
            },
            "period": {
                "pay_period_start": "2024-03-01",
                "pay_period_end": "2024-03-15",
                "regular_hours": "-4"
            }
        }"#;

        let response = send(router, "POST", "/calculate", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_deref(), Some("regular_hours"));
    }

    #[tokio::test]
    async fn test_submit_then_report() {
        let state = create_test_state();
        let body = r#"{
            "employee_id": 2,
            "pay_period_start": "2024-03-01",
            "pay_period_end": "2024-03-15",
            "regular_hours": "75",
            "overtime_hours": "10",
            "tips": "200"
        }"#;
        let response = send(create_router(state.clone()), "POST", "/records", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let report = r#"{
            "company_id": 1,
            "filters": { "start_date": "2024-03-01", "end_date": "2024-03-31", "type": "monthly" }
        }"#;
        let response = send(create_router(state), "POST", "/reports", report).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report: ReportResponse = read_body(response).await;
        assert_eq!(report.summary.record_count, 1);
        assert_eq!(report.summary.total_gross_pay, Decimal::from(3350));
        assert_eq!(report.average_gross_pay, Some(Decimal::from(3350)));
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let router = create_router(create_test_state());
        let body = r#"{
            "employee_id": 99,
            "pay_period_start": "2024-03-01",
            "pay_period_end": "2024-03-15"
        }"#;
        let response = send(router, "POST", "/records", body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_path_id_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/records/abc/check", "").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_for_stored_record() {
        let state = create_test_state();
        let record = state
            .repository()
            .submit_pay_period(
                1,
                &crate::models::PayPeriodInput {
                    pay_period_start: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    pay_period_end: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                    regular_hours: Decimal::from(80),
                    overtime_hours: Decimal::ZERO,
                    reported_tips: Decimal::ZERO,
                },
            )
            .unwrap();

        let uri = format!("/records/{}/check", record.id);
        let response = send(create_router(state), "GET", &uri, "").await;
        assert_eq!(response.status(), StatusCode::OK);

        let check: CheckStub = read_body(response).await;
        assert_eq!(check.company_name, "Acme Corp");
        assert_eq!(check.payee, "John Doe");
        assert_eq!(check.amount, Decimal::from_str("2163.47").unwrap());
    }
}
