//! Integration tests for the Angka Kredit engine.
//!
//! This test suite covers:
//! - Single-period credit computation
//! - Penetapan, Akumulasi and Konversi reports
//! - Integration and education credit toggles
//! - Assessment selection
//! - Rank normalisation and the top of the hierarchy
//! - HTML document download
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use angka_kredit::api::{AppState, create_router};
use angka_kredit::calculation::build_report;
use angka_kredit::config::ConfigLoader;
use angka_kredit::models::{
    AssessmentDraft, AssessmentSelection, Employee, Institution, Report, ReportKind, ReportRequest,
};
use angka_kredit::render::{DocumentRenderer, HtmlRenderer};
use angka_kredit::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/angka_kredit").expect("Failed to load config");
    AppState::new(config).expect("Failed to build state")
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field, which the API serializes as a string.
fn decimal_at(value: &Value, pointer: &str) -> Decimal {
    let raw = value
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing field {}", pointer));
    match raw {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn employee(rank_name: &str, rank_code: &str) -> Value {
    json!({
        "id": "peg_001",
        "name": "Budi Santoso",
        "nip": "198602142010011001",
        "birthplace": "Bandung",
        "birthdate": "1986-02-14",
        "sex": "Laki-laki",
        "rank_name": rank_name,
        "rank_code": rank_code,
        "rank_effective_date": "2020-04-01",
        "job_title": "Pranata Komputer Ahli Madya",
        "job_title_effective_date": "2021-01-04",
        "work_unit": "Diskominfo"
    })
}

fn assessor() -> Value {
    json!({
        "id": "pen_001",
        "name": "Dr. Ani Wulandari",
        "nip": "197001011995032001",
        "birthplace": "Garut",
        "birthdate": "1970-01-01",
        "sex": "Perempuan",
        "rank_name": "Pembina Utama Muda",
        "rank_code": "IV/c",
        "rank_effective_date": "2015-04-01",
        "job_title": "Kepala Dinas",
        "work_unit": "Diskominfo"
    })
}

fn assessment(id: &str, start: &str, end: &str, rating: &str, job_level: &str) -> Value {
    json!({
        "id": id,
        "institution_id": "ins_001",
        "assessor_id": "pen_001",
        "period_start": start,
        "period_end": end,
        "rating": rating,
        "job_level": job_level,
        "decree_place": "Bandung"
    })
}

/// A III/b employee with two yearly assessments, an integration credit of
/// 10 and two education credits (one explicit, one derived).
fn full_snapshot(kind: &str) -> Value {
    let mut latest = assessment(
        "ak_2024",
        "2024-01-01",
        "2024-12-31",
        "Baik",
        "KETERAMPILAN - TERAMPIL",
    );
    latest["decree_date"] = json!("2025-01-15");

    json!({
        "employee": employee("Penata Muda Tingkat I", "III/b"),
        "assessors": [assessor()],
        "institutions": [{ "id": "ins_001", "name": "Pemerintah Kota Bandung" }],
        "assessments": [
            latest,
            assessment("ak_2023", "2023-01-01", "2023-12-31", "Sangat Baik", "KEAHLIAN - AHLI MADYA")
        ],
        "integration_credit": "10",
        "education_credits": [
            {
                "id": "edu_1",
                "institution_id": "ins_001",
                "assessor_id": "pen_001",
                "activity_type": "Pelatihan Fungsional",
                "level": "Nasional",
                "execution_date": "2023-05-10",
                "duration_hours": 40,
                "credit": "2",
                "certificate_number": "SERT/001"
            },
            {
                "id": "edu_2",
                "institution_id": "ins_001",
                "assessor_id": "pen_001",
                "activity_type": "Pendidikan Formal",
                "level": "S2",
                "execution_date": "2024-08-01",
                "certificate_number": "SERT/002"
            }
        ],
        "kind": kind,
        "as_of": "2025-06-01"
    })
}

fn credit_body(start: &str, end: &str, rating: &str, job_level: &str) -> Value {
    json!({
        "period_start": start,
        "period_end": end,
        "rating": rating,
        "job_level": job_level
    })
}

fn has_warning(report: &Value, code: &str) -> bool {
    report["audit_trace"]["warnings"]
        .as_array()
        .map(|warnings| warnings.iter().any(|w| w["code"] == code))
        .unwrap_or(false)
}

// =============================================================================
// Credit computation
// =============================================================================

#[tokio::test]
async fn test_credit_full_year_sangat_baik_ahli_madya() {
    let (status, result) = post(
        create_router_for_test(),
        "/credit",
        credit_body("2023-01-01", "2023-12-31", "Sangat Baik", "KEAHLIAN - AHLI MADYA"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["days"], 365);
    assert_eq!(decimal_at(&result, "/credit"), decimal("56.211"));
}

#[tokio::test]
async fn test_credit_leap_year_counts_366_days() {
    let (status, result) = post(
        create_router_for_test(),
        "/credit",
        credit_body("2024-01-01", "2024-12-31", "Baik", "KETERAMPILAN - TERAMPIL"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["days"], 366);
    assert_eq!(decimal_at(&result, "/credit"), decimal("5.010"));
}

#[tokio::test]
async fn test_credit_half_year_butuh_perbaikan() {
    let (status, result) = post(
        create_router_for_test(),
        "/credit",
        credit_body("2023-01-01", "2023-06-30", "Butuh Perbaikan", "KETERAMPILAN - MAHIR"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["days"], 181);
    assert_eq!(decimal_at(&result, "/credit"), decimal("4.646"));
}

#[tokio::test]
async fn test_credit_unknown_labels_give_zero_with_warnings() {
    let (status, result) = post(
        create_router_for_test(),
        "/credit",
        credit_body("2023-01-01", "2023-12-31", "Excellent", "KEAHLIAN - AHLI SUPER"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&result, "/credit"), Decimal::ZERO);
    let codes: Vec<&str> = result["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w["code"].as_str())
        .collect();
    assert!(codes.contains(&"UNKNOWN_RATING"));
    assert!(codes.contains(&"UNKNOWN_JOB_LEVEL"));
}

#[tokio::test]
async fn test_credit_inverted_period_is_rejected() {
    let (status, error) = post(
        create_router_for_test(),
        "/credit",
        credit_body("2023-12-31", "2023-01-01", "Baik", "KEAHLIAN - AHLI MUDA"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERIOD");
}

// =============================================================================
// Penetapan
// =============================================================================

#[tokio::test]
async fn test_penetapan_without_extras() {
    let (status, report) = post(
        create_router_for_test(),
        "/reports",
        full_snapshot("penetapan"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["kind"], "penetapan");
    assert_eq!(decimal_at(&report, "/total_lama"), decimal("50"));
    assert_eq!(decimal_at(&report, "/total_baru"), decimal("11.221"));
    assert_eq!(decimal_at(&report, "/education_credit"), Decimal::ZERO);
    assert_eq!(decimal_at(&report, "/total_jumlah"), decimal("61.221"));
    assert_eq!(decimal_at(&report, "/hasil_pangkat"), decimal("-38.779"));
    assert_eq!(report["verdict"], "not_eligible");
    assert_eq!(report["destination"], "Penata III/c");
    assert_eq!(report["lines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_penetapan_education_is_not_reduced_by_deduction() {
    let mut body = full_snapshot("penetapan");
    body["include_integration"] = json!(true);
    body["include_education"] = json!(true);

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&report, "/total_baru"), decimal("21.221"));
    assert_eq!(decimal_at(&report, "/education_credit"), decimal("27"));
    assert_eq!(decimal_at(&report, "/total_jumlah"), decimal("98.221"));
    assert_eq!(decimal_at(&report, "/total_performance_only"), decimal("71.221"));
    assert_eq!(decimal_at(&report, "/total_baru_with_education"), decimal("48.221"));
    assert_eq!(decimal_at(&report, "/hasil_pangkat"), decimal("-1.779"));

    // Integration first, then education, then assessments by start date
    let lines = report["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["type"], "integration");
    assert_eq!(lines[1]["type"], "education");
    assert_eq!(lines[2]["assessment_id"], "ak_2023");
    assert_eq!(lines[3]["assessment_id"], "ak_2024");
}

#[tokio::test]
async fn test_penetapan_uses_latest_assessment_for_footer_and_year() {
    let (_, report) = post(
        create_router_for_test(),
        "/reports",
        full_snapshot("penetapan"),
    )
    .await;

    assert_eq!(report["header"]["year"], 2025);
    assert_eq!(report["header"]["period_start"], "01-01-2023");
    assert_eq!(report["header"]["period_end"], "31-12-2024");
    assert_eq!(report["footer"]["assessor_name"], "Dr. Ani Wulandari");
    assert_eq!(report["footer"]["institution_name"], "Pemerintah Kota Bandung");
    assert_eq!(report["footer"]["decree_place"], "Bandung");
}

#[tokio::test]
async fn test_penetapan_normalises_alternate_rank_spelling() {
    let mut body = full_snapshot("penetapan");
    body["employee"]["rank_code"] = json!("3B");

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["rank_code"], "III/b");
    assert_eq!(report["destination"], "Penata III/c");
}

#[tokio::test]
async fn test_penetapan_at_top_rank_is_highest() {
    let mut body = full_snapshot("penetapan");
    body["employee"] = employee("Pembina Utama", "IV/e");

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["next_rank"]["status"], "highest");
    assert_eq!(report["destination"], "Tertinggi");
}

#[tokio::test]
async fn test_penetapan_unranked_code_defaults_thresholds_to_zero() {
    let mut body = full_snapshot("penetapan");
    body["employee"] = employee("Pengatur Tingkat I", "II/d");

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["destination"], "N/A");
    assert_eq!(decimal_at(&report, "/pangkat_minimal"), Decimal::ZERO);
    assert!(has_warning(&report, "UNRANKED"));
}

// =============================================================================
// Akumulasi and Konversi
// =============================================================================

#[tokio::test]
async fn test_akumulasi_reports_months_per_period() {
    let (status, report) = post(
        create_router_for_test(),
        "/reports",
        full_snapshot("akumulasi"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["kind"], "akumulasi");
    let lines = report["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["months"], 12);
    assert_eq!(lines[1]["months"], 12);
    assert_eq!(decimal_at(&report, "/total_credit"), decimal("61.221"));
}

#[tokio::test]
async fn test_konversi_includes_requested_extras_in_total() {
    let mut body = full_snapshot("konversi");
    body["include_integration"] = json!(true);
    body["include_education"] = json!(true);

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["kind"], "konversi");
    assert_eq!(report["lines"].as_array().unwrap().len(), 4);
    assert_eq!(decimal_at(&report, "/total_credit"), decimal("98.221"));
    assert!(report["lines"][2].get("months").map_or(true, Value::is_null));
}

#[tokio::test]
async fn test_selection_limits_report_to_listed_assessments() {
    let mut body = full_snapshot("konversi");
    body["selection"] = json!({ "mode": "only", "ids": ["ak_2024"] });

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    let lines = report["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["assessment_id"], "ak_2024");
    assert_eq!(decimal_at(&report, "/total_credit"), decimal("5.010"));
}

#[tokio::test]
async fn test_empty_selection_with_integration_only() {
    let mut body = full_snapshot("konversi");
    body["selection"] = json!({ "mode": "only", "ids": [] });
    body["include_integration"] = json!(true);

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["lines"].as_array().unwrap().len(), 1);
    assert_eq!(decimal_at(&report, "/total_credit"), decimal("10"));
    // Footer still comes from the latest record on file
    assert_eq!(report["footer"]["assessor_name"], "Dr. Ani Wulandari");
}

#[tokio::test]
async fn test_report_without_assessments_warns() {
    let mut body = full_snapshot("akumulasi");
    body["assessments"] = json!([]);

    let (status, report) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&report, "/total_credit"), Decimal::ZERO);
    assert_eq!(report["header"]["year"], 2025);
    assert!(has_warning(&report, "NO_ASSESSMENTS"));
}

// =============================================================================
// Documents
// =============================================================================

#[tokio::test]
async fn test_html_download_for_penetapan() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reports/html")
                .header("Content-Type", "application/json")
                .body(Body::from(full_snapshot("penetapan").to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"Penetapan an.Budi Santoso periode 01-01-2023 s.d 31-12-2024.html\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("PENETAPAN ANGKA KREDIT"));
    assert!(html.contains("61.221"));
    assert!(html.contains("Tidak dapat"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_duplicate_certificate_number_is_rejected() {
    let mut body = full_snapshot("konversi");
    body["education_credits"][1]["certificate_number"] = json!("SERT/001");

    let (status, error) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RECORD");
}

#[tokio::test]
async fn test_oversized_education_credits_are_rejected() {
    let mut body = full_snapshot("konversi");
    body["education_credits"][0]["credit"] = json!("79228162514264337593543950335");
    body["education_credits"][1]["credit"] = json!("79228162514264337593543950335");
    body["include_education"] = json!(true);

    let (status, error) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RECORD");
}

#[tokio::test]
async fn test_negative_integration_credit_is_rejected() {
    let mut body = full_snapshot("penetapan");
    body["integration_credit"] = json!("-5");
    body["include_integration"] = json!(true);

    let (status, error) = post(create_router_for_test(), "/reports/html", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_RECORD");
}

#[tokio::test]
async fn test_unknown_report_kind_is_malformed() {
    let mut body = full_snapshot("konversi");
    body["kind"] = json!("rekap");

    let (status, error) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_kind_is_validation_error() {
    let mut body = full_snapshot("konversi");
    body.as_object_mut().unwrap().remove("kind");

    let (status, error) = post(create_router_for_test(), "/reports", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Library usage
// =============================================================================

fn library_person(id: &str, name: &str, nip: &str, rank_code: &str) -> Employee {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "nip": nip,
        "birthplace": "Bandung",
        "birthdate": "1980-01-01",
        "sex": "Perempuan",
        "rank_name": "Penata",
        "rank_code": rank_code,
        "rank_effective_date": "2019-10-01",
        "job_title": "Statistisi Ahli Muda",
        "work_unit": "BPS"
    }))
    .unwrap()
}

#[test]
fn test_library_store_report_and_render() {
    let config = ConfigLoader::load("./config/angka_kredit").expect("Failed to load config");
    let tables = config.tables();

    let mut store = MemoryStore::new();
    store
        .insert_employee(library_person("peg_010", "Siti Rahma", "1", "III/c"))
        .unwrap();
    store
        .insert_assessor(library_person("pen_010", "Agus Salim", "2", "IV/b"))
        .unwrap();
    store
        .insert_institution(Institution {
            id: "ins_010".to_string(),
            name: "Badan Pusat Statistik".to_string(),
        })
        .unwrap();

    let derivation = store
        .record_assessment(
            AssessmentDraft {
                id: "ak_010".to_string(),
                employee_id: "peg_010".to_string(),
                institution_id: "ins_010".to_string(),
                assessor_id: "pen_010".to_string(),
                period_start: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                period_end: chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                rating: "Baik".to_string(),
                job_level: "KEAHLIAN - AHLI MUDA".to_string(),
                decree_date: None,
                decree_place: "Jakarta".to_string(),
            },
            tables,
        )
        .unwrap();
    assert_eq!(derivation.assessment.credit, decimal("0.684"));
    assert!(derivation.warnings.is_empty());

    let request = ReportRequest {
        employee_id: "peg_010".to_string(),
        selection: AssessmentSelection::All,
        include_integration: false,
        include_education: false,
        kind: ReportKind::Akumulasi,
        as_of: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
    };
    let report = build_report(&store, tables, &request).unwrap();
    assert!(matches!(report, Report::Akumulasi(_)));
    // No decree date on the assessment: the year falls back to its period end
    assert_eq!(report.header().year, 2024);

    let document = HtmlRenderer::new().unwrap().render(&report).unwrap();
    assert_eq!(
        document.filename,
        "Akumulasi an.Siti Rahma periode 01-01-2024 s.d 10-01-2024.html"
    );
    let html = String::from_utf8(document.bytes).unwrap();
    assert!(html.contains("0.684"));
    assert!(html.contains("Badan Pusat Statistik"));
}
