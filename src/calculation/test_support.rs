//! Shared fixtures for report tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{ConfigLoader, CreditTables};
use crate::models::{
    AssessmentDraft, EducationCredit, Employee, Institution, IntegrationCredit,
};
use crate::store::MemoryStore;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tables() -> CreditTables {
    ConfigLoader::load("./config/angka_kredit")
        .expect("Failed to load config")
        .tables()
        .clone()
}

pub fn person(id: &str, name: &str, nip: &str, rank_name: &str, rank_code: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        nip: nip.to_string(),
        card_serial: None,
        birthplace: "Bandung".to_string(),
        birthdate: date(1986, 2, 14),
        sex: "Laki-laki".to_string(),
        rank_name: rank_name.to_string(),
        rank_code: rank_code.to_string(),
        rank_effective_date: date(2020, 4, 1),
        job_title: "Pranata Komputer Ahli Madya".to_string(),
        job_title_effective_date: Some(date(2021, 1, 4)),
        work_unit: "Dinas Komunikasi dan Informatika".to_string(),
        decree_date: None,
    }
}

pub fn draft(
    id: &str,
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    rating: &str,
    job_level: &str,
) -> AssessmentDraft {
    AssessmentDraft {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        institution_id: "ins_001".to_string(),
        assessor_id: "pen_001".to_string(),
        period_start: start,
        period_end: end,
        rating: rating.to_string(),
        job_level: job_level.to_string(),
        decree_date: None,
        decree_place: "Bandung".to_string(),
    }
}

/// A store with one assessor and one institution and an employee holding
/// `rank_code`, with no credit records.
pub fn bare_store(rank_name: &str, rank_code: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .insert_employee(person(
            "peg_001",
            "Budi Santoso",
            "198602142010011001",
            rank_name,
            rank_code,
        ))
        .unwrap();
    store
        .insert_assessor(person(
            "pen_001",
            "Dr. Ani Wulandari",
            "197001011995032001",
            "Pembina Tingkat I",
            "IV/b",
        ))
        .unwrap();
    store
        .insert_institution(Institution {
            id: "ins_001".to_string(),
            name: "Badan Kepegawaian Daerah".to_string(),
        })
        .unwrap();
    store
}

/// A III/b employee with:
///
/// - 2023 Sangat Baik / Ahli Madya, credit 56.211
/// - 2024 Baik / Terampil, credit 5.010, decreed 15-01-2025
/// - integration credit 10
/// - two education records, one explicit (2) and one derived (25)
pub fn fixture_store(tables: &CreditTables) -> MemoryStore {
    let mut store = bare_store("Penata Muda Tingkat I", "III/b");

    let mut latest = draft(
        "ak_2024",
        "peg_001",
        date(2024, 1, 1),
        date(2024, 12, 31),
        "Baik",
        "KETERAMPILAN - TERAMPIL",
    );
    latest.decree_date = Some(date(2025, 1, 15));
    store.record_assessment(latest, tables).unwrap();
    store
        .record_assessment(
            draft(
                "ak_2023",
                "peg_001",
                date(2023, 1, 1),
                date(2023, 12, 31),
                "Sangat Baik",
                "KEAHLIAN - AHLI MADYA",
            ),
            tables,
        )
        .unwrap();

    store
        .insert_integration_credit(IntegrationCredit {
            employee_id: "peg_001".to_string(),
            amount: dec("10"),
        })
        .unwrap();

    for (id, credit) in [("edu_1", Some(dec("2"))), ("edu_2", None)] {
        store
            .insert_education_credit(EducationCredit {
                id: id.to_string(),
                employee_id: "peg_001".to_string(),
                institution_id: "ins_001".to_string(),
                assessor_id: "pen_001".to_string(),
                activity_type: "Diklat Fungsional".to_string(),
                level: "Nasional".to_string(),
                execution_date: date(2024, 6, 10),
                duration_hours: 40,
                credit,
                decree_date: None,
                decree_place: String::new(),
                certificate_number: format!("SERT/{}", id),
            })
            .unwrap();
    }

    store
}
