//! Employee, assessor and institution models.
//!
//! This module defines the people and organisations a credit report is
//! about or signed by.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A civil servant whose credit points are administered (pegawai).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque store identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// National employee identification number (NIP), unique.
    pub nip: String,
    /// Employee card serial number (no. seri karpeg).
    #[serde(default)]
    pub card_serial: Option<String>,
    /// Place of birth.
    pub birthplace: String,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Sex as recorded on the personnel file.
    pub sex: String,
    /// Rank title (pangkat), e.g. "Penata Muda".
    pub rank_name: String,
    /// Rank code (golongan) as entered, e.g. "III/a" or "3A".
    pub rank_code: String,
    /// Effective date of the current rank (TMT pangkat).
    pub rank_effective_date: NaiveDate,
    /// Job title (jabatan).
    pub job_title: String,
    /// Effective date of the current job title (TMT jabatan).
    pub job_title_effective_date: Option<NaiveDate>,
    /// Work unit (unit kerja).
    pub work_unit: String,
    /// Decree date recorded on the employee file, if any.
    #[serde(default)]
    pub decree_date: Option<NaiveDate>,
}

/// The signing official on a report (penilai). Same shape as an employee.
pub type Assessor = Employee;

impl Employee {
    /// Returns the "job title / TMT" line shown in report headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use angka_kredit::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "peg_001".to_string(),
    ///     name: "Siti Rahma".to_string(),
    ///     nip: "198501012010012001".to_string(),
    ///     card_serial: None,
    ///     birthplace: "Bandung".to_string(),
    ///     birthdate: NaiveDate::from_ymd_opt(1985, 1, 1).unwrap(),
    ///     sex: "Perempuan".to_string(),
    ///     rank_name: "Penata".to_string(),
    ///     rank_code: "III/c".to_string(),
    ///     rank_effective_date: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
    ///     job_title: "Analis Kebijakan Ahli Muda".to_string(),
    ///     job_title_effective_date: NaiveDate::from_ymd_opt(2021, 1, 5),
    ///     work_unit: "Bagian Organisasi".to_string(),
    ///     decree_date: None,
    /// };
    /// assert_eq!(employee.job_title_line(), "Analis Kebijakan Ahli Muda / 05-01-2021");
    /// ```
    pub fn job_title_line(&self) -> String {
        match self.job_title_effective_date {
            Some(tmt) => format!("{} / {}", self.job_title, super::format_date(tmt)),
            None => self.job_title.clone(),
        }
    }
}

/// An issuing institution (instansi).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Opaque store identifier.
    pub id: String,
    /// Institution name, unique.
    pub name: String,
}
