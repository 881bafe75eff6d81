//! In-memory record store.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{AssessmentDerivation, derive_assessment};
use crate::config::CreditTables;
use crate::error::{CreditError, CreditResult};
use crate::models::{
    Assessment, AssessmentDraft, Assessor, EducationCredit, Employee, Institution,
    IntegrationCredit,
};

use super::CreditRecordStore;

/// A record store held entirely in memory.
///
/// Records keep insertion order. Inserts enforce the uniqueness rules of
/// the underlying schema: employee NIP, institution name and education
/// certificate number.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    employees: Vec<Employee>,
    assessors: Vec<Assessor>,
    institutions: Vec<Institution>,
    assessments: Vec<Assessment>,
    integration_credits: Vec<IntegrationCredit>,
    education_credits: Vec<EducationCredit>,
}

/// Largest integration or education credit a single record may carry.
pub const MAX_RECORDED_CREDIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

fn check_amount(field: &str, amount: Decimal) -> CreditResult<()> {
    if amount < Decimal::ZERO || amount > MAX_RECORDED_CREDIT {
        return Err(CreditError::InvalidRecord {
            field: field.to_string(),
            message: format!(
                "{} is outside the range 0 to {}",
                amount, MAX_RECORDED_CREDIT
            ),
        });
    }
    Ok(())
}

fn duplicate(field: &str, value: &str) -> CreditError {
    CreditError::InvalidRecord {
        field: field.to_string(),
        message: format!("'{}' is already registered", value),
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidRecord`] if the id or NIP is taken.
    pub fn insert_employee(&mut self, employee: Employee) -> CreditResult<()> {
        if self.employees.iter().any(|e| e.id == employee.id) {
            return Err(duplicate("id", &employee.id));
        }
        if self.employees.iter().any(|e| e.nip == employee.nip) {
            return Err(duplicate("nip", &employee.nip));
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Adds an assessor.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidRecord`] if the id or NIP is taken.
    pub fn insert_assessor(&mut self, assessor: Assessor) -> CreditResult<()> {
        if self.assessors.iter().any(|a| a.id == assessor.id) {
            return Err(duplicate("id", &assessor.id));
        }
        if self.assessors.iter().any(|a| a.nip == assessor.nip) {
            return Err(duplicate("nip", &assessor.nip));
        }
        self.assessors.push(assessor);
        Ok(())
    }

    /// Adds an institution.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidRecord`] if the id or name is taken.
    pub fn insert_institution(&mut self, institution: Institution) -> CreditResult<()> {
        if self.institutions.iter().any(|i| i.id == institution.id) {
            return Err(duplicate("id", &institution.id));
        }
        if self.institutions.iter().any(|i| i.name == institution.name) {
            return Err(duplicate("name", &institution.name));
        }
        self.institutions.push(institution);
        Ok(())
    }

    /// Derives an assessment from its draft and stores it.
    ///
    /// The stored credit always comes from the calculator. Warnings about
    /// unknown labels are returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::InvalidPeriod`] if the period is inverted,
    /// [`CreditError::EmployeeNotFound`] if the employee does not exist,
    /// or [`CreditError::InvalidRecord`] if the id is taken.
    pub fn record_assessment(
        &mut self,
        draft: AssessmentDraft,
        tables: &CreditTables,
    ) -> CreditResult<AssessmentDerivation> {
        self.require_employee(&draft.employee_id)?;
        if self.assessments.iter().any(|a| a.id == draft.id) {
            return Err(duplicate("id", &draft.id));
        }

        let derivation = derive_assessment(draft, tables)?;
        debug!(
            assessment_id = %derivation.assessment.id,
            credit = %derivation.assessment.credit,
            "Recorded assessment"
        );
        self.assessments.push(derivation.assessment.clone());
        Ok(derivation)
    }

    /// Adds an integration credit.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::EmployeeNotFound`] if the employee does not
    /// exist, or [`CreditError::InvalidRecord`] if the amount is negative
    /// or above [`MAX_RECORDED_CREDIT`].
    pub fn insert_integration_credit(&mut self, credit: IntegrationCredit) -> CreditResult<()> {
        self.require_employee(&credit.employee_id)?;
        check_amount("amount", credit.amount)?;
        self.integration_credits.push(credit);
        Ok(())
    }

    /// Adds an education credit.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::EmployeeNotFound`] if the employee does not
    /// exist, or [`CreditError::InvalidRecord`] if the id or certificate
    /// number is taken or the explicit credit is negative or above
    /// [`MAX_RECORDED_CREDIT`].
    pub fn insert_education_credit(&mut self, credit: EducationCredit) -> CreditResult<()> {
        self.require_employee(&credit.employee_id)?;
        if let Some(amount) = credit.credit {
            check_amount("credit", amount)?;
        }
        if self.education_credits.iter().any(|e| e.id == credit.id) {
            return Err(duplicate("id", &credit.id));
        }
        if self
            .education_credits
            .iter()
            .any(|e| e.certificate_number == credit.certificate_number)
        {
            return Err(duplicate("certificate_number", &credit.certificate_number));
        }
        self.education_credits.push(credit);
        Ok(())
    }

    /// Removes an employee together with their assessments, integration
    /// credit and education credits.
    ///
    /// Returns the removed employee, or `None` if the id was unknown.
    pub fn remove_employee(&mut self, id: &str) -> Option<Employee> {
        let idx = self.employees.iter().position(|e| e.id == id)?;
        let employee = self.employees.remove(idx);

        self.assessments.retain(|a| a.employee_id != id);
        self.integration_credits.retain(|c| c.employee_id != id);
        self.education_credits.retain(|c| c.employee_id != id);

        debug!(employee_id = %id, "Removed employee and dependent records");
        Some(employee)
    }

    fn require_employee(&self, id: &str) -> CreditResult<()> {
        if self.employee(id).is_none() {
            return Err(CreditError::EmployeeNotFound { id: id.to_string() });
        }
        Ok(())
    }
}

impl CreditRecordStore for MemoryStore {
    fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    fn assessor(&self, id: &str) -> Option<&Assessor> {
        self.assessors.iter().find(|a| a.id == id)
    }

    fn institution(&self, id: &str) -> Option<&Institution> {
        self.institutions.iter().find(|i| i.id == id)
    }

    fn assessments_for(&self, employee_id: &str) -> Vec<&Assessment> {
        self.assessments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .collect()
    }

    fn integration_credit_for(&self, employee_id: &str) -> Option<&IntegrationCredit> {
        self.integration_credits
            .iter()
            .find(|c| c.employee_id == employee_id)
    }

    fn education_credits_for(&self, employee_id: &str) -> Vec<&EducationCredit> {
        self.education_credits
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .collect()
    }
}
