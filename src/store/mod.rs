//! Record store seam.
//!
//! Report building only reads records. [`CreditRecordStore`] is the read
//! side of whatever persistence backs the engine; [`MemoryStore`] is the
//! in-process implementation used by the HTTP snapshot endpoints and tests.

mod memory;

pub use memory::{MAX_RECORDED_CREDIT, MemoryStore};

use crate::models::{Assessment, Assessor, EducationCredit, Employee, Institution, IntegrationCredit};

/// Read access to the records a report is built from.
pub trait CreditRecordStore {
    /// Looks up an employee by id.
    fn employee(&self, id: &str) -> Option<&Employee>;

    /// Looks up an assessor by id.
    fn assessor(&self, id: &str) -> Option<&Assessor>;

    /// Looks up an institution by id.
    fn institution(&self, id: &str) -> Option<&Institution>;

    /// Returns every assessment of an employee, in insertion order.
    fn assessments_for(&self, employee_id: &str) -> Vec<&Assessment>;

    /// Returns the employee's integration credit. When several exist the
    /// first one recorded wins.
    fn integration_credit_for(&self, employee_id: &str) -> Option<&IntegrationCredit>;

    /// Returns every education credit of an employee, in insertion order.
    fn education_credits_for(&self, employee_id: &str) -> Vec<&EducationCredit>;
}
