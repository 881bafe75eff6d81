//! Document rendering.
//!
//! A renderer takes a computed [`Report`] and produces the bytes of a
//! printable document. Renderers never compute: every figure comes from
//! the payload.

mod html;

pub use html::HtmlRenderer;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CreditResult;
use crate::models::Report;

/// A rendered document ready to be served or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Suggested download filename.
    pub filename: String,
    /// Document content.
    pub bytes: Vec<u8>,
}

/// Turns a report payload into a document.
pub trait DocumentRenderer {
    /// Renders the report.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::RenderError`](crate::error::CreditError::RenderError)
    /// if the document cannot be produced.
    fn render(&self, report: &Report) -> CreditResult<RenderedDocument>;
}

/// Formats a credit figure with exactly three decimal places.
///
/// # Examples
///
/// ```
/// use angka_kredit::render::format_credit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_credit(Decimal::new(50, 0)), "50.000");
/// assert_eq!(format_credit(Decimal::new(-937885, 4)), "-93.789");
/// ```
pub fn format_credit(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.3}", rounded)
}
