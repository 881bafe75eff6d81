//! Application state for the Angka Kredit API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, CreditTables};
use crate::error::CreditResult;
use crate::render::HtmlRenderer;

/// Shared application state.
///
/// Holds the credit tables and the HTML renderer. Both are read-only after
/// start-up, so cloning the state only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    /// The loaded credit tables.
    config: Arc<ConfigLoader>,
    /// The document renderer.
    renderer: Arc<HtmlRenderer>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::RenderError`](crate::error::CreditError::RenderError)
    /// if the built-in templates fail to parse.
    pub fn new(config: ConfigLoader) -> CreditResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            renderer: Arc::new(HtmlRenderer::new()?),
        })
    }

    /// Returns the credit tables.
    pub fn tables(&self) -> &CreditTables {
        self.config.tables()
    }

    /// Returns the HTML renderer.
    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }
}
