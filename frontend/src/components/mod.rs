//! UI components shared by the pages.
//!
//! # Layout Components
//! - [`Header`] - Title and primary navigation
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`FileInput`] - File picker with drag & drop and accepted-type checks
//! - [`ValidationResults`] - Findings of the latest validation run
//! - [`AlertBox`] / [`AlertMessage`] - USWDS alerts

mod alert;
mod file_input;
mod footer;
mod header;
mod validation_results;

pub use alert::*;
pub use file_input::*;
pub use footer::*;
pub use header::*;
pub use validation_results::*;
