//! Routed pages.
//!
//! - [`HomePage`] - Overview of the tools
//! - [`ValidatorPage`] - Online MRF validator
//! - [`WizardPage`] - MRF naming wizard
//! - [`TxtGeneratorPage`] - `cms-hpt.txt` generator

mod home;
mod txt_generator;
mod validator;
mod wizard;

pub use home::*;
pub use txt_generator::*;
pub use validator::*;
pub use wizard::*;
