//! Frontend configuration.
//!
//! Shared file names and accepted types come from [`hpt_toolkit::config`].

pub use hpt_toolkit::config::{
    ACCEPTED_FILE_TYPES, RESULTS_FILE_NAME, SCHEMA_VERSIONS, TXT_FILE_NAME,
};

/// CMS guide to building a machine-readable file.
pub const MRF_GUIDE_URL: &str = "https://www.cms.gov/files/document/steps-machine-readable-file.pdf";

/// Hospital Price Transparency landing page.
pub const ABOUT_URL: &str = "https://www.cms.gov/hospital-price-transparency";

pub const RESOURCES_URL: &str = "https://www.cms.gov/hospital-price-transparency/resources";

/// File naming requirements.
pub const NAMING_RULE_URL: &str =
    "https://www.ecfr.gov/current/title-45/subtitle-A/subchapter-E/part-180#p-180.50(d)(5)";

/// TXT file requirements.
pub const TXT_RULE_URL: &str =
    "https://www.ecfr.gov/current/title-45/subtitle-A/subchapter-E/part-180#p-180.50(d)(6)";
