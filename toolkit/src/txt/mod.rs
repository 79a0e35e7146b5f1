//! TXT generator: hospital records, the `cms-hpt.txt` format and its field
//! rules.

mod records;
mod rules;
mod serializer;

pub use records::{HospitalRecord, HospitalRecordPatch, RecordList};
pub use rules::{check_records, is_valid_email, is_valid_url};
pub use serializer::{parse, serialize, txt_artifact, LABELS};
