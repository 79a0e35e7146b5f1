//! Hospital location records edited by the TXT generator.

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};

/// One hospital location in `cms-hpt.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalRecord {
    pub name: String,
    pub source_page_url: String,
    pub mrf_url: String,
    pub contact_name: String,
    pub contact_email: String,
}

impl HospitalRecord {
    /// Field values in file order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.source_page_url.as_str(),
            self.mrf_url.as_str(),
            self.contact_name.as_str(),
            self.contact_email.as_str(),
        ]
    }

    /// Every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|v| v.trim().is_empty())
    }

    /// No field is empty after trimming.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|v| !v.trim().is_empty())
    }
}

/// Partial update for a record. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalRecordPatch {
    pub name: Option<String>,
    pub source_page_url: Option<String>,
    pub mrf_url: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

impl HospitalRecordPatch {
    fn apply(self, record: &mut HospitalRecord) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.source_page_url {
            record.source_page_url = v;
        }
        if let Some(v) = self.mrf_url {
            record.mrf_url = v;
        }
        if let Some(v) = self.contact_name {
            record.contact_name = v;
        }
        if let Some(v) = self.contact_email {
            record.contact_email = v;
        }
    }
}

/// Ordered, never-empty list of hospital records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<HospitalRecord>,
}

impl Default for RecordList {
    fn default() -> Self {
        Self {
            records: vec![HospitalRecord::default()],
        }
    }
}

impl RecordList {
    /// A list holding one empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing records. An empty input yields one empty record.
    pub fn from_records(records: Vec<HospitalRecord>) -> Self {
        if records.is_empty() {
            Self::default()
        } else {
            Self { records }
        }
    }

    pub fn records(&self) -> &[HospitalRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HospitalRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append an empty record.
    pub fn add_record(&mut self) -> usize {
        self.records.push(HospitalRecord::default());
        self.records.len() - 1
    }

    /// Remove the record at `index`, keeping the order of the rest.
    pub fn remove_record(&mut self, index: usize) -> RecordResult<HospitalRecord> {
        self.check_index(index)?;
        if self.records.len() == 1 {
            return Err(RecordError::LastRecord);
        }
        Ok(self.records.remove(index))
    }

    /// Merge the supplied fields into the record at `index`.
    pub fn update_record(&mut self, index: usize, patch: HospitalRecordPatch) -> RecordResult<()> {
        self.check_index(index)?;
        patch.apply(&mut self.records[index]);
        Ok(())
    }

    fn check_index(&self, index: usize) -> RecordResult<()> {
        if index >= self.records.len() {
            return Err(RecordError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> HospitalRecord {
        HospitalRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_list_has_one_empty_record() {
        let list = RecordList::new();
        assert_eq!(list.len(), 1);
        assert!(list.records()[0].is_blank());
    }

    #[test]
    fn test_add_appends_empty_record() {
        let mut list = RecordList::from_records(vec![named("A")]);
        let index = list.add_record();

        assert_eq!(index, 1);
        assert_eq!(list.records()[0].name, "A");
        assert!(list.records()[1].is_blank());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut list = RecordList::from_records(vec![named("A"), named("B"), named("C")]);
        let removed = list.remove_record(1).unwrap();

        assert_eq!(removed.name, "B");
        let names: Vec<&str> = list.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_refuses_last_and_out_of_range() {
        let mut list = RecordList::new();
        assert_eq!(list.remove_record(0), Err(RecordError::LastRecord));
        assert_eq!(
            list.remove_record(4),
            Err(RecordError::IndexOutOfRange { index: 4, len: 1 })
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut list = RecordList::from_records(vec![HospitalRecord {
            name: "A".into(),
            contact_name: "Jo".into(),
            ..Default::default()
        }]);
        list.update_record(
            0,
            HospitalRecordPatch {
                mrf_url: Some("https://example.com/mrf.json".into()),
                ..Default::default()
            },
        )
        .unwrap();

        let record = list.get(0).unwrap();
        assert_eq!(record.name, "A");
        assert_eq!(record.contact_name, "Jo");
        assert_eq!(record.mrf_url, "https://example.com/mrf.json");
    }

    #[test]
    fn test_from_empty_records() {
        assert_eq!(RecordList::from_records(Vec::new()), RecordList::new());
    }

    #[test]
    fn test_record_json_keys() {
        let record: HospitalRecord =
            serde_json::from_str(r#"{"name":"A","mrfUrl":"https://a.org/x"}"#).unwrap();
        assert_eq!(record.mrf_url, "https://a.org/x");
        assert_eq!(record.contact_email, "");
    }
}
