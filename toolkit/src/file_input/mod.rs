//! File input state: accepted-type enforcement and drag tracking.
//!
//! Platform free. The frontend component feeds it the names and MIME types
//! of the picked files and acts on the returned [`ChangeOutcome`].

/// Name and MIME type of a picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub mime: String,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}

/// A parsed `accept` list such as `.csv,.json,text/csv,application/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedTypes {
    patterns: Vec<String>,
}

impl AcceptedTypes {
    /// Split a comma separated list. Blank entries are dropped.
    pub fn parse(list: &str) -> Self {
        Self {
            patterns: list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// A file matches a pattern by name suffix or by MIME substring
    /// (with `*` removed from the pattern).
    pub fn matches(&self, file: &CandidateFile) -> bool {
        self.patterns.iter().any(|pattern| {
            let by_name = file.name.len() > pattern.len() && file.name.ends_with(pattern.as_str());
            by_name || file.mime.contains(&pattern.replace('*', ""))
        })
    }

    /// Every file matches some pattern.
    pub fn accepts(&self, files: &[CandidateFile]) -> bool {
        files.iter().all(|f| self.matches(f))
    }
}

/// What the component must do after a change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Forward the change; carries the first file (none for an empty selection)
    Accepted(Option<CandidateFile>),
    /// Swallow the change event
    Rejected,
}

impl ChangeOutcome {
    pub fn forwards_change(&self) -> bool {
        matches!(self, ChangeOutcome::Accepted(_))
    }
}

/// Transient state of one file input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInputState {
    accept: Option<AcceptedTypes>,
    pub is_dragging: bool,
    pub selected_file: Option<CandidateFile>,
    pub show_type_error: bool,
}

impl FileInputState {
    /// `accept = None` lets every file through.
    pub fn new(accept: Option<&str>) -> Self {
        Self {
            accept: accept.map(AcceptedTypes::parse),
            ..Default::default()
        }
    }

    pub fn accept(&self) -> Option<&AcceptedTypes> {
        self.accept.as_ref()
    }

    /// Handle a change of the native control.
    ///
    /// The caller resets the control's value afterwards in both cases.
    pub fn on_change(&mut self, files: &[CandidateFile]) -> ChangeOutcome {
        let allowed = self.accept.as_ref().map_or(true, |a| a.accepts(files));

        if !allowed {
            log::debug!("Rejected file selection of {} file(s)", files.len());
            self.selected_file = None;
            self.show_type_error = true;
            return ChangeOutcome::Rejected;
        }

        self.show_type_error = false;
        self.selected_file = files.first().cloned();
        ChangeOutcome::Accepted(self.selected_file.clone())
    }

    pub fn drag_over(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    /// A drop ends dragging; the caller forwards the drop event.
    pub fn dropped(&mut self) {
        self.is_dragging = false;
    }

    /// Classes for the drop target element.
    pub fn target_class(&self) -> String {
        let mut class = String::from("usa-file-input__target");
        if self.is_dragging {
            class.push_str(" usa-file-input--drag");
        }
        if self.show_type_error {
            class.push_str(" has-invalid-file");
        }
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ACCEPTED_FILE_TYPES;

    fn csv(name: &str) -> CandidateFile {
        CandidateFile::new(name, "text/csv")
    }

    #[test]
    fn test_parse_trims_patterns() {
        let accepted = AcceptedTypes::parse(" .csv, .json ,,text/csv");
        assert_eq!(accepted.patterns(), &[".csv", ".json", "text/csv"]);
    }

    #[test]
    fn test_match_by_suffix_or_mime() {
        let accepted = AcceptedTypes::parse(".csv,application/*");

        assert!(accepted.matches(&CandidateFile::new("prices.csv", "")));
        assert!(accepted.matches(&CandidateFile::new("prices.bin", "application/json")));
        assert!(!accepted.matches(&CandidateFile::new(".csv", "")));
        assert!(!accepted.matches(&CandidateFile::new("prices.csv.txt", "text/plain")));
    }

    #[test]
    fn test_whole_selection_must_match() {
        let mut state = FileInputState::new(Some(ACCEPTED_FILE_TYPES));
        let outcome = state.on_change(&[csv("a.csv"), CandidateFile::new("b.xlsx", "")]);

        assert_eq!(outcome, ChangeOutcome::Rejected);
        assert!(state.show_type_error);
        assert!(state.selected_file.is_none());
        assert_eq!(state.target_class(), "usa-file-input__target has-invalid-file");
    }

    #[test]
    fn test_rejection_clears_previous_selection() {
        let mut state = FileInputState::new(Some(".csv"));
        state.on_change(&[csv("a.csv")]);
        assert_eq!(state.selected_file, Some(csv("a.csv")));

        state.on_change(&[CandidateFile::new("b.pdf", "application/pdf")]);
        assert!(state.selected_file.is_none());

        let outcome = state.on_change(&[csv("c.csv"), csv("d.csv")]);
        assert_eq!(outcome, ChangeOutcome::Accepted(Some(csv("c.csv"))));
        assert!(!state.show_type_error);
    }

    #[test]
    fn test_no_accept_list_allows_everything() {
        let mut state = FileInputState::new(None);
        let outcome = state.on_change(&[CandidateFile::new("anything.bin", "")]);
        assert!(outcome.forwards_change());
    }

    #[test]
    fn test_empty_selection_is_accepted() {
        let mut state = FileInputState::new(Some(".csv"));
        assert_eq!(state.on_change(&[]), ChangeOutcome::Accepted(None));
        assert!(state.selected_file.is_none());
    }

    #[test]
    fn test_drag_tracking() {
        let mut state = FileInputState::default();
        state.drag_over();
        assert!(state.is_dragging);
        assert_eq!(state.target_class(), "usa-file-input__target usa-file-input--drag");
        state.drag_leave();
        assert!(!state.is_dragging);
        state.drag_over();
        state.dropped();
        assert!(!state.is_dragging);
    }
}
