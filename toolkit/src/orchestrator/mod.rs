//! Validation orchestration.
//!
//! [`ValidationSession`] turns a file selection into a persisted, classified
//! result:
//!
//! ```text
//! begin(name) ──▶ loading ──▶ validator ──▶ succeeded | failed ──▶ persisted
//!        └──────▶ unsupported format ─────────────────────────────▶ persisted
//! ```
//!
//! Each submission carries a [`RequestToken`]. Only the result of the most
//! recent submission is applied; anything that resolves later is dropped.

mod export;
mod snapshot;

pub use export::{render_results, results_artifact};
pub use snapshot::{timestamp_now, FindingSummary, RunStatus, ValidationSnapshot};

use std::cell::{Cell, RefCell};

use crate::config::{DEFAULT_SCHEMA_VERSION, VALIDATION_STORAGE_KEY};
use crate::models::{FileFormat, UploadedFile};
use crate::storage::{KeyValueStore, PersistedState};
use crate::validation::{MrfValidator, ValidationOptions};

/// Identifies one submission. Later submissions get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// A started run, waiting for the validator.
#[derive(Debug, Clone)]
pub struct Submission {
    pub token: RequestToken,
    pub filename: String,
    pub schema_version: String,
    /// `None` when the extension is not supported; such a run is already over
    pub format: Option<FileFormat>,
    pub started_at: String,
}

type Observer = Box<dyn Fn(&ValidationSnapshot)>;

/// The validation workflow for one page (or one CLI invocation).
pub struct ValidationSession<V: MrfValidator, S: KeyValueStore> {
    validator: V,
    state: PersistedState<ValidationSnapshot, S>,
    options: ValidationOptions,
    snapshot: RefCell<ValidationSnapshot>,
    schema_version: RefCell<String>,
    latest: Cell<u64>,
    observers: RefCell<Vec<Observer>>,
}

impl<V: MrfValidator, S: KeyValueStore> ValidationSession<V, S> {
    /// Create a session, restoring the last snapshot from `store`.
    pub fn new(validator: V, store: S, options: ValidationOptions) -> Self {
        let state = PersistedState::new(store, VALIDATION_STORAGE_KEY);
        let snapshot: ValidationSnapshot = state.load();
        let schema_version = if snapshot.schema_version.is_empty() {
            DEFAULT_SCHEMA_VERSION.to_string()
        } else {
            snapshot.schema_version.clone()
        };

        Self {
            validator,
            state,
            options,
            snapshot: RefCell::new(snapshot),
            schema_version: RefCell::new(schema_version),
            latest: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn max_findings(&self) -> usize {
        self.options.max_findings
    }

    /// Current snapshot (cloned).
    pub fn snapshot(&self) -> ValidationSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Whether the current snapshot's file name follows the naming rule.
    pub fn filename_valid(&self) -> bool {
        self.validator
            .validate_filename(&self.snapshot.borrow().filename)
    }

    pub fn schema_version(&self) -> String {
        self.schema_version.borrow().clone()
    }

    /// Schema version for the next submission.
    pub fn set_schema_version(&self, version: impl Into<String>) {
        *self.schema_version.borrow_mut() = version.into();
    }

    /// Call `observer` after every snapshot change.
    pub fn subscribe(&self, observer: impl Fn(&ValidationSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    // -------------------------------------------------------------------------
    // Workflow
    // -------------------------------------------------------------------------

    /// Start a run for `filename`.
    ///
    /// The snapshot is in its loading state when this returns. Unsupported
    /// extensions finish the run right away.
    pub fn begin(&self, filename: &str) -> Submission {
        let token = self.latest.get() + 1;
        self.latest.set(token);

        let schema_version = self.schema_version();
        let format = FileFormat::from_filename(filename);
        let submission = Submission {
            token: RequestToken(token),
            filename: filename.to_string(),
            schema_version: schema_version.clone(),
            format,
            started_at: timestamp_now(),
        };

        let loading = self.snapshot.borrow().file_selected(filename, &schema_version);
        self.apply(loading);

        match format {
            Some(format) => {
                log::info!(
                    "Validating {} as {} (schema {})",
                    filename,
                    format,
                    schema_version
                );
            }
            None => {
                log::warn!("Unsupported file type for {}", filename);
                self.finish(ValidationSnapshot::unsupported_format(
                    filename,
                    &schema_version,
                ));
            }
        }

        submission
    }

    /// Run the validator for a started submission.
    ///
    /// Returns `true` when the result was applied, `false` when the run had
    /// already ended or a newer submission superseded it.
    pub async fn complete(&self, submission: &Submission, source: &V::Source) -> bool {
        let Some(format) = submission.format else {
            return false;
        };

        let result = self
            .validator
            .validate(format, source, &submission.schema_version, &self.options)
            .await;
        let ended_at = timestamp_now();

        if submission.token.0 != self.latest.get() {
            log::info!(
                "Discarding late result for {} (request {}, latest {})",
                submission.filename,
                submission.token.0,
                self.latest.get()
            );
            return false;
        }

        let next = match result {
            Ok(mut output) => {
                // Errors and alerts never exceed the cap
                let max = self.options.max_findings;
                output.errors.truncate(max);
                if let Some(alerts) = output.alerts.as_mut() {
                    alerts.truncate(max);
                }

                let next = ValidationSnapshot::validation_succeeded(
                    &submission.filename,
                    &submission.schema_version,
                    output,
                    submission.started_at.clone(),
                    ended_at,
                );
                log::info!(
                    "Validated {}: valid={} errors={} warnings={} alerts={}",
                    next.filename,
                    next.valid,
                    next.errors.len(),
                    next.warnings.len(),
                    next.alerts.len()
                );
                next
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", submission.filename, e);
                ValidationSnapshot::validation_failed(
                    &submission.filename,
                    &submission.schema_version,
                )
            }
        };

        self.finish(next);
        true
    }

    /// `begin` followed by `complete`.
    pub async fn submit(&self, file: &UploadedFile<V::Source>) -> bool {
        let submission = self.begin(&file.name);
        self.complete(&submission, &file.source).await
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Apply a terminal snapshot and persist it.
    fn finish(&self, next: ValidationSnapshot) {
        if let Err(e) = self.state.save(&next) {
            log::warn!("Failed to persist validation results: {}", e);
        }
        self.apply(next);
    }

    fn apply(&self, next: ValidationSnapshot) {
        *self.snapshot.borrow_mut() = next;
        let current = self.snapshot();
        for observer in self.observers.borrow().iter() {
            observer(&current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ValidatorError, ValidatorResult};
    use crate::models::{RawFinding, ValidatorOutput};
    use crate::storage::MemoryStore;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::poll;
    use std::collections::VecDeque;
    use std::pin::pin;
    use std::rc::Rc;
    use std::task::Poll;

    type Reply = ValidatorResult<ValidatorOutput>;

    /// Answers each call with the next queued reply, once it is sent.
    #[derive(Default)]
    struct FakeValidator {
        replies: RefCell<VecDeque<oneshot::Receiver<Reply>>>,
        calls: Cell<usize>,
    }

    impl FakeValidator {
        fn queue(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push_back(rx);
            tx
        }

        async fn next_reply(&self) -> Reply {
            self.calls.set(self.calls.get() + 1);
            let rx = self.replies.borrow_mut().pop_front();
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ValidatorError::Collaborator("dropped".into()))),
                None => Err(ValidatorError::Collaborator("no reply queued".into())),
            }
        }
    }

    impl MrfValidator for FakeValidator {
        type Source = ();

        async fn validate_csv(
            &self,
            _source: &(),
            _schema_version: &str,
            _options: &ValidationOptions,
        ) -> ValidatorResult<ValidatorOutput> {
            self.next_reply().await
        }

        async fn validate_json(
            &self,
            _source: &(),
            _schema_version: &str,
            _options: &ValidationOptions,
        ) -> ValidatorResult<ValidatorOutput> {
            self.next_reply().await
        }

        fn validate_filename(&self, _name: &str) -> bool {
            true
        }
    }

    fn new_session(store: &MemoryStore) -> ValidationSession<FakeValidator, MemoryStore> {
        ValidationSession::new(FakeValidator::default(), store.clone(), ValidationOptions::default())
    }

    fn one_error() -> ValidatorOutput {
        ValidatorOutput {
            valid: false,
            errors: vec![RawFinding::error("B2", "bad")],
            alerts: None,
        }
    }

    #[test]
    fn test_default_snapshot_without_storage() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        let snapshot = session.snapshot();

        assert!(snapshot.valid);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.schema_version, "v2.0");
        assert_eq!(session.schema_version(), "v2.0");
    }

    #[test]
    fn test_unparsable_storage_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(VALIDATION_STORAGE_KEY, "not json").unwrap();
        let session = new_session(&store);
        assert_eq!(session.snapshot(), ValidationSnapshot::default());
    }

    #[test]
    fn test_submit_and_reload() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        session.validator().queue().send(Ok(one_error())).unwrap();

        let applied = block_on(session.submit(&UploadedFile::new("test.csv", ())));
        assert!(applied);

        let snapshot = session.snapshot();
        assert!(!snapshot.valid);
        assert_eq!(snapshot.errors.len(), 1);
        assert_eq!(snapshot.errors[0].path, "B2");
        assert!(snapshot.warnings.is_empty());
        assert!(!snapshot.loading);
        assert!(!snapshot.read_error);
        assert!(snapshot.did_mount);
        assert!(!snapshot.start_timestamp.is_empty());
        assert!(!snapshot.end_timestamp.is_empty());

        let reloaded = ValidationSession::new(
            FakeValidator::default(),
            store.clone(),
            ValidationOptions::default(),
        );
        assert_eq!(reloaded.snapshot(), snapshot);
    }

    #[test]
    fn test_loading_is_visible_before_validator_resolves() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        let reply = session.validator().queue();

        block_on(async {
            let submission = session.begin("test.json");
            assert!(session.snapshot().loading);
            assert!(!session.snapshot().read_error);

            let mut run = pin!(session.complete(&submission, &()));
            assert_eq!(poll!(run.as_mut()), Poll::Pending);
            assert!(session.snapshot().loading);

            reply.send(Ok(ValidatorOutput::default())).unwrap();
            assert!(run.await);
        });
        assert!(!session.snapshot().loading);
    }

    #[test]
    fn test_late_result_is_discarded() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        let first = session.validator().queue();
        let second = session.validator().queue();

        let file_a = UploadedFile::new("a.csv", ());
        let file_b = UploadedFile::new("b.csv", ());

        block_on(async {
            let mut a = pin!(session.submit(&file_a));
            assert_eq!(poll!(a.as_mut()), Poll::Pending);
            let mut b = pin!(session.submit(&file_b));
            assert_eq!(poll!(b.as_mut()), Poll::Pending);

            second
                .send(Ok(ValidatorOutput {
                    valid: true,
                    ..Default::default()
                }))
                .unwrap();
            assert!(b.await);

            first.send(Ok(one_error())).unwrap();
            assert!(!a.await);
        });

        let snapshot = session.snapshot();
        assert_eq!(snapshot.filename, "b.csv");
        assert!(snapshot.valid);
        assert!(snapshot.errors.is_empty());
    }

    #[test]
    fn test_stale_result_does_not_end_newer_run() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        let first = session.validator().queue();
        let _second = session.validator().queue();

        let file_a = UploadedFile::new("a.csv", ());
        let file_b = UploadedFile::new("b.csv", ());

        block_on(async {
            let mut a = pin!(session.submit(&file_a));
            assert_eq!(poll!(a.as_mut()), Poll::Pending);
            let mut b = pin!(session.submit(&file_b));
            assert_eq!(poll!(b.as_mut()), Poll::Pending);

            first.send(Ok(one_error())).unwrap();
            assert!(!a.await);
        });

        let snapshot = session.snapshot();
        assert!(snapshot.loading);
        assert_eq!(snapshot.filename, "b.csv");
    }

    #[test]
    fn test_unsupported_extension_skips_validator() {
        let store = MemoryStore::new();
        let session = new_session(&store);

        let applied = block_on(session.submit(&UploadedFile::new("prices.xlsx", ())));
        assert!(!applied);
        assert_eq!(session.validator().calls.get(), 0);

        let snapshot = session.snapshot();
        assert!(snapshot.unsupported_format);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.status(), RunStatus::UnsupportedFormat);

        let reloaded = new_session(&store);
        assert!(reloaded.snapshot().unsupported_format);
    }

    #[test]
    fn test_rejection_sets_read_error() {
        let store = MemoryStore::new();
        let session = new_session(&store);

        session.validator().queue().send(Ok(one_error())).unwrap();
        block_on(session.submit(&UploadedFile::new("a.csv", ())));
        assert_eq!(session.snapshot().errors.len(), 1);

        session
            .validator()
            .queue()
            .send(Err(ValidatorError::Unreadable("empty file".into())))
            .unwrap();
        assert!(block_on(session.submit(&UploadedFile::new("b.csv", ()))));

        let snapshot = session.snapshot();
        assert!(snapshot.read_error);
        assert!(!snapshot.loading);
        assert!(snapshot.errors.is_empty());
        assert_eq!(snapshot.status(), RunStatus::ReadError);
    }

    #[test]
    fn test_warnings_and_alerts_are_classified() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        session
            .validator()
            .queue()
            .send(Ok(ValidatorOutput {
                valid: true,
                errors: vec![
                    RawFinding::warning("C4", "optional"),
                    RawFinding::error("D4", "required"),
                ],
                alerts: Some(vec![RawFinding::warning("E4", "nine 9s")]),
            }))
            .unwrap();
        block_on(session.submit(&UploadedFile::new("a.json", ())));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.errors.len(), 1);
        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.alerts.len(), 1);
        assert_eq!(snapshot.location_header(), "JSON location");
    }

    #[test]
    fn test_truncation_summary_uses_session_cap() {
        let store = MemoryStore::new();
        let session = ValidationSession::new(
            FakeValidator::default(),
            store.clone(),
            ValidationOptions { max_findings: 3 },
        );
        session
            .validator()
            .queue()
            .send(Ok(ValidatorOutput {
                valid: false,
                errors: (0..3).map(|i| RawFinding::error(format!("A{}", i), "bad")).collect(),
                alerts: None,
            }))
            .unwrap();
        block_on(session.submit(&UploadedFile::new("a.csv", ())));

        let summary = session.snapshot().error_summary(session.max_findings());
        assert!(summary.truncated);
        assert_eq!(summary.to_string(), "at least 3 errors");
    }

    #[test]
    fn test_findings_over_the_cap_are_dropped() {
        let store = MemoryStore::new();
        let session = ValidationSession::new(
            FakeValidator::default(),
            store.clone(),
            ValidationOptions { max_findings: 3 },
        );
        session
            .validator()
            .queue()
            .send(Ok(ValidatorOutput {
                valid: false,
                errors: (0..5).map(|i| RawFinding::error(format!("A{}", i), "bad")).collect(),
                alerts: Some((0..4).map(|i| RawFinding::warning(format!("B{}", i), "999999999")).collect()),
            }))
            .unwrap();
        block_on(session.submit(&UploadedFile::new("a.csv", ())));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.errors.len(), 3);
        assert_eq!(snapshot.errors[2].path, "A2");
        assert_eq!(snapshot.alerts.len(), 3);
        assert_eq!(snapshot.alert_summary(3).to_string(), "at least 3 alerts");
    }

    #[test]
    fn test_observers_see_every_transition() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.status()));

        session.validator().queue().send(Ok(one_error())).unwrap();
        block_on(session.submit(&UploadedFile::new("a.csv", ())));

        assert_eq!(*seen.borrow(), vec![RunStatus::Loading, RunStatus::Complete]);
    }

    #[test]
    fn test_selected_schema_version_is_recorded() {
        let store = MemoryStore::new();
        let session = new_session(&store);
        session.set_schema_version("v2.1");
        let submission = session.begin("a.csv");

        assert_eq!(submission.schema_version, "v2.1");
        assert_eq!(session.snapshot().schema_version, "v2.1");
    }
}
