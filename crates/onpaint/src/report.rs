//! Diagnostics sink used by the scheduler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Instant;

use crate::error::ScheduleError;

/// Receives error reports and per-callback timing pairs.
///
/// The scheduler never looks at anything a reporter does; implementations are
/// free to drop records.
pub trait Reporter {
    fn error(&self, err: &ScheduleError);

    /// Opens a timing span for `label`.
    fn time_start(&self, label: &str);

    /// Closes the span opened by the matching `time_start`.
    fn time_end(&self, label: &str);
}

/// Reporter backed by the `log` facade.
///
/// Timing spans are kept in a label-keyed table, the same way a browser
/// console pairs `time`/`timeEnd`.
#[derive(Debug, Default)]
pub struct LogReporter {
    spans: RefCell<HashMap<String, Instant>>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for LogReporter {
    fn error(&self, err: &ScheduleError) {
        log::error!("onpaint: {err}");
    }

    fn time_start(&self, label: &str) {
        self.spans
            .borrow_mut()
            .insert(label.to_string(), Instant::now());
    }

    fn time_end(&self, label: &str) {
        let Some(start) = self.spans.borrow_mut().remove(label) else {
            log::warn!("onpaint: no timer named [{label}]");
            return;
        };

        let ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!("{label}: {ms:.3}ms");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Error(ScheduleError),
        Start(String),
        End(String),
    }

    /// Keeps every report in order for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub records: RefCell<Vec<Record>>,
    }

    impl RecordingReporter {
        pub fn errors(&self) -> Vec<ScheduleError> {
            self.records
                .borrow()
                .iter()
                .filter_map(|r| match r {
                    Record::Error(e) => Some(e.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn timings(&self) -> Vec<Record> {
            self.records
                .borrow()
                .iter()
                .filter(|r| !matches!(r, Record::Error(_)))
                .cloned()
                .collect()
        }

        pub fn clear(&self) {
            self.records.borrow_mut().clear();
        }
    }

    impl Reporter for RecordingReporter {
        fn error(&self, err: &ScheduleError) {
            self.records.borrow_mut().push(Record::Error(err.clone()));
        }

        fn time_start(&self, label: &str) {
            self.records.borrow_mut().push(Record::Start(label.to_string()));
        }

        fn time_end(&self, label: &str) {
            self.records.borrow_mut().push(Record::End(label.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_reporter_pairs_spans_by_label() {
        let r = LogReporter::new();
        r.time_start("a#1");
        r.time_start("b#2");
        assert_eq!(r.spans.borrow().len(), 2);

        r.time_end("a#1");
        assert!(!r.spans.borrow().contains_key("a#1"));
        assert!(r.spans.borrow().contains_key("b#2"));
    }

    #[test]
    fn log_reporter_tolerates_unmatched_end() {
        let r = LogReporter::new();
        r.time_end("never-started");
        assert!(r.spans.borrow().is_empty());
    }
}
