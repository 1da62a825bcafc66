//! Polls a document store and converts new sources to PDF.

use crate::converter::Converter;
use crate::error::PipelineError;
use crate::source::{SourceKind, pdf_name};
use ficopdf_traits::DocumentStore;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// What one polling pass did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PassReport {
    /// Sources converted in this pass, with the PDF written for each.
    pub converted: Vec<(String, String)>,
    /// Sources whose PDF already existed.
    pub skipped: Vec<String>,
    /// Sources that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl PassReport {
    pub fn is_idle(&self) -> bool {
        self.converted.is_empty() && self.failed.is_empty()
    }
}

/// Converts every `.txt` and `.csv` document in a store that does not yet
/// have a PDF next to it.
///
/// Documents in one pass are converted in parallel. A failing document is
/// logged and reported; it never stops the others.
#[derive(Debug)]
pub struct Watcher<S: DocumentStore> {
    store: S,
    converter: Converter,
    poll_interval: Duration,
}

impl<S: DocumentStore> Watcher<S> {
    pub fn new(store: S, converter: Converter, poll_interval: Duration) -> Self {
        Self {
            store,
            converter,
            poll_interval,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs a single polling pass.
    ///
    /// # Errors
    ///
    /// Only a failure to list the store is an error; per-document failures
    /// are collected in the report.
    pub fn run_once(&self) -> Result<PassReport, PipelineError> {
        let started = Instant::now();
        let mut report = PassReport::default();

        let mut pending: Vec<(String, String)> = Vec::new();
        for name in self.store.list()? {
            if SourceKind::detect(&name).is_none() {
                continue;
            }
            let target = pdf_name(&name);
            if self.store.exists(&target) {
                log::debug!("Skipping {}: {} already exists", name, target);
                report.skipped.push(name);
            } else if let Some((claimed, _)) = pending.iter().find(|(_, t)| *t == target) {
                log::warn!(
                    "Skipping {}: {} is already produced from {} in this pass",
                    name,
                    target,
                    claimed
                );
                report.skipped.push(name);
            } else {
                pending.push((name, target));
            }
        }

        let outcomes: Vec<_> = pending
            .into_par_iter()
            .map(|(name, target)| {
                let outcome = self.convert_one(&name, &target);
                (name, target, outcome)
            })
            .collect();

        for (name, target, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    log::info!("Converted {} -> {}", name, target);
                    report.converted.push((name, target));
                }
                Err(err) => {
                    log::error!("Failed to convert {}: {}", name, err);
                    report.failed.push((name, err.to_string()));
                }
            }
        }

        if !report.is_idle() {
            log::info!(
                "Pass over {} finished in {:?}: {} converted, {} failed, {} skipped",
                self.store.name(),
                started.elapsed(),
                report.converted.len(),
                report.failed.len(),
                report.skipped.len()
            );
        }
        Ok(report)
    }

    fn convert_one(&self, name: &str, target: &str) -> Result<(), PipelineError> {
        let data = self.store.read(name)?;
        let pdf = self.converter.convert(name, &data)?;
        self.store.write(target, &pdf)?;
        Ok(())
    }

    /// Polls until `shutdown` is set. A pass that fails to list the store is
    /// logged and retried on the next tick.
    pub fn run_until(&self, shutdown: &AtomicBool) {
        log::info!(
            "Watching {} every {:?}",
            self.store.name(),
            self.poll_interval
        );
        while !shutdown.load(Ordering::Relaxed) {
            if let Err(err) = self.run_once() {
                log::error!("Polling {} failed: {}", self.store.name(), err);
            }
            thread::sleep(self.poll_interval);
        }
    }

    /// Polls forever.
    pub fn run(&self) {
        self.run_until(&AtomicBool::new(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ficopdf_layout::{LayoutConfig, LayoutEngine};
    use ficopdf_style::StyleRuleTable;
    use ficopdf_traits::InMemoryDocumentStore;
    use ficopdf_types::PageGeometry;

    fn watcher(store: InMemoryDocumentStore) -> Watcher<InMemoryDocumentStore> {
        let engine = LayoutEngine::new(LayoutConfig::default(), StyleRuleTable::default()).unwrap();
        let converter = Converter::with_engine(engine, PageGeometry::default());
        Watcher::new(store, converter, Duration::from_millis(10))
    }

    #[test]
    fn converts_sources_and_skips_existing_pdfs() {
        let store = InMemoryDocumentStore::new();
        store.add("a.txt", "hello").unwrap();
        store.add("b.csv", "x,y\n1,2").unwrap();
        store.add("c.txt", "done").unwrap();
        store.add("c.pdf", "existing").unwrap();
        store.add("notes.md", "ignored").unwrap();

        let watcher = watcher(store);
        let report = watcher.run_once().unwrap();

        let mut converted: Vec<_> = report.converted.iter().map(|c| c.1.as_str()).collect();
        converted.sort();
        assert_eq!(converted, vec!["a.pdf", "b.pdf"]);
        assert_eq!(report.skipped, vec!["c.txt"]);
        assert_eq!(watcher.store().read("c.pdf").unwrap(), b"existing");
        assert!(watcher.store().read("a.pdf").unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn sources_sharing_a_pdf_name_convert_once() {
        let store = InMemoryDocumentStore::new();
        store.add("a.csv", "x,y\n1,2").unwrap();
        store.add("a.txt", "hello").unwrap();

        let watcher = watcher(store);
        let report = watcher.run_once().unwrap();

        assert_eq!(report.converted, vec![("a.csv".to_string(), "a.pdf".to_string())]);
        assert_eq!(report.skipped, vec!["a.txt"]);

        let again = watcher.run_once().unwrap();
        assert!(again.is_idle());
        assert_eq!(again.skipped, vec!["a.csv", "a.txt"]);
    }

    #[test]
    fn second_pass_is_idle() {
        let store = InMemoryDocumentStore::new();
        store.add("a.txt", "hello").unwrap();

        let watcher = watcher(store);
        watcher.run_once().unwrap();
        let report = watcher.run_once().unwrap();

        assert!(report.is_idle());
        assert_eq!(report.skipped, vec!["a.txt"]);
    }

    #[test]
    fn run_until_returns_once_shutdown_is_set() {
        let watcher = watcher(InMemoryDocumentStore::new());
        let shutdown = AtomicBool::new(true);
        watcher.run_until(&shutdown);
    }
}
