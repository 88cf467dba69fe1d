//! Shared fixtures for the movebox-db integration tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use movebox_db::{Display, FieldPrompt, Store, StoreConfig, UiCallback};
use movebox_model::{Record, RecordKind};
use tempfile::TempDir;

/// A store in a fresh temporary data home.
#[allow(dead_code)]
pub struct TestStore {
    pub dir: TempDir,
    pub store: Store,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());
        let store = Store::open(&dir.path().join("move.db"), &config).unwrap();
        Self { dir, store }
    }

    /// A store whose project (owned by user "alice") already exists.
    pub fn with_project() -> Self {
        let mut t = Self::new();
        t.store
            .init_project(
                Record::new()
                    .with("primary_user", "alice")
                    .with("title", "Big Move")
                    .with("found_contact", "call 555-0100"),
            )
            .unwrap();
        t
    }

    /// Write a file into the temp dir and return its path.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        self.store.list(kind).unwrap().len()
    }
}

/// Everything a [`ScriptedUi`] was asked.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct UiLog {
    pub prompts: Vec<(String, Vec<String>)>,
    pub errors: Vec<String>,
    pub displayed: usize,
}

/// UI that answers prompts from a fixed table: field name → answer.
#[allow(dead_code)]
pub struct ScriptedUi {
    answers: BTreeMap<String, String>,
    pub log: Rc<RefCell<UiLog>>,
}

#[allow(dead_code)]
impl ScriptedUi {
    pub fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            log: Rc::new(RefCell::new(UiLog::default())),
        }
    }
}

impl UiCallback for ScriptedUi {
    fn prompt(&self, table: &str, prompts: &[FieldPrompt]) -> io::Result<BTreeMap<String, String>> {
        self.log.borrow_mut().prompts.push((
            table.to_string(),
            prompts.iter().map(|p| p.field.to_string()).collect(),
        ));
        Ok(prompts
            .iter()
            .filter_map(|p| self.answers.get(p.field).map(|a| (p.field.to_string(), a.clone())))
            .collect())
    }

    fn display(&self, _output: Display<'_>) {
        self.log.borrow_mut().displayed += 1;
    }

    fn error(&self, text: &str, _context: Option<&str>) {
        self.log.borrow_mut().errors.push(text.to_string());
    }
}
