// crates/core/src/store.rs
//! The local record store.
//!
//! One ordered `Vec<Record>` behind a single mutex. Readers take a
//! [`RecordStore::snapshot`]; writers go through the lock-guarded mutation
//! methods, which keep identity keys unique and schedule an asynchronous
//! save of the JSON file. The lock is never held across I/O.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use jobtrack_types::{ExperienceLevel, IdentityKey, Record, Status};

use crate::error::StoreError;
use crate::resume::ResumeFile;

/// Shared handle to the record collection. Cloning is cheap.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<Inner>,
}

struct Inner {
    records: Mutex<Vec<Record>>,
    path: Option<PathBuf>,
    /// Serializes file writes so a stale snapshot never lands after a newer one.
    write_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("path", &self.inner.path)
            .field("len", &self.len())
            .finish()
    }
}

impl RecordStore {
    /// A store with no backing file. Later duplicates of an identity key are dropped.
    pub fn in_memory(records: Vec<Record>) -> Self {
        Self::build(dedup(records), None)
    }

    /// Open the JSON record file at `path`.
    ///
    /// A missing file is created with a few example records. An unreadable
    /// or malformed file is an error rather than silently starting empty.
    /// Unrecognised status or experience labels load as the default.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<Record> =
                    serde_json::from_slice(&bytes).map_err(|e| StoreError::MalformedJson {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                let store = Self::build(dedup(records), Some(path));
                tracing::info!(path = ?store.inner.path, count = store.len(), "loaded records");
                Ok(store)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "record file not found, creating with examples");
                let store = Self::build(example_records(), Some(path));
                store.save().await?;
                Ok(store)
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn build(records: Vec<Record>, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                records: Mutex::new(records),
                path,
                write_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        match self.inner.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("record store mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Lock-consistent copy of every record, in store order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn find(&self, key: &IdentityKey) -> Option<Record> {
        self.lock().iter().find(|r| key.matches(r)).cloned()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.lock().iter().any(|r| key.matches(r))
    }

    /// Append a new record. Fails if its identity key is already taken.
    pub fn insert(&self, record: Record) -> Result<(), StoreError> {
        check_title(&record)?;
        {
            let mut records = self.lock();
            let key = record.key();
            if records.iter().any(|r| key.matches(r)) {
                return Err(StoreError::duplicate(&record.title, &record.company));
            }
            records.push(record);
        }
        self.schedule_save();
        Ok(())
    }

    /// Replace the record identified by `original` in place.
    ///
    /// The replacement may change title/company, but not onto another
    /// record's identity key.
    pub fn update(&self, original: &IdentityKey, record: Record) -> Result<(), StoreError> {
        check_title(&record)?;
        {
            let mut records = self.lock();
            let idx = records
                .iter()
                .position(|r| original.matches(r))
                .ok_or_else(|| StoreError::not_found(original.title(), original.company()))?;
            let key = record.key();
            let collides = records
                .iter()
                .enumerate()
                .any(|(i, r)| i != idx && key.matches(r));
            if collides {
                return Err(StoreError::duplicate(&record.title, &record.company));
            }
            records[idx] = record;
        }
        self.schedule_save();
        Ok(())
    }

    /// Insert, or replace the record with the same identity key.
    pub fn upsert(&self, record: Record) -> Result<(), StoreError> {
        check_title(&record)?;
        {
            let mut records = self.lock();
            let key = record.key();
            match records.iter_mut().find(|r| key.matches(r)) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        self.schedule_save();
        Ok(())
    }

    /// Remove a record. Returns false if nothing had that key.
    pub fn delete(&self, key: &IdentityKey) -> bool {
        let removed = {
            let mut records = self.lock();
            let before = records.len();
            records.retain(|r| !key.matches(r));
            records.len() != before
        };
        if removed {
            self.schedule_save();
        }
        removed
    }

    /// Attach a résumé file to a record after checking its extension.
    pub fn attach_resume(&self, key: &IdentityKey, path: &Path) -> Result<(), StoreError> {
        let resume = ResumeFile::from_path(path)?;
        self.modify(key, move |r| {
            r.resume_path = Some(resume.path);
            r.resume_file_name = Some(resume.file_name);
        })
    }

    pub fn clear_resume(&self, key: &IdentityKey) -> Result<(), StoreError> {
        self.modify(key, |r| {
            r.resume_path = None;
            r.resume_file_name = None;
        })
    }

    fn modify(&self, key: &IdentityKey, f: impl FnOnce(&mut Record)) -> Result<(), StoreError> {
        {
            let mut records = self.lock();
            let record = records
                .iter_mut()
                .find(|r| key.matches(r))
                .ok_or_else(|| StoreError::not_found(key.title(), key.company()))?;
            f(record);
        }
        self.schedule_save();
        Ok(())
    }

    /// Write the current contents to the backing file, if any.
    pub async fn save(&self) -> Result<(), StoreError> {
        let Some(path) = self.inner.path.as_deref() else {
            return Ok(());
        };
        let _guard = self.inner.write_lock.lock().await;
        let data = {
            let records = self.lock();
            serde_json::to_vec_pretty(&*records)?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }
        tokio::fs::write(path, &data)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "saved records");
        Ok(())
    }

    fn schedule_save(&self) {
        if self.inner.path.is_none() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.clone();
                handle.spawn(async move {
                    if let Err(e) = store.save().await {
                        tracing::warn!(error = %e, "background save failed");
                    }
                });
            }
            Err(_) => tracing::warn!("no async runtime, record change not persisted"),
        }
    }
}

fn check_title(record: &Record) -> Result<(), StoreError> {
    if record.title.trim().is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    Ok(())
}

fn dedup(records: Vec<Record>) -> Vec<Record> {
    let mut out: Vec<Record> = Vec::with_capacity(records.len());
    for record in records {
        let key = record.key();
        if out.iter().any(|r| key.matches(r)) {
            tracing::warn!(title = %record.title, company = %record.company, "dropping duplicate record");
            continue;
        }
        out.push(record);
    }
    out
}

/// Records written to a fresh install so the list is not empty.
pub fn example_records() -> Vec<Record> {
    vec![
        Record::new("Go Developer (example)", "Tech Solutions")
            .with_description("Experienced Go developer wanted.")
            .with_keywords(["golang", "backend"])
            .with_experience(ExperienceLevel::ThreeToSixYears)
            .with_notes("Interesting role, flexible hours."),
        Record::new("Frontend Developer (example)", "Web Innovators")
            .with_description("Looking for a frontend developer.")
            .with_keywords(["javascript", "react"])
            .with_experience(ExperienceLevel::OneToThreeYears)
            .with_notes("Portfolio required."),
        Record::new("Junior QA Engineer (example)", "QA Experts")
            .with_description("Entry-level tester wanted.")
            .with_keywords(["qa", "testing"])
            .with_status(Status::PlanningToApply)
            .with_experience(ExperienceLevel::NoExperience)
            .with_notes("Apply before the end of the week."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> RecordStore {
        RecordStore::in_memory(vec![Record::new("Go Dev", "Acme"), Record::new("QA", "Acme")])
    }

    #[test]
    fn test_in_memory_drops_duplicates() {
        let store = RecordStore::in_memory(vec![
            Record::new("Go Dev", "Acme"),
            Record::new("GO DEV", "acme").with_notes("dup"),
        ]);
        assert_eq!(store.snapshot(), vec![Record::new("Go Dev", "Acme")]);
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let store = store();
        let err = store.insert(Record::new("go dev", "ACME")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert_eq!(store.len(), 2);

        store.insert(Record::new("Rust Dev", "Acme")).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.snapshot()[2].title, "Rust Dev");
    }

    #[test]
    fn test_insert_rejects_empty_title() {
        assert!(matches!(
            store().insert(Record::new("  ", "Acme")),
            Err(StoreError::EmptyTitle)
        ));
    }

    #[test]
    fn test_update_in_place_and_rename() {
        let store = store();
        let key = IdentityKey::new("go dev", "acme");
        store
            .update(&key, Record::new("Go Dev", "Acme").with_status(Status::Applied))
            .unwrap();
        assert_eq!(store.find(&key).unwrap().status, Status::Applied);

        store.update(&key, Record::new("Senior Go Dev", "Acme")).unwrap();
        assert!(!store.contains(&key));
        assert_eq!(store.snapshot()[0].title, "Senior Go Dev");
    }

    #[test]
    fn test_update_rejects_collision_and_missing() {
        let store = store();
        let err = store
            .update(&IdentityKey::new("Go Dev", "Acme"), Record::new("qa", "acme"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        let err = store
            .update(&IdentityKey::new("Nope", "Acme"), Record::new("Nope", "Acme"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_upsert() {
        let store = store();
        store.upsert(Record::new("QA", "ACME").with_notes("updated")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[1].notes, "updated");

        store.upsert(Record::new("Ops", "Acme")).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_delete() {
        let store = store();
        assert!(store.delete(&IdentityKey::new("qa", "acme")));
        assert!(!store.delete(&IdentityKey::new("qa", "acme")));
        assert_eq!(store.snapshot(), vec![Record::new("Go Dev", "Acme")]);
    }

    #[test]
    fn test_attach_and_clear_resume() {
        let store = store();
        let key = IdentityKey::new("QA", "Acme");
        store.attach_resume(&key, Path::new("/tmp/cv.PDF")).unwrap();
        let record = store.find(&key).unwrap();
        assert_eq!(record.resume_file_name.as_deref(), Some("cv.PDF"));
        assert_eq!(record.resume_path.as_deref(), Some("/tmp/cv.PDF"));

        assert!(matches!(
            store.attach_resume(&key, Path::new("/tmp/cv.png")),
            Err(StoreError::UnsupportedResume { .. })
        ));

        store.clear_resume(&key).unwrap();
        assert!(store.find(&key).unwrap().resume_path.is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = store();
        let snap = store.snapshot();
        store.insert(Record::new("Ops", "Acme")).unwrap();
        assert_eq!(snap.len(), 2);
    }

    #[tokio::test]
    async fn test_open_missing_file_seeds_examples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vacancies.json");
        let store = RecordStore::open(&path).await.unwrap();
        assert_eq!(store.snapshot(), example_records());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacancies.json");
        std::fs::write(&path, "[]").unwrap();

        let store = RecordStore::open(&path).await.unwrap();
        assert!(store.is_empty());
        store
            .insert(Record::new("Go Dev", "Acme").with_keywords(["golang"]))
            .unwrap();
        store.save().await.unwrap();

        let reopened = RecordStore::open(&path).await.unwrap();
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[tokio::test]
    async fn test_open_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacancies.json");
        std::fs::write(&path, "{oops").unwrap();
        assert!(matches!(
            RecordStore::open(&path).await,
            Err(StoreError::MalformedJson { .. })
        ));
    }

    #[tokio::test]
    async fn test_open_tolerates_legacy_and_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacancies.json");
        std::fs::write(
            &path,
            r#"[
                {"title":"Go","company":"Acme","status":"Собеседование","experienceLevel":"1-3 года"},
                {"title":"QA","company":"Beta","status":"Hired","experienceLevel":"forever"}
            ]"#,
        )
        .unwrap();

        let store = RecordStore::open(&path).await.unwrap();
        let records = store.snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, Status::Interview);
        assert_eq!(records[0].experience_level, ExperienceLevel::OneToThreeYears);
        assert_eq!(records[1].status, Status::New);
        assert_eq!(records[1].experience_level, ExperienceLevel::Unspecified);
    }
}
