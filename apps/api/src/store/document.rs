//! Document Store: the single document of record.
//!
//! Two states: Demo (no override; content is the locale's built-in document
//! and read-only) and Override (user document; read-write through
//! `apply_edit`). Every write swaps the whole tree.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::portfolio::SectionLabels;
use crate::models::{Locale, UiLabels};
use crate::store::demo::demo_document;
use crate::store::path::{self, EditPath, EditValue, PathError};
use crate::store::persist::{DurableStore, StorageError};
use crate::store::validate::{parse_document, ImportError};

/// Durable-storage key of the override document.
pub const OVERRIDE_KEY: &str = "portfolio_custom_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct DocumentStore {
    locale: Locale,
    override_doc: Option<Value>,
    storage: Arc<dyn DurableStore>,
}

impl DocumentStore {
    /// Restores a previously saved override if one exists. Unreadable or
    /// corrupt storage falls back to demo content.
    pub async fn load(storage: Arc<dyn DurableStore>, locale: Locale) -> Self {
        let override_doc = match storage.load(OVERRIDE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(doc) => {
                    info!("Restored override document from {} storage", storage.backend());
                    Some(doc)
                }
                Err(e) => {
                    warn!("Failed to parse saved portfolio data, using demo content: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read saved portfolio data, using demo content: {e}");
                None
            }
        };

        Self {
            locale,
            override_doc,
            storage,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switches locale. Content only changes while no override is active;
    /// UI chrome always follows.
    pub fn select_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// The document currently served: the override if any, else the demo.
    pub fn current(&self) -> &Value {
        self.override_doc
            .as_ref()
            .unwrap_or_else(|| demo_document(self.locale))
    }

    pub fn override_document(&self) -> Option<&Value> {
        self.override_doc.as_ref()
    }

    pub fn edit_mode_active(&self) -> bool {
        self.override_doc.is_some()
    }

    /// Locale chrome with the current document's label overrides applied.
    pub fn labels(&self) -> UiLabels {
        let overrides = self
            .current()
            .get("labels")
            .and_then(|v| serde_json::from_value::<SectionLabels>(v.clone()).ok());
        UiLabels::for_locale(self.locale).with_overrides(overrides.as_ref())
    }

    /// Replaces the override wholesale. `None` clears both memory and
    /// durable storage, reverting to demo content.
    pub async fn set_override(&mut self, doc: Option<Value>) -> Result<(), StoreError> {
        match doc {
            Some(doc) => {
                let raw = serde_json::to_string(&doc)?;
                self.storage.save(OVERRIDE_KEY, &raw).await?;
                self.override_doc = Some(doc);
            }
            None => {
                self.storage.remove(OVERRIDE_KEY).await?;
                self.override_doc = None;
                info!("Override cleared, serving {} demo content", self.locale);
            }
        }
        Ok(())
    }

    /// Seeds the override with a copy of the demo document on display.
    /// Returns `false` when edit mode was already active.
    pub async fn enable_edit_mode(&mut self) -> Result<bool, StoreError> {
        if self.edit_mode_active() {
            return Ok(false);
        }
        let seed = demo_document(self.locale).clone();
        self.set_override(Some(seed)).await?;
        info!("Edit mode enabled from {} demo content", self.locale);
        Ok(true)
    }

    /// Applies a single-field edit to the override. Returns `false` without
    /// touching anything when no override is active.
    pub async fn apply_edit(&mut self, path: &EditPath, value: EditValue) -> Result<bool, StoreError> {
        let Some(current) = self.override_doc.as_ref() else {
            return Ok(false);
        };

        let existing = path::get(current, path);
        let value = value
            .transform_for(existing)
            .map_err(|found| PathError::TypeMismatch {
                at: path.to_string(),
                expected: existing.map_or("a value", path::kind_of),
                found,
            })?;
        let updated = path::apply_edit(current, path, value)?;

        self.set_override(Some(updated)).await?;
        Ok(true)
    }

    /// Parses, validates and installs a user-supplied JSON document. The
    /// override is left unchanged on any error.
    pub async fn import_json(&mut self, raw: &str) -> Result<(), StoreError> {
        let doc = parse_document(raw)?;
        self.set_override(Some(doc)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persist::MemoryStore;
    use serde_json::json;

    async fn fresh() -> (DocumentStore, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::default());
        let store = DocumentStore::load(storage.clone(), Locale::En).await;
        (store, storage)
    }

    fn path(raw: &str) -> EditPath {
        EditPath::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_starts_in_demo_mode() {
        let (store, _) = fresh().await;
        assert!(!store.edit_mode_active());
        assert_eq!(store.current(), demo_document(Locale::En));
    }

    #[tokio::test]
    async fn test_locale_switch_then_edit_is_ignored_in_demo_mode() {
        let (mut store, storage) = fresh().await;
        store.select_locale(Locale::De);
        assert_eq!(store.current(), demo_document(Locale::De));

        let applied = store
            .apply_edit(&path("basics.name"), EditValue::Text("X".into()))
            .await
            .unwrap();
        assert!(!applied);
        assert!(!store.edit_mode_active());
        assert_eq!(store.current(), demo_document(Locale::De));
        assert_eq!(storage.load(OVERRIDE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_enable_edit_mode_then_edit_persists() {
        let (mut store, storage) = fresh().await;
        assert!(store.enable_edit_mode().await.unwrap());
        assert_eq!(store.override_document(), Some(demo_document(Locale::En)));

        let applied = store
            .apply_edit(&path("basics.name"), EditValue::Text("X".into()))
            .await
            .unwrap();
        assert!(applied);
        assert_eq!(store.current()["basics"]["name"], "X");

        let saved = storage.load(OVERRIDE_KEY).await.unwrap().unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["basics"]["name"], "X");
        assert_eq!(&saved, store.current());
    }

    #[tokio::test]
    async fn test_fractional_years_edit_keeps_page_content() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        let applied = store
            .apply_edit(&path("basics.experienceYears"), EditValue::Number(7.5))
            .await
            .unwrap();
        assert!(applied);
        assert_eq!(store.current()["basics"]["experienceYears"], 7.5);

        let page = crate::render::build_page(store.current(), &store.labels(), true);
        assert_eq!(page.hero.name.value, "Jordan Avery");
        assert_eq!(page.hero.experience_years.value, 7);
        assert!(!page.experience.companies.is_empty());
    }

    #[tokio::test]
    async fn test_enable_edit_mode_twice_keeps_existing_override() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        store
            .apply_edit(&path("summary"), EditValue::Text("Edited".into()))
            .await
            .unwrap();
        assert!(!store.enable_edit_mode().await.unwrap());
        assert_eq!(store.current()["summary"], "Edited");
    }

    #[tokio::test]
    async fn test_override_survives_reload() {
        let (mut store, storage) = fresh().await;
        let doc = json!({ "basics": { "name": "Kim" }, "experience": [], "skills": {}, "education": {} });
        store.set_override(Some(doc.clone())).await.unwrap();

        let reloaded = DocumentStore::load(storage, Locale::En).await;
        assert_eq!(reloaded.current(), &doc);
        assert!(reloaded.edit_mode_active());
    }

    #[tokio::test]
    async fn test_clearing_override_reloads_as_selected_locale_demo() {
        let (mut store, storage) = fresh().await;
        store.select_locale(Locale::Jp);
        store.enable_edit_mode().await.unwrap();
        store.set_override(None).await.unwrap();

        let reloaded = DocumentStore::load(storage, Locale::Jp).await;
        assert!(!reloaded.edit_mode_active());
        assert_eq!(reloaded.current(), demo_document(Locale::Jp));
    }

    #[tokio::test]
    async fn test_corrupt_storage_falls_back_to_demo() {
        let storage = Arc::new(MemoryStore::default());
        storage.save(OVERRIDE_KEY, "{ truncated").await.unwrap();
        let store = DocumentStore::load(storage, Locale::En).await;
        assert!(!store.edit_mode_active());
        assert_eq!(store.current(), demo_document(Locale::En));
    }

    #[tokio::test]
    async fn test_locale_does_not_change_override_content_but_changes_labels() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        let before = store.current().clone();
        let en_title = store.labels().experience.title;

        store.select_locale(Locale::De);
        assert_eq!(store.current(), &before);
        assert_ne!(store.labels().experience.title, en_title);
    }

    #[tokio::test]
    async fn test_document_labels_override_chrome() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        store
            .apply_edit(&path("labels.experience.title"), EditValue::Text("My Path".into()))
            .await
            .unwrap();
        assert_eq!(store.labels().experience.title, "My Path");
    }

    #[tokio::test]
    async fn test_import_missing_section_leaves_override_unchanged() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        let before = store.current().clone();

        let err = store
            .import_json(r#"{"basics":{},"experience":[],"education":{}}"#)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("skills"));
        assert_eq!(store.current(), &before);
    }

    #[tokio::test]
    async fn test_import_enters_edit_mode() {
        let (mut store, _) = fresh().await;
        store
            .import_json(r#"{"basics":{"name":"Lee"},"experience":[],"skills":{"a":[]},"education":{}}"#)
            .await
            .unwrap();
        assert!(store.edit_mode_active());
        assert_eq!(store.current()["basics"]["name"], "Lee");
    }

    #[tokio::test]
    async fn test_rejected_edit_keeps_document() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        let before = store.current().clone();

        let err = store
            .apply_edit(&path("basics.experienceYears"), EditValue::Text("many".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Path(PathError::TypeMismatch { .. })));
        assert_eq!(store.current(), &before);
    }

    #[tokio::test]
    async fn test_text_edit_on_numeric_field_stores_number() {
        let (mut store, _) = fresh().await;
        store.enable_edit_mode().await.unwrap();
        store
            .apply_edit(&path("basics.experienceYears"), EditValue::Text("9".into()))
            .await
            .unwrap();
        assert_eq!(store.current()["basics"]["experienceYears"], json!(9));
    }
}
