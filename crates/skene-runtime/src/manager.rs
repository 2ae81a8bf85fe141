// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The generic content-loading and instance-pooling pipeline.

use skene_core::asset::{Content, ContentHandle, ContentKey, ContentSource, Instantiate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Errors produced by the instance-pooling step.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The requested key is not in the content cache, so there is no
    /// template to instantiate from. No partial pool is created.
    #[error("content `{key}` is not cached; instancing skipped")]
    ContentNotFound {
        /// The key that was requested.
        key: ContentKey,
    },
}

/// The generic manager pipeline, parameterized over a content type `C` (the
/// loadable template) and an instance type `I` (the runtime object produced
/// from a template).
///
/// Each manager exclusively owns two structures:
/// - the **content cache**, a map from [`ContentKey`] to the single loaded
///   template for that key, cleared and fully repopulated on every
///   [`load_content`](Self::load_content) call;
/// - the **instance pool**, a map from key to the ordered runtime instances
///   created from that key's template, which accumulates across
///   [`create_instances`](Self::create_instances) calls until explicitly
///   cleared.
///
/// No other component mutates these maps directly; cross-manager interaction
/// goes through the manager's operations or through events the owning
/// specialization chooses to publish.
pub struct ContentManager<C: Content, I: Instantiate<C>> {
    label: &'static str,
    source: Arc<dyn ContentSource<C>>,
    cache: Mutex<HashMap<ContentKey, ContentHandle<C>>>,
    pool: Mutex<HashMap<ContentKey, Vec<Arc<I>>>>,
}

impl<C: Content, I: Instantiate<C>> ContentManager<C, I> {
    /// Creates a pipeline bound to a content source. `label` names the
    /// owning manager in diagnostics.
    pub fn new(label: &'static str, source: Arc<dyn ContentSource<C>>) -> Self {
        Self {
            label,
            source,
            cache: Mutex::new(HashMap::new()),
            pool: Mutex::new(HashMap::new()),
        }
    }

    // The maps stay consistent even if a caller panicked with a guard held;
    // recover the poisoned state instead of propagating it.
    fn cache(&self) -> MutexGuard<'_, HashMap<ContentKey, ContentHandle<C>>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn pool(&self) -> MutexGuard<'_, HashMap<ContentKey, Vec<Arc<I>>>> {
        match self.pool.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Clears the content cache and repopulates it from the source.
    ///
    /// The source is asked for every item matching the union of `tags`;
    /// this await is the pipeline's only suspension point. Returned item
    /// names are resolved to keys; names matching no key resolve to the
    /// sentinel and are dropped, and the first item wins when several share
    /// a key.
    ///
    /// On a load failure the error is logged and the cache stays empty for
    /// this cycle; the stage continues. Callers must treat "cleared but not
    /// repopulated" as "no content available this cycle".
    pub async fn load_content(&self, tags: &[&str]) {
        self.cache().clear();

        let items = match self.source.load_tagged(tags).await {
            Ok(items) => items,
            Err(err) => {
                log::error!("{}: content load failed for tags {tags:?}: {err}", self.label);
                return;
            }
        };

        let mut cache = self.cache();
        for item in items {
            let key = ContentKey::from_name(&item.name);
            if key.is_sentinel() {
                log::warn!("{}: dropping item with unknown name `{}`", self.label, item.name);
                continue;
            }
            cache
                .entry(key)
                .or_insert_with(|| ContentHandle::new(item.content));
        }
        log::info!(
            "{}: cached {} template(s) for tags {tags:?}",
            self.label,
            cache.len()
        );
    }

    /// Appends `count` freshly instantiated copies of `key`'s template to
    /// the pool, labelled `"{key}_{index}"`.
    ///
    /// Label indices continue from the current pool size, so repeated calls
    /// for the same key append (`BasicSoldier_10 …`) instead of reusing
    /// labels. Returns the newly created instances in order.
    ///
    /// # Errors
    /// [`PoolError::ContentNotFound`] when `key` is not cached; no instances
    /// are created.
    pub fn create_instances(&self, key: ContentKey, count: usize) -> Result<Vec<Arc<I>>, PoolError> {
        let template = self
            .get_content(key)
            .ok_or(PoolError::ContentNotFound { key })?;

        let mut pool = self.pool();
        let entries = pool.entry(key).or_default();
        let start = entries.len();

        let mut created = Vec::with_capacity(count);
        for offset in 0..count {
            let label = format!("{key}_{}", start + offset);
            let instance = Arc::new(I::instantiate(&template, label));
            entries.push(instance.clone());
            created.push(instance);
        }

        log::debug!(
            "{}: pooled {count} instance(s) of {key} (pool size {})",
            self.label,
            entries.len()
        );
        Ok(created)
    }

    /// Returns the cached template for `key`, if any. Never errors.
    #[must_use]
    pub fn get_content(&self, key: ContentKey) -> Option<ContentHandle<C>> {
        self.cache().get(&key).cloned()
    }

    /// Returns the pooled instances for `key`, in creation order.
    #[must_use]
    pub fn instances(&self, key: ContentKey) -> Vec<Arc<I>> {
        self.pool().get(&key).cloned().unwrap_or_default()
    }

    /// Returns the number of pooled instances for `key`.
    #[must_use]
    pub fn instance_count(&self, key: ContentKey) -> usize {
        self.pool().get(&key).map_or(0, Vec::len)
    }

    /// Drops every pooled instance. The content cache is untouched.
    pub fn clear_pool(&self) {
        self.pool().clear();
        log::debug!("{}: instance pool cleared", self.label);
    }

    /// The manager label used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{DataRecord, UnitData};
    use crate::source::MemorySource;
    use async_trait::async_trait;
    use skene_core::asset::{LoadError, LoadedItem};

    struct FailingSource;

    #[async_trait]
    impl ContentSource<UnitData> for FailingSource {
        async fn load_tagged(&self, tags: &[&str]) -> Result<Vec<LoadedItem<UnitData>>, LoadError> {
            Err(LoadError::Unavailable(
                tags.iter().map(|t| t.to_string()).collect(),
            ))
        }
    }

    fn soldier_data(name: &str) -> UnitData {
        UnitData {
            display_name: name.to_string(),
            health: 100,
            attack: 10,
            move_speed: 1.5,
        }
    }

    fn data_source() -> Arc<MemorySource<UnitData>> {
        let mut source = MemorySource::new();
        source.insert("BasicSoldier", &["Data", "Stage1"], soldier_data("Basic"));
        source.insert("HeavyGunner", &["Data", "Stage1"], soldier_data("Heavy"));
        source.insert("Boss", &["Data", "Stage3"], soldier_data("Boss"));
        source.insert("UnknownThing", &["Data", "Stage1"], soldier_data("?"));
        Arc::new(source)
    }

    fn manager() -> ContentManager<UnitData, DataRecord> {
        ContentManager::new("TestManager", data_source())
    }

    #[tokio::test]
    async fn load_populates_cache_and_drops_unknown_names() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;

        assert!(manager.get_content(ContentKey::BasicSoldier).is_some());
        assert!(manager.get_content(ContentKey::HeavyGunner).is_some());
        // "UnknownThing" resolves to the sentinel and is dropped.
        assert!(manager.get_content(ContentKey::End).is_none());
        // Boss is only tagged for Stage3.
        assert!(manager.get_content(ContentKey::Boss).is_none());
    }

    #[tokio::test]
    async fn reload_fully_replaces_cache() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;
        assert!(manager.get_content(ContentKey::BasicSoldier).is_some());

        manager.load_content(&["Stage3"]).await;
        // No stale keys survive from the first call.
        assert!(manager.get_content(ContentKey::BasicSoldier).is_none());
        assert!(manager.get_content(ContentKey::HeavyGunner).is_none());
        assert!(manager.get_content(ContentKey::Boss).is_some());
    }

    #[tokio::test]
    async fn failed_load_leaves_cache_empty() {
        let manager: ContentManager<UnitData, DataRecord> =
            ContentManager::new("TestManager", Arc::new(FailingSource));
        manager.load_content(&["Data", "Stage1"]).await;
        assert!(manager.get_content(ContentKey::BasicSoldier).is_none());
    }

    #[tokio::test]
    async fn failed_reload_clears_previous_cache() {
        // A clear followed by a failed populate must read as "no content".
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;
        assert!(manager.get_content(ContentKey::BasicSoldier).is_some());

        manager.load_content(&["NoSuchTag"]).await;
        assert!(manager.get_content(ContentKey::BasicSoldier).is_none());
    }

    #[tokio::test]
    async fn create_instances_labels_by_position() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;

        let created = manager
            .create_instances(ContentKey::BasicSoldier, 10)
            .unwrap();
        assert_eq!(created.len(), 10);
        assert_eq!(manager.instance_count(ContentKey::BasicSoldier), 10);

        for (i, record) in created.iter().enumerate() {
            assert_eq!(record.label(), format!("BasicSoldier_{i}"));
        }
    }

    #[tokio::test]
    async fn repeated_creation_appends_and_continues_numbering() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;

        manager.create_instances(ContentKey::BasicSoldier, 3).unwrap();
        let second = manager.create_instances(ContentKey::BasicSoldier, 2).unwrap();

        assert_eq!(manager.instance_count(ContentKey::BasicSoldier), 5);
        assert_eq!(second[0].label(), "BasicSoldier_3");
        assert_eq!(second[1].label(), "BasicSoldier_4");
    }

    #[tokio::test]
    async fn instancing_absent_key_is_an_error_with_no_instances() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;

        let err = manager
            .create_instances(ContentKey::Boss, 4)
            .unwrap_err();
        assert!(matches!(
            err,
            PoolError::ContentNotFound {
                key: ContentKey::Boss
            }
        ));
        assert_eq!(manager.instance_count(ContentKey::Boss), 0);
    }

    #[tokio::test]
    async fn pool_survives_reload_until_cleared() {
        let manager = manager();
        manager.load_content(&["Data", "Stage1"]).await;
        manager.create_instances(ContentKey::BasicSoldier, 2).unwrap();

        // Reloading replaces the cache but never the pool.
        manager.load_content(&["Stage3"]).await;
        assert_eq!(manager.instance_count(ContentKey::BasicSoldier), 2);

        manager.clear_pool();
        assert_eq!(manager.instance_count(ContentKey::BasicSoldier), 0);
    }
}
