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

//! The data manager: pools gameplay data records and links them to enemy
//! units announced by other managers.

use super::{tags, STAGE1_BASIC_SOLDIERS};
use crate::content::{DataRecord, EnemyUnit, UnitData};
use crate::driver::StageDriver;
use crate::events::InstancesCreated;
use crate::manager::ContentManager;
use crate::runtime::Manager;
use anyhow::{Context, Result};
use skene_core::asset::{ContentKey, ContentSource};
use skene_core::{EventBus, ServiceRegistry, StageId, SubscriptionId};
use std::sync::{Arc, OnceLock};

/// Capability for linking pooled data records to spawned units.
///
/// The data manager registers this service during injection so other
/// components can request linking directly instead of going through the
/// event bus.
pub struct DataLinkService {
    records: Arc<ContentManager<UnitData, DataRecord>>,
}

impl DataLinkService {
    /// Links data record `i` to unit `i` for every position in the pools.
    ///
    /// The matched-count precondition is checked, not assumed: if the record
    /// pool for `key` and `units` differ in length, nothing is linked and an
    /// error is logged, because positional pairing would be meaningless.
    pub fn link(&self, key: ContentKey, units: &[Arc<EnemyUnit>]) {
        let records = self.records.instances(key);

        if records.len() != units.len() {
            log::error!(
                "DataLinkService: link rejected for {key}: {} record(s) vs {} unit(s)",
                records.len(),
                units.len()
            );
            return;
        }

        for (unit, record) in units.iter().zip(records) {
            unit.attach_data(record);
        }
        log::info!("DataLinkService: linked {} record(s) for {key}", units.len());
    }
}

/// Manager for gameplay data templates and their pooled records.
///
/// Injection resolves the event bus, exposes a [`DataLinkService`], and
/// subscribes to [`InstancesCreated`] so freshly spawned units get their
/// stats attached as soon as another manager announces them. Stage 1 loads
/// the stage's data templates and pools one record per fielded soldier.
pub struct DataManager {
    records: Arc<ContentManager<UnitData, DataRecord>>,
    subscription: OnceLock<SubscriptionId>,
}

impl DataManager {
    /// Creates the manager on top of a data content source.
    pub fn new(source: Arc<dyn ContentSource<UnitData>>) -> Self {
        Self {
            records: Arc::new(ContentManager::new("DataManager", source)),
            subscription: OnceLock::new(),
        }
    }

    /// The underlying record pipeline (cache + pool).
    #[must_use]
    pub fn records(&self) -> &Arc<ContentManager<UnitData, DataRecord>> {
        &self.records
    }

    /// The live [`InstancesCreated`] subscription, once injected. Exposed so
    /// a teardown path can unsubscribe precisely this handler.
    #[must_use]
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription.get().copied()
    }
}

impl Manager for DataManager {
    fn label(&self) -> &'static str {
        "DataManager"
    }

    fn inject_dependencies(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let bus = registry
            .resolve::<EventBus>()
            .context("DataManager requires the event bus")?;

        let link = Arc::new(DataLinkService {
            records: self.records.clone(),
        });
        registry.register(link.clone());

        let subscription = bus.subscribe(move |event: &InstancesCreated| {
            link.link(event.key, &event.instances);
        });
        let _ = self.subscription.set(subscription);

        Ok(())
    }

    fn register_stages(&self, driver: &mut StageDriver) {
        let records = self.records.clone();
        driver.register(
            StageId::Stage1,
            Box::new(move || {
                let records = records.clone();
                Box::pin(async move {
                    records.load_content(&[tags::DATA, tags::STAGE_1]).await;
                    if let Err(err) =
                        records.create_instances(ContentKey::BasicSoldier, STAGE1_BASIC_SOLDIERS)
                    {
                        log::error!("DataManager: {err}");
                    }
                })
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::EnemyTemplate;
    use crate::source::MemorySource;
    use skene_core::asset::Instantiate;

    async fn record_manager_with_pool(count: usize) -> Arc<ContentManager<UnitData, DataRecord>> {
        let mut source = MemorySource::new();
        source.insert(
            "BasicSoldier",
            &[tags::DATA],
            UnitData {
                display_name: "Basic".to_string(),
                health: 100,
                attack: 10,
                move_speed: 1.5,
            },
        );
        let manager = Arc::new(ContentManager::new("DataManager", Arc::new(source)));
        manager.load_content(&[tags::DATA]).await;
        manager.create_instances(ContentKey::BasicSoldier, count).unwrap();
        manager
    }

    fn units(count: usize) -> Vec<Arc<EnemyUnit>> {
        let template = EnemyTemplate {
            mesh: "m".to_string(),
            material: "m".to_string(),
            scale: 1.0,
        };
        (0..count)
            .map(|i| Arc::new(EnemyUnit::instantiate(&template, format!("BasicSoldier_{i}"))))
            .collect()
    }

    #[tokio::test]
    async fn link_pairs_records_and_units_by_position() {
        let records = record_manager_with_pool(3).await;
        let service = DataLinkService {
            records: records.clone(),
        };
        let units = units(3);

        service.link(ContentKey::BasicSoldier, &units);

        let pooled = records.instances(ContentKey::BasicSoldier);
        for (i, unit) in units.iter().enumerate() {
            let linked = unit.data().expect("unit should be linked");
            assert!(Arc::ptr_eq(&linked, &pooled[i]));
        }
    }

    #[tokio::test]
    async fn link_rejects_count_mismatch() {
        let records = record_manager_with_pool(3).await;
        let service = DataLinkService { records };
        let units = units(5);

        service.link(ContentKey::BasicSoldier, &units);

        // Checked contract: nothing is linked on mismatch.
        assert!(units.iter().all(|unit| unit.data().is_none()));
    }
}
