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

//! The enemy manager: loads prefab templates, pools unit instances, and
//! announces each fresh pool on the event bus.

use super::{tags, STAGE1_BASIC_SOLDIERS};
use crate::content::{EnemyTemplate, EnemyUnit};
use crate::driver::StageDriver;
use crate::events::InstancesCreated;
use crate::manager::ContentManager;
use crate::runtime::Manager;
use anyhow::{Context, Result};
use skene_core::asset::{ContentKey, ContentSource};
use skene_core::{EventBus, ServiceRegistry, StageId};
use std::sync::{Arc, OnceLock};

/// Manager for enemy prefab templates and their pooled units.
///
/// Stage 1 loads the stage's enemy templates, pools the fielded soldiers
/// (deactivated), and publishes [`InstancesCreated`] so the data manager
/// can attach stats by pool position.
pub struct EnemyManager {
    units: Arc<ContentManager<EnemyTemplate, EnemyUnit>>,
    bus: OnceLock<Arc<EventBus>>,
}

impl EnemyManager {
    /// Creates the manager on top of an enemy content source.
    pub fn new(source: Arc<dyn ContentSource<EnemyTemplate>>) -> Self {
        Self {
            units: Arc::new(ContentManager::new("EnemyManager", source)),
            bus: OnceLock::new(),
        }
    }

    /// The underlying unit pipeline (cache + pool).
    #[must_use]
    pub fn units(&self) -> &Arc<ContentManager<EnemyTemplate, EnemyUnit>> {
        &self.units
    }
}

impl Manager for EnemyManager {
    fn label(&self) -> &'static str {
        "EnemyManager"
    }

    fn inject_dependencies(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let bus = registry
            .resolve::<EventBus>()
            .context("EnemyManager requires the event bus")?;
        let _ = self.bus.set(bus);
        Ok(())
    }

    fn register_stages(&self, driver: &mut StageDriver) {
        let Some(bus) = self.bus.get().cloned() else {
            log::error!("EnemyManager: stage registration before injection; hooks skipped");
            return;
        };

        let units = self.units.clone();
        driver.register(
            StageId::Stage1,
            Box::new(move || {
                let units = units.clone();
                let bus = bus.clone();
                Box::pin(async move {
                    units.load_content(&[tags::ENEMY, tags::STAGE_1]).await;

                    let key = ContentKey::BasicSoldier;
                    match units.create_instances(key, STAGE1_BASIC_SOLDIERS) {
                        Ok(_) => bus.publish(InstancesCreated {
                            key,
                            instances: units.instances(key),
                        }),
                        Err(err) => log::error!("EnemyManager: {err}"),
                    }
                })
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use std::sync::Mutex;

    fn enemy_source() -> Arc<MemorySource<EnemyTemplate>> {
        let mut source = MemorySource::new();
        source.insert(
            "BasicSoldier",
            &[tags::ENEMY, tags::STAGE_1],
            EnemyTemplate {
                mesh: "basic.mesh".to_string(),
                material: "basic.mat".to_string(),
                scale: 1.0,
            },
        );
        Arc::new(source)
    }

    #[tokio::test]
    async fn stage1_pools_and_publishes() {
        let manager = EnemyManager::new(enemy_source());
        let mut registry = ServiceRegistry::new();
        let bus = Arc::new(EventBus::new());
        registry.register(bus.clone());

        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        bus.subscribe(move |event: &InstancesCreated| {
            received_clone
                .lock()
                .unwrap()
                .push((event.key, event.instances.len()));
        });

        manager.inject_dependencies(&mut registry).unwrap();
        let mut driver = StageDriver::new();
        manager.register_stages(&mut driver);

        driver.run_stage(StageId::Stage1).await;

        assert_eq!(
            manager.units().instance_count(ContentKey::BasicSoldier),
            STAGE1_BASIC_SOLDIERS
        );
        assert_eq!(
            *received.lock().unwrap(),
            vec![(ContentKey::BasicSoldier, STAGE1_BASIC_SOLDIERS)]
        );

        // Pooled units come out hidden.
        for unit in manager.units().instances(ContentKey::BasicSoldier) {
            assert!(!unit.is_active());
        }
    }

    #[tokio::test]
    async fn missing_soldier_template_skips_publish() {
        // Stage 1 content exists but holds no BasicSoldier template, so the
        // instancing step errors out and no pool event goes out.
        let mut source = MemorySource::new();
        source.insert(
            "Boss",
            &[tags::ENEMY, tags::STAGE_1],
            EnemyTemplate {
                mesh: "boss.mesh".to_string(),
                material: "boss.mat".to_string(),
                scale: 2.0,
            },
        );
        let manager = EnemyManager::new(Arc::new(source));

        let mut registry = ServiceRegistry::new();
        let bus = Arc::new(EventBus::new());
        registry.register(bus.clone());

        let received = Arc::new(Mutex::new(0usize));
        let received_clone = received.clone();
        bus.subscribe(move |_: &InstancesCreated| {
            *received_clone.lock().unwrap() += 1;
        });

        manager.inject_dependencies(&mut registry).unwrap();
        let mut driver = StageDriver::new();
        manager.register_stages(&mut driver);
        driver.run_stage(StageId::Stage1).await;

        assert_eq!(*received.lock().unwrap(), 0);
        assert_eq!(manager.units().instance_count(ContentKey::BasicSoldier), 0);
    }
}
