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

// Skene Sandbox
// Main binary for exercising the staged content pipeline end to end.

use anyhow::Result;
use skene_core::asset::ContentKey;
use skene_core::StageId;
use skene_runtime::content::{EnemyTemplate, UnitData};
use skene_runtime::managers::{tags, DataManager, EnemyManager};
use skene_runtime::source::MemorySource;
use skene_runtime::Runtime;
use std::sync::Arc;

fn demo_data_source() -> Arc<MemorySource<UnitData>> {
    let mut source = MemorySource::new();
    source.insert(
        "BasicSoldier",
        &[tags::DATA, tags::STAGE_1],
        UnitData {
            display_name: "Basic Soldier".to_string(),
            health: 100,
            attack: 12,
            move_speed: 1.5,
        },
    );
    source.insert(
        "HeavyGunner",
        &[tags::DATA, tags::STAGE_2],
        UnitData {
            display_name: "Heavy Gunner".to_string(),
            health: 220,
            attack: 30,
            move_speed: 0.8,
        },
    );
    source.insert(
        "Boss",
        &[tags::DATA, tags::STAGE_3],
        UnitData {
            display_name: "Warlord".to_string(),
            health: 1500,
            attack: 80,
            move_speed: 0.6,
        },
    );
    Arc::new(source)
}

fn demo_enemy_source() -> Arc<MemorySource<EnemyTemplate>> {
    let mut source = MemorySource::new();
    source.insert(
        "BasicSoldier",
        &[tags::ENEMY, tags::STAGE_1],
        EnemyTemplate {
            mesh: "soldier_basic.mesh".to_string(),
            material: "soldier_basic.mat".to_string(),
            scale: 1.0,
        },
    );
    Arc::new(source)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = Arc::new(DataManager::new(demo_data_source()));
    let enemy = Arc::new(EnemyManager::new(demo_enemy_source()));

    let mut runtime = Runtime::new();
    // The data manager pools its records before the enemy manager publishes,
    // so positional linking can succeed within the same stage run.
    runtime.add_manager(data.clone())?;
    runtime.add_manager(enemy.clone())?;
    runtime.initialize()?;

    for stage in StageId::ALL {
        runtime.run_stage(stage).await?;
    }

    let units = enemy.units().instances(ContentKey::BasicSoldier);
    log::info!("--- Stage 1 pool ---");
    for unit in &units {
        match unit.data() {
            Some(record) => log::info!(
                "{} -> {} (hp {}, atk {}, active: {})",
                unit.label(),
                record.data().display_name,
                record.data().health,
                record.data().attack,
                unit.is_active()
            ),
            None => log::warn!("{} has no linked data", unit.label()),
        }
    }

    Ok(())
}
