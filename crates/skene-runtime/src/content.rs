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

//! Concrete content templates and the runtime instances pooled from them.

use serde::Deserialize;
use skene_core::asset::{Content, Instantiate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A gameplay data template: the stats a unit is stamped from.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitData {
    /// Human-readable unit name.
    pub display_name: String,
    /// Hit points.
    pub health: u32,
    /// Damage per attack.
    pub attack: u32,
    /// Movement speed in units per second.
    pub move_speed: f32,
}

impl Content for UnitData {}

/// A prefab-shaped template describing how a unit looks in the world.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyTemplate {
    /// Mesh resource name.
    pub mesh: String,
    /// Material resource name.
    pub material: String,
    /// Uniform spawn scale.
    pub scale: f32,
}

impl Content for EnemyTemplate {}

/// A pooled copy of a [`UnitData`] template.
///
/// Data records carry no world presence, so instantiation is a plain clone
/// plus a label; there is no activation state to initialize.
#[derive(Debug)]
pub struct DataRecord {
    label: String,
    data: UnitData,
}

impl DataRecord {
    /// The record's unique pool label (`"{key}_{index}"`).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The stats this record was stamped from.
    #[must_use]
    pub fn data(&self) -> &UnitData {
        &self.data
    }
}

impl Instantiate<UnitData> for DataRecord {
    fn instantiate(template: &UnitData, label: String) -> Self {
        Self {
            label,
            data: template.clone(),
        }
    }
}

/// A pooled, game-object-shaped enemy instance.
///
/// Units come out of the pool **deactivated** and stay hidden until
/// gameplay activates them. A unit may be linked to the [`DataRecord`]
/// occupying the same pool position in the data manager's pool.
#[derive(Debug)]
pub struct EnemyUnit {
    label: String,
    template: EnemyTemplate,
    active: AtomicBool,
    data: Mutex<Option<Arc<DataRecord>>>,
}

impl EnemyUnit {
    /// The unit's unique pool label (`"{key}_{index}"`).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The template this unit was spawned from.
    #[must_use]
    pub fn template(&self) -> &EnemyTemplate {
        &self.template
    }

    /// Whether the unit is currently active in the world.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Makes the unit visible and updatable.
    pub fn activate(&self) {
        self.active.store(true, Ordering::Relaxed);
    }

    /// Hides the unit and stops its updates.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Links a data record to this unit, replacing any previous link.
    pub fn attach_data(&self, record: Arc<DataRecord>) {
        *self.data.lock().expect("data link lock poisoned") = Some(record);
    }

    /// The linked data record, if any.
    #[must_use]
    pub fn data(&self) -> Option<Arc<DataRecord>> {
        self.data.lock().expect("data link lock poisoned").clone()
    }
}

impl Instantiate<EnemyTemplate> for EnemyUnit {
    fn instantiate(template: &EnemyTemplate, label: String) -> Self {
        // Spawned copies start hidden; the stage activates them later.
        Self {
            label,
            template: template.clone(),
            active: AtomicBool::new(false),
            data: Mutex::new(None),
        }
    }
}
