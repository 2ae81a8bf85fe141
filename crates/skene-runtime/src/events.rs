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

//! Event payloads published between managers.

use crate::content::EnemyUnit;
use skene_core::asset::ContentKey;
use skene_core::Event;
use std::sync::Arc;

/// Announces that a pool of enemy units is ready for cross-manager
/// consumption.
///
/// The payload is an immutable value: the key the pool belongs to and the
/// ordered unit handles, in pool order. Subscribers that pair these units
/// with their own pooled objects rely on matching order and count, which
/// the consumer validates before linking.
#[derive(Debug, Clone)]
pub struct InstancesCreated {
    /// The content key the pooled units were instantiated from.
    pub key: ContentKey,
    /// The pooled units, in creation order.
    pub instances: Vec<Arc<EnemyUnit>>,
}

impl Event for InstancesCreated {}
