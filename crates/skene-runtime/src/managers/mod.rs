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

//! Concrete managers: type-specializations of the generic pipeline with
//! their stage-specific loading policy and cross-manager linking logic.

mod data;
mod enemy;
pub mod tags;

pub use data::{DataLinkService, DataManager};
pub use enemy::EnemyManager;

/// How many basic soldiers stage 1 fields. Both the enemy pool and the data
/// pool are sized by this so positional linking holds.
pub(crate) const STAGE1_BASIC_SOLDIERS: usize = 10;
