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

//! Content tag constants shared by content authoring and the managers.

/// Gameplay data templates.
pub const DATA: &str = "Data";
/// Enemy prefab templates.
pub const ENEMY: &str = "Enemy";
/// Content scoped to the title scene.
pub const TITLE: &str = "Title";
/// Content scoped to stage 1.
pub const STAGE_1: &str = "Stage1";
/// Content scoped to stage 2.
pub const STAGE_2: &str = "Stage2";
/// Content scoped to stage 3.
pub const STAGE_3: &str = "Stage3";
