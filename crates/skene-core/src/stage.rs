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

//! Scene-stage lifecycle identifiers.

use std::fmt;

/// One phase of the game's scene lifecycle.
///
/// Stage drivers key their hook lists by this identifier; each manager
/// registers at most one callback per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// The title scene.
    Title,
    /// The first combat stage.
    Stage1,
    /// The second combat stage.
    Stage2,
    /// The third combat stage.
    Stage3,
}

impl StageId {
    /// Every stage, in lifecycle order.
    pub const ALL: [StageId; 4] = [
        StageId::Title,
        StageId::Stage1,
        StageId::Stage2,
        StageId::Stage3,
    ];
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageId::Title => "Title",
            StageId::Stage1 => "Stage1",
            StageId::Stage2 => "Stage2",
            StageId::Stage3 => "Stage3",
        };
        f.write_str(name)
    }
}
