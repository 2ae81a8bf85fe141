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

//! # Skene Runtime
//!
//! The staged content pipeline built on top of `skene-core`: the stage
//! driver, the generic [`ContentManager`] (content cache + instance pool),
//! the phased [`Runtime`] that wires managers together, and the concrete
//! game managers.

#![warn(missing_docs)]

pub mod content;
pub mod driver;
pub mod events;
pub mod manager;
pub mod managers;
pub mod runtime;
pub mod source;

pub use driver::{StageDriver, StageFuture, StageHook};
pub use manager::{ContentManager, PoolError};
pub use runtime::{Manager, Runtime};
