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

//! Stage driver: the ordered collection of suspendable stage hooks.

use skene_core::StageId;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// The future produced by one invocation of a stage hook.
pub type StageFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A suspendable stage callback. Invoked once per stage run; each call
/// produces a fresh future so the driver can run the same stage repeatedly.
pub type StageHook = Box<dyn Fn() -> StageFuture + Send + Sync>;

/// Ordered, stage-keyed collection of hooks.
///
/// Managers register their hooks during the runtime's registration phase;
/// the driver runs a stage's hooks sequentially in registration order,
/// awaiting each one before starting the next. Relative ordering across
/// managers therefore follows the order managers were added to the
/// [`Runtime`](crate::Runtime) — an explicit ordering, visible at the call
/// site, rather than one implied by component construction.
#[derive(Default)]
pub struct StageDriver {
    hooks: HashMap<StageId, Vec<StageHook>>,
}

impl StageDriver {
    /// Creates an empty driver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Appends `hook` to the list for `stage`.
    pub fn register(&mut self, stage: StageId, hook: StageHook) {
        let entries = self.hooks.entry(stage).or_default();
        entries.push(hook);
        log::debug!(
            "StageDriver: registered hook #{} for {stage}",
            entries.len()
        );
    }

    /// Returns the number of hooks registered for `stage`.
    #[must_use]
    pub fn hook_count(&self, stage: StageId) -> usize {
        self.hooks.get(&stage).map_or(0, Vec::len)
    }

    /// Runs every hook registered for `stage`, in registration order.
    ///
    /// Each hook is awaited to completion before the next starts; a stalled
    /// hook stalls the stage.
    pub async fn run_stage(&self, stage: StageId) {
        let hooks = match self.hooks.get(&stage) {
            Some(hooks) => hooks,
            None => {
                log::debug!("StageDriver: no hooks for {stage}");
                return;
            }
        };

        log::info!("StageDriver: running {stage} ({} hook(s))", hooks.len());
        for hook in hooks {
            hook().await;
        }
    }
}
