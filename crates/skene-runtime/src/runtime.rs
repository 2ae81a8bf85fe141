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

//! Phased runtime initialization.
//!
//! The [`Runtime`] owns the service registry, the event bus (registered as
//! the default service), the stage driver, and the managers. Initialization
//! is an explicit two-phase barrier: **every** manager's dependency
//! injection completes before **any** manager registers stage hooks, and no
//! stage runs before both phases finish. This replaces initialization
//! ordering that would otherwise be implied by component construction
//! order.

use crate::driver::StageDriver;
use anyhow::{bail, Context, Result};
use skene_core::{EventBus, ServiceRegistry, StageId};
use std::sync::Arc;

/// A subsystem participating in the staged content pipeline.
///
/// Managers are driven through their lifecycle by the [`Runtime`]:
/// injection first, stage registration second, stage hooks last.
pub trait Manager: Send + Sync {
    /// The manager's diagnostic name.
    fn label(&self) -> &'static str;

    /// Resolves required services, optionally registers capabilities of its
    /// own, and subscribes to events published by other managers.
    ///
    /// # Errors
    /// Failing to resolve a required capability is fatal to initialization;
    /// the error aborts [`Runtime::initialize`].
    fn inject_dependencies(&self, registry: &mut ServiceRegistry) -> Result<()>;

    /// Registers this manager's stage hooks. Runs strictly after every
    /// manager's [`inject_dependencies`](Self::inject_dependencies).
    fn register_stages(&self, driver: &mut StageDriver);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Ready,
}

/// Owns the pipeline's shared services and drives manager initialization.
pub struct Runtime {
    registry: ServiceRegistry,
    driver: StageDriver,
    managers: Vec<Arc<dyn Manager>>,
    phase: Phase,
}

impl Runtime {
    /// Creates a runtime with the default services registered.
    ///
    /// The [`EventBus`] is always available as a capability, so managers can
    /// resolve it unconditionally during injection.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = ServiceRegistry::new();
        registry.register(Arc::new(EventBus::new()));

        Self {
            registry,
            driver: StageDriver::new(),
            managers: Vec::new(),
            phase: Phase::Created,
        }
    }

    /// Adds a manager. Managers are injected and registered in the order
    /// they are added, which fixes the relative order of their stage hooks.
    ///
    /// # Errors
    /// Fails once [`initialize`](Self::initialize) has run.
    pub fn add_manager(&mut self, manager: Arc<dyn Manager>) -> Result<()> {
        if self.phase != Phase::Created {
            bail!(
                "cannot add manager `{}`: runtime already initialized",
                manager.label()
            );
        }
        log::debug!("Runtime: added manager `{}`", manager.label());
        self.managers.push(manager);
        Ok(())
    }

    /// Runs both initialization phases: dependency injection for every
    /// manager, then stage registration for every manager.
    ///
    /// # Errors
    /// Fails if called twice, or if any manager's injection fails (registry
    /// misconfiguration is a loud, immediate failure).
    pub fn initialize(&mut self) -> Result<()> {
        if self.phase != Phase::Created {
            bail!("runtime already initialized");
        }

        for manager in &self.managers {
            manager
                .inject_dependencies(&mut self.registry)
                .with_context(|| {
                    format!("dependency injection failed for manager `{}`", manager.label())
                })?;
        }

        // Phase barrier: no hook exists until every manager is injected.
        for manager in &self.managers {
            manager.register_stages(&mut self.driver);
        }

        self.phase = Phase::Ready;
        log::info!(
            "Runtime initialized: {} manager(s), {} service(s)",
            self.managers.len(),
            self.registry.len()
        );
        Ok(())
    }

    /// Runs every hook registered for `stage`, in manager order.
    ///
    /// # Errors
    /// Fails if the runtime has not been initialized.
    pub async fn run_stage(&self, stage: StageId) -> Result<()> {
        if self.phase != Phase::Ready {
            bail!("run_stage({stage}) called before initialize");
        }
        self.driver.run_stage(stage).await;
        Ok(())
    }

    /// The service registry (read access; mutation happens only during
    /// injection).
    #[must_use]
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullManager;

    impl Manager for NullManager {
        fn label(&self) -> &'static str {
            "NullManager"
        }

        fn inject_dependencies(&self, registry: &mut ServiceRegistry) -> Result<()> {
            // The default bus must already be available here.
            registry.resolve::<EventBus>()?;
            Ok(())
        }

        fn register_stages(&self, _driver: &mut StageDriver) {}
    }

    #[test]
    fn default_event_bus_is_registered() {
        let runtime = Runtime::new();
        assert!(runtime.registry().contains::<EventBus>());
    }

    #[tokio::test]
    async fn run_stage_before_initialize_fails() {
        let runtime = Runtime::new();
        assert!(runtime.run_stage(StageId::Title).await.is_err());
    }

    #[test]
    fn double_initialize_fails() {
        let mut runtime = Runtime::new();
        runtime.add_manager(Arc::new(NullManager)).unwrap();
        runtime.initialize().unwrap();
        assert!(runtime.initialize().is_err());
    }

    #[test]
    fn add_manager_after_initialize_fails() {
        let mut runtime = Runtime::new();
        runtime.initialize().unwrap();
        assert!(runtime.add_manager(Arc::new(NullManager)).is_err());
    }
}
