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

//! A generic, type-safe service locator for pipeline subsystems.
//!
//! The [`ServiceRegistry`] provides a type-map where managers can store and
//! retrieve shared handles to services (e.g., the [`EventBus`](crate::EventBus),
//! a cross-manager link service) without coupling any manager to another's
//! concrete type.
//!
//! # Design
//!
//! This follows the **Service Locator** pattern: each manager fetches only
//! the capabilities it needs during its injection phase, and adding new
//! services never modifies existing managers. The registry is an explicit
//! value owned by the runtime, not process-global state; its lifetime and
//! the moment it is handed to each manager are both visible in the
//! initialization code.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Errors produced by [`ServiceRegistry`] lookups.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No implementation has been registered for the requested capability.
    ///
    /// Callers that require the service should treat this as fatal for
    /// their own initialization.
    #[error("no service registered for capability `{0}`")]
    NotRegistered(&'static str),
}

/// A generic service registry keyed by [`TypeId`].
///
/// Services are stored as `Arc<dyn Any + Send + Sync>` and can be retrieved
/// by their concrete type via [`resolve`](ServiceRegistry::resolve) or
/// [`try_resolve`](ServiceRegistry::try_resolve). Handles are shared, so a
/// manager may keep a resolved service alive past the injection call.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use skene_core::service_registry::ServiceRegistry;
///
/// struct MyService { value: i32 }
///
/// let mut registry = ServiceRegistry::new();
/// registry.register(Arc::new(MyService { value: 42 }));
///
/// let svc = registry.resolve::<MyService>().unwrap();
/// assert_eq!(svc.value, 42);
/// ```
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    /// Creates an empty service registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Registers a service, keyed by `T`'s [`TypeId`].
    ///
    /// If a service of the same type was already registered, it is replaced;
    /// prior holders of the old handle are not notified.
    pub fn register<T: Send + Sync + 'static>(&mut self, service: Arc<T>) {
        self.services.insert(TypeId::of::<T>(), service);
    }

    /// Resolves a required capability.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotRegistered`] if no service of type `T`
    /// has been registered.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        self.try_resolve::<T>()
            .ok_or(RegistryError::NotRegistered(type_name::<T>()))
    }

    /// Resolves an optional capability.
    ///
    /// Returns `None` if no service of type `T` has been registered; never
    /// fails.
    #[must_use]
    pub fn try_resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|boxed| boxed.downcast::<T>().ok())
    }

    /// Returns `true` if a service of type `T` is registered.
    #[must_use]
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
