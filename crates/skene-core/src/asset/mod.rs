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

//! Provides the foundational traits and primitive types for Skene's content
//! system.
//!
//! This module defines the "common language" for all content-related
//! operations in the pipeline. It contains the core contracts that other
//! crates implement or use, but it has no knowledge of where content is
//! stored or how runtime instances behave.
//!
//! The key components are:
//! - The [`Content`] trait: a marker for loadable template types.
//! - [`ContentKey`]: the stable, enumerated identifier for a logical item.
//! - [`ContentHandle`]: shared ownership of one loaded template.
//! - [`ContentSource`]: the asynchronous "load by tag" contract.
//! - [`Instantiate`]: the capability that turns a template into a runtime
//!   instance.

mod handle;
mod key;
mod source;

pub use handle::*;
pub use key::*;
pub use source::*;

/// A marker trait for types that can be managed by the content system.
///
/// This trait's primary purpose is to categorize a type, making it eligible
/// for use within the pipeline's content infrastructure (e.g., in a
/// [`ContentHandle<T>`]).
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: the content type can be safely shared with the loader
///   task and across manager boundaries.
/// - `'static`: the content type does not contain any non-static references,
///   ensuring it can be cached for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use skene_core::asset::Content;
///
/// // A simple struct representing a unit template.
/// struct UnitTemplate {
///     // ... fields
/// }
///
/// // By implementing Content, `UnitTemplate` can now be cached and pooled.
/// impl Content for UnitTemplate {}
/// ```
pub trait Content: Send + Sync + 'static {}

/// The capability of being instantiated from a content template.
///
/// A pooled runtime object is produced by cloning state out of a cached
/// template and tagging the copy with a unique label
/// (`"{key}_{index}"`). Implementations decide their own post-processing:
/// game-object-shaped instances start deactivated, plain data records do
/// not.
pub trait Instantiate<C: Content>: Send + Sync + Sized + 'static {
    /// Creates one runtime instance from `template`, owning `label` as its
    /// unique name within the pool.
    fn instantiate(template: &C, label: String) -> Self;
}
