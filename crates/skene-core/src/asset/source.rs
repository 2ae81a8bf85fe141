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

use super::Content;
use async_trait::async_trait;

/// Errors produced by a [`ContentSource`] load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backing store could not be read.
    #[error("content source I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes could not be decoded into content items.
    #[error("content decode failure: {0}")]
    Decode(String),

    /// The source has no data for the requested tags.
    #[error("no content available for tags {0:?}")]
    Unavailable(Vec<String>),
}

/// One named content item as returned by a [`ContentSource`].
///
/// The `name` is the item's file-like identity string and is what the
/// caching layer matches against [`ContentKey`](super::ContentKey) names.
#[derive(Debug, Clone)]
pub struct LoadedItem<C> {
    /// The item's name string (e.g., `"BasicSoldier"`).
    pub name: String,
    /// The loaded template data.
    pub content: C,
}

impl<C> LoadedItem<C> {
    /// Creates a named item.
    pub fn new(name: impl Into<String>, content: C) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// The asynchronous "load by tag" contract consumed by managers.
///
/// A source resolves a set of tag strings to the content items carrying any
/// of those tags (union merge: an item matching several requested tags
/// appears exactly once). Awaiting [`load_tagged`](Self::load_tagged) is the
/// single suspension point of the manager pipeline; nothing else in the
/// pipeline suspends, and no cancellation or timeout mechanism exists here.
#[async_trait]
pub trait ContentSource<C: Content>: Send + Sync {
    /// Loads every item matching at least one of `tags`.
    ///
    /// # Errors
    /// Returns a [`LoadError`] when the backing store cannot be read or
    /// decoded; the caller recovers locally (its cache stays empty for the
    /// cycle).
    async fn load_tagged(&self, tags: &[&str]) -> Result<Vec<LoadedItem<C>>, LoadError>;
}
