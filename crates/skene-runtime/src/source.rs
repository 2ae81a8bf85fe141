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

//! Content source implementations.
//!
//! Two backends for the [`ContentSource`] contract: an in-memory source for
//! tests and demos, and a JSON-directory source for packed-on-disk content.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skene_core::asset::{Content, ContentSource, LoadError, LoadedItem};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::PathBuf;

struct TaggedItem<C> {
    name: String,
    tags: Vec<String>,
    content: C,
}

/// An in-memory content source.
///
/// Items are inserted with a name and a tag set; a load returns every item
/// matching at least one requested tag (union merge), deduplicated by name
/// with the first insertion winning. Requesting tags that match nothing is
/// a load failure, mirroring how an addressable backend rejects unknown
/// keys.
#[derive(Default)]
pub struct MemorySource<C> {
    items: Vec<TaggedItem<C>>,
}

impl<C: Content + Clone> MemorySource<C> {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds one named, tagged item.
    pub fn insert(&mut self, name: impl Into<String>, tags: &[&str], content: C) {
        self.items.push(TaggedItem {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content,
        });
    }
}

#[async_trait]
impl<C: Content + Clone> ContentSource<C> for MemorySource<C> {
    async fn load_tagged(&self, tags: &[&str]) -> Result<Vec<LoadedItem<C>>, LoadError> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for item in &self.items {
            let matches = item.tags.iter().any(|t| tags.contains(&t.as_str()));
            if matches && seen.insert(item.name.as_str()) {
                result.push(LoadedItem::new(item.name.clone(), item.content.clone()));
            }
        }

        if result.is_empty() {
            return Err(LoadError::Unavailable(
                tags.iter().map(|t| t.to_string()).collect(),
            ));
        }
        Ok(result)
    }
}

#[derive(Deserialize)]
struct NamedEntry<C> {
    name: String,
    content: C,
}

/// A content source reading one JSON file per tag from a directory.
///
/// A load of `["Enemy", "Stage1"]` reads `<root>/Enemy.json` and
/// `<root>/Stage1.json`, each a JSON array of `{ "name": ..., "content":
/// {...} }` entries, and union-merges the results (first occurrence of a
/// name wins). A missing tag file is an I/O failure; malformed JSON is a
/// decode failure.
pub struct JsonDirSource<C> {
    root: PathBuf,
    _content: PhantomData<fn() -> C>,
}

impl<C> JsonDirSource<C> {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _content: PhantomData,
        }
    }
}

#[async_trait]
impl<C: Content + DeserializeOwned> ContentSource<C> for JsonDirSource<C> {
    async fn load_tagged(&self, tags: &[&str]) -> Result<Vec<LoadedItem<C>>, LoadError> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for tag in tags {
            let path = self.root.join(format!("{tag}.json"));
            let bytes = tokio::fs::read(&path).await?;
            let entries: Vec<NamedEntry<C>> = serde_json::from_slice(&bytes)
                .map_err(|err| LoadError::Decode(format!("{}: {err}", path.display())))?;

            for entry in entries {
                if seen.insert(entry.name.clone()) {
                    result.push(LoadedItem::new(entry.name, entry.content));
                }
            }
        }

        Ok(result)
    }
}
