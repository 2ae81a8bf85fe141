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
use std::{ops::Deref, sync::Arc};

/// A thread-safe, reference-counted handle to a loaded content template.
///
/// This acts as a smart pointer, providing shared ownership of a template's
/// data. Cloning a handle is cheap, as it only increments the reference
/// count and does not duplicate the underlying template.
///
/// The template data is automatically deallocated when the last handle is
/// dropped, which for a manager's cache means at the next
/// clear-and-reload cycle.
#[derive(Debug)]
pub struct ContentHandle<T: Content>(Arc<T>);

impl<T: Content> ContentHandle<T> {
    /// Creates a new `ContentHandle` that takes ownership of the template.
    ///
    /// This is typically called by a manager once a content item has been
    /// successfully loaded from its source.
    pub fn new(content: T) -> Self {
        Self(Arc::new(content))
    }
}

impl<T: Content> Clone for ContentHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Content> Deref for ContentHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
