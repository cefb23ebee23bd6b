// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Selector and property collections for WS-Management requests.
//!
//! A [`SelectorSet`] identifies the CIM instance a request targets: each
//! selector names one attribute of the instance's identity (DSP0226
//! section 5.1.2.2). A [`PropertySet`] carries the input parameters of a
//! method invocation.
//!
//! Both collections preserve insertion order, which is the order entries
//! are serialized into the request envelope. Names and values are opaque
//! strings; nothing is validated here beyond passing them through.
//! [`PropertySet`] permits repeated names, which is how array-valued CIM
//! method parameters are expressed on the wire.

/// Ordered set of selectors addressing one CIM instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet {
    entries: Vec<(String, String)>,
}

impl SelectorSet {
    /// Create an empty selector set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a selector, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a selector.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value of the first selector with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for SelectorSet {
    fn from(entries: [(K, V); N]) -> Self {
        let mut set = Self::new();
        for (name, value) in entries {
            set.insert(name, value);
        }
        set
    }
}

/// Ordered set of input parameters for a method invocation.
///
/// Unlike [`SelectorSet`], a name may repeat: every occurrence becomes one
/// element in the request body, which is how CIM array parameters are
/// encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: Vec<(String, String)>,
}

impl PropertySet {
    /// Create an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add one value per item under the same name, builder style.
    #[must_use]
    pub fn with_all<V: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.insert_all(name, values);
        self
    }

    /// Add a property.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Add one value per item under the same name (array parameter).
    pub fn insert_all<V: Into<String>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) {
        let name = name.into();
        for value in values {
            self.entries.push((name.clone(), value.into()));
        }
    }

    /// Value of the first property with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for PropertySet {
    fn from(entries: [(K, V); N]) -> Self {
        let mut set = Self::new();
        for (name, value) in entries {
            set.insert(name, value);
        }
        set
    }
}
