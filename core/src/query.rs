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

//! Enumeration parameter builder for WS-Management requests.
//!
//! WS-Management enumerates CIM class instances through the WS-Enumeration
//! protocol (DSP0226 section 8): an `Enumerate` request opens an
//! enumeration context, and `Pull` requests drain it page by page. The
//! [`EnumerationQuery`] builder carries the knobs a transport needs to
//! drive that exchange:
//!
//! - **Optimized enumeration** asks the service to return the first page
//!   of items directly in the `EnumerateResponse`, saving one round trip.
//! - **Max elements** caps the number of items per page.
//! - **Auto pull** tells the transport to keep issuing `Pull` requests
//!   until the service reports the end of the sequence, merging all pages
//!   into a single response document.
//! - **Filter** restricts the result set server-side with a CQL
//!   (DSP0202) or WQL query.
//!
//! # Examples
//!
//! ```rust
//! use nv_drac_core::EnumerationQuery;
//!
//! // Defaults: optimized, 100 items per page, auto pull, no filter.
//! let query = EnumerationQuery::new();
//! assert!(query.optimization);
//! assert_eq!(query.max_elems, 100);
//! assert!(query.auto_pull);
//! assert!(query.filter.is_none());
//!
//! // Server-side filter with the WQL dialect.
//! let query = EnumerationQuery::new()
//!     .wql("select * from DCIM_LifecycleJob where Name != \"CLEARALL\"");
//! ```

/// Filter dialects understood by the management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDialect {
    /// CIM Query Language (DSP0202).
    Cql,
    /// WMI Query Language.
    Wql,
}

impl FilterDialect {
    /// Dialect identifier URI placed in the `wsman:Filter` element.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Cql => "http://schemas.dmtf.org/wbem/cql/1/dsp0202.pdf",
            Self::Wql => "http://schemas.microsoft.com/wbem/wsman/1/WQL",
        }
    }
}

/// Server-side filter expression with its dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Query text, passed through verbatim.
    pub query: String,
    /// Dialect the query text is written in.
    pub dialect: FilterDialect,
}

/// Parameters of one enumeration exchange.
///
/// Fields are public so transports can read them directly; construction
/// goes through the builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationQuery {
    /// Request the first page of items inside the `EnumerateResponse`.
    pub optimization: bool,
    /// Maximum number of items the service may return per page.
    pub max_elems: u32,
    /// Keep pulling until the end of the sequence and merge the pages.
    pub auto_pull: bool,
    /// Optional server-side filter.
    pub filter: Option<Filter>,
}

impl Default for EnumerationQuery {
    /// Optimized enumeration, 100 items per page, auto pull, no filter.
    fn default() -> Self {
        Self {
            optimization: true,
            max_elems: 100,
            auto_pull: true,
            filter: None,
        }
    }
}

impl EnumerationQuery {
    /// Create a query with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of items returned per page.
    #[must_use]
    pub const fn max_elems(mut self, max_elems: u32) -> Self {
        self.max_elems = max_elems;
        self
    }

    /// Disable optimized enumeration; the first response then carries an
    /// enumeration context only and all items arrive through pulls.
    #[must_use]
    pub const fn no_optimization(mut self) -> Self {
        self.optimization = false;
        self
    }

    /// Return the first response as-is instead of draining the context.
    #[must_use]
    pub const fn no_auto_pull(mut self) -> Self {
        self.auto_pull = false;
        self
    }

    /// Filter the enumeration with a CQL query.
    #[must_use]
    pub fn cql(mut self, query: impl Into<String>) -> Self {
        self.filter = Some(Filter {
            query: query.into(),
            dialect: FilterDialect::Cql,
        });
        self
    }

    /// Filter the enumeration with a WQL query.
    #[must_use]
    pub fn wql(mut self, query: impl Into<String>) -> Self {
        self.filter = Some(Filter {
            query: query.into(),
            dialect: FilterDialect::Wql,
        });
        self
    }
}
