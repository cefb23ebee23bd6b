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

//! Core WS-Management protocol support
//!
//! This crate holds the protocol-level building blocks shared by every
//! WS-Management client implementation:
//!
//! - [`Wsman`]: the transport-agnostic client trait.
//! - [`SelectorSet`] and [`PropertySet`]: instance addressing and method
//!   input parameters.
//! - [`EnumerationQuery`]: parameters of a WS-Enumeration exchange.
//! - [`SoapResponse`]: parsed response documents with namespace-qualified
//!   lookups.
//! - [`soap`]: request envelope construction.
//! - [`http`]: a reqwest-based transport implementing [`Wsman`], enabled
//!   by the `reqwest` feature (on by default).

pub mod http;
pub mod query;
pub mod response;
pub mod selectors;
pub mod soap;
pub mod wsman;

pub use crate::query::EnumerationQuery;
pub use crate::query::Filter;
pub use crate::query::FilterDialect;
pub use crate::response::Instance;
pub use crate::response::ParseError;
pub use crate::response::SoapResponse;
pub use crate::response::XmlElement;
pub use crate::selectors::PropertySet;
pub use crate::selectors::SelectorSet;
pub use crate::wsman::BmcCredentials;
pub use crate::wsman::Wsman;
