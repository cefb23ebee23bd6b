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

//! WS-Management client abstraction
//!
//! This module defines the transport-agnostic [`Wsman`] trait — a minimal
//! interface for talking to a WS-Management service such as the Dell iDRAC.
//! Implementors provide asynchronous operations to invoke CIM extrinsic
//! methods and to enumerate CIM class instances.
//!
//! Key concepts:
//! - Resource URI: Every CIM class is identified by a resource URI; it
//!   scopes both the operation and the XML namespace of its payload.
//! - Selectors vs. properties: [`crate::SelectorSet`] addresses the
//!   instance a method is invoked on, [`crate::PropertySet`] carries the
//!   input parameters of the method itself.
//! - Response documents: Both operations resolve to a parsed
//!   [`SoapResponse`]; interpreting return codes and payload fields is
//!   left to the caller.
//!
//! Operation semantics:
//! - `invoke` posts a `{method}_INPUT` payload to the addressed instance
//!   and resolves to the raw response envelope.
//! - `enumerate` runs the WS-Enumeration exchange described by an
//!   [`EnumerationQuery`]; when auto pull is enabled the returned document
//!   spans every page of the enumeration.
//!
//! Notes for implementors:
//! - The trait is `Send + Sync` and returns `Send` futures to support use
//!   in async runtimes and multithreaded contexts.
//! - Errors should implement `std::error::Error` and be safely
//!   transferable across threads.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

use crate::query::EnumerationQuery;
use crate::response::SoapResponse;
use crate::selectors::PropertySet;
use crate::selectors::SelectorSet;

/// Wsman trait defines access to a management controller using the
/// WS-Management protocol.
pub trait Wsman: Send + Sync {
    /// Transport error.
    type Error: StdError + Send + Sync + 'static;

    /// Invoke a CIM extrinsic method on the instance addressed by the
    /// selectors.
    fn invoke(
        &self,
        resource_uri: &str,
        method: &str,
        selectors: &SelectorSet,
        properties: &PropertySet,
    ) -> impl Future<Output = Result<SoapResponse, Self::Error>> + Send;

    /// Enumerate instances of the CIM class behind the resource URI.
    fn enumerate(
        &self,
        resource_uri: &str,
        query: &EnumerationQuery,
    ) -> impl Future<Output = Result<SoapResponse, Self::Error>> + Send;
}

/// Credentials used to access the BMC.
///
/// Security notes:
/// - `Debug`/`Display` redact the password by design.
/// - Prefer short-lived instances and avoid logging credentials.
#[derive(Clone)]
pub struct BmcCredentials {
    /// Username to access BMC.
    pub username: String,
    password: String,
}

impl BmcCredentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Get password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BmcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BmcCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for BmcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BmcCredentials(username: {}, password: [REDACTED])",
            self.username
        )
    }
}
