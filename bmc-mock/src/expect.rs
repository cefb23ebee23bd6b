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

//! Expectations for the WS-Management mock.

use nv_drac_core::EnumerationQuery;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;
use nv_drac_core::SoapResponse;

pub type Response<E> = Result<SoapResponse, E>;

/// Request expected by the transport.
#[derive(Debug)]
pub enum ExpectedRequest {
    /// Expected method invocation.
    Invoke {
        resource_uri: String,
        method: String,
        selectors: SelectorSet,
        properties: PropertySet,
    },
    /// Expected enumeration.
    Enumerate {
        resource_uri: String,
        query: EnumerationQuery,
    },
}

/// Expectation for the tests.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: ExpectedRequest,
    pub response: Response<E>,
}

impl<E> Expect<E> {
    pub fn invoke(
        resource_uri: impl Into<String>,
        method: impl Into<String>,
        selectors: SelectorSet,
        properties: PropertySet,
        response: &str,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Invoke {
                resource_uri: resource_uri.into(),
                method: method.into(),
                selectors,
                properties,
            },
            response: Ok(SoapResponse::parse(response).expect("invalid xml")),
        }
    }

    pub fn invoke_err(
        resource_uri: impl Into<String>,
        method: impl Into<String>,
        selectors: SelectorSet,
        properties: PropertySet,
        error: E,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Invoke {
                resource_uri: resource_uri.into(),
                method: method.into(),
                selectors,
                properties,
            },
            response: Err(error),
        }
    }

    pub fn enumerate(
        resource_uri: impl Into<String>,
        query: EnumerationQuery,
        response: &str,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Enumerate {
                resource_uri: resource_uri.into(),
                query,
            },
            response: Ok(SoapResponse::parse(response).expect("invalid xml")),
        }
    }

    pub fn enumerate_err(
        resource_uri: impl Into<String>,
        query: EnumerationQuery,
        error: E,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Enumerate {
                resource_uri: resource_uri.into(),
                query,
            },
            response: Err(error),
        }
    }
}
