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

//! Lifecycle Controller inventory operations.

use nv_drac_core::EnumerationQuery;
use nv_drac_core::Wsman;

use crate::client::DracClient;
use crate::client::Error;
use crate::uris;

/// Lifecycle Controller inventory operations.
///
/// Created by [`DracClient::lifecycle_controller`].
pub struct LifecycleControllerManagement<T: Wsman> {
    client: DracClient<T>,
}

impl<T: Wsman> Clone for LifecycleControllerManagement<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Wsman> LifecycleControllerManagement<T> {
    pub(crate) fn new(client: DracClient<T>) -> Self {
        Self { client }
    }

    /// Version of the Lifecycle Controller as its dotted components,
    /// e.g. `[2, 1, 0]` for version `2.1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the version is absent or
    /// not a dotted sequence of numbers, and the errors of
    /// [`DracClient::enumerate`].
    pub async fn get_version(&self) -> Result<Vec<u32>, Error<T>> {
        let query =
            EnumerationQuery::new().cql("select LifecycleControllerVersion from DCIM_SystemView");
        let response = self
            .client
            .enumerate(uris::DCIM_SYSTEM_VIEW, &query)
            .await?;
        let version = response
            .find(uris::DCIM_SYSTEM_VIEW, "LifecycleControllerVersion")
            .ok_or_else(|| Error::InvalidResponse {
                reason: "DCIM_SystemView instance carried no LifecycleControllerVersion"
                    .to_string(),
            })?;
        parse_version(version).ok_or_else(|| Error::InvalidResponse {
            reason: format!("malformed Lifecycle Controller version {version}"),
        })
    }
}

fn parse_version(version: &str) -> Option<Vec<u32>> {
    version
        .split('.')
        .map(|part| part.parse::<u32>().ok())
        .collect()
}
