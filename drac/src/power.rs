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

//! Server power state operations.

use std::fmt;

use nv_drac_core::EnumerationQuery;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;
use nv_drac_core::Wsman;
use serde::Deserialize;
use serde::Serialize;

use crate::client::DracClient;
use crate::client::Error;
use crate::client::Invocation;
use crate::constants;
use crate::uris;

/// Power state of the managed server.
///
/// The wire encoding is the CIM `EnabledState`/`RequestedState` code of
/// `DCIM_ComputerSystem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    /// The server is powered on.
    On,
    /// The server is powered off.
    Off,
    /// The server is rebooting.
    Reboot,
}

impl PowerState {
    /// CIM state code of this power state.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::On => "2",
            Self::Off => "3",
            Self::Reboot => "11",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "2" => Some(Self::On),
            "3" => Some(Self::Off),
            "11" => Some(Self::Reboot),
            _ => None,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "POWER_ON",
            Self::Off => "POWER_OFF",
            Self::Reboot => "REBOOT",
        })
    }
}

/// Power state operations.
///
/// Created by [`DracClient::power`].
pub struct PowerManagement<T: Wsman> {
    client: DracClient<T>,
}

impl<T: Wsman> Clone for PowerManagement<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Wsman> PowerManagement<T> {
    pub(crate) fn new(client: DracClient<T>) -> Self {
        Self { client }
    }

    /// Current power state of the server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the response carries no
    /// known state code, and the errors of [`DracClient::enumerate`].
    pub async fn get_power_state(&self) -> Result<PowerState, Error<T>> {
        let query = EnumerationQuery::new().cql("select EnabledState from DCIM_ComputerSystem");
        let response = self
            .client
            .enumerate(uris::DCIM_COMPUTER_SYSTEM, &query)
            .await?;
        let code = response
            .find(uris::DCIM_COMPUTER_SYSTEM, "EnabledState")
            .ok_or_else(|| Error::InvalidResponse {
                reason: "DCIM_ComputerSystem instance carried no EnabledState".to_string(),
            })?;
        PowerState::from_code(code).ok_or_else(|| Error::InvalidResponse {
            reason: format!("unknown power state code {code}"),
        })
    }

    /// Request a power state change of the server.
    ///
    /// # Errors
    ///
    /// Same errors as [`DracClient::invoke`].
    pub async fn set_power_state(&self, state: PowerState) -> Result<(), Error<T>> {
        let selectors = SelectorSet::from([
            ("CreationClassName", "DCIM_ComputerSystem"),
            ("Name", "srv:system"),
        ]);
        let invocation = Invocation::new(uris::DCIM_COMPUTER_SYSTEM, "RequestStateChange")
            .selectors(selectors)
            .properties(PropertySet::new().with("RequestedState", state.code()))
            .expect_return_value(constants::RET_SUCCESS);
        self.client.invoke(invocation).await?;
        Ok(())
    }
}
