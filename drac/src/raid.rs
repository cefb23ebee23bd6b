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

//! RAID configuration operations.
//!
//! RAID changes go through `DCIM_RAIDService` and are pending until
//! committed with a configuration job; every operation here reports
//! whether a commit and a reboot are needed through [`ConfigResult`].
//! Disks and controllers are addressed by their FQDD, e.g.
//! `Disk.Bay.1:Enclosure.Internal.0-1:RAID.Integrated.1-1`.

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

/// RAID level of a virtual disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidLevel {
    /// Pass-through, no redundancy.
    NonRaid,
    /// Striping.
    Raid0,
    /// Mirroring.
    Raid1,
    /// Striping with distributed parity.
    Raid5,
    /// Striping with double distributed parity.
    Raid6,
    /// Striped mirrors.
    Raid10,
    /// Striped RAID 5 spans.
    Raid50,
    /// Striped RAID 6 spans.
    Raid60,
}

impl RaidLevel {
    /// `DCIM_RAIDService` code of this level.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NonRaid => "1",
            Self::Raid0 => "2",
            Self::Raid1 => "4",
            Self::Raid5 => "64",
            Self::Raid6 => "128",
            Self::Raid10 => "2048",
            Self::Raid50 => "8192",
            Self::Raid60 => "16384",
        }
    }
}

/// Whether a reboot is needed for a pending change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebootRequired {
    /// The change requires a reboot.
    Yes,
    /// The change applies without a reboot.
    No,
    /// A reboot applies the change sooner but is not required.
    Optional,
}

impl RebootRequired {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }
}

/// Outcome of a RAID configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResult {
    /// The change is pending until committed with a configuration job.
    pub commit_required: bool,
    /// Whether the server has to be rebooted for the change.
    pub reboot_required: RebootRequired,
}

/// Parameters of a virtual disk to create.
///
/// # Examples
///
/// ```rust
/// use nv_drac::{RaidLevel, VirtualDiskParams};
///
/// let params = VirtualDiskParams::new(42 * 1024, RaidLevel::Raid1)
///     .disk_name("os volume")
///     .span_length(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDiskParams {
    size_mb: u64,
    raid_level: RaidLevel,
    disk_name: Option<String>,
    span_length: Option<u32>,
    span_depth: Option<u32>,
}

impl VirtualDiskParams {
    /// Parameters for a disk of `size_mb` megabytes at a RAID level.
    #[must_use]
    pub const fn new(size_mb: u64, raid_level: RaidLevel) -> Self {
        Self {
            size_mb,
            raid_level,
            disk_name: None,
            span_length: None,
            span_depth: None,
        }
    }

    /// Name of the virtual disk.
    #[must_use]
    pub fn disk_name<S: Into<String>>(mut self, name: S) -> Self {
        self.disk_name = Some(name.into());
        self
    }

    /// Number of disks per span.
    #[must_use]
    pub const fn span_length(mut self, length: u32) -> Self {
        self.span_length = Some(length);
        self
    }

    /// Number of spans of the virtual disk.
    #[must_use]
    pub const fn span_depth(mut self, depth: u32) -> Self {
        self.span_depth = Some(depth);
        self
    }

    /// Parallel `VDPropNameArray`/`VDPropValueArray` entries.
    fn property_arrays(&self) -> (Vec<String>, Vec<String>) {
        let mut names = vec!["Size".to_string(), "RAIDLevel".to_string()];
        let mut values = vec![self.size_mb.to_string(), self.raid_level.code().to_string()];
        if let Some(name) = &self.disk_name {
            names.push("VirtualDiskName".to_string());
            values.push(name.clone());
        }
        if let Some(length) = self.span_length {
            names.push("SpanLength".to_string());
            values.push(length.to_string());
        }
        if let Some(depth) = self.span_depth {
            names.push("SpanDepth".to_string());
            values.push(depth.to_string());
        }
        (names, values)
    }
}

/// RAID configuration operations.
///
/// Created by [`DracClient::raid`].
pub struct RaidManagement<T: Wsman> {
    client: DracClient<T>,
}

impl<T: Wsman> Clone for RaidManagement<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Wsman> RaidManagement<T> {
    pub(crate) fn new(client: DracClient<T>) -> Self {
        Self { client }
    }

    /// Convert physical disks into or out of RAID mode.
    ///
    /// With `raid` the disks become RAID-capable; without it they are
    /// converted to pass-through.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the response carries no
    /// usable `RebootRequired`, and the errors of [`DracClient::invoke`].
    pub async fn convert_physical_disks<I, S>(
        &self,
        disks: I,
        raid: bool,
    ) -> Result<ConfigResult, Error<T>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let method = if raid { "ConvertToRAID" } else { "ConvertToNonRAID" };
        let invocation = Invocation::new(uris::DCIM_RAID_SERVICE, method)
            .selectors(Self::service_selectors())
            .properties(PropertySet::new().with_all("PDArray", disks))
            .expect_return_value(constants::RET_SUCCESS);
        self.invoke_config_change(invocation).await
    }

    /// Create a virtual disk from physical disks of a controller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the response carries no
    /// usable `RebootRequired`, and the errors of [`DracClient::invoke`].
    pub async fn create_virtual_disk<C, I, S>(
        &self,
        controller: C,
        disks: I,
        params: &VirtualDiskParams,
    ) -> Result<ConfigResult, Error<T>>
    where
        C: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (names, values) = params.property_arrays();
        let mut properties = PropertySet::new().with("Target", controller);
        properties.insert_all("PDArray", disks);
        properties.insert_all("VDPropNameArray", names);
        properties.insert_all("VDPropValueArray", values);

        let invocation = Invocation::new(uris::DCIM_RAID_SERVICE, "CreateVirtualDisk")
            .selectors(Self::service_selectors())
            .properties(properties)
            .expect_return_value(constants::RET_SUCCESS);
        self.invoke_config_change(invocation).await
    }

    /// Delete a virtual disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the response carries no
    /// usable `RebootRequired`, and the errors of [`DracClient::invoke`].
    pub async fn delete_virtual_disk<S: Into<String>>(
        &self,
        virtual_disk: S,
    ) -> Result<ConfigResult, Error<T>> {
        let invocation = Invocation::new(uris::DCIM_RAID_SERVICE, "DeleteVirtualDisk")
            .selectors(Self::service_selectors())
            .properties(PropertySet::new().with("Target", virtual_disk))
            .expect_return_value(constants::RET_SUCCESS);
        self.invoke_config_change(invocation).await
    }

    async fn invoke_config_change(
        &self,
        invocation: Invocation,
    ) -> Result<ConfigResult, Error<T>> {
        let response = self.client.invoke(invocation).await?;
        let value = response
            .find(uris::DCIM_RAID_SERVICE, "RebootRequired")
            .ok_or_else(|| Error::InvalidResponse {
                reason: "RAID service response carried no RebootRequired".to_string(),
            })?;
        let reboot_required = RebootRequired::parse(value).ok_or_else(|| Error::InvalidResponse {
            reason: format!("unknown RebootRequired value {value}"),
        })?;
        Ok(ConfigResult {
            commit_required: true,
            reboot_required,
        })
    }

    fn service_selectors() -> SelectorSet {
        SelectorSet::from([
            ("SystemCreationClassName", "DCIM_ComputerSystem"),
            ("SystemName", "DCIM:ComputerSystem"),
            ("CreationClassName", "DCIM_RAIDService"),
            ("Name", "DCIM:RAIDService"),
        ])
    }
}
