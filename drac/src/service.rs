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

//! Identities of the configuration services hosted by the iDRAC.
//!
//! Every configurable subsystem is managed through a CIM service instance
//! that is addressed by the same four selectors, differing only in class
//! name and instance name, and configured against a subsystem-specific
//! target FQDD. [`CimService`] captures one row of that table; the job
//! operations are written once against it.

use nv_drac_core::SelectorSet;

use crate::uris;

/// Identity of one configuration service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CimService {
    /// Resource URI of the service class.
    pub resource_uri: &'static str,
    /// `CreationClassName` selector value.
    pub creation_class_name: &'static str,
    /// `Name` selector value.
    pub name: &'static str,
    /// FQDD the configuration jobs of this service run against.
    pub target: String,
}

impl CimService {
    /// The BIOS attribute configuration service.
    #[must_use]
    pub fn bios() -> Self {
        Self {
            resource_uri: uris::DCIM_BIOS_SERVICE,
            creation_class_name: "DCIM_BIOSService",
            name: "DCIM:BIOSService",
            target: "BIOS.Setup.1-1".to_string(),
        }
    }

    /// The iDRAC attribute configuration service.
    #[must_use]
    pub fn idrac_card() -> Self {
        Self {
            resource_uri: uris::DCIM_IDRAC_CARD_SERVICE,
            creation_class_name: "DCIM_iDRACCardService",
            name: "DCIM:iDRACCardService",
            target: "iDRAC.Embedded.1".to_string(),
        }
    }

    /// The RAID configuration service, targeting one controller.
    #[must_use]
    pub fn raid<S: Into<String>>(controller: S) -> Self {
        Self {
            resource_uri: uris::DCIM_RAID_SERVICE,
            creation_class_name: "DCIM_RAIDService",
            name: "DCIM:RAIDService",
            target: controller.into(),
        }
    }

    /// Selectors addressing this service instance.
    #[must_use]
    pub fn selectors(&self) -> SelectorSet {
        SelectorSet::from([
            ("SystemCreationClassName", "DCIM_ComputerSystem"),
            ("SystemName", "DCIM:ComputerSystem"),
            ("CreationClassName", self.creation_class_name),
            ("Name", self.name),
        ])
    }
}
