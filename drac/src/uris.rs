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

//! Resource URIs of the Dell CIM classes.
//!
//! The URI doubles as the XML namespace of the payload elements of the
//! class, both in method responses and in enumerated instances.

/// BIOS attribute configuration service.
pub const DCIM_BIOS_SERVICE: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_BIOSService";

/// The managed server itself.
pub const DCIM_COMPUTER_SYSTEM: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_ComputerSystem";

/// iDRAC attribute configuration service.
pub const DCIM_IDRAC_CARD_SERVICE: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_iDRACCardService";

/// Lifecycle Controller management service.
pub const DCIM_LC_SERVICE: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_LCService";

/// Lifecycle Controller job instances.
pub const DCIM_LIFECYCLE_JOB: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_LifecycleJob";

/// RAID configuration service.
pub const DCIM_RAID_SERVICE: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_RAIDService";

/// System inventory view.
pub const DCIM_SYSTEM_VIEW: &str =
    "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_SystemView";
