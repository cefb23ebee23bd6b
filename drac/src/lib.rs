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

//! Client for the WS-Management API of the Dell iDRAC
//!
//! The iDRAC is the baseboard management controller of Dell PowerEdge
//! servers. Besides Redfish, it exposes a WS-Management endpoint whose
//! Lifecycle Controller services drive BIOS, RAID and iDRAC
//! configuration out of band. This crate implements a typed client for
//! that endpoint on top of a pluggable transport.
//!
//! [`DracClient`] is the entry point. It holds any
//! [`Wsman`](nv_drac_core::Wsman) transport, waits for the Lifecycle
//! Controller to become ready before each operation and validates method
//! outcomes. Subsystem operations live on the handles returned by its
//! accessors:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nv_drac::{DracClient, PowerState};
//! use nv_drac_core::http::{ReqwestClient, WsmanEndpoint};
//! use nv_drac_core::BmcCredentials;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = BmcCredentials::new("root".to_string(), "calvin".to_string());
//! let transport = ReqwestClient::new(&WsmanEndpoint::new("192.0.2.1"), credentials)?;
//! let client = DracClient::new(Arc::new(transport));
//!
//! if client.power().get_power_state().await? == PowerState::Off {
//!     client.power().set_power_state(PowerState::On).await?;
//! }
//! # Ok(())
//! # }
//! ```

/// Client, invocation builder and error type.
pub mod client;
/// Return codes and readiness defaults of the Lifecycle Controller.
pub mod constants;
/// Job queue and pending configuration operations.
pub mod jobs;
/// Lifecycle Controller inventory operations.
pub mod lifecycle_controller;
/// Power state operations.
pub mod power;
/// RAID configuration operations.
pub mod raid;
/// Identity table of the configurable iDRAC services.
pub mod service;
/// Resource URIs of the DCIM classes.
pub mod uris;

pub use crate::client::DracClient;
pub use crate::client::Error;
pub use crate::client::Invocation;
pub use crate::jobs::Job;
pub use crate::jobs::JobId;
pub use crate::jobs::JobManagement;
pub use crate::lifecycle_controller::LifecycleControllerManagement;
pub use crate::power::PowerManagement;
pub use crate::power::PowerState;
pub use crate::raid::ConfigResult;
pub use crate::raid::RaidLevel;
pub use crate::raid::RaidManagement;
pub use crate::raid::RebootRequired;
pub use crate::raid::VirtualDiskParams;
pub use crate::service::CimService;
