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

//! Protocol constants of the Dell CIM extension.

use std::time::Duration;

/// Return value of a method that completed successfully.
pub const RET_SUCCESS: &str = "0";

/// Return value of a method that failed on the remote side.
pub const RET_ERROR: &str = "2";

/// Return value of a method that created a job.
pub const RET_CREATED: &str = "4096";

/// Message id reported by the Lifecycle Controller when the iDRAC is
/// ready to accept commands.
pub const IDRAC_IS_READY: &str = "LC061";

/// Schedule a configuration job to start immediately.
pub const TIME_NOW: &str = "TIME_NOW";

/// Default number of readiness probes before giving up.
pub const DEFAULT_READY_RETRIES: u32 = 96;

/// Default delay between readiness probes.
pub const DEFAULT_READY_RETRY_DELAY: Duration = Duration::from_secs(10);
