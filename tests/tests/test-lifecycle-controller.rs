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

use std::sync::Arc;

use nv_drac::uris;
use nv_drac::DracClient;
use nv_drac_core::EnumerationQuery;
use nv_drac_tests::fixtures;
use nv_drac_tests::DracError;
use nv_drac_tests::Error;
use nv_drac_tests::Expect;
use nv_drac_tests::Wsman;
use tokio::test;

// Check that the Lifecycle Controller version is read from the system
// view and split into its components.
#[test]
async fn reads_the_lifecycle_controller_version() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::enumerate(
        uris::DCIM_SYSTEM_VIEW,
        EnumerationQuery::new().cql("select LifecycleControllerVersion from DCIM_SystemView"),
        &fixtures::enumeration_response(&[fixtures::instance(
            uris::DCIM_SYSTEM_VIEW,
            "DCIM_SystemView",
            &[("LifecycleControllerVersion", Some("2.1.0"))],
        )]),
    ));

    let version = client
        .lifecycle_controller()
        .get_version()
        .await
        .map_err(Error::Drac)?;
    assert_eq!(version, [2, 1, 0]);
    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that a version with non-numeric components is rejected.
#[test]
async fn rejects_a_malformed_version() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::enumerate(
        uris::DCIM_SYSTEM_VIEW,
        EnumerationQuery::new().cql("select LifecycleControllerVersion from DCIM_SystemView"),
        &fixtures::enumeration_response(&[fixtures::instance(
            uris::DCIM_SYSTEM_VIEW,
            "DCIM_SystemView",
            &[("LifecycleControllerVersion", Some("2.1.x"))],
        )]),
    ));

    match client.lifecycle_controller().get_version().await {
        Err(DracError::InvalidResponse { reason }) => {
            assert_eq!(reason, "malformed Lifecycle Controller version 2.1.x");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
