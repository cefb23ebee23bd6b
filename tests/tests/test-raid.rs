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
use nv_drac::ConfigResult;
use nv_drac::DracClient;
use nv_drac::RaidLevel;
use nv_drac::RebootRequired;
use nv_drac::VirtualDiskParams;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;
use nv_drac_tests::fixtures;
use nv_drac_tests::DracError;
use nv_drac_tests::Error;
use nv_drac_tests::Expect;
use nv_drac_tests::Wsman;
use tokio::test;

fn raid_selectors() -> SelectorSet {
    SelectorSet::from([
        ("SystemCreationClassName", "DCIM_ComputerSystem"),
        ("SystemName", "DCIM:ComputerSystem"),
        ("CreationClassName", "DCIM_RAIDService"),
        ("Name", "DCIM:RAIDService"),
    ])
}

// Check that disks are converted to RAID mode with one PDArray entry
// per disk.
#[test]
async fn converts_disks_to_raid_mode() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::invoke(
        uris::DCIM_RAID_SERVICE,
        "ConvertToRAID",
        raid_selectors(),
        PropertySet::from([
            ("PDArray", "Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1"),
            ("PDArray", "Disk.Bay.1:Enclosure.Internal.0-1:RAID.Integrated.1-1"),
        ]),
        &fixtures::method_response(
            uris::DCIM_RAID_SERVICE,
            "ConvertToRAID",
            &[("ReturnValue", "0"), ("RebootRequired", "Optional")],
        ),
    ));

    let result = client
        .raid()
        .convert_physical_disks(
            [
                "Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1",
                "Disk.Bay.1:Enclosure.Internal.0-1:RAID.Integrated.1-1",
            ],
            true,
        )
        .await
        .map_err(Error::Drac)?;
    assert_eq!(
        result,
        ConfigResult {
            commit_required: true,
            reboot_required: RebootRequired::Optional,
        }
    );
    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that a virtual disk is created with the parallel property
// arrays of its parameters.
#[test]
async fn creates_a_virtual_disk() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::invoke(
        uris::DCIM_RAID_SERVICE,
        "CreateVirtualDisk",
        raid_selectors(),
        PropertySet::from([
            ("Target", "RAID.Integrated.1-1"),
            ("PDArray", "Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1"),
            ("PDArray", "Disk.Bay.1:Enclosure.Internal.0-1:RAID.Integrated.1-1"),
            ("VDPropNameArray", "Size"),
            ("VDPropNameArray", "RAIDLevel"),
            ("VDPropNameArray", "VirtualDiskName"),
            ("VDPropNameArray", "SpanLength"),
            ("VDPropNameArray", "SpanDepth"),
            ("VDPropValueArray", "43008"),
            ("VDPropValueArray", "4"),
            ("VDPropValueArray", "os volume"),
            ("VDPropValueArray", "2"),
            ("VDPropValueArray", "1"),
        ]),
        &fixtures::method_response(
            uris::DCIM_RAID_SERVICE,
            "CreateVirtualDisk",
            &[("ReturnValue", "0"), ("RebootRequired", "Yes")],
        ),
    ));

    let params = VirtualDiskParams::new(42 * 1024, RaidLevel::Raid1)
        .disk_name("os volume")
        .span_length(2)
        .span_depth(1);
    let result = client
        .raid()
        .create_virtual_disk(
            "RAID.Integrated.1-1",
            [
                "Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1",
                "Disk.Bay.1:Enclosure.Internal.0-1:RAID.Integrated.1-1",
            ],
            &params,
        )
        .await
        .map_err(Error::Drac)?;
    assert_eq!(result.reboot_required, RebootRequired::Yes);
    assert!(result.commit_required);
    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that a virtual disk is deleted by its FQDD and that the
// RebootRequired casing of the controller is accepted.
#[test]
async fn deletes_a_virtual_disk() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::invoke(
        uris::DCIM_RAID_SERVICE,
        "DeleteVirtualDisk",
        raid_selectors(),
        PropertySet::from([("Target", "Disk.Virtual.0:RAID.Integrated.1-1")]),
        &fixtures::method_response(
            uris::DCIM_RAID_SERVICE,
            "DeleteVirtualDisk",
            &[("ReturnValue", "0"), ("RebootRequired", "NO")],
        ),
    ));

    let result = client
        .raid()
        .delete_virtual_disk("Disk.Virtual.0:RAID.Integrated.1-1")
        .await
        .map_err(Error::Drac)?;
    assert_eq!(result.reboot_required, RebootRequired::No);
    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that a response without RebootRequired is rejected.
#[test]
async fn rejects_a_response_without_reboot_required() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::invoke(
        uris::DCIM_RAID_SERVICE,
        "ConvertToNonRAID",
        raid_selectors(),
        PropertySet::from([(
            "PDArray",
            "Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1",
        )]),
        &fixtures::method_response(
            uris::DCIM_RAID_SERVICE,
            "ConvertToNonRAID",
            &[("ReturnValue", "0")],
        ),
    ));

    let disks = ["Disk.Bay.0:Enclosure.Internal.0-1:RAID.Integrated.1-1"];
    match client.raid().convert_physical_disks(disks, false).await {
        Err(DracError::InvalidResponse { reason }) => {
            assert_eq!(reason, "RAID service response carried no RebootRequired");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
