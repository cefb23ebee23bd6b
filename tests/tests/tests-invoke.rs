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
use nv_drac::CimService;
use nv_drac::DracClient;
use nv_drac::Invocation;
use nv_drac_core::EnumerationQuery;
use nv_drac_core::PropertySet;
use nv_drac_tests::fixtures;
use nv_drac_tests::DracError;
use nv_drac_tests::Error;
use nv_drac_tests::Expect;
use nv_drac_tests::Wsman;
use tokio::test;

fn bios_set_attribute() -> (CimService, PropertySet) {
    let service = CimService::bios();
    let properties = PropertySet::new()
        .with("Target", service.target.as_str())
        .with("AttributeName", "ProcVirtualization")
        .with("AttributeValue", "Disabled");
    (service, properties)
}

// Check that a gated invocation probes for readiness first and then
// invokes the method.
#[test]
async fn gated_invoke_probes_then_invokes() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::method_response(service.resource_uri, "SetAttributes", &[("ReturnValue", "0")]),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .expect_return_value("0");
    client.invoke(invocation).await.map_err(Error::Drac)?;

    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that an ungated invocation goes straight to the method.
#[test]
async fn ungated_invoke_skips_the_probe() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::method_response(service.resource_uri, "SetAttributes", &[("ReturnValue", "0")]),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .expect_return_value("0")
        .skip_ready_gate();
    client.invoke(invocation).await.map_err(Error::Drac)?;

    assert!(wsman.is_exhausted());
    Ok(())
}

// Check that a failing probe aborts the invocation before the method is
// ever sent.
#[test]
async fn a_failing_gate_aborts_the_invocation() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        uris::DCIM_LC_SERVICE,
        "GetRemoteServicesAPIStatus",
        fixtures::lc_selectors(),
        PropertySet::new(),
        &fixtures::method_response(
            uris::DCIM_LC_SERVICE,
            "GetRemoteServicesAPIStatus",
            &[("ReturnValue", "2"), ("Message", "LC is busy")],
        ),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties);
    match client.invoke(invocation).await {
        Err(DracError::OperationFailed { messages }) => {
            assert_eq!(messages, ["LC is busy"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(wsman.is_exhausted());
}

// Check that an error return value collects every message of the
// response in document order.
#[test]
async fn error_return_collects_all_messages() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::method_response(
            service.resource_uri,
            "SetAttributes",
            &[
                ("Message", "Invalid AttributeName"),
                ("ReturnValue", "2"),
                ("Message", "Attribute is read only"),
            ],
        ),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .skip_ready_gate();
    match client.invoke(invocation).await {
        Err(DracError::OperationFailed { messages }) => {
            assert_eq!(messages, ["Invalid AttributeName", "Attribute is read only"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// Check that a return value other than the expected one reports both
// values.
#[test]
async fn unexpected_return_value_reports_both() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::method_response(
            service.resource_uri,
            "SetAttributes",
            &[("ReturnValue", "4096")],
        ),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .expect_return_value("0")
        .skip_ready_gate();
    match client.invoke(invocation).await {
        Err(DracError::UnexpectedReturnValue { expected, actual }) => {
            assert_eq!(expected, "0");
            assert_eq!(actual, "4096");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// Check that skipping validation hands back the raw response.
#[test]
async fn skipped_validation_returns_the_raw_response() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::method_response(
            service.resource_uri,
            "SetAttributes",
            &[("ReturnValue", "2"), ("Message", "Invalid AttributeName")],
        ),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .skip_ready_gate()
        .skip_return_value_check();
    let response = client.invoke(invocation).await.map_err(Error::Drac)?;
    assert_eq!(response.find(service.resource_uri, "ReturnValue"), Some("2"));
    Ok(())
}

// Check that a response without a return value is rejected.
#[test]
async fn missing_return_value_is_rejected() {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());
    let (service, properties) = bios_set_attribute();

    wsman.expect(Expect::invoke(
        service.resource_uri,
        "SetAttributes",
        service.selectors(),
        properties.clone(),
        &fixtures::envelope("<a:Empty xmlns:a=\"urn:none\"/>"),
    ));

    let invocation = Invocation::new(service.resource_uri, "SetAttributes")
        .selectors(service.selectors())
        .properties(properties)
        .skip_ready_gate();
    match client.invoke(invocation).await {
        Err(DracError::InvalidResponse { .. }) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

// Check that enumerations wait for readiness like invocations do.
#[test]
async fn enumerate_is_gated() -> Result<(), Error> {
    let wsman = Arc::new(Wsman::default());
    let client = DracClient::new(wsman.clone());

    let query = EnumerationQuery::new();
    wsman.expect(fixtures::expect_probe(true));
    wsman.expect(Expect::enumerate(
        uris::DCIM_SYSTEM_VIEW,
        query.clone(),
        &fixtures::enumeration_response(&[fixtures::instance(
            uris::DCIM_SYSTEM_VIEW,
            "DCIM_SystemView",
            &[("Model", Some("PowerEdge R640"))],
        )]),
    ));

    let response = client
        .enumerate(uris::DCIM_SYSTEM_VIEW, &query)
        .await
        .map_err(Error::Drac)?;
    assert_eq!(
        response.find(uris::DCIM_SYSTEM_VIEW, "Model"),
        Some("PowerEdge R640")
    );
    assert!(wsman.is_exhausted());
    Ok(())
}
