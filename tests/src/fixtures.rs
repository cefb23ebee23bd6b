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

//! Canned WS-Management responses for the mock transport.

use nv_drac::constants;
use nv_drac::uris;
use nv_drac_core::soap;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;

use crate::Expect;

/// Wrap a body payload into a SOAP envelope.
#[must_use]
pub fn envelope(body: &str) -> String {
    format!(
        r#"<s:Envelope xmlns:s="{env}"><s:Header/><s:Body>{body}</s:Body></s:Envelope>"#,
        env = soap::SOAP_ENV,
    )
}

/// Method response envelope carrying the given output fields.
#[must_use]
pub fn method_response(resource_uri: &str, method: &str, fields: &[(&str, &str)]) -> String {
    let mut output = format!(r#"<n1:{method}_OUTPUT xmlns:n1="{resource_uri}">"#);
    for (name, value) in fields {
        output.push_str(&format!("<n1:{name}>{value}</n1:{name}>"));
    }
    output.push_str(&format!("</n1:{method}_OUTPUT>"));
    envelope(&output)
}

/// One CIM instance serialized in the namespace of its class. A `None`
/// value marks the property `xsi:nil`.
#[must_use]
pub fn instance(resource_uri: &str, class: &str, fields: &[(&str, Option<&str>)]) -> String {
    let mut xml = format!(
        r#"<n1:{class} xmlns:n1="{resource_uri}" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    );
    for (name, value) in fields {
        match value {
            Some(value) => xml.push_str(&format!("<n1:{name}>{value}</n1:{name}>")),
            None => xml.push_str(&format!(r#"<n1:{name} xsi:nil="true"/>"#)),
        }
    }
    xml.push_str(&format!("</n1:{class}>"));
    xml
}

/// Optimized enumeration response carrying the given instances.
#[must_use]
pub fn enumeration_response(instances: &[String]) -> String {
    let mut body = format!(
        r#"<wsen:EnumerateResponse xmlns:wsen="{wsen}" xmlns:w="{wsman}"><w:Items>"#,
        wsen = soap::WS_ENUM,
        wsman = soap::WSMAN,
    );
    for instance in instances {
        body.push_str(instance);
    }
    body.push_str("</w:Items><wsen:EndOfSequence/></wsen:EnumerateResponse>");
    envelope(&body)
}

/// Response of `CreateTargetedConfigJob` that queued `job_id`.
#[must_use]
pub fn config_job_created_response(resource_uri: &str, job_id: &str) -> String {
    envelope(&format!(
        r#"<n1:CreateTargetedConfigJob_OUTPUT xmlns:n1="{uri}" xmlns:wsa="{wsa}" xmlns:w="{wsman}">
             <n1:Job>
               <wsa:EndpointReference>
                 <wsa:Address>{anonymous}</wsa:Address>
                 <wsa:ReferenceParameters>
                   <w:ResourceURI>{job_uri}</w:ResourceURI>
                   <w:SelectorSet>
                     <w:Selector Name="InstanceID">{job_id}</w:Selector>
                     <w:Selector Name="__cimnamespace">root/dcim</w:Selector>
                   </w:SelectorSet>
                 </wsa:ReferenceParameters>
               </wsa:EndpointReference>
             </n1:Job>
             <n1:ReturnValue>{created}</n1:ReturnValue>
           </n1:CreateTargetedConfigJob_OUTPUT>"#,
        uri = resource_uri,
        wsa = soap::WS_ADDR,
        wsman = soap::WSMAN,
        anonymous = soap::WS_ADDR_ANONYMOUS,
        job_uri = uris::DCIM_LIFECYCLE_JOB,
        created = constants::RET_CREATED,
    ))
}

/// Selectors of the Lifecycle Controller service instance.
#[must_use]
pub fn lc_selectors() -> SelectorSet {
    SelectorSet::from([
        ("SystemCreationClassName", "DCIM_ComputerSystem"),
        ("SystemName", "DCIM:ComputerSystem"),
        ("CreationClassName", "DCIM_LCService"),
        ("Name", "DCIM:LCService"),
    ])
}

/// Status response of the Lifecycle Controller.
#[must_use]
pub fn ready_response(ready: bool) -> String {
    let message_id = if ready {
        constants::IDRAC_IS_READY
    } else {
        "LC060"
    };
    method_response(
        uris::DCIM_LC_SERVICE,
        "GetRemoteServicesAPIStatus",
        &[
            ("ReturnValue", constants::RET_SUCCESS),
            ("MessageID", message_id),
        ],
    )
}

/// Expectation of one readiness probe answered with `ready`.
#[must_use]
pub fn expect_probe(ready: bool) -> Expect {
    Expect::invoke(
        uris::DCIM_LC_SERVICE,
        "GetRemoteServicesAPIStatus",
        lc_selectors(),
        PropertySet::new(),
        &ready_response(ready),
    )
}
