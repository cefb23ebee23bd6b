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

//! SOAP 1.2 request envelopes for the WS-Management operations.
//!
//! Requests follow DSP0226: a header carrying the endpoint address,
//! resource URI, message id, anonymous reply-to and operation action,
//! and a body specific to the operation. Method input parameters live
//! in the namespace of the resource URI the method belongs to.

use quick_xml::escape::escape;
use uuid::Uuid;

use crate::query::EnumerationQuery;
use crate::selectors::PropertySet;
use crate::selectors::SelectorSet;

/// SOAP 1.2 envelope namespace.
pub const SOAP_ENV: &str = "http://www.w3.org/2003/05/soap-envelope";

/// WS-Addressing namespace.
pub const WS_ADDR: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";

/// WS-Addressing anonymous reply-to role.
pub const WS_ADDR_ANONYMOUS: &str =
    "http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous";

/// WS-Management extension namespace.
pub const WSMAN: &str = "http://schemas.dmtf.org/wbem/wsman/1/wsman.xsd";

/// WS-Enumeration namespace.
pub const WS_ENUM: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration";

/// Action URI of the `Enumerate` operation.
pub const ENUMERATE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Enumerate";

/// Action URI of the `Pull` operation.
pub const PULL_ACTION: &str = "http://schemas.xmlsoap.org/ws/2004/09/enumeration/Pull";

/// Build the envelope of a CIM extrinsic method invocation.
///
/// The action URI is `{resource_uri}/{method}`, selectors address the
/// service instance in the header and properties become the children of
/// the `{method}_INPUT` body element, in insertion order.
#[must_use]
pub fn invoke(
    endpoint: &str,
    resource_uri: &str,
    method: &str,
    selectors: &SelectorSet,
    properties: &PropertySet,
    message_id: Uuid,
) -> String {
    let action = format!("{resource_uri}/{method}");
    let mut body = format!(r#"<p:{method}_INPUT xmlns:p="{resource_uri}">"#);
    for (name, value) in properties.iter() {
        body.push_str(&format!("<p:{name}>{}</p:{name}>", escape(value)));
    }
    body.push_str(&format!("</p:{method}_INPUT>"));
    envelope(endpoint, resource_uri, &action, message_id, Some(selectors), &body)
}

/// Build the envelope of an `Enumerate` request.
#[must_use]
pub fn enumerate(
    endpoint: &str,
    resource_uri: &str,
    query: &EnumerationQuery,
    message_id: Uuid,
) -> String {
    let mut body = format!(r#"<wsen:Enumerate xmlns:wsen="{WS_ENUM}">"#);
    if query.optimization {
        body.push_str("<wsman:OptimizeEnumeration/>");
        body.push_str(&format!(
            "<wsman:MaxElements>{}</wsman:MaxElements>",
            query.max_elems
        ));
    }
    if let Some(filter) = &query.filter {
        body.push_str(&format!(
            r#"<wsman:Filter Dialect="{}">{}</wsman:Filter>"#,
            filter.dialect.uri(),
            escape(&filter.query)
        ));
    }
    body.push_str("</wsen:Enumerate>");
    envelope(endpoint, resource_uri, ENUMERATE_ACTION, message_id, None, &body)
}

/// Build the envelope of a `Pull` request against an open enumeration
/// context.
#[must_use]
pub fn pull(
    endpoint: &str,
    resource_uri: &str,
    context: &str,
    max_elems: u32,
    message_id: Uuid,
) -> String {
    let body = format!(
        r#"<wsen:Pull xmlns:wsen="{WS_ENUM}"><wsen:EnumerationContext>{}</wsen:EnumerationContext><wsen:MaxElements>{max_elems}</wsen:MaxElements></wsen:Pull>"#,
        escape(context)
    );
    envelope(endpoint, resource_uri, PULL_ACTION, message_id, None, &body)
}

fn envelope(
    endpoint: &str,
    resource_uri: &str,
    action: &str,
    message_id: Uuid,
    selectors: Option<&SelectorSet>,
    body: &str,
) -> String {
    let mut xml = String::with_capacity(1024 + body.len());
    xml.push_str(&format!(
        r#"<s:Envelope xmlns:s="{SOAP_ENV}" xmlns:wsa="{WS_ADDR}" xmlns:wsman="{WSMAN}">"#
    ));
    xml.push_str("<s:Header>");
    xml.push_str(&format!("<wsa:To>{}</wsa:To>", escape(endpoint)));
    xml.push_str(&format!(
        "<wsman:ResourceURI>{}</wsman:ResourceURI>",
        escape(resource_uri)
    ));
    xml.push_str(&format!("<wsa:MessageID>uuid:{message_id}</wsa:MessageID>"));
    xml.push_str(&format!(
        "<wsa:ReplyTo><wsa:Address>{WS_ADDR_ANONYMOUS}</wsa:Address></wsa:ReplyTo>"
    ));
    xml.push_str(&format!("<wsa:Action>{}</wsa:Action>", escape(action)));
    if let Some(selectors) = selectors {
        if !selectors.is_empty() {
            xml.push_str("<wsman:SelectorSet>");
            for (name, value) in selectors.iter() {
                xml.push_str(&format!(
                    r#"<wsman:Selector Name="{}">{}</wsman:Selector>"#,
                    escape(name),
                    escape(value)
                ));
            }
            xml.push_str("</wsman:SelectorSet>");
        }
    }
    xml.push_str("</s:Header>");
    xml.push_str("<s:Body>");
    xml.push_str(body);
    xml.push_str("</s:Body>");
    xml.push_str("</s:Envelope>");
    xml
}
