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

//! Parsed SOAP response documents.
//!
//! WS-Management responses are SOAP 1.2 envelopes whose payload elements
//! live in resource-URI-scoped namespaces: the output parameters of an
//! invoked method sit in the namespace of the resource URI the method was
//! invoked on, and enumerated instances sit in the namespace of their CIM
//! class. [`SoapResponse`] parses an envelope once into an owned element
//! tree and answers namespace-qualified lookups against it.
//!
//! An enumeration that was drained over several `Pull` round trips is
//! represented as one [`SoapResponse`] holding the envelope of every page;
//! lookups walk the pages in the order they were received.
//!
//! ```rust
//! use nv_drac_core::SoapResponse;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let response = SoapResponse::parse(
//!     r#"<n1:EnableUser_OUTPUT xmlns:n1="urn:example-service">
//!          <n1:ReturnValue>0</n1:ReturnValue>
//!        </n1:EnableUser_OUTPUT>"#,
//! )?;
//! assert_eq!(response.find("urn:example-service", "ReturnValue"), Some("0"));
//! # Ok(())
//! # }
//! ```

use std::error::Error;
use std::fmt;

use quick_xml::escape::unescape;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// Response document failed to parse.
#[derive(Debug)]
pub enum ParseError {
    /// Malformed XML.
    Xml(quick_xml::Error),
    /// Malformed element attribute.
    Attr(AttrError),
    /// Invalid character or entity reference.
    Escape(EscapeError),
    /// Document contained no elements.
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML syntax error: {e}"),
            Self::Attr(e) => write!(f, "XML attribute error: {e}"),
            Self::Escape(e) => write!(f, "XML escape error: {e}"),
            Self::Empty => write!(f, "document contained no elements"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            Self::Attr(e) => Some(e),
            Self::Escape(e) => Some(e),
            Self::Empty => None,
        }
    }
}

/// One element of a parsed response document.
///
/// Text content is the concatenation of every text and CDATA node directly
/// inside the element, with surrounding whitespace trimmed. Namespace
/// declaration attributes are dropped during parsing; the resolved
/// namespace of the element itself is kept in `ns`.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// Resolved namespace, empty when the element is unqualified.
    pub ns: String,
    /// Local element name without prefix.
    pub local: String,
    /// Attributes as (local name, unescaped value) pairs.
    pub attrs: Vec<(String, String)>,
    /// Unescaped text content.
    pub text: String,
    /// Element was explicitly marked `xsi:nil`.
    pub nil: bool,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Value of the attribute with the given local name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text content, or `None` when the element is nil.
    fn content(&self) -> Option<&str> {
        if self.nil {
            None
        } else {
            Some(self.text.as_str())
        }
    }

    fn matches(&self, ns: &str, name: &str) -> bool {
        self.local == name && self.ns == ns
    }

    fn walk<'a>(&'a self, ns: &str, name: &str, out: &mut Vec<&'a XmlElement>) {
        if self.matches(ns, name) {
            out.push(self);
        }
        for child in &self.children {
            child.walk(ns, name, out);
        }
    }
}

/// Parsed SOAP response, possibly spanning several enumeration pages.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    pages: Vec<XmlElement>,
}

impl SoapResponse {
    /// Parse one response document.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the document is not well-formed XML or
    /// contains no elements at all.
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        let mut reader = NsReader::from_str(xml);
        let mut pages = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        loop {
            let (resolve, event) = reader.read_resolved_event().map_err(ParseError::Xml)?;
            match event {
                Event::Start(start) => {
                    stack.push(open(&resolve, &start)?);
                }
                Event::Empty(start) => {
                    close(open(&resolve, &start)?, &mut stack, &mut pages);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        close(element, &mut stack, &mut pages);
                    }
                }
                Event::Text(text) => {
                    if let Some(element) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(&text);
                        let value = unescape(&raw).map_err(ParseError::Escape)?;
                        element.text.push_str(&value);
                    }
                }
                Event::CData(data) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::GeneralRef(reference) => {
                    if let Some(element) = stack.last_mut() {
                        let name = String::from_utf8_lossy(&reference);
                        let entity = format!("&{name};");
                        let value = unescape(&entity).map_err(ParseError::Escape)?;
                        element.text.push_str(&value);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if pages.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Self { pages })
    }

    /// Merge the envelopes of several responses into one, in order.
    #[must_use]
    pub fn from_pages(responses: Vec<SoapResponse>) -> Self {
        let mut pages = Vec::new();
        for response in responses {
            pages.extend(response.pages);
        }
        Self { pages }
    }

    /// Text content of the first matching element, `None` when no element
    /// matches or the first match is nil.
    #[must_use]
    pub fn find(&self, ns: &str, name: &str) -> Option<&str> {
        self.all(ns, name).into_iter().next().and_then(XmlElement::content)
    }

    /// Text content of every non-nil matching element, in document order.
    #[must_use]
    pub fn find_all(&self, ns: &str, name: &str) -> Vec<&str> {
        self.all(ns, name)
            .into_iter()
            .filter_map(XmlElement::content)
            .collect()
    }

    /// Text content of the first matching element that carries the given
    /// attribute value.
    #[must_use]
    pub fn find_with_attr(&self, ns: &str, name: &str, attr: &str, value: &str) -> Option<&str> {
        self.all(ns, name)
            .into_iter()
            .find(|element| element.attr(attr) == Some(value))
            .and_then(XmlElement::content)
    }

    /// Whether any element matches, regardless of content.
    #[must_use]
    pub fn contains(&self, ns: &str, name: &str) -> bool {
        !self.all(ns, name).is_empty()
    }

    /// Enumerated instances of a CIM class, in document order.
    #[must_use]
    pub fn instances(&self, ns: &str, class: &str) -> Vec<Instance<'_>> {
        self.all(ns, class)
            .into_iter()
            .map(|element| Instance { element })
            .collect()
    }

    fn all(&self, ns: &str, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        for page in &self.pages {
            page.walk(ns, name, &mut out);
        }
        out
    }
}

/// One enumerated instance of a CIM class.
///
/// Property elements of an instance live in the namespace of the class
/// itself, so lookups are scoped to that namespace.
#[derive(Debug, Clone, Copy)]
pub struct Instance<'a> {
    element: &'a XmlElement,
}

impl<'a> Instance<'a> {
    /// Value of a property of this instance, `None` when the property is
    /// absent or nil.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'a str> {
        let mut matches = Vec::new();
        for child in &self.element.children {
            child.walk(&self.element.ns, name, &mut matches);
        }
        matches.into_iter().next().and_then(XmlElement::content)
    }
}

fn open(resolve: &ResolveResult<'_>, start: &BytesStart<'_>) -> Result<XmlElement, ParseError> {
    let ns = match resolve {
        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
        _ => String::new(),
    };
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attrs = Vec::new();
    let mut nil = false;
    for attr in start.attributes() {
        let attr = attr.map_err(ParseError::Attr)?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map_err(ParseError::Escape)?.into_owned();
        if name == "nil" && (value == "true" || value == "1") {
            nil = true;
        }
        attrs.push((name, value));
    }

    Ok(XmlElement {
        ns,
        local,
        attrs,
        text: String::new(),
        nil,
        children: Vec::new(),
    })
}

// Document formatting whitespace around the content is not significant;
// trimming happens once against the assembled text so that whitespace
// next to entity references survives.
fn close(mut element: XmlElement, stack: &mut Vec<XmlElement>, pages: &mut Vec<XmlElement>) {
    let trimmed = element.text.trim();
    if trimmed.len() != element.text.len() {
        element.text = trimmed.to_string();
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => pages.push(element),
    }
}
