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

pub mod expect;

#[doc(inline)]
pub use expect::Expect;
pub use expect::ExpectedRequest;

use nv_drac_core::EnumerationQuery;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;
use nv_drac_core::SoapResponse;
use nv_drac_core::Wsman as NvDracWsman;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    MutexLock(String),
    NothingIsExpected,
    UnexpectedInvoke(String, String, ExpectedRequest),
    UnexpectedEnumerate(String, ExpectedRequest),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {err}"),
            Self::MutexLock(err) => write!(f, "lock error: {err}"),
            Self::NothingIsExpected => {
                write!(f, "nothing is expected to happen but something happened")
            }
            Self::UnexpectedInvoke(uri, method, expected) => {
                write!(f, "unexpected invoke: {method} on {uri}; expected: {expected:?}")
            }
            Self::UnexpectedEnumerate(uri, expected) => {
                write!(f, "unexpected enumerate: {uri}; expected: {expected:?}")
            }
        }
    }
}

impl StdError for Error {}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

/// Mock transport that answers from a queue of expectations.
///
/// Unlike a single-response stub, the queue is matched in FIFO order so a
/// test can script a whole exchange, readiness probes included.
#[derive(Default)]
pub struct Wsman<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
}

impl<E> Wsman<E> {
    /// Queue an expectation behind the already queued ones.
    pub fn expect(&self, exp: Expect<E>) {
        let expect: &mut VecDeque<Expect<E>> = &mut self.expect.lock().expect("not poisoned");
        expect.push_back(exp);
    }

    /// Whether every queued expectation was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.expect.lock().expect("not poisoned").is_empty()
    }

    pub fn debug_expect(&self) {
        let expect: &VecDeque<Expect<E>> = &self.expect.lock().expect("not poisoned");
        println!("Expectations (total: {})", expect.len());
        for v in expect {
            println!("{:#?}", v.request);
        }
    }
}

impl<E> NvDracWsman for Wsman<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn invoke(
        &self,
        in_resource_uri: &str,
        in_method: &str,
        in_selectors: &SelectorSet,
        in_properties: &PropertySet,
    ) -> Result<SoapResponse, Error> {
        let expect = self
            .expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or(Error::NothingIsExpected)?;
        match expect {
            Expect {
                request:
                    ExpectedRequest::Invoke {
                        resource_uri,
                        method,
                        selectors,
                        properties,
                    },
                response,
            } if resource_uri == in_resource_uri
                && method == in_method
                && selectors == *in_selectors
                && properties == *in_properties =>
            {
                response.map_err(|err| Error::ErrorResponse(Box::new(err)))
            }
            _ => Err(Error::UnexpectedInvoke(
                in_resource_uri.to_string(),
                in_method.to_string(),
                expect.request,
            )),
        }
    }

    async fn enumerate(
        &self,
        in_resource_uri: &str,
        in_query: &EnumerationQuery,
    ) -> Result<SoapResponse, Error> {
        let expect = self
            .expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or(Error::NothingIsExpected)?;
        match expect {
            Expect {
                request: ExpectedRequest::Enumerate { resource_uri, query },
                response,
            } if resource_uri == in_resource_uri && query == *in_query => {
                response.map_err(|err| Error::ErrorResponse(Box::new(err)))
            }
            _ => Err(Error::UnexpectedEnumerate(
                in_resource_uri.to_string(),
                expect.request,
            )),
        }
    }
}
