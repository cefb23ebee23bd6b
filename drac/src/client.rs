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

//! Typed client for the iDRAC WS-Management API.
//!
//! [`DracClient`] wraps a [`Wsman`] transport and layers the behavior
//! every iDRAC operation needs on top of it:
//!
//! - Readiness gating: the Lifecycle Controller rejects commands while it
//!   is busy, so operations first poll its status until the controller
//!   reports ready.
//! - Outcome validation: method responses carry a `ReturnValue`; an error
//!   code turns into [`Error::OperationFailed`] with every message the
//!   controller attached, and a value other than the expected one into
//!   [`Error::UnexpectedReturnValue`].
//!
//! Subsystem operations hang off the handles returned by
//! [`DracClient::jobs`], [`DracClient::power`], [`DracClient::raid`] and
//! [`DracClient::lifecycle_controller`].

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nv_drac_core::EnumerationQuery;
use nv_drac_core::PropertySet;
use nv_drac_core::SelectorSet;
use nv_drac_core::SoapResponse;
use nv_drac_core::Wsman;
use tracing::debug;
use tracing::error;

use crate::constants;
use crate::jobs::JobManagement;
use crate::lifecycle_controller::LifecycleControllerManagement;
use crate::power::PowerManagement;
use crate::raid::RaidManagement;
use crate::uris;

/// Error of a client operation.
pub enum Error<T: Wsman> {
    /// The transport failed to complete the exchange.
    Wsman(T::Error),
    /// The response did not carry what the operation needed.
    InvalidResponse {
        /// What was missing or malformed.
        reason: String,
    },
    /// The controller reported that the operation failed.
    OperationFailed {
        /// Every message element of the response, in document order.
        messages: Vec<String>,
    },
    /// The method completed with a return value other than the expected
    /// one.
    UnexpectedReturnValue {
        /// Return value the operation expected.
        expected: String,
        /// Return value the controller reported.
        actual: String,
    },
}

impl<T: Wsman> fmt::Debug for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wsman(e) => f.debug_tuple("Wsman").field(e).finish(),
            Self::InvalidResponse { reason } => f
                .debug_struct("InvalidResponse")
                .field("reason", reason)
                .finish(),
            Self::OperationFailed { messages } => f
                .debug_struct("OperationFailed")
                .field("messages", messages)
                .finish(),
            Self::UnexpectedReturnValue { expected, actual } => f
                .debug_struct("UnexpectedReturnValue")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
        }
    }
}

impl<T: Wsman> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wsman(e) => write!(f, "WS-Management request failed: {e}"),
            Self::InvalidResponse { reason } => {
                write!(f, "Invalid response received. Reason: {reason}")
            }
            Self::OperationFailed { messages } => {
                write!(f, "DRAC operation failed. Messages: {}", messages.join(", "))
            }
            Self::UnexpectedReturnValue { expected, actual } => write!(
                f,
                "Unexpected return value received. Expected: {expected}, Actual: {actual}"
            ),
        }
    }
}

impl<T: Wsman> StdError for Error<T> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Wsman(e) => Some(e),
            _ => None,
        }
    }
}

/// One CIM extrinsic method invocation.
///
/// By default an invocation waits for the iDRAC to become ready and
/// validates the `ReturnValue` of the method output; both behaviors can
/// be switched off per call.
///
/// # Examples
///
/// ```rust
/// use nv_drac::Invocation;
/// use nv_drac::constants;
/// use nv_drac::service::CimService;
/// use nv_drac_core::PropertySet;
///
/// let service = CimService::bios();
/// let invocation = Invocation::new(service.resource_uri, "CreateTargetedConfigJob")
///     .selectors(service.selectors())
///     .properties(PropertySet::new().with("Target", service.target.clone()))
///     .expect_return_value(constants::RET_CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct Invocation {
    resource_uri: String,
    method: String,
    selectors: SelectorSet,
    properties: PropertySet,
    expected_return_value: Option<String>,
    ready_gate: bool,
    validate_return_value: bool,
}

impl Invocation {
    /// Invocation of a method of the class behind the resource URI.
    #[must_use]
    pub fn new<R: Into<String>, M: Into<String>>(resource_uri: R, method: M) -> Self {
        Self {
            resource_uri: resource_uri.into(),
            method: method.into(),
            selectors: SelectorSet::new(),
            properties: PropertySet::new(),
            expected_return_value: None,
            ready_gate: true,
            validate_return_value: true,
        }
    }

    /// Selectors addressing the instance to invoke the method on.
    #[must_use]
    pub fn selectors(mut self, selectors: SelectorSet) -> Self {
        self.selectors = selectors;
        self
    }

    /// Input parameters of the method.
    #[must_use]
    pub fn properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Fail with [`Error::UnexpectedReturnValue`] when the method
    /// completes with a different return value.
    #[must_use]
    pub fn expect_return_value<S: Into<String>>(mut self, value: S) -> Self {
        self.expected_return_value = Some(value.into());
        self
    }

    /// Do not wait for the iDRAC to become ready first.
    #[must_use]
    pub const fn skip_ready_gate(mut self) -> Self {
        self.ready_gate = false;
        self
    }

    /// Resolve to the raw response without inspecting the return value.
    #[must_use]
    pub const fn skip_return_value_check(mut self) -> Self {
        self.validate_return_value = false;
        self
    }
}

/// Client for the WS-Management API of a Dell iDRAC.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use nv_drac::DracClient;
/// use nv_drac_core::http::{ReqwestClient, WsmanEndpoint};
/// use nv_drac_core::BmcCredentials;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = BmcCredentials::new("root".to_string(), "calvin".to_string());
/// let transport = ReqwestClient::new(&WsmanEndpoint::new("192.0.2.1"), credentials)?;
/// let client = DracClient::new(Arc::new(transport));
///
/// for job in client.jobs().list_jobs(true).await? {
///     println!("{}: {}", job.id, job.status);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DracClient<T: Wsman> {
    wsman: Arc<T>,
    ready_retries: u32,
    ready_retry_delay: Duration,
}

impl<T: Wsman> Clone for DracClient<T> {
    fn clone(&self) -> Self {
        Self {
            wsman: self.wsman.clone(),
            ready_retries: self.ready_retries,
            ready_retry_delay: self.ready_retry_delay,
        }
    }
}

impl<T: Wsman> DracClient<T> {
    /// Create a client on top of a transport.
    pub fn new(wsman: Arc<T>) -> Self {
        Self {
            wsman,
            ready_retries: constants::DEFAULT_READY_RETRIES,
            ready_retry_delay: constants::DEFAULT_READY_RETRY_DELAY,
        }
    }

    /// Number of readiness probes gated operations make before giving up.
    #[must_use]
    pub const fn ready_retries(mut self, retries: u32) -> Self {
        self.ready_retries = retries;
        self
    }

    /// Delay between readiness probes.
    #[must_use]
    pub const fn ready_retry_delay(mut self, delay: Duration) -> Self {
        self.ready_retry_delay = delay;
        self
    }

    /// Raw access to the underlying transport.
    pub fn as_ref(&self) -> &T {
        self.wsman.as_ref()
    }

    /// Job and pending configuration operations.
    #[must_use]
    pub fn jobs(&self) -> JobManagement<T> {
        JobManagement::new(self.clone())
    }

    /// Power state operations.
    #[must_use]
    pub fn power(&self) -> PowerManagement<T> {
        PowerManagement::new(self.clone())
    }

    /// RAID configuration operations.
    #[must_use]
    pub fn raid(&self) -> RaidManagement<T> {
        RaidManagement::new(self.clone())
    }

    /// Lifecycle Controller inventory operations.
    #[must_use]
    pub fn lifecycle_controller(&self) -> LifecycleControllerManagement<T> {
        LifecycleControllerManagement::new(self.clone())
    }

    /// Invoke a CIM extrinsic method.
    ///
    /// # Errors
    ///
    /// - [`Error::Wsman`] when the transport fails.
    /// - [`Error::InvalidResponse`] when the response carries no return
    ///   value to validate.
    /// - [`Error::OperationFailed`] when the controller reports an error.
    /// - [`Error::UnexpectedReturnValue`] when an expected return value
    ///   was configured and the method returned a different one.
    pub async fn invoke(&self, invocation: Invocation) -> Result<SoapResponse, Error<T>> {
        if invocation.ready_gate {
            self.wait_until_ready().await?;
        }
        self.execute(&invocation).await
    }

    /// Enumerate instances of a CIM class, waiting for the iDRAC to
    /// become ready first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wsman`] when the transport fails and the
    /// readiness errors of [`DracClient::wait_until_ready`].
    pub async fn enumerate(
        &self,
        resource_uri: &str,
        query: &EnumerationQuery,
    ) -> Result<SoapResponse, Error<T>> {
        self.wait_until_ready().await?;
        self.wsman
            .enumerate(resource_uri, query)
            .await
            .map_err(Error::Wsman)
    }

    /// Probe whether the iDRAC is ready to accept commands.
    ///
    /// The probe itself is never gated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the status response
    /// carries no message id, and the validation errors of
    /// [`DracClient::invoke`].
    pub async fn is_ready(&self) -> Result<bool, Error<T>> {
        let selectors = SelectorSet::from([
            ("SystemCreationClassName", "DCIM_ComputerSystem"),
            ("SystemName", "DCIM:ComputerSystem"),
            ("CreationClassName", "DCIM_LCService"),
            ("Name", "DCIM:LCService"),
        ]);
        let invocation = Invocation::new(uris::DCIM_LC_SERVICE, "GetRemoteServicesAPIStatus")
            .selectors(selectors)
            .expect_return_value(constants::RET_SUCCESS);
        let response = self.execute(&invocation).await?;
        match response.find(uris::DCIM_LC_SERVICE, "MessageID") {
            Some(message_id) => Ok(message_id == constants::IDRAC_IS_READY),
            None => Err(Error::InvalidResponse {
                reason: "GetRemoteServicesAPIStatus response carried no message id".to_string(),
            }),
        }
    }

    /// Wait until the iDRAC reports it is ready, with the configured
    /// probe count and delay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] when the iDRAC does not become
    /// ready in time, and the errors of [`DracClient::is_ready`].
    pub async fn wait_until_ready(&self) -> Result<(), Error<T>> {
        self.wait_until_ready_with(self.ready_retries, self.ready_retry_delay)
            .await
    }

    /// Wait until the iDRAC reports it is ready.
    ///
    /// Probes at most `retries` times with `delay` between probes; there
    /// is no delay after the last probe. With `retries` of zero the wait
    /// fails immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] when the iDRAC does not become
    /// ready in time, and the errors of [`DracClient::is_ready`].
    pub async fn wait_until_ready_with(
        &self,
        retries: u32,
        delay: Duration,
    ) -> Result<(), Error<T>> {
        let mut remaining = retries;
        while remaining > 0 {
            debug!("Checking to see if the iDRAC is ready");
            if self.is_ready().await? {
                debug!("The iDRAC is ready");
                return Ok(());
            }
            debug!("The iDRAC is not ready");
            remaining -= 1;
            if remaining > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        let message = "Timed out waiting for the iDRAC to become ready".to_string();
        error!("{message}");
        Err(Error::OperationFailed {
            messages: vec![message],
        })
    }

    /// Transport exchange and return value validation, without the
    /// readiness gate.
    async fn execute(&self, invocation: &Invocation) -> Result<SoapResponse, Error<T>> {
        debug!(
            "invoking {} on {}",
            invocation.method, invocation.resource_uri
        );
        let response = self
            .wsman
            .invoke(
                &invocation.resource_uri,
                &invocation.method,
                &invocation.selectors,
                &invocation.properties,
            )
            .await
            .map_err(Error::Wsman)?;

        if !invocation.validate_return_value {
            return Ok(response);
        }

        let return_value = match response.find(&invocation.resource_uri, "ReturnValue") {
            Some(value) => value,
            None => {
                return Err(Error::InvalidResponse {
                    reason: format!("{} response carried no return value", invocation.method),
                })
            }
        };

        if return_value == constants::RET_ERROR {
            let messages = response
                .find_all(&invocation.resource_uri, "Message")
                .into_iter()
                .map(ToString::to_string)
                .collect();
            return Err(Error::OperationFailed { messages });
        }

        if let Some(expected) = &invocation.expected_return_value {
            if return_value != expected.as_str() {
                return Err(Error::UnexpectedReturnValue {
                    expected: expected.clone(),
                    actual: return_value.to_string(),
                });
            }
        }

        Ok(response)
    }
}
