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

//! Lifecycle Controller job queue and pending configuration operations.
//!
//! Configuration changes made through an iDRAC service (BIOS settings,
//! RAID layout, iDRAC attributes) land in a pending state first. A
//! targeted configuration job applies them; deleting the pending
//! configuration abandons them. Applied jobs are tracked in the job
//! queue as `DCIM_LifecycleJob` instances.

use std::fmt;

use nv_drac_core::soap;
use nv_drac_core::EnumerationQuery;
use nv_drac_core::Instance;
use nv_drac_core::PropertySet;
use nv_drac_core::Wsman;
use serde::Deserialize;
use serde::Serialize;

use crate::client::DracClient;
use crate::client::Error;
use crate::client::Invocation;
use crate::constants;
use crate::service::CimService;
use crate::uris;

/// Job states that make a job show up in an unfinished-only listing.
const UNFINISHED_JOBS_QUERY: &str = "select * from DCIM_LifecycleJob \
     where Name != \"CLEARALL\" \
     and JobStatus != \"Reboot Completed\" \
     and JobStatus != \"Completed\" \
     and JobStatus != \"Completed with Errors\" \
     and JobStatus != \"Failed\"";

/// Identifier of a Lifecycle Controller job, e.g. `JID_442507917525`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One job of the Lifecycle Controller job queue.
///
/// Values are kept as the controller reports them. Timestamps in
/// particular come back in several shapes (`TIME_NOW`, CIM datetime) and
/// are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier.
    pub id: JobId,
    /// Job name, e.g. `ConfigBIOS:BIOS.Setup.1-1`.
    pub name: String,
    /// Scheduled start time.
    pub start_time: String,
    /// Time after which the job will no longer start.
    pub until_time: String,
    /// Last status message, absent until the controller reports one.
    pub message: Option<String>,
    /// Job status, e.g. `Scheduled` or `Completed`.
    pub status: String,
    /// Completion percentage.
    pub percent_complete: String,
}

fn job_from_instance(instance: &Instance<'_>) -> Result<Job, String> {
    let field = |name: &str| -> Result<String, String> {
        instance
            .field(name)
            .map(ToString::to_string)
            .ok_or_else(|| format!("job instance carried no {name}"))
    };
    Ok(Job {
        id: JobId::from(field("InstanceID")?),
        name: field("Name")?,
        start_time: field("JobStartTime")?,
        until_time: field("JobUntilTime")?,
        message: instance.field("Message").map(ToString::to_string),
        status: field("JobStatus")?,
        percent_complete: field("PercentComplete")?,
    })
}

/// Job queue and pending configuration operations.
///
/// Created by [`DracClient::jobs`].
pub struct JobManagement<T: Wsman> {
    client: DracClient<T>,
}

impl<T: Wsman> Clone for JobManagement<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Wsman> JobManagement<T> {
    pub(crate) fn new(client: DracClient<T>) -> Self {
        Self { client }
    }

    /// List the jobs of the Lifecycle Controller job queue.
    ///
    /// With `only_unfinished` the listing is filtered server-side to jobs
    /// that have not reached a terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when a returned instance lacks
    /// a job field, and the errors of [`DracClient::enumerate`].
    pub async fn list_jobs(&self, only_unfinished: bool) -> Result<Vec<Job>, Error<T>> {
        let query = if only_unfinished {
            EnumerationQuery::new().wql(UNFINISHED_JOBS_QUERY)
        } else {
            EnumerationQuery::new()
        };
        let response = self
            .client
            .enumerate(uris::DCIM_LIFECYCLE_JOB, &query)
            .await?;
        response
            .instances(uris::DCIM_LIFECYCLE_JOB, "DCIM_LifecycleJob")
            .iter()
            .map(|instance| {
                job_from_instance(instance).map_err(|reason| Error::InvalidResponse { reason })
            })
            .collect()
    }

    /// Fetch one job by its identifier.
    ///
    /// Resolves to `None` when no job with that identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the returned instance
    /// lacks a job field, and the errors of [`DracClient::enumerate`].
    pub async fn get_job(&self, id: &JobId) -> Result<Option<Job>, Error<T>> {
        let query = EnumerationQuery::new().wql(format!(
            "select * from DCIM_LifecycleJob where InstanceID=\"{id}\""
        ));
        let response = self
            .client
            .enumerate(uris::DCIM_LIFECYCLE_JOB, &query)
            .await?;
        match response
            .instances(uris::DCIM_LIFECYCLE_JOB, "DCIM_LifecycleJob")
            .first()
        {
            Some(instance) => match job_from_instance(instance) {
                Ok(job) => Ok(Some(job)),
                Err(reason) => Err(Error::InvalidResponse { reason }),
            },
            None => Ok(None),
        }
    }

    /// Create a targeted configuration job that applies the pending
    /// changes of a service.
    ///
    /// The job is scheduled to start immediately. With `reboot` it
    /// reboots the server to apply changes that need one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] when the response carries no
    /// job identifier, and the errors of [`DracClient::invoke`].
    pub async fn create_config_job(
        &self,
        service: &CimService,
        reboot: bool,
    ) -> Result<JobId, Error<T>> {
        let mut properties = PropertySet::new().with("Target", service.target.as_str());
        if reboot {
            properties.insert("RebootJobType", "3");
        }
        properties.insert("ScheduledStartTime", constants::TIME_NOW);

        let invocation = Invocation::new(service.resource_uri, "CreateTargetedConfigJob")
            .selectors(service.selectors())
            .properties(properties)
            .expect_return_value(constants::RET_CREATED);
        let response = self.client.invoke(invocation).await?;

        match response.find_with_attr(soap::WSMAN, "Selector", "Name", "InstanceID") {
            Some(id) => Ok(JobId::from(id)),
            None => Err(Error::InvalidResponse {
                reason: "CreateTargetedConfigJob response carried no job id".to_string(),
            }),
        }
    }

    /// Abandon the pending configuration changes of a service.
    ///
    /// # Errors
    ///
    /// Same errors as [`DracClient::invoke`].
    pub async fn delete_pending_config(&self, service: &CimService) -> Result<(), Error<T>> {
        let invocation = Invocation::new(service.resource_uri, "DeletePendingConfiguration")
            .selectors(service.selectors())
            .properties(PropertySet::new().with("Target", service.target.as_str()))
            .expect_return_value(constants::RET_SUCCESS);
        self.client.invoke(invocation).await?;
        Ok(())
    }

    /// Apply pending BIOS setting changes with a configuration job.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::create_config_job`].
    pub async fn commit_pending_bios_changes(&self, reboot: bool) -> Result<JobId, Error<T>> {
        self.create_config_job(&CimService::bios(), reboot).await
    }

    /// Apply pending iDRAC attribute changes with a configuration job.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::create_config_job`].
    pub async fn commit_pending_idrac_changes(&self, reboot: bool) -> Result<JobId, Error<T>> {
        self.create_config_job(&CimService::idrac_card(), reboot)
            .await
    }

    /// Apply pending RAID changes of a controller with a configuration
    /// job.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::create_config_job`].
    pub async fn commit_pending_raid_changes<S: Into<String>>(
        &self,
        controller: S,
        reboot: bool,
    ) -> Result<JobId, Error<T>> {
        self.create_config_job(&CimService::raid(controller), reboot)
            .await
    }

    /// Abandon pending BIOS setting changes.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::delete_pending_config`].
    pub async fn abandon_pending_bios_changes(&self) -> Result<(), Error<T>> {
        self.delete_pending_config(&CimService::bios()).await
    }

    /// Abandon pending iDRAC attribute changes.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::delete_pending_config`].
    pub async fn abandon_pending_idrac_changes(&self) -> Result<(), Error<T>> {
        self.delete_pending_config(&CimService::idrac_card()).await
    }

    /// Abandon the pending RAID changes of a controller.
    ///
    /// # Errors
    ///
    /// Same errors as [`JobManagement::delete_pending_config`].
    pub async fn abandon_pending_raid_changes<S: Into<String>>(
        &self,
        controller: S,
    ) -> Result<(), Error<T>> {
        self.delete_pending_config(&CimService::raid(controller))
            .await
    }
}
