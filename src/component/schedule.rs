// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule service: cron-like jobs that issue RPC calls on the device.
//!
//! Every mutation bumps a revision counter returned as `rev`.
//!
//! ```
//! use shelly_rpc::component::{Schedule, ScheduleCall, ScheduleCreate, SwitchSet};
//!
//! let job = Schedule {
//!     enable: Some(true),
//!     timespec: Some("0 0 8 * * MON-FRI".to_string()),
//!     calls: vec![ScheduleCall::from_request(&SwitchSet::new(0, true))?],
//!     ..Schedule::default()
//! };
//! let create = ScheduleCreate(job);
//! # let _ = create;
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::request::{RpcRequest, rpc_request};

/// A scheduled job.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Job id; `None` on create, required on update.
    pub id: Option<u32>,
    /// Whether the job runs. Defaults to true on the device.
    pub enable: Option<bool>,
    /// Cron expression with a leading seconds field. Leading zeros are not
    /// accepted (`8`, not `08`).
    pub timespec: Option<String>,
    /// Calls to issue, at most five per job.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<ScheduleCall>,
}

/// One RPC call issued by a job.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCall {
    /// Method name.
    pub method: String,
    /// Method parameters.
    pub params: Option<Value>,
}

impl ScheduleCall {
    /// Builds a call from a typed request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not serialize.
    pub fn from_request<R: RpcRequest>(request: &R) -> Result<Self, serde_json::Error> {
        let params = serde_json::to_value(request)?;
        Ok(Self {
            method: R::METHOD.to_string(),
            params: Some(params),
        })
    }
}

/// `Schedule.Create`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScheduleCreate(pub Schedule);

/// Result of `Schedule.Create`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCreated {
    /// Id of the new job.
    pub id: u32,
    /// Revision after the call.
    pub rev: u32,
}

/// `Schedule.Update`: `id` must be set on the job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScheduleUpdate(pub Schedule);

/// Revision after `Schedule.Update`, `Schedule.Delete` or
/// `Schedule.DeleteAll`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRevision {
    /// Revision after the call.
    pub rev: u32,
}

/// `Schedule.Delete`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleDelete {
    /// Job id.
    pub id: u32,
}

/// `Schedule.DeleteAll`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleDeleteAll {}

/// `Schedule.List`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleList {}

/// Result of `Schedule.List`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    /// All jobs.
    #[serde(default)]
    pub jobs: Vec<Schedule>,
    /// Current revision.
    pub rev: u32,
}

rpc_request! {
    ScheduleCreate => "Schedule.Create", ScheduleCreated;
    ScheduleUpdate => "Schedule.Update", ScheduleRevision;
    ScheduleDelete => "Schedule.Delete", ScheduleRevision;
    ScheduleDeleteAll => "Schedule.DeleteAll", ScheduleRevision;
    ScheduleList => "Schedule.List", ScheduleListResponse;
}
