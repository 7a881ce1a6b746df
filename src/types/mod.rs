// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Small value types shared across the API.
//!
//! - [`ComponentKey`] - `<type>` / `<type>:<id>` component addresses
//! - [`RpcErrorCode`] - classified RPC error codes

mod component_key;
mod error_code;

pub use component_key::ComponentKey;
pub use error_code::RpcErrorCode;
