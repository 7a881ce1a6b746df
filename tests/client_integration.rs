// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client behaviour against a scripted in-memory transport.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use shelly_rpc::component::{
    CoverGoToPosition, InputCheckExpression, Schedule, ScheduleCall, ScheduleCreate,
    ScriptPutCode, SwitchConfig, SwitchSet, SwitchStatus,
};
use shelly_rpc::protocol::{RequestFrame, ResponseFrame, Transport};
use shelly_rpc::shelly::PutUserCa;
use shelly_rpc::{
    Client, DeviceStatus, Error, ErrorKind, GetComponents, ProtocolError, RpcErrorCode,
};

// ============================================================================
// Scripted transport
// ============================================================================

/// Replies with queued results or errors, in order, and records every frame.
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, (i32, String)>>>,
    requests: Mutex<Vec<RequestFrame>>,
}

impl ScriptedTransport {
    fn new() -> Arc<Self> {
        Arc::default()
    }

    fn reply(&self, result: Value) -> &Self {
        self.replies.lock().push_back(Ok(result));
        self
    }

    fn reply_error(&self, code: i32, message: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Err((code, message.to_string())));
        self
    }

    fn requests(&self) -> Vec<RequestFrame> {
        self.requests.lock().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError> {
        self.requests.lock().push(request.clone());
        let next = self.replies.lock().pop_front();
        match next {
            Some(Ok(result)) => {
                Ok(ResponseFrame::success(request.id.clone(), &result.to_string()).unwrap())
            }
            Some(Err((code, message))) => {
                Ok(ResponseFrame::failure(request.id.clone(), code, message))
            }
            None => Err(ProtocolError::ChannelClosed("script exhausted".to_string())),
        }
    }
}

fn page(keys: &[&str], offset: u32, total: u32, cfg_rev: u64) -> Value {
    let components: Vec<Value> = keys.iter().map(|key| json!({"key": key})).collect();
    json!({"components": components, "cfg_rev": cfg_rev, "offset": offset, "total": total})
}

// ============================================================================
// Enumerator
// ============================================================================

mod enumerator {
    use super::*;

    #[tokio::test]
    async fn five_components_in_pages_of_two() {
        let transport = ScriptedTransport::new();
        transport
            .reply(page(&["sys", "wifi"], 0, 5, 10))
            .reply(page(&["switch:0", "switch:1"], 2, 5, 10))
            .reply(page(&["input:0"], 4, 5, 10));
        let client = Client::new(Arc::clone(&transport));

        let inventory = client
            .get_all_components(&GetComponents::new().with_status())
            .await
            .unwrap();

        assert_eq!(inventory.components.len(), 5);
        assert_eq!(inventory.total, 5);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        for (request, offset) in requests.iter().zip([0, 2, 4]) {
            assert_eq!(request.method, "Shelly.GetComponents");
            assert_eq!(request.params["offset"], offset);
            assert_eq!(request.params["include"], json!(["status"]));
        }
    }

    #[tokio::test]
    async fn cfg_rev_from_last_page() {
        let transport = ScriptedTransport::new();
        transport
            .reply(page(&["switch:0"], 0, 2, 41))
            .reply(page(&["switch:1"], 1, 2, 42));
        let client = Client::new(Arc::clone(&transport));

        let inventory = client
            .get_all_components(&GetComponents::new())
            .await
            .unwrap();

        assert!(inventory.get("switch:0").is_some());
        assert!(inventory.get("switch:1").is_some());
        assert_eq!(inventory.cfg_rev, Some(42));
    }

    #[tokio::test]
    async fn single_page_device() {
        let transport = ScriptedTransport::new();
        transport.reply(page(&["sys"], 0, 1, 1));
        let client = Client::new(Arc::clone(&transport));

        let inventory = client
            .get_all_components(&GetComponents::new())
            .await
            .unwrap();
        assert_eq!(inventory.components.len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn page_failure_discards_inventory() {
        let transport = ScriptedTransport::new();
        transport
            .reply(page(&["sys", "wifi"], 0, 3, 5))
            .reply(json!({"components": "oops", "total": 3}));
        let client = Client::new(Arc::clone(&transport));

        let err = client
            .get_all_components(&GetComponents::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(transport.requests().len(), 2);
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

mod dispatcher {
    use super::*;

    #[tokio::test]
    async fn unknown_component_versus_bad_payload() {
        let transport = ScriptedTransport::new();
        transport
            .reply_error(-105, "Argument 'id', value 7 not found!")
            .reply(json!({"was_on": 1}));
        let client = Client::new(Arc::clone(&transport));

        let rpc = client.call(&SwitchSet::new(7, true)).await.unwrap_err();
        assert_eq!(rpc.kind(), ErrorKind::Rpc);
        assert_eq!(rpc.rpc_code(), Some(RpcErrorCode::UnknownComponentId));
        assert_eq!(rpc.rpc_code().map(i32::from), Some(-105));

        let parse = client.call(&SwitchSet::new(0, true)).await.unwrap_err();
        assert_eq!(parse.kind(), ErrorKind::Malformed);
        assert!(parse.rpc_code().is_none());
        assert!(matches!(parse, Error::Parse { .. }));
    }

    #[tokio::test]
    async fn unknown_error_code_kept_verbatim() {
        let transport = ScriptedTransport::new();
        transport.reply_error(-1234, "strange");
        let client = Client::new(Arc::clone(&transport));

        let err = client.call(&CoverGoToPosition::absolute(0, 50.0)).await.unwrap_err();
        assert_eq!(err.rpc_code(), Some(RpcErrorCode::Other(-1234)));
    }

    #[tokio::test]
    async fn every_request_gets_a_fresh_id() {
        let transport = ScriptedTransport::new();
        transport
            .reply(json!({"was_on": false}))
            .reply(json!({"was_on": true}));
        let client = Client::new(Arc::clone(&transport));

        client.call(&SwitchSet::new(0, true)).await.unwrap();
        client.call(&SwitchSet::new(0, false)).await.unwrap();

        let requests = transport.requests();
        assert_ne!(requests[0].id, requests[1].id);
    }

    #[tokio::test]
    async fn positional_expression_results() {
        let transport = ScriptedTransport::new();
        transport.reply(json!({"results": [[1.0, 10.0], [2.0, null, "boom"]]}));
        let client = Client::new(Arc::clone(&transport));

        let response = client
            .call(&InputCheckExpression {
                expr: "x*10".to_string(),
                inputs: vec![Some(1.0), Some(2.0)],
            })
            .await
            .unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].output, Some(10.0));
        assert!(response.results[1].error.is_some());
    }

    #[tokio::test]
    async fn schedule_call_embeds_typed_request() {
        let transport = ScriptedTransport::new();
        transport.reply(json!({"id": 3, "rev": 9}));
        let client = Client::new(Arc::clone(&transport));

        let job = Schedule {
            timespec: Some("0 30 7 * * *".to_string()),
            calls: vec![ScheduleCall::from_request(&SwitchSet::new(0, true)).unwrap()],
            ..Schedule::default()
        };
        let created = client.call(&ScheduleCreate(job)).await.unwrap();
        assert_eq!(created.id, 3);

        let params = &transport.requests()[0].params;
        assert_eq!(params["calls"][0]["method"], "Switch.Set");
        assert_eq!(params["calls"][0]["params"], json!({"id": 0, "on": true}));
    }
}

// ============================================================================
// Aggregates
// ============================================================================

mod aggregates {
    use super::*;

    #[tokio::test]
    async fn get_status_groups_components() {
        let transport = ScriptedTransport::new();
        transport.reply(json!({
            "switch:0": {"id": 0, "output": true},
            "switch:1": {"id": 1, "output": false},
            "sys": {"mac": "AA"}
        }));
        let client = Client::new(Arc::clone(&transport));

        let status: DeviceStatus = client.get_status().await.unwrap();
        assert_eq!(status.switches.len(), 2);
        assert_eq!(status.switches[0].output, Some(true));
        assert_eq!(status.switches[1].output, Some(false));
        assert_eq!(status.system.unwrap().mac, "AA");
        assert!(status.wifi.is_none());
    }

    #[tokio::test]
    async fn get_config_gap_truncates() {
        let transport = ScriptedTransport::new();
        transport.reply(json!({
            "switch:0": {"id": 0, "name": "one"},
            "switch:2": {"id": 2, "name": "three"}
        }));
        let client = Client::new(Arc::clone(&transport));

        let config = client.get_config().await.unwrap();
        assert_eq!(
            config.switches,
            vec![SwitchConfig {
                id: 0,
                name: Some(Some("one".to_string())),
                ..SwitchConfig::default()
            }]
        );
    }

    #[tokio::test]
    async fn component_entries_decode_by_type() {
        let transport = ScriptedTransport::new();
        transport.reply(json!({
            "components": [
                {"key": "switch:0", "status": {"id": 0, "output": true}},
                {"key": "boolean:200", "status": {"value": false}}
            ],
            "cfg_rev": 2, "offset": 0, "total": 2
        }));
        let client = Client::new(Arc::clone(&transport));

        let inventory = client
            .get_all_components(&GetComponents::new().with_status())
            .await
            .unwrap();
        let switch: SwitchStatus = inventory
            .get("switch:0")
            .unwrap()
            .status_as()
            .unwrap()
            .unwrap();
        assert_eq!(switch.output, Some(true));

        let key = inventory.components[1].component_key().unwrap();
        assert_eq!(key.component(), "boolean");
        assert_eq!(key.id(), Some(200));
    }
}

// ============================================================================
// Uploads
// ============================================================================

mod uploads {
    use super::*;

    #[tokio::test]
    async fn script_code_line_by_line() {
        let code = "let count = 0;\nTimer.set(1000, true, function () { count++; });\n";
        let transport = ScriptedTransport::new();
        transport.reply(json!({"len": 15})).reply(json!({"len": 66}));
        let client = Client::new(Arc::clone(&transport));

        let stored = client
            .upload_lines(code, |code, append| ScriptPutCode { id: 1, code, append })
            .await
            .unwrap();
        assert_eq!(stored.len, 66);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].params.get("append").is_none());
        assert_eq!(requests[1].params["append"], true);
        let joined: String = requests
            .iter()
            .map(|r| r.params["code"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(joined, code);
    }

    #[tokio::test]
    async fn pem_upload_stops_at_first_error() {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        let transport = ScriptedTransport::new();
        transport
            .reply(json!({"len": 28}))
            .reply_error(-108, "too large");
        let client = Client::new(Arc::clone(&transport));

        let err = client
            .upload_lines(pem, PutUserCa::chunk)
            .await
            .unwrap_err();
        assert_eq!(err.rpc_code(), Some(RpcErrorCode::ResourceExhausted));
        assert_eq!(transport.requests().len(), 2);
    }
}
