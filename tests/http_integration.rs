// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport using wiremock.

#![cfg(feature = "http")]

use serde_json::json;
use shelly_rpc::component::{SwitchGetStatus, SwitchSet};
use shelly_rpc::protocol::{HttpConfig, HttpTransport, RequestFrame, Transport};
use shelly_rpc::{Client, ClientConfig, Error, ErrorKind, GetComponents, ProtocolError, RpcErrorCode};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers with a result frame echoing the request id.
struct EchoId(serde_json::Value);

impl Respond for EchoId {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let frame: RequestFrame = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "id": frame.id,
            "src": "shellyplus1-a8032ab1c2d3",
            "dst": frame.src,
            "result": self.0,
        }))
    }
}

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(server.uri()).unwrap()
}

// ============================================================================
// Transport
// ============================================================================

mod transport {
    use super::*;

    #[tokio::test]
    async fn posts_frame_to_rpc_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({
                "jsonrpc": "2.0",
                "src": "tester",
                "method": "Switch.GetStatus",
                "params": {"id": 0}
            })))
            .respond_with(EchoId(json!({"id": 0, "output": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::with_config(
            transport_for(&server),
            ClientConfig::new().with_source("tester"),
        );
        let status = client.call(&SwitchGetStatus { id: 0 }).await.unwrap();
        assert_eq!(status.output, Some(true));
    }

    #[tokio::test]
    async fn raw_frame_round_trip() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(EchoId(json!({"was_on": false})))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let request = RequestFrame::new("2.0", "me", "Switch.Set", json!({"id": 0, "on": true}));
        let response = transport.call(&request).await.unwrap();

        assert_eq!(response.id_str().as_deref(), Some(request.id.as_str()));
        assert_eq!(response.dst.as_deref(), Some("me"));
        assert_eq!(response.result_str(), r#"{"was_on":false}"#);
    }

    #[tokio::test]
    async fn config_builds_transport_with_port() {
        let server = MockServer::start().await;
        let address = server.address();

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(EchoId(json!({"was_on": true})))
            .mount(&server)
            .await;

        let transport = HttpConfig::new(address.ip().to_string())
            .with_port(address.port())
            .into_transport()
            .unwrap();
        let reply = Client::new(transport)
            .call(&SwitchSet::new(0, false))
            .await
            .unwrap();
        assert!(reply.was_on);
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn device_error_with_http_500() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "id": 1,
                "src": "shellyplus1-a8032ab1c2d3",
                "error": {"code": -105, "message": "Argument 'id', value 4 not found!"}
            })))
            .mount(&server)
            .await;

        let client = Client::new(transport_for(&server));
        let err = client.call(&SwitchSet::new(4, true)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Rpc);
        assert_eq!(err.rpc_code(), Some(RpcErrorCode::UnknownComponentId));
        match err {
            Error::Rpc(rpc) => assert!(rpc.message.contains("value 4")),
            other => panic!("expected Error::Rpc, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_required() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = Client::new(transport_for(&server));
        let err = client.get_status().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::AuthenticationRequired)
        ));
    }

    #[tokio::test]
    async fn garbage_body_is_malformed_frame() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not rpc</html>"))
            .mount(&server)
            .await;

        let client = Client::new(transport_for(&server));
        let err = client.get_status().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::MalformedFrame(_))
        ));
    }

    #[tokio::test]
    async fn garbage_body_with_error_status_is_connection_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let client = Client::new(transport_for(&server));
        let err = client.get_status().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn malformed_status_entry_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .respond_with(EchoId(json!({
                "sys": {"mac": "AA"},
                "switch:0": {"id": 0, "output": "on"}
            })))
            .mount(&server)
            .await;

        let client = Client::new(transport_for(&server));
        let err = client.get_status().await.unwrap_err();

        match err {
            Error::Parse { method, source } => {
                assert_eq!(method, "Shelly.GetStatus");
                assert_eq!(source.component_key(), Some("switch:0"));
            }
            other => panic!("expected Error::Parse, got {other:?}"),
        }
    }
}

// ============================================================================
// Shelly service over HTTP
// ============================================================================

mod shelly {
    use super::*;

    #[tokio::test]
    async fn get_status_document() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rpc"))
            .and(body_partial_json(json!({"method": "Shelly.GetStatus"})))
            .respond_with(EchoId(json!({
                "ble": {},
                "cloud": {"connected": false},
                "input:0": {"id": 0, "state": false},
                "mqtt": {"connected": true},
                "switch:0": {
                    "id": 0, "source": "init", "output": false, "apower": 0.0,
                    "voltage": 231.2, "current": 0.0,
                    "aenergy": {"total": 0.0, "by_minute": [0.0, 0.0, 0.0], "minute_ts": 1_700_000_000},
                    "temperature": {"tC": 41.3, "tF": 106.4}
                },
                "sys": {"mac": "A8032AB1C2D3", "restart_required": false, "uptime": 3608.0},
                "wifi": {"sta_ip": "192.168.1.50", "status": "got ip", "ssid": "home", "rssi": -58},
                "ws": {"connected": false}
            })))
            .mount(&server)
            .await;

        let status = Client::new(transport_for(&server))
            .get_status()
            .await
            .unwrap();

        assert_eq!(status.switches.len(), 1);
        assert_eq!(status.inputs.len(), 1);
        assert!(status.ble.is_some());
        assert!(status.mqtt.unwrap().connected);
        assert_eq!(
            status.wifi.unwrap().sta_ip.flatten().as_deref(),
            Some("192.168.1.50")
        );
        let switch = &status.switches[0];
        assert_eq!(switch.voltage, Some(231.2));
        assert_eq!(switch.temperature.unwrap().celsius, Some(Some(41.3)));
    }

    #[tokio::test]
    async fn enumerates_component_pages() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"offset": 0}})))
            .respond_with(EchoId(json!({
                "components": [{"key": "sys"}, {"key": "switch:0"}],
                "cfg_rev": 7, "offset": 0, "total": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"params": {"offset": 2}})))
            .respond_with(EchoId(json!({
                "components": [{"key": "boolean:200"}],
                "cfg_rev": 7, "offset": 2, "total": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        let inventory = Client::new(transport_for(&server))
            .get_all_components(&GetComponents::new())
            .await
            .unwrap();

        assert_eq!(
            inventory.keys().collect::<Vec<_>>(),
            ["sys", "switch:0", "boolean:200"]
        );
        assert_eq!(inventory.cfg_rev, Some(7));
    }
}
