// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MQTT transport for Shelly devices.
//!
//! Gen2 devices with MQTT RPC enabled listen on `<device_id>/rpc` and publish
//! each reply on `<src>/rpc`, where `src` is taken from the request frame.
//! Replies are matched to callers by frame id.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::ProtocolError;
use crate::protocol::{RequestFrame, ResponseFrame, Transport};

/// Global counter for generating unique client IDs.
static CLIENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<ResponseFrame>>>>;

/// Sends request frames through an MQTT broker.
///
/// The transport owns one background task that drives the connection and
/// routes replies. Dropping the transport stops that task.
///
/// # Examples
///
/// ```ignore
/// use shelly_rpc::Client;
/// use shelly_rpc::protocol::MqttTransportBuilder;
///
/// let transport = MqttTransportBuilder::new()
///     .broker("mqtt://192.168.1.50:1883")
///     .device_id("shellyplus1pm-a8032ab12345")
///     .build()
///     .await?;
/// let status = Client::new(transport).get_status().await?;
/// ```
#[derive(Debug)]
pub struct MqttTransport {
    client: AsyncClient,
    device_id: String,
    source: String,
    timeout: Duration,
    pending: PendingMap,
    event_task: JoinHandle<()>,
}

impl MqttTransport {
    /// Default time to wait for a reply.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Returns the device id (request topic prefix).
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the source name stamped on outgoing frames.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the number of calls waiting for a reply.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.lock().len()
    }
}

impl Drop for MqttTransport {
    fn drop(&mut self) {
        self.event_task.abort();
    }
}

impl Transport for MqttTransport {
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError> {
        if self.event_task.is_finished() {
            return Err(ProtocolError::ChannelClosed(
                "MQTT event loop stopped".to_string(),
            ));
        }

        // Replies go to `<src>/rpc`, so src must be the topic we subscribed to.
        let frame = request.clone().with_src(self.source.clone());
        let payload = serde_json::to_vec(&frame).map_err(ProtocolError::FrameEncoding)?;
        let topic = request_topic(&self.device_id);

        let (tx, rx) = oneshot::channel();
        let _guard = PendingGuard::register(&self.pending, frame.id.clone(), tx);

        tracing::debug!(
            topic = %topic,
            method = %frame.method,
            id = %frame.id,
            "Publishing MQTT RPC request"
        );

        self.client
            .publish(&topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(ProtocolError::Mqtt)?;

        // Safe: timeout in practical use will never exceed u64::MAX milliseconds
        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.timeout.as_millis() as u64;

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(ProtocolError::ChannelClosed(
                "MQTT event loop stopped".to_string(),
            )),
            Err(_) => Err(ProtocolError::Timeout(timeout_ms)),
        }
    }
}

/// Removes a pending entry when the call finishes or is cancelled.
struct PendingGuard<'a> {
    pending: &'a PendingMap,
    id: String,
}

impl<'a> PendingGuard<'a> {
    fn register(
        pending: &'a PendingMap,
        id: String,
        tx: oneshot::Sender<ResponseFrame>,
    ) -> Self {
        pending.lock().insert(id.clone(), tx);
        Self { pending, id }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().remove(&self.id);
    }
}

/// Topic a device listens on for RPC requests.
fn request_topic(device_id: &str) -> String {
    format!("{device_id}/rpc")
}

/// Topic a device publishes replies on for a given request source.
fn reply_topic(source: &str) -> String {
    format!("{source}/rpc")
}

/// Parses an MQTT URL into host and port.
fn parse_mqtt_url(url: &str) -> Result<(String, u16), ProtocolError> {
    let url = url
        .strip_prefix("mqtt://")
        .or_else(|| url.strip_prefix("tcp://"))
        .unwrap_or(url);

    let (host, port) = if let Some((h, p)) = url.rsplit_once(':') {
        let port = p
            .parse()
            .map_err(|_| ProtocolError::InvalidAddress(format!("Invalid port: {p}")))?;
        (h.to_string(), port)
    } else {
        (url.to_string(), 1883)
    };

    if host.is_empty() {
        return Err(ProtocolError::InvalidAddress("empty broker host".to_string()));
    }

    Ok((host, port))
}

/// Hands a reply payload to the caller waiting on its id.
///
/// Returns `false` if the payload is not a frame or nobody is waiting for it.
fn route_reply(pending: &PendingMap, payload: &[u8]) -> bool {
    let frame = match serde_json::from_slice::<ResponseFrame>(payload) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring non-RPC MQTT payload");
            return false;
        }
    };
    let Some(id) = frame.id_str() else {
        return false;
    };
    let Some(tx) = pending.lock().remove(&id) else {
        tracing::trace!(id = %id, "No pending request for MQTT reply");
        return false;
    };
    tx.send(frame).is_ok()
}

/// Drives the MQTT connection in the background.
async fn handle_mqtt_events(
    mut event_loop: EventLoop,
    reply_topic: String,
    pending: PendingMap,
    mut ready: Option<oneshot::Sender<()>>,
) {
    use rumqttc::{Event, Packet};

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT connected");
            }
            Ok(Event::Incoming(Packet::SubAck(suback))) => {
                tracing::debug!(?suback, "MQTT subscription acknowledged");
                if let Some(ready) = ready.take() {
                    let _ = ready.send(());
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                if publish.topic == reply_topic {
                    tracing::trace!(
                        topic = %publish.topic,
                        payload = %String::from_utf8_lossy(&publish.payload),
                        "Received MQTT reply"
                    );
                    route_reply(&pending, &publish.payload);
                }
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "MQTT event loop error");
                break;
            }
        }
    }

    // Wake every waiting caller with a closed channel.
    pending.lock().clear();
}

/// Builder for an [`MqttTransport`].
#[derive(Debug, Default)]
pub struct MqttTransportBuilder {
    broker: Option<String>,
    device_id: Option<String>,
    source: Option<String>,
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    keep_alive: Option<Duration>,
    timeout: Option<Duration>,
}

impl MqttTransportBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MQTT broker URL, e.g. `mqtt://192.168.1.50:1883`.
    #[must_use]
    pub fn broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    /// Sets the device id used as request topic prefix
    /// (the device's `mqtt.topic_prefix`, by default its id).
    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the source name the device replies to.
    ///
    /// Defaults to the MQTT client id. Must be unique among clients talking
    /// to the same broker.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets authentication credentials for the MQTT broker.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets a custom client ID.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the keep-alive interval.
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.keep_alive = Some(duration);
        self
    }

    /// Sets how long a call waits for its reply.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Connects to the broker and subscribes to the reply topic.
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing, the subscription cannot
    /// be queued, or the broker does not acknowledge it within the timeout.
    pub async fn build(self) -> Result<MqttTransport, ProtocolError> {
        let broker = self
            .broker
            .ok_or_else(|| ProtocolError::InvalidAddress("broker is required".to_string()))?;

        let device_id = self
            .device_id
            .ok_or_else(|| ProtocolError::InvalidAddress("device_id is required".to_string()))?;

        let (host, port) = parse_mqtt_url(&broker)?;

        let client_id = self.client_id.unwrap_or_else(|| {
            let counter = CLIENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
            format!("shelly_rpc_{}_{}", std::process::id(), counter)
        });
        let source = self.source.unwrap_or_else(|| client_id.clone());
        let timeout = self.timeout.unwrap_or(MqttTransport::DEFAULT_TIMEOUT);

        let mut mqtt_options = MqttOptions::new(&client_id, host, port);
        mqtt_options.set_keep_alive(self.keep_alive.unwrap_or(Duration::from_secs(30)));
        mqtt_options.set_clean_session(true);

        if let (Some(username), Some(password)) = (self.username, self.password) {
            mqtt_options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(mqtt_options, 10);

        let reply_topic = reply_topic(&source);
        client
            .subscribe(&reply_topic, QoS::AtLeastOnce)
            .await
            .map_err(ProtocolError::Mqtt)?;

        let pending: PendingMap = Arc::default();
        let (ready_tx, ready_rx) = oneshot::channel();
        let event_task = tokio::spawn(handle_mqtt_events(
            event_loop,
            reply_topic.clone(),
            Arc::clone(&pending),
            Some(ready_tx),
        ));

        match tokio::time::timeout(timeout, ready_rx).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                return Err(ProtocolError::ConnectionFailed(format!(
                    "MQTT connection to {broker} closed before subscribing"
                )));
            }
            Err(_) => {
                event_task.abort();
                return Err(ProtocolError::ConnectionFailed(format!(
                    "no subscription acknowledgment from {broker}"
                )));
            }
        }

        tracing::debug!(device = %device_id, reply_topic = %reply_topic, "MQTT transport ready");

        Ok(MqttTransport {
            client,
            device_id,
            source,
            timeout,
            pending,
            event_task,
        })
    }
}
