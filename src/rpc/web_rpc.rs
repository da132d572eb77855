use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::{ViewId, ViewRig};
use crate::engine::shell::{ActiveAddOn, ActiveService, AddOnSelection, ServiceSelection};
use crate::engine::wash::WashStateChanged;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication between the booking UI
/// and the engine. Handles both request-response patterns and notification
/// broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the embedding frontend without expecting a
    /// response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Selection change decoded from an RPC request, applied to the shell
/// resources by a dedicated system.
#[derive(Event, Debug, Clone)]
pub enum SelectionCommand {
    SetService(Option<ServiceSelection>),
    SetAddOn(Option<AddOnSelection>),
    SetView(ViewId),
}

/// Plugin establishing the RPC communication layer for iframe-based
/// deployment inside the booking site.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_event::<SelectionCommand>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    apply_selection_commands,
                    notify_view_changes,
                    notify_wash_state,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent the closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the booking UI.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands_out: EventWriter<SelectionCommand>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &mut commands_out) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("RPC parse error: {}", parse_error);
            }
        }
    }
}

/// Handle an individual RPC request and generate a response by method.
fn handle_rpc_request(
    request: &RpcRequest,
    commands_out: &mut EventWriter<SelectionCommand>,
) -> Option<RpcResponse> {
    // Only requests with ids get responses; notifications have none.
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "set_active_service" => handle_set_service(&request.params, commands_out),
        "set_active_add_on" => handle_set_add_on(&request.params, commands_out),
        "set_view" => handle_set_view(&request.params, commands_out),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_set_service(
    params: &serde_json::Value,
    commands_out: &mut EventWriter<SelectionCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ServiceParams {
        id: String,
        name: String,
    }

    let selection = if params.is_null() {
        None
    } else {
        let parsed = serde_json::from_value::<ServiceParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected {id, name} or null"))?;
        Some(ServiceSelection {
            id: parsed.id,
            name: parsed.name,
        })
    };

    commands_out.write(SelectionCommand::SetService(selection.clone()));
    Ok(serde_json::json!({
        "success": true,
        "active_service": selection.map(|s| s.id),
    }))
}

fn handle_set_add_on(
    params: &serde_json::Value,
    commands_out: &mut EventWriter<SelectionCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct AddOnParams {
        id: Option<String>,
        name: String,
    }

    let selection = if params.is_null() {
        None
    } else {
        let parsed = serde_json::from_value::<AddOnParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected {id?, name} or null"))?;
        Some(AddOnSelection {
            id: parsed.id,
            name: parsed.name,
        })
    };

    commands_out.write(SelectionCommand::SetAddOn(selection.clone()));
    Ok(serde_json::json!({
        "success": true,
        "active_add_on": selection.map(|a| a.name),
    }))
}

fn handle_set_view(
    params: &serde_json::Value,
    commands_out: &mut EventWriter<SelectionCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ViewParams {
        view: String,
    }

    let parsed = serde_json::from_value::<ViewParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'view' parameter"))?;

    // Unknown identifiers deliberately resolve to the default pose.
    let view = ViewId::from_string(&parsed.view);
    commands_out.write(SelectionCommand::SetView(view));

    Ok(serde_json::json!({
        "success": true,
        "view": view.as_str(),
    }))
}

/// Apply decoded selection commands to the shell resources.
fn apply_selection_commands(
    mut commands_in: EventReader<SelectionCommand>,
    mut active_service: ResMut<ActiveService>,
    mut active_add_on: ResMut<ActiveAddOn>,
    mut rig: ResMut<ViewRig>,
) {
    for command in commands_in.read() {
        match command {
            SelectionCommand::SetService(selection) => {
                active_service.0 = selection.clone();
            }
            SelectionCommand::SetAddOn(selection) => {
                active_add_on.0 = selection.clone();
            }
            SelectionCommand::SetView(view) => {
                rig.set_view(*view);
            }
        }
    }
}

/// Notify the frontend whenever the resolved camera view changes.
fn notify_view_changes(
    rig: Res<ViewRig>,
    mut previous: Local<Option<ViewId>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if *previous != Some(rig.view) {
        rpc_interface.send_notification(
            "view_changed",
            serde_json::json!({ "view": rig.view.as_str() }),
        );
        *previous = Some(rig.view);
    }
}

/// Mirror wash sequence transitions to the frontend.
fn notify_wash_state(
    mut events: EventReader<WashStateChanged>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for WashStateChanged(state) in events.read() {
        rpc_interface.send_notification(
            "wash_state_changed",
            serde_json::json!({ "state": format!("{:?}", state).to_lowercase() }),
        );
    }
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the embedding frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send a serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}
