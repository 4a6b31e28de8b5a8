/// Macro for model field updates with automatic rendering.
/// Renders only if a value actually changed.
///
/// ```ignore
/// update_field!(model.system_info, Some(info))
/// update_field!(model.is_connected, true; model.error_message, None)
/// ```
#[macro_export]
macro_rules! update_field {
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                log::debug!("{} updated", stringify!($model_field));
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    build_url, check_response_status, extract_string_response, handle_auth_error,
    handle_request_error, map_http_error, parse_json_response, process_json_response,
    process_status_response, process_string_response, BASE_URL,
};

/// Unauthenticated POST with standard error handling.
///
/// ```ignore
/// unauth_post!(Device, DeviceEvent, model, "/endpoint", SomeResponse, "Action")
/// unauth_post!(Device, DeviceEvent, model, "/endpoint", SomeResponse, "Action",
///     body_json: &request)
/// ```
#[macro_export]
macro_rules! unauth_post {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::post($crate::build_url($endpoint))
                .build()
                .then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};

    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {{
        $model.start_loading();
        match $crate::HttpCmd::post($crate::build_url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => crux_core::Command::all([
                crux_core::render::render(),
                builder.build().then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
            ]),
            Err(e) => $crate::handle_request_error($model, $action, e),
        }
    }};
}

/// POST with Basic credentials (already base64 encoded), used for login.
/// The plain text body is mapped into the response type.
///
/// ```ignore
/// auth_post_basic!(Auth, AuthEvent, model, "/token/login", LoginResponse, "Login",
///     credentials: encoded,
///     map: |token| AuthToken { token })
/// ```
#[macro_export]
macro_rules! auth_post_basic {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, credentials: $credentials:expr, map: $mapper:expr) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::post($crate::build_url($endpoint))
                .header("Authorization", format!("Basic {}", $credentials))
                .build()
                .then_send(|result| {
                    let event_result =
                        $crate::process_string_response($action, result).map($mapper);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};
}

/// POST carrying the session's Bearer token. Without a session nothing is
/// issued and the model reports the missing authentication.
///
/// ```ignore
/// auth_post!(Device, DeviceEvent, model, "/reboot", RebootResponse, "Reboot")
/// auth_post!(Device, DeviceEvent, model, "/factory-reset", FactoryResetResponse, "Factory reset",
///     body_json: &FactoryResetRequest { mode, preserve })
/// auth_post!(Device, DeviceEvent, model, "/update/load", LoadUpdateResponse, "Load update",
///     body_json: &request,
///     expect_json: UpdateManifest)
/// ```
#[macro_export]
macro_rules! auth_post {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr) => {{
        if let Some(token) = $model.auth_token.clone() {
            $model.start_loading();
            crux_core::Command::all([
                crux_core::render::render(),
                $crate::HttpCmd::post($crate::build_url($endpoint))
                    .header("Authorization", format!("Bearer {token}"))
                    .build()
                    .then_send(|result| {
                        let event_result = $crate::process_status_response($action, result);
                        $crate::events::Event::$domain(
                            $crate::events::$domain_event::$response_event(event_result),
                        )
                    }),
            ])
        } else {
            $crate::handle_auth_error($model, $action)
        }
    }};

    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {{
        if let Some(token) = $model.auth_token.clone() {
            match $crate::HttpCmd::post($crate::build_url($endpoint))
                .header("Authorization", format!("Bearer {token}"))
                .header("Content-Type", "application/json")
                .body_json($body)
            {
                Ok(builder) => {
                    $model.start_loading();
                    crux_core::Command::all([
                        crux_core::render::render(),
                        builder.build().then_send(|result| {
                            let event_result = $crate::process_status_response($action, result);
                            $crate::events::Event::$domain(
                                $crate::events::$domain_event::$response_event(event_result),
                            )
                        }),
                    ])
                }
                Err(e) => $crate::handle_request_error($model, $action, e),
            }
        } else {
            $crate::handle_auth_error($model, $action)
        }
    }};

    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr, expect_json: $response_type:ty) => {{
        if let Some(token) = $model.auth_token.clone() {
            match $crate::HttpCmd::post($crate::build_url($endpoint))
                .header("Authorization", format!("Bearer {token}"))
                .header("Content-Type", "application/json")
                .body_json($body)
            {
                Ok(builder) => {
                    $model.start_loading();
                    crux_core::Command::all([
                        crux_core::render::render(),
                        builder.build().then_send(|result| {
                            let event_result: Result<$response_type, $crate::HttpError> =
                                $crate::process_json_response($action, result);
                            $crate::events::Event::$domain(
                                $crate::events::$domain_event::$response_event(event_result),
                            )
                        }),
                    ])
                }
                Err(e) => $crate::handle_request_error($model, $action, e),
            }
        } else {
            $crate::handle_auth_error($model, $action)
        }
    }};
}

/// GET without touching the loading state; used by the polls.
///
/// ```ignore
/// http_get!(Device, DeviceEvent, url, ReconnectionCheckResponse, "Healthcheck",
///     expect_json: HealthcheckInfo)
/// http_get!(Device, DeviceEvent, url, NewIpCheckResponse, "New IP healthcheck")
/// ```
#[macro_export]
macro_rules! http_get {
    ($domain:ident, $domain_event:ident, $url:expr, $response_event:ident, $action:expr) => {
        $crate::HttpCmd::get($url).build().then_send(|result| {
            let event_result = $crate::process_status_response($action, result);
            $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                event_result,
            ))
        })
    };

    ($domain:ident, $domain_event:ident, $url:expr, $response_event:ident, $action:expr, expect_json: $response_type:ty) => {
        $crate::HttpCmd::get($url).build().then_send(|result| {
            let event_result: Result<$response_type, $crate::HttpError> =
                $crate::process_json_response($action, result);
            $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                event_result,
            ))
        })
    };
}

/// Parse a channel payload through its wire type into the domain type.
/// Malformed payloads are logged and yield `None`.
///
/// ```ignore
/// if let Some(info) = parse_ods_update!(data, OdsSystemInfo, SystemInfo) { ... }
/// ```
#[macro_export]
macro_rules! parse_ods_update {
    ($data:expr, $ods_type:ty, $domain_type:ty) => {{
        match serde_json::from_str::<$ods_type>($data) {
            Ok(wire) => Some(<$domain_type>::from(wire)),
            Err(e) => {
                log::error!("failed to parse {}: {e}", stringify!($ods_type));
                None
            }
        }
    }};
}

/// Fold a typed response into the model: stop loading, run the success
/// handler or report the error (a 401 also ends the session), then render.
///
/// ```ignore
/// handle_response!(model, result, {
///     on_success: |model, auth| { model.auth_token = Some(auth.token); },
///     success_message: "Logged in",
/// })
/// ```
#[macro_export]
macro_rules! handle_response {
    ($model:expr, $result:expr, {
        success_message: $msg:expr $(,)?
    }) => {{
        $crate::handle_response!($model, $result, {
            on_success: |_model, _value| {},
            success_message: $msg,
        })
    }};

    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block $(,)?
    }) => {{
        $model.stop_loading();
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_model = &mut *$model;
                $success_body
            }
            Err(e) => $model.handle_http_error(e),
        }
        crux_core::render::render()
    }};

    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block,
        success_message: $msg:expr $(,)?
    }) => {{
        $model.stop_loading();
        match $result {
            Ok($value) => {
                {
                    #[allow(clippy::redundant_locals)]
                    let $success_model = &mut *$model;
                    $success_body
                }
                $model.set_success($msg);
            }
            Err(e) => $model.handle_http_error(e),
        }
        crux_core::render::render()
    }};
}
