/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(form.host, host)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.alert, None;
///     model.notice, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
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

    // Single field update
    ($model_field:expr, $value:expr) => {{
        $crate::update_field!($model_field, $value;)
    }};
}

/// Macro for unauthenticated JSON POST requests with standard error handling.
/// Requires domain parameters for event wrapping.
///
/// The response event is a struct variant stamped with the screen instance
/// that issued the request and the API address it went to, so late results
/// can be discarded after navigation.
///
/// # Patterns
///
/// Pattern 1: POST with JSON body expecting JSON response
/// ```ignore
/// unauth_post!(Auth, AuthEvent, model, &api_host, "/login", LoginResponse, "Login failed",
///     body_json: &credentials,
///     expect_json: TokenResponse
/// )
/// ```
///
/// Pattern 2: POST with JSON body expecting status only
/// ```ignore
/// unauth_post!(Config, ConfigEvent, model, &api_host, "/config", SubmitResponse, "Configuration failed",
///     body_json: &payload
/// )
/// ```
#[macro_export]
macro_rules! unauth_post {
    // Pattern 1: POST with JSON body expecting JSON response
    ($domain:ident, $domain_event:ident, $model:expr, $api_host:expr, $endpoint:expr, $response_event:ident, $title:expr, body_json: $body:expr, expect_json: $response_type:ty) => {{
        let screen = $model.screen_id;
        let api_host = $api_host.to_string();
        match $crate::HttpCmd::post($crate::build_url($api_host, $endpoint))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body_json($body)
        {
            Ok(builder) => {
                $model.start_loading();
                crux_core::Command::all([
                    crux_core::render::render(),
                    builder.build().then_send(move |result| {
                        let result: Result<$response_type, $crate::types::SubmitError> =
                            $crate::process_json_response(result);
                        $crate::events::Event::$domain($crate::events::$domain_event::$response_event {
                            screen,
                            api_host,
                            result,
                        })
                    }),
                ])
            }
            Err(e) => $model.set_error_and_render($crate::types::Alert::new(
                $title,
                format!("Failed to create {} request: {}", $endpoint, e),
            )),
        }
    }};

    // Pattern 2: POST with JSON body expecting status only
    ($domain:ident, $domain_event:ident, $model:expr, $api_host:expr, $endpoint:expr, $response_event:ident, $title:expr, body_json: $body:expr) => {{
        let screen = $model.screen_id;
        let api_host = $api_host.to_string();
        match $crate::HttpCmd::post($crate::build_url($api_host, $endpoint))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body_json($body)
        {
            Ok(builder) => {
                $model.start_loading();
                crux_core::Command::all([
                    crux_core::render::render(),
                    builder.build().then_send(move |result| {
                        $crate::events::Event::$domain($crate::events::$domain_event::$response_event {
                            screen,
                            api_host,
                            result: $crate::process_status_response(result),
                        })
                    }),
                ])
            }
            Err(e) => $model.set_error_and_render($crate::types::Alert::new(
                $title,
                format!("Failed to create {} request: {}", $endpoint, e),
            )),
        }
    }};
}
