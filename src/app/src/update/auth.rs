use base64::prelude::*;
use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::auth_post;
use crate::auth_post_basic;
use crate::events::{AuthEvent, Event};
use crate::handle_response;
use crate::model::Model;
use crate::types::{AuthToken, UpdatePasswordRequest};
use crate::Effect;

/// Handle authentication-related events
pub fn handle(event: AuthEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        AuthEvent::Login { password } => {
            let encoded = BASE64_STANDARD.encode(format!(":{password}"));
            auth_post_basic!(Auth, AuthEvent, model, "/token/login", LoginResponse, "Login",
                credentials: encoded,
                map: |token| AuthToken { token })
        }

        AuthEvent::LoginResponse(result) => handle_response!(model, result, {
            on_success: |model, auth| {
                model.auth_token = Some(auth.token);
                model.is_authenticated = true;
            },
        }),

        AuthEvent::Logout => auth_post!(Auth, AuthEvent, model, "/logout", LogoutResponse, "Logout"),

        AuthEvent::LogoutResponse(result) => handle_response!(model, result, {
            on_success: |model, _| {
                model.invalidate_session();
            },
        }),

        AuthEvent::UpdatePassword {
            current,
            password,
            password_repeat,
        } => {
            if password != password_repeat {
                model.set_error("Passwords do not match".to_string());
                return render();
            }
            let request = UpdatePasswordRequest {
                current_password: current,
                password,
            };
            if let Err(e) = request.validate() {
                model.set_error(format!("Update password failed: {e}"));
                return render();
            }
            auth_post!(Auth, AuthEvent, model, "/update-password", UpdatePasswordResponse, "Update password",
                body_json: &request)
        }

        AuthEvent::UpdatePasswordResponse(result) => handle_response!(model, result, {
            success_message: "Password updated successfully",
        }),
    }
}
