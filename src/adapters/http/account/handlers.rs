//! HTTP handlers for account pages.

use axum::extract::{Form, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::adapters::http::error::AppError;
use crate::adapters::http::middleware::{
    clear_session_cookie, session_cookie, CsrfToken, RequireAuth,
};
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    DeleteAccountCommand, ExportCellarQuery, LogInCommand, SignUpCommand, SignUpNext,
    UpdateSettingsCommand, UpdateSettingsResult, EXPORT_FILE_NAME,
};
use crate::domain::account::{AccountError, SignupPlan, User};
use crate::domain::foundation::AuthenticatedUser;

use super::dto::{LogInForm, SettingsForm, SettingsPageQuery, SignUpForm, SignUpPageQuery};

/// `Set-Cookie` for a fresh session of `user`.
fn start_session(state: &AppState, user: &User) -> Result<HeaderValue, AppError> {
    let identity = AuthenticatedUser::new(user.id, user.email.as_str());
    let token = state
        .sessions
        .issue(&identity)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(session_cookie(
        &token,
        state.sessions.max_age_secs(),
        state.settings.secure_cookies,
    )?)
}

// ════════════════════════════════════════════════════════════════════════════════
// Signup and login
// ════════════════════════════════════════════════════════════════════════════════

/// GET /signup
pub async fn sign_up_page(
    State(state): State<AppState>,
    CsrfToken(csrf): CsrfToken,
    Query(query): Query<SignUpPageQuery>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.signup_page(&csrf, query.tier.as_deref(), None)?))
}

/// POST /signup
///
/// Validation and duplicate-email failures re-render the form.
pub async fn sign_up(
    State(state): State<AppState>,
    CsrfToken(csrf): CsrfToken,
    Form(form): Form<SignUpForm>,
) -> Result<Response, AppError> {
    let plan = SignupPlan::from_form(form.tier.as_deref());
    let cmd = SignUpCommand {
        email: form.email,
        password: form.password,
        plan,
    };

    let result = match state.sign_up_handler().handle(cmd).await {
        Ok(result) => result,
        Err(err @ (AccountError::ValidationFailed { .. } | AccountError::EmailTaken)) => {
            let status = AppError::from(err.clone()).status();
            let tier = (plan == SignupPlan::Pro).then_some("pro");
            let page = state.views.signup_page(&csrf, tier, Some(&err.message()))?;
            return Ok((status, Html(page)).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    match result.next {
        SignUpNext::Checkout => {
            let cookie = start_session(&state, &result.user)?;
            Ok((
                [(SET_COOKIE, cookie)],
                Redirect::to("/create-checkout-session"),
            )
                .into_response())
        }
        SignUpNext::LogIn => Ok(Redirect::to("/login").into_response()),
    }
}

/// GET /login
pub async fn log_in_page(
    State(state): State<AppState>,
    CsrfToken(csrf): CsrfToken,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.login_page(&csrf, None)?))
}

/// POST /login
pub async fn log_in(
    State(state): State<AppState>,
    CsrfToken(csrf): CsrfToken,
    Form(form): Form<LogInForm>,
) -> Result<Response, AppError> {
    let cmd = LogInCommand {
        email: form.email,
        password: form.password,
    };

    let result = match state.log_in_handler().handle(cmd).await {
        Ok(result) => result,
        Err(AccountError::InvalidCredentials) => {
            let page = state
                .views
                .login_page(&csrf, Some(&AccountError::InvalidCredentials.message()))?;
            return Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let cookie = start_session(&state, &result.user)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// GET /logout
pub async fn log_out(State(state): State<AppState>) -> Response {
    (
        [(SET_COOKIE, clear_session_cookie(state.settings.secure_cookies))],
        Redirect::to("/"),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Settings
// ════════════════════════════════════════════════════════════════════════════════

/// GET /settings
pub async fn settings_page(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    CsrfToken(csrf): CsrfToken,
    Query(query): Query<SettingsPageQuery>,
) -> Result<Html<String>, AppError> {
    let user = state
        .users
        .find_by_id(&auth.id)
        .await
        .map_err(AccountError::from)?
        .ok_or(AccountError::UserNotFound)?;

    Ok(Html(state.views.settings_page(
        &user,
        &csrf,
        query.outcome(),
        state.settings.allow_debug_tier,
    )?))
}

/// POST /settings
///
/// A currency change returns to the cellar; a debug tier override stays on
/// the settings page.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, AppError> {
    let cmd = UpdateSettingsCommand {
        user_id: auth.id,
        currency: form.currency,
        debug_tier: form.debug_tier,
        allow_debug_tier: state.settings.allow_debug_tier,
    };

    match state.update_settings_handler().handle(cmd).await? {
        UpdateSettingsResult::CurrencyUpdated(_) => Ok(Redirect::to("/")),
        UpdateSettingsResult::TierOverridden(_) => Ok(Redirect::to("/settings")),
    }
}

/// GET /export
pub async fn export_cellar(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Response, AppError> {
    let result = state
        .export_cellar_handler()
        .handle(ExportCellarQuery { user_id: auth.id })
        .await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename={}",
        EXPORT_FILE_NAME
    ))?;
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (CONTENT_DISPOSITION, disposition),
        ],
        result.csv,
    )
        .into_response())
}

/// POST /delete-account
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Redirect, AppError> {
    state
        .delete_account_handler()
        .handle(DeleteAccountCommand { user_id: auth.id })
        .await?;

    Ok(Redirect::to("/logout"))
}
