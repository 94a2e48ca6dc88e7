//! HTTP handlers for cellar pages.
//!
//! These handlers connect Axum routes to the cellar command/query handlers
//! and render the result or redirect back to the relevant page.

use axum::extract::{Form, Multipart, Path, RawQuery, State};
use axum::response::{Html, Redirect};
use url::form_urlencoded;

use crate::adapters::http::error::AppError;
use crate::adapters::http::middleware::{CsrfToken, OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::adapters::http::views::WineFormMode;
use crate::application::handlers::cellar::{
    AddReviewCommand, AddTastingNoteCommand, AddWineCommand, DeleteReviewCommand,
    DeleteTastingNoteCommand, DeleteWineCommand, EditReviewCommand, EditWineCommand,
    GetWineDetailsQuery, ListWinesQuery, UpdateQuantityCommand, WineAllowanceQuery,
};
use crate::domain::account::User;
use crate::domain::cellar::{CellarError, ListParams, QuantityAction};
use crate::domain::foundation::{ReviewId, TastingNoteId, UserId, WineId};

use super::dto::{parse_id, IdForm, QuantityForm, ReviewPayload, TastingNotePayload};
use super::multipart::read_wine_form;

fn details_redirect(wine_id: &WineId) -> Redirect {
    Redirect::to(&format!("/details/{}", wine_id))
}

async fn current_user(state: &AppState, user_id: &UserId) -> Result<User, AppError> {
    Ok(state
        .users
        .find_by_id(user_id)
        .await
        .map_err(CellarError::from)?
        .ok_or(CellarError::NotFound("User"))?)
}

// ════════════════════════════════════════════════════════════════════════════════
// List and details
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - cellar list, or the landing page for visitors.
///
/// The query string is read leniently: a repeated key keeps its first
/// value and anything unparsable falls back to the defaults.
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    CsrfToken(csrf): CsrfToken,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let Some(auth) = auth else {
        return Ok(Html(state.views.landing_page()?));
    };

    let pairs: Vec<(String, String)> = raw
        .as_deref()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let result = state
        .list_wines_handler()
        .handle(ListWinesQuery {
            user_id: auth.id,
            params: ListParams::from_pairs(pairs.iter().map(|(k, v)| (k, v.as_str()))),
        })
        .await?;

    Ok(Html(state.views.list_page(
        &result.user,
        &csrf,
        &result.query,
        &result.page,
        result.filter_options.as_ref(),
        &pairs,
    )?))
}

/// GET /details/{id}
pub async fn wine_details(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    CsrfToken(csrf): CsrfToken,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let result = state
        .wine_details_handler()
        .handle(GetWineDetailsQuery {
            user_id: auth.id,
            wine_id: parse_id(&id)?,
        })
        .await?;

    Ok(Html(state.views.details_page(&result.user, &csrf, &result.details)?))
}

// ════════════════════════════════════════════════════════════════════════════════
// Wines
// ════════════════════════════════════════════════════════════════════════════════

/// GET /add
pub async fn add_wine_page(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    CsrfToken(csrf): CsrfToken,
) -> Result<Html<String>, AppError> {
    let user = current_user(&state, &auth.id).await?;
    let allowance = state
        .wine_allowance_handler()
        .handle(WineAllowanceQuery { user_id: auth.id })
        .await?;

    Ok(Html(state.views.wine_form_page(
        &user,
        &csrf,
        WineFormMode::Add {
            limit_reached: allowance.limit_reached,
        },
    )?))
}

/// POST /add
pub async fn add_wine(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let (form, image) = read_wine_form(multipart).await?;

    let result = state
        .add_wine_handler()
        .handle(AddWineCommand {
            user_id: auth.id,
            form,
            image,
        })
        .await?;

    tracing::info!(user_id = %auth.id, wine_id = %result.wine.id, "Wine added");
    Ok(Redirect::to("/"))
}

/// GET /edit/{id}
pub async fn edit_wine_page(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    CsrfToken(csrf): CsrfToken,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let result = state
        .wine_details_handler()
        .handle(GetWineDetailsQuery {
            user_id: auth.id,
            wine_id: parse_id(&id)?,
        })
        .await?;

    Ok(Html(state.views.wine_form_page(
        &result.user,
        &csrf,
        WineFormMode::Edit(&result.details.wine),
    )?))
}

/// POST /edit/{id}
pub async fn edit_wine(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let wine_id: WineId = parse_id(&id)?;
    let (form, image) = read_wine_form(multipart).await?;

    let result = state
        .edit_wine_handler()
        .handle(EditWineCommand {
            user_id: auth.id,
            wine_id,
            form,
            image,
        })
        .await?;

    Ok(details_redirect(&result.wine.id))
}

/// POST /update-quantity
pub async fn update_quantity(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect, AppError> {
    let wine_id: WineId = parse_id(&form.id)?;
    let action = QuantityAction::parse(&form.action).map_err(CellarError::from)?;

    let result = state
        .update_quantity_handler()
        .handle(UpdateQuantityCommand {
            user_id: auth.id,
            wine_id,
            action,
        })
        .await?;

    Ok(details_redirect(&result.wine_id))
}

/// POST /delete
pub async fn delete_wine(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<IdForm>,
) -> Result<Redirect, AppError> {
    let result = state
        .delete_wine_handler()
        .handle(DeleteWineCommand {
            user_id: auth.id,
            wine_id: parse_id(&form.id)?,
        })
        .await?;

    tracing::info!(user_id = %auth.id, wine_id = %result.wine_id, "Wine deleted");
    Ok(Redirect::to("/"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Reviews
// ════════════════════════════════════════════════════════════════════════════════

/// POST /add-review - `id` is the wine.
pub async fn add_review(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(payload): Form<ReviewPayload>,
) -> Result<Redirect, AppError> {
    let (id, form) = payload.into_parts();
    let wine_id: WineId = parse_id(&id)?;

    state
        .add_review_handler()
        .handle(AddReviewCommand {
            user_id: auth.id,
            wine_id,
            form,
        })
        .await?;

    Ok(details_redirect(&wine_id))
}

/// POST /edit-review - `id` is the review.
pub async fn edit_review(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(payload): Form<ReviewPayload>,
) -> Result<Redirect, AppError> {
    let (id, form) = payload.into_parts();
    let review_id: ReviewId = parse_id(&id)?;

    let result = state
        .edit_review_handler()
        .handle(EditReviewCommand {
            user_id: auth.id,
            review_id,
            form,
        })
        .await?;

    Ok(details_redirect(&result.review.wine_id))
}

/// POST /delete-review
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<IdForm>,
) -> Result<Redirect, AppError> {
    let result = state
        .delete_review_handler()
        .handle(DeleteReviewCommand {
            user_id: auth.id,
            review_id: parse_id(&form.id)?,
        })
        .await?;

    Ok(details_redirect(&result.wine_id))
}

// ════════════════════════════════════════════════════════════════════════════════
// Tasting notes
// ════════════════════════════════════════════════════════════════════════════════

/// POST /add-tasting-note - `id` is the wine.
pub async fn add_tasting_note(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(payload): Form<TastingNotePayload>,
) -> Result<Redirect, AppError> {
    let wine_id: WineId = parse_id(&payload.id)?;

    state
        .add_tasting_note_handler()
        .handle(AddTastingNoteCommand {
            user_id: auth.id,
            wine_id,
            note: payload.note,
        })
        .await?;

    Ok(details_redirect(&wine_id))
}

/// POST /delete-tasting-note
pub async fn delete_tasting_note(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Form(form): Form<IdForm>,
) -> Result<Redirect, AppError> {
    let note_id: TastingNoteId = parse_id(&form.id)?;

    let result = state
        .delete_tasting_note_handler()
        .handle(DeleteTastingNoteCommand {
            user_id: auth.id,
            note_id,
        })
        .await?;

    Ok(details_redirect(&result.wine_id))
}
