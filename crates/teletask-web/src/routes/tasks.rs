//! Task pages: the list with its creation form, plus per-task edit and
//! delete pages.
//!
//! All mutating routes follow POST/redirect/GET; a failed validation
//! re-renders the submitted form with field messages instead of redirecting.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::{HeaderMap, SET_COOKIE};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use minijinja::context;
use tracing::info;

use teletask_core::models::{NewTaskData, Task, UpdateTaskData};
use teletask_core::providers;
use teletask_core::repository::TaskRepository;

use crate::error::WebError;
use crate::flash::{self, Flash};
use crate::forms::{FormErrors, TaskForm};
use crate::state::AppState;

/// Register the task CRUD routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/update_task/{id}/", get(edit_task).post(update_task))
        .route("/delete_task/{id}/", get(confirm_delete).post(delete_task))
}

/// GET `/`: every task in insertion order, the creation form and any flash
/// messages queued by the previous request.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let tasks = state.repo.list_tasks().await?;
    let (flashes, clear) = flash::take(&headers);

    let html = render_list(
        &state,
        &tasks,
        &TaskForm::default(),
        &FormErrors::default(),
        &flashes,
    )?;

    let mut response = Html(html).into_response();
    if clear {
        response.headers_mut().insert(SET_COOKIE, flash::clear_cookie());
    }
    Ok(response)
}

/// POST `/`: create a task, or re-render the list with field errors and the
/// submitted values preserved.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TaskForm>,
) -> Result<Response, WebError> {
    match form.validate() {
        Ok(valid) => {
            let task = state
                .repo
                .add_task(NewTaskData {
                    title: valid.title,
                    complete: valid.complete,
                })
                .await?;
            info!(task_id = task.id, "task created");
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let tasks = state.repo.list_tasks().await?;
            let html = render_list(&state, &tasks, &form, &errors, &[])?;
            Ok(Html(html).into_response())
        }
    }
}

/// GET `/update_task/{id}/`: edit form pre-filled with the task's current
/// values. Unknown ids get a 404 page.
async fn edit_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let task = find_or_404(&state, id).await?;
    let html = render_edit(&state, id, &TaskForm::from_task(&task), &FormErrors::default())?;
    Ok(Html(html))
}

/// POST `/update_task/{id}/`: overwrite title and completion state. The
/// task's creation timestamp and import metadata are untouched.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> Result<Response, WebError> {
    find_or_404(&state, id).await?;

    match form.validate() {
        Ok(valid) => {
            state
                .repo
                .update_task(
                    id,
                    UpdateTaskData {
                        title: valid.title,
                        complete: valid.complete,
                    },
                )
                .await?;
            info!(task_id = id, "task updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let html = render_edit(&state, id, &form, &errors)?;
            Ok(Html(html).into_response())
        }
    }
}

/// GET `/delete_task/{id}/`: confirmation page naming the task.
async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let task = find_or_404(&state, id).await?;
    let html = state.templates.get_template("delete.html")?.render(context! {
        task => task,
        flashes => Vec::<Flash>::new(),
    })?;
    Ok(Html(html))
}

/// POST `/delete_task/{id}/`: remove exactly this task and go back to the
/// list.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, WebError> {
    state.repo.delete_task(id).await?;
    info!(task_id = id, "task deleted");
    Ok(Redirect::to("/"))
}

async fn find_or_404(state: &AppState, id: i64) -> Result<Task, WebError> {
    state
        .repo
        .find_task_by_id(id)
        .await?
        .ok_or_else(|| WebError::NotFound(id.to_string()))
}

fn render_list(
    state: &AppState,
    tasks: &[Task],
    form: &TaskForm,
    errors: &FormErrors,
    flashes: &[Flash],
) -> Result<String, WebError> {
    let html = state.templates.get_template("list.html")?.render(context! {
        tasks => tasks,
        providers => providers::SUPPORTED_PROVIDERS,
        form => context! {
            title => &form.title,
            complete => form.is_complete_checked(),
        },
        errors => errors,
        flashes => flashes,
    })?;
    Ok(html)
}

fn render_edit(
    state: &AppState,
    task_id: i64,
    form: &TaskForm,
    errors: &FormErrors,
) -> Result<String, WebError> {
    let html = state
        .templates
        .get_template("update_task.html")?
        .render(context! {
            task_id => task_id,
            form => context! {
                title => &form.title,
                complete => form.is_complete_checked(),
            },
            errors => errors,
            flashes => Vec::<Flash>::new(),
        })?;
    Ok(html)
}
