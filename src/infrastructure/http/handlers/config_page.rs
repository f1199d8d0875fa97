//! Config Page Handlers - 首页与自选股配置

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::sync::Arc;

use crate::application::{GetStockListQuery, UpdateStockListCommand};
use crate::infrastructure::http::dto::UpdateForm;
use crate::infrastructure::http::state::AppState;

fn page_failure(state: &AppState, message: String) -> Response {
    tracing::error!(error = %message, "Config page failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(state.pages.error_page(StatusCode::INTERNAL_SERVER_ERROR, &message)),
    )
        .into_response()
}

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let view = match state.get_stock_list_handler.handle(GetStockListQuery) {
        Ok(view) => view,
        Err(e) => return page_failure(&state, e.to_string()),
    };

    match state
        .pages
        .config_page(&view.stock_list, &view.env_filename, None)
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => page_failure(&state, e.to_string()),
    }
}

/// POST /update
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UpdateForm>,
) -> Response {
    let result = match state.update_stock_list_handler.handle(UpdateStockListCommand {
        stock_list: form.stock_list,
    }) {
        Ok(result) => result,
        Err(e) => return page_failure(&state, e.to_string()),
    };

    match state
        .pages
        .config_page(&result.stock_list, &result.env_filename, Some("已保存"))
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => page_failure(&state, e.to_string()),
    }
}
