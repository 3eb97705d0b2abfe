use crate::dates::{date_range, today_at_midnight, DateParse};
use crate::errors::{AppError, StoreError};
use crate::models::{AddDrillForm, AddDrillView, CompleteForm, Completion, Drill, DrillId, HomeQuery, HomeView};
use crate::state::AppState;
use crate::storage::DrillStore;
use crate::ui::{render_add_drill, render_home};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{debug, info};
use url::form_urlencoded;

pub const HOME_TITLE: &str = "Daily Drill - Home";
pub const ADD_DRILL_TITLE: &str = "Daily Drill - Add Drill";

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let query = HomeQuery::from_params(&params);
    let view = build_home_view(state.store.as_ref(), query.date.as_deref()).await?;
    Ok(Html(render_home(&view)))
}

pub async fn add_drill_form() -> Html<String> {
    Html(render_add_drill(&AddDrillView {
        title: ADD_DRILL_TITLE,
        selected_date: today_at_midnight(),
    }))
}

pub async fn add_drill(
    State(state): State<AppState>,
    Form(params): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = AddDrillForm::from_params(&params);
    // A missing field is handled like an empty one.
    let name = form.drill.as_deref().unwrap_or_default().trim();
    if name.is_empty() {
        debug!("ignoring blank drill name");
    } else {
        let drill = Drill::new(name, today_at_midnight());
        state.store.insert_drill(&drill).await?;
        info!(id = %drill.id, name = %drill.name, "drill added");
    }

    Ok(found("/"))
}

pub async fn complete(
    State(state): State<AppState>,
    Form(params): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = CompleteForm::from_params(&params);
    let raw_date = form.date.as_deref();
    match DateParse::parse(raw_date).normalized() {
        Some(date) => match form.drillid.filter(|id| !id.is_empty()) {
            Some(id) => {
                let completion = Completion {
                    date,
                    drill: DrillId::from(id),
                };
                state.store.insert_completion(&completion).await?;
                info!(drill = %completion.drill, date = %completion.date.date(), "completion recorded");
            }
            None => debug!("no drill id submitted, nothing recorded"),
        },
        None => debug!(date = ?raw_date, "unusable completion date, nothing recorded"),
    }

    Ok(found(&home_location(raw_date)))
}

/// Gathers everything the home page shows for the requested day.
pub async fn build_home_view(
    store: &dyn DrillStore,
    raw_date: Option<&str>,
) -> Result<HomeView, StoreError> {
    let parsed = DateParse::parse(raw_date);
    let selected_date = match parsed.normalized() {
        Some(date) => date,
        None => {
            debug!(outcome = ?parsed, "showing today instead of requested date");
            today_at_midnight()
        }
    };

    let drills = store.drills_added_through(selected_date).await?;
    let completions = store
        .completions_on(selected_date)
        .await?
        .into_iter()
        .map(|completion| completion.drill)
        .collect();

    Ok(HomeView {
        title: HOME_TITLE,
        selected_date,
        drills,
        completions,
        date_range: date_range(selected_date.date()),
    })
}

/// Home page URL carrying the submitted date string through untouched.
pub fn home_location(raw_date: Option<&str>) -> String {
    match raw_date {
        Some(date) => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("date", date)
                .finish();
            format!("/?{query}")
        }
        None => "/".to_string(),
    }
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
