use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::domain::entities::config::EngineConfig;
use crate::domain::entities::filter::{AgeRange, FilterIdentity, FilterState, SearchType};
use crate::domain::entities::user::{User, UserId};
use crate::infra::config::settings::{default_settings_path, load_settings};
use crate::infra::http::client::HttpUserSource;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::layout::{
    list_container_style, near_scroll_bottom, root_container_style, row_style, status_color,
    visible_window, ROW_HEIGHT_PX, ROW_OVERSCAN,
};
use crate::ui::state::app_state::{AppState, SharedSession};
use crate::usecase::ports::source::TransportError;
use crate::usecase::services::browse_service::{FetchJob, Outcome};
use crate::usecase::services::export_service::{with_csv_extension, ExportService};
use crate::usecase::services::page_fetcher::PageFetcher;

const IDLE_TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropdownId {
    SearchType,
    Gender,
    AgeRange,
}

#[derive(Clone, Debug, PartialEq)]
struct DropdownOption {
    value: String,
    label: String,
}

impl DropdownOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "(none)".to_string())
}

fn search_type_options() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new(SearchType::All.token(), "All fields"),
        DropdownOption::new(SearchType::FirstName.token(), "First name"),
        DropdownOption::new(SearchType::LastName.token(), "Last name"),
    ]
}

fn gender_options() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("", "Any gender"),
        DropdownOption::new("female", "Female"),
        DropdownOption::new("male", "Male"),
    ]
}

fn age_range_options() -> Vec<DropdownOption> {
    let mut options = vec![DropdownOption::new(AgeRange::Any.token(), "Any age")];
    options.extend(
        AgeRange::BUCKETS
            .iter()
            .map(|bucket| DropdownOption::new(bucket.token(), bucket.token())),
    );
    options
}

#[component]
fn DropdownSelect(
    id: DropdownId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let selected_label = dropdown_label(&options, selected.as_deref());
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{selected_label}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 180px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    let background = if is_selected { "#eef4ff" } else { "transparent" };
                    rsx!(
                        div {
                            style: "padding: 8px 10px; cursor: pointer; background: {background};",
                            onclick: move |_| {
                                on_select.call(value.clone());
                                open_dropdown.set(None);
                            },
                            "{label}"
                        }
                    )
                })}
            }
        }
    }
}

#[component]
fn UserRow(
    user: User,
    selected: bool,
    on_focus: EventHandler<UserId>,
    on_toggle: EventHandler<UserId>,
) -> Element {
    let id = user.id;
    let row = row_style(selected);
    let dot = status_color(user.status);

    rsx! {
        div {
            style: "{row}",
            onclick: move |_| on_focus.call(id),
            input {
                r#type: "checkbox",
                checked: selected,
                onclick: move |event| {
                    event.stop_propagation();
                    on_toggle.call(id);
                }
            }
            img {
                src: "{user.image}",
                width: "36",
                height: "36",
                style: "border-radius: 50%; background: #eee;",
            }
            div {
                style: "display: flex; flex-direction: column; flex: 1; min-width: 0;",
                span { style: "font-weight: 600;", "{user.name}" }
                span { style: "color: #666; font-size: 12px;", "{user.email}" }
            }
            span { style: "color: #666; font-size: 12px; width: 120px;", "{user.department}" }
            span {
                style: "display: inline-block; width: 10px; height: 10px; border-radius: 50%; background: {dot};",
                title: "{user.status.label()}",
            }
        }
    }
}

#[component]
fn DetailPane(user: Option<User>, on_close: EventHandler<()>) -> Element {
    let Some(user) = user else {
        return rsx! {
            div {
                style: "width: 280px; padding: 12px; color: #888;",
                "Select a user to see details"
            }
        };
    };
    let dot = status_color(user.status);

    rsx! {
        div {
            style: "width: 280px; padding: 12px; border-left: 1px solid #ddd; display: flex; flex-direction: column; gap: 8px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                strong { "{user.name}" }
                button { onclick: move |_| on_close.call(()), "✕" }
            }
            img { src: "{user.image}", width: "96", height: "96", style: "border-radius: 8px;" }
            span { "Email: {user.email}" }
            span { "Age: {user.age}" }
            span { "Gender: {user.gender}" }
            span { "Role: {user.role}" }
            span { "Department: {user.department}" }
            span {
                "Status: "
                span { style: "color: {dot};", "{user.status.label()}" }
            }
        }
    }
}

#[derive(Clone)]
struct Runtime {
    config: EngineConfig,
    fetcher: Arc<PageFetcher>,
}

fn build_runtime() -> Result<Runtime, String> {
    let settings_path = default_settings_path().map_err(|err| format!("{err:#}"))?;
    let config = load_settings(&settings_path).map_err(|err| format!("{err:#}"))?;
    let source = HttpUserSource::new(&config.base_url, config.request_timeout())
        .map_err(|err| format!("{err:#}"))?;
    Ok(Runtime {
        config,
        fetcher: Arc::new(PageFetcher::new(Arc::new(source))),
    })
}

fn bump(mut revision: Signal<u64>) {
    *revision.write() += 1;
}

fn committed_query(session: &SharedSession) -> String {
    session.borrow().filter().identity.search_query.clone()
}

fn apply_filter(
    session: &SharedSession,
    query: &str,
    search_type: SearchType,
    gender: &str,
    age_range: AgeRange,
    revision: Signal<u64>,
) {
    let filter = FilterState::new(FilterIdentity::new(query, search_type, gender), age_range);
    session.borrow_mut().on_filter_change(filter, Instant::now());
    bump(revision);
}

/// Dispatches each due fetch on its own task. The scheduler hands out at
/// most one ticket per filter session; results of superseded sessions are
/// dropped by `complete`.
async fn drive_fetches(
    session: SharedSession,
    fetcher: Arc<PageFetcher>,
    revision: Signal<u64>,
    status: Signal<String>,
) {
    loop {
        let now = Instant::now();
        let before = session.borrow().scheduler_state();
        let job = session.borrow_mut().poll(now);
        if session.borrow().scheduler_state() != before {
            bump(revision);
        }

        match job {
            Some(job) => {
                spawn(run_job(
                    session.clone(),
                    fetcher.clone(),
                    job,
                    revision,
                    status,
                ));
            }
            None => {
                let wait = session
                    .borrow()
                    .next_wakeup()
                    .map(|at| at.saturating_duration_since(now))
                    .unwrap_or(IDLE_TICK)
                    .min(IDLE_TICK);
                tokio::time::sleep(wait).await;
            }
        }
    }
}

async fn run_job(
    session: SharedSession,
    fetcher: Arc<PageFetcher>,
    job: FetchJob,
    revision: Signal<u64>,
    mut status: Signal<String>,
) {
    let ticket = job.ticket;
    let result: Result<_, TransportError> = run_blocking(move || job.run(&fetcher)).await;
    let outcome = session
        .borrow_mut()
        .complete(ticket, result, Instant::now());
    match outcome {
        Outcome::Applied { returned } => {
            let total = session.borrow().total_loaded();
            *status.write() = format!("Loaded {returned} more users ({total} total)");
        }
        Outcome::Failed(err) => {
            *status.write() = format!("Failed to load users: {err}");
        }
        Outcome::Discarded => {}
    }
    bump(revision);
}

struct ViewSnapshot {
    rows: Vec<(User, bool)>,
    spacer_top: f64,
    spacer_bottom: f64,
    visible_count: usize,
    total_loaded: usize,
    reported_total: usize,
    fetching: bool,
    has_more: bool,
    error: Option<String>,
    selected_count: usize,
    focused: Option<User>,
}

fn snapshot(session: &SharedSession, scroll_top: f64, viewport_height: f64) -> ViewSnapshot {
    let view = session.borrow();
    let visible = view.visible_records();
    let window = visible_window(
        scroll_top,
        viewport_height,
        ROW_HEIGHT_PX,
        visible.len(),
        ROW_OVERSCAN,
    );
    let rows = visible[window.clone()]
        .iter()
        .map(|user| (user.clone(), view.is_selected(user.id)))
        .collect();
    ViewSnapshot {
        rows,
        spacer_top: window.start as f64 * ROW_HEIGHT_PX,
        spacer_bottom: (visible.len() - window.end) as f64 * ROW_HEIGHT_PX,
        visible_count: visible.len(),
        total_loaded: view.total_loaded(),
        reported_total: view.reported_total(),
        fetching: view.is_fetching(),
        has_more: view.has_more(),
        error: view.last_error().map(|err| err.to_string()),
        selected_count: view.selection_len(),
        focused: view.focused().cloned(),
    }
}

#[component]
pub fn App() -> Element {
    let runtime = match use_hook(build_runtime) {
        Ok(runtime) => runtime,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to start the user directory: {err}" }
                }
            };
        }
    };
    let Runtime { config, fetcher } = runtime;

    let AppState {
        session,
        search_debounce,
        revision,
        mut search_input,
        mut search_type,
        mut gender,
        mut age_range,
        mut scroll_top,
        mut viewport_height,
        mut status,
    } = AppState::new(&config);
    let mut open_dropdown = use_signal(|| None::<DropdownId>);
    let dropdown_pos = use_signal(|| None::<(f64, f64)>);
    let export_service = use_hook(|| Rc::new(ExportService::new()));
    let threshold = f64::from(config.scroll_threshold_px);

    let driver_session = session.clone();
    use_future(move || drive_fetches(driver_session.clone(), fetcher.clone(), revision, status));

    let drop_session = session.clone();
    let drop_debounce = search_debounce.clone();
    use_drop(move || {
        drop_debounce.borrow_mut().cancel();
        drop_session.borrow_mut().teardown();
    });

    let focus_session = session.clone();
    let on_focus = use_callback(move |id: UserId| {
        focus_session.borrow_mut().focus(id);
        bump(revision);
    });
    let toggle_session = session.clone();
    let on_toggle = use_callback(move |id: UserId| {
        toggle_session.borrow_mut().toggle_selected(id);
        bump(revision);
    });
    let close_session = session.clone();
    let on_close_detail = use_callback(move |_: ()| {
        close_session.borrow_mut().clear_focus();
        bump(revision);
    });

    let _ = revision();
    let view = snapshot(&session, scroll_top(), viewport_height());
    let status_text = status();
    let fetching_label = if search_debounce.borrow().is_pending() {
        " · waiting for input…"
    } else if view.fetching {
        " · fetching…"
    } else {
        ""
    };
    let more_label = if view.has_more { "" } else { " · end of results" };

    rsx! {
        div {
            style: root_container_style(),
            onclick: move |_| open_dropdown.set(None),

            div {
                style: "display: flex; gap: 12px; align-items: center; margin-bottom: 12px; flex-wrap: wrap;",
                input {
                    placeholder: "Search users",
                    value: search_input(),
                    oninput: {
                        let session = session.clone();
                        let search_debounce = search_debounce.clone();
                        move |event: FormEvent| {
                            let value = event.value();
                            search_input.set(value.clone());
                            let ticket = search_debounce.borrow_mut().push(value, Instant::now());
                            let wait = search_debounce
                                .borrow()
                                .deadline()
                                .map(|at| at.saturating_duration_since(Instant::now()))
                                .unwrap_or_default();
                            let session = session.clone();
                            let search_debounce = search_debounce.clone();
                            spawn(async move {
                                tokio::time::sleep(wait).await;
                                let fired = search_debounce.borrow_mut().fire(ticket, Instant::now());
                                if let Some(query) = fired {
                                    apply_filter(&session, &query, search_type(), &gender(), age_range(), revision);
                                }
                            });
                        }
                    },
                    onkeydown: {
                        let session = session.clone();
                        let search_debounce = search_debounce.clone();
                        move |event: KeyboardEvent| {
                            if event.key() == Key::Enter {
                                let query = search_debounce
                                    .borrow_mut()
                                    .flush()
                                    .unwrap_or_else(|| search_input());
                                apply_filter(&session, &query, search_type(), &gender(), age_range(), revision);
                            }
                        }
                    },
                }
                DropdownSelect {
                    id: DropdownId::SearchType,
                    label: "Search in",
                    options: search_type_options(),
                    selected: Some(search_type().token().to_string()),
                    open_dropdown,
                    dropdown_pos,
                    on_select: {
                        let session = session.clone();
                        move |value: String| {
                            let next = SearchType::from_token(&value);
                            search_type.set(next);
                            apply_filter(&session, &committed_query(&session), next, &gender(), age_range(), revision);
                        }
                    },
                }
                DropdownSelect {
                    id: DropdownId::Gender,
                    label: "Gender",
                    options: gender_options(),
                    selected: Some(gender()),
                    open_dropdown,
                    dropdown_pos,
                    on_select: {
                        let session = session.clone();
                        move |value: String| {
                            gender.set(value.clone());
                            apply_filter(&session, &committed_query(&session), search_type(), &value, age_range(), revision);
                        }
                    },
                }
                DropdownSelect {
                    id: DropdownId::AgeRange,
                    label: "Age",
                    options: age_range_options(),
                    selected: Some(age_range().token().to_string()),
                    open_dropdown,
                    dropdown_pos,
                    on_select: {
                        let session = session.clone();
                        move |value: String| {
                            let next = AgeRange::from_token(&value);
                            age_range.set(next);
                            apply_filter(&session, &committed_query(&session), search_type(), &gender(), next, revision);
                        }
                    },
                }
            }

            if let Some(error) = view.error.clone() {
                div {
                    style: "display: flex; gap: 12px; align-items: center; padding: 8px; margin-bottom: 8px; background: #fdecea; border-radius: 6px;",
                    span { "{error}" }
                    button {
                        onclick: {
                            let session = session.clone();
                            move |_| {
                                session.borrow_mut().retry(Instant::now());
                                bump(revision);
                            }
                        },
                        "Retry"
                    }
                }
            }

            div {
                style: "display: flex; flex: 1; min-height: 0;",
                div {
                    style: list_container_style(),
                    onscroll: {
                        let session = session.clone();
                        move |event: ScrollEvent| {
                            let data = event.data();
                            let top = data.scroll_top() as f64;
                            let client = data.client_height() as f64;
                            scroll_top.set(top);
                            viewport_height.set(client);
                            if near_scroll_bottom(top, data.scroll_height() as f64, client, threshold) {
                                session.borrow_mut().on_request_more(Instant::now());
                                bump(revision);
                            }
                        }
                    },
                    div { style: "height: {view.spacer_top}px;" }
                    {view.rows.iter().map(|(user, selected)| {
                        rsx!(
                            UserRow {
                                key: "{user.id}",
                                user: user.clone(),
                                selected: *selected,
                                on_focus,
                                on_toggle,
                            }
                        )
                    })}
                    div { style: "height: {view.spacer_bottom}px;" }
                    if view.has_more && !view.fetching {
                        div {
                            style: "padding: 12px; text-align: center;",
                            button {
                                onclick: {
                                    let session = session.clone();
                                    move |_| {
                                        session.borrow_mut().on_request_more(Instant::now());
                                        bump(revision);
                                    }
                                },
                                "Load more"
                            }
                        }
                    }
                }
                DetailPane { user: view.focused.clone(), on_close: on_close_detail }
            }

            if view.selected_count > 0 {
                div {
                    style: "position: fixed; right: 24px; bottom: 48px; display: flex; gap: 8px; align-items: center; padding: 8px 14px; background: #1e3a8a; color: #fff; border-radius: 20px; box-shadow: 0 6px 16px rgba(0,0,0,0.2);",
                    span { "{view.selected_count} selected" }
                    button {
                        onclick: {
                            let session = session.clone();
                            move |_| {
                                session.borrow_mut().clear_selection();
                                bump(revision);
                            }
                        },
                        "Clear"
                    }
                    button {
                        onclick: {
                            let session = session.clone();
                            let export_service = export_service.clone();
                            move |_| {
                                let Some(path) = FileDialog::new()
                                    .add_filter("CSV", &["csv"])
                                    .set_file_name(export_service.default_file_name())
                                    .save_file()
                                else {
                                    return;
                                };
                                let path = with_csv_extension(path);
                                let result = export_service.export_selection(&session.borrow(), &path);
                                match result {
                                    Ok(written) => {
                                        *status.write() = format!("Exported {written} users to {}", path.display());
                                    }
                                    Err(err) => {
                                        MessageDialog::new()
                                            .set_level(MessageLevel::Error)
                                            .set_title("Export failed")
                                            .set_description(format!("{err:#}"))
                                            .set_buttons(MessageButtons::Ok)
                                            .show();
                                    }
                                }
                            }
                        },
                        "Export CSV"
                    }
                }
            }

            div {
                style: "margin-top: 8px; color: #555; font-size: 13px;",
                "{view.visible_count} shown · {view.total_loaded} loaded of {view.reported_total} matching{fetching_label}{more_label} · {status_text}"
            }
        }
    }
}
