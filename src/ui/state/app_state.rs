use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::{use_hook, use_signal, Signal};

use crate::domain::entities::config::EngineConfig;
use crate::domain::entities::filter::{AgeRange, FilterState, SearchType};
use crate::usecase::services::browse_service::BrowseSession;
use crate::usecase::services::debounce::Debouncer;

pub type SharedSession = Rc<RefCell<BrowseSession>>;
pub type SharedDebouncer = Rc<RefCell<Debouncer<String>>>;

/// The session lives outside the signal graph; `revision` is bumped
/// whenever it changes so the view re-renders.
pub struct AppState {
    pub session: SharedSession,
    pub search_debounce: SharedDebouncer,
    pub revision: Signal<u64>,
    pub search_input: Signal<String>,
    pub search_type: Signal<SearchType>,
    pub gender: Signal<String>,
    pub age_range: Signal<AgeRange>,
    pub scroll_top: Signal<f64>,
    pub viewport_height: Signal<f64>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(config: &EngineConfig) -> Self {
        let session_config = config.clone();
        let debounce_delay = config.search_debounce();
        Self {
            session: use_hook(move || {
                Rc::new(RefCell::new(BrowseSession::new(
                    &session_config,
                    FilterState::default(),
                )))
            }),
            search_debounce: use_hook(move || Rc::new(RefCell::new(Debouncer::new(debounce_delay)))),
            revision: use_signal(|| 0_u64),
            search_input: use_signal(String::new),
            search_type: use_signal(SearchType::default),
            gender: use_signal(String::new),
            age_range: use_signal(AgeRange::default),
            scroll_top: use_signal(|| 0.0_f64),
            viewport_height: use_signal(|| 600.0_f64),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
