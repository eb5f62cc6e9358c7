mod app;

mod domain {
    pub mod entities {
        pub mod config;
        pub mod filter;
        pub mod page;
        pub mod user;
    }
}

mod infra {
    pub mod config {
        pub mod settings;
    }
    pub mod export {
        pub mod csv;
    }
    pub mod http {
        pub mod client;
        pub mod envelope;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod layout;
    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod source;
    }
    pub mod services {
        pub mod browse_service;
        pub mod cursor_policy;
        pub mod debounce;
        pub mod export_service;
        pub mod filter_engine;
        pub mod page_cache;
        pub mod page_fetcher;
        pub mod scheduler;
    }
}


use infra::config::settings::default_webview_data_dir;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("User Directory"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
