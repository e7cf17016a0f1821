//! Browser-side behaviour for the training guide pages: the quiz widget,
//! keyboard page navigation and the classic/modern theme toggle.

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod nav;
pub mod page;
pub mod quiz;
pub mod theme;

use config::GuideConfig;
use quiz::QuizWidget;
use theme::ThemeController;

pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = GuideConfig::from_document(&document);
    wasm_logger::init(wasm_logger::Config::new(config.log_level));

    let theme = ThemeController::new(document.clone(), &config);
    // Apply before first paint when <body> already exists; again once parsed.
    if document.body().is_some() {
        theme.apply_current();
    }
    theme.export(&window);
    page::export_scroll(&window);

    dom::on_ready(&document, move |document| {
        theme.apply_current();
        theme.ensure_toggle();

        if let Some(widget) = QuizWidget::attach(&document, &config) {
            page::export_submit(&window, widget);
        }

        nav::bind(&document);
        log::debug!("training guide ready");
    });
}
