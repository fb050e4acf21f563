mod config;
mod domain;
mod infra;
mod table;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

fn main() {
    let webview_data_dir = config::default_webview_data_dir()
        .expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("SiteDesk"))
                .with_data_directory(webview_data_dir),
        )
        .launch(ui::app::App);
}
