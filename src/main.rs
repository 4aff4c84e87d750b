mod app;
mod application;
mod config;
mod domain;
mod downloader;
mod ui;
mod utils;

use iced::window;

fn main() -> iced::Result {
    env_logger::init();

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("M3U8 Downloader")
        .subscription(app::subscription)
        .window(window::Settings {
            // Close requests go through the download-in-progress guard.
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}
