pub mod bridge;

use iced::{
    widget::{button, checkbox, column, pick_list, text, text_input, Space},
    Element, Length,
};

use bridge::Dialog;

/// Main view state
pub struct DownloadView {
    pub input_url: String,
    pub output_path: String,
    pub skip_ssl: bool,
    pub variant_labels: Option<Vec<String>>,
    pub selected_variant: Option<String>,
    pub status_text: String,
    pub controls_enabled: bool,
    pub dialog: Option<Dialog>,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            input_url: String::new(),
            output_path: String::new(),
            skip_ssl: false,
            variant_labels: None,
            selected_variant: None,
            status_text: String::new(),
            controls_enabled: true,
            dialog: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    InputUrlChanged(String),
    OutputPathChanged(String),
    SkipSslToggled(bool),
    VariantSelected(String),
    DownloadPressed,
    DialogDismissed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::InputUrlChanged(url) => {
                self.input_url = url;
            }
            DownloadMessage::OutputPathChanged(path) => {
                self.output_path = path;
            }
            DownloadMessage::SkipSslToggled(skip) => {
                self.skip_ssl = skip;
            }
            DownloadMessage::VariantSelected(label) => {
                self.selected_variant = Some(label);
            }
            DownloadMessage::DialogDismissed => {
                self.dialog = None;
            }
            DownloadMessage::DownloadPressed => {
                // Handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let active = self.controls_enabled && self.dialog.is_none();

        let mut content = column![
            text("M3U8 Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Input URL (.m3u8):").size(16),
            text_input("https://example.com/playlist.m3u8", &self.input_url)
                .on_input_maybe(active.then_some(DownloadMessage::InputUrlChanged))
                .padding(10),
            text("Output File (.mp4):").size(16),
            text_input("output.mp4", &self.output_path)
                .on_input_maybe(active.then_some(DownloadMessage::OutputPathChanged))
                .padding(10),
            checkbox(self.skip_ssl)
                .label("Skip SSL Verification")
                .on_toggle_maybe(active.then_some(DownloadMessage::SkipSslToggled)),
        ]
        .padding(20)
        .spacing(10);

        if let Some(labels) = &self.variant_labels {
            content = content.push(text("Variants:").size(16));
            content = content.push(pick_list(
                labels.clone(),
                self.selected_variant.clone(),
                DownloadMessage::VariantSelected,
            ));
        }

        content = content.push(Space::new().height(Length::Fixed(10.0)));
        content = content.push(
            button("Download")
                .on_press_maybe(active.then_some(DownloadMessage::DownloadPressed))
                .padding([10, 20]),
        );
        content = content.push(text(&self.status_text).size(14));

        if let Some(dialog) = &self.dialog {
            content = content.push(Space::new().height(Length::Fixed(20.0)));
            content = content.push(text(&dialog.title).size(18));
            content = content.push(text(&dialog.message).size(14));
            content = content.push(
                button("OK")
                    .on_press(DownloadMessage::DialogDismissed)
                    .padding([10, 20]),
            );
        }

        content.into()
    }
}
