/// The notification surface the orchestrator drives. The implementation is
/// the only state shared between the foreground thread and the download
/// worker, so every method must be callable from either.
pub trait UiBridge: Send + Sync {
    fn disable_controls(&self);
    fn enable_controls(&self);

    /// Overwrite-latest progress slot; each call replaces the previous text.
    fn set_status_text(&self, text: &str);

    fn show_info(&self, title: &str, message: &str);
    fn show_warning(&self, title: &str, message: &str);
    fn show_error(&self, title: &str, message: &str);

    /// Offer the formatted variant labels for selection. The selection comes
    /// back asynchronously through a fresh `Orchestrator::start` call.
    fn present_variant_choices(&self, labels: &[String]);
    fn hide_variant_choices(&self);
}
