//! Spinner shown while a manifest is read from disk

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Start a spinner naming the manifest file being read
pub fn loading_spinner(path: &Path) -> ProgressBar {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS),
    );
    pb.set_message(format!("Reading manifest {}...", name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish the loading spinner with a message for the number of passengers read.
///
/// An empty manifest finishes with a warning, since every aggregation will
/// refuse it.
pub fn finish_loading(pb: &ProgressBar, passengers: usize) -> String {
    let message = match passengers {
        0 => "⚠️  Manifest has no passengers".to_string(),
        1 => "✅ Loaded 1 passenger".to_string(),
        n => format!("✅ Loaded {} passengers", n),
    };
    pb.finish_with_message(message.clone());
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_messages() {
        let pb = ProgressBar::hidden();
        assert!(finish_loading(&pb, 0).contains("no passengers"));

        let pb = ProgressBar::hidden();
        assert_eq!(finish_loading(&pb, 1), "✅ Loaded 1 passenger");

        let pb = ProgressBar::hidden();
        assert!(finish_loading(&pb, 891).ends_with("891 passengers"));
        assert!(pb.is_finished());
    }
}
