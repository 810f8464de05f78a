//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, RenderStats, WarningType};
use crate::models::ReplayResponse;

/// Prints a simple one-line summary of the render.
///
/// This provides immediate feedback to the user in a concise format.
/// Works with both plain and JSON log formats (log::info! handles formatting).
pub fn print_render_summary(response: &ReplayResponse, elapsed_seconds: f64) {
    info!(
        "✅ Rendered {} byte{} (status {}, charset {}{}, {} unresolvable reference{}) in {:.1}s",
        response.body.len(),
        if response.body.len() == 1 { "" } else { "s" },
        response.status_code,
        response.detected_charset,
        if response.charset_was_fallback {
            " (assumed)"
        } else {
            ""
        },
        response.unresolvable_references,
        if response.unresolvable_references == 1 {
            ""
        } else {
            "s"
        },
        elapsed_seconds
    );
}

/// Prints error, warning, and info statistics to the log.
///
/// This function is used internally and in tests.
pub fn print_render_statistics(stats: &RenderStats) {
    let total_errors = stats.total_errors();
    let total_warnings = stats.total_warnings();
    let total_info = stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
