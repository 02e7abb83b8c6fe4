//! Status snapshots and the plain-text status report
//!
//! Diagnostics read the registry through copied snapshots, never through
//! live references: the engine copies the interesting fields out under the
//! registry lock, then the report is formatted with no lock held.

use crate::config::{Config, FullscreenMode};
use crate::device::{FilterMode, SwapchainHandle};
use std::fmt::Write;

/// Copied state of one registered swapchain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapchainSnapshot {
    pub handle: SwapchainHandle,
    pub original_width: u32,
    pub original_height: u32,
    pub actual_width: u32,
    pub actual_height: u32,
    pub override_active: bool,
    pub back_buffer_count: usize,
}

fn filter_name(filter: FilterMode) -> &'static str {
    match filter {
        FilterMode::Point => "Point",
        FilterMode::Linear => "Linear",
        FilterMode::Anisotropic => "Anisotropic",
    }
}

fn fullscreen_mode_name(mode: FullscreenMode) -> &'static str {
    match mode {
        FullscreenMode::Unchanged => "Unchanged",
        FullscreenMode::Borderless => "Borderless",
        FullscreenMode::Exclusive => "Exclusive",
    }
}

/// Format the configuration and swapchain state as a plain-text report
pub fn format_status_report(config: &Config, snapshots: &[SwapchainSnapshot]) -> String {
    let mut report = String::new();

    report.push_str("Configuration:\n");
    if config.is_override_enabled() {
        let _ = writeln!(
            report,
            "  Resolution Override: {}x{}",
            config.force_width, config.force_height
        );
    } else {
        report.push_str("  Resolution Override: Disabled\n");
    }
    let _ = writeln!(report, "  Scaling Filter: {}", filter_name(config.scaling_filter));
    let _ = writeln!(
        report,
        "  Fullscreen Mode: {}",
        fullscreen_mode_name(config.fullscreen_mode)
    );
    if config.fullscreen_mode == FullscreenMode::Unchanged {
        let _ = writeln!(
            report,
            "  Block Fullscreen Changes: {}",
            if config.block_fullscreen_changes { "Yes" } else { "No" }
        );
    }
    let _ = writeln!(
        report,
        "  Target Monitor: {}",
        if config.target_monitor == 0 {
            "Primary".to_string()
        } else {
            format!("Secondary {}", config.target_monitor)
        }
    );

    report.push_str("\nActive Swapchains:\n");
    if snapshots.is_empty() {
        report.push_str("  No active swapchains\n");
    } else {
        for snapshot in snapshots {
            let _ = writeln!(report, "  Swapchain 0x{:X}:", snapshot.handle.0);
            let _ = writeln!(
                report,
                "    Requested: {}x{}",
                snapshot.original_width, snapshot.original_height
            );
            let _ = writeln!(
                report,
                "    Actual: {}x{} ({} back buffers)",
                snapshot.actual_width, snapshot.actual_height, snapshot.back_buffer_count
            );
            let _ = writeln!(
                report,
                "    Override: {}",
                if snapshot.override_active { "Active" } else { "Inactive" }
            );
        }
    }

    report
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
