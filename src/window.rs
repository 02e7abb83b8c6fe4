//! Borderless window emulation helpers
//!
//! The Win32 window-procedure hooking itself is the host's job; this module
//! holds the pure decision logic behind it: which monitor rectangle a
//! borderless window should cover, and the style transforms that strip
//! decorations. Styles are modeled with bitflags over the Win32 constants.

use crate::config::Config;
use crate::device::Rect2D;
use crate::engine_warn;
use bitflags::bitflags;

const LOG_SOURCE: &str = "override::window";

bitflags! {
    /// Win32 window styles (GWL_STYLE subset)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowStyle: u32 {
        const WS_MAXIMIZEBOX  = 0x0001_0000;
        const WS_MINIMIZEBOX  = 0x0002_0000;
        const WS_THICKFRAME   = 0x0004_0000;
        const WS_SYSMENU      = 0x0008_0000;
        const WS_DLGFRAME     = 0x0040_0000;
        const WS_BORDER       = 0x0080_0000;
        const WS_CAPTION      = Self::WS_BORDER.bits() | Self::WS_DLGFRAME.bits();
        const WS_VISIBLE      = 0x1000_0000;
        const WS_POPUP        = 0x8000_0000;
        /// WS_OVERLAPPEDWINDOW: caption, sysmenu, thickframe, min/max boxes
        const WS_OVERLAPPEDWINDOW = Self::WS_CAPTION.bits()
            | Self::WS_SYSMENU.bits()
            | Self::WS_THICKFRAME.bits()
            | Self::WS_MINIMIZEBOX.bits()
            | Self::WS_MAXIMIZEBOX.bits();
    }
}

bitflags! {
    /// Win32 extended window styles (GWL_EXSTYLE subset)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowExStyle: u32 {
        const WS_EX_DLGMODALFRAME = 0x0000_0001;
        const WS_EX_WINDOWEDGE    = 0x0000_0100;
        const WS_EX_CLIENTEDGE    = 0x0000_0200;
    }
}

/// Monitor geometry provider
///
/// The host implements this over EnumDisplayMonitors/GetMonitorInfo; tests
/// implement it over fixed rectangles. Index 1 is the first enumerated
/// secondary monitor.
pub trait MonitorLayout {
    /// Rectangle of the primary monitor
    fn primary_monitor_rect(&self) -> Rect2D;

    /// Rectangle of the Nth enumerated monitor, if it exists
    fn monitor_rect(&self, index: u32) -> Option<Rect2D>;
}

/// Rectangle a borderless window should cover for the configured monitor
///
/// Falls back to the primary monitor with a warning when the configured
/// target does not exist.
pub fn target_monitor_rect(layout: &dyn MonitorLayout, config: &Config) -> Rect2D {
    if config.target_monitor == 0 {
        return layout.primary_monitor_rect();
    }
    match layout.monitor_rect(config.target_monitor) {
        Some(rect) => rect,
        None => {
            engine_warn!(
                LOG_SOURCE,
                "Target monitor {} not found, using primary monitor",
                config.target_monitor
            );
            layout.primary_monitor_rect()
        }
    }
}

/// Strip decorations from a window style for borderless fullscreen
///
/// Removes the overlapped-window chrome and forces a visible popup.
pub fn borderless_style(style: WindowStyle) -> WindowStyle {
    (style - WindowStyle::WS_OVERLAPPEDWINDOW) | WindowStyle::WS_POPUP | WindowStyle::WS_VISIBLE
}

/// Strip edge decorations from an extended window style
pub fn borderless_ex_style(ex_style: WindowExStyle) -> WindowExStyle {
    ex_style
        - (WindowExStyle::WS_EX_WINDOWEDGE
            | WindowExStyle::WS_EX_CLIENTEDGE
            | WindowExStyle::WS_EX_DLGMODALFRAME)
}

/// Placement a borderless window gets instead of whatever was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlacement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub style: WindowStyle,
    pub ex_style: WindowExStyle,
}

/// Full borderless transform: target monitor rectangle plus stripped styles
pub fn borderless_placement(
    layout: &dyn MonitorLayout,
    config: &Config,
    style: WindowStyle,
    ex_style: WindowExStyle,
) -> WindowPlacement {
    let rect = target_monitor_rect(layout, config);
    WindowPlacement {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        style: borderless_style(style),
        ex_style: borderless_ex_style(ex_style),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
