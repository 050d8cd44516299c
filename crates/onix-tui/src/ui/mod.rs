//! Rendering of the dashboard.

mod apps;
mod detail;
mod render;

pub use render::render;

use ratatui::style::Color;

use onix_core::{AppRunningStatus, ColorHint, Severity};
use onix_tui_components::Theme;

/// Color an action is drawn with.
fn hint_color(hint: ColorHint, theme: &Theme) -> Color {
    match hint {
        ColorHint::Neutral => Color::Gray,
        ColorHint::Blue => theme.info,
        ColorHint::Yellow => theme.warning,
        ColorHint::Red => theme.error,
    }
}

/// Color of an application status.
fn status_color(status: AppRunningStatus, theme: &Theme) -> Color {
    if status.is_degraded() {
        theme.error
    } else if status == AppRunningStatus::FullyRunning {
        theme.success
    } else if status.is_running() || status == AppRunningStatus::Intermediary {
        theme.warning
    } else {
        theme.muted
    }
}

fn severity_color(severity: Severity, theme: &Theme) -> Color {
    match severity {
        Severity::Info => theme.info,
        Severity::Success => theme.success,
        Severity::Warning => theme.warning,
        Severity::Error => theme.error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        let theme = Theme::default();
        let color = |status| status_color(status, &theme);

        assert_eq!(color(AppRunningStatus::FullyRunning), theme.success);
        assert_eq!(color(AppRunningStatus::PartiallyRunning), theme.warning);
        assert_eq!(color(AppRunningStatus::Intermediary), theme.warning);
        assert_eq!(color(AppRunningStatus::Zombie), theme.error);
        assert_eq!(color(AppRunningStatus::PartiallyCreated), theme.error);
        assert_eq!(color(AppRunningStatus::Stopped), theme.muted);
        assert_eq!(color(AppRunningStatus::NotCreated), theme.muted);
    }
}
