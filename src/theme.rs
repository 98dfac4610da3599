//! Colours, spacing and touch-target sizes shared by every screen, plus the
//! badge colour for each status value.

use crate::models::{
    court::CourtStatus,
    lesson::LessonRequestStatus,
    payment::PaymentStatus,
    student::SkillLevel,
    subscription::SubscriptionStatus,
};
use crate::services::notifications::NotificationKind;

/// Hex colours (`#RRGGBB`).
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_dark: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub neutral: &'static str,
}

pub const COLORS: Palette = Palette {
    primary: "#1B5E20",      // court green
    primary_dark: "#0D3B12",
    accent: "#C6E03A",       // ball yellow
    background: "#F6F8F5",
    surface: "#FFFFFF",
    text: "#1C1F1A",
    text_muted: "#6B7368",
    border: "#DDE3D9",
    success: "#2E7D32",
    warning: "#F9A825",
    error: "#C62828",
    info: "#1565C0",
    neutral: "#9E9E9E",
};

/// Spacing scale in density-independent pixels.
pub mod spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

/// Minimum touch target, in dp.
pub const TOUCH_TARGET: f32 = 48.0;
pub const BORDER_RADIUS: f32 = 12.0;
pub const SNACKBAR_DURATION_MS: u64 = 4000;

/// Badge colour for a status-like value.
pub trait StatusColor {
    fn color(&self) -> &'static str;
}

impl StatusColor for CourtStatus {
    fn color(&self) -> &'static str {
        match self {
            CourtStatus::Active => COLORS.success,
            CourtStatus::Maintenance => COLORS.warning,
            CourtStatus::Inactive => COLORS.neutral,
        }
    }
}

impl StatusColor for SubscriptionStatus {
    fn color(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => COLORS.success,
            SubscriptionStatus::Paused => COLORS.warning,
            SubscriptionStatus::Cancelled => COLORS.error,
            SubscriptionStatus::Expired => COLORS.neutral,
        }
    }
}

impl StatusColor for PaymentStatus {
    fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => COLORS.warning,
            PaymentStatus::Completed => COLORS.success,
            PaymentStatus::Failed => COLORS.error,
            PaymentStatus::Refunded => COLORS.info,
        }
    }
}

impl StatusColor for LessonRequestStatus {
    fn color(&self) -> &'static str {
        match self {
            LessonRequestStatus::Pending => COLORS.warning,
            LessonRequestStatus::Approved => COLORS.success,
            LessonRequestStatus::Declined => COLORS.error,
            LessonRequestStatus::Cancelled => COLORS.neutral,
        }
    }
}

impl StatusColor for SkillLevel {
    fn color(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => COLORS.info,
            SkillLevel::Intermediate => COLORS.success,
            SkillLevel::Advanced => COLORS.warning,
            SkillLevel::Elite => COLORS.primary,
        }
    }
}

impl StatusColor for NotificationKind {
    fn color(&self) -> &'static str {
        match self {
            NotificationKind::Success => COLORS.success,
            NotificationKind::Error => COLORS.error,
            NotificationKind::Info => COLORS.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_hex_color() {
        let colors = CourtStatus::ALL
            .iter()
            .map(StatusColor::color)
            .chain(SubscriptionStatus::ALL.iter().map(StatusColor::color))
            .chain(PaymentStatus::ALL.iter().map(StatusColor::color))
            .chain(LessonRequestStatus::ALL.iter().map(StatusColor::color))
            .chain(SkillLevel::ALL.iter().map(StatusColor::color));

        for color in colors {
            assert!(color.starts_with('#') && color.len() == 7, "{color}");
        }
    }

    #[test]
    fn test_error_snackbar_uses_error_color() {
        assert_eq!(NotificationKind::Error.color(), COLORS.error);
        assert!(TOUCH_TARGET >= 44.0);
    }
}
