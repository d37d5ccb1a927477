pub mod projection;
pub mod transition;

use serde::{Deserialize, Serialize};

use crate::layout::palette::Swatch;
use crate::layout::style::Padding;
use crate::model::format_weight;
use crate::motion::scheduler::RotationPhase;
use self::projection::{ProjectedPosition, RotationState};
use self::transition::{Easing, Transition};

/// Which arrangement the cloud renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudVariant {
    /// 3D globe with idle rotation (keyword cloud)
    Sphere,
    /// Flat wrapping rows that scatter on focus (tag cloud)
    Galaxy,
}

impl CloudVariant {
    /// Transition used when focus changes.
    pub fn focus_transition(self) -> Transition {
        match self {
            CloudVariant::Sphere => Transition::new(0.8, Easing::SOFT_OUT),
            CloudVariant::Galaxy => Transition::new(0.7, Easing::SPRING_OUT),
        }
    }

    /// Transition in effect while nothing is focused.
    pub fn idle_transition(self) -> Transition {
        match self {
            CloudVariant::Sphere => Transition::new(0.3, Easing::EaseOut),
            CloudVariant::Galaxy => Transition::new(0.5, Easing::SPRING_OUT),
        }
    }
}

impl Default for CloudVariant {
    fn default() -> Self {
        Self::Sphere
    }
}

/// One drawable label for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub label: String,
    pub weight: f32,
    pub rank: usize,
    pub font_size_rem: f32,
    pub padding: Padding,
    pub color: Swatch,
    /// Route to navigate to when the label is activated
    pub href: String,
    pub position: ProjectedPosition,
}

impl RenderItem {
    /// Weight shown after the label on galaxy chips.
    pub fn weight_badge(&self) -> String {
        format_weight(self.weight)
    }
}

/// Output of one engine frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub variant: CloudVariant,
    /// Back-to-front draw order; the focused label is always last.
    pub items: Vec<RenderItem>,
    pub transition: Transition,
    pub phase: RotationPhase,
    pub rotation: RotationState,
    pub focused: Option<String>,
    /// Set when there is nothing to draw.
    pub empty_message: Option<String>,
}

impl RenderState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, label: &str) -> Option<&RenderItem> {
        self.items.iter().find(|i| i.label == label)
    }

    pub fn focused_item(&self) -> Option<&RenderItem> {
        self.items.iter().rev().find(|i| i.position.focused)
    }
}
