// Placement policy for the 3D arc: offset -> transform, opacity, stacking, input.
// Pure function of (offset, viewport class, hover). No hidden state.

use serde::{Deserialize, Serialize};

/// Viewport width class. Narrow viewports collapse the arc to a single stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportClass {
    Wide,
    Narrow,
}

impl ViewportClass {
    pub fn from_width(width_px: f32, narrow_breakpoint_px: f32) -> Self {
        if width_px < narrow_breakpoint_px {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

/// Visual style of one slot of the arc. Lateral shift and rotations are given
/// for the left side; the right side mirrors them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotStyle {
    /// Distance from the anchor, in percent of card width.
    pub shift_pct: f32,
    pub scale: f32,
    pub z_index: i32,
    pub rotate_y_deg: f32,
    pub rotate_z_deg: f32,
    pub opacity: f32,
}

/// Data-driven placement table. Defaults reproduce the reference arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementPolicy {
    /// Horizontal translate of a centered card (percent of its own width).
    #[serde(default = "default_anchor_pct")]
    pub anchor_pct: f32,
    #[serde(default = "default_focused")]
    pub focused: SlotStyle,
    /// Scale of the focused card while hovered.
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f32,
    #[serde(default = "default_neighbor")]
    pub neighbor: SlotStyle,
    #[serde(default = "default_far")]
    pub far: SlotStyle,
    /// Non-focused cards on a narrow viewport.
    #[serde(default = "default_stacked")]
    pub stacked: SlotStyle,
    #[serde(default = "default_perspective_px")]
    pub perspective_px: f32,
}

fn default_anchor_pct() -> f32 {
    -50.0
}

fn default_focused() -> SlotStyle {
    SlotStyle {
        shift_pct: 0.0,
        scale: 1.0,
        z_index: 50,
        rotate_y_deg: 0.0,
        rotate_z_deg: 0.0,
        opacity: 1.0,
    }
}

fn default_hover_scale() -> f32 {
    1.05
}

fn default_neighbor() -> SlotStyle {
    SlotStyle {
        shift_pct: 90.0,
        scale: 0.85,
        z_index: 40,
        rotate_y_deg: 25.0, // angled toward center
        rotate_z_deg: -2.0,
        opacity: 0.8,
    }
}

fn default_far() -> SlotStyle {
    SlotStyle {
        shift_pct: 200.0,
        scale: 0.6,
        z_index: 10,
        rotate_y_deg: 0.0,
        rotate_z_deg: 0.0,
        opacity: 0.0,
    }
}

fn default_stacked() -> SlotStyle {
    SlotStyle {
        shift_pct: 0.0,
        scale: 0.8,
        z_index: 10,
        rotate_y_deg: 0.0,
        rotate_z_deg: 0.0,
        opacity: 0.0,
    }
}

fn default_perspective_px() -> f32 {
    1000.0
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy {
            anchor_pct: default_anchor_pct(),
            focused: default_focused(),
            hover_scale: default_hover_scale(),
            neighbor: default_neighbor(),
            far: default_far(),
            stacked: default_stacked(),
            perspective_px: default_perspective_px(),
        }
    }
}

/// Placement descriptor handed to the render surface for one card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub translate_x_pct: f32,
    pub scale: f32,
    pub z_index: i32,
    pub rotate_y_deg: f32,
    pub rotate_z_deg: f32,
    pub opacity: f32,
    /// Whether the card accepts pointer input.
    pub interactive: bool,
}

impl Placement {
    fn from_slot(policy: &PlacementPolicy, slot: &SlotStyle, side: f32, interactive: bool) -> Self {
        // Right side angles the other way.
        let mirror = if side > 0.0 { -1.0 } else { 1.0 };
        Placement {
            translate_x_pct: policy.anchor_pct + side * slot.shift_pct,
            scale: slot.scale,
            z_index: slot.z_index,
            rotate_y_deg: mirror * slot.rotate_y_deg,
            rotate_z_deg: mirror * slot.rotate_z_deg,
            opacity: slot.opacity,
            interactive,
        }
    }

    /// Whether the card is drawn at all (opacity above zero).
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// CSS transform string for a card anchored at the container's center.
    pub fn css_transform(&self, perspective_px: f32) -> String {
        format!(
            "translate({}%, -50%) perspective({}px) rotateY({}deg) rotateZ({}deg) scale({})",
            self.translate_x_pct, perspective_px, self.rotate_y_deg, self.rotate_z_deg, self.scale
        )
    }
}

/// Compute the placement of a card from its circular offset to the focus.
pub fn place(
    offset: isize,
    viewport: ViewportClass,
    hovered: bool,
    policy: &PlacementPolicy,
) -> Placement {
    // Left of focus is side -1, right is +1; the focused card sits on the anchor.
    let side = offset.signum() as f32;

    let mut placement = match (viewport, offset.unsigned_abs()) {
        (_, 0) => Placement::from_slot(policy, &policy.focused, 0.0, true),
        (ViewportClass::Narrow, _) => Placement::from_slot(policy, &policy.stacked, 0.0, false),
        (ViewportClass::Wide, 1) => Placement::from_slot(policy, &policy.neighbor, side, true),
        (ViewportClass::Wide, _) => Placement::from_slot(policy, &policy.far, side, false),
    };

    if offset == 0 && hovered {
        placement.scale = policy.hover_scale;
        placement.rotate_z_deg = 0.0;
    }

    placement
}

/// Whether a card at `offset` belongs to the render set. Wide viewports only
/// keep cards within `render_radius` of the focus; narrow ones keep every card
/// so the single stack can cross-fade.
pub fn is_rendered(offset: isize, viewport: ViewportClass, render_radius: usize) -> bool {
    match viewport {
        ViewportClass::Wide => offset.unsigned_abs() <= render_radius,
        ViewportClass::Narrow => true,
    }
}
