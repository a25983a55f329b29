//! Live "pick"/"pass" overlay driven by the current drag delta

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeConfig {
    /// Below this |dx| both badges are fully transparent
    pub deadband_px: f32,
    /// Distance past the deadband over which intensity reaches 1.0
    pub ramp_px: f32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            deadband_px: 8.0,
            ramp_px: 28.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowTint {
    Pick,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGlow {
    pub side: GlowSide,
    pub tint: GlowTint,
    pub intensity: f32,
}

/// Overlay state; never causes a commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeOverlay {
    pub pick: f32,
    pub pass: f32,
    pub glow: Option<EdgeGlow>,
}

impl BadgeOverlay {
    /// Fully transparent state
    pub const fn idle() -> Self {
        Self {
            pick: 0.0,
            pass: 0.0,
            glow: None,
        }
    }

    pub fn from_delta(dx: f32, config: &BadgeConfig) -> Self {
        let magnitude = dx.abs();
        if !magnitude.is_finite() || magnitude <= config.deadband_px {
            return Self::idle();
        }

        let intensity = if config.ramp_px <= 0.0 {
            1.0
        } else {
            ((magnitude - config.deadband_px) / config.ramp_px).clamp(0.0, 1.0)
        };

        if dx > 0.0 {
            Self {
                pick: intensity,
                pass: 0.0,
                glow: Some(EdgeGlow {
                    side: GlowSide::Right,
                    tint: GlowTint::Pick,
                    intensity,
                }),
            }
        } else {
            Self {
                pick: 0.0,
                pass: intensity,
                glow: Some(EdgeGlow {
                    side: GlowSide::Left,
                    tint: GlowTint::Pass,
                    intensity,
                }),
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pick == 0.0 && self.pass == 0.0
    }
}

impl Default for BadgeOverlay {
    fn default() -> Self {
        Self::idle()
    }
}
