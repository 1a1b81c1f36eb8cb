//! Global chaos/formed mode and the progress scalar that trails it.

use crate::config::HysteresisConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlobalMode {
    Chaos,
    #[default]
    Formed,
}

impl GlobalMode {
    /// Value the progress scalar converges to in this mode.
    pub fn progress_target(self) -> f32 {
        match self {
            GlobalMode::Chaos => 0.0,
            GlobalMode::Formed => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GlobalMode::Chaos => GlobalMode::Formed,
            GlobalMode::Formed => GlobalMode::Chaos,
        }
    }
}

/// Two-state mode driven by a continuous signal with a dead band.
///
/// Above `enter_chaos` the mode becomes chaos, below `enter_formed` it becomes
/// formed, and anything in between leaves it unchanged.
#[derive(Clone, Debug)]
pub struct ModeController {
    mode: GlobalMode,
    enter_chaos: f32,
    enter_formed: f32,
}

impl ModeController {
    pub fn new(cfg: &HysteresisConfig) -> Self {
        Self {
            mode: GlobalMode::Formed,
            enter_chaos: cfg.enter_chaos,
            enter_formed: cfg.enter_formed,
        }
    }

    pub fn mode(&self) -> GlobalMode {
        self.mode
    }

    /// Feed one signal sample. Returns the new mode if it changed.
    pub fn observe(&mut self, signal: Option<f32>) -> Option<GlobalMode> {
        let value = signal.filter(|v| v.is_finite())?;
        let next = if value > self.enter_chaos {
            GlobalMode::Chaos
        } else if value < self.enter_formed {
            GlobalMode::Formed
        } else {
            self.mode
        };
        self.set(next)
    }

    /// Explicit override (button, key). Returns the new mode if it changed.
    pub fn set(&mut self, mode: GlobalMode) -> Option<GlobalMode> {
        if mode == self.mode {
            return None;
        }
        log::info!("[mode] {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        Some(mode)
    }

    pub fn toggle(&mut self) -> GlobalMode {
        let next = self.mode.toggled();
        self.set(next);
        next
    }
}

/// Low-pass filtered blend factor, 0 = chaos, 1 = formed.
#[derive(Clone, Debug)]
pub struct ProgressBlend {
    value: f32,
    rate: f32,
}

impl ProgressBlend {
    pub fn new(rate: f32) -> Self {
        Self { value: 0.0, rate }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Move toward the mode target by `1 - exp(-rate * dt)` of the gap.
    pub fn advance(&mut self, mode: GlobalMode, dt_sec: f32) -> f32 {
        if dt_sec > 0.0 {
            let alpha = 1.0 - (-self.rate * dt_sec).exp();
            let target = mode.progress_target();
            self.value = (self.value + (target - self.value) * alpha).clamp(0.0, 1.0);
        }
        self.value
    }
}
