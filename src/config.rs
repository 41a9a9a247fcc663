use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, Result};

/// Settings shared by the FK/IK steps and pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// An IK pass that moves the effector less than this (world units) counts as settled.
    /// Zero keeps every pass going until the iteration cap.
    pub move_threshold: f32,
    /// An IK solve ending closer than this to its target is reported as converged.
    pub reach_tolerance: f32,
    /// Maximum number of links one IK solve may rotate.
    pub ik_level: usize,
    /// Pick radius in pixels for selecting a control point.
    pub select_radius: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            move_threshold: 0.01,
            reach_tolerance: 0.01,
            ik_level: 2,
            select_radius: 10.0,
        }
    }
}

impl SolverConfig {
    pub fn new(ik_level: usize) -> Self {
        Self {
            ik_level,
            ..Default::default()
        }
    }

    pub fn with_move_threshold(mut self, threshold: f32) -> Self {
        self.move_threshold = threshold;
        self
    }

    pub fn with_reach_tolerance(mut self, tolerance: f32) -> Self {
        self.reach_tolerance = tolerance;
        self
    }

    pub fn with_ik_level(mut self, level: usize) -> Self {
        self.ik_level = level;
        self
    }

    pub fn with_select_radius(mut self, radius: f32) -> Self {
        self.select_radius = radius;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ik_level == 0 {
            return Err(HierarchyError::Config {
                reason: "ik_level must be at least 1".into(),
            });
        }
        if !(self.move_threshold >= 0.0) {
            return Err(HierarchyError::Config {
                reason: format!("move_threshold must not be negative, got {}", self.move_threshold),
            });
        }
        if !(self.reach_tolerance > 0.0) {
            return Err(HierarchyError::Config {
                reason: format!("reach_tolerance must be positive, got {}", self.reach_tolerance),
            });
        }
        if !(self.select_radius >= 0.0) {
            return Err(HierarchyError::Config {
                reason: format!("select_radius must not be negative, got {}", self.select_radius),
            });
        }
        Ok(())
    }
}

/// Amplitude/frequency pair for the scripted periodic motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptParams {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for ScriptParams {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency: 0.9,
        }
    }
}

impl ScriptParams {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }
}
