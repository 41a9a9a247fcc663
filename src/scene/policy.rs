use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{HierarchyError, Result};
use crate::math::BoundingBox;

/// Which point of a bounding box becomes an anchor or control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorRule {
    /// Centre of the `-x` face.
    Left,
    /// Centre of the box.
    #[serde(alias = "center")]
    Centre,
    /// Centre of the `+x` face.
    Right,
    /// Centre of the overlap with the parent's box.
    Inter,
    /// Centre of the `-y` face.
    Down,
}

impl AnchorRule {
    pub const ALL: [AnchorRule; 5] = [
        AnchorRule::Left,
        AnchorRule::Centre,
        AnchorRule::Right,
        AnchorRule::Inter,
        AnchorRule::Down,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnchorRule::Left => "left",
            AnchorRule::Centre => "centre",
            AnchorRule::Right => "right",
            AnchorRule::Inter => "inter",
            AnchorRule::Down => "down",
        }
    }

    /// Resolves the rule on `own`. `Inter` needs the parent box and returns `None` without one.
    pub fn point(self, own: &BoundingBox, parent: Option<&BoundingBox>) -> Option<Vec3> {
        let mid = own.centre();
        match self {
            AnchorRule::Left => Some(Vec3::new(own.min.x, mid.y, mid.z)),
            AnchorRule::Right => Some(Vec3::new(own.max.x, mid.y, mid.z)),
            AnchorRule::Down => Some(Vec3::new(mid.x, own.min.y, mid.z)),
            AnchorRule::Centre => Some(mid),
            AnchorRule::Inter => parent.map(|p| own.intersection(p).centre()),
        }
    }
}

impl fmt::Display for AnchorRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnchorRule {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(AnchorRule::Left),
            "centre" | "center" => Ok(AnchorRule::Centre),
            "right" => Ok(AnchorRule::Right),
            "inter" => Ok(AnchorRule::Inter),
            "down" => Ok(AnchorRule::Down),
            other => Err(HierarchyError::policy(format!(
                "unknown anchor rule '{other}'"
            ))),
        }
    }
}

/// Anchor placement for the root (`first`), inner nodes' anchors (`middle`) and
/// leaf end-points (`end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct AnchorPolicy {
    first: AnchorRule,
    middle: AnchorRule,
    end: AnchorRule,
}

#[derive(Deserialize)]
struct RawPolicy {
    first: AnchorRule,
    middle: AnchorRule,
    end: AnchorRule,
}

impl TryFrom<RawPolicy> for AnchorPolicy {
    type Error = HierarchyError;

    fn try_from(raw: RawPolicy) -> Result<Self> {
        AnchorPolicy::new(raw.first, raw.middle, raw.end)
    }
}

impl AnchorPolicy {
    /// The root has no parent box and a leaf end-point has no child box, so neither may be `Inter`.
    pub fn new(first: AnchorRule, middle: AnchorRule, end: AnchorRule) -> Result<Self> {
        if first == AnchorRule::Inter {
            return Err(HierarchyError::policy("root anchor cannot use 'inter'"));
        }
        if end == AnchorRule::Inter {
            return Err(HierarchyError::policy("end point cannot use 'inter'"));
        }
        Ok(Self { first, middle, end })
    }

    pub fn parse(first: &str, middle: &str, end: &str) -> Result<Self> {
        Self::new(first.parse()?, middle.parse()?, end.parse()?)
    }

    pub fn first(&self) -> AnchorRule {
        self.first
    }

    pub fn middle(&self) -> AnchorRule {
        self.middle
    }

    pub fn end(&self) -> AnchorRule {
        self.end
    }
}
