//! Enemy sight

use carapace_math::{angle_between, consts::EPSILON, Facing, Vec2};
use carapace_physics::{BodyId, CollisionProbe, LayerMask};
use serde::{Deserialize, Serialize};

/// Sight configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Cone width in degrees, centered on the facing
    pub field_of_view: f32,
    /// Reach of the cone
    pub vision_range: f32,
    /// Radius inside which the target is seen whatever the facing
    pub detection_range: f32,
    /// Seconds without a sighting before the enemy loses interest
    pub deaggro_time: f32,
    /// Geometry that blocks line of sight
    pub sight_blocking: LayerMask,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            field_of_view: 90.0,
            vision_range: 5.0,
            detection_range: 1.0,
            deaggro_time: 5.0,
            sight_blocking: LayerMask::SIGHT_BLOCKING,
        }
    }
}

impl VisionConfig {
    pub fn with_field_of_view(mut self, degrees: f32) -> Self {
        self.field_of_view = degrees;
        self
    }

    pub fn with_vision_range(mut self, range: f32) -> Self {
        self.vision_range = range;
        self
    }

    pub fn with_detection_range(mut self, range: f32) -> Self {
        self.detection_range = range;
        self
    }

    pub fn with_deaggro_time(mut self, seconds: f32) -> Self {
        self.deaggro_time = seconds;
        self
    }
}

/// What the enemy is looking for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightTarget {
    pub body: BodyId,
    pub position: Vec2,
    /// Layers the target's body may be on
    pub layers: LayerMask,
}

/// Tracks whether, and how recently, an enemy saw its target
#[derive(Debug, Clone)]
pub struct Perception {
    config: VisionConfig,
    time_since_seen: f32,
    visible: bool,
}

impl Perception {
    /// Starts out unaware: the target counts as unseen for `deaggro_time`
    pub fn new(config: VisionConfig) -> Self {
        Self {
            time_since_seen: config.deaggro_time,
            config,
            visible: false,
        }
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn time_since_seen(&self) -> f32 {
        self.time_since_seen
    }

    /// Result of the last [`update`](Self::update)
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Seen recently enough to keep pursuing
    pub fn is_aggro(&self) -> bool {
        self.time_since_seen < self.config.deaggro_time
    }

    /// Whether an eye at `eye` looking along `facing` sees the target.
    ///
    /// The target must be inside the cone or the detection radius, and the
    /// first sight-blocking collider along the ray must be the target itself.
    pub fn can_see(&self, eye: Vec2, facing: Facing, target: &SightTarget, probe: &dyn CollisionProbe) -> bool {
        let to_target = target.position - eye;
        let distance = to_target.length();
        if distance <= EPSILON {
            return true;
        }

        let angle = angle_between(facing.forward(), to_target);
        let in_cone = angle <= self.config.field_of_view / 2.0 && distance <= self.config.vision_range;
        let in_detection = distance < self.config.detection_range;
        if !(in_cone || in_detection) {
            return false;
        }

        let mask = self.config.sight_blocking.union(target.layers);
        probe
            .raycast(eye, to_target, distance + 1.0, mask)
            .is_some_and(|hit| hit.body == target.body)
    }

    /// Look for the target and advance the time since the last sighting
    pub fn update(
        &mut self,
        eye: Vec2,
        facing: Facing,
        target: &SightTarget,
        probe: &dyn CollisionProbe,
        delta_time: f32,
    ) -> bool {
        let was_aggro = self.is_aggro();
        self.visible = self.can_see(eye, facing, target, probe);
        if self.visible {
            self.time_since_seen = 0.0;
        } else {
            self.time_since_seen += delta_time;
        }

        match (was_aggro, self.is_aggro()) {
            (false, true) => log::debug!("Target {:?} spotted", target.body),
            (true, false) => log::debug!("Target {:?} lost", target.body),
            _ => {}
        }
        self.visible
    }

    /// Forget the target
    pub fn reset(&mut self) {
        self.visible = false;
        self.time_since_seen = self.config.deaggro_time;
    }
}
