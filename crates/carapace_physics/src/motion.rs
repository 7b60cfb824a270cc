//! Motion capability shared by player and enemies

use crate::body::{Body, BodyId};
use crate::config::MotionConfig;
use crate::knockback::Knockback;
use crate::layers::{CollisionLayer, LayerMask};
use crate::query::CollisionProbe;
use carapace_math::{Facing, Vec2};
use std::sync::Arc;

/// Walks, jumps and knocks back one actor's body.
///
/// Ordinary movement is ignored while input is locked (set by the actor
/// from its running attack) or while a knockback owns the velocity.
pub struct MotionController {
    body: Box<dyn Body>,
    probe: Arc<dyn CollisionProbe>,
    config: MotionConfig,
    walking_speed: f32,
    facing: Facing,
    input_locked: bool,
    knockback: Option<Knockback>,
}

impl MotionController {
    pub fn new(body: Box<dyn Body>, probe: Arc<dyn CollisionProbe>, config: MotionConfig) -> Self {
        Self {
            body,
            probe,
            walking_speed: config.walking_speed,
            config,
            facing: Facing::Right,
            input_locked: false,
            knockback: None,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn body_id(&self) -> BodyId {
        self.body.id()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    pub fn half_extents(&self) -> Vec2 {
        self.body.half_extents()
    }

    pub fn probe(&self) -> &Arc<dyn CollisionProbe> {
        &self.probe
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn walking_speed(&self) -> f32 {
        self.walking_speed
    }

    pub fn set_walking_speed(&mut self, speed: f32) {
        self.walking_speed = speed.max(0.0);
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn set_input_locked(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    pub fn is_knocked_back(&self) -> bool {
        self.knockback.is_some()
    }

    /// Set horizontal velocity and turn towards it.
    ///
    /// Returns `false` without touching the body while input is locked or a
    /// knockback is active.
    pub fn move_horizontally(&mut self, velocity_x: f32) -> bool {
        if self.input_locked || self.knockback.is_some() {
            return false;
        }
        if velocity_x > 0.0 {
            self.facing = Facing::Right;
        } else if velocity_x < 0.0 {
            self.facing = Facing::Left;
        }
        let v = self.body.velocity();
        self.body.set_velocity(v.with_x(velocity_x));
        true
    }

    /// Move at `axis` times the walking speed; `axis` is clamped to -1..=1
    pub fn walk(&mut self, axis: f32) -> bool {
        self.move_horizontally(axis.clamp(-1.0, 1.0) * self.walking_speed)
    }

    /// Zero horizontal velocity unless a knockback owns it
    pub fn stop(&mut self) {
        if self.knockback.is_none() {
            self.halt_horizontal();
        }
    }

    /// Zero horizontal velocity unconditionally
    pub fn halt_horizontal(&mut self) {
        let v = self.body.velocity();
        self.body.set_velocity(v.with_x(0.0));
    }

    /// Hold horizontal velocity at `speed` along the facing, ignoring input lock
    pub fn drive_forward(&mut self, speed: f32) {
        let v = self.body.velocity();
        self.body.set_velocity(v.with_x(self.facing.sign() * speed));
    }

    /// Jump high enough to rise `height` units. Only works on the ground.
    pub fn jump(&mut self, height: f32) -> bool {
        if height <= 0.0 || !self.grounded() {
            return false;
        }
        let gravity = self.config.gravity * self.body.gravity_scale();
        let launch = (2.0 * gravity * height).sqrt();
        let v = self.body.velocity();
        self.body.set_velocity(v.with_y(launch));
        true
    }

    /// Start a knockback away from `source`, replacing any knockback in progress
    pub fn knockback(&mut self, source: Vec2, magnitude: f32) {
        let kb = Knockback::new(self.body.position(), source, magnitude, self.facing, &self.config);
        self.body.set_velocity(Vec2::ZERO);
        self.body.apply_impulse(kb.launch());
        log::trace!("Knockback on {:?}: {:?}", self.body.id(), kb.launch());
        self.knockback = Some(kb);
    }

    /// Advance the knockback in progress
    pub fn update(&mut self, delta_time: f32) {
        if let Some(kb) = self.knockback.as_mut() {
            let vx = kb.update(delta_time);
            let finished = kb.is_finished();
            let v = self.body.velocity();
            self.body.set_velocity(v.with_x(vx));
            if finished {
                self.knockback = None;
            }
        }
    }

    pub fn grounded(&self) -> bool {
        self.probe.is_grounded_at(self.body.id())
    }

    /// Whether nothing blocks the body right in front of it
    pub fn front_clear(&self) -> bool {
        let forward = self.facing.forward();
        let origin = self.body.position() + forward * self.body.half_extents().x;
        self.probe
            .raycast(origin, forward, self.config.front_probe_distance, self.config.blocking_mask)
            .is_none()
    }

    /// Whether geometry sits right above the body's head
    pub fn near_ceiling(&self) -> bool {
        let origin = self.body.position() + Vec2::Y * self.body.half_extents().y;
        self.probe
            .raycast(origin, Vec2::Y, self.config.ceiling_probe_distance, self.config.blocking_mask)
            .is_some()
    }

    /// Whether the body touches geometry that ends a dash
    pub fn touching_obstacle(&self) -> bool {
        self.probe.is_touching(self.body.id(), self.config.obstacle_mask)
    }

    pub fn is_touching(&self, mask: LayerMask) -> bool {
        self.probe.is_touching(self.body.id(), mask)
    }

    pub fn contacts(&self, mask: LayerMask) -> Vec<BodyId> {
        self.probe.contacts(self.body.id(), mask)
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.body.set_gravity_scale(scale);
    }

    pub fn set_crouched(&mut self, crouched: bool) {
        self.body.set_crouched(crouched);
    }

    pub fn layer(&self) -> CollisionLayer {
        self.body.layer()
    }

    pub fn set_layer(&mut self, layer: CollisionLayer) {
        self.body.set_layer(layer);
    }
}

impl std::fmt::Debug for MotionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionController")
            .field("body", &self.body.id())
            .field("facing", &self.facing)
            .field("walking_speed", &self.walking_speed)
            .field("input_locked", &self.input_locked)
            .field("knockback", &self.knockback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDesc;
    use crate::config::SandboxConfig;
    use crate::sandbox::SandboxWorld;
    use approx::assert_relative_eq;

    fn grounded_actor(world: &SandboxWorld) -> MotionController {
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        let body = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        MotionController::new(Box::new(body), Arc::new(world.clone()), MotionConfig::default())
    }

    #[test]
    fn test_walk_turns_actor() {
        let world = SandboxWorld::default();
        let mut motion = grounded_actor(&world);

        assert!(motion.walk(-1.0));
        assert_eq!(motion.facing(), Facing::Left);
        assert_relative_eq!(motion.velocity().x, -4.0);

        motion.stop();
        assert_eq!(motion.velocity().x, 0.0);
        assert_eq!(motion.facing(), Facing::Left);
    }

    #[test]
    fn test_move_ignored_while_input_locked() {
        let world = SandboxWorld::default();
        let mut motion = grounded_actor(&world);

        motion.set_input_locked(true);
        assert!(!motion.move_horizontally(3.0));
        assert_eq!(motion.velocity().x, 0.0);

        motion.set_input_locked(false);
        assert!(motion.move_horizontally(3.0));
        assert_relative_eq!(motion.velocity().x, 3.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let world = SandboxWorld::default();
        let mut motion = grounded_actor(&world);

        assert!(motion.jump(1.0));
        assert!(motion.velocity().y > 0.0);

        world.step(0.1);
        assert!(!motion.grounded());
        assert!(!motion.jump(1.0));
    }

    #[test]
    fn test_knockback_owns_velocity() {
        let world = SandboxWorld::new(SandboxConfig::weightless());
        let body = world.spawn_body(BodyDesc::new(Vec2::new(1.0, 0.0)));
        let id = body.id();
        let mut motion = MotionController::new(
            Box::new(body),
            Arc::new(world.clone()),
            MotionConfig::default().with_knockback_duration(0.2),
        );

        motion.knockback(Vec2::ZERO, 20.0);
        assert_eq!(world.impulse_count(id), 1);
        assert!(motion.velocity().x > 0.0);
        assert!(motion.is_knocked_back());

        assert!(!motion.move_horizontally(-5.0));
        assert!(motion.velocity().x > 0.0);

        motion.update(0.1);
        motion.update(0.1);
        assert!(!motion.is_knocked_back());
        assert_eq!(motion.velocity().x, 0.0);
        assert!(motion.move_horizontally(-5.0));
    }

    #[test]
    fn test_front_clear_and_ceiling() {
        let world = SandboxWorld::new(SandboxConfig::weightless());
        world.add_static(Vec2::new(1.0, 0.0), Vec2::new(0.5, 0.5), CollisionLayer::OBSTACLE);
        world.add_static(Vec2::new(-3.0, 1.2), Vec2::new(1.0, 0.5), CollisionLayer::GROUND);
        let body = world.spawn_body(BodyDesc::new(Vec2::ZERO));
        let mut motion = MotionController::new(Box::new(body), Arc::new(world.clone()), MotionConfig::default());

        assert!(!motion.front_clear());
        assert!(motion.touching_obstacle());
        assert!(!motion.near_ceiling());

        motion.face(Facing::Left);
        assert!(motion.front_clear());

        world.set_position(motion.body_id(), Vec2::new(-3.0, 0.0)).unwrap();
        assert!(motion.near_ceiling());
    }
}
