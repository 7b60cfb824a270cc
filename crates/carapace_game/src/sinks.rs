//! Ready-made sinks: one that logs, one that records

use crate::services::{AudioSink, Hud, Presentation, Scene, ShellVisual, Sound};
use carapace_combat::{AttackKind, ProjectileSpawn};
use carapace_inventory::ShellStats;
use carapace_math::Vec2;
use carapace_physics::{BodyId, LayerMask};
use parking_lot::Mutex;

/// Logs every call at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Presentation for LogSink {
    fn on_attack_start(&self, actor: BodyId, kind: AttackKind) {
        log::debug!("{actor:?} attack animation ({kind:?})");
    }

    fn on_hurt(&self, actor: BodyId) {
        log::debug!("{actor:?} hurt");
    }

    fn on_death(&self, actor: BodyId) {
        log::debug!("{actor:?} death animation");
    }

    fn on_hide(&self, actor: BodyId, hiding: bool) {
        log::debug!("{actor:?} hiding={hiding}");
    }

    fn on_shell_swap(&self, actor: BodyId) {
        log::debug!("{actor:?} shell swap");
    }

    fn set_shell_visual(&self, actor: BodyId, visual: ShellVisual) {
        log::debug!("{actor:?} shell visual {visual:?}");
    }

    fn emit_particles(&self, actor: BodyId, count: u32) {
        log::debug!("{actor:?} emits {count} particles");
    }
}

impl AudioSink for LogSink {
    fn play_sound(&self, sound: Sound) {
        log::debug!("Sound {sound:?}");
    }
}

impl Hud for LogSink {
    fn update_health(&self, health: i32) {
        log::debug!("HUD health {health}");
    }

    fn update_armor(&self, armor: i32) {
        log::debug!("HUD armor {armor}");
    }

    fn update_coins(&self, coins: i32) {
        log::debug!("HUD coins {coins}");
    }
}

impl Scene for LogSink {
    fn spawn_projectile(&self, owner: BodyId, _hostile: LayerMask, spawn: &ProjectileSpawn) {
        log::debug!("{owner:?} fires a projectile from {:?}", spawn.position);
    }

    fn place_shell(&self, shell: ShellStats, position: Vec2) {
        log::debug!("Shell {} left at {position:?}", shell.name);
    }

    fn take_shell(&self, _id: BodyId) -> Option<ShellStats> {
        None
    }

    fn despawn(&self, body: BodyId, delay: f32) {
        log::debug!("Despawn {body:?} in {delay}s");
    }

    fn player_died(&self) {
        log::debug!("Player died");
    }

    fn open_chest(&self) {
        log::debug!("Chest opened");
    }
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AttackStart { actor: BodyId, kind: AttackKind },
    Hurt(BodyId),
    Death(BodyId),
    Hide { actor: BodyId, hiding: bool },
    Move { actor: BodyId, moving: bool },
    Grounded { actor: BodyId, grounded: bool },
    Invulnerable { actor: BodyId, active: bool },
    ShellSwap(BodyId),
    ShellVisual { actor: BodyId, visual: ShellVisual },
    Particles { actor: BodyId, count: u32 },
    Sound(Sound),
    Health(i32),
    Armor(i32),
    Coins(i32),
    Projectile { owner: BodyId, spawn: ProjectileSpawn },
    ShellPlaced { name: String, position: Vec2 },
    Despawn { body: BodyId, delay: f32 },
    PlayerDied,
    ChestOpened,
}

/// Records every call, for tests and replays
#[derive(Debug, Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Number of recorded events matching `predicate`
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.lock().contains(event)
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    /// Last value shown on each HUD counter as (health, armor, coins)
    pub fn hud(&self) -> (Option<i32>, Option<i32>, Option<i32>) {
        let events = self.events.lock();
        let last = |f: fn(&Event) -> Option<i32>| events.iter().rev().find_map(f);
        (
            last(|e| match e {
                Event::Health(v) => Some(*v),
                _ => None,
            }),
            last(|e| match e {
                Event::Armor(v) => Some(*v),
                _ => None,
            }),
            last(|e| match e {
                Event::Coins(v) => Some(*v),
                _ => None,
            }),
        )
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl Presentation for Recorder {
    fn on_attack_start(&self, actor: BodyId, kind: AttackKind) {
        self.push(Event::AttackStart { actor, kind });
    }

    fn on_hurt(&self, actor: BodyId) {
        self.push(Event::Hurt(actor));
    }

    fn on_death(&self, actor: BodyId) {
        self.push(Event::Death(actor));
    }

    fn on_hide(&self, actor: BodyId, hiding: bool) {
        self.push(Event::Hide { actor, hiding });
    }

    fn on_move(&self, actor: BodyId, moving: bool) {
        self.push(Event::Move { actor, moving });
    }

    fn on_grounded(&self, actor: BodyId, grounded: bool) {
        self.push(Event::Grounded { actor, grounded });
    }

    fn on_invulnerable(&self, actor: BodyId, active: bool) {
        self.push(Event::Invulnerable { actor, active });
    }

    fn on_shell_swap(&self, actor: BodyId) {
        self.push(Event::ShellSwap(actor));
    }

    fn set_shell_visual(&self, actor: BodyId, visual: ShellVisual) {
        self.push(Event::ShellVisual { actor, visual });
    }

    fn emit_particles(&self, actor: BodyId, count: u32) {
        self.push(Event::Particles { actor, count });
    }
}

impl AudioSink for Recorder {
    fn play_sound(&self, sound: Sound) {
        self.push(Event::Sound(sound));
    }
}

impl Hud for Recorder {
    fn update_health(&self, health: i32) {
        self.push(Event::Health(health));
    }

    fn update_armor(&self, armor: i32) {
        self.push(Event::Armor(armor));
    }

    fn update_coins(&self, coins: i32) {
        self.push(Event::Coins(coins));
    }
}

impl Scene for Recorder {
    fn spawn_projectile(&self, owner: BodyId, _hostile: LayerMask, spawn: &ProjectileSpawn) {
        self.push(Event::Projectile { owner, spawn: *spawn });
    }

    fn place_shell(&self, shell: ShellStats, position: Vec2) {
        self.push(Event::ShellPlaced {
            name: shell.name,
            position,
        });
    }

    fn take_shell(&self, _id: BodyId) -> Option<ShellStats> {
        None
    }

    fn despawn(&self, body: BodyId, delay: f32) {
        self.push(Event::Despawn { body, delay });
    }

    fn player_died(&self) {
        self.push(Event::PlayerDied);
    }

    fn open_chest(&self) {
        self.push(Event::ChestOpened);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_collects_in_order() {
        let recorder = Recorder::new();
        recorder.play_sound(Sound::Jump);
        recorder.on_hurt(BodyId(3));
        recorder.update_health(1);
        recorder.play_sound(Sound::Hit);

        assert_eq!(recorder.sounds(), vec![Sound::Jump, Sound::Hit]);
        assert_eq!(recorder.count(|e| matches!(e, Event::Hurt(_))), 1);
        assert_eq!(recorder.hud(), (Some(1), None, None));

        recorder.clear();
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_log_sink_has_no_shells() {
        assert_eq!(LogSink.take_shell(BodyId(1)), None);
    }
}
