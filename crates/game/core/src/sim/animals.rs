//! Per-tick animal simulation: patrol movement and aggressive attacks.
//!
//! Each animal alternates between a moving phase and a paused phase driven by
//! a countdown timer. Movement stays inside the animal's patrol rectangle;
//! hitting a wall reflects the heading with a little jitter so patrol paths
//! don't degenerate into a fixed ping-pong line. Animals with an Attack
//! definition also swing at the player and at other living animals, gated by
//! one shared in-game-minute cooldown per attacker.

use rand::Rng;

use crate::config::GameConfig;
use crate::def::{ActionKind, Amount, CollectionKind, ElementDef};
use crate::game::Game;
use crate::state::{paths, ElementInstance, Patch};

use super::viewport::ViewportBounds;

/// One tick's worth of world changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationUpdate {
    pub updates: Vec<Patch>,
    pub messages: Vec<String>,
}

/// Advances every living, on-screen animal in the active location by one
/// tick. Pass `None` for the viewport to simulate everything.
pub fn update_animal_positions<R: Rng + ?Sized>(
    game: &Game,
    viewport: Option<&ViewportBounds>,
    rng: &mut R,
) -> SimulationUpdate {
    let mut out = SimulationUpdate::default();
    let Some(location) = game.active_location() else {
        return out;
    };

    for (id, instance) in &location.element_instances {
        if instance.collection != CollectionKind::Animals || instance.is_dead {
            continue;
        }
        if let Some(bounds) = viewport {
            if !bounds.contains(instance.x, instance.y) {
                continue;
            }
        }
        let Some(def) = game
            .definition
            .element(CollectionKind::Animals, &instance.element)
        else {
            continue;
        };

        let moved = step_movement(game, id, instance, rng, &mut out);
        step_attacks(game, id, instance, def, moved, rng, &mut out);
    }
    out
}

/// The animal's position after this tick's movement, if any.
struct Moved {
    x: f64,
    y: f64,
}

fn step_movement<R: Rng + ?Sized>(
    game: &Game,
    id: &str,
    instance: &ElementInstance,
    rng: &mut R,
    out: &mut SimulationUpdate,
) -> Moved {
    let location = &game.instance.active_location;
    let mut moved = Moved {
        x: instance.x,
        y: instance.y,
    };

    // No patrol, no movement. The animal still attacks from where it stands.
    let Some(patrol) = &instance.patrol else {
        return moved;
    };

    let mut timer = instance.movement_timer.unwrap_or(0);
    let mut paused = instance.is_paused;
    timer -= 1;
    if timer <= 0 {
        paused = !paused;
        timer = if paused {
            GameConfig::ANIMAL_PAUSE_TICKS
        } else {
            GameConfig::ANIMAL_MOVE_TICKS
        };
    }
    out.updates.push(Patch::set(
        paths::element_instance_field(location, id, "movementTimer"),
        timer,
    ));
    if paused != instance.is_paused {
        out.updates.push(Patch::set(
            paths::element_instance_field(location, id, "isPaused"),
            paused,
        ));
    }
    if paused {
        return moved;
    }

    let mut angle = instance
        .movement_angle
        .unwrap_or_else(|| rng.gen_range(0.0..360.0));
    let mut x = instance.x + angle.to_radians().cos() * GameConfig::ANIMAL_SPEED;
    let mut y = instance.y + angle.to_radians().sin() * GameConfig::ANIMAL_SPEED;

    // Mirror the heading off patrol walls, with jitter so paths vary.
    if x < patrol.min_x || x > patrol.max_x {
        angle = 180.0 - angle
            + rng.gen_range(-GameConfig::BOUNCE_JITTER_DEGREES..=GameConfig::BOUNCE_JITTER_DEGREES);
        x = x.clamp(patrol.min_x, patrol.max_x);
    }
    if y < patrol.min_y || y > patrol.max_y {
        angle = -angle
            + rng.gen_range(-GameConfig::BOUNCE_JITTER_DEGREES..=GameConfig::BOUNCE_JITTER_DEGREES);
        y = y.clamp(patrol.min_y, patrol.max_y);
    }
    if rng.gen_bool(GameConfig::RANDOM_TURN_CHANCE) {
        angle += rng
            .gen_range(-GameConfig::RANDOM_TURN_DEGREES..=GameConfig::RANDOM_TURN_DEGREES);
    }

    out.updates.push(Patch::set(
        paths::element_instance_field(location, id, "x"),
        x,
    ));
    out.updates.push(Patch::set(
        paths::element_instance_field(location, id, "y"),
        y,
    ));
    out.updates.push(Patch::set(
        paths::element_instance_field(location, id, "movementAngle"),
        angle,
    ));

    let dx = x - instance.x;
    if dx != 0.0 {
        let facing_right = dx > 0.0;
        if instance.facing_right != Some(facing_right) {
            out.updates.push(Patch::set(
                paths::element_instance_field(location, id, "facingRight"),
                facing_right,
            ));
        }
    }
    let frame = (instance.animation_frame.unwrap_or(0) + 1) % GameConfig::ANIMATION_FRAMES;
    out.updates.push(Patch::set(
        paths::element_instance_field(location, id, "animationFrame"),
        frame,
    ));

    moved.x = x;
    moved.y = y;
    moved
}

fn step_attacks<R: Rng + ?Sized>(
    game: &Game,
    id: &str,
    instance: &ElementInstance,
    def: &ElementDef,
    moved: Moved,
    rng: &mut R,
    out: &mut SimulationUpdate,
) {
    let Some(attack) = def.actions.get(&ActionKind::Attack) else {
        return;
    };
    let Some(range) = attack.attack_range else {
        return;
    };
    let damage = attack
        .damage
        .unwrap_or(Amount::Range(GameConfig::FIST_DAMAGE.0, GameConfig::FIST_DAMAGE.1));

    let now = game.instance.clock.total_minutes();
    // One cooldown per attacker, shared across all of its targets.
    let mut last_attack = instance.last_attack_time;
    let ready = |last: Option<i64>| {
        last.map_or(true, |t| now - t >= GameConfig::ATTACK_COOLDOWN_MINUTES)
    };
    let location = &game.instance.active_location;

    if let Some(character) = game.active_character() {
        let health_declared = game.definition.stat(GameConfig::HEALTH_STAT).is_some();
        let in_range =
            distance(moved.x, moved.y, character.x, character.y) <= range;
        if health_declared && in_range && ready(last_attack) {
            let dealt = damage.roll(rng).max(0);
            let remaining = (character.stat(GameConfig::HEALTH_STAT) - dealt).max(0);
            out.updates.push(Patch::set(
                game.character_stat_path(GameConfig::HEALTH_STAT),
                remaining,
            ));
            out.updates.push(Patch::set(
                paths::element_instance_field(location, id, "lastAttackTime"),
                now,
            ));
            out.messages.push(format!(
                "The {} attacks you for {dealt} damage!",
                instance.element
            ));
            last_attack = Some(now);
        }
    }

    if let Some(loc) = game.active_location() {
        for (other_id, other) in &loc.element_instances {
            if other_id == id
                || other.collection != CollectionKind::Animals
                || other.is_dead
            {
                continue;
            }
            if !ready(last_attack) {
                break;
            }
            if distance(moved.x, moved.y, other.x, other.y) > range {
                continue;
            }
            let dealt = damage.roll(rng).max(0);
            let other_def = game
                .definition
                .element(CollectionKind::Animals, &other.element);
            let current = other.health.or(other_def.and_then(|d| d.health)).unwrap_or(0);
            let remaining = (current - dealt).max(0);
            out.updates.push(Patch::set(
                paths::element_instance_field(location, other_id, "health"),
                remaining,
            ));
            if remaining == 0 {
                out.updates.push(Patch::set(
                    paths::element_instance_field(location, other_id, "isDead"),
                    true,
                ));
            }
            out.updates.push(Patch::set(
                paths::element_instance_field(location, id, "lastAttackTime"),
                now,
            ));
            out.messages.push(format!(
                "The {} attacks the {} for {dealt} damage!",
                instance.element, other.element
            ));
            last_attack = Some(now);
        }
    }
}

fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::apply_patches;
    use crate::testutil::{meadow_game, rng};

    fn wolf_mut(game: &mut crate::Game) -> &mut ElementInstance {
        game.instance
            .locations
            .get_mut("Meadow")
            .unwrap()
            .element_instances
            .get_mut("wolf-1")
            .unwrap()
    }

    fn wolf(game: &crate::Game) -> &ElementInstance {
        game.instance.active_instance("wolf-1").unwrap()
    }

    #[test]
    fn patrol_bounce_reflects_and_clamps() {
        let mut game = meadow_game();
        {
            let w = wolf_mut(&mut game);
            w.patrol = Some(crate::state::Patrol {
                min_x: 0.0,
                max_x: 10.0,
                min_y: 0.0,
                max_y: 10.0,
            });
            w.x = 0.5;
            w.y = 5.0;
            w.movement_angle = Some(180.0);
            w.movement_timer = Some(50);
            w.is_paused = false;
        }
        let mut rng = rng();

        let tick = update_animal_positions(&game, None, &mut rng);
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();
        let w = wolf(&game);
        // Walked off the left edge: clamped to the wall, heading mirrored.
        assert_eq!(w.x, 0.0);
        let angle = w.movement_angle.unwrap();
        assert!((angle - 180.0).abs() > 1.0, "angle still {angle}");

        let tick = update_animal_positions(&game, None, &mut rng);
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();
        let w = wolf(&game);
        assert!((0.0..=10.0).contains(&w.x), "x {} escaped patrol", w.x);
        assert!((0.0..=10.0).contains(&w.y), "y {} escaped patrol", w.y);
    }

    #[test]
    fn dead_animals_are_skipped() {
        let mut game = meadow_game();
        wolf_mut(&mut game).is_dead = true;
        let tick = update_animal_positions(&game, None, &mut rng());
        assert!(tick.updates.is_empty());
        assert!(tick.messages.is_empty());
    }

    #[test]
    fn off_viewport_animals_are_frozen() {
        let mut game = meadow_game();
        {
            let w = wolf_mut(&mut game);
            w.movement_timer = Some(50);
            w.is_paused = false;
        }
        let bounds = ViewportBounds {
            min_x: -10.0,
            max_x: -5.0,
            min_y: -10.0,
            max_y: -5.0,
        };
        let tick = update_animal_positions(&game, Some(&bounds), &mut rng());
        assert!(tick.updates.is_empty());
    }

    #[test]
    fn movement_alternates_with_pauses() {
        let mut game = meadow_game();
        {
            let w = wolf_mut(&mut game);
            w.movement_timer = Some(1);
            w.is_paused = false;
        }
        let tick = update_animal_positions(&game, None, &mut rng());
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();
        let w = wolf(&game);
        assert!(w.is_paused);
        assert_eq!(w.movement_timer, Some(GameConfig::ANIMAL_PAUSE_TICKS));
    }

    #[test]
    fn attack_hits_the_player_then_cools_down() {
        let mut game = meadow_game();
        let (ax, ay) = {
            let ava = &game.instance.characters["Ava"];
            (ava.x, ava.y)
        };
        {
            let w = wolf_mut(&mut game);
            w.x = ax;
            w.y = ay;
            w.patrol = None;
            w.last_attack_time = None;
        }
        let health_before = game.character_stat("Health");
        let mut rng = rng();

        let tick = update_animal_positions(&game, None, &mut rng);
        assert_eq!(tick.messages.len(), 1);
        assert!(tick.messages[0].contains("Wolf attacks you"));
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();
        assert!(game.character_stat("Health") < health_before);
        assert_eq!(
            wolf(&game).last_attack_time,
            Some(game.instance.clock.total_minutes())
        );

        // Same in-game minute: the cooldown blocks a second swing.
        let tick = update_animal_positions(&game, None, &mut rng);
        assert!(tick.messages.is_empty());
    }

    #[test]
    fn animal_combat_kills_but_keeps_the_body() {
        let mut game = meadow_game();
        {
            let w = wolf_mut(&mut game);
            w.patrol = None;
            w.last_attack_time = None;
        }
        let (wx, wy) = {
            let w = wolf(&game);
            (w.x, w.y)
        };
        let mut rabbit = ElementInstance::new(CollectionKind::Animals, "Rabbit", wx, wy);
        rabbit.health = Some(1);
        game.instance
            .locations
            .get_mut("Meadow")
            .unwrap()
            .element_instances
            .insert("rabbit-1".to_string(), rabbit);

        let tick = update_animal_positions(&game, None, &mut rng());
        assert_eq!(tick.messages.len(), 1);
        assert!(tick.messages[0].contains("Wolf attacks the Rabbit"));
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();

        // One point of health, any hit kills. The body stays in the world.
        let rabbit = game.instance.active_instance("rabbit-1").unwrap();
        assert_eq!(rabbit.health, Some(0));
        assert!(rabbit.is_dead);
        assert_eq!(
            wolf(&game).last_attack_time,
            Some(game.instance.clock.total_minutes())
        );
    }

    #[test]
    fn one_swing_per_cooldown_across_all_targets() {
        let mut game = meadow_game();
        let (ax, ay) = {
            let ava = &game.instance.characters["Ava"];
            (ava.x, ava.y)
        };
        {
            let w = wolf_mut(&mut game);
            w.x = ax;
            w.y = ay;
            w.patrol = None;
            w.last_attack_time = None;
        }
        let mut rabbit = ElementInstance::new(CollectionKind::Animals, "Rabbit", ax, ay);
        rabbit.health = Some(3);
        game.instance
            .locations
            .get_mut("Meadow")
            .unwrap()
            .element_instances
            .insert("rabbit-1".to_string(), rabbit);

        // Player and rabbit are both in range, but the wolf gets one swing:
        // hitting the player consumes the cooldown for every target kind.
        let tick = update_animal_positions(&game, None, &mut rng());
        assert_eq!(tick.messages.len(), 1);
        assert!(tick.messages[0].contains("attacks you"));
        game.instance = apply_patches(&game.instance, &tick.updates).unwrap();
        assert_eq!(
            game.instance.active_instance("rabbit-1").unwrap().health,
            Some(3)
        );

        // Same in-game minute, still on cooldown for either target kind.
        let tick = update_animal_positions(&game, None, &mut rng());
        assert!(tick.messages.is_empty());
    }
}
