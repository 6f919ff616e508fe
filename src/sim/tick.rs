//! Fixed timestep simulation tick
//!
//! One step runs its phases in a fixed order: spawn, movement, towers,
//! projectiles, cleanup, then the wave and terminal checks. Every phase walks
//! its entities in ascending ID order, so identical inputs always produce
//! identical states.

use super::enemy::{Enemy, EnemyId, Kill};
use super::projectile::{Flight, resolve_hit};
use super::state::{GameEvent, GamePhase, GameState};
use super::wave::WaveCompletion;
use crate::consts::{BOSS_KILL_CREDITS, WAVE_CLEAR_CREDITS};

/// Advance the game state by one step of `dt` seconds
///
/// `dt` is scaled by the game speed. Once the run is won or lost the state is
/// frozen and further calls do nothing.
pub fn tick(state: &mut GameState, dt: f32) {
    if state.is_over() {
        return;
    }
    let dt = dt.max(0.0) * state.speed;
    state.time += dt;

    spawn_enemies(state, dt);
    move_enemies(state, dt);
    fire_towers(state, dt);
    update_projectiles(state, dt);

    // Killed and breached enemies leave the field
    state.enemies.retain(|e| e.alive);

    if state.economy.is_defeated() {
        state.phase = GamePhase::Defeat;
        log::info!("Defeat at wave {}", state.waves.wave_number());
        state.emit(GameEvent::Defeat);
        return;
    }

    match state.waves.poll_completion(state.enemies.len()) {
        Some(WaveCompletion::Cleared { wave }) => {
            state.economy.grant_credits(WAVE_CLEAR_CREDITS);
            state.emit(GameEvent::WaveCleared { wave });
        }
        Some(WaveCompletion::Final) => {
            state.phase = GamePhase::Victory;
            log::info!(
                "Victory with {} lives and {} gold",
                state.economy.lives,
                state.economy.gold
            );
            state.emit(GameEvent::Victory);
        }
        None => {}
    }
}

fn spawn_enemies(state: &mut GameState, dt: f32) {
    if let Some(entry) = state.waves.tick_spawn(dt) {
        let id = EnemyId(state.next_entity_id());
        log::debug!("Spawned enemy {:?} ({} hp)", id, entry.health);
        state.enemies.push(Enemy::spawn(id, &entry));
    }
}

/// Move every living enemy; an enemy spawned this step holds at the start
fn move_enemies(state: &mut GameState, dt: f32) {
    let mut breached = Vec::new();
    for enemy in &mut state.enemies {
        if enemy.fresh {
            enemy.fresh = false;
            continue;
        }
        if enemy.advance(&state.path, dt) {
            breached.push(enemy.id);
        }
    }

    for id in breached {
        let lives_left = state.economy.breach();
        log::debug!("Enemy {:?} breached, {} lives left", id, lives_left);
        state.emit(GameEvent::EnemyBreached { id, lives_left });
    }
}

fn fire_towers(state: &mut GameState, dt: f32) {
    let mut shots = Vec::new();
    for tower in &mut state.towers {
        if let Some(target) = tower.update(dt, &state.enemies, &state.path) {
            shots.push(tower.fire(0, target));
        }
    }

    for mut shot in shots {
        shot.id = state.next_entity_id();
        state.projectiles.push(shot);
    }
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let mut kills: Vec<Kill> = Vec::new();
    let mut in_flight = Vec::with_capacity(state.projectiles.len());

    for mut projectile in std::mem::take(&mut state.projectiles) {
        let Some(index) = state.enemy_index(projectile.target) else {
            continue;
        };
        if !state.enemies[index].alive {
            // Stale: the target died or breached first
            continue;
        }
        let target_pos = state.enemies[index].position(&state.path);
        match projectile.advance(target_pos, dt) {
            Flight::InFlight => in_flight.push(projectile),
            Flight::Arrived => kills.extend(resolve_hit(
                &mut state.enemies,
                index,
                projectile.damage,
                projectile.effect,
                &state.path,
            )),
        }
    }
    state.projectiles = in_flight;

    for kill in kills {
        state.economy.reward(kill.reward);
        if kill.boss {
            state.economy.grant_credits(BOSS_KILL_CREDITS);
            log::info!("Boss {:?} destroyed", kill.id);
        }
        state.emit(GameEvent::EnemyKilled {
            id: kill.id,
            reward: kill.reward,
            boss: kill.boss,
        });
    }
}
