//! A module for defining AI behaviors for battle opponents.

use crate::battle::action::Action;
use crate::battle::rng::BattleRng;
use crate::combatant::Combatant;
use crate::moves::Move;
use crate::roster::Roster;
use crate::type_chart::TypeChart;
use ordered_float::OrderedFloat;
use tracing::debug;

/// Below this health fraction the heuristic AI tries to switch out.
pub const LOW_HEALTH_THRESHOLD: f64 = 0.3;

/// A trait for any system that can decide on a side's actions for a turn.
pub trait Behavior {
    /// Produce one action per acting slot of `own`.
    fn choose_actions(
        &self,
        own: &Roster,
        opposing: &Roster,
        type_chart: &TypeChart,
        rng: &mut dyn BattleRng,
    ) -> Vec<Action>;
}

/// Picks which opposing active slot a move is aimed at.
pub trait TargetStrategy {
    fn choose_target(&self, attacker: &Combatant, opposing: &Roster, rng: &mut dyn BattleRng) -> usize;
}

/// Uniform choice among occupied opposing slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTarget;

impl TargetStrategy for RandomTarget {
    fn choose_target(&self, _attacker: &Combatant, opposing: &Roster, rng: &mut dyn BattleRng) -> usize {
        let occupied: Vec<usize> = opposing.active_combatants().map(|(slot, _, _)| slot).collect();
        if occupied.is_empty() {
            return 0;
        }
        occupied[pick(rng, occupied.len())]
    }
}

/// Greedy single-ply controller: switch out when weak or when a teammate has
/// a type advantage, otherwise use the move with the best power times
/// effectiveness.
pub struct HeuristicAI {
    targeting: Box<dyn TargetStrategy>,
}

impl HeuristicAI {
    pub fn new() -> Self {
        Self::with_targeting(RandomTarget)
    }

    pub fn with_targeting(targeting: impl TargetStrategy + 'static) -> Self {
        Self {
            targeting: Box::new(targeting),
        }
    }

    fn should_switch(&self, own: &Roster, active: &Combatant, opposing: &Roster, type_chart: &TypeChart) -> bool {
        if active.hp_fraction() < LOW_HEALTH_THRESHOLD {
            return true;
        }

        let opposing_types: Vec<_> = opposing
            .active_combatants()
            .flat_map(|(_, _, c)| c.types().iter().copied())
            .collect();

        own.available_switches().into_iter().any(|index| {
            own.member(index).is_some_and(|teammate| {
                teammate.moves().iter().any(|m| {
                    opposing_types
                        .iter()
                        .any(|&t| type_chart.is_super_effective(m.element(), t))
                })
            })
        })
    }

    fn choose_move(
        &self,
        user: usize,
        attacker: &Combatant,
        opposing: &Roster,
        type_chart: &TypeChart,
        rng: &mut dyn BattleRng,
    ) -> Action {
        let target_slot = self.targeting.choose_target(attacker, opposing, rng);
        let moves = attacker.moves();

        let best = opposing.active(target_slot).and_then(|defender| {
            moves
                .iter()
                .map(|m| (m, score_move(m, defender, type_chart)))
                .rev()
                .max_by_key(|(_, score)| OrderedFloat(*score))
                .filter(|(_, score)| *score > 0.0)
        });

        let chosen = match best {
            Some((m, score)) => {
                debug!(user, move_name = m.name(), score, target_slot, "ai picked best move");
                m
            }
            None => {
                let m = &moves[pick(rng, moves.len())];
                debug!(user, move_name = m.name(), target_slot, "ai picked random move");
                m
            }
        };

        Action::attack_slot(user, chosen.name(), target_slot)
    }
}

impl Default for HeuristicAI {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for HeuristicAI {
    fn choose_actions(
        &self,
        own: &Roster,
        opposing: &Roster,
        type_chart: &TypeChart,
        rng: &mut dyn BattleRng,
    ) -> Vec<Action> {
        let mut actions: Vec<(usize, Action)> = Vec::new();
        let mut reserved = Vec::new();
        let acting_slots = own.acting_slots();

        // Mandatory replacements claim bench members before any voluntary switch.
        for &slot in acting_slots.iter().filter(|slot| own.active_index(**slot).is_none()) {
            if let Some(target_index) = pick_switch(own, &reserved, rng) {
                debug!(slot, target_index, "ai sends replacement");
                reserved.push(target_index);
                actions.push((slot, Action::switch_into(slot, target_index)));
            }
        }

        for slot in acting_slots {
            let Some((user, combatant)) = own.active_index(slot).and_then(|i| own.member(i).map(|c| (i, c))) else {
                continue;
            };

            if self.should_switch(own, combatant, opposing, type_chart) {
                if let Some(target_index) = pick_switch(own, &reserved, rng) {
                    debug!(slot, user, target_index, hp = combatant.hp_fraction(), "ai switches out");
                    reserved.push(target_index);
                    actions.push((slot, Action::switch_into(slot, target_index)));
                    continue;
                }
            }

            actions.push((slot, self.choose_move(user, combatant, opposing, type_chart, rng)));
        }

        actions.sort_by_key(|(slot, _)| *slot);
        actions.into_iter().map(|(_, action)| action).collect()
    }
}

/// Always uses the first known move on the first occupied opposing slot and
/// sends in the first healthy bench member when a slot is vacant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMoveAI;

impl Behavior for FirstMoveAI {
    fn choose_actions(
        &self,
        own: &Roster,
        opposing: &Roster,
        _type_chart: &TypeChart,
        _rng: &mut dyn BattleRng,
    ) -> Vec<Action> {
        let target_slot = opposing.active_combatants().map(|(slot, _, _)| slot).next().unwrap_or(0);
        let mut bench = own.available_switches().into_iter();

        own.acting_slots()
            .into_iter()
            .filter_map(|slot| match own.active_index(slot) {
                Some(user) => own
                    .member(user)
                    .and_then(|c| c.moves().first())
                    .map(|m| Action::attack_slot(user, m.name(), target_slot)),
                None => bench.next().map(|target_index| Action::switch_into(slot, target_index)),
            })
            .collect()
    }
}

/// `power * product of type multipliers` against the defender. Status moves score 0.
pub fn score_move(move_used: &Move, defender: &Combatant, type_chart: &TypeChart) -> f64 {
    move_used.power() as f64 * type_chart.multiplier_against(move_used.element(), defender.types())
}

/// Uniform pick among healthy bench members not already chosen this turn.
fn pick_switch(own: &Roster, reserved: &[usize], rng: &mut dyn BattleRng) -> Option<usize> {
    let candidates: Vec<usize> = own
        .available_switches()
        .into_iter()
        .filter(|i| !reserved.contains(i))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[pick(rng, candidates.len())])
}

// A single candidate needs no draw.
fn pick(rng: &mut dyn BattleRng, len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        rng.choose_index(len)
    }
}
