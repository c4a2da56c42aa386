use crate::battle::action::Action;
use crate::battle::calculators::{calculate_attack_outcome, AttackOutcome};
use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, EventBus, Side};
use crate::battle::stats::effective_speed;
use crate::battle::validation::validate_actions;
use crate::errors::{BattleEngineError, BattleResult, ConstructionError, StateError};
use crate::roster::Roster;
use crate::type_chart::TypeChart;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::{debug, info, warn};

/// A move queued for the move phase of a turn.
#[derive(Debug, Clone)]
struct QueuedMove {
    side: Side,
    user: usize,
    move_name: String,
    target_slot: usize,
    speed: f64,
}

/// Owns both rosters and drives the turn state machine. All mutation of
/// battle state goes through [`BattleEngine::execute_turn`].
#[derive(Debug, Clone)]
pub struct BattleEngine {
    rosters: [Roster; 2],
    type_chart: TypeChart,
    turn: u32,
    phase: BattlePhase,
    last_turn_events: EventBus,
}

impl BattleEngine {
    pub fn new(side_a: Roster, side_b: Roster, type_chart: TypeChart) -> Result<Self, ConstructionError> {
        if side_a.format() != side_b.format() {
            return Err(ConstructionError::ArityMismatch {
                side_a: side_a.format().to_string(),
                side_b: side_b.format().to_string(),
            });
        }

        debug!(
            side_a = side_a.name(),
            side_b = side_b.name(),
            format = %side_a.format(),
            "battle created"
        );

        Ok(Self {
            rosters: [side_a, side_b],
            type_chart,
            turn: 0,
            phase: BattlePhase::AwaitingActions,
            last_turn_events: EventBus::new(),
        })
    }

    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side.index()]
    }

    pub fn type_chart(&self) -> &TypeChart {
        &self.type_chart
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> &BattlePhase {
        &self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::BattleOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The side that won, or `None` for a draw. Only valid once the battle is over.
    pub fn winner(&self) -> Result<Option<Side>, StateError> {
        match self.outcome() {
            Some(BattleOutcome::Winner(side)) => Ok(Some(side)),
            Some(BattleOutcome::Draw) => Ok(None),
            None => Err(StateError::BattleNotOver),
        }
    }

    /// Events of the most recently resolved turn, kept even when resolution
    /// failed partway through.
    pub fn last_turn_events(&self) -> &EventBus {
        &self.last_turn_events
    }

    /// Slots that must be refilled before the owning side may move again.
    pub fn pending_replacements(&self) -> &[(Side, usize)] {
        match &self.phase {
            BattlePhase::FaintedReplacementPending { slots } => slots,
            _ => &[],
        }
    }

    /// Validate and resolve one turn.
    ///
    /// A rejected turn leaves the battle untouched. Once resolution starts,
    /// effects applied before a failure are kept and their events remain
    /// available through [`BattleEngine::last_turn_events`].
    pub fn execute_turn(
        &mut self,
        side_a_actions: &[Action],
        side_b_actions: &[Action],
        rng: &mut dyn BattleRng,
    ) -> BattleResult<EventBus> {
        let submitted = [side_a_actions, side_b_actions];

        if self.is_over() {
            warn!("turn submitted after the battle ended");
            return Err(StateError::BattleAlreadyOver.into());
        }

        for &(side, slot) in self.pending_replacements() {
            let replaced = submitted[side.index()]
                .iter()
                .any(|action| matches!(action, Action::Switch { slot: s, .. } if *s == slot));
            if !replaced {
                warn!(%side, slot, "turn rejected: replacement required");
                return Err(StateError::ReplacementRequired { side, slot }.into());
            }
        }

        for side in Side::both() {
            if let Err(source) = validate_actions(self.roster(side), submitted[side.index()]) {
                warn!(%side, error = %source, "turn rejected: invalid action");
                return Err(BattleEngineError::Validation { side, source });
            }
        }

        self.resolve_validated(submitted, rng)
    }

    fn resolve_validated(&mut self, submitted: [&[Action]; 2], rng: &mut dyn BattleRng) -> BattleResult<EventBus> {
        let mut bus = EventBus::new();
        self.phase = BattlePhase::Resolving;
        bus.push(BattleEvent::TurnStarted {
            turn_number: self.turn + 1,
        });
        debug!(turn = self.turn + 1, "turn started");

        let result = self.resolve(submitted, rng, &mut bus);

        self.turn += 1;
        bus.push(BattleEvent::TurnEnded);
        self.settle_phase(&mut bus);
        self.last_turn_events = bus.clone();

        if let Err(e) = &result {
            warn!(turn = self.turn, error = %e, events = bus.len(), "turn aborted mid-resolution");
        }
        result.map(|_| bus)
    }

    fn resolve(&mut self, submitted: [&[Action]; 2], rng: &mut dyn BattleRng, bus: &mut EventBus) -> BattleResult<()> {
        // --- Phase 1: Switches, both sides, unconditionally ---
        for side in Side::both() {
            for action in submitted[side.index()] {
                if let Action::Switch { slot, target_index } = action {
                    self.perform_switch(side, *slot, *target_index, bus)?;
                }
            }
        }

        let only_switches = submitted.iter().all(|actions| actions.iter().all(Action::is_switch));
        if only_switches {
            debug!("switch-only turn, skipping move phase");
            return Ok(());
        }

        // --- Phase 2: Order moves by speed; ties keep submission order ---
        let mut queue = Vec::new();
        for side in Side::both() {
            for action in submitted[side.index()] {
                if let Action::Move {
                    user,
                    move_name,
                    target_slot,
                } = action
                {
                    let actor = self.roster(side).member(*user).ok_or_else(|| {
                        BattleEngineError::InconsistentState(format!("{} has no member {}", side, user))
                    })?;
                    queue.push(QueuedMove {
                        side,
                        user: *user,
                        move_name: move_name.clone(),
                        target_slot: *target_slot,
                        speed: effective_speed(actor),
                    });
                }
            }
        }
        queue.sort_by_key(|queued| Reverse(OrderedFloat(queued.speed)));
        debug!(
            order = ?queue.iter().map(|q| (q.side, q.user, q.move_name.as_str())).collect::<Vec<_>>(),
            "move order"
        );

        // --- Phase 3: Execute in order ---
        for queued in queue {
            self.perform_move(&queued, rng, bus)?;
        }

        Ok(())
    }

    fn perform_switch(&mut self, side: Side, slot: usize, target_index: usize, bus: &mut EventBus) -> BattleResult<()> {
        let roster = &mut self.rosters[side.index()];
        let new_combatant = roster
            .member(target_index)
            .map(|c| c.name().to_string())
            .ok_or_else(|| BattleEngineError::InconsistentState(format!("{} has no member {}", side, target_index)))?;

        let outgoing = roster.switch_in(slot, target_index);
        let old_combatant = outgoing.and_then(|i| roster.member(i)).map(|c| c.name().to_string());

        debug!(%side, slot, from = ?old_combatant, to = %new_combatant, "switch");
        bus.push(BattleEvent::Switched {
            side,
            slot,
            old_combatant,
            new_combatant,
        });
        Ok(())
    }

    fn perform_move(&mut self, queued: &QueuedMove, rng: &mut dyn BattleRng, bus: &mut EventBus) -> BattleResult<()> {
        let side = queued.side;
        let defending_side = side.opponent();

        let attackers = self.roster(side);
        let attacker = attackers.member(queued.user).ok_or_else(|| {
            BattleEngineError::InconsistentState(format!("{} has no member {}", side, queued.user))
        })?;
        if attacker.is_fainted() || !attackers.is_active(queued.user) {
            debug!(%side, user = queued.user, "user fainted before acting");
            return Ok(());
        }
        let user_name = attacker.name().to_string();
        let move_used = attacker.find_move(&queued.move_name).cloned().ok_or_else(|| {
            BattleEngineError::InconsistentState(format!("{} does not know {}", user_name, queued.move_name))
        })?;

        bus.push(BattleEvent::MoveUsed {
            side,
            user: user_name.clone(),
            move_used: move_used.clone(),
        });

        let defenders = self.roster(defending_side);
        let target = defenders.active_index(queued.target_slot).and_then(|i| {
            defenders
                .member(i)
                .filter(|c| !c.is_fainted())
                .map(|c| (i, c))
        });
        let Some((target_index, defender)) = target else {
            debug!(%side, user = %user_name, "no target");
            bus.push(BattleEvent::NoTarget {
                side,
                user: user_name,
                move_used,
            });
            return Ok(());
        };

        let outcome = calculate_attack_outcome(attacker, defender, &move_used, &self.type_chart, rng);

        let (damage, multiplier) = match outcome {
            AttackOutcome::Missed => {
                debug!(%side, user = %user_name, move_name = move_used.name(), "missed");
                bus.push(BattleEvent::MoveMissed {
                    side,
                    user: user_name,
                    move_used,
                });
                return Ok(());
            }
            AttackOutcome::Hit { damage, multiplier } => (damage, multiplier),
        };

        if move_used.is_status() {
            debug!(%side, user = %user_name, move_name = move_used.name(), "status move has no effect");
            return Ok(());
        }

        if multiplier != 1.0 {
            bus.push(BattleEvent::Effectiveness { multiplier });
        }
        let damage = if multiplier == 0.0 { 0 } else { damage };

        let defender = self.rosters[defending_side.index()]
            .member_mut(target_index)
            .ok_or_else(|| {
                BattleEngineError::InconsistentState(format!("{} has no member {}", defending_side, target_index))
            })?;
        let dealt = defender.take_damage(damage.min(u16::MAX as u32) as u16);
        let target_name = defender.name().to_string();
        let remaining_hp = defender.current_hp();
        let fainted = defender.is_fainted();

        debug!(
            %side,
            user = %user_name,
            move_name = move_used.name(),
            target = %target_name,
            damage = dealt,
            remaining_hp,
            "hit"
        );
        bus.push(BattleEvent::DamageDealt {
            side: defending_side,
            target: target_name.clone(),
            damage: dealt,
            remaining_hp,
        });

        if fainted {
            let defenders = &mut self.rosters[defending_side.index()];
            defenders.vacate(queued.target_slot);
            debug!(
                side = %defending_side,
                slot = queued.target_slot,
                combatant = %target_name,
                remaining = defenders.healthy_count(),
                "fainted"
            );
            bus.push(BattleEvent::Fainted {
                side: defending_side,
                slot: queued.target_slot,
                combatant: target_name,
            });
        }

        Ok(())
    }

    /// Recompute the phase from roster state after resolution.
    fn settle_phase(&mut self, bus: &mut EventBus) {
        let defeated: Vec<Side> = Side::both()
            .into_iter()
            .filter(|side| self.roster(*side).is_defeated())
            .collect();

        for side in &defeated {
            bus.push(BattleEvent::SideDefeated { side: *side });
        }

        let outcome = match defeated.as_slice() {
            [] => None,
            [side] => Some(BattleOutcome::Winner(side.opponent())),
            _ => Some(BattleOutcome::Draw),
        };

        if let Some(outcome) = outcome {
            info!(turn = self.turn, ?outcome, "battle over");
            bus.push(BattleEvent::BattleEnded { outcome });
            self.phase = BattlePhase::BattleOver(outcome);
            return;
        }

        let slots: Vec<(Side, usize)> = Side::both()
            .into_iter()
            .flat_map(|side| {
                self.roster(side)
                    .pending_slots()
                    .into_iter()
                    .map(move |slot| (side, slot))
            })
            .collect();

        if slots.is_empty() {
            self.phase = BattlePhase::AwaitingActions;
        } else {
            for &(side, slot) in &slots {
                bus.push(BattleEvent::ReplacementRequired { side, slot });
            }
            debug!(?slots, "replacements required");
            self.phase = BattlePhase::FaintedReplacementPending { slots };
        }
    }
}
