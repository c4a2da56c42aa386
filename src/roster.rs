use crate::combatant::Combatant;
use crate::errors::ConstructionError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROSTER_SIZE: usize = 6;

/// Battle arity: how many combatants each side keeps on the field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BattleFormat {
    #[default]
    Single,
    Double,
}

impl BattleFormat {
    pub fn slot_count(&self) -> usize {
        match self {
            BattleFormat::Single => 1,
            BattleFormat::Double => 2,
        }
    }
}

impl fmt::Display for BattleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleFormat::Single => write!(f, "single"),
            BattleFormat::Double => write!(f, "double"),
        }
    }
}

/// One side's six combatants and the indices currently on the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roster {
    name: String,
    members: Vec<Combatant>,
    format: BattleFormat,

    // One entry per active slot. `None` means the slot's occupant fainted and
    // has not been replaced yet. Occupied entries are pairwise distinct and
    // never point at a fainted member.
    active: Vec<Option<usize>>,
}

impl Roster {
    /// Build a roster, sending out the first healthy members as leads.
    pub fn new(name: &str, members: Vec<Combatant>, format: BattleFormat) -> Result<Self, ConstructionError> {
        if members.len() != ROSTER_SIZE {
            return Err(ConstructionError::WrongRosterSize { found: members.len() });
        }

        let mut leads = members
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_fainted())
            .map(|(i, _)| i);
        let active: Vec<Option<usize>> = (0..format.slot_count()).map(|_| leads.next()).collect();

        if active[0].is_none() {
            return Err(ConstructionError::NoHealthyLead);
        }

        Ok(Roster {
            name: name.to_string(),
            members,
            format,
            active,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> BattleFormat {
        self.format
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub(crate) fn member_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index)
    }

    /// Raw active-slot table.
    pub fn active_slots(&self) -> &[Option<usize>] {
        &self.active
    }

    /// Roster index occupying `slot`, if any.
    pub fn active_index(&self, slot: usize) -> Option<usize> {
        self.active.get(slot).copied().flatten()
    }

    /// Combatant occupying `slot`, if any.
    pub fn active(&self, slot: usize) -> Option<&Combatant> {
        self.active_index(slot).and_then(|i| self.members.get(i))
    }

    /// Occupied slots as (slot, roster index, combatant).
    pub fn active_combatants(&self) -> impl Iterator<Item = (usize, usize, &Combatant)> {
        self.active
            .iter()
            .enumerate()
            .filter_map(move |(slot, entry)| entry.map(|i| (slot, i, &self.members[i])))
    }

    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.active.iter().position(|entry| *entry == Some(index))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slot_of(index).is_some()
    }

    /// Healthy members on the bench, in roster order.
    pub fn available_switches(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(i, c)| !c.is_fainted() && !self.is_active(*i))
            .map(|(i, _)| i)
            .collect()
    }

    /// Vacant slots that must be refilled before this side may move again.
    /// When fewer healthy members remain than vacant slots, only the lowest
    /// slots are required.
    pub fn pending_slots(&self) -> Vec<usize> {
        let available = self.available_switches().len();
        self.active
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_none())
            .map(|(slot, _)| slot)
            .take(available)
            .collect()
    }

    /// Slots that take an action this turn: every occupied slot plus every
    /// pending vacancy.
    pub fn acting_slots(&self) -> Vec<usize> {
        let pending = self.pending_slots();
        (0..self.active.len())
            .filter(|slot| self.active[*slot].is_some() || pending.contains(slot))
            .collect()
    }

    pub fn healthy_count(&self) -> usize {
        self.members.iter().filter(|c| !c.is_fainted()).count()
    }

    /// True iff every member has fainted.
    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(|c| c.is_fainted())
    }

    /// Put `index` into `slot`, resetting the outgoing combatant's stat stages.
    /// Returns the roster index that left the slot, if any.
    pub(crate) fn switch_in(&mut self, slot: usize, index: usize) -> Option<usize> {
        let outgoing = self.active_index(slot);
        if let Some(old) = outgoing {
            self.members[old].reset_stat_stages();
        }
        self.active[slot] = Some(index);
        outgoing
    }

    pub(crate) fn vacate(&mut self, slot: usize) {
        if let Some(entry) = self.active.get_mut(slot) {
            *entry = None;
        }
    }
}
