//! Memory System
//!
//! One observer's long-term working memory: entity sightings, remembered
//! locations, and witnessed events, with confidence decay and reinforcement.

use bevy_ecs::entity::Entity;

use crate::components::TilePosition;
use crate::memory::decay::{DecayConfig, DecaySweep};
use crate::memory::record::{
    EntityData, EventData, Importance, LocationData, MemoryData, MemoryRecord, Relationship,
};

/// Constants for reinforcement
pub mod memory_constants {
    /// Confidence added per reinforcement, clamped at full belief
    pub const REINFORCE_BOOST: f32 = 0.25;
}

/// Optional fields captured alongside an entity sighting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityObservation {
    pub position: Option<TilePosition>,
    pub health: Option<f32>,
}

impl EntityObservation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: TilePosition) -> Self {
        Self {
            position: Some(position),
            health: None,
        }
    }

    pub fn with_position(mut self, position: TilePosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = Some(health);
        self
    }
}

/// Optional fields for a remembered location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationOptions {
    /// Replaces the stored tags when non-empty
    pub tags: Vec<String>,
    pub importance: Option<Importance>,
}

impl LocationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Some(importance);
        self
    }
}

/// Optional fields for a remembered event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventOptions {
    pub participants: Vec<Entity>,
    pub outcome: Option<String>,
    pub importance: Option<Importance>,
}

impl EventOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_participants(mut self, participants: Vec<Entity>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Some(importance);
        self
    }
}

/// Long-term memory store for a single observer.
///
/// Owns every record and a local turn counter the manager keeps in sync
/// with the global one. All operations are fail-soft: unknown ids and
/// absent targets are no-ops or `None`, never errors.
#[derive(Debug)]
pub struct MemorySystem {
    observer: Entity,
    records: Vec<MemoryRecord>,
    next_memory_id: u64,
    turn: u64,
    last_decay_turn: u64,
}

impl MemorySystem {
    pub fn new(observer: Entity) -> Self {
        Self {
            observer,
            records: Vec::new(),
            next_memory_id: 1,
            turn: 0,
            last_decay_turn: 0,
        }
    }

    pub fn observer(&self) -> Entity {
        self.observer
    }

    /// Generates a unique record id for this observer.
    fn generate_id(&mut self) -> String {
        let id = format!("mem_{:08}", self.next_memory_id);
        self.next_memory_id += 1;
        id
    }

    /// Sets the local turn counter used for age computations.
    pub fn set_turn(&mut self, turn: u64) {
        self.turn = turn;
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in creation order.
    pub fn records(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter()
    }

    /// Upserts the sighting of another entity.
    ///
    /// At most one entity record exists per target: re-remembering updates
    /// the existing record (relationship, visibility, supplied last-known
    /// fields), restores full confidence, and refreshes `last_access_turn`.
    pub fn remember_entity(
        &mut self,
        target: Entity,
        relationship: Relationship,
        observed: EntityObservation,
    ) -> &MemoryRecord {
        let turn = self.turn;

        let idx = match self.entity_record_index(target) {
            Some(idx) => {
                let record = &mut self.records[idx];
                record.touch(turn);
                record.set_confidence(1.0);
                if let MemoryData::Entity(data) = &mut record.data {
                    data.relationship = relationship;
                    data.is_visible = true;
                    if let Some(position) = observed.position {
                        data.last_known_position = Some(position);
                    }
                    if let Some(health) = observed.health {
                        data.last_known_health = Some(health);
                    }
                }
                idx
            }
            None => {
                let id = self.generate_id();
                let data = MemoryData::Entity(EntityData {
                    target,
                    relationship,
                    last_known_position: observed.position,
                    last_known_health: observed.health,
                    is_visible: true,
                });
                self.records
                    .push(MemoryRecord::new(id, data, turn, Importance::Normal));
                self.records.len() - 1
            }
        };

        &self.records[idx]
    }

    /// Marks the target as no longer visible. The record and its last-known
    /// snapshot are retained; absent targets are a no-op.
    pub fn lose_sight_of(&mut self, target: Entity) {
        if let Some(idx) = self.entity_record_index(target) {
            if let MemoryData::Entity(data) = &mut self.records[idx].data {
                data.is_visible = false;
            }
        }
    }

    /// Upserts a remembered location, keyed by tile coordinates.
    pub fn remember_location(
        &mut self,
        x: i32,
        y: i32,
        description: impl Into<String>,
        opts: LocationOptions,
    ) -> &MemoryRecord {
        let turn = self.turn;
        let description = description.into();

        let existing = self.records.iter().position(|r| {
            r.as_location()
                .map(|loc| loc.x == x && loc.y == y)
                .unwrap_or(false)
        });

        let idx = match existing {
            Some(idx) => {
                let record = &mut self.records[idx];
                record.touch(turn);
                record.set_confidence(1.0);
                if let Some(importance) = opts.importance {
                    record.importance = record.importance.max(importance);
                }
                if let MemoryData::Location(data) = &mut record.data {
                    data.description = description;
                    if !opts.tags.is_empty() {
                        data.tags = opts.tags;
                    }
                }
                idx
            }
            None => {
                let id = self.generate_id();
                let data = MemoryData::Location(LocationData {
                    x,
                    y,
                    description,
                    tags: opts.tags,
                });
                self.records.push(MemoryRecord::new(
                    id,
                    data,
                    turn,
                    opts.importance.unwrap_or_default(),
                ));
                self.records.len() - 1
            }
        };

        &self.records[idx]
    }

    /// Records a witnessed event. Events are never deduplicated: every call
    /// appends a fresh record.
    pub fn remember_event(
        &mut self,
        event_type: impl Into<String>,
        description: impl Into<String>,
        opts: EventOptions,
    ) -> &MemoryRecord {
        let turn = self.turn;
        let id = self.generate_id();
        let data = MemoryData::Event(EventData {
            event_type: event_type.into(),
            description: description.into(),
            participants: opts.participants,
            outcome: opts.outcome.unwrap_or_default(),
        });
        self.records.push(MemoryRecord::new(
            id,
            data,
            turn,
            opts.importance.unwrap_or_default(),
        ));
        &self.records[self.records.len() - 1]
    }

    pub fn memory_of_entity(&self, target: Entity) -> Option<&MemoryRecord> {
        self.entity_record_index(target).map(|idx| &self.records[idx])
    }

    pub fn has_memory_of_entity(&self, target: Entity) -> bool {
        self.entity_record_index(target).is_some()
    }

    /// Entity records with the given relationship.
    pub fn memories_by_relationship(&self, relationship: Relationship) -> Vec<&MemoryRecord> {
        self.records
            .iter()
            .filter(|r| {
                r.as_entity()
                    .map(|e| e.relationship == relationship)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Entity records the observer regards as hostile.
    pub fn hostile_entities(&self) -> Vec<&MemoryRecord> {
        self.memories_by_relationship(Relationship::Hostile)
    }

    /// Top-n records by last access, newest first; creation turn breaks
    /// ties.
    pub fn recent_memories(&self, n: usize) -> Vec<&MemoryRecord> {
        let mut refs: Vec<&MemoryRecord> = self.records.iter().collect();
        refs.sort_by(|a, b| {
            b.last_access_turn
                .cmp(&a.last_access_turn)
                .then(b.created_turn.cmp(&a.created_turn))
        });
        refs.truncate(n);
        refs
    }

    /// Top-n records by importance, ties broken by recency.
    pub fn important_memories(&self, n: usize) -> Vec<&MemoryRecord> {
        let mut refs: Vec<&MemoryRecord> = self.records.iter().collect();
        refs.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then(b.last_access_turn.cmp(&a.last_access_turn))
                .then(b.created_turn.cmp(&a.created_turn))
        });
        refs.truncate(n);
        refs
    }

    /// Strengthens a record: confidence moves toward full belief and
    /// importance rises one tier, capped at Critical. Returns `false` for
    /// unknown ids (a no-op, not an error).
    pub fn reinforce(&mut self, id: &str) -> bool {
        let turn = self.turn;
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.set_confidence(record.confidence + memory_constants::REINFORCE_BOOST);
                record.importance = record.importance.escalate();
                record.touch(turn);
                true
            }
            None => false,
        }
    }

    /// Applies the retention policy to every record.
    ///
    /// Confidence drains only for the turns since the previous sweep that
    /// fall beyond a record's retention window, so sweeping every turn and
    /// sweeping once after a thousand turns converge on the same result.
    pub fn process_decay(&mut self, config: &DecayConfig) -> DecaySweep {
        let turn = self.turn;
        let last_sweep = self.last_decay_turn;
        let mut sweep = DecaySweep::default();

        self.records.retain_mut(|record| {
            let tier = config.tier(record.importance);
            let decay_start = record.last_access_turn + tier.retention_turns;
            let from = last_sweep.max(decay_start);
            if turn > from {
                let over_age = (turn - from) as f32;
                record.set_confidence(
                    record.confidence - over_age * tier.confidence_loss_per_turn,
                );
            }

            if record.confidence < tier.removal_threshold {
                sweep.removed += 1;
                return false;
            }
            if record.confidence < config.demote_below {
                record.importance = record.importance.demote();
                sweep.demoted += 1;
            }
            true
        });

        self.last_decay_turn = turn;
        sweep
    }

    fn entity_record_index(&self, target: Entity) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.as_entity().map(|e| e.target) == Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn observer_and_target() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn test_remember_entity_upserts() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_entity(target, Relationship::Hostile, EntityObservation::new());
        memory.remember_entity(target, Relationship::Friendly, EntityObservation::new());

        assert_eq!(memory.len(), 1);
        let record = memory.memory_of_entity(target).unwrap();
        assert_eq!(
            record.as_entity().unwrap().relationship,
            Relationship::Friendly
        );
    }

    #[test]
    fn test_upsert_keeps_last_known_fields() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_entity(
            target,
            Relationship::Hostile,
            EntityObservation::at(TilePosition::new(3, 4)).with_health(7.5),
        );
        // A later sighting without position/health keeps the old snapshot.
        memory.remember_entity(target, Relationship::Hostile, EntityObservation::new());

        let data = memory.memory_of_entity(target).unwrap().as_entity().unwrap();
        assert_eq!(data.last_known_position, Some(TilePosition::new(3, 4)));
        assert_eq!(data.last_known_health, Some(7.5));
    }

    #[test]
    fn test_lose_sight_retains_record() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_entity(
            target,
            Relationship::Hostile,
            EntityObservation::at(TilePosition::new(9, 9)),
        );
        memory.lose_sight_of(target);

        let data = memory.memory_of_entity(target).unwrap().as_entity().unwrap();
        assert!(!data.is_visible);
        assert_eq!(data.last_known_position, Some(TilePosition::new(9, 9)));
    }

    #[test]
    fn test_hostile_filter() {
        let mut world = World::new();
        let observer = world.spawn_empty().id();
        let hostile = world.spawn_empty().id();
        let friendly = world.spawn_empty().id();

        let mut memory = MemorySystem::new(observer);
        memory.remember_entity(hostile, Relationship::Hostile, EntityObservation::new());
        memory.remember_entity(friendly, Relationship::Friendly, EntityObservation::new());

        let hostiles = memory.hostile_entities();
        assert_eq!(hostiles.len(), 1);
        assert_eq!(hostiles[0].as_entity().unwrap().target, hostile);
    }

    #[test]
    fn test_events_never_dedupe() {
        let (observer, _) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_event("ambush", "ambushed at the bridge", EventOptions::new());
        memory.remember_event("ambush", "ambushed at the bridge", EventOptions::new());

        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_location_upserts_by_coordinates() {
        let (observer, _) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_location(2, 3, "an old well", LocationOptions::new());
        memory.remember_location(
            2,
            3,
            "a poisoned well",
            LocationOptions::new().with_importance(Importance::High),
        );
        memory.remember_location(5, 5, "a shrine", LocationOptions::new());

        assert_eq!(memory.len(), 2);
        let well = memory
            .records()
            .find(|r| r.as_location().map(|l| (l.x, l.y)) == Some((2, 3)))
            .unwrap();
        assert_eq!(well.as_location().unwrap().description, "a poisoned well");
        assert_eq!(well.importance, Importance::High);
    }

    #[test]
    fn test_reinforce_drives_confidence_and_importance() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        let id = memory
            .remember_entity(target, Relationship::Neutral, EntityObservation::new())
            .id
            .clone();

        for _ in 0..5 {
            assert!(memory.reinforce(&id));
        }

        let record = memory.memory_of_entity(target).unwrap();
        assert_eq!(record.confidence, 1.0);
        assert!(record.importance >= Importance::High);
    }

    #[test]
    fn test_reinforce_unknown_id_is_noop() {
        let (observer, _) = observer_and_target();
        let mut memory = MemorySystem::new(observer);
        assert!(!memory.reinforce("mem_99999999"));
    }

    #[test]
    fn test_decay_removes_stale_normal_records() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_entity(target, Relationship::Neutral, EntityObservation::new());
        memory.set_turn(1000);
        memory.process_decay(&DecayConfig::default());

        assert!(!memory.has_memory_of_entity(target));
    }

    #[test]
    fn test_decay_spares_reinforced_records() {
        let mut world = World::new();
        let observer = world.spawn_empty().id();
        let forgotten = world.spawn_empty().id();
        let precious = world.spawn_empty().id();

        let mut memory = MemorySystem::new(observer);
        memory.remember_entity(forgotten, Relationship::Neutral, EntityObservation::new());
        let id = memory
            .remember_entity(precious, Relationship::Hostile, EntityObservation::new())
            .id
            .clone();
        memory.reinforce(&id);
        memory.reinforce(&id);
        assert!(memory.memory_of_entity(precious).unwrap().importance >= Importance::High);

        memory.set_turn(1000);
        let sweep = memory.process_decay(&DecayConfig::default());

        assert!(!memory.has_memory_of_entity(forgotten));
        assert!(memory.has_memory_of_entity(precious));
        assert_eq!(sweep.removed, 1);
    }

    #[test]
    fn test_incremental_sweeps_match_single_sweep() {
        let (observer, target) = observer_and_target();

        let mut swept_once = MemorySystem::new(observer);
        swept_once.remember_entity(target, Relationship::Neutral, EntityObservation::new());
        swept_once.set_turn(600);
        swept_once.process_decay(&DecayConfig::default());

        let mut swept_twice = MemorySystem::new(observer);
        swept_twice.remember_entity(target, Relationship::Neutral, EntityObservation::new());
        swept_twice.set_turn(400);
        swept_twice.process_decay(&DecayConfig::default());
        swept_twice.set_turn(600);
        swept_twice.process_decay(&DecayConfig::default());

        let once = swept_once.memory_of_entity(target);
        let twice = swept_twice.memory_of_entity(target);
        match (once, twice) {
            (Some(a), Some(b)) => {
                assert!((a.confidence - b.confidence).abs() < 1e-5);
            }
            (None, None) => {}
            _ => panic!("sweep cadence changed the outcome"),
        }
    }

    #[test]
    fn test_recent_memories_ordering() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_event("patrol", "walked the wall", EventOptions::new());
        memory.set_turn(5);
        memory.remember_event("ambush", "ambushed at the gate", EventOptions::new());
        memory.set_turn(9);
        memory.remember_entity(target, Relationship::Hostile, EntityObservation::new());

        let recent = memory.recent_memories(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].last_access_turn, 9);
        assert_eq!(recent[1].last_access_turn, 5);
    }

    #[test]
    fn test_important_memories_ordering() {
        let (observer, _) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_event(
            "rumor",
            "heard about a cave",
            EventOptions::new().with_importance(Importance::Trivial),
        );
        memory.remember_event(
            "ambush",
            "ambushed at the gate",
            EventOptions::new().with_importance(Importance::Critical),
        );
        memory.remember_event("patrol", "walked the wall", EventOptions::new());

        let important = memory.important_memories(2);
        assert_eq!(important[0].importance, Importance::Critical);
        assert_eq!(important[1].importance, Importance::Normal);
    }

    #[test]
    fn test_decay_demotes_fading_records() {
        let (observer, target) = observer_and_target();
        let mut memory = MemorySystem::new(observer);

        memory.remember_entity(target, Relationship::Neutral, EntityObservation::new());

        // Age the record into the draining region but above removal.
        let config = DecayConfig::default();
        let tier = config.normal;
        let age = tier.retention_turns + 400; // 0.8 confidence lost
        memory.set_turn(age);
        let sweep = memory.process_decay(&config);

        assert_eq!(sweep.removed, 0);
        assert_eq!(sweep.demoted, 1);
        let record = memory.memory_of_entity(target).unwrap();
        assert_eq!(record.importance, Importance::Trivial);
        assert!(record.confidence < config.demote_below);
    }
}
