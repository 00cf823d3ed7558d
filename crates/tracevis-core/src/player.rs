//! Replay of an event trace over an initial snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crate::events::Event;
use crate::snapshot::{Condition, Snapshot};

/// Apply one event to `prev`, producing the snapshot for `step + 1`.
///
/// `step` is the position of `event` in its trace and only used for error
/// reporting. `prev` is never modified.
pub fn apply_event(prev: &Snapshot, event: &Event, step: usize) -> Result<Snapshot> {
    interpret(prev, event, step, true)
}

fn check_index(step: usize, event: &Event, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds {
            step,
            event: event.tag(),
            index,
            len,
        })
    }
}

fn interpret(prev: &Snapshot, event: &Event, step: usize, record_conditions: bool) -> Result<Snapshot> {
    trace!(step, %event, "applying event");

    let len = prev.len();
    let mut next = prev.successor();

    match event {
        Event::Compare { i, j } => {
            check_index(step, event, *i, len)?;
            check_index(step, event, *j, len)?;
            next.set_highlights([*i, *j]);
            next.set_message(format!("Compare i={i} and j={j}"));
        }
        Event::Swap { i, j } => {
            check_index(step, event, *i, len)?;
            check_index(step, event, *j, len)?;
            next.values_mut().swap(*i, *j);
            next.set_highlights([*i, *j]);
            next.set_message(format!("Swap i={i} and j={j}"));
        }
        Event::SetPointer { name, location } => {
            if location.as_index(len).is_none() {
                warn!(step, pointer = %name, location = location.0, len, "pointer moved outside values");
                if record_conditions {
                    next.push_condition(Condition::InvalidPointerLocation {
                        name: name.clone(),
                        location: *location,
                        len,
                    });
                }
            }
            next.pointers_mut().insert(name.clone(), *location);
        }
        Event::SetValue { index, value } => {
            check_index(step, event, *index, len)?;
            next.values_mut()[*index] = *value;
            next.set_highlights([*index]);
            next.set_message(format!("Set index {index} to {value}"));
        }
        Event::SetRange { low, high } => {
            if low > high || *high >= len {
                return Err(Error::InvalidRange {
                    step,
                    low: *low,
                    high: *high,
                    len,
                });
            }
            next.set_active_range(Some((*low, *high)));
        }
        Event::ClearRange => {
            next.set_active_range(None);
        }
        Event::AddLabel { index, label } => {
            check_index(step, event, *index, len)?;
            if !prev.has_label(*index, label) {
                next.labels_mut()
                    .entry(*index)
                    .or_default()
                    .insert(label.clone());
            }
        }
        Event::RemoveLabel { index, label } => {
            check_index(step, event, *index, len)?;
            if prev.has_label(*index, label) {
                let labels = next.labels_mut();
                if let Some(tags) = labels.get_mut(index) {
                    tags.remove(label);
                    if tags.is_empty() {
                        labels.remove(index);
                    }
                }
            }
        }
    }

    Ok(next)
}

/// Result of [`Player::step_forward`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome<'a> {
    /// An event was applied; this is the new current snapshot
    Advanced(&'a Snapshot),
    /// The cursor was already at the end; the current snapshot is unchanged
    EndOfTrace(&'a Snapshot),
}

impl<'a> StepOutcome<'a> {
    /// The snapshot at the cursor after the step.
    pub fn snapshot(self) -> &'a Snapshot {
        match self {
            StepOutcome::Advanced(snapshot) | StepOutcome::EndOfTrace(snapshot) => snapshot,
        }
    }

    /// Whether the step was a no-op at the end of the trace.
    pub fn is_end_of_trace(self) -> bool {
        matches!(self, StepOutcome::EndOfTrace(_))
    }
}

/// Deterministic replay of an event trace.
///
/// The player owns its trace, the snapshot at the cursor, and an arena of
/// checkpoint snapshots keyed by step. Moving to an arbitrary step replays
/// from the nearest cached snapshot at or before it.
#[derive(Debug, Clone)]
pub struct Player {
    config: PlayerConfig,
    events: Vec<Event>,
    initial: Snapshot,
    cursor: usize,
    current: Snapshot,
    /// Cached snapshots by step. Step 0 lives in `initial`.
    checkpoints: BTreeMap<usize, Snapshot>,
}

impl Player {
    /// Create a player over `values` with no events loaded.
    pub fn new(values: Vec<i64>) -> Self {
        Self::with_config(values, PlayerConfig::default())
    }

    /// Create a player over `values` with an explicit configuration.
    pub fn with_config(values: Vec<i64>, config: PlayerConfig) -> Self {
        let initial = Snapshot::initial(values);
        Self {
            config,
            events: Vec::new(),
            current: initial.clone(),
            initial,
            cursor: 0,
            checkpoints: BTreeMap::new(),
        }
    }

    /// Rebuild snapshot #0 from `values` and rewind. Loaded events are kept.
    pub fn initialize(&mut self, values: Vec<i64>) {
        debug!(len = values.len(), events = self.events.len(), "player initialized");
        self.initial = Snapshot::initial(values);
        self.reset();
    }

    /// Attach a trace to replay and rewind to step 0.
    pub fn load(&mut self, events: Vec<Event>) {
        debug!(events = events.len(), "trace loaded");
        self.events = events;
        self.reset();
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.current = self.initial.clone();
        self.checkpoints.clear();
    }

    /// The configuration this player was built with.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current step, in `0..=len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of events in the loaded trace.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the loaded trace has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether every event has been applied.
    pub fn is_at_end(&self) -> bool {
        self.cursor == self.events.len()
    }

    /// The loaded trace.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Snapshot #0.
    pub fn initial(&self) -> &Snapshot {
        &self.initial
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// The event the next `step_forward` will apply.
    pub fn current_event(&self) -> Option<&Event> {
        self.events.get(self.cursor)
    }

    /// Fraction of the trace applied, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.events.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.events.len() as f64
        }
    }

    /// Apply the event at the cursor and advance.
    ///
    /// At the end of the trace this is a no-op reporting
    /// [`StepOutcome::EndOfTrace`]. If the event cannot be applied the cursor
    /// does not move.
    pub fn step_forward(&mut self) -> Result<StepOutcome<'_>> {
        let Some(event) = self.events.get(self.cursor) else {
            return Ok(StepOutcome::EndOfTrace(&self.current));
        };

        let next = interpret(&self.current, event, self.cursor, self.config.record_conditions)?;
        self.cursor += 1;
        Self::remember(
            &mut self.checkpoints,
            self.config.effective_interval(),
            self.cursor,
            &next,
        );
        self.current = next;
        Ok(StepOutcome::Advanced(&self.current))
    }

    /// Move back one step. Fails with `OutOfRange` at step 0.
    pub fn step_backward(&mut self) -> Result<&Snapshot> {
        let Some(target) = self.cursor.checked_sub(1) else {
            return Err(Error::OutOfRange {
                requested: -1,
                len: self.events.len(),
            });
        };
        self.seek(target)
    }

    /// Move the cursor to `step` and return the snapshot there.
    pub fn seek(&mut self, step: usize) -> Result<&Snapshot> {
        if step > self.events.len() {
            return Err(Error::out_of_range(step, self.events.len()));
        }
        if step != self.cursor {
            let snapshot = self.snapshot_at(step)?;
            self.current = snapshot;
            self.cursor = step;
        }
        Ok(&self.current)
    }

    /// Return to snapshot #0.
    pub fn rewind(&mut self) -> Result<&Snapshot> {
        self.seek(0)
    }

    /// Jump to the snapshot after the last event.
    pub fn seek_end(&mut self) -> Result<&Snapshot> {
        self.seek(self.events.len())
    }

    /// Every snapshot from step 0 through the end of the trace.
    ///
    /// Replays from scratch without touching the cursor or the checkpoints.
    pub fn replay_all(&self) -> Result<Vec<Snapshot>> {
        let mut snapshots = Vec::with_capacity(self.events.len() + 1);
        snapshots.push(self.initial.clone());

        let mut snapshot = self.initial.clone();
        for (step, event) in self.events.iter().enumerate() {
            snapshot = interpret(&snapshot, event, step, self.config.record_conditions)?;
            snapshots.push(snapshot.clone());
        }
        Ok(snapshots)
    }

    /// Compute the snapshot at `step`, caching checkpoints along the way.
    fn snapshot_at(&mut self, step: usize) -> Result<Snapshot> {
        let (start, mut snapshot) = self.nearest_cached(step);
        if start < step {
            debug!(from = start, to = step, "replaying from checkpoint");
        }

        let interval = self.config.effective_interval();
        for (offset, event) in self.events[start..step].iter().enumerate() {
            let index = start + offset;
            snapshot = interpret(&snapshot, event, index, self.config.record_conditions)?;
            Self::remember(&mut self.checkpoints, interval, index + 1, &snapshot);
        }
        Ok(snapshot)
    }

    /// The latest known snapshot at or before `step`.
    fn nearest_cached(&self, step: usize) -> (usize, Snapshot) {
        let mut best = (0, &self.initial);
        if let Some((&at, snapshot)) = self.checkpoints.range(..=step).next_back() {
            best = (at, snapshot);
        }
        if self.cursor <= step && self.cursor >= best.0 {
            best = (self.cursor, &self.current);
        }
        (best.0, best.1.clone())
    }

    fn remember(
        checkpoints: &mut BTreeMap<usize, Snapshot>,
        interval: usize,
        step: usize,
        snapshot: &Snapshot,
    ) {
        if step % interval == 0 {
            checkpoints
                .entry(step)
                .or_insert_with(|| snapshot.clone());
        }
    }

    #[cfg(test)]
    fn checkpoint_steps(&self) -> Vec<usize> {
        self.checkpoints.keys().copied().collect()
    }
}

/// Player position, for whoever drives the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub cursor: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub at_end: bool,
}

impl From<&Player> for PlayerStatus {
    fn from(player: &Player) -> Self {
        Self {
            cursor: player.cursor,
            total_steps: player.len(),
            progress: player.progress(),
            at_end: player.is_at_end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Location;
    use std::collections::BTreeSet;

    fn three_one_two() -> Vec<Event> {
        vec![
            Event::compare(0, 1),
            Event::swap(0, 1),
            Event::compare(1, 2),
            Event::swap(1, 2),
            Event::compare(0, 1),
        ]
    }

    fn loaded(values: Vec<i64>, events: Vec<Event>, config: PlayerConfig) -> Player {
        let mut player = Player::with_config(values, config);
        player.load(events);
        player
    }

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn player_starts_at_zero() {
        let player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.len(), 5);
        assert_eq!(player.current(), player.initial());
        assert_eq!(player.current_event(), Some(&Event::compare(0, 1)));
    }

    #[test]
    fn compare_highlights_without_moving_values() {
        let snap = apply_event(&Snapshot::initial(vec![3, 1, 2]), &Event::compare(2, 0), 0).unwrap();
        assert_eq!(snap.values(), &[3, 1, 2]);
        assert_eq!(snap.highlights(), &set(&[0, 2]));
        assert_eq!(snap.message(), Some("Compare i=2 and j=0"));
    }

    #[test]
    fn swap_exchanges_values() {
        let snap = apply_event(&Snapshot::initial(vec![3, 1, 2]), &Event::swap(0, 2), 0).unwrap();
        assert_eq!(snap.values(), &[2, 1, 3]);
        assert_eq!(snap.highlights(), &set(&[0, 2]));
        assert_eq!(snap.message(), Some("Swap i=0 and j=2"));
    }

    #[test]
    fn set_pointer_only_touches_pointers() {
        let compared = apply_event(&Snapshot::initial(vec![3, 1, 2]), &Event::compare(0, 1), 0).unwrap();
        let pointed = apply_event(&compared, &Event::set_pointer("i", 2usize), 1).unwrap();

        assert_eq!(pointed.pointer("i"), Some(Location(2)));
        assert_eq!(pointed.values(), compared.values());
        assert_eq!(pointed.highlights(), compared.highlights());
        assert_eq!(pointed.message(), compared.message());
        assert!(pointed.conditions().is_empty());

        let moved = apply_event(&pointed, &Event::set_pointer("i", 0usize), 2).unwrap();
        assert_eq!(moved.pointer("i"), Some(Location(0)));
        assert_eq!(moved.pointers().len(), 1);
    }

    #[test]
    fn out_of_range_pointer_is_a_condition() {
        let snap = apply_event(&Snapshot::initial(vec![1, 2]), &Event::set_pointer("node", 17i64), 0).unwrap();
        assert_eq!(snap.pointer("node"), Some(Location(17)));
        assert_eq!(
            snap.conditions(),
            &[Condition::InvalidPointerLocation {
                name: "node".into(),
                location: Location(17),
                len: 2,
            }]
        );

        // Conditions belong to the step that raised them
        let next = apply_event(&snap, &Event::compare(0, 1), 1).unwrap();
        assert!(next.conditions().is_empty());
        assert_eq!(next.pointer("node"), Some(Location(17)));
    }

    #[test]
    fn conditions_can_be_disabled() {
        let config = PlayerConfig {
            record_conditions: false,
            ..PlayerConfig::default()
        };
        let mut player = loaded(vec![1], vec![Event::set_pointer("p", -1i64)], config);
        let snap = player.step_forward().unwrap().snapshot();
        assert!(snap.conditions().is_empty());
        assert_eq!(snap.pointer("p"), Some(Location(-1)));
    }

    #[test]
    fn set_value_overwrites() {
        let snap = apply_event(&Snapshot::initial(vec![5, 6]), &Event::set_value(1, 9), 0).unwrap();
        assert_eq!(snap.values(), &[5, 9]);
        assert_eq!(snap.highlights(), &set(&[1]));
    }

    #[test]
    fn range_set_and_cleared() {
        let start = Snapshot::initial(vec![1, 2, 3]);
        let ranged = apply_event(&start, &Event::set_range(0, 2), 0).unwrap();
        assert_eq!(ranged.active_range(), Some((0, 2)));

        let cleared = apply_event(&ranged, &Event::ClearRange, 1).unwrap();
        assert_eq!(cleared.active_range(), None);

        let inverted = apply_event(&start, &Event::set_range(2, 1), 5);
        assert!(matches!(inverted, Err(Error::InvalidRange { step: 5, low: 2, high: 1, len: 3 })));

        let past_end = apply_event(&start, &Event::set_range(0, 3), 0);
        assert!(matches!(past_end, Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn labels_accumulate_and_drain() {
        let start = Snapshot::initial(vec![1, 2]);
        let one = apply_event(&start, &Event::add_label(0, "sorted"), 0).unwrap();
        let two = apply_event(&one, &Event::add_label(0, "pivot"), 1).unwrap();
        assert!(two.has_label(0, "sorted"));
        assert!(two.has_label(0, "pivot"));
        assert!(!one.has_label(0, "pivot"));

        let three = apply_event(&two, &Event::remove_label(0, "sorted"), 2).unwrap();
        let four = apply_event(&three, &Event::remove_label(0, "pivot"), 3).unwrap();
        assert!(!three.has_label(0, "sorted"));
        assert!(four.labels().is_empty());
    }

    #[test]
    fn bad_index_is_rejected() {
        let result = apply_event(&Snapshot::initial(vec![1, 2]), &Event::swap(0, 2), 3);
        assert!(matches!(
            result,
            Err(Error::IndexOutOfBounds { step: 3, event: "Swap", index: 2, len: 2 })
        ));
    }

    #[test]
    fn failed_step_leaves_player_untouched() {
        let mut player = loaded(
            vec![1, 2],
            vec![Event::compare(0, 1), Event::swap(0, 5)],
            PlayerConfig::cache_all(),
        );
        player.step_forward().unwrap();
        let before = player.current().clone();

        assert!(player.step_forward().is_err());
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.current(), &before);

        assert!(player.seek(2).is_err());
        assert_eq!(player.cursor(), 1);
    }

    #[test]
    fn three_one_two_walkthrough() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());

        let expected: [(&[i64], &[usize]); 5] = [
            (&[3, 1, 2], &[0, 1]),
            (&[1, 3, 2], &[0, 1]),
            (&[1, 3, 2], &[1, 2]),
            (&[1, 2, 3], &[1, 2]),
            (&[1, 2, 3], &[0, 1]),
        ];
        for (values, highlights) in expected {
            let snap = player.step_forward().unwrap().snapshot();
            assert_eq!(snap.values(), values);
            assert_eq!(snap.highlights(), &set(highlights));
        }
        assert!(player.is_at_end());
    }

    #[test]
    fn step_forward_at_end_is_noop() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        player.seek_end().unwrap();
        let before = player.current().clone();

        let outcome = player.step_forward().unwrap();
        assert!(outcome.is_end_of_trace());
        assert_eq!(outcome.snapshot(), &before);
        assert_eq!(player.cursor(), 5);
    }

    #[test]
    fn empty_trace() {
        let mut player = Player::new(vec![4, 2]);
        assert!(player.is_at_end());
        assert!(player.step_forward().unwrap().is_end_of_trace());
        assert_eq!(player.progress(), 0.0);
        assert!(matches!(player.step_backward(), Err(Error::OutOfRange { requested: -1, len: 0 })));
    }

    #[test]
    fn step_backward_at_zero_fails() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        assert!(matches!(player.step_backward(), Err(Error::OutOfRange { .. })));
        assert_eq!(player.cursor(), 0);
    }

    #[test]
    fn seek_rejects_out_of_bounds() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        player.seek(2).unwrap();
        assert!(matches!(player.seek(6), Err(Error::OutOfRange { requested: 6, len: 5 })));
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn seek_matches_stepping_for_every_interval() {
        for interval in [0, 1, 2, 3, 64] {
            let config = PlayerConfig {
                checkpoint_interval: interval,
                ..PlayerConfig::default()
            };
            let mut stepper = loaded(vec![3, 1, 2], three_one_two(), config.clone());
            let mut seeker = loaded(vec![3, 1, 2], three_one_two(), config);

            for n in 1..=5 {
                let stepped = stepper.step_forward().unwrap().snapshot().clone();
                // Seek in a scattered order so both directions are exercised
                seeker.seek(5 - (n % 3)).unwrap();
                assert_eq!(seeker.seek(n).unwrap(), &stepped, "interval {interval}, step {n}");
            }
        }
    }

    #[test]
    fn backward_returns_to_initial() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        let initial = player.initial().clone();
        let forward = player.replay_all().unwrap();

        player.seek_end().unwrap();
        for step in (0..5).rev() {
            let snap = player.step_backward().unwrap();
            assert_eq!(snap, &forward[step]);
        }
        assert_eq!(player.current(), &initial);
    }

    #[test]
    fn checkpoints_follow_interval() {
        let config = PlayerConfig {
            checkpoint_interval: 2,
            ..PlayerConfig::default()
        };
        let mut player = loaded(vec![3, 1, 2], three_one_two(), config);
        player.seek_end().unwrap();
        assert_eq!(player.checkpoint_steps(), vec![2, 4]);

        // Loading a new trace drops the arena
        player.load(three_one_two());
        assert!(player.checkpoint_steps().is_empty());
    }

    #[test]
    fn initialize_keeps_events() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        player.seek(3).unwrap();

        player.initialize(vec![2, 3, 1]);
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.len(), 5);
        assert_eq!(player.current().values(), &[2, 3, 1]);

        let end = player.seek_end().unwrap();
        assert_eq!(end.values(), &[3, 1, 2]);
    }

    #[test]
    fn load_does_not_touch_initial() {
        let mut player = Player::new(vec![3, 1, 2]);
        player.load(three_one_two());
        player.seek_end().unwrap();
        player.load(Vec::new());
        assert_eq!(player.current().values(), &[3, 1, 2]);
        assert_eq!(player.initial().values(), &[3, 1, 2]);
    }

    #[test]
    fn replay_is_deterministic() {
        let player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        assert_eq!(player.replay_all().unwrap(), player.replay_all().unwrap());
        assert_eq!(player.replay_all().unwrap().len(), 6);
    }

    #[test]
    fn status_conversion() {
        let mut player = loaded(vec![3, 1, 2], three_one_two(), PlayerConfig::default());
        player.seek(2).unwrap();

        let status: PlayerStatus = (&player).into();
        assert_eq!(status.cursor, 2);
        assert_eq!(status.total_steps, 5);
        assert_eq!(status.progress, 0.4);
        assert!(!status.at_end);
    }
}
