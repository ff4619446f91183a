//! Cutscene triggers.
//!
//! A [`CutsceneScript`] is an ordered queue of triggers. Each trigger waits
//! for a sequence of [`GameplayEvent`]s, observed in order; unrelated events
//! in between are ignored. Only the front trigger listens. When its last event
//! arrives it requests its timeline and is popped.
//!
//! Playing timelines is somebody else's job: this plugin writes
//! [`CutsceneRequested`], pauses gameplay, and resumes on [`CutsceneFinished`]
//! or the `Skip` action. A trigger that fires while another cutscene plays is
//! queued and requested when the current one ends.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::common::input::{Action, ActionBindings};
use crate::common::state::GameState;
use crate::plugins::character::{CharacterDefeated, Role};

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplayEvent {
    LevelReady,
    EnemySpottedPlayer,
    EnemyDefeated,
    PlayerDefeated,
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CutsceneRequested {
    pub timeline: String,
}

#[derive(Message, Debug, Clone, Copy, Default)]
pub struct CutsceneFinished;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub events: Vec<GameplayEvent>,
    pub timeline: String,
    matched: usize,
}

impl Trigger {
    pub fn new(events: impl Into<Vec<GameplayEvent>>, timeline: impl Into<String>) -> Self {
        Self { events: events.into(), timeline: timeline.into(), matched: 0 }
    }

    /// Number of events matched so far.
    #[inline]
    pub fn progress(&self) -> usize {
        self.matched
    }

    /// Feed one event. Returns `true` once the whole sequence has matched.
    fn observe(&mut self, event: GameplayEvent) -> bool {
        if self.events.get(self.matched) == Some(&event) {
            self.matched += 1;
        }
        self.matched >= self.events.len()
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CutsceneScript {
    triggers: VecDeque<Trigger>,
}

impl Default for CutsceneScript {
    fn default() -> Self {
        Self::new([
            Trigger::new([GameplayEvent::LevelReady], "intro"),
            Trigger::new([GameplayEvent::EnemySpottedPlayer], "first_sighting"),
            Trigger::new(
                [
                    GameplayEvent::EnemyDefeated,
                    GameplayEvent::EnemyDefeated,
                    GameplayEvent::EnemyDefeated,
                ],
                "arena_cleared",
            ),
        ])
    }
}

impl CutsceneScript {
    pub fn new(triggers: impl IntoIterator<Item = Trigger>) -> Self {
        Self { triggers: triggers.into_iter().collect() }
    }

    #[inline]
    pub fn front(&self) -> Option<&Trigger> {
        self.triggers.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Feed an event to the front trigger; returns its timeline if it fired.
    pub fn observe(&mut self, event: GameplayEvent) -> Option<String> {
        let front = self.triggers.front_mut()?;
        if !front.observe(event) {
            return None;
        }
        self.triggers.pop_front().map(|t| t.timeline)
    }
}

/// Timeline currently playing, if any, and those waiting behind it.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct CutscenePlayback {
    pub active: Option<String>,
    pub queued: VecDeque<String>,
}

impl CutscenePlayback {
    /// Start `timeline` now, or queue it behind the active one.
    /// Returns `true` if it started.
    pub fn play(&mut self, timeline: String) -> bool {
        if self.active.is_some() {
            self.queued.push_back(timeline);
            return false;
        }
        self.active = Some(timeline);
        true
    }
}

/// Run condition: gameplay steps only while no cutscene is playing.
pub fn gameplay_running(playback: Option<Res<CutscenePlayback>>) -> bool {
    playback.is_none_or(|p| p.active.is_none())
}

pub fn plugin(app: &mut App) {
    app.add_message::<GameplayEvent>()
        .add_message::<CutsceneRequested>()
        .add_message::<CutsceneFinished>()
        .init_resource::<CutsceneScript>()
        .init_resource::<CutscenePlayback>();

    app.add_systems(
        OnEnter(GameState::InGame),
        (reset_script, announce_level).chain(),
    )
    .add_systems(
        Update,
        (forward_defeats, advance_script, end_cutscene)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}

fn reset_script(mut script: ResMut<CutsceneScript>, mut playback: ResMut<CutscenePlayback>) {
    *script = CutsceneScript::default();
    *playback = CutscenePlayback::default();
}

fn announce_level(mut events: MessageWriter<GameplayEvent>) {
    events.write(GameplayEvent::LevelReady);
}

pub(crate) fn forward_defeats(
    mut defeated: MessageReader<CharacterDefeated>,
    mut events: MessageWriter<GameplayEvent>,
) {
    for d in defeated.read() {
        events.write(match d.role {
            Role::Player => GameplayEvent::PlayerDefeated,
            Role::Enemy => GameplayEvent::EnemyDefeated,
        });
    }
}

pub(crate) fn advance_script(
    mut events: MessageReader<GameplayEvent>,
    mut script: ResMut<CutsceneScript>,
    mut playback: ResMut<CutscenePlayback>,
    mut requests: MessageWriter<CutsceneRequested>,
) {
    for event in events.read() {
        let Some(timeline) = script.observe(*event) else {
            continue;
        };
        if playback.play(timeline.clone()) {
            info!("cutscene '{timeline}' triggered by {event:?}");
            requests.write(CutsceneRequested { timeline });
        } else {
            info!("cutscene '{timeline}' triggered by {event:?}, queued");
        }
    }
}

pub(crate) fn end_cutscene(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<ActionBindings>,
    mut finished: MessageReader<CutsceneFinished>,
    mut playback: ResMut<CutscenePlayback>,
    mut requests: MessageWriter<CutsceneRequested>,
) {
    let done = finished.read().count() > 0;
    let skipped = keys.is_some_and(|k| bindings.is_just_pressed(&k, Action::Skip));

    if playback.active.is_none() || !(done || skipped) {
        return;
    }
    if let Some(timeline) = playback.active.take() {
        info!("cutscene '{timeline}' ended (skipped: {skipped})");
    }
    if let Some(next) = playback.queued.pop_front() {
        info!("cutscene '{next}' starting from queue");
        playback.active = Some(next.clone());
        requests.write(CutsceneRequested { timeline: next });
    }
}

#[cfg(test)]
mod tests;
