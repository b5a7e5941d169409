use crate::sync::loader::ReloadRequested;
use bevy::prelude::*;
use constants::timing::RELOAD_DEBOUNCE_SECS;
use std::time::Duration;

/// The server reported a new or overwritten export.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ModelUpdated;

/// One delayed reload per notification. Timers are independent, so a burst
/// of notifications produces the same number of reloads, each a second late.
#[derive(Resource, Debug, Default)]
pub struct ReloadSchedule {
    pending: Vec<Timer>,
}

impl ReloadSchedule {
    pub fn schedule(&mut self, delay: Duration) {
        self.pending.push(Timer::new(delay, TimerMode::Once));
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance every timer, drop the finished ones and return how many fired.
    pub fn tick(&mut self, delta: Duration) -> usize {
        let before = self.pending.len();
        self.pending.retain_mut(|timer| !timer.tick(delta).finished());
        before - self.pending.len()
    }
}

pub fn schedule_debounced_reloads(
    mut updates: EventReader<ModelUpdated>,
    mut schedule: ResMut<ReloadSchedule>,
) {
    for _ in updates.read() {
        info!("Model updated - reloading...");
        schedule.schedule(Duration::from_secs_f32(RELOAD_DEBOUNCE_SECS));
    }
}

pub fn fire_scheduled_reloads(
    mut schedule: ResMut<ReloadSchedule>,
    mut reloads: EventWriter<ReloadRequested>,
    time: Res<Time<Real>>,
) {
    for _ in 0..schedule.tick(time.delta()) {
        reloads.write(ReloadRequested);
    }
}
