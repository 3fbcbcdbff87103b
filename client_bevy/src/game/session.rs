use bevy::prelude::*;
use bevy_rapier2d::prelude::{RapierConfiguration, Velocity};
use catchball_shared::progress::{next_level, Progress};
use catchball_shared::rating::{step_clock, LevelClock};

use super::ball::Ball;
use super::core::GameSettings;
use super::FixedSet;

pub struct SessionPlugin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LossReason {
    TimeUp,
    BallLost,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Phase {
    #[default]
    Playing,
    Won {
        stars: u8,
    },
    Lost(LossReason),
}

/// State of the attempt in progress.
#[derive(Resource, Debug, Default)]
pub(crate) struct Session {
    pub(crate) level: u32,
    pub(crate) phase: Phase,
    pub(crate) clock: LevelClock,
    pub(crate) balls_left: usize,
    pub(crate) captured: usize,
}

impl Session {
    pub(crate) fn begin(&mut self, level: u32, ball_count: usize) {
        *self = Self {
            level,
            phase: Phase::Playing,
            clock: LevelClock::started(),
            balls_left: ball_count,
            captured: 0,
        };
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Count a scored ball. Returns the winning phase when this was the last one.
    pub(crate) fn record_capture(&mut self, stars_for: impl FnOnce(f32) -> u8) -> Option<Phase> {
        if !self.is_playing() {
            return None;
        }
        self.balls_left = self.balls_left.saturating_sub(1);
        self.captured += 1;
        if self.balls_left == 0 {
            return Some(self.finish(Phase::Won {
                stars: stars_for(self.clock.elapsed),
            }));
        }
        None
    }

    /// Drop a ball that left the screen. The attempt only ends once no
    /// uncaptured ball remains: a win if something was caught, else a loss.
    pub(crate) fn record_ball_lost(
        &mut self,
        stars_for: impl FnOnce(f32) -> u8,
    ) -> Option<Phase> {
        if !self.is_playing() {
            return None;
        }
        self.balls_left = self.balls_left.saturating_sub(1);
        if self.balls_left > 0 {
            return None;
        }
        let phase = if self.captured > 0 {
            Phase::Won {
                stars: stars_for(self.clock.elapsed),
            }
        } else {
            Phase::Lost(LossReason::BallLost)
        };
        Some(self.finish(phase))
    }

    pub(crate) fn tick(&mut self, dt: f32, limit: f32) -> Option<Phase> {
        if !self.is_playing() {
            return None;
        }
        let (clock, expired) = step_clock(self.clock, dt, limit);
        self.clock = clock;
        expired.then(|| self.finish(Phase::Lost(LossReason::TimeUp)))
    }

    fn finish(&mut self, phase: Phase) -> Phase {
        self.phase = phase;
        self.clock.running = false;
        phase
    }
}

/// Level the overlay's primary button leads to, if the overlay is showing.
pub(crate) fn primary_action(session: &Session) -> Option<u32> {
    match session.phase {
        Phase::Playing => None,
        Phase::Won { .. } => Some(next_level(session.level)),
        Phase::Lost(_) => Some(session.level),
    }
}

#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct LevelEndedMessage {
    pub(crate) level: u32,
    pub(crate) phase: Phase,
    pub(crate) elapsed: f32,
    pub(crate) captured: usize,
}

impl LevelEndedMessage {
    pub(crate) fn from_session(session: &Session) -> Self {
        Self {
            level: session.level,
            phase: session.phase,
            elapsed: session.clock.elapsed,
            captured: session.captured,
        }
    }
}

#[derive(Resource, Default)]
pub(crate) struct ProgressState {
    pub(crate) progress: Progress,
}

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .init_resource::<ProgressState>()
            .add_message::<LevelEndedMessage>()
            .add_systems(FixedUpdate, tick_clock_system.in_set(FixedSet::Simulate))
            .add_systems(FixedUpdate, finish_level_system.in_set(FixedSet::Spawn));
    }
}

fn tick_clock_system(
    mut session: ResMut<Session>,
    settings: Res<GameSettings>,
    time: Res<Time<Fixed>>,
    mut ended: MessageWriter<LevelEndedMessage>,
) {
    let limit = settings.config.level_time_limit;
    if session.tick(time.delta_secs(), limit).is_some() {
        ended.write(LevelEndedMessage::from_session(&session));
    }
}

/// Stops the world and records the result once an attempt ends.
fn finish_level_system(
    mut ended: MessageReader<LevelEndedMessage>,
    mut progress: ResMut<ProgressState>,
    mut q_balls: Query<&mut Velocity, With<Ball>>,
    mut q_config: Query<&mut RapierConfiguration>,
) {
    let Some(msg) = ended.read().last().copied() else {
        return;
    };

    for mut vel in &mut q_balls {
        *vel = Velocity::zero();
    }
    for mut cfg in &mut q_config {
        cfg.physics_pipeline_active = false;
    }

    match msg.phase {
        Phase::Won { stars } => {
            let improved = progress.progress.record_win(msg.level, stars);
            info!(
                "Level {} won in {:.2}s with {} star(s), {} ball(s) caught{}",
                msg.level,
                msg.elapsed,
                stars,
                msg.captured,
                if improved { " (new best)" } else { "" }
            );
        }
        Phase::Lost(reason) => {
            info!("Level {} lost: {:?}", msg.level, reason);
        }
        Phase::Playing => {}
    }
}
