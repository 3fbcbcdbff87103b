use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;
use catchball_shared::categories::CategoryMask;
use catchball_shared::color::BallColor;
use catchball_shared::rating::star_rating;

use crate::board::geometry::capture_zone_contains;
use crate::board::levels::BallSpawn;
use crate::constants::{color_from_hex, Z_BALL};
use crate::coord::{frame_to_world, world_to_frame, Frame};

use super::collision_groups;
use super::container::{Container, ContainerFlash};
use super::core::GameSettings;
use super::level::LevelEntity;
use super::session::{LevelEndedMessage, Session};
use super::FixedSet;

pub struct BallPlugin;

#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct Ball {
    pub(crate) color: BallColor,
}

/// A ball touched (or settled inside) a container of its own color.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BallCapturedMessage {
    pub(crate) ball: Entity,
    pub(crate) container: Entity,
}

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BallCapturedMessage>().add_systems(
            FixedUpdate,
            (
                collision_capture_system,
                capture_zone_system,
                resolve_captures_system,
                offscreen_system,
            )
                .chain()
                .in_set(FixedSet::PostPhysics),
        );
    }
}

pub(crate) fn spawn_ball(commands: &mut Commands, settings: &GameSettings, spawn: &BallSpawn) {
    let ball = &settings.config.ball;
    let radius = settings.ball_radius;
    let world = frame_to_world(&settings.frame, spawn.pos, Z_BALL);
    let color = color_from_hex(spawn.color.hex());

    commands.spawn((
        // Body and material
        (
            RigidBody::Dynamic,
            Collider::ball(radius),
            ColliderMassProperties::Mass(ball.mass),
            collision_groups(CategoryMask::ball()),
            Restitution::coefficient(ball.restitution),
            Friction::coefficient(ball.friction),
            Damping {
                linear_damping: ball.linear_damping,
                angular_damping: 0.0,
            },
        ),
        // Contacts and launch
        (
            ActiveEvents::COLLISION_EVENTS,
            Ccd::enabled(),
            Velocity::zero(),
            ReadMassProperties::default(),
            ExternalImpulse::default(),
        ),
        // Transform (shared by physics + visual)
        Transform::from_translation(world),
        // Visual
        ShapeBuilder::with(&shapes::Circle {
            radius,
            center: Vec2::ZERO,
        })
        .fill(color)
        .stroke((Color::srgba(1.0, 1.0, 1.0, 0.6), 2.0))
        .build(),
        Ball { color: spawn.color },
        LevelEntity,
    ));
}

fn collision_capture_system(
    mut collision_events: MessageReader<CollisionEvent>,
    q_ball: Query<&Ball>,
    q_container: Query<&Container>,
    mut captured: MessageWriter<BallCapturedMessage>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        let pair = match (q_ball.get(*a), q_container.get(*b)) {
            (Ok(ball), Ok(container)) => Some((*a, ball, *b, container)),
            _ => match (q_ball.get(*b), q_container.get(*a)) {
                (Ok(ball), Ok(container)) => Some((*b, ball, *a, container)),
                _ => None,
            },
        };

        if let Some((ball_entity, ball, container_entity, container)) = pair {
            if ball.color.matches(container.color) {
                captured.write(BallCapturedMessage {
                    ball: ball_entity,
                    container: container_entity,
                });
            }
        }
    }
}

/// Fallback for balls that come to rest inside a cup without a fresh contact.
fn capture_zone_system(
    q_ball: Query<(Entity, &Transform, &Ball)>,
    q_container: Query<(Entity, &Transform, &Container)>,
    mut captured: MessageWriter<BallCapturedMessage>,
) {
    for (ball_entity, ball_tf, ball) in &q_ball {
        let ball_pos = ball_tf.translation.truncate();
        for (container_entity, container_tf, container) in &q_container {
            if !ball.color.matches(container.color) {
                continue;
            }
            let rotation = container_tf.rotation.to_euler(EulerRot::ZYX).0;
            if capture_zone_contains(
                &container.shape,
                container_tf.translation.truncate(),
                rotation,
                ball_pos,
            ) {
                captured.write(BallCapturedMessage {
                    ball: ball_entity,
                    container: container_entity,
                });
            }
        }
    }
}

fn resolve_captures_system(
    mut commands: Commands,
    mut captured: MessageReader<BallCapturedMessage>,
    q_ball: Query<(), With<Ball>>,
    mut q_flash: Query<&mut ContainerFlash>,
    mut session: ResMut<Session>,
    settings: Res<GameSettings>,
    mut ended: MessageWriter<LevelEndedMessage>,
) {
    let mut handled: Vec<Entity> = Vec::new();

    for msg in captured.read() {
        if !session.is_playing() || handled.contains(&msg.ball) || q_ball.get(msg.ball).is_err() {
            continue;
        }
        handled.push(msg.ball);

        commands.entity(msg.ball).despawn();
        if let Ok(mut flash) = q_flash.get_mut(msg.container) {
            flash.trigger();
        }
        debug!("Ball {:?} captured by {:?}", msg.ball, msg.container);

        if session
            .record_capture(|elapsed| star_rating(elapsed, &settings.config))
            .is_some()
        {
            ended.write(LevelEndedMessage::from_session(&session));
        }
    }
}

/// True once a ball center has dropped past the margin below the canvas.
pub(crate) fn is_offscreen(frame: &Frame, world_pos: Vec2, margin: f32) -> bool {
    world_to_frame(frame, world_pos).y < -margin * frame.height
}

fn offscreen_system(
    mut commands: Commands,
    q_ball: Query<(Entity, &Transform), With<Ball>>,
    settings: Res<GameSettings>,
    mut session: ResMut<Session>,
    mut ended: MessageWriter<LevelEndedMessage>,
) {
    let margin = settings.config.offscreen_margin;
    for (entity, transform) in &q_ball {
        if !is_offscreen(&settings.frame, transform.translation.truncate(), margin) {
            continue;
        }

        commands.entity(entity).despawn();
        debug!("Ball {:?} left the screen", entity);
        if session
            .record_ball_lost(|elapsed| star_rating(elapsed, &settings.config))
            .is_some()
        {
            ended.write(LevelEndedMessage::from_session(&session));
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
    use catchball_shared::config::GameConfig;

    use crate::board::geometry::ContainerShape;
    use crate::game::session::{LossReason, Phase};

    use super::*;

    fn make_test_app(ball_count: usize) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameSettings::new(GameConfig::default()));
        let mut session = Session::default();
        session.begin(1, ball_count);
        app.insert_resource(session);
        app.add_message::<CollisionEvent>();
        app.add_message::<BallCapturedMessage>();
        app.add_message::<LevelEndedMessage>();
        app
    }

    fn container(app: &mut App, color: BallColor, pos: Vec2) -> Entity {
        let shape = ContainerShape::for_frame(&app.world().resource::<GameSettings>().frame);
        app.world_mut()
            .spawn((
                Container { color, shape },
                ContainerFlash::default(),
                Transform::from_translation(pos.extend(0.0)),
            ))
            .id()
    }

    fn ball(app: &mut App, color: BallColor, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((Ball { color }, Transform::from_translation(pos.extend(0.0))))
            .id()
    }

    fn ended_count(app: &mut App) -> usize {
        app.world_mut()
            .resource_mut::<Messages<LevelEndedMessage>>()
            .drain()
            .count()
    }

    #[test]
    fn matching_contact_captures_ball_and_wins() {
        let mut app = make_test_app(1);
        app.add_systems(
            Update,
            (collision_capture_system, resolve_captures_system).chain(),
        );
        let b = ball(&mut app, BallColor::Red, Vec2::new(-300.0, 0.0));
        let c = container(&mut app, BallColor::Red, Vec2::new(300.0, 0.0));

        app.world_mut().write_message(CollisionEvent::Started(
            c,
            b,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert!(app.world().get_entity(b).is_err());
        assert!(app.world().get::<ContainerFlash>(c).unwrap().seconds_left > 0.0);
        let session = app.world().resource::<Session>();
        assert_eq!(session.phase, Phase::Won { stars: 3 });
        assert_eq!(session.captured, 1);
        assert_eq!(ended_count(&mut app), 1);
    }

    #[test]
    fn mismatched_contact_is_ignored() {
        let mut app = make_test_app(1);
        app.add_systems(
            Update,
            (collision_capture_system, resolve_captures_system).chain(),
        );
        let b = ball(&mut app, BallColor::Pink, Vec2::ZERO);
        let c = container(&mut app, BallColor::Red, Vec2::new(300.0, 0.0));

        app.world_mut().write_message(CollisionEvent::Started(
            b,
            c,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert!(app.world().get_entity(b).is_ok());
        assert!(app.world().resource::<Session>().is_playing());
    }

    #[test]
    fn duplicate_captures_count_once() {
        let mut app = make_test_app(2);
        app.add_systems(Update, resolve_captures_system);
        let b = ball(&mut app, BallColor::Red, Vec2::ZERO);
        let c = container(&mut app, BallColor::Red, Vec2::ZERO);

        for _ in 0..3 {
            app.world_mut().write_message(BallCapturedMessage {
                ball: b,
                container: c,
            });
        }
        app.update();

        let session = app.world().resource::<Session>();
        assert_eq!(session.captured, 1);
        assert_eq!(session.balls_left, 1);
        assert!(session.is_playing());
    }

    #[test]
    fn ball_resting_in_cup_is_captured_by_zone_check() {
        let mut app = make_test_app(1);
        app.add_systems(
            Update,
            (capture_zone_system, resolve_captures_system).chain(),
        );
        let c_pos = Vec2::new(200.0, -100.0);
        let c = container(&mut app, BallColor::Red, c_pos);
        let zone_center = {
            let container = app.world().get::<Container>(c).unwrap();
            container.shape.capture_zone().center()
        };
        let b = ball(&mut app, BallColor::Red, c_pos + zone_center);
        let far = ball(&mut app, BallColor::Red, Vec2::new(-400.0, 200.0));

        app.update();

        assert!(app.world().get_entity(b).is_err());
        assert!(app.world().get_entity(far).is_ok());
        assert_eq!(app.world().resource::<Session>().captured, 1);
    }

    #[test]
    fn captures_after_level_end_are_ignored() {
        let mut app = make_test_app(1);
        app.add_systems(Update, resolve_captures_system);
        app.world_mut().resource_mut::<Session>().phase = Phase::Lost(LossReason::TimeUp);
        let b = ball(&mut app, BallColor::Red, Vec2::ZERO);
        let c = container(&mut app, BallColor::Red, Vec2::ZERO);

        app.world_mut().write_message(BallCapturedMessage {
            ball: b,
            container: c,
        });
        app.update();

        assert!(app.world().get_entity(b).is_ok());
        assert_eq!(app.world().resource::<Session>().captured, 0);
    }

    #[test]
    fn ball_below_margin_is_removed_and_level_lost() {
        let mut app = make_test_app(1);
        app.add_systems(Update, offscreen_system);
        // Canvas bottom is at y = -270; the margin is 54 px below that.
        let low = ball(&mut app, BallColor::Red, Vec2::new(0.0, -330.0));
        let edge = ball(&mut app, BallColor::Red, Vec2::new(0.0, -300.0));

        app.update();

        assert!(app.world().get_entity(low).is_err());
        assert!(app.world().get_entity(edge).is_ok());
        assert_eq!(
            app.world().resource::<Session>().phase,
            Phase::Lost(LossReason::BallLost)
        );
        assert_eq!(ended_count(&mut app), 1);
    }

    #[test]
    fn losing_one_of_two_balls_keeps_level_running() {
        let mut app = make_test_app(2);
        app.add_systems(Update, offscreen_system);
        let low = ball(&mut app, BallColor::Red, Vec2::new(0.0, -330.0));
        let kept = ball(&mut app, BallColor::Red, Vec2::new(0.0, 0.0));

        app.update();

        assert!(app.world().get_entity(low).is_err());
        assert!(app.world().get_entity(kept).is_ok());
        let session = app.world().resource::<Session>();
        assert!(session.is_playing());
        assert_eq!(session.balls_left, 1);
        assert_eq!(ended_count(&mut app), 0);
    }

    #[test]
    fn offscreen_threshold() {
        let frame = Frame::new(960.0, 540.0);
        assert!(!is_offscreen(&frame, Vec2::new(0.0, -270.0), 0.1));
        assert!(!is_offscreen(&frame, Vec2::new(0.0, -323.9), 0.1));
        assert!(is_offscreen(&frame, Vec2::new(0.0, -324.1), 0.1));
    }
}
