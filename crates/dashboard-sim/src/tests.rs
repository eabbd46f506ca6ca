//! Tests for the stepper, timer, store, scheduler and controller.

use std::collections::VecDeque;
use std::time::Duration;

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dashboard_core::commands::MissionCommand;
use dashboard_core::config::{DashboardConfig, MissionConfig, ScheduleConfig};
use dashboard_core::enums::{TargetClass, WaypointKind};
use dashboard_core::error::StoreError;
use dashboard_core::events::DashboardEvent;
use dashboard_core::state::{start_position, RadarTarget, RobotState, TimerState, Waypoint};
use dashboard_core::types::Point;
use dashboard_render::clock::{Clock, ManualClock};
use dashboard_render::layout::FacilityLayout;
use dashboard_render::noise::SeededNoise;
use dashboard_render::surface::{DrawCommand, SurfaceSize};

use crate::engine::SimulationController;
use crate::frame::DashboardSurfaces;
use crate::scheduler::{DueTasks, PeriodicTask, Scheduler, TaskKind};
use crate::store::SimulationStore;
use crate::systems::kinematics::{self, StepOutcome};
use crate::systems::timer::{self, TimerOutcome};

fn robot_at(position: Point, waypoints: &[Point]) -> RobotState {
    RobotState {
        speed: 14.0,
        position,
        heading: 0.25,
        path: Vec::new(),
        waypoints: waypoints.iter().map(|p| Waypoint::new(p.x, p.y)).collect(),
        radar_targets: Vec::new(),
    }
}

fn controller_with_clock(seed: u64) -> (SimulationController, ManualClock) {
    let clock = ManualClock::default();
    let controller = SimulationController::with_sources(
        DashboardConfig::default(),
        Box::new(clock.clone()),
        Box::new(SeededNoise::from_seed(seed)),
    )
    .unwrap();
    (controller, clock)
}

fn surfaces() -> DashboardSurfaces {
    DashboardSurfaces::new(SurfaceSize::new(640.0, 360.0), SurfaceSize::new(200.0, 200.0))
}

// ---- Kinematics ----

#[test]
fn test_stepper_reaches_every_default_waypoint() {
    let mission = MissionConfig::default();
    let mut robot = RobotState {
        speed: 14.0,
        position: start_position(),
        heading: 0.0,
        path: Vec::new(),
        waypoints: dashboard_core::state::default_waypoints(),
        radar_targets: Vec::new(),
    };

    let mut arrivals = Vec::new();
    let mut last_path_len = 0;
    for _ in 0..10_000 {
        match kinematics::run(&mut robot, &mission) {
            StepOutcome::Idle => break,
            StepOutcome::Arrived(wp) => arrivals.push(wp),
            StepOutcome::Advanced => {}
        }
        assert!(robot.path.len() >= last_path_len);
        last_path_len = robot.path.len();
    }

    assert!(robot.waypoints.is_empty());
    assert_eq!(arrivals.len(), 4);
    assert_eq!(arrivals[3].kind, Some(WaypointKind::Destination));
    let last = Point::new(350.0, 250.0);
    assert!(robot.position.distance(last) <= mission.waypoint_tolerance);
}

#[test]
fn test_stepper_single_step_toward_target() {
    let mission = MissionConfig::default();
    let mut robot = robot_at(Point::ZERO, &[Point::new(100.0, 0.0)]);

    let outcome = kinematics::run(&mut robot, &mission);

    assert_eq!(outcome, StepOutcome::Advanced);
    assert_relative_eq!(robot.position.x, 2.0);
    assert_relative_eq!(robot.position.y, 0.0);
    assert_eq!(robot.path, vec![Point::new(2.0, 0.0)]);
    assert_relative_eq!(robot.heading, 0.0);
}

#[test]
fn test_stepper_heading_points_at_target() {
    let mission = MissionConfig::default();
    let mut robot = robot_at(Point::ZERO, &[Point::new(0.0, 50.0)]);
    kinematics::run(&mut robot, &mission);
    assert_relative_eq!(robot.heading, std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_stepper_arrival_within_tolerance_does_not_move() {
    let mission = MissionConfig::default();
    let mut robot = robot_at(Point::ZERO, &[Point::new(3.0, 4.0), Point::new(50.0, 0.0)]);

    let outcome = kinematics::run(&mut robot, &mission);

    assert!(matches!(outcome, StepOutcome::Arrived(wp) if wp.position == Point::new(3.0, 4.0)));
    assert_eq!(robot.position, Point::ZERO);
    assert!(robot.path.is_empty());
    assert_relative_eq!(robot.heading, 0.25);
    assert_eq!(robot.waypoints.len(), 1);
}

#[test]
fn test_stepper_zero_distance_arrives() {
    let mission = MissionConfig {
        waypoint_tolerance: 0.0,
        step_length: 0.0,
    };
    let mut robot = robot_at(Point::new(7.0, 7.0), &[Point::new(7.0, 7.0)]);

    let outcome = kinematics::run(&mut robot, &mission);

    assert!(matches!(outcome, StepOutcome::Arrived(_)));
    assert!(robot.position.is_finite());
    assert!(robot.waypoints.is_empty());
}

#[test]
fn test_stepper_idle_with_empty_queue() {
    let mission = MissionConfig::default();
    let mut robot = robot_at(Point::new(10.0, 20.0), &[]);

    for _ in 0..5 {
        assert_eq!(kinematics::run(&mut robot, &mission), StepOutcome::Idle);
    }
    assert_eq!(robot.position, Point::new(10.0, 20.0));
    assert_relative_eq!(robot.heading, 0.25);
    assert!(robot.path.is_empty());
}

#[test]
fn test_stepper_terminates_on_random_routes() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xD15C0);
    let missions = [
        MissionConfig::default(),
        MissionConfig {
            waypoint_tolerance: 1.0,
            step_length: 2.0,
        },
        MissionConfig {
            waypoint_tolerance: 10.0,
            step_length: 0.5,
        },
        MissionConfig {
            waypoint_tolerance: 3.0,
            step_length: 6.0,
        },
    ];

    for route in 0..200 {
        let mission = &missions[route % missions.len()];
        let len = rng.gen_range(1..=12);
        let mut points = Vec::with_capacity(len);
        let mut last = Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        for _ in 0..len {
            let next = if rng.gen_bool(0.3) {
                // Closer than the arrival circle but never identical.
                let offset = Point::from_angle(rng.gen_range(0.0..std::f64::consts::TAU))
                    * rng.gen_range(0.01..mission.waypoint_tolerance);
                last + offset
            } else {
                Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0))
            };
            points.push(next);
            last = next;
        }

        let start = Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        let mut robot = robot_at(start, &points);

        // Each leg may start up to one tolerance away from the previous
        // waypoint; allow its steps plus the arrival call.
        let mut bound = 0;
        let mut from = start;
        for p in &points {
            let leg = from.distance(*p) + mission.waypoint_tolerance;
            bound += (leg / mission.step_length).ceil() as usize + 2;
            from = *p;
        }

        let mut calls = 0;
        let mut last_path_len = 0;
        while kinematics::run(&mut robot, mission) != StepOutcome::Idle {
            calls += 1;
            assert!(
                robot.path.len() >= last_path_len,
                "path shrank on route {route}"
            );
            last_path_len = robot.path.len();
            assert!(calls <= bound, "route {route} did not terminate within {bound} calls");
        }
        assert!(robot.waypoints.is_empty());
    }
}

// ---- Timer ----

#[test]
fn test_timer_start_stop() {
    let mut state = TimerState::initial();
    timer::start(&mut state);
    assert!(state.is_running);
    timer::stop(&mut state);
    assert!(!state.is_running);
}

#[test]
fn test_timer_tick_while_stopped_is_noop() {
    let mut state = TimerState::initial();
    assert_eq!(timer::tick(&mut state), TimerOutcome::Idle);
    assert_eq!(state, TimerState::initial());
}

#[test]
fn test_timer_borrows_from_minutes_and_hours() {
    let mut state = TimerState {
        hours: 1,
        minutes: 0,
        seconds: 0,
        is_running: true,
    };
    assert_eq!(timer::tick(&mut state), TimerOutcome::Ticked);
    assert_eq!((state.hours, state.minutes, state.seconds), (0, 59, 59));
    assert!(state.is_running);
}

#[test]
fn test_timer_expires_after_remaining_plus_one_ticks() {
    let mut state = TimerState {
        hours: 1,
        minutes: 1,
        seconds: 0,
        is_running: true,
    };

    let mut ticks = 0;
    let outcome = loop {
        ticks += 1;
        let outcome = timer::tick(&mut state);
        if outcome != TimerOutcome::Ticked {
            break outcome;
        }
    };

    assert_eq!(outcome, TimerOutcome::Expired);
    assert_eq!(ticks, 3661);
    assert_eq!(state, TimerState::zero());
    assert_eq!(timer::tick(&mut state), TimerOutcome::Idle);
    assert_eq!(state, TimerState::zero());
}

#[test]
fn test_timer_full_countdown_from_initial() {
    let mut state = TimerState::initial();
    timer::start(&mut state);

    let mut ticks = 0u64;
    while timer::tick(&mut state) == TimerOutcome::Ticked {
        ticks += 1;
    }
    assert_eq!(ticks + 1, 7200);
    assert!(!state.is_running);
    assert_eq!(state.display(), "0:00:00");
}

#[test]
fn test_timer_started_at_zero_expires_on_next_tick() {
    let mut state = TimerState::zero();
    timer::start(&mut state);
    assert!(state.is_running);

    assert_eq!(timer::tick(&mut state), TimerOutcome::Expired);
    assert_eq!(state, TimerState::zero());
    assert!(!state.is_running);
}

#[test]
fn test_controller_start_at_zero_reports_expiry() {
    let (mut controller, _clock) = controller_with_clock(1);
    controller.apply_command(MissionCommand::StartTimer);
    while controller.run_timer_task() == TimerOutcome::Ticked {}
    controller.take_events();

    controller.apply_command(MissionCommand::StartMission);
    assert!(controller.timer().is_running);
    assert_eq!(controller.run_timer_task(), TimerOutcome::Expired);
    assert_eq!(
        controller.take_events(),
        vec![
            DashboardEvent::MissionStarted,
            DashboardEvent::TimerStarted,
            DashboardEvent::TimerExpired,
        ]
    );
}

// ---- Store ----

#[test]
fn test_store_reset_restores_start_values() {
    let config = DashboardConfig::default();
    let mut store = SimulationStore::new(&config);
    for _ in 0..40 {
        kinematics::run(store.robot_mut(), &config.mission);
    }
    timer::start(store.timer_mut());
    for _ in 0..5 {
        timer::tick(store.timer_mut());
    }
    let waypoints_before = store.robot().waypoints.clone();
    let heading_before = store.robot().heading;

    store.reset();

    assert_eq!(store.robot().position, config.robot.start_position);
    assert!(store.robot().path.is_empty());
    assert_eq!(store.timer(), TimerState::initial());
    assert_eq!(store.robot().waypoints, waypoints_before);
    assert_relative_eq!(store.robot().heading, heading_before);
}

#[test]
fn test_store_rejects_non_finite_waypoint() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    let err = store
        .enqueue_waypoint(Waypoint::new(f64::NAN, 1.0))
        .unwrap_err();
    assert!(matches!(err, StoreError::NonFiniteWaypoint { .. }));
    assert_eq!(store.robot().waypoints.len(), 4);
}

#[test]
fn test_store_replace_waypoints_is_all_or_nothing() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    let before: VecDeque<Waypoint> = store.robot().waypoints.clone();

    let bad = vec![Waypoint::new(1.0, 1.0), Waypoint::new(f64::INFINITY, 0.0)];
    assert!(store.replace_waypoints(bad).is_err());
    assert_eq!(store.robot().waypoints, before);

    store
        .replace_waypoints(vec![Waypoint::new(1.0, 1.0).with_id("dock")])
        .unwrap();
    assert_eq!(store.robot().waypoints.len(), 1);
    assert_eq!(store.status().next_waypoint, Some(Point::new(1.0, 1.0)));
}

#[test]
fn test_store_target_limit() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    for i in 0..7 {
        store
            .add_radar_target(RadarTarget::new(Point::new(i as f64, 0.0), TargetClass::Hostile))
            .unwrap();
    }
    let err = store
        .add_radar_target(RadarTarget::new(Point::ZERO, TargetClass::Hostile))
        .unwrap_err();
    assert_eq!(err, StoreError::TargetLimit { limit: 10 });
    assert_eq!(store.robot().radar_targets.len(), 10);
}

#[test]
fn test_store_rejects_non_finite_target() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    let mut target = RadarTarget::new(Point::new(1.0, 1.0), TargetClass::Neutral);
    target.velocity = Point::new(f64::NAN, 0.0);
    assert_eq!(
        store.add_radar_target(target),
        Err(StoreError::NonFiniteTarget { field: "velocity" })
    );
}

#[test]
fn test_store_prune_stale_targets() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    let mut fresh = RadarTarget::new(Point::new(5.0, 5.0), TargetClass::Friendly);
    fresh.timestamp_secs = 9.0;
    store.add_radar_target(fresh).unwrap();

    let removed = store.prune_stale_targets(10.0, 5.0);

    assert_eq!(removed, 3);
    assert_eq!(store.robot().radar_targets.len(), 1);
    assert_relative_eq!(store.robot().radar_targets[0].timestamp_secs, 9.0);
}

#[test]
fn test_store_set_speed_clamps() {
    let mut store = SimulationStore::new(&DashboardConfig::default());
    assert_relative_eq!(store.set_speed(55.0).unwrap(), 40.0);
    assert_relative_eq!(store.set_speed(-3.0).unwrap(), 0.0);
    assert_relative_eq!(store.set_speed(22.0).unwrap(), 22.0);
    assert!(store.set_speed(f64::NAN).is_err());
    assert_relative_eq!(store.robot().speed, 22.0);
}

// ---- Scheduler ----

fn quarter_second_schedule() -> ScheduleConfig {
    ScheduleConfig {
        timer_interval_secs: 1.0,
        frame_interval_secs: 0.25,
    }
}

#[test]
fn test_periodic_task_poll() {
    let mut task = PeriodicTask::new(Duration::from_millis(100), Duration::ZERO);
    assert!(task.poll(Duration::ZERO));
    assert!(!task.poll(Duration::from_millis(50)));
    assert!(task.poll(Duration::from_millis(100)));
    assert_eq!(task.next_due(), Duration::from_millis(200));
}

#[test]
fn test_periodic_task_resyncs_when_far_behind() {
    let mut task = PeriodicTask::new(Duration::from_millis(100), Duration::ZERO);
    assert!(task.poll(Duration::from_secs(5)));
    assert_eq!(task.next_due(), Duration::from_millis(5100));
}

#[test]
fn test_scheduler_cadences_are_independent() {
    let mut scheduler = Scheduler::new(&quarter_second_schedule(), Duration::ZERO);
    let mut frames = 0;
    let mut ticks = 0;
    for step in 0..=12u64 {
        let due = scheduler.poll(Duration::from_millis(step * 250));
        frames += due.frame as u32;
        ticks += due.timer as u32;
    }
    assert_eq!(frames, 13);
    assert_eq!(ticks, 3);
}

#[test]
fn test_scheduler_first_poll_is_frame_only() {
    let mut scheduler = Scheduler::new(&ScheduleConfig::default(), Duration::from_secs(2));
    let due = scheduler.poll(Duration::from_secs(2));
    assert_eq!(
        due,
        DueTasks {
            timer: false,
            frame: true
        }
    );
    assert_eq!(
        scheduler.task(TaskKind::Timer).next_due(),
        Duration::from_secs(3)
    );
}

#[test]
fn test_due_tasks_run_timer_first() {
    let due = DueTasks {
        timer: true,
        frame: true,
    };
    let order: Vec<TaskKind> = due.in_order().collect();
    assert_eq!(order, vec![TaskKind::Timer, TaskKind::Frame]);
    assert!(!DueTasks::default().any());
}

#[test]
fn test_scheduler_next_wakeup_and_stop() {
    let mut scheduler = Scheduler::new(&quarter_second_schedule(), Duration::ZERO);
    scheduler.poll(Duration::ZERO);
    assert_eq!(scheduler.next_wakeup(), Duration::from_millis(250));

    scheduler.stop();
    assert!(!scheduler.is_running());
    assert!(!scheduler.poll(Duration::from_secs(10)).any());
}

// ---- Controller ----

#[test]
fn test_controller_rejects_invalid_config() {
    let mut config = DashboardConfig::default();
    config.robot.max_speed = 0.0;
    assert!(SimulationController::new(config).is_err());
}

#[test]
fn test_frame_task_runs_while_timer_stopped() {
    let (mut controller, _clock) = controller_with_clock(1);
    let mut surfaces = surfaces();

    for _ in 0..10 {
        controller.run_frame_task(&mut surfaces.as_set());
    }

    assert_eq!(controller.counters().frames, 10);
    assert_eq!(controller.robot().path.len(), 10);
    assert_eq!(controller.timer(), TimerState::initial());
    assert_eq!(surfaces.map.commands().first(), Some(&DrawCommand::Clear));
    assert_eq!(surfaces.gauge.commands().first(), Some(&DrawCommand::Clear));
    assert_eq!(surfaces.radar.commands().first(), Some(&DrawCommand::Clear));
}

#[test]
fn test_timer_task_only_counts_down_when_started() {
    let (mut controller, _clock) = controller_with_clock(1);
    assert_eq!(controller.run_timer_task(), TimerOutcome::Idle);

    controller.apply_command(MissionCommand::StartMission);
    assert_eq!(controller.run_timer_task(), TimerOutcome::Ticked);
    assert_eq!(controller.timer().display(), "1:59:58");
    assert_eq!(controller.counters().timer_ticks, 2);

    let events = controller.take_events();
    assert_eq!(
        events,
        vec![DashboardEvent::MissionStarted, DashboardEvent::TimerStarted]
    );
}

#[test]
fn test_controller_runs_due_tasks_from_scheduler() {
    let (mut controller, clock) = controller_with_clock(3);
    controller.apply_command(MissionCommand::StartTimer);
    let mut scheduler = controller.scheduler();
    let mut surfaces = surfaces();

    let frame = controller.config().schedule.frame_interval();
    let end = Duration::from_millis(2500);
    while clock.now() < end {
        let due = scheduler.poll(clock.now());
        controller.run_due(due, &mut surfaces.as_set());
        clock.advance(frame);
    }

    assert_eq!(controller.counters().timer_ticks, 2);
    assert_eq!(controller.timer().display(), "1:59:57");
    assert!(controller.counters().frames >= 149);
}

#[test]
fn test_controller_is_deterministic_with_injected_sources() {
    let run = || {
        let (mut controller, clock) = controller_with_clock(42);
        let mut surfaces = surfaces();
        let mut frames = Vec::new();
        for _ in 0..20 {
            controller.run_frame_task(&mut surfaces.as_set());
            frames.push(controller.capture_frame(&mut surfaces));
            clock.advance(Duration::from_millis(16));
        }
        frames
    };
    assert_eq!(run(), run());
}

#[test]
fn test_route_completion_events() {
    let (mut controller, _clock) = controller_with_clock(5);
    controller.apply_command(MissionCommand::ReplaceWaypoints {
        waypoints: vec![Waypoint::new(404.0, 200.0).with_id("near")],
    });
    let mut surfaces = surfaces();

    let outcome = controller.run_frame_task(&mut surfaces.as_set());
    assert!(matches!(outcome, StepOutcome::Arrived(_)));

    let events = controller.take_events();
    assert_eq!(
        events,
        vec![
            DashboardEvent::WaypointReached {
                id: Some("near".into()),
                position: Point::new(404.0, 200.0),
                remaining: 0,
            },
            DashboardEvent::RouteComplete,
        ]
    );
    assert_eq!(
        controller.run_frame_task(&mut surfaces.as_set()),
        StepOutcome::Idle
    );
}

#[test]
fn test_custom_layout_reaches_map_renderer() {
    let bare = FacilityLayout {
        obstacles: Vec::new(),
        doors: Vec::new(),
        ..FacilityLayout::default()
    };
    let (mut default_layout, _clock) = controller_with_clock(6);
    let (bare_layout, _bare_clock) = controller_with_clock(6);
    let mut bare_layout = bare_layout.with_layout(bare);

    let mut with_obstacles = surfaces();
    let mut without = surfaces();
    default_layout.run_frame_task(&mut with_obstacles.as_set());
    bare_layout.run_frame_task(&mut without.as_set());

    // Five obstacles and two doors fall inside the 640 x 360 map.
    assert_eq!(with_obstacles.map.len(), without.map.len() + 7);
    assert_eq!(with_obstacles.gauge.commands(), without.gauge.commands());
}

#[test]
fn test_queued_commands_apply_in_order() {
    let (mut controller, _clock) = controller_with_clock(9);
    controller.queue_commands([
        MissionCommand::SetSpeed { speed: 100.0 },
        MissionCommand::EnqueueWaypoint {
            waypoint: Waypoint::new(f64::NAN, 0.0),
        },
        MissionCommand::ClearRadarTargets,
    ]);
    assert_relative_eq!(controller.robot().speed, 14.0);

    controller.process_commands();

    assert_relative_eq!(controller.robot().speed, 40.0);
    assert!(controller.robot().radar_targets.is_empty());
    assert_eq!(controller.robot().waypoints.len(), 4);
    let events = controller.take_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], DashboardEvent::CommandRejected { .. }));
}

#[test]
fn test_prune_command_uses_controller_clock() {
    let (mut controller, clock) = controller_with_clock(9);
    clock.set(Duration::from_secs(10));
    controller.apply_command(MissionCommand::PruneStaleTargets {
        max_age_secs: Some(20.0),
    });
    assert_eq!(controller.robot().radar_targets.len(), 3);
    assert!(controller.take_events().is_empty());

    controller.apply_command(MissionCommand::PruneStaleTargets { max_age_secs: None });
    assert!(controller.robot_snapshot().radar_targets.is_empty());
    assert_eq!(
        controller.take_events(),
        vec![DashboardEvent::TargetsPruned { count: 3 }]
    );
}

#[test]
fn test_reset_mission_via_command() {
    let (mut controller, _clock) = controller_with_clock(2);
    let mut surfaces = surfaces();
    controller.apply_command(MissionCommand::StartMission);
    for _ in 0..30 {
        controller.run_frame_task(&mut surfaces.as_set());
    }
    controller.run_timer_task();

    controller.apply_command(MissionCommand::ResetMission);

    assert_eq!(controller.robot().position, start_position());
    assert!(controller.robot().path.is_empty());
    assert_eq!(controller.timer(), TimerState::initial());
    assert_eq!(controller.status().timer_display, "1:59:59");
}

#[test]
fn test_captured_frame_serializes() {
    let (mut controller, _clock) = controller_with_clock(4);
    let mut surfaces = surfaces();
    controller.run_frame_task(&mut surfaces.as_set());
    let frame = controller.capture_frame(&mut surfaces);

    assert_eq!(frame.frame, 1);
    assert!(!frame.map.is_empty());
    assert!(surfaces.map.is_empty());

    let value = serde_json::to_value(&frame).unwrap();
    assert_eq!(value["map"][0]["op"], "Clear");
    assert_eq!(value["status"]["waypoints_remaining"], 4);
}
