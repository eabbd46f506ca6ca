//! Simulation controller: the owner of the dashboard state.
//!
//! `SimulationController` holds the store, applies collaborator commands
//! between ticks, and runs the timer and frame tasks. Time and speckle
//! noise are injected, so a controller built with a `ManualClock` and a
//! seeded noise source is fully deterministic.

use std::collections::VecDeque;
use std::time::Duration;

use dashboard_core::commands::MissionCommand;
use dashboard_core::config::DashboardConfig;
use dashboard_core::error::{ConfigError, StoreError};
use dashboard_core::events::DashboardEvent;
use dashboard_core::state::{RobotState, StatusView, TimerState};
use dashboard_core::types::TaskCounters;
use dashboard_render::clock::{Clock, SystemClock};
use dashboard_render::layout::FacilityLayout;
use dashboard_render::noise::{NoiseSource, SeededNoise};
use dashboard_render::{gauge, map, radar};

use crate::frame::{DashboardFrame, DashboardSurfaces, SurfaceSet};
use crate::scheduler::{DueTasks, Scheduler, TaskKind};
use crate::store::SimulationStore;
use crate::systems::kinematics::{self, StepOutcome};
use crate::systems::timer::{self, TimerOutcome};

pub struct SimulationController {
    config: DashboardConfig,
    store: SimulationStore,
    layout: FacilityLayout,
    clock: Box<dyn Clock>,
    noise: Box<dyn NoiseSource>,
    counters: TaskCounters,
    command_queue: VecDeque<MissionCommand>,
    events: Vec<DashboardEvent>,
}

impl SimulationController {
    /// Production wiring: monotonic clock and entropy-seeded speckle.
    pub fn new(config: DashboardConfig) -> Result<Self, ConfigError> {
        Self::with_sources(
            config,
            Box::new(SystemClock::new()),
            Box::new(SeededNoise::from_entropy()),
        )
    }

    pub fn with_sources(
        config: DashboardConfig,
        clock: Box<dyn Clock>,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: SimulationStore::new(&config),
            config,
            layout: FacilityLayout::default(),
            clock,
            noise,
            counters: TaskCounters::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    pub fn with_layout(mut self, layout: FacilityLayout) -> Self {
        self.layout = layout;
        self
    }

    /// A scheduler anchored at the controller's current time.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(&self.config.schedule, self.clock.now())
    }

    // --- Read-only views ---

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &SimulationStore {
        &self.store
    }

    pub fn robot(&self) -> &RobotState {
        self.store.robot()
    }

    /// Owned copy of the robot state for readers outside the loop.
    pub fn robot_snapshot(&self) -> RobotState {
        self.store.robot().clone()
    }

    pub fn timer(&self) -> TimerState {
        self.store.timer()
    }

    pub fn status(&self) -> StatusView {
        self.store.status()
    }

    pub fn counters(&self) -> TaskCounters {
        self.counters
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<DashboardEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Commands ---

    /// Queue a command for the next `process_commands`.
    pub fn queue_command(&mut self, command: MissionCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MissionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply every queued command. Call between ticks only.
    pub fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_command(command);
        }
    }

    pub fn apply_command(&mut self, command: MissionCommand) {
        let result = match command {
            MissionCommand::StartMission => {
                self.start_mission();
                Ok(())
            }
            MissionCommand::ResetMission => {
                self.reset_mission();
                Ok(())
            }
            MissionCommand::StartTimer => {
                self.start_timer();
                Ok(())
            }
            MissionCommand::StopTimer => {
                self.stop_timer();
                Ok(())
            }
            MissionCommand::EnqueueWaypoint { waypoint } => self.store.enqueue_waypoint(waypoint),
            MissionCommand::ReplaceWaypoints { waypoints } => {
                self.store.replace_waypoints(waypoints)
            }
            MissionCommand::ClearWaypoints => {
                self.store.clear_waypoints();
                Ok(())
            }
            MissionCommand::AddRadarTarget { target } => self.store.add_radar_target(target),
            MissionCommand::ReplaceRadarTargets { targets } => {
                self.store.replace_radar_targets(targets)
            }
            MissionCommand::ClearRadarTargets => {
                self.store.clear_radar_targets();
                Ok(())
            }
            MissionCommand::PruneStaleTargets { max_age_secs } => {
                let max_age_secs = max_age_secs.unwrap_or(self.config.radar.target_timeout_secs);
                self.prune_stale_targets(max_age_secs);
                Ok(())
            }
            MissionCommand::SetSpeed { speed } => self.store.set_speed(speed).map(|applied| {
                tracing::debug!(requested = speed, applied, "speed set");
            }),
        };

        if let Err(err) = result {
            self.reject(err);
        }
    }

    fn reject(&mut self, err: StoreError) {
        tracing::warn!(%err, "command rejected");
        self.events.push(DashboardEvent::CommandRejected {
            reason: err.to_string(),
        });
    }

    /// Start the countdown. The frame task is unaffected.
    pub fn start_mission(&mut self) {
        tracing::info!(timer = %self.store.timer().display(), "mission started");
        self.events.push(DashboardEvent::MissionStarted);
        self.start_timer();
    }

    pub fn reset_mission(&mut self) {
        tracing::info!("mission reset");
        self.store.reset();
        self.events.push(DashboardEvent::MissionReset);
    }

    pub fn start_timer(&mut self) {
        timer::start(self.store.timer_mut());
        self.events.push(DashboardEvent::TimerStarted);
    }

    pub fn stop_timer(&mut self) {
        timer::stop(self.store.timer_mut());
        self.events.push(DashboardEvent::TimerStopped);
    }

    fn prune_stale_targets(&mut self, max_age_secs: f64) {
        let now_secs = self.clock.now().as_secs_f64();
        let count = self.store.prune_stale_targets(now_secs, max_age_secs);
        if count > 0 {
            tracing::debug!(count, max_age_secs, "stale radar contacts pruned");
            self.events.push(DashboardEvent::TargetsPruned { count });
        }
    }

    // --- Tasks ---

    /// Timer task: one countdown tick.
    pub fn run_timer_task(&mut self) -> TimerOutcome {
        self.counters.timer_ticks += 1;
        let outcome = timer::tick(self.store.timer_mut());
        if outcome == TimerOutcome::Expired {
            tracing::info!("mission timer expired");
            self.events.push(DashboardEvent::TimerExpired);
        }
        outcome
    }

    /// Frame task: one stepper call, then map, gauge and radar in that order.
    pub fn run_frame_task(&mut self, surfaces: &mut SurfaceSet<'_>) -> StepOutcome {
        self.counters.frames += 1;
        let outcome = kinematics::run(self.store.robot_mut(), &self.config.mission);
        if let StepOutcome::Arrived(reached) = &outcome {
            let remaining = self.store.robot().waypoints.len();
            tracing::debug!(id = ?reached.id, remaining, "waypoint reached");
            self.events.push(DashboardEvent::WaypointReached {
                id: reached.id.clone(),
                position: reached.position,
                remaining,
            });
            if remaining == 0 {
                tracing::info!("route complete; holding position");
                self.events.push(DashboardEvent::RouteComplete);
            }
        }

        let robot = self.store.robot();
        map::render(robot, &self.layout, self.noise.as_mut(), &mut *surfaces.map);
        gauge::render(
            robot.speed,
            self.config.robot.max_speed,
            &self.config.gauge,
            &mut *surfaces.gauge,
        );
        radar::render(
            &robot.radar_targets,
            &self.config.radar,
            self.clock.as_ref(),
            &mut *surfaces.radar,
        );
        outcome
    }

    /// Run the tasks in `due`, timer first.
    pub fn run_due(&mut self, due: DueTasks, surfaces: &mut SurfaceSet<'_>) {
        for task in due.in_order() {
            match task {
                TaskKind::Timer => {
                    self.run_timer_task();
                }
                TaskKind::Frame => {
                    self.run_frame_task(surfaces);
                }
            }
        }
    }

    /// Package the last frame recorded into `surfaces` with the current
    /// status and the events since the previous frame.
    pub fn capture_frame(&mut self, surfaces: &mut DashboardSurfaces) -> DashboardFrame {
        DashboardFrame {
            frame: self.counters.frames,
            time_secs: self.clock.now().as_secs_f64(),
            status: self.store.status(),
            events: self.take_events(),
            map: surfaces.map.take_commands(),
            gauge: surfaces.gauge.take_commands(),
            radar: surfaces.radar.take_commands(),
        }
    }
}
