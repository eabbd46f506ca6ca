//! Host loop thread: drives the scheduler and publishes frames.
//!
//! The controller is created inside the thread, since its clock and noise
//! sources stay on one thread. Commands arrive via an `mpsc` channel and
//! are applied between ticks. Each frame is stored in shared state for
//! synchronous polling and optionally written to a JSON-lines sink.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use dashboard_core::commands::MissionCommand;
use dashboard_core::config::DashboardConfig;
use dashboard_render::clock::SystemClock;
use dashboard_render::noise::{NoiseSource, SeededNoise};
use dashboard_render::surface::SurfaceSize;
use dashboard_sim::frame::{DashboardFrame, DashboardSurfaces};
use dashboard_sim::scheduler::Scheduler;
use dashboard_sim::SimulationController;

use crate::error::AppError;
use crate::sink::FrameSink;
use crate::state::HostCommand;

/// Default map canvas size.
pub const DEFAULT_MAP_SIZE: SurfaceSize = SurfaceSize::new(640.0, 360.0);
/// Default size of the gauge and radar canvases.
pub const DEFAULT_DIAL_SIZE: SurfaceSize = SurfaceSize::new(200.0, 200.0);

#[derive(Debug, Clone)]
pub struct HostOptions {
    pub config: DashboardConfig,
    /// Speckle seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub map_size: SurfaceSize,
    pub dial_size: SurfaceSize,
    /// Stop after this much loop time.
    pub duration: Option<Duration>,
    /// Queue `StartMission` before the first tick.
    pub autostart: bool,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            config: DashboardConfig::default(),
            seed: None,
            map_size: DEFAULT_MAP_SIZE,
            dial_size: DEFAULT_DIAL_SIZE,
            duration: None,
            autostart: false,
        }
    }
}

/// One controller with its scheduler and recording surfaces.
pub struct HostLoop {
    controller: SimulationController,
    scheduler: Scheduler,
    surfaces: DashboardSurfaces,
    deadline: Option<Duration>,
}

impl HostLoop {
    /// Production wiring from host options.
    pub fn from_options(options: &HostOptions) -> Result<Self, AppError> {
        let noise: Box<dyn NoiseSource> = match options.seed {
            Some(seed) => Box::new(SeededNoise::from_seed(seed)),
            None => Box::new(SeededNoise::from_entropy()),
        };
        let controller = SimulationController::with_sources(
            options.config.clone(),
            Box::new(SystemClock::new()),
            noise,
        )?;
        Ok(Self::new(controller, options).with_autostart(options.autostart))
    }

    /// The scheduler is anchored at the controller's current time.
    pub fn new(controller: SimulationController, options: &HostOptions) -> Self {
        let deadline = options.duration.map(|d| controller.now() + d);
        Self {
            scheduler: controller.scheduler(),
            surfaces: DashboardSurfaces::new(options.map_size, options.dial_size),
            controller,
            deadline,
        }
    }

    fn with_autostart(mut self, autostart: bool) -> Self {
        if autostart {
            self.controller.queue_command(MissionCommand::StartMission);
        }
        self
    }

    pub fn controller(&self) -> &SimulationController {
        &self.controller
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Apply one host command. Returns `false` once the loop should exit.
    pub fn handle(&mut self, command: HostCommand) -> bool {
        match command {
            HostCommand::Mission(cmd) => {
                self.controller.queue_command(cmd);
                true
            }
            HostCommand::Resize { map, dial } => {
                tracing::debug!(?map, ?dial, "surfaces resized");
                self.surfaces.resize(map, dial);
                true
            }
            HostCommand::Shutdown => {
                self.scheduler.stop();
                false
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.scheduler.is_running()
            || self
                .deadline
                .is_some_and(|deadline| self.controller.now() >= deadline)
    }

    /// Apply queued commands and run whatever is due. Returns the frame if
    /// the frame task ran.
    pub fn pump(&mut self) -> Option<DashboardFrame> {
        self.controller.process_commands();
        let due = self.scheduler.poll(self.controller.now());
        if !due.any() {
            return None;
        }
        self.controller.run_due(due, &mut self.surfaces.as_set());
        due.frame
            .then(|| self.controller.capture_frame(&mut self.surfaces))
    }

    /// Time left until either task is next due.
    pub fn time_until_wakeup(&self) -> Duration {
        self.scheduler
            .next_wakeup()
            .saturating_sub(self.controller.now())
    }
}

/// Spawns the host loop in a new thread.
///
/// Returns the command sender and the thread handle; the thread's result
/// carries any sink failure.
pub fn spawn_host_loop(
    options: HostOptions,
    latest_frame: Arc<Mutex<Option<DashboardFrame>>>,
    sink: Option<FrameSink>,
) -> Result<(mpsc::Sender<HostCommand>, JoinHandle<Result<(), AppError>>), AppError> {
    options.config.validate()?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>();

    let handle = std::thread::Builder::new()
        .name("rover-dashboard-loop".into())
        .spawn(move || {
            let result = HostLoop::from_options(&options)
                .and_then(|host| run_host_loop(host, cmd_rx, &latest_frame, sink));
            if let Err(err) = &result {
                tracing::error!(%err, "host loop failed");
            }
            result
        })
        .map_err(AppError::Spawn)?;

    Ok((cmd_tx, handle))
}

/// Runs until `Shutdown`, channel disconnect or the deadline.
pub fn run_host_loop(
    mut host: HostLoop,
    cmd_rx: mpsc::Receiver<HostCommand>,
    latest_frame: &Mutex<Option<DashboardFrame>>,
    mut sink: Option<FrameSink>,
) -> Result<(), AppError> {
    tracing::info!(
        frame_interval = ?host.controller().config().schedule.frame_interval(),
        timer_interval = ?host.controller().config().schedule.timer_interval(),
        "host loop started"
    );
    let result = drive(&mut host, &cmd_rx, latest_frame, sink.as_mut());

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
        tracing::info!(frames = sink.written(), "frame output flushed");
    }
    let counters = host.controller().counters();
    tracing::info!(
        frames = counters.frames,
        timer_ticks = counters.timer_ticks,
        "host loop stopped"
    );
    result
}

fn drive(
    host: &mut HostLoop,
    cmd_rx: &mpsc::Receiver<HostCommand>,
    latest_frame: &Mutex<Option<DashboardFrame>>,
    mut sink: Option<&mut FrameSink>,
) -> Result<(), AppError> {
    loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(cmd) => {
                    if !host.handle(cmd) {
                        return Ok(());
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(()),
            }
        }

        if host.is_finished() {
            return Ok(());
        }

        // 2. Run due tasks and publish the frame
        if let Some(frame) = host.pump() {
            if let Some(sink) = sink.as_deref_mut() {
                sink.write_frame(&frame)?;
            }
            if let Ok(mut lock) = latest_frame.lock() {
                *lock = Some(frame);
            }
        }

        // 3. Wait for the next due task, waking early for commands
        match cmd_rx.recv_timeout(host.time_until_wakeup()) {
            Ok(cmd) => {
                if !host.handle(cmd) {
                    return Ok(());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}
