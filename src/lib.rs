// Export modules for the binary and for testing
pub mod about;
pub mod config;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod ui;
pub mod util;
pub mod worker;

// Re-export the types the binary and tests reach for
pub use crate::config::ConfigData;
pub use crate::registry::{OrderConflict, ZoneConfig, ZoneId, ZoneRegistry};
pub use crate::state::State;

use eframe::{egui, glow};
use fast_config::Config;
use std::process::exit;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

// Constants
pub const PROGRAM_TITLE: &str = "OpenZone - Sweep Tool";
pub const INITIAL_WIDTH: f32 = 640.0;
pub const INITIAL_HEIGHT: f32 = 320.0;

/// Run-mode state shared with the sweep thread. `generation` is bumped on
/// every sweep start; a thread whose generation no longer matches exits on
/// its next wakeup instead of ticking alongside its replacement, so at most
/// one sweep loop is ever live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    pub running: bool,
    pub generation: u64,
}

// Type aliases for state shared between the UI and the sweep thread
pub type SharedStateFlag = Arc<(Mutex<RunState>, Condvar)>;
pub type SharedActiveZone = Arc<Mutex<Option<ZoneId>>>;
pub type SharedElapsed = Arc<Mutex<u64>>;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Length of one base time unit in milliseconds. Lowering it speeds the
    /// whole panel up (clock and sweep together) for demos.
    #[arg(long, default_value_t = scheduler::BASE_UNIT_MS)]
    pub tick_ms: u64,
}

// The main application struct
pub struct ZonePanel {
    // State
    pub state: State,
    pub thread_state: SharedStateFlag, // Is the sweep thread running?

    // Zone data
    pub registry: ZoneRegistry,
    pub selected_zone: ZoneId, // Zone currently bound to the edit fields
    pub time_field: u16,       // Edit buffers for the selected zone
    pub order_field: u16,

    // Shared state between UI and sweep thread
    pub active_zone: SharedActiveZone,
    pub elapsed_seconds: SharedElapsed,

    // Pending order-conflict notice, blocks the panel until dismissed
    pub conflict_notice: Option<OrderConflict>,

    // Configuration
    pub config: Config<ConfigData>,
    pub tick: Duration,
}

impl ZonePanel {
    pub fn new(args: &Args) -> Self {
        // Determine config path safely
        let config_dir = dirs::config_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string()); // Fallback to current dir
        let config_path = format!("{}/sweep_tool.json", config_dir);

        let config = match Config::new(&config_path, ConfigData::default()) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("Error creating config file at {}: {}", config_path, e);
                exit(1)
            }
        };

        let registry = ZoneRegistry::from_table(config.data.zones);
        let selected_zone = ZoneId::Front;
        let ZoneConfig { time, order } = registry.get(selected_zone);

        Self {
            state: State::Initialising,
            thread_state: Arc::new((Mutex::new(RunState::default()), Condvar::new())),
            registry,
            selected_zone,
            time_field: time,
            order_field: order,
            active_zone: Arc::new(Mutex::new(None)),
            elapsed_seconds: Arc::new(Mutex::new(0)),
            conflict_notice: None,
            config,
            tick: Duration::from_millis(args.tick_ms.max(1)),
        }
    }

    // Initialization logic called once at the start
    fn init(&mut self) {
        self.load_selected_zone();
        self.state = State::Running;
        log::info!("Initialization complete. State set to Running.");
    }

    // Helper to get sweep thread status
    pub fn get_thread_status(&self) -> bool {
        match self.thread_state.0.lock() {
            Ok(guard) => guard.running,
            Err(poisoned) => {
                log::error!("Thread state mutex poisoned!");
                poisoned.get_ref().running // Still try to get the value
            }
        }
    }

    /// The zone currently lit, as last published by the sweep thread.
    pub fn current_active_zone(&self) -> Option<ZoneId> {
        match self.active_zone.lock() {
            Ok(guard) => *guard,
            Err(_) => {
                log::error!("Active zone mutex poisoned!");
                None
            }
        }
    }

    /// The elapsed clock, as last published by the sweep thread.
    pub fn current_elapsed(&self) -> u64 {
        match self.elapsed_seconds.lock() {
            Ok(guard) => *guard,
            Err(_) => {
                log::error!("Elapsed clock mutex poisoned!");
                0
            }
        }
    }

    // Graceful shutdown logic
    fn shutdown_app(&mut self) {
        log::info!("Shutdown requested.");
        // Signal the sweep thread to stop
        {
            let &(ref lock, ref cvar) = &*self.thread_state;
            match lock.lock() {
                Ok(mut run) => {
                    run.running = false;
                    log::info!("Signaling sweep thread to stop.");
                }
                Err(_) => {
                    log::error!("Thread state mutex poisoned during shutdown!");
                }
            }
            cvar.notify_all();
        }

        // Save configuration with the latest zone settings
        self.config.data.zones = self.registry.table();
        if let Err(e) = self.config.save() {
            log::error!("Failed to save configuration on exit: {}", e);
        } else {
            log::info!("Configuration saved.");
        }

        // Give the thread a moment to process the stop signal
        std::thread::sleep(Duration::from_millis(250));
        log::info!("Shutdown complete.");
    }
}

// Main eframe application loop
impl eframe::App for ZonePanel {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Repaint on a fraction of the tick so indicator and clock changes
        // from the sweep thread never sit unrendered for a full unit.
        ctx.request_repaint_after(self.tick / 4);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Resize::default()
                .default_width(INITIAL_WIDTH)
                .default_height(INITIAL_HEIGHT)
                .auto_sized()
                .show(ui, |ui| match self.state {
                    State::Initialising => {
                        ui.centered_and_justified(|ui| {
                            ui.label("Initialising...");
                        });
                        // Actual init logic runs once after this frame
                        self.init();
                    }
                    State::About => {
                        ui::draw_about_screen(self, ui);
                    }
                    State::Running => {
                        ui::draw_running_state(self, ui, ctx);
                    }
                });
        });
    }

    // Called when the application is about to close
    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.shutdown_app();
    }
}
