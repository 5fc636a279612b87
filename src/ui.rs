use crate::about;
use crate::registry::ZoneId;
use crate::state::State;
use crate::util::{clamp_time, format_elapsed, TIME_MAX, TIME_MIN};
use crate::{ZonePanel, INITIAL_WIDTH, PROGRAM_TITLE};
use eframe::egui::{self, Color32, Context, RichText, Ui};

const ACTIVE_COLOR: Color32 = Color32::from_rgb(0, 200, 120);
const IDLE_COLOR: Color32 = Color32::from_rgb(60, 60, 60);
const STOP_COLOR: Color32 = Color32::from_rgb(255, 0, 0);

// Keep UI action handlers associated with ZonePanel
impl ZonePanel {
    // --- Button/Action Handlers (called from draw_running_state) ---

    /// Syncs the edit fields to the currently selected zone.
    pub(crate) fn load_selected_zone(&mut self) {
        let cfg = self.registry.get(self.selected_zone);
        self.time_field = cfg.time;
        self.order_field = cfg.order;
        log::debug!("Zone {} selected: {:?}", self.selected_zone, cfg);
    }

    fn handle_zone_selected(&mut self, zone: ZoneId) {
        self.selected_zone = zone;
        self.load_selected_zone();
    }

    // Field edits write straight through; duplicate orders are only caught
    // when run mode is enabled. The widget already clamps the time range,
    // the registry still only ever sees clamped values.
    fn handle_config_edited(&mut self) {
        self.time_field = clamp_time(self.time_field);
        self.registry
            .save(self.selected_zone, self.time_field, self.order_field);
    }

    fn handle_run_mode_toggle(&mut self, enabled: bool) {
        if !enabled {
            self.stop_process(false);
            self.save_config();
            return;
        }

        match self.registry.check_unique_orders() {
            Ok(()) => {
                // Raising the flag and bumping the generation in one locked
                // write retires any worker from a previous enablement: it
                // wakes, sees a newer generation, and exits before ticking.
                let generation;
                {
                    let &(ref lock, ref cvar) = &*self.thread_state;
                    let mut run = lock.lock().expect("Thread state mutex poisoned");
                    run.running = true;
                    run.generation += 1;
                    generation = run.generation;
                    cvar.notify_all();
                }
                if self.spawn_worker(generation) {
                    log::info!(
                        "Run mode enabled, sweep thread started (generation {}).",
                        generation
                    );
                    self.save_config();
                } else {
                    // Spawning failed, revert the run flag
                    log::error!("Sweep thread failed to spawn, reverting run mode.");
                    let &(ref lock, ref cvar) = &*self.thread_state;
                    let mut run = lock.lock().expect("Thread state mutex poisoned");
                    run.running = false;
                    cvar.notify_all();
                }
            }
            Err(conflict) => {
                // Registry already reset itself; the run flag was never set,
                // so the checkbox reverts to unchecked on the next frame.
                log::warn!("Run mode refused: {}", conflict);
                self.load_selected_zone();
                self.conflict_notice = Some(conflict);
            }
        }
    }

    /// Stops the sweep. The power path also rewinds the clock.
    fn stop_process(&mut self, reset_timer: bool) {
        {
            let &(ref lock, ref cvar) = &*self.thread_state;
            match lock.lock() {
                Ok(mut run) => run.running = false,
                Err(_) => log::error!("Thread state mutex poisoned while stopping!"),
            }
            cvar.notify_all();
        }
        self.stop_worker_cleanup(reset_timer);
    }

    fn handle_power(&mut self) {
        log::info!("Power pressed: stopping sweep and resetting clock.");
        self.stop_process(true);
    }

    fn handle_reset(&mut self) {
        self.registry.reset_to_default();
        self.load_selected_zone();
    }

    fn save_config(&mut self) {
        self.config.data.zones = self.registry.table();
        if let Err(e) = self.config.save() {
            log::error!("Failed to save config: {}", e);
        }
    }
}

// --- UI Drawing Functions ---

pub(crate) fn draw_about_screen(app: &mut ZonePanel, ui: &mut Ui) {
    ui.set_width(INITIAL_WIDTH);
    ui.vertical_centered(|ui| {
        ui.heading(format!("About {}", PROGRAM_TITLE));
        ui.separator();
        for line in about::about() {
            ui.label(line);
        }
        ui.separator();
        if ui.button("OK").clicked() {
            app.state = State::Running;
        }
    });
}

pub(crate) fn draw_running_state(app: &mut ZonePanel, ui: &mut Ui, ctx: &Context) {
    let thread_running = app.get_thread_status();
    let active = app.current_active_zone();
    let elapsed = app.current_elapsed();
    let blocked = app.conflict_notice.is_some();

    ui.add_enabled_ui(!blocked, |ui| {
        ui.columns(2, |columns| {
            columns[0].vertical(|ui| {
                draw_zone_config_section(app, ui, thread_running);
                ui.separator();
                draw_control_buttons(app, ui, ctx, thread_running);
            });

            columns[1].vertical(|ui| {
                draw_indicator_panel(ui, active);
                ui.separator();
                draw_timer(ui, elapsed);
            });
        });
    });

    draw_conflict_notice(app, ctx);
}

fn draw_zone_config_section(app: &mut ZonePanel, ui: &mut Ui, thread_running: bool) {
    ui.heading("Zones");

    ui.horizontal(|ui| {
        for zone in ZoneId::ALL {
            let selected = app.selected_zone == zone;
            if ui.radio(selected, zone.to_string()).clicked() && !selected {
                app.handle_zone_selected(zone);
            }
        }
    });

    // Settings are frozen while the sweep runs; the running plan is a
    // snapshot anyway.
    ui.add_enabled_ui(!thread_running, |ui| {
        ui.horizontal(|ui| {
            ui.label("Time:");
            if ui
                .add(egui::DragValue::new(&mut app.time_field).range(TIME_MIN..=TIME_MAX))
                .changed()
            {
                app.handle_config_edited();
            }
            ui.add_space(10.0);
            ui.label("Order:");
            if ui.add(egui::DragValue::new(&mut app.order_field)).changed() {
                app.handle_config_edited();
            }
        });
    });
    ui.add_space(10.0);
}

fn draw_indicator_panel(ui: &mut Ui, active: Option<ZoneId>) {
    ui.heading("Indicators");
    ui.vertical_centered(|ui| {
        draw_indicator(ui, ZoneId::Front, active);
        ui.horizontal(|ui| {
            ui.add_space(30.0);
            draw_indicator(ui, ZoneId::Left, active);
            ui.add_space(40.0);
            draw_indicator(ui, ZoneId::Right, active);
        });
        draw_indicator(ui, ZoneId::Back, active);
    });
}

/// One indicator lamp: lit while its zone holds the sweep.
fn draw_indicator(ui: &mut Ui, zone: ZoneId, active: Option<ZoneId>) {
    let lit = active == Some(zone);
    let fill = if lit { ACTIVE_COLOR } else { IDLE_COLOR };
    let text_color = if lit { Color32::BLACK } else { Color32::GRAY };
    ui.label(
        RichText::new(format!(" {:^7} ", zone.to_string().to_uppercase()))
            .monospace()
            .background_color(fill)
            .color(text_color),
    );
}

fn draw_timer(ui: &mut Ui, elapsed: u64) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(format_elapsed(elapsed))
                .monospace()
                .size(28.0),
        );
    });
}

/// The control column: run mode, power, reset and the usual extras.
fn draw_control_buttons(app: &mut ZonePanel, ui: &mut Ui, ctx: &Context, thread_running: bool) {
    let mut run_mode = thread_running;
    if ui.checkbox(&mut run_mode, "Run mode").changed() {
        app.handle_run_mode_toggle(run_mode);
    }

    let power_text = RichText::new("Power")
        .color(Color32::BLACK)
        .background_color(STOP_COLOR);
    if ui.button(power_text).clicked() {
        app.handle_power();
    }

    if ui
        .add_enabled(!thread_running, egui::Button::new("Reset zones"))
        .clicked()
    {
        app.handle_reset();
    }

    if ui.button("About").clicked() {
        app.state = State::About;
    }

    if ui.button("Exit").clicked() {
        // Ask eframe to close the window. `on_exit` will be called.
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

/// Blocking alert shown when enabling run mode found duplicate orders.
fn draw_conflict_notice(app: &mut ZonePanel, ctx: &Context) {
    let Some(conflict) = app.conflict_notice.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Order conflict")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("{}. Resetting to default values.", conflict));
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        app.conflict_notice = None;
    }
}
