//! Per-frame update for [`DashboardApp`].
//!
//! Each frame: apply the theme if it changed, drain the relay into the
//! widgets, poll connectivity, then draw.

use std::time::Instant;

use eframe::egui;

use crate::sinks::apply_mutation;

use super::DashboardApp;

impl DashboardApp {
    /// Data-only pass: everything that mutates widget state this frame.
    pub fn update_data(&mut self, now: Instant) {
        let applied = self.relay_rx.drain(&mut self.widgets);
        if applied > 0 {
            self.last_update = Some(chrono::Local::now());
        }

        if let Some(client) = &self.client {
            if let Some(m) = self.monitor.poll(now, client.as_ref()) {
                apply_mutation(&mut self.widgets, m);
            }
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.applied_dark_mode == Some(self.settings.dark_mode) {
            return;
        }
        ctx.set_visuals(if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_dark_mode = Some(self.settings.dark_mode);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);
        self.update_data(Instant::now());

        self.render_menu(ctx);
        self.render_windows(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.widgets.connection.show(ui);
            self.render_tabs(ui);
        });

        // Relay submissions request a repaint; the connectivity poll needs its own tick.
        if self.client.is_some() {
            ctx.request_repaint_after(self.poll_interval);
        }
    }
}
