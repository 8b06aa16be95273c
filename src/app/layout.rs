//! Menu bar, tabs and auxiliary windows.

use eframe::egui::{self, RichText};
use egui_phosphor::regular as icons;

use super::{DashboardApp, Tab};

const LABEL_SIZE: f32 = 32.0;
const VALUE_SIZE: f32 = 40.0;
const BLOCK_SIDE: f32 = 64.0;

impl DashboardApp {
    pub(super) fn render_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("dashboard_menu").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button(format!("{} Settings", icons::GEAR)).clicked() {
                        self.show_settings = true;
                        ui.close();
                    }
                    if ui.button(format!("{} Quit", icons::SIGN_OUT)).clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Camera", |ui| {
                    ui.hyperlink_to(
                        format!("{} Open camera stream", icons::VIDEO_CAMERA),
                        &self.settings.camera_http,
                    );
                });
                ui.menu_button("Help", |ui| {
                    if ui.button(format!("{} About", icons::INFO)).clicked() {
                        self.show_about = true;
                        ui.close();
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(t) = self.last_update {
                        ui.weak(format!("last update {}", t.format("%H:%M:%S")));
                    }
                });
            });
        });
    }

    pub(super) fn render_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.title());
            }
        });
        ui.separator();
        match self.tab {
            Tab::OperatorStatus => self.render_operator(ui),
            Tab::ColorSensor => self.render_color(ui),
            Tab::Swerve => self.render_swerve(ui),
        }
    }

    fn render_operator(&self, ui: &mut egui::Ui) {
        let w = &self.widgets;
        egui::Grid::new("operator_status")
            .num_columns(3)
            .spacing([24.0, 16.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Arm Mode:").size(LABEL_SIZE));
                w.arm_mode.show(ui, VALUE_SIZE);
                w.arm_mode_color.show(ui, BLOCK_SIDE);
                ui.end_row();

                ui.label(RichText::new("Arm Object:").size(LABEL_SIZE));
                w.arm_object.show(ui, VALUE_SIZE);
                w.arm_object_color.show(ui, BLOCK_SIDE);
                ui.end_row();

                ui.label(RichText::new("S/PU Pos:").size(LABEL_SIZE));
                w.position.show(ui, VALUE_SIZE);
                ui.end_row();
            });
    }

    fn render_color(&self, ui: &mut egui::Ui) {
        let w = &self.widgets;
        ui.horizontal(|ui| {
            w.color_composite.show(ui, 240.0);
            ui.vertical(|ui| {
                for (label, bar) in w.color_labels.iter().zip(&w.color_bars) {
                    label.show(ui, 16.0);
                    bar.show(ui);
                }
            });
        });
    }

    fn render_swerve(&self, ui: &mut egui::Ui) {
        egui::Grid::new("swerve_modules")
            .num_columns(2)
            .spacing([16.0, 16.0])
            .show(ui, |ui| {
                for (i, panel) in self.widgets.swerve.iter().enumerate() {
                    panel.show(ui);
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
    }

    pub(super) fn render_windows(&mut self, ctx: &egui::Context) {
        let mut changed = false;

        let mut open = self.show_settings;
        egui::Window::new("Settings").open(&mut open).show(ctx, |ui| {
            ui.heading("Theme");
            changed |= ui.checkbox(&mut self.settings.dark_mode, "Dark Mode").changed();

            ui.separator();
            ui.heading("Connection");
            ui.label("Restart the application for these settings to apply");
            ui.horizontal(|ui| {
                ui.label("IP Address");
                changed |= ui
                    .add(egui::TextEdit::singleline(&mut self.settings.ip).hint_text("XX.XX.XX.XX"))
                    .changed();
            });
            ui.horizontal(|ui| {
                ui.label("Camera Address");
                changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut self.settings.camera_http)
                            .hint_text("Camera HTTP Link"),
                    )
                    .changed();
            });

            ui.separator();
            ui.heading("Camera");
            ui.horizontal(|ui| {
                ui.label("Camera Screen");
                changed |= ui
                    .add(egui::DragValue::new(&mut self.settings.camera_screen).range(0..=5))
                    .changed();
            });
        });
        self.show_settings = open;

        let mut open = self.show_about;
        egui::Window::new("About").open(&mut open).show(ctx, |ui| {
            ui.heading("RobotGUI");
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            let releases = format!("https://github.com/{}/releases", self.settings.repo);
            ui.hyperlink_to("Releases", releases);
        });
        self.show_about = open;

        let mut open = self.show_welcome;
        egui::Window::new("Welcome").open(&mut open).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Welcome to RobotGUI");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(12.0);
                ui.label("Set the robot address under File > Settings, then restart.");
            });
        });
        self.show_welcome = open;

        if changed {
            self.persist_settings();
        }
    }
}
