//! Widget state backing the dashboard, and the [`SinkRegistry`] that routes
//! display mutations to it.
//!
//! Each widget keeps only what it renders. Rendering lives next to the state
//! so the layout code stays a list of calls.

use eframe::egui::{self, Color32, RichText};

use crate::mutation::{ColorComponent, ColorToken, SinkId, SwerveChannel, SWERVE_MODULES};
use crate::sinks::{DisplaySink, SinkRegistry};

const UNKNOWN: &str = "Unknown";

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
}

impl TextLabel {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn show(&self, ui: &mut egui::Ui, size: f32) {
        ui.label(RichText::new(&self.text).size(size));
    }
}

impl DisplaySink for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// A solid block of color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBlock {
    pub rgb: [u8; 3],
}

impl Default for ColorBlock {
    fn default() -> Self {
        Self {
            rgb: ColorToken::Neutral.rgb(),
        }
    }
}

impl ColorBlock {
    pub fn show(&self, ui: &mut egui::Ui, side: f32) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
        let [r, g, b] = self.rgb;
        ui.painter().rect_filled(rect, 2.0, Color32::from_rgb(r, g, b));
        ui.painter().rect_stroke(
            rect,
            2.0,
            ui.visuals().widgets.noninteractive.bg_stroke,
            egui::StrokeKind::Inside,
        );
    }
}

/// Truncate and clamp one channel into a byte.
fn channel_byte(v: f64) -> u8 {
    v.trunc().clamp(0.0, 255.0) as u8
}

impl DisplaySink for ColorBlock {
    fn set_color(&mut self, color: ColorToken) {
        self.rgb = color.rgb();
    }

    fn set_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.rgb = [channel_byte(r), channel_byte(g), channel_byte(b)];
    }
}

/// Progress bar with a fixed integer range `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelBar {
    pub value: f64,
    pub max: f64,
    pub fill: Color32,
}

impl LevelBar {
    pub fn new(max: i64, fill: Color32) -> Self {
        Self {
            value: 0.0,
            max: max as f64,
            fill,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0) as f32
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.add(
            egui::ProgressBar::new(self.fraction())
                .fill(self.fill)
                .text(format!("{}", self.value as i64)),
        );
    }
}

impl DisplaySink for LevelBar {
    fn set_numeric_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// One numeric readout on a swerve module panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericField {
    pub value: Option<f64>,
}

impl DisplaySink for NumericField {
    fn set_numeric_value(&mut self, value: f64) {
        self.value = Some(value);
    }
}

/// Panel for a single swerve module.
#[derive(Debug, Clone, PartialEq)]
pub struct SwervePanel {
    pub title: String,
    pub fields: [NumericField; 3],
}

fn channel_index(channel: SwerveChannel) -> usize {
    match channel {
        SwerveChannel::Cancoder => 0,
        SwerveChannel::Integrated => 1,
        SwerveChannel::Velocity => 2,
    }
}

impl SwervePanel {
    pub fn new(module: u8) -> Self {
        Self {
            title: format!("Module {module}"),
            fields: [NumericField::default(); 3],
        }
    }

    pub fn field(&self, channel: SwerveChannel) -> &NumericField {
        &self.fields[channel_index(channel)]
    }

    pub fn field_mut(&mut self, channel: SwerveChannel) -> &mut NumericField {
        &mut self.fields[channel_index(channel)]
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading(&self.title);
            egui::Grid::new(&self.title).num_columns(2).show(ui, |ui| {
                for channel in SwerveChannel::ALL {
                    ui.label(channel.token());
                    match self.field(channel).value {
                        Some(v) => ui.monospace(format!("{v:.2}")),
                        None => ui.weak(UNKNOWN),
                    };
                    ui.end_row();
                }
            });
        });
    }
}

/// Full-width warning strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub text: String,
    pub visible: bool,
}

impl StatusBanner {
    pub fn show(&self, ui: &mut egui::Ui) {
        if !self.visible {
            return;
        }
        egui::Frame::new()
            .fill(Color32::from_rgb(0xef, 0x53, 0x50))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&self.text).strong().color(Color32::WHITE));
                });
            });
    }
}

impl DisplaySink for StatusBanner {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

fn component_index(c: ColorComponent) -> usize {
    match c {
        ColorComponent::Red => 0,
        ColorComponent::Green => 1,
        ColorComponent::Blue => 2,
        ColorComponent::Proximity => 3,
    }
}

const COLOR_COMPONENTS: [ColorComponent; 4] = [
    ColorComponent::Red,
    ColorComponent::Green,
    ColorComponent::Blue,
    ColorComponent::Proximity,
];

/// Every display element the dashboard binds telemetry to.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardWidgets {
    pub arm_mode: TextLabel,
    pub arm_mode_color: ColorBlock,
    pub arm_object: TextLabel,
    pub arm_object_color: ColorBlock,
    pub position: TextLabel,
    pub color_labels: [TextLabel; 4],
    pub color_bars: [LevelBar; 4],
    pub color_composite: ColorBlock,
    pub swerve: [SwervePanel; SWERVE_MODULES as usize],
    pub connection: StatusBanner,
}

impl Default for DashboardWidgets {
    fn default() -> Self {
        let bar_fill = [
            Color32::from_rgb(0xf4, 0x43, 0x36),
            Color32::from_rgb(0x4c, 0xaf, 0x50),
            Color32::from_rgb(0x21, 0x96, 0xf3),
            Color32::GRAY,
        ];
        Self {
            arm_mode: TextLabel::new(UNKNOWN),
            arm_mode_color: ColorBlock::default(),
            arm_object: TextLabel::new(UNKNOWN),
            arm_object_color: ColorBlock::default(),
            position: TextLabel::new(UNKNOWN),
            color_labels: COLOR_COMPONENTS
                .map(|c| TextLabel::new(format!("{}: {UNKNOWN}", c.label()))),
            color_bars: COLOR_COMPONENTS
                .map(|c| LevelBar::new(c.bar_max(), bar_fill[component_index(c)])),
            color_composite: ColorBlock::default(),
            swerve: [0, 1, 2, 3].map(SwervePanel::new),
            connection: StatusBanner {
                text: String::new(),
                visible: false,
            },
        }
    }
}

impl SinkRegistry for DashboardWidgets {
    fn sink_mut(&mut self, id: SinkId) -> Option<&mut dyn DisplaySink> {
        let sink: &mut dyn DisplaySink = match id {
            SinkId::ArmMode => &mut self.arm_mode,
            SinkId::ArmModeColor => &mut self.arm_mode_color,
            SinkId::ArmObject => &mut self.arm_object,
            SinkId::ArmObjectColor => &mut self.arm_object_color,
            SinkId::Position => &mut self.position,
            SinkId::ColorLabel(c) => &mut self.color_labels[component_index(c)],
            SinkId::ColorBar(c) => &mut self.color_bars[component_index(c)],
            SinkId::ColorComposite => &mut self.color_composite,
            SinkId::Swerve { module, channel } => {
                self.swerve.get_mut(usize::from(module))?.field_mut(channel)
            }
            SinkId::ConnectionStatus => &mut self.connection,
        };
        Some(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::relay::channel_relay;
    use crate::telemetry::TelemetryValue;

    #[test]
    fn composite_block_clamps_out_of_range_channels() {
        let mut block = ColorBlock::default();
        block.set_rgb(300.0, -5.0, 12.9);
        assert_eq!(block.rgb, [255, 0, 12]);
    }

    #[test]
    fn swerve_target_outside_the_panels_has_no_sink() {
        let mut w = DashboardWidgets::default();
        let id = SinkId::Swerve {
            module: SWERVE_MODULES,
            channel: SwerveChannel::Cancoder,
        };
        assert!(w.sink_mut(id).is_none());
    }

    #[test]
    fn dispatched_updates_land_on_widgets() {
        let d = Dispatcher::new();
        let (relay, rx) = channel_relay();
        relay.submit_all(d.dispatch("Mode", &TelemetryValue::from("Scoring"), true));
        relay.submit_all(d.dispatch("Mod 1 Velocity", &TelemetryValue::from(2.5), false));
        relay.submit_all(d.dispatch("colorSensorProx", &TelemetryValue::from(1000.0), true));

        let mut w = DashboardWidgets::default();
        assert_eq!(rx.drain(&mut w), 6);
        assert_eq!(w.arm_mode.text, "Scoring");
        assert_eq!(w.arm_mode_color.rgb, ColorToken::Green.rgb());
        assert_eq!(w.swerve[1].field(SwerveChannel::Velocity).value, Some(2.5));
        assert_eq!(w.color_labels[3].text, "Prox: 1000.0");
        assert_eq!(w.color_bars[3].value, 1000.0);
    }
}
