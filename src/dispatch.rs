//! Key-to-display dispatch.
//!
//! [`Dispatcher::dispatch`] maps one `(key, value)` broadcast update to zero or
//! more [`DisplayMutation`]s. Classification is pure: it never blocks, performs
//! I/O or looks at sink state. The only state carried between calls is the last
//! color sensor reading, needed to recompute the composite color whenever a
//! single component changes.
//!
//! Key space:
//! - literal keys `Mode`, `Object`, `ScorePos`, `PickPos` → label text (+ indicator color)
//! - `Mod <0-3> <Cancoder|Integrated|Velocity>` → numeric field on a swerve module panel
//! - `colorSensorRed|Green|Blue|Prox` → component label, component bar, composite color
//!
//! Every other key is ignored. Broadcast tables carry plenty of unrelated
//! entries and an unknown key is not an error.

use std::sync::{Mutex, PoisonError};

use crate::mutation::{
    ColorComponent, ColorToken, DisplayMutation, SinkId, SwerveChannel, SWERVE_MODULES,
};
use crate::normalize::{camel_title_case, label_text, substitute_tokens};
use crate::telemetry::{format_reading, TelemetryValue};

/// Broadcast key names understood by the dispatcher.
pub mod keys {
    pub const MODE: &str = "Mode";
    pub const OBJECT: &str = "Object";
    pub const SCORE_POS: &str = "ScorePos";
    pub const PICK_POS: &str = "PickPos";
    pub const COLOR_RED: &str = "colorSensorRed";
    pub const COLOR_GREEN: &str = "colorSensorGreen";
    pub const COLOR_BLUE: &str = "colorSensorBlue";
    pub const COLOR_PROX: &str = "colorSensorProx";
    /// Prefix of swerve module keys (`"Mod 2 Velocity"`).
    pub const MODULE_PREFIX: &str = "Mod ";
}

/// Parsed `"Mod <digit> <Channel>"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleKey {
    pub module: u8,
    pub channel: SwerveChannel,
}

impl ModuleKey {
    /// Structured parse: fixed prefix, one digit in `0..SWERVE_MODULES`, one space,
    /// one known channel token. Anything else is `None`.
    pub fn parse(key: &str) -> Option<Self> {
        let rest = key.strip_prefix(keys::MODULE_PREFIX)?;
        let (digit, channel) = rest.split_once(' ')?;
        let mut chars = digit.chars();
        let module = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        let module = u8::try_from(module).ok().filter(|m| *m < SWERVE_MODULES)?;
        let channel = SwerveChannel::from_token(channel)?;
        Some(Self { module, channel })
    }
}

/// Last-seen color sensor components. All start at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorReading {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub proximity: f64,
}

impl ColorReading {
    pub fn get(&self, component: ColorComponent) -> f64 {
        match component {
            ColorComponent::Red => self.red,
            ColorComponent::Green => self.green,
            ColorComponent::Blue => self.blue,
            ColorComponent::Proximity => self.proximity,
        }
    }

    pub fn set(&mut self, component: ColorComponent, value: f64) {
        match component {
            ColorComponent::Red => self.red = value,
            ColorComponent::Green => self.green = value,
            ColorComponent::Blue => self.blue = value,
            ColorComponent::Proximity => self.proximity = value,
        }
    }

    /// Composite color mutation built from the stored components.
    pub fn composite(&self) -> DisplayMutation {
        DisplayMutation::rgb(SinkId::ColorComposite, self.red, self.green, self.blue)
    }
}

/// Routing decision for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Mode,
    Object,
    Position,
    Swerve(ModuleKey),
    Color(ColorComponent),
}

impl Route {
    pub fn classify(key: &str) -> Option<Self> {
        match key {
            keys::MODE => Some(Route::Mode),
            keys::OBJECT => Some(Route::Object),
            keys::SCORE_POS | keys::PICK_POS => Some(Route::Position),
            keys::COLOR_RED => Some(Route::Color(ColorComponent::Red)),
            keys::COLOR_GREEN => Some(Route::Color(ColorComponent::Green)),
            keys::COLOR_BLUE => Some(Route::Color(ColorComponent::Blue)),
            keys::COLOR_PROX => Some(Route::Color(ColorComponent::Proximity)),
            _ => ModuleKey::parse(key).map(Route::Swerve),
        }
    }
}

/// Indicator color for an arm mode value.
pub fn mode_color(raw: &str) -> ColorToken {
    match raw {
        "Scoring" => ColorToken::Green,
        "Picking_up" => ColorToken::Cyan,
        _ => ColorToken::Neutral,
    }
}

/// Indicator color for a held object value.
pub fn object_color(raw: &str) -> ColorToken {
    match raw {
        "Cube" => ColorToken::Purple,
        "Cone" => ColorToken::Yellow,
        _ => ColorToken::Neutral,
    }
}

/// Maps broadcast updates to display mutations.
///
/// One instance per dashboard. `dispatch` takes `&self` and may be called from
/// several delivery threads at once; the color reading is guarded by a mutex.
#[derive(Debug, Default)]
pub struct Dispatcher {
    reading: Mutex<ColorReading>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored color reading.
    pub fn color_reading(&self) -> ColorReading {
        *self.reading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Classify one update and build the resulting mutations, in application order.
    ///
    /// `is_new` is accepted for parity with the broadcast listener signature and
    /// does not change the result.
    pub fn dispatch(
        &self,
        key: &str,
        value: &TelemetryValue,
        _is_new: bool,
    ) -> Vec<DisplayMutation> {
        let Some(route) = Route::classify(key) else {
            return Vec::new();
        };
        match route {
            Route::Mode => {
                let raw = value.to_text();
                vec![
                    DisplayMutation::text(SinkId::ArmMode, label_text(&raw, false)),
                    DisplayMutation::color(SinkId::ArmModeColor, mode_color(&raw)),
                ]
            }
            Route::Object => {
                let raw = value.to_text();
                vec![
                    DisplayMutation::text(SinkId::ArmObject, label_text(&raw, true)),
                    DisplayMutation::color(SinkId::ArmObjectColor, object_color(&raw)),
                ]
            }
            Route::Position => {
                let raw = substitute_tokens(&value.to_text());
                vec![DisplayMutation::text(
                    SinkId::Position,
                    camel_title_case(&raw),
                )]
            }
            Route::Swerve(ModuleKey { module, channel }) => vec![DisplayMutation::numeric(
                SinkId::Swerve { module, channel },
                value.number_or_zero(),
            )],
            Route::Color(component) => self.dispatch_color(component, value.number_or_zero()),
        }
    }

    fn dispatch_color(&self, component: ColorComponent, v: f64) -> Vec<DisplayMutation> {
        let composite = {
            let mut reading = self.reading.lock().unwrap_or_else(PoisonError::into_inner);
            reading.set(component, v);
            reading.composite()
        };
        vec![
            DisplayMutation::text(
                SinkId::ColorLabel(component),
                format!("{}: {}", component.label(), format_reading(v)),
            ),
            DisplayMutation::numeric(SinkId::ColorBar(component), v.trunc()),
            composite,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationOp;

    #[test]
    fn module_key_parse_accepts_known_shapes() {
        assert_eq!(
            ModuleKey::parse("Mod 3 Velocity"),
            Some(ModuleKey {
                module: 3,
                channel: SwerveChannel::Velocity
            })
        );
    }

    #[test]
    fn module_key_parse_rejects_out_of_range_and_garbage() {
        for key in [
            "Mod 4 Cancoder",
            "Mod 12 Cancoder",
            "Mod x Cancoder",
            "Mod 1 Steering",
            "Mod 1 Cancoder extra",
            "mod 1 Cancoder",
            "Mod 1",
            "Mod ",
        ] {
            assert_eq!(ModuleKey::parse(key), None, "{key}");
        }
    }

    #[test]
    fn classify_routes_literals() {
        assert_eq!(Route::classify("PickPos"), Some(Route::Position));
        assert_eq!(
            Route::classify("colorSensorProx"),
            Some(Route::Color(ColorComponent::Proximity))
        );
        assert_eq!(Route::classify("Battery"), None);
    }

    #[test]
    fn color_component_updates_only_its_slot() {
        let d = Dispatcher::new();
        d.dispatch("colorSensorGreen", &TelemetryValue::from("20"), true);
        let r = d.color_reading();
        assert_eq!(r.green, 20.0);
        assert_eq!(r.red, 0.0);
    }

    #[test]
    fn uncoercible_component_reads_as_zero() {
        let d = Dispatcher::new();
        let out = d.dispatch("colorSensorBlue", &TelemetryValue::from("n/a"), true);
        assert_eq!(out[0].op, MutationOp::SetText("Blue: 0.0".into()));
        assert_eq!(out[2].op, MutationOp::SetRgb { r: 0.0, g: 0.0, b: 0.0 });
    }
}
