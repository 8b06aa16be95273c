use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use robotgui::broadcast::{COLOR_SENSOR_TABLE, SMART_DASHBOARD};
use robotgui::mutation::ColorComponent;
use robotgui::{
    channel_relay, BroadcastClient, ColorToken, DashboardWidgets, DisplaySink, EntryListener,
    LocalTable, SinkId, SinkRegistry, SwerveChannel, TelemetryBinding, TelemetryValue,
};

#[derive(Default)]
struct Sink {
    text: Option<String>,
    color: Option<ColorToken>,
    rgb: Option<(f64, f64, f64)>,
    value: Option<f64>,
}

impl DisplaySink for Sink {
    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
    fn set_color(&mut self, color: ColorToken) {
        self.color = Some(color);
    }
    fn set_rgb(&mut self, r: f64, g: f64, b: f64) {
        self.rgb = Some((r, g, b));
    }
    fn set_numeric_value(&mut self, value: f64) {
        self.value = Some(value);
    }
}

#[derive(Default)]
struct Recording(HashMap<SinkId, Sink>);

impl SinkRegistry for Recording {
    fn sink_mut(&mut self, id: SinkId) -> Option<&mut dyn DisplaySink> {
        Some(self.0.entry(id).or_default())
    }
}

#[test]
fn table_updates_reach_sinks_through_the_relay() {
    let table = LocalTable::new();
    let (relay, rx) = channel_relay();
    TelemetryBinding::attach(&table, relay);

    table.put(SMART_DASHBOARD, "Mode", "Scoring");
    table.put(SMART_DASHBOARD, "Mod 1 Velocity", 2.25);
    table.put(COLOR_SENSOR_TABLE, "colorSensorGreen", 128.0);
    table.put(SMART_DASHBOARD, "Unrelated", true);

    let mut sinks = Recording::default();
    assert_eq!(rx.drain(&mut sinks), 2 + 1 + 3);

    let mode = &sinks.0[&SinkId::ArmMode];
    assert_eq!(mode.text.as_deref(), Some("Scoring"));
    assert_eq!(sinks.0[&SinkId::ArmModeColor].color, Some(ColorToken::Green));
    let swerve = SinkId::Swerve {
        module: 1,
        channel: SwerveChannel::Velocity,
    };
    assert_eq!(sinks.0[&swerve].value, Some(2.25));
    assert_eq!(
        sinks.0[&SinkId::ColorLabel(ColorComponent::Green)].text.as_deref(),
        Some("Green: 128.0")
    );
    assert_eq!(sinks.0[&SinkId::ColorComposite].rgb, Some((0.0, 128.0, 0.0)));
}

#[test]
fn late_listener_receives_existing_entries_as_new() {
    let table = LocalTable::new();
    table.put(SMART_DASHBOARD, "Object", "Cube");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    table.add_listener(Arc::new(
        move |_: &str, key: &str, value: &TelemetryValue, is_new: bool| {
            s.lock().unwrap().push((key.to_string(), value.clone(), is_new));
        },
    ));
    table.put(SMART_DASHBOARD, "Object", "Cone");

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            ("Object".to_string(), TelemetryValue::from("Cube"), true),
            ("Object".to_string(), TelemetryValue::from("Cone"), false),
        ]
    );
}

#[test]
fn binding_drives_dashboard_widgets() {
    let table = LocalTable::new();
    let (relay, rx) = channel_relay();
    let binding = TelemetryBinding::attach(&table, relay);

    table.put(SMART_DASHBOARD, "Object", "Neither");
    table.put(COLOR_SENSOR_TABLE, "colorSensorRed", 300.0);

    let mut widgets = DashboardWidgets::default();
    rx.drain(&mut widgets);
    assert_eq!(widgets.arm_object.text, "None");
    assert_eq!(widgets.color_composite.rgb, [255, 0, 0]);
    assert_eq!(binding.dispatcher().color_reading().red, 300.0);
}

#[test]
fn concurrent_color_deliveries_leave_the_composite_current() {
    const ROUNDS: usize = 200;
    const PER_THREAD: usize = 50;
    let keys = ["colorSensorRed", "colorSensorGreen", "colorSensorBlue"];

    for _ in 0..ROUNDS {
        let (relay, rx) = channel_relay();
        let binding = Arc::new(TelemetryBinding::new(relay));
        let barrier = Arc::new(Barrier::new(keys.len()));

        let handles: Vec<_> = keys
            .iter()
            .map(|&key| {
                let binding = Arc::clone(&binding);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 1..=PER_THREAD {
                        let value = TelemetryValue::from(i as f64);
                        binding.on_entry_changed(COLOR_SENSOR_TABLE, key, &value, false);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut sinks = Recording::default();
        rx.drain(&mut sinks);
        let reading = binding.dispatcher().color_reading();
        assert_eq!(
            sinks.0[&SinkId::ColorComposite].rgb,
            Some((reading.red, reading.green, reading.blue))
        );
        assert_eq!(reading.red, PER_THREAD as f64);
    }
}

#[test]
fn listener_added_during_puts_ends_on_the_table_value() {
    const ROUNDS: usize = 500;

    for round in 0..ROUNDS {
        let table = LocalTable::new();
        table.put(SMART_DASHBOARD, "Object", "Cube");

        let last = Arc::new(Mutex::new(None));
        let l = Arc::clone(&last);
        let listener: Arc<dyn EntryListener> = Arc::new(
            move |_: &str, _: &str, value: &TelemetryValue, _: bool| {
                *l.lock().unwrap() = Some(value.clone());
            },
        );

        let barrier = Arc::new(Barrier::new(2));
        let writer = {
            let table = table.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                table.put(SMART_DASHBOARD, "Object", "Cone");
            })
        };
        barrier.wait();
        table.add_listener(listener);
        writer.join().unwrap();

        assert_eq!(
            *last.lock().unwrap(),
            table.get(SMART_DASHBOARD, "Object"),
            "round {round}"
        );
    }
}
