//! Top-level entry point for running the dashboard as a native window.

use std::sync::Arc;

use eframe::egui;

use crate::broadcast::BroadcastClient;
use crate::config::DashboardConfig;
use crate::relay::RelayReceiver;

use super::DashboardApp;

/// Launch the dashboard in a native window.
///
/// The relay receiver is moved onto the UI thread and its waker is pointed at
/// the egui context, so every submission schedules a repaint. Blocks until
/// the window is closed.
pub fn run_dashboard(
    relay_rx: RelayReceiver,
    client: Option<Arc<dyn BroadcastClient>>,
    mut cfg: DashboardConfig,
) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1024.0, 720.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            let ctx = cc.egui_ctx.clone();
            relay_rx.set_waker(move || ctx.request_repaint());
            Ok(Box::new(DashboardApp::new(relay_rx, client, cfg)))
        }),
    )
}

const ICON_SVG: &[u8] = include_bytes!("../../icon.svg");

/// Rasterize the bundled robot icon for the window.
fn load_app_icon_svg() -> Option<egui::IconData> {
    rasterize_icon(ICON_SVG)
}

/// Render SVG bytes at their intrinsic size. `None` if they do not parse or are empty.
fn rasterize_icon(svg: &[u8]) -> Option<egui::IconData> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).ok()?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Some(egui::IconData {
        width: size.width(),
        height: size.height(),
        rgba: pixmap.take(),
    })
}
