use clap::{Parser, Subcommand};
use orbitcam::SOCKET_PATH;
use orbitcam::camera::{CameraSettings, compute_camera_target};
use orbitcam::content::TopicId;
use orbitcam::geometry::{Rect, Size};
use orbitcam::layout::{ChildLayoutOptions, LayoutMode, MenuLayout, compute_child_layout};
use std::collections::BTreeMap;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "orbitcam", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the orbit menu
    Show,
    /// Hide the orbit menu
    Hide,
    /// Zoom onto a topic tile
    Focus { id: TopicId },
    /// Zoom back out to the full menu
    Unfocus,
    /// Reload the orbit config
    Reload,
    /// Print the ring layout for a viewport as JSON
    Layout {
        #[arg(long, default_value_t = 1920.0)]
        width: f64,
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
        #[arg(short, long, default_value_t = 8)]
        tiles: usize,
        /// Also place this many subtopics around every tile
        #[arg(short, long, default_value_t = 0)]
        children: usize,
        #[arg(short, long, default_value_t = LayoutMode::Ring)]
        mode: LayoutMode,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Focus { id } => send_command(&format!("focus {id}")),
        Commands::Unfocus => send_command("unfocus"),
        Commands::Reload => send_command("reload"),
        Commands::Layout {
            width,
            height,
            tiles,
            children,
            mode,
        } => print_layout(Size::new(width, height), tiles, children, mode),
    }
}

fn print_layout(viewport: Size, tiles: usize, children: usize, mode: LayoutMode) -> anyhow::Result<()> {
    let report = layout_report(viewport, tiles, children, mode)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Ring layout plus, per tile, its camera target and child positions. Tiles
/// are placed the way the menu draws them: ring centered in the viewport.
fn layout_report(
    viewport: Size,
    tiles: usize,
    children: usize,
    mode: LayoutMode,
) -> anyhow::Result<serde_json::Value> {
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        anyhow::bail!("viewport must be positive, got {}x{}", viewport.width, viewport.height);
    }

    let layout = MenuLayout::compute(viewport, tiles);
    log::info!("{}", layout.describe());

    let settings = CameraSettings::default();
    let options = ChildLayoutOptions::default();
    let screen = Rect::from_size(viewport);

    let tiles: Vec<_> = layout
        .tile_positions
        .iter()
        .zip(layout.tile_rects())
        .map(|(pos, tile)| {
            serde_json::json!({
                "angle": pos.angle,
                "rect": tile,
                "camera_target": compute_camera_target(tile, screen, &settings),
                "children": compute_child_layout(&tile, children, viewport, mode, &options),
            })
        })
        .collect();

    Ok(serde_json::json!({
        "layout": layout,
        "css": layout.custom_properties().into_iter().collect::<BTreeMap<_, _>>(),
        "tiles": tiles,
    }))
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbit at {}: {}. Is orbit running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_targets_on_screen_tiles() {
        let report = layout_report(Size::new(1920.0, 1080.0), 8, 3, LayoutMode::Ring).unwrap();
        let top = &report["tiles"][0];

        // the top tile sits straight above the viewport center
        let target = &top["camera_target"];
        let scale = target["scale"].as_f64().unwrap();
        assert!(target["tx"].as_f64().unwrap().abs() < 1e-9);
        assert!((target["ty"].as_f64().unwrap() - 302.4 / scale).abs() < 1e-9);

        let rect = &top["rect"];
        let center_x = rect["x"].as_f64().unwrap() + rect["width"].as_f64().unwrap() / 2.0;
        assert!((center_x - 960.0).abs() < 1e-9);
        assert_eq!(top["children"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_report_rejects_empty_viewport() {
        assert!(layout_report(Size::new(0.0, 1080.0), 8, 0, LayoutMode::Ring).is_err());
    }
}
