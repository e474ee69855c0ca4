//! Entry point for the **gridlens** daemon.
//!
//! Reads commands (grid list pushes, snapshot pushes, user actions) from a
//! Unix socket on a background thread and applies them on the main thread.
//! Highlighter requests are written to stdout as JSON lines; a `"Render"`
//! command writes the current frame to stdout as `{"Frame": ...}`.

use gridlens::bridge::json::JsonLinesBridge;
use gridlens::command::Command;
use gridlens::config::Config;
use gridlens::coordinator::{GridCoordinator, Outcome};
use gridlens::ipc::listener::UnixSocketListener;
use gridlens::traits::{CommandSource, HighlighterBridge};
use gridlens::view::PanelView;
use log::{debug, error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc;

/// Default socket path for the command listener.
fn default_socket_path() -> PathBuf {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(runtime).join("gridlens.sock")
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/gridlens`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("gridlens")
}

/// Try to load `$XDG_CONFIG_HOME/gridlens/config.json`, falling back to
/// compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

/// Lines the daemon itself writes to stdout.
#[derive(Serialize)]
enum Output<'a> {
    Frame(&'a PanelView),
}

//  Main

fn main() {
    env_logger::init();

    let config = load_config();
    let socket = config.socket_path.clone().unwrap_or_else(default_socket_path);

    let bridge = JsonLinesBridge::new(std::io::stdout());
    let mut coordinator = GridCoordinator::new(bridge, config.display.clone());
    coordinator.set_outline_max_cells(config.outline.max_cells);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_source(socket, cmd_tx);

    run_event_loop(coordinator, cmd_rx);
}

/// Apply commands until every source has hung up.
fn run_event_loop<B: HighlighterBridge>(
    mut coordinator: GridCoordinator<B>,
    cmd_rx: mpsc::Receiver<Command>,
) {
    info!("gridlens running");
    for cmd in cmd_rx {
        let render = matches!(cmd, Command::Render);
        match coordinator.handle(cmd) {
            Ok(Outcome::Applied) => {}
            Ok(Outcome::Ignored(call)) => debug!("dropped {:?}", call),
            Err(e) => error!("command error: {}", e),
        }
        if render {
            emit_frame(&coordinator.view());
        } else {
            debug!(
                "{:?}: {} grid(s), {} ignored so far",
                coordinator.state(),
                coordinator.store().count(),
                coordinator.ignored_count()
            );
        }
    }
    info!("command source closed, exiting");
}

fn emit_frame(view: &PanelView) {
    match serde_json::to_string(&Output::Frame(view)) {
        Ok(line) => println!("{}", line),
        Err(e) => error!("failed to encode frame: {}", e),
    }
}

//  Helpers

fn spawn_command_source(path: PathBuf, tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
