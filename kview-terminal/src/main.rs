/// KView - terminal viewer for a block-letter 3D mesh
///
/// Controls (interactive mode):
///   - Tab / Shift-Tab / arrows: move focus in the control panel
///   - Digits: edit the focused shift input
///   - Enter / Space: press the focused button
///   - F2 shift, F3 scale +, F4 scale -, F5 reset
///   - Esc / Ctrl-C: quit

use anyhow::Result;
use clap::{Parser, Subcommand};
use kview_core::{BaseMesh, MeshModel, Viewer};
use kview_terminal::{TerminalDisplay, ViewArgs, ViewConfig, Viewport};
use log::info;
use std::io;

#[derive(Parser)]
#[command(name = "kview")]
#[command(about = "Terminal viewer for a block-letter 3D mesh", long_about = None)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer (default)
    View,
    /// Print a single frame to stdout
    Render {
        /// Frame width in characters
        #[arg(long, default_value_t = 80)]
        width: u16,
        /// Frame height in characters
        #[arg(long, default_value_t = 40)]
        height: u16,
    },
    /// Print the transformed vertex positions
    Vertices,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging.
    env_logger::builder().init();

    let config = ViewConfig::from_args(&cli.view)?;
    let mesh = BaseMesh::letter_k()?;
    info!(
        "loaded mesh: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );

    match cli.command {
        None | Some(Commands::View) => kview_terminal::run(mesh, &config)?,
        Some(Commands::Render { width, height }) => render(mesh, &config, width, height)?,
        Some(Commands::Vertices) => vertices(mesh, &config),
    }

    Ok(())
}

fn render(mesh: BaseMesh, config: &ViewConfig, width: u16, height: u16) -> Result<()> {
    let viewport = Viewport {
        left: 0,
        top: 0,
        width: width.max(1),
        height: height.max(1),
    };
    let display = TerminalDisplay::new(io::sink(), config.style.axis_limits, viewport, false);
    let mut viewer = Viewer::new(MeshModel::new(mesh), config.style.clone(), display)?;
    for &command in &config.startup {
        viewer.apply(command)?;
    }

    println!("{}", kview_terminal::TITLE);
    for line in viewer.display().renderer().lines() {
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn vertices(mesh: BaseMesh, config: &ViewConfig) {
    let mut model = MeshModel::new(mesh);
    for &command in &config.startup {
        model.apply(command);
    }

    let state = model.state();
    println!(
        "scale {} translation ({}, {}, {})",
        state.scale, state.translation.x, state.translation.y, state.translation.z
    );
    println!("{:>3} {:>10} {:>10} {:>10}", "#", "x", "y", "z");
    for (i, v) in model.transformed_vertices().iter().enumerate() {
        println!("{:>3} {:>10.3} {:>10.3} {:>10.3}", i, v.x, v.y, v.z);
    }
}
