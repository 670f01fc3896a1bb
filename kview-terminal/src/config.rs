/// Startup configuration from command-line flags
use anyhow::{bail, Result};
use clap::Args;
use kview_core::{parse_script, Command, RenderStyle};

/// Flags shared by every mode
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Commands to apply before the first frame, e.g. "shift 2 0 0; scale 2"
    #[arg(long, global = true, value_name = "SCRIPT")]
    pub commands: Option<String>,

    /// Lower bound of every axis
    #[arg(long, global = true, default_value_t = -5.0, allow_hyphen_values = true)]
    pub axis_min: f32,

    /// Upper bound of every axis
    #[arg(long, global = true, default_value_t = 10.0, allow_hyphen_values = true)]
    pub axis_max: f32,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Validated configuration, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub style: RenderStyle,
    pub color: bool,
    pub startup: Vec<Command>,
}

impl ViewConfig {
    pub fn from_args(args: &ViewArgs) -> Result<Self> {
        if !(args.axis_min.is_finite() && args.axis_max.is_finite()) {
            bail!("axis limits must be finite");
        }
        if args.axis_min >= args.axis_max {
            bail!(
                "--axis-min ({}) must be below --axis-max ({})",
                args.axis_min,
                args.axis_max
            );
        }

        let startup = match &args.commands {
            Some(script) => parse_script(script)?,
            None => Vec::new(),
        };

        Ok(Self {
            style: RenderStyle::with_uniform_limits(args.axis_min, args.axis_max),
            color: !args.no_color,
            startup,
        })
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            style: RenderStyle::default(),
            color: true,
            startup: Vec::new(),
        }
    }
}
