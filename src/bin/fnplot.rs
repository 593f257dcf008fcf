use std::fs;
use std::path::PathBuf;

use fnplot::api::{PlotConfig, PlotScene, Plotter};
use fnplot::core::{AxisRange, CurveMode};
use fnplot::render::NullRenderer;

const SHORT_DESCRIPTION: &str = "Draw the graph of a single-parameter function f(x).";

#[derive(Debug, Default)]
struct CliArgs {
    parameter: Option<String>,
    x_axis: Option<String>,
    y_axis: Option<String>,
    show_grid: bool,
    plot_mode: bool,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    dump_samples: bool,
    term: Option<String>,
}

fn main() {
    let _ = fnplot::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = build_config(&args)?;
    config.validate().map_err(|err| err.to_string())?;

    let scene = match &args.output_path {
        Some(path) => render_png(&config, path)?,
        None => {
            let mut plotter = Plotter::new(NullRenderer::default());
            plotter.render(&config).map_err(|err| err.to_string())?
        }
    };

    if args.dump_samples {
        let json = serde_json::to_string_pretty(&scene.curve)
            .map_err(|err| format!("failed to serialize samples: {err}"))?;
        println!("{json}");
    } else if args.output_path.is_none() {
        println!(
            "f({}) = {}: {} samples, {} x ticks, {} y ticks, {} lines, {} labels",
            config.parameter,
            config.expression,
            scene.curve.samples.len(),
            scene.x_ticks.len(),
            scene.y_ticks.len(),
            scene.frame.line_count(),
            scene.frame.text_count(),
        );
    }
    Ok(())
}

fn build_config(args: &CliArgs) -> Result<PlotConfig, String> {
    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            PlotConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => {
            let term = args
                .term
                .clone()
                .ok_or_else(|| format!("missing function TERM\n\n{}", usage_message()))?;
            PlotConfig::new(term)
        }
    };

    if let Some(term) = &args.term {
        config.expression = term.clone();
    }
    if let Some(parameter) = &args.parameter {
        config.parameter = parameter.clone();
    }
    if let Some(raw) = &args.x_axis {
        config.x_axis = raw.parse::<AxisRange>().map_err(|err| err.to_string())?;
    }
    if let Some(raw) = &args.y_axis {
        config.y_axis = raw.parse::<AxisRange>().map_err(|err| err.to_string())?;
    }
    if args.show_grid {
        config.show_grid = true;
    }
    if args.plot_mode {
        config.curve_mode = CurveMode::Points;
    }
    Ok(config)
}

#[cfg(feature = "cairo-backend")]
fn render_png(config: &PlotConfig, path: &std::path::Path) -> Result<PlotScene, String> {
    use fnplot::render::CairoRenderer;

    let renderer = CairoRenderer::new(config.canvas).map_err(|err| err.to_string())?;
    let mut plotter = Plotter::new(renderer);
    let scene = plotter.render(config).map_err(|err| err.to_string())?;

    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create png `{}`: {err}", path.display()))?;
    plotter
        .renderer()
        .write_png(&mut file)
        .map_err(|err| err.to_string())?;
    println!("wrote {}", path.display());
    Ok(scene)
}

#[cfg(not(feature = "cairo-backend"))]
fn render_png(_config: &PlotConfig, _path: &std::path::Path) -> Result<PlotScene, String> {
    Err("--output requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut positional_only = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if positional_only || !arg.starts_with('-') || arg == "-" {
            if parsed.term.replace(arg).is_some() {
                return Err(format!("only one TERM may be given\n\n{}", usage_message()));
            }
            continue;
        }

        match arg.as_str() {
            "-p" | "--parameter" => parsed.parameter = Some(next_value(&mut args, &arg)?),
            "-x" | "--x-axis" => parsed.x_axis = Some(next_value(&mut args, &arg)?),
            "-y" | "--y-axis" => parsed.y_axis = Some(next_value(&mut args, &arg)?),
            "-g" | "--grid" => parsed.show_grid = true,
            "--plot" => parsed.plot_mode = true,
            "--config" => parsed.config_path = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "-o" | "--output" => {
                parsed.output_path = Some(PathBuf::from(next_value(&mut args, &arg)?));
            }
            "--dump-samples" => parsed.dump_samples = true,
            "--" => positional_only = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(parsed)
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn usage_message() -> String {
    format!(
        "{SHORT_DESCRIPTION}\n\nUsage: fnplot [options] [--] TERM\n\nTERM is everything after `f(x)=`.\n\nOptions:\n  -p, --parameter <name>   Name of the parameter (default: x)\n  -x, --x-axis <triple>    Visible x range and label step as (low,high,step) (default: (-1,1,0.2))\n  -y, --y-axis <triple>    Visible y range and label step as (low,high,step) (default: (-1,1,0.2))\n  -g, --grid               Display a grid in gray\n      --plot               Plot the samples without connecting them\n      --config <path>      Load a JSON plot config; other options override it\n  -o, --output <path>      Write a PNG (requires feature `cairo-backend`)\n      --dump-samples       Print the curve samples as JSON\n  -h, --help               Show this message\n\nAll math constants and functions (pi, e, sin, sqrt, ...) are available\nwithout prefix in TERM and in the axis triples."
    )
}
