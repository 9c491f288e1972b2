use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;

use qrpix::{Backend, Canvas, Color, QrCode};
use qrpix::{Raster, RasterFormat, RasterOptions};
use qrpix::{Svg, SvgOptions, SvgStyle};
use qrpix::{Text, TextOptions};

#[derive(Parser)]
#[command(name = "qrpix_cli")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Render QR code module matrices from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten_help = true)]
    Render {
        #[arg(
            help = "Input file or stdin if unspecified",
            long_help = "Input file or stdin if unspecified. The input is a square grid of modules, one \
            line per row, where '#', '1', 'X', 'x' or '█' is a dark module and '.', '0', '_' or ' ' is a light one."
        )]
        file: Option<PathBuf>,
        #[arg(
            short,
            long,
            help = "Output file or stdout if unspecified",
            long_help = "Output file or stdout if unspecified. The output format is determined based on the extension. \
            Supported extensions are:\n\
            * text: .txt\n\
            * images: .png, .jpg, .jpeg\n\
            * vector: .svg"
        )]
        output: Option<PathBuf>,
        #[arg(
            long,
            allow_hyphen_values = true,
            help = "Pixels per module [default: 1 for text, 10 otherwise]"
        )]
        box_size: Option<String>,
        #[arg(
            long,
            allow_hyphen_values = true,
            default_value = "2",
            help = "Quiet zone width in modules"
        )]
        border: String,
        #[arg(long, default_value = "black", help = "Color of dark modules (images only)")]
        fill_color: String,
        #[arg(long, default_value = "white", help = "Color of light modules (images only)")]
        back_color: String,
        #[arg(long, help = "Trace all the modules in a single SVG path")]
        svg_path: bool,
        #[arg(long, help = "Swap light and dark patterns (text only)")]
        inverted: bool,
    },
}

enum Output {
    Stdout,
    Text(PathBuf),
    Raster(PathBuf, RasterFormat),
    Svg(PathBuf),
}

impl Output {
    fn is_text(&self) -> bool {
        matches!(self, Output::Stdout | Output::Text(_))
    }
}

fn determine_output_kind(path: Option<PathBuf>) -> Result<Output> {
    let Some(path) = path else {
        return Ok(Output::Stdout);
    };
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt") => Ok(Output::Text(path)),
        Some("png") => Ok(Output::Raster(path, RasterFormat::Png)),
        Some("jpg" | "jpeg") => Ok(Output::Raster(path, RasterFormat::Jpeg)),
        Some("svg") => Ok(Output::Svg(path)),
        Some(invalid) => Err(anyhow::Error::msg(format!(
            "invalid output extension '{}'",
            invalid
        ))),
        None => Err(anyhow::Error::msg("requested output has no extension")),
    }
}

/// Draw `canvas` with backend `B` and save it into `output`.
fn render<B, W>(qrcode: &QrCode, canvas: &Canvas, options: B::Options, output: W) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync,
    W: Write,
{
    let image = qrcode.make_image::<B>(canvas, options)?;
    let mut writer = BufWriter::new(output);
    image.save(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("cannot create '{}'", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            file,
            output,
            box_size,
            border,
            fill_color,
            back_color,
            svg_path,
            inverted,
        } => {
            // Before doing anything, make sure the requested output and configuration are valid.
            let output = determine_output_kind(output)?;
            let box_size = match box_size {
                Some(size) => size,
                None if output.is_text() => "1".to_string(),
                None => QrCode::DEFAULT_BOX_SIZE.to_string(),
            };
            let qrcode = QrCode::new(box_size, border)?;
            let fill_color: Color = fill_color.parse()?;
            let back_color: Color = back_color.parse()?;
            // Read the input grid.
            let mut text = String::new();
            match file {
                Some(path) => {
                    File::open(&path)
                        .with_context(|| format!("cannot open '{}'", path.display()))?
                        .read_to_string(&mut text)?;
                }
                None => {
                    std::io::stdin().read_to_string(&mut text)?;
                }
            };
            let canvas: Canvas = text.parse()?;
            log::info!(
                "rendering {}x{} modules with box size {} and border {}",
                canvas.size(),
                canvas.size(),
                qrcode.box_size(),
                qrcode.border()
            );
            let text_options = if inverted {
                TextOptions::new().inverted()
            } else {
                TextOptions::new()
            };
            match output {
                Output::Stdout => {
                    render::<Text, _>(&qrcode, &canvas, text_options, std::io::stdout().lock())?
                }
                Output::Text(path) => {
                    render::<Text, _>(&qrcode, &canvas, text_options, create(&path)?)?
                }
                Output::Raster(path, format) => {
                    let options = RasterOptions::default()
                        .with_fill_color(fill_color)
                        .with_back_color(back_color)
                        .with_format(format);
                    render::<Raster, _>(&qrcode, &canvas, options, create(&path)?)?
                }
                Output::Svg(path) => {
                    let style = if svg_path {
                        SvgStyle::Path
                    } else {
                        SvgStyle::Rects
                    };
                    let options = SvgOptions::default()
                        .with_fill_color(fill_color)
                        .with_back_color(Some(back_color).filter(|color| color.a > 0))
                        .with_style(style);
                    render::<Svg, _>(&qrcode, &canvas, options, create(&path)?)?
                }
            }
        }
    }
    Ok(())
}
