use std::io::Cursor;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tilepack::decode::image::PixelBuffer;
use tilepack::{Atlas, PackConfig, Tilepacker};

/// Pack the marker-encoded tiles of a sheet into a 512x512 atlas.
///
/// Writes <EXPORT_STEM>.png and <EXPORT_STEM>.json. Set PADDING to keep that
/// many empty pixels around every tile.
#[derive(Parser)]
#[command(name = "tilepack", version)]
struct Args {
    /// Encoded sheet image
    input: String,

    /// Output path without extension
    export_stem: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn load_sheet(path: &str) -> Result<PixelBuffer> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {path}"))?
        .into_rgba8();

    let width = img.width();
    let height = img.height();
    let bytes = img.into_raw();

    PixelBuffer::from_rgba8(width, height, &bytes)
        .with_context(|| format!("failed to read pixels of {path}"))
}

fn encode_png(img: &PixelBuffer) -> Result<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(img.width, img.height, img.to_rgba8())
        .context("atlas buffer does not match its dimensions")?;
    let mut out = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encoding atlas PNG")?;
    Ok(out)
}

fn encode_json(atlas: &Atlas) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(&atlas.index).context("serializing frame index")?;
    json.push('\n');
    Ok(json)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = PackConfig::from_env()?;
    let sheet = load_sheet(&args.input)?;
    info!(
        "packing {} ({}x{}, padding {})",
        args.input, sheet.width, sheet.height, config.padding
    );

    let atlas = Tilepacker::new(config)
        .pack(&sheet)
        .with_context(|| format!("failed to pack {}", args.input))?;

    // Render both outputs before touching the filesystem.
    let png = encode_png(&atlas.image)?;
    let json = encode_json(&atlas)?;

    let png_path = format!("{}.png", args.export_stem);
    let json_path = format!("{}.json", args.export_stem);
    std::fs::write(&png_path, png).with_context(|| format!("writing {png_path}"))?;
    std::fs::write(&json_path, json).with_context(|| format!("writing {json_path}"))?;

    info!(
        "wrote {} frames to {png_path} and {json_path}",
        atlas.index.frames.len()
    );
    Ok(())
}
