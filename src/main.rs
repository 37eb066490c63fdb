use clap::{Parser, Subcommand};
use qrcnv::{
    EcLevel, Format, Geometry, ModuleMatrix, RenderOptions, SymbolSet, encode_set_to_file,
    encode_to_file,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a module matrix text file as an image
    Encode {
        /// Input matrix file: one line per row, `#`, `1`, or `*` for dark
        /// modules; blank lines separate structured-append symbols
        #[arg(short, long)]
        input: PathBuf,

        /// Output image file
        #[arg(short, long)]
        output: PathBuf,

        /// Output format (png, tiff, svg, gif); inferred from the output
        /// extension when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Separator (quiet zone) width in modules
        #[arg(short, long, default_value = "4")]
        separator: u32,

        /// Pixels per module
        #[arg(short, long, default_value = "1")]
        magnify: u32,

        /// Grid order: 0 near-square, >0 fixed columns, <0 fixed rows
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        order: i32,

        /// GIF animation delay in centiseconds
        #[arg(short, long, default_value = "100")]
        delay: u32,

        /// Error correction level of the input symbols (L, M, Q, H)
        #[arg(short, long, default_value = "M")]
        ecl: String,
    },

    /// Display layout information for a matrix file without encoding it
    Info {
        /// Input matrix file
        #[arg(short, long)]
        input: PathBuf,

        /// Separator (quiet zone) width in modules
        #[arg(short, long, default_value = "4")]
        separator: u32,

        /// Pixels per module
        #[arg(short, long, default_value = "1")]
        magnify: u32,

        /// Grid order: 0 near-square, >0 fixed columns, <0 fixed rows
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        order: i32,
    },

    /// List the supported output formats
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            format,
            separator,
            magnify,
            order,
            delay,
            ecl,
        } => encode_command(input, output, format, separator, magnify, order, delay, &ecl)?,
        Commands::Info {
            input,
            separator,
            magnify,
            order,
        } => info_command(input, separator, magnify, order)?,
        Commands::Formats => formats_command(),
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn encode_command(
    input: PathBuf,
    output: PathBuf,
    format: Option<String>,
    separator: u32,
    magnify: u32,
    order: i32,
    delay: u32,
    ecl: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = match format {
        Some(name) => name.parse::<Format>()?,
        None => {
            let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
            Format::from_extension(ext)?
        }
    };

    let options = RenderOptions {
        separator,
        magnify,
        order,
        delay,
    };

    let text = std::fs::read_to_string(&input)?;
    let mut symbols = parse_matrices(&text, ecl.parse()?)?;

    let encoded = if symbols.len() == 1 {
        encode_to_file(&symbols.remove(0), format, &options, &output)?
    } else {
        let mut set = SymbolSet::new(symbols.len())?;
        for symbol in symbols {
            set.append(symbol)?;
        }
        set.finalize()?;
        encode_set_to_file(&set, format, &options, &output)?
    };

    println!(
        "Encoded {} as {}: {} ({} bytes)",
        input.display(),
        format.mime_type(),
        output.display(),
        encoded.len()
    );

    Ok(())
}

fn info_command(
    input: PathBuf,
    separator: u32,
    magnify: u32,
    order: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&input)?;
    let symbols = parse_matrices(&text, EcLevel::M)?;

    let options = RenderOptions {
        separator,
        magnify,
        order,
        ..Default::default()
    };
    let first = &symbols[0];
    let geo = Geometry::grid(first.dim(), symbols.len(), &options)?;

    println!("Matrix file: {}", input.display());
    println!("Symbols: {}", symbols.len());
    println!("Dimension: {}x{} modules (version {})", first.dim(), first.dim(), first.version());
    if symbols.len() > 1 {
        println!("Grid: {} columns x {} rows", geo.cols, geo.rows);
    }
    println!("Image size: {}x{} pixels", geo.xdim, geo.ydim);

    Ok(())
}

fn formats_command() {
    println!("{:<6} {:<14} extension", "name", "mime type");
    for format in [Format::Png, Format::Tiff, Format::Svg, Format::Gif] {
        println!("{:<6} {:<14} .{}", format, format.mime_type(), format.extension());
    }
}

/// Splits the input into blank-line-separated blocks and parses each as a
/// module matrix.
fn parse_matrices(text: &str, ecl: EcLevel) -> Result<Vec<ModuleMatrix>, qrcnv::Error> {
    let mut blocks: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    if blocks.is_empty() {
        return Err(qrcnv::Error::InvalidParameter("input contains no matrix rows"));
    }

    blocks
        .iter()
        .map(|block| ModuleMatrix::parse_text(block, ecl))
        .collect()
}
