use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use devreflow::export::ExportFormat;
use devreflow::layout::cluster_lines;
use devreflow::ocr::{load_detections, DetectionSource, OcrBridge};
use devreflow::pipeline::export_document;
use devreflow::{logging, Detection, ReflowConfig, ScriptMode, TextReconstructor};

#[derive(Parser, Debug)]
#[command(name = "devreflow")]
#[command(version, about = "Rebuild paragraph-structured Devanagari text from OCR word detections", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ReflowArgs {
    /// TOML file with reconstruction tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cleaning profile (overrides the config file)
    #[arg(short, long, value_enum)]
    mode: Option<ScriptMode>,

    /// Output directory; without it the text is printed to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format(s) to write into the output directory
    #[arg(short, long, value_enum, default_values_t = vec![ExportFormat::Text])]
    format: Vec<ExportFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconstruct text from a JSON file of normalized detections
    Reconstruct {
        /// Detections file (JSON array of {text, bbox, confidence})
        input: PathBuf,

        #[command(flatten)]
        reflow: ReflowArgs,
    },

    /// Run the OCR bridge script on an image, then reconstruct
    Ocr {
        /// Input image (PNG/JPEG)
        image: PathBuf,

        /// Bridge script printing EasyOCR results as JSON
        #[arg(long, default_value = "ocr/bridge/easyocr_bridge.py")]
        script: PathBuf,

        /// Python interpreter used to run the bridge script
        #[arg(long, default_value = "python3")]
        python: PathBuf,

        /// Comma-separated OCR languages
        #[arg(long, default_value = "hi,en")]
        lang: String,

        #[command(flatten)]
        reflow: ReflowArgs,
    },

    /// Print the clustered lines of a detections file
    Inspect {
        input: PathBuf,

        /// Max vertical-center delta for joining a line
        #[arg(long, default_value_t = 0.03)]
        line_y_threshold: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Reconstruct { input, reflow } => {
            let detections = load_detections(&input)?;
            run_reflow(&detections, &input, &reflow)
        }
        Commands::Ocr {
            image,
            script,
            python,
            lang,
            reflow,
        } => {
            if !image.is_file() {
                anyhow::bail!("Input image does not exist: {}", image.display());
            }
            let bridge = OcrBridge::new(script)
                .with_python(python)
                .with_lang(lang);
            let detections = bridge
                .detect(&image)
                .with_context(|| format!("OCR failed for {}", image.display()))?;
            run_reflow(&detections, &image, &reflow)
        }
        Commands::Inspect {
            input,
            line_y_threshold,
        } => inspect(&input, line_y_threshold),
    }
}

fn load_config(args: &ReflowArgs) -> Result<ReflowConfig> {
    let mut config = match &args.config {
        Some(path) => ReflowConfig::from_toml_file(path)?,
        None => ReflowConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.script_mode = mode;
    }
    Ok(config)
}

fn run_reflow(detections: &[Detection], source: &Path, args: &ReflowArgs) -> Result<()> {
    let config = load_config(args)?;
    let reconstructor = TextReconstructor::new(config)?;

    let document = match reconstructor.build_document(detections, Some(source.display().to_string())) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("[!] Reconstruction failed: {err}");
            eprintln!("[!] Raw detections follow:\n");
            println!("{}", Detection::raw_text_fallback(detections));
            return Err(err.into());
        }
    };

    match &args.output {
        Some(dir) => {
            let written = export_document(&document, dir, &args.format)
                .with_context(|| format!("Failed to export to: {}", dir.display()))?;
            for path in written {
                println!("[✓] {}", path.display());
            }
        }
        None => println!("{}", document.text()),
    }
    Ok(())
}

fn inspect(input: &Path, line_y_threshold: f32) -> Result<()> {
    let detections = load_detections(input)?;
    TextReconstructor::validate(&detections)?;
    let lines = cluster_lines(&detections, line_y_threshold);

    println!("Detections: {}", detections.len());
    println!("Lines: {}", lines.len());
    for (idx, line) in lines.iter().enumerate() {
        let Some(bbox) = line.bbox() else { continue };
        let words = line
            .members
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        println!(
            "[{idx:03}] y={:.4}..{:.4} x0={:.4} h={:.4} :: {words}",
            bbox.y0,
            bbox.y1,
            bbox.x0,
            bbox.height()
        );
    }
    Ok(())
}
