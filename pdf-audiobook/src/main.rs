//! pdf-audio - Convert PDF page ranges to narrated audio using text-to-speech

mod audio;
mod config;
mod error;
mod pdf;
mod pipeline;
mod pricing;
mod text;
mod tts;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::PdfAudioConfig;
use indicatif::{ProgressBar, ProgressStyle};
use pdf::{Document, LopdfBackend};
use pipeline::{ConversionRequest, Pipeline, Scratch};
use std::path::{Path, PathBuf};
use tts::TtsOptions;
use tts_client::{AudioFormat, SpeechRequest, Voice};

/// Text read aloud by `pdf-audio samples`.
const SAMPLE_TEXT: &str = "The lighthouse keeper counted the ships each evening, \
                           and every night the sea returned a different number.";

#[derive(Parser, Debug)]
#[command(name = "pdf-audio")]
#[command(about = "Convert PDF page ranges to narrated audio using text-to-speech", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a page range to one audio file
    Convert {
        /// Path to the PDF file
        pdf: PathBuf,

        /// First page to read (0-based, inclusive)
        #[arg(long)]
        from: usize,

        /// Last page to read (0-based, inclusive)
        #[arg(long)]
        to: usize,

        /// Directory for the audio file (default: config output_dir or .)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Output file name without extension (default: <pdf-name>_p<from>-<to>)
        #[arg(short, long)]
        name: Option<String>,

        /// Narrator voice (alloy, echo, fable, onyx, nova, shimmer)
        #[arg(long)]
        voice: Option<Voice>,

        /// Audio encoding (mp3, pcm)
        #[arg(long)]
        format: Option<AudioFormat>,

        /// Maximum characters per synthesis request
        #[arg(long)]
        max_chars: Option<usize>,

        /// Keep intermediate files in this directory instead of a temporary one
        #[arg(long)]
        scratch: Option<PathBuf>,
    },
    /// Estimate what converting a page range would cost
    Estimate {
        /// Path to the PDF file
        pdf: PathBuf,

        /// First page to read (0-based, inclusive)
        #[arg(long)]
        from: usize,

        /// Last page to read (0-based, inclusive)
        #[arg(long)]
        to: usize,

        /// Maximum characters per synthesis request
        #[arg(long)]
        max_chars: Option<usize>,

        /// Keep intermediate files in this directory instead of a temporary one
        #[arg(long)]
        scratch: Option<PathBuf>,
    },
    /// Synthesize a short sample for every voice
    Samples {
        /// Directory for the samples
        #[arg(short, long, default_value = "samples")]
        out_dir: PathBuf,

        /// Text to read instead of the built-in sentence
        #[arg(long)]
        text: Option<String>,
    },
    /// Show the page count of a PDF
    Info {
        /// Path to the PDF file
        pdf: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default voice
    SetVoice {
        /// alloy, echo, fable, onyx, nova or shimmer
        voice: Voice,
    },
    /// Set default audio encoding
    SetFormat {
        /// mp3 or pcm
        format: AudioFormat,
    },
    /// Set the speech model
    SetModel {
        /// Model identifier (e.g., tts-1, tts-1-hd)
        model: String,
    },
    /// Set maximum characters per synthesis request
    SetMaxChars {
        /// Value (at least 1)
        value: usize,
    },
    /// Set default output directory
    SetOutputDir {
        /// Directory path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match args.command {
        Commands::Convert {
            pdf,
            from,
            to,
            out_dir,
            name,
            voice,
            format,
            max_chars,
            scratch,
        } => {
            let config = PdfAudioConfig::load().context("Failed to load configuration")?;
            let out_dir = out_dir
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let request = ConversionRequest {
                output_name: name.unwrap_or_else(|| default_output_name(&pdf, from, to)),
                source: pdf,
                destination_dir: out_dir,
                from_page: from,
                to_page: to,
                options: TtsOptions::new()
                    .with_voice(voice.unwrap_or(config.voice))
                    .with_format(format.unwrap_or(config.format)),
            };
            run_convert(&config, request, max_chars, scratch).await
        }
        Commands::Estimate {
            pdf,
            from,
            to,
            max_chars,
            scratch,
        } => {
            let config = PdfAudioConfig::load().context("Failed to load configuration")?;
            run_estimate(&config, &pdf, from, to, max_chars, scratch)
        }
        Commands::Samples { out_dir, text } => {
            let config = PdfAudioConfig::load().context("Failed to load configuration")?;
            run_samples(&config, &out_dir, text.as_deref().unwrap_or(SAMPLE_TEXT)).await
        }
        Commands::Info { pdf } => {
            let document = Document::open(&LopdfBackend, &pdf)?;
            match document.last_page_index() {
                Some(last) => println!(
                    "{}: {} pages (0-{})",
                    pdf.display(),
                    document.page_count,
                    last
                ),
                None => println!("{}: no pages", pdf.display()),
            }
            Ok(())
        }
        Commands::Config { action } => handle_config_command(&action),
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Default output name: `<pdf-stem>_p<from>-<to>`.
fn default_output_name(pdf: &Path, from: usize, to: usize) -> String {
    let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}_p{}-{}", stem, from, to)
}

fn make_scratch(dir: Option<PathBuf>) -> Result<Scratch> {
    let scratch = match dir {
        Some(dir) => Scratch::at(dir)?,
        None => Scratch::temporary()?,
    };
    log::debug!("Scratch directory: {}", scratch.path().display());
    Ok(scratch)
}

fn build_pipeline<'a>(
    backend: &'a LopdfBackend,
    config: &PdfAudioConfig,
    max_chars: Option<usize>,
) -> Pipeline<'a> {
    Pipeline::new(backend)
        .with_max_chars(max_chars.unwrap_or(config.max_chars))
        .with_cents_per_million(config.price_per_million_cents)
}

async fn run_convert(
    config: &PdfAudioConfig,
    request: ConversionRequest,
    max_chars: Option<usize>,
    scratch: Option<PathBuf>,
) -> Result<()> {
    pipeline::ensure_destination(&request.destination_dir)?;

    let provider = tts_client::create_provider(&config.provider)
        .context("Failed to create speech provider")?;
    let backend = LopdfBackend;
    let pipeline = build_pipeline(&backend, config, max_chars);
    let scratch = make_scratch(scratch)?;

    eprintln!(
        "Converting pages {}-{} of {} with voice {}",
        request.from_page,
        request.to_page,
        request.source.display(),
        request.options.voice
    );
    log::debug!("Maximum chunk size: {} chars", pipeline.max_chars());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let result = pipeline
        .convert(provider.as_ref(), &request, &scratch, |completed, total| {
            pb.set_length(total as u64);
            pb.set_position(completed as u64);
        })
        .await;

    let result = match result {
        Ok(result) => {
            pb.finish_with_message("Synthesis complete!");
            result
        }
        Err(e) => {
            pb.abandon();
            return Err(e).context("Conversion failed");
        }
    };

    let size_mb = result.bytes as f64 / (1024.0 * 1024.0);
    eprintln!(
        "Pages {}-{} ({} pages) narrated by {}: {} chunks, {} characters",
        result.from_page,
        result.to_page,
        result.pages,
        result.voice,
        result.chunk_count,
        result.characters
    );
    eprintln!("Output: {} ({:.1} MB)", result.output_path.display(), size_mb);

    Ok(())
}

fn run_estimate(
    config: &PdfAudioConfig,
    pdf: &Path,
    from: usize,
    to: usize,
    max_chars: Option<usize>,
    scratch: Option<PathBuf>,
) -> Result<()> {
    let backend = LopdfBackend;
    let pipeline = build_pipeline(&backend, config, max_chars);
    let scratch = make_scratch(scratch)?;

    let estimate = pipeline
        .estimate(pdf, from, to, &scratch)
        .context("Estimation failed")?;

    println!("Number of characters: {}", estimate.characters);
    println!("Price estimate: {}", pricing::format_dollars(estimate.cents));

    Ok(())
}

async fn run_samples(config: &PdfAudioConfig, out_dir: &Path, text: &str) -> Result<()> {
    let provider = tts_client::create_provider(&config.provider)
        .context("Failed to create speech provider")?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for voice in Voice::ALL {
        let path = out_dir.join(format!("{}.{}", voice, config.format.extension()));
        let request = SpeechRequest::new(text, voice, config.format);
        let audio = provider
            .synthesize(&request)
            .await
            .with_context(|| format!("Failed to synthesize sample for {}", voice))?;
        std::fs::write(&path, audio)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Sample saved to {}", path.display());
    }

    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = PdfAudioConfig::load()?;
            println!("Configuration file: {:?}", PdfAudioConfig::config_path()?);
            println!();
            println!("voice = \"{}\"", config.voice);
            println!("format = \"{}\"", config.format);
            println!("max_chars = {}", config.max_chars);
            println!(
                "price_per_million_cents = {}",
                config.price_per_million_cents
            );
            if let Some(dir) = &config.output_dir {
                println!("output_dir = \"{}\"", dir.display());
            } else {
                println!("output_dir = (current directory)");
            }
            println!("model = \"{}\"", config.provider.model);
            println!("base_url = \"{}\"", config.provider.base_url);
            println!(
                "api_key = {}",
                if config.provider.api_key.is_some() {
                    "(set)"
                } else {
                    "(from OPENAI_API_KEY)"
                }
            );
        }
        ConfigAction::SetVoice { voice } => {
            let mut config = PdfAudioConfig::load()?;
            config.voice = *voice;
            config.save()?;
            println!("Default voice set to: {}", voice);
        }
        ConfigAction::SetFormat { format } => {
            let mut config = PdfAudioConfig::load()?;
            config.format = *format;
            config.save()?;
            println!("Default format set to: {}", format);
        }
        ConfigAction::SetModel { model } => {
            let mut config = PdfAudioConfig::load()?;
            config.provider.model = model.clone();
            config.save()?;
            println!("Speech model set to: {}", model);
        }
        ConfigAction::SetMaxChars { value } => {
            let mut config = PdfAudioConfig::load()?;
            config.max_chars = (*value).max(1);
            config.save()?;
            println!("Maximum chunk size set to: {}", config.max_chars);
        }
        ConfigAction::SetOutputDir { path } => {
            let mut config = PdfAudioConfig::load()?;
            config.output_dir = Some(path.clone());
            config.save()?;
            println!("Default output directory set to: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output_name(Path::new("/books/Rust Book.pdf"), 2, 4),
            "Rust Book_p2-4"
        );
    }

    #[test]
    fn test_cli_parses_convert() {
        let args = Args::try_parse_from([
            "pdf-audio", "convert", "book.pdf", "--from", "2", "--to", "4", "--voice", "nova",
        ])
        .unwrap();
        match args.command {
            Commands::Convert {
                from, to, voice, ..
            } => {
                assert_eq!((from, to), (2, 4));
                assert_eq!(voice, Some(Voice::Nova));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_voice() {
        let result = Args::try_parse_from([
            "pdf-audio", "convert", "book.pdf", "--from", "0", "--to", "0", "--voice", "robot",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_negative_page() {
        let result = Args::try_parse_from([
            "pdf-audio", "estimate", "book.pdf", "--from", "-1", "--to", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
