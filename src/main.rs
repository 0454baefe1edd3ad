//! bkbin2wav command line tool

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use bkbin2wav::{encode_bin, parse_address, BinImage, EncodeOptions, LengthMode, TapeSpeed};

const PROJECT_URI: &str = "https://github.com/raydac/bkbin2wav";
const AUTHOR: &str = "Igor Maznitsa (https://www.igormaznitsa.com)";

#[derive(Parser, Debug)]
#[command(name = "bkbin2wav", version)]
#[command(about = "Convert BK-0010(01) .BIN snapshots into WAV files for the real tape reader")]
#[command(after_help = "Examples:\n  \
    bkbin2wav -i someBkFile.BIN\n  \
    bkbin2wav -i someBkFile.BIN -o wavFile.wav\n  \
    bkbin2wav -t -i someBkFile.BIN\n  \
    bkbin2wav -t -i someBkFile.BIN -o wavFile.wav")]
struct Args {
    /// Source BIN file
    #[arg(short, long)]
    input: PathBuf,

    /// Target WAV file (default: upper-cased input name with .wav next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name for the TAP header (at most 16 chars, default: upper-cased input name)
    #[arg(short, long)]
    name: Option<String>,

    /// Start address written to the TAP header (decimal, 0x hex or 0o octal)
    #[arg(short, long, value_parser = parse_start)]
    start: Option<u16>,

    /// Use physical file size instead of the BIN header value
    #[arg(short = 'f', long = "file-size")]
    file_size: bool,

    /// Amplify the audio signal
    #[arg(short, long)]
    amplify: bool,

    /// Turn on the "turbo" mode
    #[arg(short, long)]
    turbo: bool,

    /// Log encoder details
    #[arg(short, long)]
    verbose: bool,
}

fn parse_start(text: &str) -> std::result::Result<u16, String> {
    parse_address(text).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();
}

fn print_banner() {
    println!();
    println!("  BKBIN2WAV converts .BIN snapshots of BK-0010(01) emulators into WAV files");
    println!("  compatible with the real BK-0010 TAP reader.");
    println!("  Project page : {PROJECT_URI}");
    println!("        Author : {AUTHOR}");
    println!("       Version : {}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

/// Upper-cased file name without its extension
fn file_stem_upper(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// `<input dir>/<STEM>.wav`
fn default_output(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{}.wav", file_stem_upper(input)))
}

/// Tape name derived from the input file: first 16 chars of the stem.
fn default_name(input: &Path) -> String {
    let stem: String = file_stem_upper(input)
        .chars()
        .take(bkbin2wav::TAPE_NAME_LEN)
        .collect();
    bkbin2wav::charset::sanitize_name(&stem)
}

/// Encoder options from the command line, checked before the input is read.
fn encode_options(args: &Args) -> Result<EncodeOptions> {
    let name = args.name.clone().unwrap_or_else(|| default_name(&args.input));
    let mut options = EncodeOptions::default()
        .speed(TapeSpeed::from_turbo(args.turbo))
        .amplify(args.amplify)
        .name(name);
    options.start_address = args.start;
    options.validate()?;
    Ok(options)
}

fn run(args: Args) -> Result<()> {
    let options = encode_options(&args)?;

    if args.input.is_dir() {
        bail!("Input file must not be folder : {}", args.input.display());
    }
    if !args.input.exists() {
        bail!("File doesn't exist : {}", args.input.display());
    }

    let mode = LengthMode::from_file_size_flag(args.file_size);
    let image = BinImage::load(&args.input, mode)
        .with_context(|| format!("can't read BIN file {}", args.input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));
    let start = options.start_address.unwrap_or(image.start_address);

    if args.file_size {
        println!(
            "Detected flag to enforce physical file size (size defined inside of .BIN is {} byte(s), real size is {} byte(s))",
            image.declared_length,
            image.payload.len()
        );
    } else if !image.length_matches() {
        println!(
            "Warning! Detected different size defined in BIN header, use -f to use file size instead of header size ({} != {})",
            image.declared_length, image.physical_length
        );
    }

    if start != image.start_address {
        println!(
            "Warning! The Start address has been changed from {0}(&O{0:o}) to {1}(&O{1:o})",
            image.start_address, start
        );
    }

    println!("   Input file : {}", args.input.display());
    println!("  Output file : {}", output.display());
    println!("     TAP Name : {}", options.name);
    println!("Start address : {start} (&O{start:o})");
    println!("   Turbo mode : {}", on_off(args.turbo));
    println!("    Amplifier : {}", on_off(args.amplify));
    println!();
    println!("   Values from BIN file header:");
    println!(
        "        Start  : {0} (&O{0:o})",
        image.start_address
    );
    println!(
        "        Length : {0} (&O{0:o})",
        image.declared_length
    );

    let audio = encode_bin(&image, &options)?;
    audio
        .save(&output)
        .with_context(|| format!("can't write WAV file {}", output.display()))?;

    println!(
        "WAV file has been created successfully as '{}', checksum is #{:X}",
        output.display(),
        audio.checksum
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    print_banner();
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_next_to_input() {
        let out = default_output(Path::new("games/klad.bin"));
        assert_eq!(out, Path::new("games").join("KLAD.wav"));

        let out = default_output(Path::new("tetris.BIN"));
        assert_eq!(out, PathBuf::from("TETRIS.wav"));
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name(Path::new("dir/klad.bin")), "KLAD");
        assert_eq!(
            default_name(Path::new("a_very_long_file_name.bin")),
            "A_VERY_LONG_FILE"
        );
        assert_eq!(default_name(Path::new("tab\there.bin")), "TAB.HERE");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "bkbin2wav", "-i", "GAME.BIN", "-s", "0o1000", "-f", "-a", "-t", "-n", "GAME",
        ])
        .unwrap();
        assert_eq!(args.input, PathBuf::from("GAME.BIN"));
        assert_eq!(args.start, Some(512));
        assert!(args.file_size && args.amplify && args.turbo);
        assert_eq!(args.name.as_deref(), Some("GAME"));
        assert_eq!(args.output, None);

        assert!(Args::try_parse_from(["bkbin2wav", "-i", "X.BIN", "-s", "70000"]).is_err());
        assert!(Args::try_parse_from(["bkbin2wav"]).is_err());
    }

    #[test]
    fn test_long_name_rejected_before_reading_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("MISSING.BIN");
        let args = Args::try_parse_from([
            "bkbin2wav",
            "-i",
            missing.to_str().unwrap(),
            "-n",
            "SEVENTEEN CHARS!!",
        ])
        .unwrap();

        let err = run(args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<bkbin2wav::TapeError>(),
            Some(bkbin2wav::TapeError::NameTooLong { chars: 17, .. })
        ));
        assert!(!missing.exists());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_length_mismatch_is_not_logged_as_warning() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        // header says 1 byte, 3 follow; the CLI prints its own report line for this
        let data = [0x00, 0x10, 0x01, 0x00, 0x01, 0x02, 0x03];
        tracing::subscriber::with_default(subscriber, || {
            let image = BinImage::from_bytes(&data, LengthMode::Declared).unwrap();
            assert!(!image.length_matches());
            tracing::warn!("capture check");
        });

        let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("capture check"));
        assert!(!text.contains("differs from the file size"), "{text}");
    }

    #[test]
    fn test_encode_options_from_args() {
        let args = Args::try_parse_from(["bkbin2wav", "-i", "dir/klad.bin", "-t", "-a"]).unwrap();
        let options = encode_options(&args).unwrap();
        assert_eq!(options.name, "KLAD");
        assert_eq!(options.speed, TapeSpeed::Turbo);
        assert!(options.amplify);
        assert_eq!(options.start_address, None);

        let args = Args::try_parse_from(["bkbin2wav", "-i", "x.bin", "-s", "0x200"]).unwrap();
        assert_eq!(encode_options(&args).unwrap().start_address, Some(0x200));
    }
}
