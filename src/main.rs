use clap::Parser;
use quire::{Controller, FormatError, FormatSettings, PagePrinter, format_document};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Format a marked-up text file into filled, justified pages.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file, or `-` for standard input
    input: PathBuf,

    /// Output file (standard output if omitted)
    output: Option<PathBuf>,

    /// Initial width of body lines, including indentation
    #[arg(long)]
    textwidth: Option<i32>,

    /// Initial number of lines per body page
    #[arg(long)]
    textheight: Option<i32>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.debug { "quire=debug" } else { "quire=info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Format the input and return how many recoverable errors were reported.
fn run(args: &Args) -> Result<usize, FormatError> {
    let input = read_input(&args.input)?;

    let mut settings = FormatSettings::new();
    if let Some(width) = args.textwidth {
        settings.set_text_width(width)?;
    }
    if let Some(height) = args.textheight {
        settings.set_text_height(height)?;
    }

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let printer = PagePrinter::new(BufWriter::new(out));
    let mut controller = Controller::with_settings(printer, settings, FormatSettings::endnote());

    let result = format_document(&input, &mut controller);
    for diagnostic in controller.diagnostics() {
        eprintln!("error: {diagnostic}");
    }
    result?;
    Ok(controller.diagnostics().len())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        fs::read_to_string(path)
    }
}
