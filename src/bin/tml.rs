//! ticketml CLI - render receipt table markup to fixed-width lines

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use env_logger::{Builder, Env};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use ticketml::{
    compile,
    diagnostics::{check_markup, format_diagnostics},
    render_lines, render_rows, MemoryTarget, PrintDevice, PrintStatus, Printer,
    RenderConfig, RenderError,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tml")]
#[command(version)]
#[command(about = "ticketml - table markup renderer for receipt printers", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Default column width, overrides the configuration
    #[arg(long, global = true)]
    col_width: Option<usize>,

    /// Spacing between columns, overrides the configuration
    #[arg(long, global = true)]
    border_width: Option<usize>,

    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render markup to lines (default action)
    Render {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the compiled hash-tree as JSON
    Tree {
        /// Input file path
        input: Option<String>,
    },

    /// Print each row with its effective props
    Rows {
        /// Input file path
        input: Option<String>,
    },

    /// Print the device commands for the markup
    Commands {
        /// Input file path
        input: Option<String>,
    },

    /// Check markup for dropped or malformed content
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(filter)).init();

    let config = load_config(&cli)?;

    match cli.command {
        Some(cmd) => handle_subcommand(cmd, &config),
        None => render(cli.input_file, cli.output, &config),
    }
}

#[cfg(feature = "cli")]
fn load_config(cli: &Cli) -> io::Result<RenderConfig> {
    let mut config = match cli.config {
        Some(ref path) => RenderConfig::load(path).map_err(to_io)?,
        None => RenderConfig::default(),
    };
    if let Some(width) = cli.col_width {
        config.layout.col_width = width;
    }
    if let Some(width) = cli.border_width {
        config.layout.border_width = width;
    }
    Ok(config)
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, config: &RenderConfig) -> io::Result<()> {
    match cmd {
        Commands::Render { input, output } => render(input, output, config)?,

        Commands::Tree { input } => {
            let content = read_input(input)?;
            let tree = compile(&content).map_err(to_io)?;
            let json = serde_json::to_string_pretty(tree.as_ref()).map_err(io::Error::other)?;
            println!("{}", json);
        }

        Commands::Rows { input } => {
            let content = read_input(input)?;
            let rows = render_rows(&content, &config.layout).map_err(to_io)?;
            for row in rows {
                let props: Vec<String> = row
                    .props
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                println!("|{}| {}", row.text, props.join(" "));
            }
        }

        Commands::Commands { input } => {
            let content = read_input(input)?;
            let device = PrintDevice::new(MemoryTarget::new(), config.device.clone());
            let mut printer = Printer::new(device, config.layout.clone());
            match printer.print_markup(&content) {
                Ok(PrintStatus::Failed) => {
                    eprintln!("Error: print device failed");
                    std::process::exit(1);
                }
                Ok(PrintStatus::Empty) => {
                    eprintln!("Nothing to print");
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => return Err(to_io(e)),
            }
            for cmd in printer.device().target().batches.iter().flatten() {
                println!(
                    "y={:<5} h={:<4} size={:<4} font={} |{}|",
                    cmd.line_box.y,
                    cmd.line_box.height,
                    cmd.font.font_size,
                    cmd.font.font_name,
                    cmd.text
                );
            }
        }

        Commands::Check { input, no_color } => {
            let content = read_input(input)?;
            let result = check_markup(&content);
            let output = format_diagnostics(&result, !no_color);
            println!("{}", output);

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("ticketml - table markup renderer for receipt printers");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ <table>/<tr>/<td> markup with quoted attributes");
            println!("  ✓ Fixed and auto column widths, cell wrapping");
            println!("  ✓ Nested tables inside cells");
            println!("  ✓ Per-row fontSize, fontFamily and lineHeight");
            println!("  ✓ Markup diagnostics");
            println!();
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn render(input: Option<String>, output: Option<String>, config: &RenderConfig) -> io::Result<()> {
    let content = read_input(input)?;
    let lines = render_lines(&content, &config.layout).map_err(to_io)?;

    match output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            for line in &lines {
                writeln!(file, "{}", line)?;
            }
            eprintln!("✓ {} line(s) written to: {}", lines.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in &lines {
                writeln!(out, "{}", line)?;
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn read_input(path: Option<String>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn to_io(err: RenderError) -> io::Error {
    match err {
        RenderError::Io { message } => io::Error::other(message),
        other => io::Error::new(io::ErrorKind::InvalidInput, other.to_string()),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install ticketml --features cli");
    eprintln!("  tml [OPTIONS] [INPUT_FILE]");
}
