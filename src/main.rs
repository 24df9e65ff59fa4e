mod decode;
mod error;
mod parser;
mod serialiser;
mod shift;
mod srt;
mod timecode;

use crate::parser::Parser;
use crate::srt::Srt;

use std::io::{self, BufWriter, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser as ClapParser, Subcommand};
use log::{debug, info, LevelFilter, Log, Metadata, Record};

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Shift, cut and resynchronise SRT subtitles")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the subtitles will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Write a backup of the original input to the specified file."
    )]
    backup: Option<String>,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Log what is being done to the subtitles. Repeat for more detail."
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Move every subtitle by a fixed offset")]
    Shift {
        #[arg(
            value_name = "OFFSET",
            value_parser = timecode::parse_offset,
            allow_hyphen_values = true,
            help = "Milliseconds or a timecode like 00:00:02,500; negative moves earlier."
        )]
        offset: i64,
    },
    #[command(about = "Move only the subtitles lying strictly between two points in time")]
    ShiftPart {
        #[arg(value_name = "FROM", value_parser = timecode::parse_position)]
        from: Duration,
        #[arg(value_name = "TO", value_parser = timecode::parse_position)]
        to: Duration,
        #[arg(value_name = "OFFSET", value_parser = timecode::parse_offset, allow_hyphen_values = true)]
        offset: i64,
    },
    #[command(about = "Drop the subtitles lying strictly between two points in time")]
    Cut {
        #[arg(value_name = "FROM", value_parser = timecode::parse_position)]
        from: Duration,
        #[arg(value_name = "TO", value_parser = timecode::parse_position)]
        to: Duration,
    },
    #[command(about = "Stretch a timing correction over the whole file, the first subtitle \
                       moving by next to nothing and the last one by the full offset")]
    Sync {
        #[arg(value_name = "OFFSET", value_parser = timecode::parse_offset, allow_hyphen_values = true)]
        offset: i64,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    StderrLogger::init(level).context("Failed to install the logger")?;

    let raw = if cli.input == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    if let Some(backup_path) = &cli.backup {
        std::fs::write(backup_path, &raw)
            .context(format!("Failed to write backup file: '{}'", backup_path))?;
    }

    let text = decode::decode(&raw);

    let mut parser = Parser::new();
    let mut subs = parser
        .parse(&text)
        .context(format!("Failed to parse SRT file: '{}'", cli.input))?;
    debug!("parsed {} subtitles from '{}'", subs.len(), cli.input);

    if let Some(command) = &cli.command {
        apply(&mut subs, command)?;
    }

    if cli.output == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        serialiser::serialise(&subs, &mut writer).context("Failed to write to standard output")?;
        writer.flush().context("Failed to write to standard output")?;
    } else {
        let file = std::fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        let mut writer = BufWriter::new(file);
        serialiser::serialise(&subs, &mut writer).context("Failed to write to output file.")?;
        writer.flush().context("Failed to write to output file.")?;
    }

    Ok(())
}

fn apply(subs: &mut Srt, command: &Command) -> Result<()> {
    match command {
        Command::Shift { offset } => {
            info!("shifting all subtitles by {}ms", offset);
            subs.shift_all(*offset);
        }
        Command::ShiftPart { from, to, offset } => {
            info!(
                "shifting subtitles between {} and {} by {}ms",
                timecode::format_timestamp(*from),
                timecode::format_timestamp(*to),
                offset
            );
            subs.shift_part(*from, *to, *offset);
        }
        Command::Cut { from, to } => {
            info!(
                "cutting subtitles between {} and {}",
                timecode::format_timestamp(*from),
                timecode::format_timestamp(*to)
            );
            let before = subs.len();
            subs.cut_part(*from, *to);
            debug!("dropped {} subtitles", before - subs.len());
        }
        Command::Sync { offset } => {
            info!("spreading {}ms across the whole timeline", offset);
            subs.shift_sync(*offset)
                .context("Failed to resynchronise the subtitles")?;
        }
    }
    Ok(())
}

// Logs to stderr so that subtitles piped to stdout stay clean.
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(StderrLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level().to_string().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}
