use std::fs::File;
use std::io;
use std::path::Path;

use clap::{Args, Parser, Subcommand};
use enum_dispatch::enum_dispatch;
use lifeprep::{
    config::Config,
    formatters::{CSVFormatter, JsonFormatter, OutputFormatter, OutputGenerator},
    Lifeprep, COL,
};
use log::{debug, info};
use polars::frame::DataFrame;
use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

use crate::display::{display_missing_report, display_summary, print_run_summary};
use crate::error::LifeprepCliResult;

/// Defines the output formats we are able to produce data in.
#[derive(Clone, Debug, Deserialize, Serialize, EnumString, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl From<&OutputFormat> for OutputFormatter {
    fn from(value: &OutputFormat) -> Self {
        match value {
            OutputFormat::Csv => OutputFormatter::Csv(CSVFormatter),
            OutputFormat::Json => OutputFormatter::Json(JsonFormatter),
        }
    }
}

fn write_output<T, U>(
    output_generator: T,
    mut data: DataFrame,
    output_file: Option<U>,
) -> LifeprepCliResult<()>
where
    T: OutputGenerator,
    U: AsRef<Path>,
{
    if let Some(output_file) = output_file {
        let mut f = File::create(output_file)?;
        output_generator.save(&mut f, &mut data)?;
    } else {
        let mut stdout_lock = io::stdout().lock();
        output_generator.save(&mut stdout_lock, &mut data)?;
    }
    Ok(())
}

/// Shared configuration overrides accepted by every subcommand, layered
/// over the values read from the config file.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(short, long, help = "Path to the raw input CSV")]
    input: Option<String>,
    #[arg(long, help = "Directory the artifacts are written to")]
    output_dir: Option<String>,
    #[arg(long, help = "First calendar year retained (inclusive)")]
    start_year: Option<i32>,
    #[arg(long, help = "Last calendar year retained (inclusive)")]
    end_year: Option<i32>,
}

impl ConfigArgs {
    fn apply(&self, config: Config) -> Config {
        Config {
            input_path: self.input.clone().unwrap_or(config.input_path),
            output_dir: self.output_dir.clone().unwrap_or(config.output_dir),
            start_year: self.start_year.unwrap_or(config.start_year),
            end_year: self.end_year.unwrap_or(config.end_year),
        }
    }
}

/// Trait that defines what to run when a given subcommand is invoked.
#[enum_dispatch]
pub trait RunCommand {
    fn run(&self, config: Config) -> LifeprepCliResult<()>;
}

/// The `run` command executes the full preprocessing pipeline and exports
/// every artifact to the output directory.
#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(flatten)]
    config_args: ConfigArgs,
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for PipelineCommand {
    fn run(&self, config: Config) -> LifeprepCliResult<()> {
        info!("Running `run` subcommand");
        let config = self.config_args.apply(config);
        if !self.quiet {
            println!("Loading raw dataset...");
        }
        let lifeprep = Lifeprep::new_with_config(config.clone())?;
        let (rows, cols) = lifeprep.raw.shape();
        if !self.quiet {
            println!("Loaded {rows} rows × {cols} columns");
        }

        let mut tables = lifeprep.process()?;
        if !self.quiet {
            print_run_summary(&tables, &config);
        }

        lifeprep.export(&mut tables)?;
        if !self.quiet {
            println!("README.txt saved");
            println!("All datasets exported successfully");
            println!("Complete preprocessing pipeline finished.");
        }
        Ok(())
    }
}

/// The `report` command prints missing-value diagnostics for the cleaned
/// base dataset, or serializes them to a file.
#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    config_args: ConfigArgs,
    #[arg(
        short = 'f',
        long,
        value_name = "csv|json",
        help = "Serialize the report instead of rendering a table"
    )]
    output_format: Option<OutputFormat>,
    #[arg(short = 'o', long, help = "Output file to place the results")]
    output_file: Option<String>,
}

impl RunCommand for ReportCommand {
    fn run(&self, config: Config) -> LifeprepCliResult<()> {
        info!("Running `report` subcommand");
        let config = self.config_args.apply(config);
        let lifeprep = Lifeprep::new_with_config(config)?;
        let tables = lifeprep.process()?;
        debug!("missing value report: {:?}", tables.missing_report.shape());
        match &self.output_format {
            Some(format) => {
                let formatter: OutputFormatter = format.into();
                write_output(formatter, tables.missing_report, self.output_file.as_deref())
            }
            None => {
                display_missing_report(&tables.missing_report)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum, Copy)]
pub enum SummaryGroup {
    Region,
    Income,
}

/// The `summary` command previews one of the aggregated yearly summary
/// tables without exporting anything.
#[derive(Args, Debug)]
pub struct SummaryCommand {
    #[command(flatten)]
    config_args: ConfigArgs,
    #[arg(
        value_enum,
        short,
        long,
        default_value_t = SummaryGroup::Region,
        help = "Grouping dimension for the summary"
    )]
    group: SummaryGroup,
    #[arg(short, long, help = "Maximum number of rows to display")]
    max_results: Option<usize>,
}

impl RunCommand for SummaryCommand {
    fn run(&self, config: Config) -> LifeprepCliResult<()> {
        info!("Running `summary` subcommand");
        let config = self.config_args.apply(config);
        let lifeprep = Lifeprep::new_with_config(config)?;
        let tables = lifeprep.process()?;
        let (summary, key) = match self.group {
            SummaryGroup::Region => (&tables.region_year, COL::REGION),
            SummaryGroup::Income => (&tables.income_year, COL::INCOME_GROUP),
        };
        display_summary(summary, key, self.max_results)?;
        Ok(())
    }
}

/// The entrypoint for the CLI.
#[derive(Parser, Debug)]
#[command(version, about="Lifeprep turns the raw life expectancy dataset into dashboard-ready tables", long_about = None, name="lifeprep")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[arg(
        short = 'q',
        long = "quiet",
        help = "\
            Do not print progress lines to stdout. Errors and logs (when `RUST_LOG`\n\
            is set) will still be printed.",
        global = true
    )]
    quiet: bool,
}

/// The list of subcommands available in the CLI. Each one implements the
/// RunCommand trait together with the args it needs.
#[derive(Subcommand, Debug)]
#[enum_dispatch(RunCommand)]
pub enum Commands {
    /// Run the full preprocessing pipeline and export all artifacts
    Run(PipelineCommand),
    /// Missing-value diagnostics for the cleaned base dataset
    Report(ReportCommand),
    /// Preview the aggregated yearly summaries
    Summary(SummaryCommand),
}
