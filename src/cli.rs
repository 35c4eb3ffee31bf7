use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::{build_scenarios, load_scenarios, parse_count_list, InputLayout, LoadedScenarios};
use crate::error::StaffingResult;
use crate::parallel::{run_scenarios, run_scenarios_with_pool, summarize, RunSummary, WorkerPool};
use crate::report::{
    build_daily_report, derive_output_path, format_results_table, write_daily_report,
    write_outcomes, OutputFormat,
};
use crate::staffing::{resolve_parameters, ModelRevision, Parameters};

#[derive(Parser, Debug)]
#[command(name = "orstaff")]
#[command(about = "Daily operating-room staffing allocation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute every scenario in a CSV or workbook file and write the results
    Run(RunArgs),
    /// Compute scenarios given as comma-separated count lists
    Scenarios(ScenariosArgs),
    /// Print the effective parameter set as YAML
    Params(ModelArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// YAML parameter file (defaults to $ORSTAFF_PARAMS when set)
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Named model revision: scenario, ratio35 or daily-report
    #[arg(long)]
    pub revision: Option<ModelRevision>,
}

impl ModelArgs {
    pub fn resolve(&self) -> StaffingResult<Parameters> {
        resolve_parameters(self.params.as_deref(), self.revision)
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input table (.csv, .xlsx, .xlsm, .xls, .ods)
    pub input: PathBuf,

    /// Output path; derived from the input name when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = "csv")]
    pub format: OutputFormat,

    /// auto, long (one row per scenario) or wide (one column per day)
    #[arg(long, default_value = "auto")]
    pub layout: InputLayout,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Worker threads; 0 uses every core
    #[arg(long, default_value = "0")]
    pub workers: usize,
}

#[derive(Args, Debug)]
pub struct ScenariosArgs {
    #[arg(long)]
    pub total_rooms: String,

    #[arg(long)]
    pub trainees: String,

    #[arg(long)]
    pub crnas: String,

    #[arg(long)]
    pub faculty: String,

    /// Also write the result table here
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = "csv")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Parse `args` (program name first) and dispatch. Returns the process exit code:
/// 0 on success, 1 on input or runtime errors, 2 on usage errors.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let outcome = match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Scenarios(args) => handle_scenarios(args),
        Command::Params(args) => handle_params(args),
    };

    match outcome {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {err}");
            1
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} day(s) ({} empty): {} of {} room(s) covered, {} uncovered, CRNA shortage {}",
        summary.days,
        summary.empty_days,
        summary.rooms_covered,
        summary.total_rooms,
        summary.rooms_uncovered,
        summary.crnas_shortage
    );
}

fn handle_run(args: RunArgs) -> StaffingResult<()> {
    let params = args.model.resolve()?;
    let loaded = load_scenarios(&args.input, args.layout)?;
    let pool = WorkerPool::with_workers(args.workers);
    let outcomes = run_scenarios_with_pool(loaded.scenarios(), &params, &pool)?;

    let output = args
        .output
        .unwrap_or_else(|| derive_output_path(&args.input, args.format.extension()));
    match &loaded {
        LoadedScenarios::Long(_) => write_outcomes(&output, &outcomes, args.format)?,
        LoadedScenarios::Wide(wide) => {
            let report = build_daily_report(&wide.days, &outcomes, &params);
            write_daily_report(&output, &report, args.format)?;
        }
    }

    print_summary(&summarize(&outcomes));
    println!("Results saved to {}", output.display());
    Ok(())
}

fn handle_scenarios(args: ScenariosArgs) -> StaffingResult<()> {
    let params = args.model.resolve()?;
    let total_rooms = parse_count_list(&args.total_rooms, "total_rooms")?;
    let trainees = parse_count_list(&args.trainees, "trainees")?;
    let crnas = parse_count_list(&args.crnas, "crnas")?;
    let faculty = parse_count_list(&args.faculty, "faculty")?;
    let scenarios = build_scenarios(&total_rooms, &trainees, &crnas, &faculty)?;

    let outcomes = run_scenarios(&scenarios, &params);
    print!("{}", format_results_table(&outcomes));

    if let Some(output) = args.output {
        write_outcomes(&output, &outcomes, args.format)?;
        println!("Results saved to {}", output.display());
    }
    Ok(())
}

fn handle_params(args: ModelArgs) -> StaffingResult<()> {
    let params = args.resolve()?;
    print!("{}", params.to_yaml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("orstaff")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn run_command_parses_flags() {
        let cli = Cli::try_parse_from(argv(&[
            "run",
            "week_input.xlsx",
            "--format",
            "json",
            "--layout",
            "wide",
            "--revision",
            "daily-report",
            "--workers",
            "2",
        ]))
        .expect("arguments should parse");
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.input, PathBuf::from("week_input.xlsx"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.layout, InputLayout::Wide);
        assert_eq!(args.model.revision, Some(ModelRevision::DailyReport));
        assert_eq!(args.workers, 2);
    }

    #[test]
    fn unknown_revision_is_a_usage_error() {
        let err = Cli::try_parse_from(argv(&["params", "--revision", "v9"]))
            .expect_err("v9 is not a revision");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_subcommand_exits_with_usage_code() {
        assert_eq!(run_with_args(&argv(&[])), 2);
    }

    #[test]
    fn mismatched_lists_exit_with_error_code() {
        let code = run_with_args(&argv(&[
            "scenarios",
            "--total-rooms",
            "20,22",
            "--trainees",
            "4",
            "--crnas",
            "10,11",
            "--faculty",
            "12,13",
        ]));
        assert_eq!(code, 1);
    }
}
