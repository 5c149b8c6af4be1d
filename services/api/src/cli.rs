use crate::demo::{
    run_demo, run_schedule_export, run_simulation, run_target_plan, DemoArgs, ScheduleArgs,
    SimulateArgs, TargetArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_capacity::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Capacity",
    about = "Simulate mortgage borrowing capacity and run the simulation service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Simulate affordability and feasibility for one household
    Simulate(SimulateArgs),
    /// Plan a purchase or export its repayment schedule
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
    /// Walk through every calculator with a sample household
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Work backwards from a target property price
    Target(TargetArgs),
    /// Export a month-by-month repayment schedule as CSV
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulation(args),
        Command::Plan {
            command: PlanCommand::Target(args),
        } => run_target_plan(args),
        Command::Plan {
            command: PlanCommand::Schedule(args),
        } => run_schedule_export(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["credit-capacity"]).expect("parses without arguments");
        assert!(cli.command.is_none());
    }

    #[test]
    fn simulate_parses_household_options() {
        let cli = Cli::try_parse_from([
            "credit-capacity",
            "simulate",
            "--income",
            "3200",
            "--household",
            "couple",
            "--employment",
            "civil_servant",
            "--category",
            "new",
        ])
        .expect("simulate arguments parse");

        match cli.command {
            Some(Command::Simulate(args)) => {
                assert_eq!(args.income, 3200.0);
                assert_eq!(args.household, credit_capacity::simulation::HouseholdType::Couple);
                assert!(args.installment.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn schedule_rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "credit-capacity",
            "plan",
            "schedule",
            "--capital",
            "150000",
            "--first-due-on",
            "05/03/2026",
        ]);
        assert!(result.is_err());
    }
}
