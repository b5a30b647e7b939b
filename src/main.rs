use clap::{Args, Parser, Subcommand};
use pcalc_autogen::{
    check, generate_expects, Generator, DEFAULT_COUNT, DEFAULT_EXPECT_FILE, DEFAULT_MAX_DEPTH,
    DEFAULT_RESULTS_FILE, DEFAULT_TEST_FILE,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pcalc-autogen", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write random test cases.
    Generate {
        #[command(flatten)]
        generation: GenArgs,
        #[arg(long, default_value = DEFAULT_TEST_FILE)]
        test_file: PathBuf,
    },
    /// Write the expected transcript for a test-case file.
    Expects {
        #[arg(long, default_value = DEFAULT_TEST_FILE)]
        test_file: PathBuf,
        #[arg(long, default_value = DEFAULT_EXPECT_FILE)]
        expect_file: PathBuf,
    },
    /// Write test cases, then their expected transcript.
    Both {
        #[command(flatten)]
        generation: GenArgs,
        #[arg(long, default_value = DEFAULT_TEST_FILE)]
        test_file: PathBuf,
        #[arg(long, default_value = DEFAULT_EXPECT_FILE)]
        expect_file: PathBuf,
    },
    /// Compare the calculator's transcript against the expected one.
    Check {
        #[arg(long, default_value = DEFAULT_EXPECT_FILE)]
        expect_file: PathBuf,
        #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
        results_file: PathBuf,
    },
}

#[derive(Args)]
struct GenArgs {
    /// Number of test cases.
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: usize,
    /// Seed of the test-case stream; random if not given.
    #[arg(long)]
    seed: Option<u64>,
    /// Deepest nesting of parentheses.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl GenArgs {
    fn write(&self, test_file: &Path) -> Result<(), pcalc_autogen::Error> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let summary = Generator::new()
            .with_max_depth(self.max_depth)
            .write_tests(self.count, seed, test_file)?;
        log::debug!("{:?}", summary);
        Ok(())
    }
}

fn run(cmd: Commands) -> Result<bool, pcalc_autogen::Error> {
    match cmd {
        Commands::Generate {
            generation,
            test_file,
        } => generation.write(&test_file)?,
        Commands::Expects {
            test_file,
            expect_file,
        } => {
            generate_expects(&test_file, &expect_file)?;
        }
        Commands::Both {
            generation,
            test_file,
            expect_file,
        } => {
            generation.write(&test_file)?;
            generate_expects(&test_file, &expect_file)?;
        }
        Commands::Check {
            expect_file,
            results_file,
        } => {
            let report = check(&expect_file, &results_file)?;
            print!("{}", report);
            return Ok(report.is_clean());
        }
    }
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli.cmd) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
