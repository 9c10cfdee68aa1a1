use std::{path::PathBuf, process::exit, rc::Rc};

use clap::{Parser, Subcommand};
use subty_checker::{
    config::{Config, LiteralPolicy},
    context::{Ctx, Env},
    infer::Infer,
    is_subtype,
    program::Program,
};
use subty_error::Error;
use subty_parser::{parse_expr, parse_type};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "subty", version, about = "A structural type checker", long_about = None)]
struct Cli {
    /// Type literals as their primitive type instead of a singleton
    #[arg(long, global = true)]
    widen_literals: bool,
    /// Maximum nesting of expressions being checked
    #[arg(long, global = true, default_value_t = 128)]
    max_depth: usize,
    /// Maximum number of union branches one operation may visit
    #[arg(long, global = true, default_value_t = 4096)]
    max_branches: usize,
    /// Log every judgment of the checker to stderr
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every statement of a file
    Check { file: PathBuf },
    /// Synthesize the type of an expression
    Synth { expr: String },
    /// Decide if the first type is a subtype of the second
    Subtype { fst: String, snd: String },
}

impl Cli {
    fn config(&self) -> Config {
        let literals = if self.widen_literals {
            LiteralPolicy::Primitive
        } else {
            LiteralPolicy::Singleton
        };

        Config::default()
            .with_literals(literals)
            .with_max_depth(self.max_depth)
            .with_max_branches(self.max_branches)
    }
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("subty_checker=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

fn fail(err: Error, code: &str, file_name: &str) -> ! {
    eprintln!("{}", err.with_code(code, file_name));
    exit(1)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.trace);
    let config = cli.config();

    match cli.command {
        Command::Check { file } => {
            tracing::info!(file = %file.display(), "checking");

            let program = Program::open(&file)
                .unwrap_or_else(|err| {
                    eprintln!("cannot read '{}': {err}", file.display());
                    exit(1)
                })
                .with_config(config);

            let report = program
                .check(Env::empty())
                .unwrap_or_else(|err| fail(err, &program.code, &program.file_name));

            for outcome in &report.outcomes {
                if let Ok(judgment) = &outcome.result {
                    println!("{judgment}");
                }
            }

            for diagnostic in program.diagnostics(&report) {
                eprintln!("{diagnostic}");
            }

            if report.has_errors() {
                exit(1)
            }
        }

        Command::Synth { expr: code } => {
            let ctx = Ctx::new(Env::empty(), Rc::new(config));

            let typ = parse_expr(&code)
                .and_then(|expr| expr.infer(ctx))
                .unwrap_or_else(|err| fail(err, &code, "<expr>"));

            println!("{typ}");
        }

        Command::Subtype { fst, snd } => {
            let ctx = Ctx::new(Env::empty(), Rc::new(config));

            let [fst, snd] = [fst, snd].map(|code| {
                parse_type(&code)
                    .and_then(|node| node.infer(ctx.clone()))
                    .unwrap_or_else(|err| fail(err, &code, "<type>"))
            });

            println!("{}", is_subtype(&fst, &snd));
        }
    }
}
