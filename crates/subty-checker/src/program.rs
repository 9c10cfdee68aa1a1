//! The program driver. A program is a list of statements checked in order against an environment
//! that grows with every `declare` and `let`. A failing statement is reported and checking goes on
//! with the next one, so one mistake does not hide the rest.

use std::{fmt::Display, fs::read_to_string, io, path::Path, rc::Rc};

use itertools::Itertools;
use subty_error::Error;
use subty_location::ByteRange;
use subty_parser::{Parser, Parsers};
use subty_tree::r#abstract::{Statement, StatementKind};

use crate::{
    check::Check,
    config::Config,
    context::{Ctx, Env},
    infer::Infer,
    types::Type,
    Result,
};

/// What a successful statement established.
#[derive(Debug, Clone, PartialEq)]
pub enum Judgment {
    Binding(String, Type),
    Value(Type),
}

impl Display for Judgment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binding(name, typ) => write!(f, "{name}: {typ}"),
            Self::Value(typ) => write!(f, "{typ}"),
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub location: ByteRange,
    pub result: Result<Judgment>,
}

#[derive(Debug)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    /// The environment after the last statement.
    pub env: Env,
}

impl Report {
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.outcomes.iter().filter_map(|outcome| outcome.result.as_ref().err())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// One line per statement: the judgment, or the location and message of the failure.
    pub fn render(&self, code: &str) -> String {
        self.outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(judgment) => judgment.to_string(),
                Err(err) => {
                    let location = err.location().unwrap_or(outcome.location);
                    format!("{}: {}: {}", location.locate(code), err.kind(), err.message())
                }
            })
            .join("\n")
    }
}

/// Checks every statement, binding what `declare` and `let` introduce. An annotated `let` binds
/// its annotation even when the value does not check.
pub fn check_program(env: Env, config: Rc<Config>, statements: &[Statement]) -> Report {
    let mut env = env;

    let outcomes = statements
        .iter()
        .map(|statement| {
            let result = run(&mut env, &config, statement);

            if let Err(err) = &result {
                tracing::debug!(kind = %err.kind(), "statement failed: {err}");
            }

            Outcome {
                location: statement.location,
                result,
            }
        })
        .collect();

    Report { outcomes, env }
}

fn run(env: &mut Env, config: &Rc<Config>, statement: &Statement) -> Result<Judgment> {
    let mut ctx = Ctx::new(env.clone(), config.clone());
    ctx.set_position(statement.location);

    match &statement.data {
        StatementKind::Declare(name, annotation) => {
            let typ = annotation.infer(ctx)?;
            *env = env.set(name.data.clone(), typ.clone());
            Ok(Judgment::Binding(name.data.clone(), typ))
        }

        StatementKind::Let(name, None, value) => {
            let typ = value.infer(ctx)?;
            *env = env.set(name.data.clone(), typ.clone());
            Ok(Judgment::Binding(name.data.clone(), typ))
        }

        StatementKind::Let(name, Some(annotation), value) => {
            let typ = annotation.infer(ctx.clone())?;
            *env = env.set(name.data.clone(), typ.clone());
            value.check(ctx, typ.clone())?;
            Ok(Judgment::Binding(name.data.clone(), typ))
        }

        StatementKind::Expr(expr) => expr.infer(ctx).map(Judgment::Value),
    }
}

/// A source file together with the settings it is checked with.
pub struct Program {
    pub file_name: String,
    pub code: String,
    pub config: Rc<Config>,
    parser: Parsers,
}

impl Program {
    pub fn new(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
            config: Rc::default(),
            parser: Parsers::default(),
        }
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        read_to_string(path).map(|code| Self::new(path.display().to_string(), code))
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Rc::new(config);
        self
    }

    /// Parses and checks the whole file. Only a syntax error stops the program as a whole.
    pub fn check(&self, env: Env) -> Result<Report> {
        let statements: Vec<Statement> = self.parser.parse_source(&self.code)?;
        Ok(check_program(env, self.config.clone(), &statements))
    }

    /// The report of [Program::check] as text, with a syntax error rendered as a single line.
    pub fn render(&self, env: Env) -> String {
        match self.check(env) {
            Ok(report) => report.render(&self.code),
            Err(err) => match err.render_location(&self.code) {
                Some(location) => format!("{location}: {}: {}", err.kind(), err.message()),
                None => format!("{}: {}", err.kind(), err.message()),
            },
        }
    }

    /// Every failure rendered against the source, as shown to a user.
    pub fn diagnostics(&self, report: &Report) -> Vec<String> {
        report
            .errors()
            .map(|err| err.clone().with_code(&self.code, &self.file_name).to_string())
            .collect()
    }
}
