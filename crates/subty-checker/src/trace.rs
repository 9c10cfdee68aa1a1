//! Optional call and return logging for the judgments of the checker. Every traced call opens a
//! `TRACE` span named after the judgment and records what it returned. Nothing is emitted unless a
//! subscriber is installed, and the wrapped computation is never altered.

use std::fmt::Display;

use tracing::{trace, trace_span};

use crate::{types::Type, Result};

/// A value that can be shown in a trace line.
pub trait Traced {
    fn describe(&self) -> String;
}

impl Traced for Type {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Traced for () {
    fn describe(&self) -> String {
        "ok".to_string()
    }
}

impl Traced for bool {
    fn describe(&self) -> String {
        self.to_string()
    }
}

/// Runs `run` inside a span called `name`, logging the subject it was called on and its outcome.
pub fn instrument<T: Traced>(
    name: &'static str,
    subject: impl Display,
    run: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let span = trace_span!("judgment", judgment = name);
    let _entered = span.enter();

    trace!(%subject, "{name}");

    let result = run();

    match &result {
        Ok(value) => trace!(returned = %value.describe(), "{name}"),
        Err(err) => trace!(error = %err, kind = %err.kind(), "{name}"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonoType;
    use subty_error::Error;
    use subty_location::ByteRange;

    #[test]
    fn results_pass_through_unchanged() {
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::TRACE)
                .with_test_writer()
                .finish(),
        );

        let ok = instrument("synth", "1", || Ok(MonoType::singleton(1.0)));
        assert_eq!(ok, Ok(MonoType::singleton(1.0)));

        let fits = instrument("isSubtype", "1 <: number", || Ok(true));
        assert_eq!(fits, Ok(true));

        let err: Result<()> = instrument("check", "x", || {
            Err(Error::new("unbound identifier 'x'", ByteRange::default()))
        });
        assert_eq!(err.unwrap_err().message(), "unbound identifier 'x'");
    }
}
