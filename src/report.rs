//! Acumulación y presentación de resultados.

use std::fmt::{self, Display};

use runtime::selfcheck::Outcome;
use thiserror::Error;

/// Una ejecución que no debe considerarse exitosa.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CheckError {
    /// Al menos una verificación no obtuvo el valor esperado.
    #[error("{failed} of {total} checks failed")]
    Failed { failed: usize, total: usize },

    /// La selección de grupos estaba vacía.
    #[error("No checks were run")]
    Empty,
}

/// Resultados de una corrida.
#[derive(Default)]
pub struct Report {
    total: usize,
    failures: Vec<Outcome>,
}

impl Report {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        if !outcome.passed() {
            self.failures.push(*outcome);
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failures(&self) -> &[Outcome] {
        &self.failures
    }

    /// Estado final de la corrida.
    pub fn status(&self) -> Result<(), CheckError> {
        match (self.total, self.failures.len()) {
            (0, _) => Err(CheckError::Empty),
            (_, 0) => Ok(()),
            (total, failed) => Err(CheckError::Failed { failed, total }),
        }
    }
}

impl Display for Report {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(
                fmt,
                "error: [{}] {}: expected {}, got {}",
                failure.suite.name(),
                failure.name,
                failure.expected,
                failure.actual
            )?;
        }

        match self.status() {
            Ok(()) => writeln!(fmt, "All {} checks passed", self.total),
            Err(error) => writeln!(fmt, "{}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::selfcheck::Suite;

    fn outcome(expected: i64, actual: i64) -> Outcome {
        Outcome {
            suite: Suite::Guest,
            name: "add",
            expected,
            actual,
        }
    }

    #[test]
    fn passing_report() {
        let mut report = Report::default();
        report.record(&outcome(15, 15));
        report.record(&outcome(24, 24));

        assert!(report.status().is_ok());
        assert_eq!(report.to_string(), "All 2 checks passed\n");
    }

    #[test]
    fn failures_are_listed() {
        let mut report = Report::default();
        report.record(&outcome(15, 15));
        report.record(&outcome(15, 16));

        assert_eq!(report.total(), 2);
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(
            report.status(),
            Err(CheckError::Failed { failed: 1, total: 2 })
        ));
        assert_eq!(
            report.to_string(),
            "error: [guest] add: expected 15, got 16\n1 of 2 checks failed\n"
        );
    }

    #[test]
    fn empty_report_is_an_error() {
        let report = Report::default();
        assert!(matches!(report.status(), Err(CheckError::Empty)));
        assert_eq!(report.to_string(), "No checks were run\n");
    }
}
