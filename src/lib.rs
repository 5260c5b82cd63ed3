//! Verificador hosted para `libruntime`.
//!
//! # Propósito
//! En el firmware, `app_main()` invoca `shim_selfcheck()` y reporta el
//! resultado por UART. Este crate corre exactamente las mismas
//! verificaciones sobre la máquina de desarrollo, de modo que una
//! regresión en las primitivas atómicas o de cadenas se detecte antes de
//! flashear una imagen.
//!
//! # Flujo
//! Los grupos a ejecutar se eligen como un conjunto de [`Suites`]. Cada
//! resultado que produce [`runtime::selfcheck::run()`] se acumula en un
//! [`Report`], el cual decide el estado de salida del proceso.

pub mod report;
pub mod suite;

pub use report::{CheckError, Report};
pub use suite::{SuiteError, Suites};

/// Corre los grupos indicados y acumula sus resultados.
pub fn check(suites: Suites) -> Report {
    let mut report = Report::default();
    for suite in suites.iter() {
        runtime::selfcheck::run(suite, |outcome| report.record(outcome));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_suites_pass() {
        let report = check(Suites::all());
        assert!(report.total() > 0);
        assert!(report.failures().is_empty());
        assert!(report.status().is_ok());
    }

    #[test]
    fn empty_selection_runs_nothing() {
        let report = check(Suites::empty());
        assert_eq!(report.total(), 0);
        assert!(matches!(report.status(), Err(CheckError::Empty)));
    }
}
