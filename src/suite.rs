//! Selección de grupos de verificación.

use std::str::FromStr;

use bitflags::bitflags;
use runtime::selfcheck::Suite;
use thiserror::Error;
use unicase::UniCase;

bitflags! {
    /// Conjunto de grupos a ejecutar.
    pub struct Suites: u32 {
        /// Primitivas `__atomic_*_4`.
        const ATOMIC = 0x01;

        /// Rutinas de cadenas C.
        const STRING = 0x02;

        /// Funciones exportadas por el huésped.
        const GUEST = 0x04;
    }
}

/// Nombre de grupo inválido en línea de comandos.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Unknown suite `{0}`, expected one of: atomic, string, guest")]
    Unknown(String),
}

impl Suites {
    /// Enumera los grupos presentes, en el orden en que deben correr.
    pub fn iter(self) -> impl Iterator<Item = Suite> {
        Suite::ALL
            .into_iter()
            .filter(move |suite| self.contains(Suites::from(*suite)))
    }
}

impl From<Suite> for Suites {
    fn from(suite: Suite) -> Self {
        match suite {
            Suite::Atomic => Suites::ATOMIC,
            Suite::String => Suites::STRING,
            Suite::Guest => Suites::GUEST,
        }
    }
}

impl FromStr for Suites {
    type Err = SuiteError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let name = UniCase::new(string.trim());
        Suite::ALL
            .into_iter()
            .find(|suite| UniCase::new(suite.name()) == name)
            .map(Suites::from)
            .ok_or_else(|| SuiteError::Unknown(string.to_owned()))
    }
}
