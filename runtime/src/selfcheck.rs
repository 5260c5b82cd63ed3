//! Verificación cruzada contra constantes esperadas.
//!
//! Al arrancar, el firmware ejecuta cada primitiva con valores conocidos
//! y compara contra el resultado esperado. El mismo conjunto de pruebas
//! corre en hosted a través de `shimcheck`.

use core::ffi::{c_char, c_int};

use crate::{
    atomic::{self, Word},
    guest, string,
};

/// Grupo de verificaciones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Suite {
    Atomic,
    String,
    Guest,
}

impl Suite {
    pub const ALL: [Suite; 3] = [Suite::Atomic, Suite::String, Suite::Guest];

    pub fn name(self) -> &'static str {
        match self {
            Suite::Atomic => "atomic",
            Suite::String => "string",
            Suite::Guest => "guest",
        }
    }
}

/// Resultado de una verificación.
///
/// Los valores se amplían a `i64` para que quepan tanto palabras de 32
/// bits sin signo como signos de comparación.
#[derive(Copy, Clone, Debug)]
pub struct Outcome {
    pub suite: Suite,
    pub name: &'static str,
    pub expected: i64,
    pub actual: i64,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

type Check<'a> = dyn 'a + FnMut(&'static str, i64, i64);

/// Ejecuta todas las verificaciones de `suite`.
///
/// Cada resultado se registra en bitácora y luego se entrega a `observe`.
pub fn run<F>(suite: Suite, mut observe: F)
where
    F: FnMut(&Outcome),
{
    sys_log!(Info, "Running {} checks", suite.name());

    let mut check = |name: &'static str, expected: i64, actual: i64| {
        let outcome = Outcome {
            suite,
            name,
            expected,
            actual,
        };

        if outcome.passed() {
            sys_log!(Debug, "[{}] {}: {}", suite.name(), name, actual);
        } else {
            sys_log!(
                Error,
                "[{}] {}: expected {}, got {}",
                suite.name(),
                name,
                expected,
                actual
            );
        }

        observe(&outcome);
    };

    match suite {
        Suite::Atomic => atomic_checks(&mut check),
        Suite::String => string_checks(&mut check),
        Suite::Guest => guest_checks(&mut check),
    }
}

/// Punto de entrada para `app_main()`.
///
/// Corre todas las verificaciones y retorna `true` si ninguna falló.
#[no_mangle]
pub extern "C" fn shim_selfcheck() -> bool {
    let (mut total, mut failed) = (0u32, 0u32);
    for suite in Suite::ALL {
        run(suite, |outcome| {
            total += 1;
            if !outcome.passed() {
                failed += 1;
            }
        });
    }

    if failed == 0 {
        sys_log!(Info, "All {} checks passed", total);
    } else {
        sys_log!(Error, "{} of {} checks failed", failed, total);
    }

    failed == 0
}

fn atomic_checks(check: &mut Check<'_>) {
    let word = Word::new(0);

    word.store(0xdead_beef);
    check("store/load", 0xdead_beef, word.load().into());

    word.store(u32::MAX);
    check("fetch_add returns previous", u32::MAX.into(), word.fetch_add(1).into());
    check("fetch_add wraps", 0, word.load().into());
    check("fetch_sub returns previous", 0, word.fetch_sub(1).into());
    check("fetch_sub wraps", u32::MAX.into(), word.load().into());

    let (mut value, mut expected) = (5u32, 5u32);
    let swapped = unsafe { atomic::compare_exchange(&mut value, &mut expected, 9) };
    check("compare_exchange on match", 1, swapped.into());
    check("compare_exchange stores desired", 9, value.into());

    let (mut value, mut expected) = (5u32, 4u32);
    let swapped = unsafe { atomic::compare_exchange(&mut value, &mut expected, 9) };
    check("compare_exchange on mismatch", 0, swapped.into());
    check("compare_exchange reports current", 5, expected.into());
    check("compare_exchange keeps value", 5, value.into());
}

fn string_checks(check: &mut Check<'_>) {
    unsafe {
        check("strlen of empty", 0, string::strlen(c(b"\0")) as i64);
        check("strlen", 8, string::strlen(c(b"ESP32-S3\0")) as i64);

        check("strcmp equal", 0, sign(string::strcmp(c(b"abc\0"), c(b"abc\0"))));
        check("strcmp less", -1, sign(string::strcmp(c(b"abc\0"), c(b"abd\0"))));
        check("strcmp greater", 1, sign(string::strcmp(c(b"abd\0"), c(b"abc\0"))));

        let mut padded = [0xffu8; 5];
        string::strncpy(padded.as_mut_ptr().cast(), c(b"hi\0"), padded.len());
        check("strncpy pads", 1, (padded == *b"hi\0\0\0").into());

        let mut joined = [0u8; 8];
        string::strcpy(joined.as_mut_ptr().cast(), c(b"foo\0"));
        string::strcat(joined.as_mut_ptr().cast(), c(b"bar\0"));
        check("strcat", 0, sign(string::strcmp(joined.as_ptr().cast(), c(b"foobar\0"))));

        check("strncmp prefix", 0, sign(string::strncmp(c(b"abcXX\0"), c(b"abcYY\0"), 3)));
    }
}

fn guest_checks(check: &mut Check<'_>) {
    let name = c(b"ESP32-S3\0");

    check("add", 15, guest::guest_add(7, 8).into());
    check("multiply", 24, guest::guest_multiply(4, 6).into());
    check("subtract", 7, guest::guest_subtract(10, 3).into());
    check("shift", 8, guest::guest_shift(32, 2).into());
    check("compute", 23, guest::guest_compute(5, 3).into());
    check("power", 1024, guest::guest_power(2, 10).into());
    check("fibonacci", 55, guest::guest_fibonacci(10).into());
    check("add (15, 25)", 40, guest::guest_add(15, 25).into());
    check("multiply (15, 25)", 375, guest::guest_multiply(15, 25).into());

    unsafe {
        check("string_length", 8, guest::guest_string_length(name).into());
        check("char_test", b'E'.into(), (guest::guest_char_test(name) as u8).into());
    }
}

fn c(bytes: &'static [u8]) -> *const c_char {
    bytes.as_ptr().cast()
}

fn sign(value: c_int) -> i64 {
    value.signum().into()
}
