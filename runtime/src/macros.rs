/// Emite un mensaje de bitácora por el medio que use la plataforma.
///
/// El primer argumento es una variante de [`crate::Level`], el resto
/// sigue la sintaxis de `format_args!()`.
macro_rules! sys_log {
    ($level:ident, $($format:tt)*) => {
        crate::sys::log(crate::Level::$level, format_args!($($format)*))
    };
}
