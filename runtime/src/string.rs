//! Rutinas de cadenas C.
//!
//! La ROM del ESP32-S3 trae su propia copia de estas funciones, la cual
//! entra en conflicto con la que se enlaza junto al código huésped. Estas
//! implementaciones la reemplazan de dos formas:
//!
//! * Con el feature `std-symbols`, se exportan con su nombre estándar y el
//!   orden de enlazado hace que tengan prioridad.
//! * Siempre se exporta `__wrap_<nombre>`, para imágenes enlazadas con
//!   `-Wl,--wrap=<nombre>`.
//!
//! Ninguna rutina valida sus argumentos. Punteros nulos, cadenas sin
//! terminador o destinos sin capacidad suficiente son Comportamiento
//! Indefinido, igual que en cualquier libc.

use core::ffi::{c_char, c_int};

/// Cantidad de bytes antes del terminador.
///
/// # Safety
/// `s` debe apuntar a una cadena terminada en cero.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strlen(s: *const c_char) -> usize {
    let mut len = 0;
    while *s.add(len) != 0 {
        len += 1;
    }

    len
}

/// Copia `src` a `dest`, terminador incluido.
///
/// # Safety
/// `src` debe estar terminada en cero y `dest` debe tener espacio para
/// `strlen(src) + 1` bytes. Las regiones no pueden traslaparse.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strcpy(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    let mut i = 0;
    loop {
        let byte = *src.add(i);
        *dest.add(i) = byte;

        if byte == 0 {
            return dest;
        }

        i += 1;
    }
}

/// Compara byte por byte como `unsigned char`.
///
/// # Safety
/// Ambas cadenas deben estar terminadas en cero.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strcmp(a: *const c_char, b: *const c_char) -> c_int {
    let mut i = 0;
    loop {
        let (x, y) = (*a.add(i) as u8, *b.add(i) as u8);
        if x != y || x == 0 {
            return c_int::from(x) - c_int::from(y);
        }

        i += 1;
    }
}

/// Copia a lo sumo `n` bytes de `src`.
///
/// Si `src` es más corta que `n`, el resto de `dest` hasta `n` se llena
/// con ceros. Si no lo es, `dest` queda sin terminador.
///
/// # Safety
/// `dest` debe ser válido para `n` bytes de escritura, y `src` debe estar
/// terminada en cero o tener al menos `n` bytes legibles.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strncpy(dest: *mut c_char, src: *const c_char, n: usize) -> *mut c_char {
    let mut i = 0;
    while i < n && *src.add(i) != 0 {
        *dest.add(i) = *src.add(i);
        i += 1;
    }

    while i < n {
        *dest.add(i) = 0;
        i += 1;
    }

    dest
}

/// Agrega `src` al final de `dest`.
///
/// # Safety
/// Ambas cadenas deben estar terminadas en cero y `dest` debe tener espacio
/// para `strlen(dest) + strlen(src) + 1` bytes.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strcat(dest: *mut c_char, src: *const c_char) -> *mut c_char {
    strcpy(dest.add(strlen(dest)), src);
    dest
}

/// Igual que [`strcmp()`], pero compara a lo sumo `n` bytes.
///
/// # Safety
/// Ambas cadenas deben estar terminadas en cero o tener al menos `n`
/// bytes legibles.
#[cfg_attr(feature = "std-symbols", no_mangle)]
pub unsafe extern "C" fn strncmp(a: *const c_char, b: *const c_char, n: usize) -> c_int {
    for i in 0..n {
        let (x, y) = (*a.add(i) as u8, *b.add(i) as u8);
        if x != y || x == 0 {
            return c_int::from(x) - c_int::from(y);
        }
    }

    0
}

macro_rules! wrap {
    ($($wrapper:ident => $target:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        $(
            #[doc = concat!("Punto de redirección para `-Wl,--wrap=", stringify!($target), "`.")]
            ///
            /// # Safety
            #[doc = concat!("Ver [`", stringify!($target), "()`].")]
            #[no_mangle]
            pub unsafe extern "C" fn $wrapper($($arg: $ty),*) -> $ret {
                $target($($arg),*)
            }
        )*
    };
}

wrap! {
    __wrap_strlen => strlen(s: *const c_char) -> usize;
    __wrap_strcpy => strcpy(dest: *mut c_char, src: *const c_char) -> *mut c_char;
    __wrap_strcmp => strcmp(a: *const c_char, b: *const c_char) -> c_int;
    __wrap_strncpy => strncpy(dest: *mut c_char, src: *const c_char, n: usize) -> *mut c_char;
    __wrap_strcat => strcat(dest: *mut c_char, src: *const c_char) -> *mut c_char;
    __wrap_strncmp => strncmp(a: *const c_char, b: *const c_char, n: usize) -> c_int;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec, prelude::*};
    use std::ffi::CString;

    fn c(bytes: &[u8]) -> *const c_char {
        assert_eq!(bytes.last(), Some(&0), "test string lacks terminator");
        bytes.as_ptr().cast()
    }

    fn sign(value: c_int) -> c_int {
        value.signum()
    }

    #[test]
    fn length() {
        unsafe {
            assert_eq!(strlen(c(b"\0")), 0);
            assert_eq!(strlen(c(b"ESP32-S3\0")), 8);
        }
    }

    #[test]
    fn copy_includes_terminator_and_returns_dest() {
        let mut buffer = [0x55u8; 8];
        let dest: *mut c_char = buffer.as_mut_ptr().cast();

        let returned = unsafe { strcpy(dest, c(b"abc\0")) };
        assert_eq!(returned, dest);
        assert_eq!(&buffer[..4], b"abc\0");
        assert_eq!(&buffer[4..], &[0x55; 4]);
    }

    #[test]
    fn compare() {
        unsafe {
            assert_eq!(strcmp(c(b"abc\0"), c(b"abc\0")), 0);
            assert!(strcmp(c(b"abc\0"), c(b"abd\0")) < 0);
            assert!(strcmp(c(b"abd\0"), c(b"abc\0")) > 0);
            assert!(strcmp(c(b"ab\0"), c(b"abc\0")) < 0);
            assert_eq!(strcmp(c(b"\0"), c(b"\0")), 0);
        }
    }

    #[test]
    fn compare_is_unsigned() {
        // 0x80 es negativo si c_char tiene signo
        unsafe {
            assert!(strcmp(c(b"\x80\0"), c(b"a\0")) > 0);
            assert!(strncmp(c(b"a\0"), c(b"\xff\0"), 1) < 0);
        }
    }

    #[test]
    fn bounded_copy_pads_with_zeros() {
        let mut buffer = [0xaau8; 8];
        let dest: *mut c_char = buffer.as_mut_ptr().cast();

        let returned = unsafe { strncpy(dest, c(b"hi\0"), 5) };
        assert_eq!(returned, dest);
        assert_eq!(&buffer[..5], b"hi\0\0\0");
        assert_eq!(&buffer[5..], &[0xaa; 3]);
    }

    #[test]
    fn bounded_copy_truncates_without_terminator() {
        let mut buffer = [0xaau8; 4];
        unsafe { strncpy(buffer.as_mut_ptr().cast(), c(b"hello\0"), 3) };
        assert_eq!(buffer, *b"hel\xaa");
    }

    #[test]
    fn bounded_copy_of_zero_writes_nothing() {
        let mut buffer = [0xaau8; 4];
        unsafe { strncpy(buffer.as_mut_ptr().cast(), c(b"hello\0"), 0) };
        assert_eq!(buffer, [0xaa; 4]);
    }

    #[test]
    fn concatenate() {
        let mut buffer = [0u8; 8];
        buffer[..4].copy_from_slice(b"foo\0");
        let dest: *mut c_char = buffer.as_mut_ptr().cast();

        let returned = unsafe { strcat(dest, c(b"bar\0")) };
        assert_eq!(returned, dest);
        assert_eq!(&buffer[..7], b"foobar\0");
    }

    #[test]
    fn bounded_compare() {
        unsafe {
            assert_eq!(strncmp(c(b"abcXX\0"), c(b"abcYY\0"), 3), 0);
            assert!(strncmp(c(b"abcXX\0"), c(b"abcYY\0"), 4) < 0);
            assert_eq!(strncmp(c(b"x\0"), c(b"y\0"), 0), 0);
            assert_eq!(strncmp(c(b"ab\0"), c(b"ab\0"), 10), 0);
        }
    }

    #[test]
    fn wrappers_forward() {
        let mut buffer = [0u8; 16];
        let dest: *mut c_char = buffer.as_mut_ptr().cast();

        unsafe {
            assert_eq!(__wrap_strlen(c(b"ESP32-S3\0")), 8);
            assert_eq!(__wrap_strcpy(dest, c(b"foo\0")), dest);
            assert_eq!(__wrap_strcat(dest, c(b"bar\0")), dest);
            assert_eq!(__wrap_strcmp(dest, c(b"foobar\0")), 0);
            assert_eq!(__wrap_strncmp(dest, c(b"foozzz\0"), 3), 0);
            assert_eq!(__wrap_strncpy(dest, c(b"hi\0"), 4), dest);
        }

        assert_eq!(&buffer[..5], b"hi\0\0a");
    }

    proptest! {
        #[test]
        fn length_counts_bytes(bytes in vec(1u8..=255, 0..32)) {
            let s = CString::new(bytes.clone()).unwrap();
            prop_assert_eq!(unsafe { strlen(s.as_ptr()) }, bytes.len());
        }

        #[test]
        fn compare_orders_like_byte_slices(
            a in vec(1u8..=255, 0..8),
            b in vec(1u8..=255, 0..8),
        ) {
            let (sa, sb) = (CString::new(a.clone()).unwrap(), CString::new(b.clone()).unwrap());
            let expected = a.cmp(&b) as c_int;
            prop_assert_eq!(sign(unsafe { strcmp(sa.as_ptr(), sb.as_ptr()) }), expected);
        }

        #[test]
        fn bounded_compare_orders_like_prefixes(
            a in vec(1u8..=255, 0..8),
            b in vec(1u8..=255, 0..8),
            n in 0usize..10,
        ) {
            let (sa, sb) = (CString::new(a.clone()).unwrap(), CString::new(b.clone()).unwrap());
            let expected = a[..a.len().min(n)].cmp(&b[..b.len().min(n)]) as c_int;
            prop_assert_eq!(sign(unsafe { strncmp(sa.as_ptr(), sb.as_ptr(), n) }), expected);
        }
    }
}
