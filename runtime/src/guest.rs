//! Funciones del huésped.
//!
//! Estas son las rutinas que el firmware invoca a través del ABI de C
//! para comprobar que el código objeto del huésped quedó bien enlazado.
//! Toda la aritmética es módulo 2^32, igual que en el huésped.

use core::ffi::c_char;

#[no_mangle]
pub extern "C" fn guest_add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

#[no_mangle]
pub extern "C" fn guest_multiply(a: u32, b: u32) -> u32 {
    a.wrapping_mul(b)
}

#[no_mangle]
pub extern "C" fn guest_subtract(a: u32, b: u32) -> u32 {
    a.wrapping_sub(b)
}

/// Desplazamiento lógico a la derecha; solo cuentan los cinco bits bajos de `b`.
#[no_mangle]
pub extern "C" fn guest_shift(a: u32, b: u32) -> u32 {
    a >> (b & 31)
}

/// `(x + y) + (x * y)`.
#[no_mangle]
pub extern "C" fn guest_compute(x: u32, y: u32) -> u32 {
    guest_add(guest_add(x, y), guest_multiply(x, y))
}

/// Exponenciación binaria. `power(_, 0) == 1`.
#[no_mangle]
pub extern "C" fn guest_power(base: u32, exponent: u32) -> u32 {
    let (mut result, mut base, mut exponent) = (1, base, exponent);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = guest_multiply(result, base);
        }

        base = guest_multiply(base, base);
        exponent = guest_shift(exponent, 1);
    }

    result
}

#[no_mangle]
pub extern "C" fn guest_fibonacci(n: u32) -> u32 {
    if n <= 1 {
        return n;
    }

    let (mut a, mut b) = (0, 1);
    for _ in 2..=n {
        let next = guest_add(a, b);
        a = b;
        b = next;
    }

    b
}

/// Primer carácter de una cadena.
///
/// # Safety
/// `name` debe apuntar al menos a un byte legible.
#[no_mangle]
pub unsafe extern "C" fn guest_char_test(name: *const c_char) -> c_char {
    *name
}

/// # Safety
/// `name` debe apuntar a una cadena terminada en cero.
#[no_mangle]
pub unsafe extern "C" fn guest_string_length(name: *const c_char) -> u32 {
    crate::string::strlen(name) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(guest_add(7, 8), 15);
        assert_eq!(guest_multiply(4, 6), 24);
        assert_eq!(guest_subtract(10, 3), 7);
        assert_eq!(guest_shift(32, 2), 8);
        assert_eq!(guest_compute(5, 3), 23);
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(guest_add(u32::MAX, 1), 0);
        assert_eq!(guest_subtract(0, 1), u32::MAX);
        assert_eq!(guest_multiply(1 << 16, 1 << 16), 0);
        assert_eq!(guest_shift(1 << 31, 33), 1 << 30);
    }

    #[test]
    fn power() {
        assert_eq!(guest_power(2, 10), 1024);
        assert_eq!(guest_power(3, 4), 81);
        assert_eq!(guest_power(7, 0), 1);
        assert_eq!(guest_power(0, 0), 1);
        assert_eq!(guest_power(2, 32), 0);
    }

    #[test]
    fn fibonacci() {
        let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, fib) in expected.iter().enumerate() {
            assert_eq!(guest_fibonacci(n as u32), *fib);
        }
    }

    #[test]
    fn strings() {
        let name = b"ESP32-S3\0".as_ptr().cast();
        unsafe {
            assert_eq!(guest_char_test(name) as u8, b'E');
            assert_eq!(guest_string_length(name), 8);
        }
    }
}
