//! Primitivas atómicas de cuatro bytes.
//!
//! El compilador del huésped reduce operaciones atómicas sobre palabras
//! de 32 bits a llamadas `__atomic_*_4`. Aquí se implementan serializando
//! cada acceso dentro de una sección crítica, lo cual da la misma
//! atomicidad observable que instrucciones dedicadas siempre que haya un
//! solo núcleo y ningún otro maestro del bus modifique la misma memoria.
//! No hay garantía alguna entre núcleos.
//!
//! Cada sección crítica dura O(1): una lectura, una escritura o una
//! comparación. Ninguna operación reporta errores.

use core::{
    cell::UnsafeCell,
    ffi::{c_int, c_void},
    fmt,
    ptr,
};

/// Lee la palabra apuntada por `word`.
///
/// # Safety
/// `word` debe ser válido para lecturas de cuatro bytes, estar alineado
/// y seguir vivo durante la llamada.
pub unsafe fn load(word: *const u32) -> u32 {
    critical_section::with(|_| unsafe { ptr::read_volatile(word) })
}

/// Escribe `value` en la palabra apuntada por `word`.
///
/// # Safety
/// Igual que [`load()`], pero para escrituras.
pub unsafe fn store(word: *mut u32, value: u32) {
    critical_section::with(|_| unsafe { ptr::write_volatile(word, value) })
}

/// Suma `delta` (módulo 2^32) y retorna el valor previo.
///
/// # Safety
/// Igual que [`store()`].
pub unsafe fn fetch_add(word: *mut u32, delta: u32) -> u32 {
    critical_section::with(|_| unsafe { replace_with(word, |current| current.wrapping_add(delta)) })
}

/// Resta `delta` (módulo 2^32) y retorna el valor previo.
///
/// # Safety
/// Igual que [`store()`].
pub unsafe fn fetch_sub(word: *mut u32, delta: u32) -> u32 {
    critical_section::with(|_| unsafe { replace_with(word, |current| current.wrapping_sub(delta)) })
}

/// Escribe `desired` solo si `word` contiene `*expected`.
///
/// Retorna `true` si hubo escritura. En caso contrario, el valor
/// observado se copia a `*expected` para que el invocador pueda
/// reintentar con el estado actual.
///
/// # Safety
/// `word` debe cumplir lo mismo que en [`store()`] y `expected` debe ser
/// válido para lectura y escritura.
pub unsafe fn compare_exchange(word: *mut u32, expected: *mut u32, desired: u32) -> bool {
    critical_section::with(|_| unsafe {
        let current = ptr::read_volatile(word);
        if current == *expected {
            ptr::write_volatile(word, desired);
            true
        } else {
            *expected = current;
            false
        }
    })
}

/// Lectura y escritura sin sección crítica; el invocador ya debe tenerla.
unsafe fn replace_with<F>(word: *mut u32, update: F) -> u32
where
    F: FnOnce(u32) -> u32,
{
    let current = ptr::read_volatile(word);
    ptr::write_volatile(word, update(current));
    current
}

/// Palabra compartida entre el programa principal e interrupciones.
///
/// Es la versión segura de las funciones libres de este módulo: la
/// referencia garantiza validez y alineamiento del puntero.
#[repr(transparent)]
pub struct Word(UnsafeCell<u32>);

// Todo acceso al contenido ocurre dentro de una sección crítica
unsafe impl Sync for Word {}

impl Word {
    pub const fn new(value: u32) -> Self {
        Word(UnsafeCell::new(value))
    }

    /// Puntero crudo al contenido, apto para las funciones C de este módulo.
    pub fn as_ptr(&self) -> *mut u32 {
        self.0.get()
    }

    pub fn load(&self) -> u32 {
        unsafe { load(self.as_ptr()) }
    }

    pub fn store(&self, value: u32) {
        unsafe { store(self.as_ptr(), value) }
    }

    pub fn fetch_add(&self, delta: u32) -> u32 {
        unsafe { fetch_add(self.as_ptr(), delta) }
    }

    pub fn fetch_sub(&self, delta: u32) -> u32 {
        unsafe { fetch_sub(self.as_ptr(), delta) }
    }

    /// Reemplaza `current` por `new`.
    ///
    /// Sigue la convención de `core::sync::atomic`: `Ok` con el valor
    /// previo si hubo escritura, `Err` con el valor observado si no.
    pub fn compare_exchange(&self, current: u32, new: u32) -> Result<u32, u32> {
        let mut expected = current;
        if unsafe { compare_exchange(self.as_ptr(), &mut expected, new) } {
            Ok(current)
        } else {
            Err(expected)
        }
    }

    pub fn into_inner(self) -> u32 {
        self.0.into_inner()
    }
}

impl Default for Word {
    fn default() -> Self {
        Word::new(0)
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Word").field(&self.load()).finish()
    }
}

//==================================================================================//
//                         Interfaz de libatomic (ABI de C)                          //
//==================================================================================//
// Estos nombres siempre se exportan: ninguna libc de la plataforma los
// define, así que no hay copia en ROM con la cual chocar. Los argumentos de
// orden de memoria se aceptan por compatibilidad y se ignoran, ya que una
// sección crítica en un solo núcleo es secuencialmente consistente.

/// # Safety
/// Ver [`load()`].
#[no_mangle]
pub unsafe extern "C" fn __atomic_load_4(ptr: *const c_void, _memorder: c_int) -> u32 {
    load(ptr.cast())
}

/// # Safety
/// Ver [`store()`].
#[no_mangle]
pub unsafe extern "C" fn __atomic_store_4(ptr: *mut c_void, val: u32, _memorder: c_int) {
    store(ptr.cast(), val)
}

/// # Safety
/// Ver [`fetch_add()`].
#[no_mangle]
pub unsafe extern "C" fn __atomic_fetch_add_4(ptr: *mut c_void, val: u32, _memorder: c_int) -> u32 {
    fetch_add(ptr.cast(), val)
}

/// # Safety
/// Ver [`fetch_sub()`].
#[no_mangle]
pub unsafe extern "C" fn __atomic_fetch_sub_4(ptr: *mut c_void, val: u32, _memorder: c_int) -> u32 {
    fetch_sub(ptr.cast(), val)
}

/// `weak` se ignora: esta implementación nunca falla espuriamente.
///
/// # Safety
/// Ver [`compare_exchange()`].
#[no_mangle]
pub unsafe extern "C" fn __atomic_compare_exchange_4(
    ptr: *mut c_void,
    expected: *mut c_void,
    desired: u32,
    _weak: bool,
    _success_memorder: c_int,
    _failure_memorder: c_int,
) -> bool {
    compare_exchange(ptr.cast(), expected.cast(), desired)
}
