//! Biblioteca de soporte para enlazar código huésped en firmware ESP32-S3.
//!
//! # Propósito
//! El código objeto compilado desde otro lenguaje ("huésped") espera
//! encontrar en tiempo de enlazado varias rutinas que la plataforma no
//! provee de forma utilizable: operaciones atómicas de cuatro bytes que el
//! compilador reduce a llamadas `__atomic_*_4`, y rutinas de cadenas C cuya
//! copia residente en ROM choca con la que se enlaza junto al programa.
//! Esta biblioteca implementa ambas familias, así como las funciones del
//! huésped y la verificación cruzada que ejecuta el firmware al arrancar.
//!
//! # Enlazado
//! `libruntime` se construye como `staticlib` y se enlaza dentro de la
//! imagen de FreeRTOS. Las primitivas `__atomic_*_4` siempre se exportan
//! con su nombre de libatomic. Los nombres estándar de cadenas (`strlen`,
//! `strcmp`, etc.) solo se exportan sin "mangling" con el feature
//! `std-symbols`; el orden de enlazado decide entonces que estas
//! definiciones tengan prioridad sobre las de la ROM. Para una política
//! `-Wl,--wrap=<nombre>`, cada rutina de cadenas tiene además un punto de
//! entrada `__wrap_<nombre>` que siempre se exporta.
//!
//! # Espacios de nombres
//! Todo símbolo propio de esta biblioteca inicia con `shim_`, `guest_` o
//! `__wrap_`. Cometer una equivocación en la forma de invocar a alguna de
//! estas funciones desde C resulta en Comportamiento Indefinido.
//!
//! # Secciones críticas
//! Las primitivas atómicas se serializan enmascarando interrupciones a
//! través de [`critical_section`]. Al salir de una sección se restaura el
//! estado previo en vez de rehabilitar interrupciones incondicionalmente,
//! por lo cual anidar secciones es seguro. Cada plataforma registra su
//! implementación si el feature `critical-section-impl` está activo.

#![cfg_attr(target_arch = "xtensa", no_std, feature(asm_experimental_arch))]
#![no_builtins]

#[macro_use]
mod macros;

pub mod atomic;
pub mod guest;
pub mod selfcheck;
pub mod string;

#[cfg(target_family = "unix")]
mod hosted;

#[cfg(target_arch = "xtensa")]
mod esp32s3;

#[cfg(target_family = "unix")]
use crate::hosted as sys;

#[cfg(target_arch = "xtensa")]
use crate::esp32s3 as sys;

pub use sys::interrupts_masked;

/// Severidad de un mensaje de bitácora.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Info,
    Debug,
}
