//! Implementación de `runtime::sys` para sistemas hosted.
//!
//! No hay interrupciones reales aquí. Se simula el nivel de interrupción
//! (`PS.INTLEVEL`) por hilo, y la sección crítica más externa toma además
//! un cerrojo global para que las primitivas se comporten como en un único
//! núcleo aun cuando las pruebas corren en varios hilos.

use std::{cell::Cell, fmt::Arguments};

use crate::Level;

/// Nivel al que se eleva el contexto actual dentro de una sección crítica.
const MASKED_LEVEL: u32 = 3;

thread_local!(static INTLEVEL: Cell<u32> = Cell::new(0));

/// Indica si el contexto actual se encuentra dentro de una sección crítica.
pub fn interrupts_masked() -> bool {
    INTLEVEL.with(|level| level.get() != 0)
}

pub fn log(level: Level, args: Arguments<'_>) {
    match level {
        Level::Error => tracing::error!(target: "runtime", "{}", args),
        Level::Info => tracing::info!(target: "runtime", "{}", args),
        Level::Debug => tracing::debug!(target: "runtime", "{}", args),
    }
}

#[cfg(feature = "critical-section-impl")]
mod cs {
    use super::*;
    use critical_section::RawRestoreState;
    use std::{
        cell::RefCell,
        sync::{Mutex, MutexGuard, PoisonError},
    };

    static GLOBAL: Mutex<()> = Mutex::new(());

    // Presente solo mientras este hilo está dentro de la sección más externa
    thread_local!(static GUARD: RefCell<Option<MutexGuard<'static, ()>>> = RefCell::new(None));

    struct HostedCriticalSection;
    critical_section::set_impl!(HostedCriticalSection);

    unsafe impl critical_section::Impl for HostedCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            // El nivel es local al hilo, puede cambiarse antes de tomar el cerrojo
            let previous = INTLEVEL.with(|level| level.replace(MASKED_LEVEL));
            if previous == 0 {
                // Un pánico dentro de otra sección no invalida el contenido
                let guard = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
                GUARD.with(|slot| *slot.borrow_mut() = Some(guard));
            }

            previous
        }

        unsafe fn release(previous: RawRestoreState) {
            if previous == 0 {
                drop(GUARD.with(|slot| slot.borrow_mut().take()));
            }

            INTLEVEL.with(|level| level.set(previous));
        }
    }
}
