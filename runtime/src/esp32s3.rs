//! Implementación de `runtime::sys` para Espressif ESP32-S3.
//!
//! Esta es una plataforma `#![no_std]` sobre la que corre FreeRTOS. El
//! punto de entrada (`app_main`) le pertenece al firmware en C, por lo cual
//! este módulo solo aporta la sección crítica, la bitácora y el panic
//! handler que exige una `staticlib` sin `std`.

use core::{arch::asm, fmt::Arguments};

use crate::Level;

/// Bits de `PS.INTLEVEL`.
const PS_INTLEVEL_MASK: u32 = 0x0f;

/// Indica si el núcleo actual tiene interrupciones enmascaradas.
pub fn interrupts_masked() -> bool {
    let ps: u32;
    unsafe {
        asm!("rsr.ps {0}", out(reg) ps, options(nomem, nostack));
    }

    ps & PS_INTLEVEL_MASK != 0
}

pub fn log(level: Level, args: Arguments<'_>) {
    // Mismo prefijo que ESP_LOGx
    let prefix = match level {
        Level::Error => 'E',
        Level::Info => 'I',
        Level::Debug => 'D',
    };

    esp_println::println!("{} runtime: {}", prefix, args);
}

#[cfg(feature = "critical-section-impl")]
mod cs {
    use super::*;
    use critical_section::RawRestoreState;

    /// Nivel que usa `portDISABLE_INTERRUPTS()` (`XCHAL_EXCM_LEVEL`).
    ///
    /// `xtensa_lx::interrupt` enmascara con `rsil 15`, lo cual también
    /// bloquea las interrupciones de alta prioridad que FreeRTOS deja pasar;
    /// por eso se usa `rsil` directamente con este nivel.
    const EXCM_LEVEL: u32 = 3;

    struct InterruptMaskCriticalSection;
    critical_section::set_impl!(InterruptMaskCriticalSection);

    unsafe impl critical_section::Impl for InterruptMaskCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            let ps: u32;
            asm!("rsil {0}, {level}", out(reg) ps, level = const EXCM_LEVEL);
            ps
        }

        unsafe fn release(ps: RawRestoreState) {
            asm!("wsr.ps {0}", "rsync", in(reg) ps);
        }
    }
}

/// Algo salió mal.
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    sys_log!(Error, "panic: {}", info);

    loop {
        core::hint::spin_loop();
    }
}
