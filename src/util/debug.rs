/// A wrapper for println that is enabled
/// only when debug is enabled.
#[macro_export]
macro_rules! formpack_debug {
    ($heavy: ident, $($t: tt)*) => {
        if cfg!(feature="debug") && cfg!(feature="debug_all") {
            println!("[formpack] DBG! {}", format!($($t)*));
        }
    };
    ($($t: tt)*) => {
        if cfg!(feature="debug") {
            println!("[formpack] DBG! {}", format!($($t)*));
        }
    };
}
