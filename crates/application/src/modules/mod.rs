mod core_module;

pub use core_module::CoreModule;
