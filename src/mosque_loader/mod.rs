mod factory;
mod loader;
mod serialized_mosque;

pub use loader::load_mosques_from;
