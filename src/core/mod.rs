pub mod backend;
pub mod image;
pub mod processor;
pub mod progress;
pub mod state;

#[cfg(test)]
pub mod testing;
