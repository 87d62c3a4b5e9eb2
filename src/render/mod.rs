/// Backend trait, kinds and factory.
pub mod backend;
/// Sequential reference backend.
pub mod cpu;
/// rayon-backed parallel backend.
pub mod parallel;
