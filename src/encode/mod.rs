/// Hue and angle helpers for flow visualization.
pub mod color;
/// Field-to-frame encoding.
pub mod frame;
/// Frame sinks (in-memory, PNG sequences).
pub mod sink;
