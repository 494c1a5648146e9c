pub mod clock;
pub mod controller;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;

pub use clock::Clock;
pub use controller::{orbit_gesture, Button, Controller, OrbitGesture};
pub use display_context::DisplayContext;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
