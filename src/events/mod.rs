mod gesture;
mod resize;
mod visibility;

pub use gesture::wire_audio_gesture;
pub use resize::wire_resize;
pub use visibility::wire_visibility;
