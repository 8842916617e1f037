pub mod events;
pub mod face_state;
pub mod requests;
pub mod status;
