mod camera;
mod interaction;
mod layout;
mod view;

pub(super) use camera::{Camera, TransitionClock};
pub(super) use layout::MapLayout;
