pub mod clock;
pub mod surface_presenter;
pub mod timer;

pub use clock::{Clock, MAX_FRAME_DELTA};
pub use surface_presenter::SurfacePresenter;
pub use timer::{Countdown, Throttled};
