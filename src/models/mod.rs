mod doctor;
mod user;

pub use doctor::{Doctor, NewDoctor, UpdateDoctor};
pub use user::{DEFAULT_ROLE, NewUser, User};
