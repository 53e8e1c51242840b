// Seams between the interpreter and the outside world

pub mod clock;
pub mod filesystem;
pub mod network;
