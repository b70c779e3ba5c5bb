pub mod envfile;
pub mod memo;
