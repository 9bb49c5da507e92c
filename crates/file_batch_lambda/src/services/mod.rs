pub mod dispatcher;
pub mod lister;
pub mod monitor;
pub mod mover;
pub mod validator;
