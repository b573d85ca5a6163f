pub mod context;
pub mod dispatcher;
