mod dispatcher;

pub use dispatcher::CallDispatcher;
