pub mod collection;
pub mod history;
pub mod request;
pub mod response;
pub mod session;
pub mod view;
