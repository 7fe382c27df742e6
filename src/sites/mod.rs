pub mod mapper;
pub mod response;
pub mod transit;
